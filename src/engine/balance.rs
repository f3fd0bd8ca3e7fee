use crate::core::event::Event;
use crate::core::member::{MemberDirectory, MemberId};
use crate::engine::error::EngineError;
use crate::engine::settle::EPSILON;
use crate::engine::validate::ResolvedFee;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One member's net position after aggregating all fees.
///
/// Positive means the member is owed money, negative means they owe.
/// Amounts are rounded to 2 decimal places exactly once, at the end of
/// aggregation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Balance {
    pub member_id: MemberId,
    pub member_name: String,
    #[serde(rename = "balance")]
    pub amount: Decimal,
}

/// Per-member running balances, in event-member order.
///
/// Entries keep the event's insertion order — iteration order is a
/// documented part of the contract, not an implementation detail of some
/// unordered map — and an index map backs id lookups.
#[derive(Debug, Clone)]
pub struct BalanceSheet {
    entries: Vec<(MemberId, Decimal)>,
    index: HashMap<MemberId, usize>,
}

impl BalanceSheet {
    /// A sheet with one zero balance per event member.
    pub fn for_event(event: &Event) -> Self {
        let entries: Vec<(MemberId, Decimal)> = event
            .member_ids()
            .iter()
            .map(|id| (id.clone(), Decimal::ZERO))
            .collect();
        let index = entries
            .iter()
            .enumerate()
            .map(|(pos, (id, _))| (id.clone(), pos))
            .collect();
        Self { entries, index }
    }

    /// Current (unrounded) amount for a member, zero if unknown.
    pub fn amount(&self, member_id: &MemberId) -> Decimal {
        self.index
            .get(member_id)
            .map(|&pos| self.entries[pos].1)
            .unwrap_or(Decimal::ZERO)
    }

    fn adjust(&mut self, member_id: &MemberId, delta: Decimal) {
        if let Some(&pos) = self.index.get(member_id) {
            self.entries[pos].1 += delta;
        }
    }

    /// Sum of all balances. Exactly zero before rounding; afterwards each
    /// member contributes at most half a cent of drift.
    pub fn net_sum(&self) -> Decimal {
        self.entries.iter().map(|(_, amount)| *amount).sum()
    }

    pub fn is_balanced(&self) -> bool {
        self.net_sum().abs() < EPSILON
    }

    /// Finish aggregation: round each balance once and attach display names.
    ///
    /// Fails with a consistency error if the directory has no record for
    /// one of the event's members.
    pub fn into_balances(self, directory: &MemberDirectory) -> Result<Vec<Balance>, EngineError> {
        self.entries
            .into_iter()
            .map(|(member_id, amount)| {
                let name = directory.name_of(&member_id).ok_or_else(|| {
                    EngineError::UnknownMember {
                        member_id: member_id.clone(),
                    }
                })?;
                Ok(Balance {
                    member_name: name.to_string(),
                    member_id,
                    amount: round_currency(amount),
                })
            })
            .collect()
    }
}

/// Round to 2 decimal places, half away from zero.
pub(crate) fn round_currency(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Aggregates validated fees into one signed balance per event member.
pub struct BalanceComputer;

impl BalanceComputer {
    /// Apply every resolved fee in input order.
    ///
    /// For each fee: the payer is credited the full price, then every
    /// beneficiary (payer included, when they share the fee) is debited
    /// `price / |beneficiaries|`. The division stays exact; rounding
    /// happens once per member at the end, so many small fees cannot
    /// compound rounding error.
    pub fn compute(
        event: &Event,
        directory: &MemberDirectory,
        resolved: &[ResolvedFee<'_>],
    ) -> Result<Vec<Balance>, EngineError> {
        let mut sheet = BalanceSheet::for_event(event);

        for item in resolved {
            let share = item.fee.price() / Decimal::from(item.beneficiaries.len());
            sheet.adjust(item.payer, item.fee.price());
            for beneficiary in item.beneficiaries {
                sheet.adjust(beneficiary, -share);
            }
        }

        sheet.into_balances(directory)
    }
}
