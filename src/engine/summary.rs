use crate::core::event::Event;
use crate::core::fee::{FeeId, FeeSet};
use crate::core::member::{MemberDirectory, MemberId};
use crate::engine::balance::round_currency;
use crate::engine::error::EngineError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// One member's portion of a single fee.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeShare {
    pub fee_id: FeeId,
    pub fee_name: String,
    pub amount: Decimal,
}

/// What one member's total share of the event costs is, fee by fee.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberShare {
    pub member_id: MemberId,
    pub member_name: String,
    pub share: Decimal,
    pub fee_breakdown: Vec<FeeShare>,
}

/// A read-only cost report: the event's total expense and each member's
/// share, independent of who actually paid.
///
/// This answers "what does this event cost each of us" where the
/// settlement plan answers "who should pay whom now". Payers are
/// irrelevant here and are not validated.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseSummary {
    pub total_expense: Decimal,
    pub member_shares: Vec<MemberShare>,
}

impl ExpenseSummary {
    /// Compute the per-member cost breakdown for an event.
    ///
    /// Shares accumulate with exact division and are rounded to 2 decimal
    /// places once at the end, like balances.
    pub fn compute(
        event: &Event,
        directory: &MemberDirectory,
        fees: &FeeSet,
    ) -> Result<Self, EngineError> {
        if event.member_ids().is_empty() {
            return Err(EngineError::InvalidEvent);
        }

        let eligible: HashSet<&MemberId> = event.member_ids().iter().collect();
        let mut shares: HashMap<&MemberId, Decimal> = HashMap::new();
        let mut breakdowns: HashMap<&MemberId, Vec<FeeShare>> = HashMap::new();
        let mut total_expense = Decimal::ZERO;

        for fee in fees.fees() {
            if fee.price() < Decimal::ZERO {
                return Err(EngineError::InvalidFeePrice {
                    fee_id: fee.id().clone(),
                    price: fee.price(),
                });
            }
            total_expense += fee.price();

            let beneficiaries = fee.effective_beneficiaries(event);
            if beneficiaries.is_empty() {
                return Err(EngineError::EmptyBeneficiarySet {
                    fee_id: fee.id().clone(),
                });
            }

            let per_member = fee.price() / Decimal::from(beneficiaries.len());
            for beneficiary in beneficiaries {
                if !eligible.contains(beneficiary) {
                    return Err(EngineError::UnknownBeneficiary {
                        fee_id: fee.id().clone(),
                        member_id: beneficiary.clone(),
                    });
                }
                *shares.entry(beneficiary).or_insert(Decimal::ZERO) += per_member;
                breakdowns.entry(beneficiary).or_default().push(FeeShare {
                    fee_id: fee.id().clone(),
                    fee_name: fee.name().to_string(),
                    amount: per_member,
                });
            }
        }

        let member_shares = event
            .member_ids()
            .iter()
            .map(|member_id| {
                let name = directory.name_of(member_id).ok_or_else(|| {
                    EngineError::UnknownMember {
                        member_id: member_id.clone(),
                    }
                })?;
                let mut fee_breakdown = breakdowns.remove(member_id).unwrap_or_default();
                for fee_share in &mut fee_breakdown {
                    fee_share.amount = round_currency(fee_share.amount);
                }
                Ok(MemberShare {
                    member_id: member_id.clone(),
                    member_name: name.to_string(),
                    share: round_currency(
                        shares.get(member_id).copied().unwrap_or(Decimal::ZERO),
                    ),
                    fee_breakdown,
                })
            })
            .collect::<Result<Vec<_>, EngineError>>()?;

        Ok(ExpenseSummary {
            total_expense,
            member_shares,
        })
    }
}

impl std::fmt::Display for ExpenseSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Expense Summary ===")?;
        writeln!(f, "Total expense: ${}", self.total_expense)?;
        for member in &self.member_shares {
            writeln!(f, "\n  {} owes ${}", member.member_name, member.share)?;
            for fee in &member.fee_breakdown {
                writeln!(f, "    {:<20} ${}", fee.fee_name, fee.amount)?;
            }
        }
        Ok(())
    }
}
