use crate::core::event::Event;
use crate::core::fee::{FeeRecord, FeeSet};
use crate::core::member::MemberId;
use crate::engine::error::EngineError;
use crate::engine::EngineOptions;
use rust_decimal::Decimal;
use std::collections::HashSet;

/// A fee that passed validation, with its payer and beneficiary set resolved.
///
/// Zero-price fees never appear here: they have no effect on balances and
/// are dropped before payer/beneficiary checks, so a half-entered draft fee
/// does not block the whole calculation.
#[derive(Debug)]
pub struct ResolvedFee<'a> {
    pub fee: &'a FeeRecord,
    pub payer: &'a MemberId,
    pub beneficiaries: &'a [MemberId],
    /// True when the payer was substituted by the fallback policy.
    pub auto_assigned: bool,
}

/// Classify malformed inputs before any balance mutation.
///
/// Checks run per fee in input order and stop at the first failure; no
/// errors are aggregated and no balances are touched for a rejected input.
/// An empty fee list is not an error — it resolves to an empty plan.
pub fn validate<'a>(
    event: &'a Event,
    fees: &'a FeeSet,
    options: &EngineOptions,
) -> Result<Vec<ResolvedFee<'a>>, EngineError> {
    if event.member_ids().is_empty() {
        return Err(EngineError::InvalidEvent);
    }

    let eligible: HashSet<&MemberId> = event.member_ids().iter().collect();
    let mut resolved = Vec::with_capacity(fees.len());

    for fee in fees.fees() {
        if fee.price() < Decimal::ZERO {
            return Err(EngineError::InvalidFeePrice {
                fee_id: fee.id().clone(),
                price: fee.price(),
            });
        }

        if fee.price() == Decimal::ZERO {
            log::debug!("skipping zero-price fee {} ({})", fee.id(), fee.name());
            continue;
        }

        let beneficiaries = fee.effective_beneficiaries(event);
        if beneficiaries.is_empty() {
            return Err(EngineError::EmptyBeneficiarySet {
                fee_id: fee.id().clone(),
            });
        }

        let (payer, auto_assigned) = match fee.paid_by() {
            Some(payer) => (payer, false),
            None if options.auto_assign_missing_payer => {
                log::debug!(
                    "auto-assigning payer {} for fee {} ({})",
                    beneficiaries[0],
                    fee.id(),
                    fee.name()
                );
                (&beneficiaries[0], true)
            }
            None => {
                return Err(EngineError::MissingPayer {
                    fee_id: fee.id().clone(),
                })
            }
        };

        if !eligible.contains(payer) {
            return Err(EngineError::UnknownPayer {
                fee_id: fee.id().clone(),
                member_id: payer.clone(),
            });
        }

        for beneficiary in beneficiaries {
            if !eligible.contains(beneficiary) {
                return Err(EngineError::UnknownBeneficiary {
                    fee_id: fee.id().clone(),
                    member_id: beneficiary.clone(),
                });
            }
        }

        resolved.push(ResolvedFee {
            fee,
            payer,
            beneficiaries,
            auto_assigned,
        });
    }

    Ok(resolved)
}
