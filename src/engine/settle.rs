use crate::core::member::MemberId;
use crate::engine::balance::{round_currency, Balance};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// One currency cent: the threshold below which a balance or transfer is
/// treated as settled. Absorbs rounding noise without ever emitting a
/// spurious sub-cent transfer.
pub const EPSILON: Decimal = dec!(0.01);

/// A single payment from one member to another.
///
/// Produced only by the planner; never persisted, purely a computation
/// result. `amount` is always greater than [`EPSILON`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transfer {
    pub from: MemberId,
    pub from_name: String,
    pub to: MemberId,
    pub to_name: String,
    pub amount: Decimal,
}

impl std::fmt::Display for Transfer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} → {}: ${}", self.from_name, self.to_name, self.amount)
    }
}

/// Converts rounded balances into an ordered, near-minimal transfer plan.
pub struct SettlementPlanner;

impl SettlementPlanner {
    /// Plan transfers that drive every balance to within [`EPSILON`] of
    /// zero, using at most `n - 1` transfers for `n` members with non-zero
    /// balance.
    ///
    /// # Algorithm
    ///
    /// Two-cursor sweep over balances stably sorted ascending by amount
    /// (ties keep event order, so equal balances settle deterministically):
    /// the largest debtor pays the largest creditor the smaller of the two
    /// outstanding amounts, settled endpoints advance, repeat until the
    /// cursors meet. `O(n log n)` in the member count.
    pub fn plan(balances: &[Balance]) -> Vec<Transfer> {
        if balances.is_empty() {
            return Vec::new();
        }

        let mut sorted = balances.to_vec();
        // Stable sort: equal amounts keep their original event order.
        sorted.sort_by(|a, b| a.amount.cmp(&b.amount));

        let mut transfers = Vec::new();
        let mut i = 0; // largest debtor (most negative)
        let mut j = sorted.len() - 1; // largest creditor (most positive)

        while i < j {
            // A balance of at most one cent counts as settled. Exactly one
            // cent must be included here: it is too small to transfer, and
            // leaving it unsettled would stall the sweep.
            if sorted[i].amount.abs() <= EPSILON {
                i += 1;
                continue;
            }
            if sorted[j].amount.abs() <= EPSILON {
                j -= 1;
                continue;
            }

            let amount = sorted[i].amount.abs().min(sorted[j].amount);

            if amount > EPSILON {
                transfers.push(Transfer {
                    from: sorted[i].member_id.clone(),
                    from_name: sorted[i].member_name.clone(),
                    to: sorted[j].member_id.clone(),
                    to_name: sorted[j].member_name.clone(),
                    amount: round_currency(amount),
                });
                sorted[i].amount = round_currency(sorted[i].amount + amount);
                sorted[j].amount = round_currency(sorted[j].amount - amount);
            }

            if sorted[i].amount.abs() <= EPSILON {
                i += 1;
            }
            if sorted[j].amount.abs() <= EPSILON {
                j -= 1;
            }
        }

        transfers
    }
}
