//! The settlement engine: validation, balance aggregation, transfer planning.
//!
//! One pure implementation, parameterized by [`EngineOptions`], serves both
//! the authoritative service path and any optimistic client-side fallback,
//! so the two can never drift in tie-breaking or epsilon rules.

pub mod balance;
pub mod error;
pub mod settle;
pub mod summary;
pub mod validate;

use crate::core::event::Event;
use crate::core::fee::{FeeId, FeeSet};
use crate::core::member::{MemberDirectory, MemberId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub use balance::{Balance, BalanceComputer, BalanceSheet};
pub use error::{EngineError, ErrorKind};
pub use settle::{SettlementPlanner, Transfer, EPSILON};
pub use summary::ExpenseSummary;

/// Engine configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EngineOptions {
    /// When a fee has no payer, assign the first member of its effective
    /// beneficiary set instead of failing. Every substitution is surfaced
    /// as a [`CalculationNote`] — never applied silently.
    ///
    /// Defaults to `false` (the authoritative path); the fallback policy
    /// sets it to `true`.
    pub auto_assign_missing_payer: bool,
}

impl EngineOptions {
    /// Strict options: a missing payer is an error.
    pub fn strict() -> Self {
        Self::default()
    }

    /// Fallback options: missing payers are auto-assigned.
    pub fn fallback() -> Self {
        Self {
            auto_assign_missing_payer: true,
        }
    }
}

/// Something the caller should show the user alongside the result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum CalculationNote {
    /// A fee had no payer and one was substituted by the fallback policy.
    #[serde(rename_all = "camelCase")]
    AutoAssignedPayer {
        fee_id: FeeId,
        fee_name: String,
        payer: MemberId,
    },
}

impl std::fmt::Display for CalculationNote {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CalculationNote::AutoAssignedPayer {
                fee_name, payer, ..
            } => write!(
                f,
                "no payer was specified for \"{fee_name}\"; {payer} was assigned by default"
            ),
        }
    }
}

/// Diagnostic payload attached to a [`SettlementReport`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebugInfo {
    pub balances: Vec<Balance>,
}

/// The result of one settlement computation.
///
/// Serializes (camelCase) to the wire contract:
/// `{ transactions: [...], debug: { balances: [...] }, notes: [...] }`,
/// with `notes` omitted when empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettlementReport {
    /// Ordered transfers that settle every balance.
    pub transactions: Vec<Transfer>,
    /// Per-member balances the plan was derived from. Diagnostic; callers
    /// that don't need it may drop it.
    pub debug: DebugInfo,
    /// Informational notes, e.g. payer substitutions under the fallback
    /// policy.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<CalculationNote>,
}

impl SettlementReport {
    pub fn balances(&self) -> &[Balance] {
        &self.debug.balances
    }

    /// Total amount moved across all transfers (equals the sum of the
    /// positive balances).
    pub fn total_transferred(&self) -> Decimal {
        self.transactions.iter().map(|t| t.amount).sum()
    }
}

impl std::fmt::Display for SettlementReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Settlement Plan ===")?;
        if self.transactions.is_empty() {
            writeln!(f, "Nothing to settle.")?;
        }
        for transfer in &self.transactions {
            writeln!(f, "  {}", transfer)?;
        }
        writeln!(f, "Total moved: ${}", self.total_transferred())?;

        writeln!(f, "\n--- Balances ---")?;
        for balance in self.balances() {
            writeln!(f, "  {:<20} {:>10}", balance.member_name, balance.amount)?;
        }

        if !self.notes.is_empty() {
            writeln!(f, "\n--- Notes ---")?;
            for note in &self.notes {
                writeln!(f, "  {}", note)?;
            }
        }
        Ok(())
    }
}

/// The settlement engine.
///
/// A pure, synchronous computation over immutable inputs: safe to invoke
/// concurrently for independent events with no coordination. Callers own
/// snapshotting `event`, `members`, and `fees` before the call.
pub struct SettlementEngine;

impl SettlementEngine {
    /// Compute balances and a settlement plan for one event.
    ///
    /// Fails fast with a classified [`EngineError`] on the first invalid
    /// fee in input order; no partial result is ever returned. An empty
    /// fee list succeeds with an empty plan.
    pub fn calculate(
        event: &Event,
        directory: &MemberDirectory,
        fees: &FeeSet,
        options: &EngineOptions,
    ) -> Result<SettlementReport, EngineError> {
        let resolved = validate::validate(event, fees, options)?;

        let notes: Vec<CalculationNote> = resolved
            .iter()
            .filter(|item| item.auto_assigned)
            .map(|item| CalculationNote::AutoAssignedPayer {
                fee_id: item.fee.id().clone(),
                fee_name: item.fee.name().to_string(),
                payer: item.payer.clone(),
            })
            .collect();

        let balances = BalanceComputer::compute(event, directory, &resolved)?;
        let transactions = SettlementPlanner::plan(&balances);

        log::debug!(
            "settled event {}: {} fees, {} transfers, {} notes",
            event.id(),
            resolved.len(),
            transactions.len(),
            notes.len()
        );

        Ok(SettlementReport {
            transactions,
            debug: DebugInfo { balances },
            notes,
        })
    }

    /// The degraded-but-deterministic local policy: identical to
    /// [`SettlementEngine::calculate`] except that a fee with no payer gets
    /// the first member of its effective beneficiary set, surfaced as a
    /// note. Same tie-breaking, same epsilon — byte-for-byte reproducible
    /// for identical inputs, so an optimistic client can present a
    /// plausible plan while an authoritative answer is unavailable.
    pub fn fallback(
        event: &Event,
        directory: &MemberDirectory,
        fees: &FeeSet,
    ) -> Result<SettlementReport, EngineError> {
        Self::calculate(event, directory, fees, &EngineOptions::fallback())
    }
}
