use crate::core::fee::FeeId;
use crate::core::member::MemberId;
use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

/// Which half of the error taxonomy an [`EngineError`] falls into.
///
/// Callers branch on this, never on message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The caller supplied a fixable input (HTTP surfaces map this to 400).
    Validation,
    /// The backing data is inconsistent upstream (HTTP surfaces map this to 500).
    Consistency,
}

/// A classified engine failure.
///
/// The engine fails fast on the first invalid fee in input order; it never
/// aggregates errors and never returns a partial result.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EngineError {
    /// The event has no members, so nobody can owe or be owed.
    #[error("event has no members")]
    InvalidEvent,

    /// A fee's price is negative.
    #[error("fee {fee_id} has an invalid price: {price}")]
    InvalidFeePrice { fee_id: FeeId, price: Decimal },

    /// A fee resolved to an empty beneficiary set.
    #[error("fee {fee_id} has no members to share it")]
    EmptyBeneficiarySet { fee_id: FeeId },

    /// A fee has no payer and the policy forbids auto-assignment.
    #[error("no payer specified for fee {fee_id}")]
    MissingPayer { fee_id: FeeId },

    /// A fee names a payer who is not a member of the event.
    #[error("fee {fee_id} names payer {member_id} who is not in the event")]
    UnknownPayer { fee_id: FeeId, member_id: MemberId },

    /// A fee names a beneficiary who is not a member of the event.
    #[error("fee {fee_id} names beneficiary {member_id} who is not in the event")]
    UnknownBeneficiary { fee_id: FeeId, member_id: MemberId },

    /// The member directory has no record for one of the event's members.
    #[error("no member record found for {member_id}")]
    UnknownMember { member_id: MemberId },
}

impl EngineError {
    /// Classify this error for callers deciding how to react.
    pub fn kind(&self) -> ErrorKind {
        match self {
            EngineError::InvalidEvent
            | EngineError::InvalidFeePrice { .. }
            | EngineError::EmptyBeneficiarySet { .. }
            | EngineError::MissingPayer { .. } => ErrorKind::Validation,
            EngineError::UnknownPayer { .. }
            | EngineError::UnknownBeneficiary { .. }
            | EngineError::UnknownMember { .. } => ErrorKind::Consistency,
        }
    }

    /// The HTTP status a surrounding service should answer with.
    ///
    /// A missing event is the caller's 404; it never reaches the engine.
    pub fn status_code(&self) -> u16 {
        match self.kind() {
            ErrorKind::Validation => 400,
            ErrorKind::Consistency => 500,
        }
    }
}
