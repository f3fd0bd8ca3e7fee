use crate::core::event::Event;
use crate::core::member::MemberId;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a fee record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeeId(String);

impl FeeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a random UUID v4 identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for FeeId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// A single shared expense: one payer fronts `price`, split equally among
/// the beneficiaries.
///
/// An empty `beneficiary_ids` list means the fee is shared by the whole
/// event. `paid_by` may be absent: strict validation rejects such fees,
/// the fallback policy assigns the first beneficiary instead.
///
/// Fee records are immutable once created. The engine never mutates or
/// repairs them, even when the fallback policy substitutes a payer — the
/// substitution lives only in the computed result.
///
/// # Examples
///
/// ```
/// use split_engine::core::fee::FeeRecord;
/// use split_engine::core::member::MemberId;
/// use rust_decimal_macros::dec;
///
/// let dinner = FeeRecord::new("Dinner", dec!(90))
///     .with_payer(MemberId::new("m1"))
///     .with_beneficiaries(vec![
///         MemberId::new("m1"),
///         MemberId::new("m2"),
///         MemberId::new("m3"),
///     ]);
/// assert_eq!(dinner.price(), dec!(90));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeeRecord {
    /// Unique identifier for this fee.
    id: FeeId,
    /// Display name ("Dinner", "Taxi", ...).
    name: String,
    /// The amount fronted by the payer. Must be non-negative.
    price: Decimal,
    /// The member who fronted payment, when known.
    paid_by: Option<MemberId>,
    /// Members sharing this fee. Empty means the whole event.
    beneficiary_ids: Vec<MemberId>,
    /// When this fee was recorded.
    created_at: DateTime<Utc>,
}

impl FeeRecord {
    /// Create a new fee shared by the whole event, with a generated id.
    ///
    /// Price validity (non-negative) is checked by the engine's validation
    /// pass, not here, so malformed upstream data surfaces as a classified
    /// error instead of a panic.
    pub fn new(name: impl Into<String>, price: Decimal) -> Self {
        Self {
            id: FeeId::random(),
            name: name.into(),
            price,
            paid_by: None,
            beneficiary_ids: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Create a fee with a specific id (useful for testing / determinism).
    pub fn with_id(id: FeeId, name: impl Into<String>, price: Decimal) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            paid_by: None,
            beneficiary_ids: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Set the payer.
    pub fn with_payer(mut self, payer: MemberId) -> Self {
        self.paid_by = Some(payer);
        self
    }

    /// Restrict the fee to a subset of the event's members.
    pub fn with_beneficiaries(mut self, beneficiary_ids: Vec<MemberId>) -> Self {
        self.beneficiary_ids = beneficiary_ids;
        self
    }

    // --- Accessors ---

    pub fn id(&self) -> &FeeId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> Decimal {
        self.price
    }

    pub fn paid_by(&self) -> Option<&MemberId> {
        self.paid_by.as_ref()
    }

    pub fn beneficiary_ids(&self) -> &[MemberId] {
        &self.beneficiary_ids
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// The members this fee is actually divided among: the explicit
    /// beneficiary list, or the whole event when that list is empty.
    pub fn effective_beneficiaries<'a>(&'a self, event: &'a Event) -> &'a [MemberId] {
        if self.beneficiary_ids.is_empty() {
            event.member_ids()
        } else {
            &self.beneficiary_ids
        }
    }
}

/// An ordered collection of fees for one computation call.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeeSet {
    fees: Vec<FeeRecord>,
}

impl FeeSet {
    pub fn new() -> Self {
        Self { fees: Vec::new() }
    }

    pub fn add(&mut self, fee: FeeRecord) {
        self.fees.push(fee);
    }

    pub fn fees(&self) -> &[FeeRecord] {
        &self.fees
    }

    pub fn len(&self) -> usize {
        self.fees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fees.is_empty()
    }

    /// Total value of all fees.
    pub fn gross_total(&self) -> Decimal {
        self.fees.iter().map(|f| f.price()).sum()
    }
}

impl FromIterator<FeeRecord> for FeeSet {
    fn from_iter<T: IntoIterator<Item = FeeRecord>>(iter: T) -> Self {
        Self {
            fees: iter.into_iter().collect(),
        }
    }
}
