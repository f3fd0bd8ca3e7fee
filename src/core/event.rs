use crate::core::member::MemberId;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for an event.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(String);

impl EventId {
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

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for EventId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// An event: the set of members eligible to owe or be owed.
///
/// Member ids are deduplicated but keep their insertion order — that order
/// is the tie-break for equal balances, so the settlement plan for a given
/// event is fully deterministic.
///
/// # Examples
///
/// ```
/// use split_engine::core::event::{Event, EventId};
/// use split_engine::core::member::MemberId;
///
/// let event = Event::new(
///     EventId::new("trip"),
///     vec![MemberId::new("m1"), MemberId::new("m2"), MemberId::new("m1")],
/// );
/// assert_eq!(event.member_ids().len(), 2);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    #[serde(rename = "eventId")]
    id: EventId,
    #[serde(rename = "memberIds")]
    member_ids: Vec<MemberId>,
}

impl Event {
    /// Create a new event. Duplicate member ids are dropped, keeping the
    /// first occurrence.
    pub fn new(id: EventId, member_ids: Vec<MemberId>) -> Self {
        let mut deduped: Vec<MemberId> = Vec::with_capacity(member_ids.len());
        for member_id in member_ids {
            if !deduped.contains(&member_id) {
                deduped.push(member_id);
            }
        }
        Self {
            id,
            member_ids: deduped,
        }
    }

    pub fn id(&self) -> &EventId {
        &self.id
    }

    /// The members eligible to owe/be owed, in insertion order.
    pub fn member_ids(&self) -> &[MemberId] {
        &self.member_ids
    }

    pub fn contains(&self, member_id: &MemberId) -> bool {
        self.member_ids.contains(member_id)
    }

    pub fn member_count(&self) -> usize {
        self.member_ids.len()
    }
}
