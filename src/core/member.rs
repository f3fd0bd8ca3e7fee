use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a member of an event.
///
/// # Examples
///
/// ```
/// use split_engine::core::member::MemberId;
///
/// let alice = MemberId::new("member-alice");
/// let bob = MemberId::new("member-bob");
/// assert_ne!(alice, bob);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemberId(String);

impl MemberId {
    /// Create a new member identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a random UUID v4 identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Returns the string representation of this member ID.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for MemberId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// A member of the expense-sharing group.
///
/// Identity is the `id`; the `name` is display-only and attached to
/// balances and transfers so callers can render them without another lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    #[serde(rename = "memberId")]
    id: MemberId,
    #[serde(rename = "memberName")]
    name: String,
}

impl Member {
    pub fn new(id: MemberId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    pub fn id(&self) -> &MemberId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Ordered id → member lookup.
///
/// Insertion order is preserved so that anything enumerating the directory
/// produces stable output. Lookups go through an index map.
#[derive(Debug, Clone, Default)]
pub struct MemberDirectory {
    members: Vec<Member>,
    index: HashMap<MemberId, usize>,
}

impl MemberDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a member. A member re-added under the same id replaces the
    /// earlier record in place.
    pub fn add(&mut self, member: Member) {
        match self.index.get(member.id()) {
            Some(&pos) => self.members[pos] = member,
            None => {
                self.index.insert(member.id().clone(), self.members.len());
                self.members.push(member);
            }
        }
    }

    pub fn get(&self, id: &MemberId) -> Option<&Member> {
        self.index.get(id).map(|&pos| &self.members[pos])
    }

    pub fn name_of(&self, id: &MemberId) -> Option<&str> {
        self.get(id).map(Member::name)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }
}

impl FromIterator<Member> for MemberDirectory {
    fn from_iter<T: IntoIterator<Item = Member>>(iter: T) -> Self {
        let mut directory = Self::new();
        for member in iter {
            directory.add(member);
        }
        directory
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_id_equality() {
        let a = MemberId::new("member1");
        let b = MemberId::new("member1");
        let c = MemberId::new("member2");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_member_id_display() {
        let id = MemberId::new("member-alice");
        assert_eq!(format!("{}", id), "member-alice");
    }

    #[test]
    fn test_directory_lookup() {
        let directory: MemberDirectory = [
            Member::new(MemberId::new("m1"), "Alice"),
            Member::new(MemberId::new("m2"), "Bob"),
        ]
        .into_iter()
        .collect();

        assert_eq!(directory.len(), 2);
        assert_eq!(directory.name_of(&MemberId::new("m1")), Some("Alice"));
        assert_eq!(directory.name_of(&MemberId::new("m3")), None);
    }

    #[test]
    fn test_directory_readd_replaces() {
        let mut directory = MemberDirectory::new();
        directory.add(Member::new(MemberId::new("m1"), "Alice"));
        directory.add(Member::new(MemberId::new("m1"), "Alicia"));

        assert_eq!(directory.len(), 1);
        assert_eq!(directory.name_of(&MemberId::new("m1")), Some("Alicia"));
    }
}
