//! Member registry
//!
//! Keeps the distinct members seen during a session, in first-seen order.
//! The registry is append-only apart from renames.

use crate::models::Member;

/// Deduplicated collection of household members
#[derive(Debug, Clone, Default)]
pub struct MemberRegistry {
    members: Vec<Member>,
}

impl MemberRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a member unless an equal one (same name) is already present.
    ///
    /// Returns true if the member was appended.
    pub fn add(&mut self, member: Member) -> bool {
        if self.members.contains(&member) {
            return false;
        }
        self.members.push(member);
        true
    }

    /// Find the first member whose name matches, ignoring case
    pub fn find(&self, name: &str) -> Option<&Member> {
        self.members.iter().find(|m| m.matches_name(name))
    }

    /// Find a member by exact name, falling back to a case-insensitive match.
    ///
    /// Names that differ only in case are distinct members; an exact match
    /// always wins over an earlier case-insensitive one.
    pub fn resolve(&self, name: &str) -> Option<&Member> {
        self.members
            .iter()
            .find(|m| m.name() == name)
            .or_else(|| self.find(name))
    }

    /// Find a member by name, or register a new one
    pub fn get_or_create(&mut self, name: &str) -> Member {
        if let Some(existing) = self.resolve(name) {
            return existing.clone();
        }
        let member = Member::new(name);
        self.members.push(member.clone());
        member
    }

    /// Rename the member `old_name` resolves to (see `resolve`).
    ///
    /// Returns false if no member matches or if `new_name` already belongs
    /// to a different member.
    pub fn rename(&mut self, old_name: &str, new_name: &str) -> bool {
        match self.resolve(old_name).cloned() {
            Some(old) => self.rename_exact(&old, new_name),
            None => false,
        }
    }

    /// Rename exactly `old`, leaving members that differ only in case alone.
    ///
    /// Returns false if `old` is not registered or `new_name` is taken by
    /// another member.
    pub fn rename_exact(&mut self, old: &Member, new_name: &str) -> bool {
        let target = Member::new(new_name);
        if target != *old && self.members.contains(&target) {
            return false;
        }
        match self.members.iter_mut().find(|m| **m == *old) {
            Some(member) => {
                member.rename(new_name);
                true
            }
            None => false,
        }
    }

    /// All members in insertion order
    pub fn members(&self) -> &[Member] {
        &self.members
    }

    pub fn iter(&self) -> impl Iterator<Item = &Member> {
        self.members.iter()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}
