//! Bounded, insertion-ordered store of agent records.
//!
//! [`AgentRegistry`] is the single source of truth for presentation state.
//! Slots are assigned in insertion order and never recycled or reordered,
//! even when a session later goes inactive; external callers cycling
//! selection are expected to skip records whose `active` flag is false.

use crate::error::ClientError;

use super::agent_name::AgentName;
use super::agent_record::AgentRecord;

/// Maximum number of agent slots.
pub const MAX_AGENTS: usize = 4;

/// Ordered collection of at most [`MAX_AGENTS`] agent records.
///
/// Lookup (read-only, first case-insensitive match wins) and upsert
/// (lookup-or-append) are distinct operations; only the status ingest path
/// and the local spawn flow create records.
#[derive(Debug, Default)]
pub struct AgentRegistry {
    records: Vec<AgentRecord>,
}

impl AgentRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            records: Vec::with_capacity(MAX_AGENTS),
        }
    }

    /// Returns the number of occupied slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if no slot is occupied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the record at `slot`, if occupied.
    #[must_use]
    pub fn get(&self, slot: usize) -> Option<&AgentRecord> {
        self.records.get(slot)
    }

    /// Returns a mutable record at `slot`, if occupied.
    pub fn get_mut(&mut self, slot: usize) -> Option<&mut AgentRecord> {
        self.records.get_mut(slot)
    }

    /// Iterates records in slot order.
    pub fn iter(&self) -> impl Iterator<Item = &AgentRecord> {
        self.records.iter()
    }

    /// Finds the slot holding `name`, case-insensitively.
    ///
    /// First match wins; the ingest rules guarantee at most one record per
    /// name, so later duplicates cannot exist.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<usize> {
        self.records.iter().position(|r| r.name.matches(name))
    }

    /// Returns the slot for `name`, creating a record if absent.
    ///
    /// Creation appends at the next free slot with default fields.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::RegistryFull`] when `name` is unknown and
    /// all [`MAX_AGENTS`] slots are occupied.
    pub fn upsert(&mut self, name: &str) -> Result<usize, ClientError> {
        if let Some(slot) = self.lookup(name) {
            return Ok(slot);
        }
        if self.records.len() >= MAX_AGENTS {
            return Err(ClientError::RegistryFull);
        }
        let slot = self.records.len();
        self.records.push(AgentRecord::new(AgentName::new(name), slot));
        Ok(slot)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::agent_record::AgentState;

    #[test]
    fn upsert_creates_then_finds() {
        let mut registry = AgentRegistry::new();
        let Ok(slot) = registry.upsert("claude") else {
            panic!("expected a free slot");
        };
        assert_eq!(slot, 0);
        assert_eq!(registry.len(), 1);

        let Ok(again) = registry.upsert("claude") else {
            panic!("expected existing slot");
        };
        assert_eq!(again, 0);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn upsert_matches_case_insensitively() {
        let mut registry = AgentRegistry::new();
        let _ = registry.upsert("CLAUDE");
        let Ok(slot) = registry.upsert("claude") else {
            panic!("expected existing slot");
        };
        assert_eq!(slot, 0);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn capacity_bounds_distinct_names() {
        let mut registry = AgentRegistry::new();
        for name in ["a", "b", "c", "d"] {
            assert!(registry.upsert(name).is_ok());
        }
        assert_eq!(registry.len(), MAX_AGENTS);

        let fifth = registry.upsert("e");
        assert!(matches!(fifth, Err(ClientError::RegistryFull)));
        assert_eq!(registry.len(), MAX_AGENTS);
    }

    #[test]
    fn slots_follow_insertion_order() {
        let mut registry = AgentRegistry::new();
        let _ = registry.upsert("first");
        let _ = registry.upsert("second");

        let Some(first) = registry.get(0) else {
            panic!("slot 0 occupied");
        };
        let Some(second) = registry.get(1) else {
            panic!("slot 1 occupied");
        };
        assert_eq!(first.name.as_str(), "first");
        assert_eq!(second.name.as_str(), "second");
        assert_eq!(first.slot, 0);
        assert_eq!(second.slot, 1);
    }

    #[test]
    fn lookup_does_not_create() {
        let registry = AgentRegistry::new();
        assert_eq!(registry.lookup("claude"), None);
        assert!(registry.is_empty());
    }

    #[test]
    fn get_mut_allows_in_place_update() {
        let mut registry = AgentRegistry::new();
        let Ok(slot) = registry.upsert("claude") else {
            panic!("expected a free slot");
        };
        let Some(record) = registry.get_mut(slot) else {
            panic!("slot occupied");
        };
        record.state = AgentState::Working;
        record.active = true;

        let Some(record) = registry.get(slot) else {
            panic!("slot occupied");
        };
        assert_eq!(record.state, AgentState::Working);
        assert!(record.active);
    }
}
