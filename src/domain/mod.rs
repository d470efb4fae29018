//! Domain layer: agent identity, records, and the bounded registry.
//!
//! This module contains the client-side domain model: bounded string
//! storage, the case-insensitive agent name key, per-agent records, and
//! the slot-stable registry that rendering and animation read from.

pub mod agent_name;
pub mod agent_record;
pub mod agent_registry;
pub mod bounded;

pub use agent_name::AgentName;
pub use agent_record::{AgentRecord, AgentState, Progress};
pub use agent_registry::{AgentRegistry, MAX_AGENTS};
pub use bounded::BoundedStr;
