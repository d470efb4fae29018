//! Applies decoded status payloads to the agent registry.
//!
//! One payload, one JSON object. Anything that is not a well-formed
//! status message is dropped without surfacing an error: the client must
//! keep running whatever the server sends, and a stale registry beats a
//! dead session. Drops are still reported in the returned outcome so the
//! tick loop can log them.

use serde_json::Value;

use crate::domain::agent_record::{AgentState, Progress};
use crate::domain::AgentRegistry;

use super::messages::STATUS_MESSAGE_TYPE;

/// Why an inbound payload produced no registry change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    /// Payload was not valid JSON or not an object.
    Malformed,
    /// The `type` tag named a message this client does not process.
    UnknownType,
    /// Required `agent` field missing or not a string.
    MissingAgent,
    /// Unknown agent name while every slot is occupied.
    RegistryFull,
}

/// Outcome of applying one payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestOutcome {
    /// Update applied to the record at `slot`.
    Applied {
        /// Slot of the matched or created record.
        slot: usize,
    },
    /// Payload dropped with no observable effect.
    Dropped(DropReason),
}

/// Parses `payload` as a status message and applies it to `registry`.
///
/// Field semantics, for the matched-or-created record:
///
/// - `state`: mapped via [`AgentState::from_wire`]; absent or
///   unrecognized values map to idle;
/// - `progress`: stored when integral, untouched otherwise;
/// - `message`: stored truncated when present;
/// - `pendingCommand`: stored when present and non-null, else cleared;
/// - `contextPercent`: stored clamped when numeric, else 0;
/// - `promptToolType`: non-empty value stored (making the prompt
///   visible), otherwise cleared;
/// - `promptToolDetail`, `promptDescription`: stored when present, else
///   cleared.
///
/// Applying any update marks the record active.
pub fn apply_status(payload: &str, registry: &mut AgentRegistry) -> IngestOutcome {
    let Ok(root) = serde_json::from_str::<Value>(payload) else {
        return IngestOutcome::Dropped(DropReason::Malformed);
    };
    if root.get("type").and_then(Value::as_str) != Some(STATUS_MESSAGE_TYPE) {
        return IngestOutcome::Dropped(DropReason::UnknownType);
    }
    let Some(agent) = root.get("agent").and_then(Value::as_str) else {
        return IngestOutcome::Dropped(DropReason::MissingAgent);
    };
    let Ok(slot) = registry.upsert(agent) else {
        return IngestOutcome::Dropped(DropReason::RegistryFull);
    };
    let Some(record) = registry.get_mut(slot) else {
        return IngestOutcome::Dropped(DropReason::RegistryFull);
    };

    record.state =
        AgentState::from_wire(root.get("state").and_then(Value::as_str).unwrap_or_default());

    if let Some(progress) = root.get("progress").and_then(Value::as_i64) {
        record.progress = Progress::from_wire(progress);
    }
    if let Some(message) = root.get("message").and_then(Value::as_str) {
        record.message.set(message);
    }
    match root.get("pendingCommand").and_then(Value::as_str) {
        Some(pending) => record.pending_command.set(pending),
        None => record.pending_command.clear(),
    }

    record.context_percent = root
        .get("contextPercent")
        .and_then(Value::as_i64)
        .map_or(0, |v| v.clamp(0, 100) as u8);

    match root
        .get("promptToolType")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
    {
        Some(tool_type) => record.prompt_tool_type.set(tool_type),
        None => record.prompt_tool_type.clear(),
    }
    match root.get("promptToolDetail").and_then(Value::as_str) {
        Some(detail) => record.prompt_tool_detail.set(detail),
        None => record.prompt_tool_detail.clear(),
    }
    match root.get("promptDescription").and_then(Value::as_str) {
        Some(description) => record.prompt_description.set(description),
        None => record.prompt_description.clear(),
    }

    record.active = true;
    IngestOutcome::Applied { slot }
}
