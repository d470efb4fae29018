//! Status protocol message types: inbound tag and outbound commands.

use serde::Serialize;

/// `type` tag of the one inbound message this client processes.
pub const STATUS_MESSAGE_TYPE: &str = "agent_status";

/// Reply to a pending permission prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    /// Approve once.
    Yes,
    /// Deny.
    No,
    /// Approve and remember.
    Always,
    /// Dismiss the prompt without answering.
    Escape,
}

/// Messages sent to the companion server, one masked text frame each.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OutboundMessage {
    /// Permission prompt reply for one agent.
    Action {
        /// Target agent name.
        agent: String,
        /// The reply.
        action: ActionKind,
    },
    /// Free-form command for one agent (e.g. `"spawn"`).
    Command {
        /// Target agent name.
        agent: String,
        /// Command verb.
        command: String,
    },
    /// Client-side configuration pushed to the server.
    Config {
        /// Whether edits should be auto-approved.
        #[serde(rename = "autoEdit")]
        auto_edit: bool,
    },
}
