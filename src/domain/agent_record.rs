//! Agent record: lifecycle state plus presentation metadata for one slot.

use super::agent_name::AgentName;
use super::bounded::BoundedStr;

/// Byte capacity of the status message field.
pub const MESSAGE_CAPACITY: usize = 128;
/// Byte capacity of the pending command field.
pub const PENDING_COMMAND_CAPACITY: usize = 256;
/// Byte capacity of the prompt tool type field.
pub const PROMPT_TOOL_TYPE_CAPACITY: usize = 64;
/// Byte capacity of the prompt tool detail field.
pub const PROMPT_TOOL_DETAIL_CAPACITY: usize = 1024;
/// Byte capacity of the prompt description field.
pub const PROMPT_DESCRIPTION_CAPACITY: usize = 256;

/// Lifecycle state of a remote agent session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AgentState {
    /// No active work.
    #[default]
    Idle,
    /// Actively producing output.
    Working,
    /// Blocked on a permission prompt.
    Waiting,
    /// Last operation failed.
    Error,
    /// Finished its task.
    Done,
}

impl AgentState {
    /// Maps a wire state string to the enum.
    ///
    /// Unrecognized values map to [`AgentState::Idle`].
    #[must_use]
    pub fn from_wire(raw: &str) -> Self {
        match raw {
            "working" => Self::Working,
            "waiting" => Self::Waiting,
            "error" => Self::Error,
            "done" => Self::Done,
            _ => Self::Idle,
        }
    }

    /// Human-readable label for logs and the external renderer.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Working => "Working",
            Self::Waiting => "Waiting",
            Self::Error => "Error",
            Self::Done => "Done",
        }
    }
}

/// Task progress reported by the server.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Progress {
    /// No meaningful percentage (wire sentinel: any negative value).
    #[default]
    Indeterminate,
    /// Percentage complete, clamped to 0–100.
    Percent(u8),
}

impl Progress {
    /// Maps a raw wire integer to a progress value.
    ///
    /// Negative values are the indeterminate sentinel; values above 100
    /// clamp to 100.
    #[must_use]
    pub fn from_wire(raw: i64) -> Self {
        if raw < 0 {
            Self::Indeterminate
        } else {
            Self::Percent(raw.min(100) as u8)
        }
    }
}

/// One tracked agent session.
///
/// Created by the first status update naming the agent (or by a local
/// spawn request) and never destroyed; `slot` is the insertion index and
/// stays fixed for the lifetime of the process.
#[derive(Debug, Clone)]
pub struct AgentRecord {
    /// Identity key (case-insensitive match).
    pub name: AgentName,
    /// Lifecycle state driving animation selection.
    pub state: AgentState,
    /// Reported task progress.
    pub progress: Progress,
    /// Last status message.
    pub message: BoundedStr<MESSAGE_CAPACITY>,
    /// Command awaiting approval, empty when none.
    pub pending_command: BoundedStr<PENDING_COMMAND_CAPACITY>,
    /// Context window usage, 0–100.
    pub context_percent: u8,
    /// Tool type of the pending permission prompt, empty when none.
    pub prompt_tool_type: BoundedStr<PROMPT_TOOL_TYPE_CAPACITY>,
    /// Tool detail line of the pending prompt.
    pub prompt_tool_detail: BoundedStr<PROMPT_TOOL_DETAIL_CAPACITY>,
    /// Free-form description of the pending prompt.
    pub prompt_description: BoundedStr<PROMPT_DESCRIPTION_CAPACITY>,
    /// Stable party position, assigned once at creation.
    pub slot: usize,
    /// True while the spawn animation owns this slot's presentation.
    pub spawning: bool,
    /// True once the slot has received a live session update.
    pub active: bool,
}

impl AgentRecord {
    /// Creates a fresh record for `name` at `slot` with default fields.
    #[must_use]
    pub fn new(name: AgentName, slot: usize) -> Self {
        Self {
            name,
            state: AgentState::Idle,
            progress: Progress::Indeterminate,
            message: BoundedStr::new(),
            pending_command: BoundedStr::new(),
            context_percent: 0,
            prompt_tool_type: BoundedStr::new(),
            prompt_tool_detail: BoundedStr::new(),
            prompt_description: BoundedStr::new(),
            slot,
            spawning: false,
            active: false,
        }
    }

    /// True iff a permission prompt should be shown for this agent.
    ///
    /// Derived from the prompt tool type rather than stored, so it can
    /// never drift out of sync with the field that defines it.
    #[must_use]
    pub fn prompt_visible(&self) -> bool {
        !self.prompt_tool_type.is_empty()
    }
}
