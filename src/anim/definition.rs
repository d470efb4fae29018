//! Animation definitions: one per scheduler state.
//!
//! Definitions carry frame-table metadata only; the pixel data lives with
//! the external renderer, which maps (definition, frame index) to art.

use crate::domain::AgentState;

/// Static description of one animation.
#[derive(Debug, PartialEq, Eq)]
pub struct AnimationDef {
    /// Number of frames in the cycle.
    pub frame_count: u32,
    /// Ticks to hold each frame (tick rate is nominally 60 Hz).
    pub ticks_per_frame: u32,
    /// One-shot animations play once and hold the last frame.
    pub one_shot: bool,
}

/// Gentle bob at ~3 Hz.
pub const IDLE: AnimationDef = AnimationDef {
    frame_count: 2,
    ticks_per_frame: 20,
    one_shot: false,
};

/// Faster pulse at ~6 Hz.
pub const WORKING: AnimationDef = AnimationDef {
    frame_count: 2,
    ticks_per_frame: 10,
    one_shot: false,
};

/// Urgent flash at ~7.5 Hz.
pub const WAITING: AnimationDef = AnimationDef {
    frame_count: 2,
    ticks_per_frame: 8,
    one_shot: false,
};

/// Arrival sequence, one-shot over ~1.5 s (6 keyframes, 15 ticks each).
pub const SPAWN: AnimationDef = AnimationDef {
    frame_count: 6,
    ticks_per_frame: 15,
    one_shot: true,
};

/// Which animation a slot is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimKind {
    /// One-shot arrival animation.
    Spawn,
    /// Idle bob.
    Idle,
    /// Working pulse.
    Working,
    /// Waiting flash.
    Waiting,
}

impl AnimKind {
    /// Returns the definition backing this kind.
    #[must_use]
    pub const fn def(self) -> &'static AnimationDef {
        match self {
            Self::Spawn => &SPAWN,
            Self::Idle => &IDLE,
            Self::Working => &WORKING,
            Self::Waiting => &WAITING,
        }
    }

    /// Maps an agent state to its animation.
    ///
    /// Error and done have no dedicated animation and fall back to idle.
    #[must_use]
    pub const fn for_state(state: AgentState) -> Self {
        match state {
            AgentState::Working => Self::Working,
            AgentState::Waiting => Self::Waiting,
            AgentState::Idle | AgentState::Error | AgentState::Done => Self::Idle,
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn state_mapping_covers_all_states() {
        assert_eq!(AnimKind::for_state(AgentState::Idle), AnimKind::Idle);
        assert_eq!(AnimKind::for_state(AgentState::Working), AnimKind::Working);
        assert_eq!(AnimKind::for_state(AgentState::Waiting), AnimKind::Waiting);
        assert_eq!(AnimKind::for_state(AgentState::Error), AnimKind::Idle);
        assert_eq!(AnimKind::for_state(AgentState::Done), AnimKind::Idle);
    }

    #[test]
    fn only_spawn_is_one_shot() {
        assert!(AnimKind::Spawn.def().one_shot);
        assert!(!AnimKind::Idle.def().one_shot);
        assert!(!AnimKind::Working.def().one_shot);
        assert!(!AnimKind::Waiting.def().one_shot);
    }

    #[test]
    fn spawn_runs_about_ninety_ticks() {
        let def = AnimKind::Spawn.def();
        assert_eq!(def.frame_count * def.ticks_per_frame, 90);
    }
}
