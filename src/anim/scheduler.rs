//! Per-slot animation state machine.
//!
//! The scheduler reads the registry (never writes it) and advances one
//! animation clock per occupied slot each tick. State-driven switching is
//! suppressed while a slot's one-shot spawn animation runs; transitions
//! into the waiting state surface a prompt cue for the external audio
//! collaborator, once per edge.

use crate::domain::{AgentRegistry, AgentState};

use super::definition::AnimKind;

/// Live animation clock for one slot.
#[derive(Debug, Clone, Copy)]
pub struct AnimationState {
    kind: AnimKind,
    frame_index: u32,
    tick_counter: u32,
    finished: bool,
}

impl AnimationState {
    /// Starts `kind` from its first frame.
    #[must_use]
    pub fn new(kind: AnimKind) -> Self {
        Self {
            kind,
            frame_index: 0,
            tick_counter: 0,
            finished: false,
        }
    }

    /// Switches to `kind`, resetting frame index and tick counter.
    pub fn set(&mut self, kind: AnimKind) {
        *self = Self::new(kind);
    }

    /// Returns the running animation kind.
    #[must_use]
    pub fn kind(&self) -> AnimKind {
        self.kind
    }

    /// Returns the frame to render.
    #[must_use]
    pub fn frame_index(&self) -> u32 {
        self.frame_index
    }

    /// True once a one-shot animation has reached and held its last frame.
    #[must_use]
    pub fn finished(&self) -> bool {
        self.finished
    }

    /// Advances the clock by one tick.
    ///
    /// Every `ticks_per_frame` ticks the frame index advances; looping
    /// animations wrap modulo the frame count, one-shot animations set
    /// `finished` on the last frame and hold there.
    pub fn tick(&mut self) {
        if self.finished {
            return;
        }
        let def = self.kind.def();
        self.tick_counter += 1;
        if self.tick_counter >= def.ticks_per_frame {
            self.tick_counter = 0;
            self.frame_index += 1;
            if self.frame_index >= def.frame_count {
                if def.one_shot {
                    self.frame_index = def.frame_count - 1;
                    self.finished = true;
                } else {
                    self.frame_index = 0;
                }
            }
        }
    }
}

/// Events surfaced by one scheduler tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerEvent {
    /// An agent just entered the waiting state; play the attention cue.
    PromptCue {
        /// Slot of the agent that needs attention.
        slot: usize,
    },
    /// A slot's spawn animation completed this tick.
    SpawnComplete {
        /// Slot whose arrival finished.
        slot: usize,
    },
}

#[derive(Debug)]
struct SlotAnim {
    anim: AnimationState,
    /// Last state observed by the switching rule; `None` until the first
    /// non-spawning observation, so a freshly created slot counts as a
    /// transition.
    last_state: Option<AgentState>,
}

/// Maps agent state transitions to animation switches, one slot each.
#[derive(Debug, Default)]
pub struct AnimationScheduler {
    slots: Vec<SlotAnim>,
}

impl AnimationScheduler {
    /// Creates a scheduler with no slots.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the animation clock for `slot`, if it exists.
    #[must_use]
    pub fn animation(&self, slot: usize) -> Option<&AnimationState> {
        self.slots.get(slot).map(|s| &s.anim)
    }

    /// Starts the one-shot spawn animation on `slot`.
    ///
    /// Called when a slot is reserved locally; until the animation
    /// finishes, state-driven switching leaves it alone.
    pub fn begin_spawn(&mut self, slot: usize) {
        self.ensure_slot(slot, AnimKind::Spawn);
        if let Some(entry) = self.slots.get_mut(slot) {
            entry.anim.set(AnimKind::Spawn);
            entry.last_state = None;
        }
    }

    /// Advances every occupied slot by one tick.
    ///
    /// Must run after the tick's status updates have been applied, so
    /// presentation never lags the registry by more than one tick.
    pub fn advance(&mut self, registry: &AgentRegistry) -> Vec<SchedulerEvent> {
        let mut events = Vec::new();

        for record in registry.iter() {
            let kind = if record.spawning {
                AnimKind::Spawn
            } else {
                AnimKind::for_state(record.state)
            };
            self.ensure_slot(record.slot, kind);
        }

        for (slot, entry) in self.slots.iter_mut().enumerate() {
            let Some(record) = registry.get(slot) else {
                continue;
            };

            // Spawn hold: the one-shot owns the slot until it finishes.
            if record.spawning && !entry.anim.finished() {
                entry.anim.tick();
                if entry.anim.finished() {
                    events.push(SchedulerEvent::SpawnComplete { slot });
                }
                continue;
            }

            let state = record.state;
            if entry.last_state != Some(state) {
                if state == AgentState::Waiting {
                    events.push(SchedulerEvent::PromptCue { slot });
                }
                let kind = AnimKind::for_state(state);
                if kind != entry.anim.kind() {
                    entry.anim.set(kind);
                }
                entry.last_state = Some(state);
            }

            entry.anim.tick();
        }

        events
    }

    fn ensure_slot(&mut self, slot: usize, kind: AnimKind) {
        while self.slots.len() <= slot {
            self.slots.push(SlotAnim {
                anim: AnimationState::new(kind),
                last_state: None,
            });
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::AgentRegistry;

    fn registry_with(name: &str, state: AgentState) -> AgentRegistry {
        let mut registry = AgentRegistry::new();
        let Ok(slot) = registry.upsert(name) else {
            panic!("expected a free slot");
        };
        set_state(&mut registry, slot, state);
        registry
    }

    fn set_state(registry: &mut AgentRegistry, slot: usize, state: AgentState) {
        let Some(record) = registry.get_mut(slot) else {
            panic!("slot occupied");
        };
        record.state = state;
        record.active = true;
    }

    fn cue_count(events: &[SchedulerEvent]) -> usize {
        events
            .iter()
            .filter(|e| matches!(e, SchedulerEvent::PromptCue { .. }))
            .count()
    }

    #[test]
    fn looping_animation_wraps_modulo_frame_count() {
        let mut anim = AnimationState::new(AnimKind::Idle);
        let def = AnimKind::Idle.def();
        for k in 1..=5_u32 {
            for _ in 0..def.ticks_per_frame {
                anim.tick();
            }
            assert_eq!(anim.frame_index(), k % def.frame_count);
        }
        assert!(!anim.finished());
    }

    #[test]
    fn one_shot_finishes_and_holds_last_frame() {
        let mut anim = AnimationState::new(AnimKind::Spawn);
        let def = AnimKind::Spawn.def();
        for _ in 0..def.frame_count * def.ticks_per_frame {
            anim.tick();
        }
        assert!(anim.finished());
        assert_eq!(anim.frame_index(), def.frame_count - 1);

        for _ in 0..30 {
            anim.tick();
        }
        assert_eq!(anim.frame_index(), def.frame_count - 1);
    }

    #[test]
    fn state_change_switches_and_resets() {
        let mut registry = registry_with("claude", AgentState::Working);
        let mut scheduler = AnimationScheduler::new();

        for _ in 0..7 {
            let _ = scheduler.advance(&registry);
        }
        let Some(anim) = scheduler.animation(0) else {
            panic!("slot animated");
        };
        assert_eq!(anim.kind(), AnimKind::Working);

        set_state(&mut registry, 0, AgentState::Waiting);
        let _ = scheduler.advance(&registry);
        let Some(anim) = scheduler.animation(0) else {
            panic!("slot animated");
        };
        assert_eq!(anim.kind(), AnimKind::Waiting);
        assert_eq!(anim.frame_index(), 0);
    }

    #[test]
    fn error_and_done_run_the_idle_animation() {
        let mut registry = registry_with("claude", AgentState::Error);
        let mut scheduler = AnimationScheduler::new();
        let _ = scheduler.advance(&registry);
        let Some(anim) = scheduler.animation(0) else {
            panic!("slot animated");
        };
        assert_eq!(anim.kind(), AnimKind::Idle);

        set_state(&mut registry, 0, AgentState::Done);
        let _ = scheduler.advance(&registry);
        let Some(anim) = scheduler.animation(0) else {
            panic!("slot animated");
        };
        assert_eq!(anim.kind(), AnimKind::Idle);
    }

    #[test]
    fn cue_fires_once_per_waiting_edge() {
        let mut registry = registry_with("claude", AgentState::Idle);
        let mut scheduler = AnimationScheduler::new();
        let mut cues = 0;

        for state in [
            AgentState::Idle,
            AgentState::Working,
            AgentState::Waiting,
            AgentState::Waiting,
            AgentState::Idle,
            AgentState::Waiting,
        ] {
            set_state(&mut registry, 0, state);
            cues += cue_count(&scheduler.advance(&registry));
        }
        assert_eq!(cues, 2);
    }

    #[test]
    fn first_observation_in_waiting_fires_cue() {
        let registry = registry_with("claude", AgentState::Waiting);
        let mut scheduler = AnimationScheduler::new();
        let events = scheduler.advance(&registry);
        assert_eq!(cue_count(&events), 1);
    }

    #[test]
    fn spawn_holds_through_state_updates_then_completes() {
        let mut registry = registry_with("claude", AgentState::Idle);
        let Some(record) = registry.get_mut(0) else {
            panic!("slot occupied");
        };
        record.spawning = true;

        let mut scheduler = AnimationScheduler::new();
        scheduler.begin_spawn(0);

        let def = AnimKind::Spawn.def();
        let total = def.frame_count * def.ticks_per_frame;
        let mut completed = 0;

        for tick in 0..total {
            // A state update mid-spawn must not steal the slot.
            if tick == 10 {
                set_state(&mut registry, 0, AgentState::Working);
            }
            let events = scheduler.advance(&registry);
            completed += events
                .iter()
                .filter(|e| matches!(e, SchedulerEvent::SpawnComplete { .. }))
                .count();
            let Some(anim) = scheduler.animation(0) else {
                panic!("slot animated");
            };
            assert_eq!(anim.kind(), AnimKind::Spawn);
        }
        assert_eq!(completed, 1);

        // Flag cleared by the owner once completion is reported.
        let Some(record) = registry.get_mut(0) else {
            panic!("slot occupied");
        };
        record.spawning = false;

        let _ = scheduler.advance(&registry);
        let Some(anim) = scheduler.animation(0) else {
            panic!("slot animated");
        };
        assert_eq!(anim.kind(), AnimKind::Working);
    }

    #[test]
    fn slots_animate_independently() {
        let mut registry = registry_with("a", AgentState::Working);
        let Ok(slot_b) = registry.upsert("b") else {
            panic!("expected a free slot");
        };
        set_state(&mut registry, slot_b, AgentState::Waiting);

        let mut scheduler = AnimationScheduler::new();
        let _ = scheduler.advance(&registry);

        let Some(a) = scheduler.animation(0) else {
            panic!("slot animated");
        };
        let Some(b) = scheduler.animation(1) else {
            panic!("slot animated");
        };
        assert_eq!(a.kind(), AnimKind::Working);
        assert_eq!(b.kind(), AnimKind::Waiting);
    }
}
