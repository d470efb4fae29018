//! Animation layer: definitions and the per-slot scheduler.

pub mod definition;
pub mod scheduler;

pub use definition::{AnimKind, AnimationDef};
pub use scheduler::{AnimationScheduler, AnimationState, SchedulerEvent};
