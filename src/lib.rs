//! # companion-link
//!
//! Protocol and presentation-state core for a handheld companion status
//! client. Maintains the connection to the companion server, decodes the
//! wire framing layer, ingests JSON status updates for a small bounded
//! set of remote agents, and drives a per-agent animation state machine.
//! Rendering, input, audio, and settings storage are external
//! collaborators that read what this core produces.
//!
//! ## Architecture
//!
//! ```text
//! socket bytes
//!     │
//!     ├── Connection (net/) ── upgrade handshake, non-blocking poll
//!     ├── Frame codec (net/) ── payload boundaries
//!     │
//!     ├── Status ingest (protocol/)
//!     ├── AgentRegistry (domain/)
//!     │
//!     └── AnimationScheduler (anim/) → external renderer, audio cue
//! ```
//!
//! Everything is single-threaded and tick-driven (nominally 60 Hz):
//! [`context::ClientContext::step`] runs poll → ingest → animate once per
//! tick, and the only blocking operation is the connect attempt fired by
//! the reconnect countdown.

pub mod anim;
pub mod config;
pub mod context;
pub mod domain;
pub mod error;
pub mod net;
pub mod protocol;
