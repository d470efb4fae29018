//! Status protocol: wire message types and registry ingest rules.

pub mod ingest;
pub mod messages;

pub use ingest::{apply_status, DropReason, IngestOutcome};
pub use messages::{ActionKind, OutboundMessage, STATUS_MESSAGE_TYPE};
