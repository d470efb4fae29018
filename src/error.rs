//! Client error types with recovery policy mapping.
//!
//! [`ClientError`] is the central error type for the client core. Nothing
//! in this taxonomy is fatal to the process: every failure degrades to
//! either "stay disconnected until the reconnect countdown fires" or
//! "drop this update", as reported by [`ClientError::recovery`].

use std::io;

/// How the tick loop recovers from an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recovery {
    /// Stay disconnected; the fixed-interval reconnect countdown retries
    /// indefinitely.
    Reconnect,
    /// Drop the offending update or request and carry on.
    Drop,
}

/// Client-side error enum.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The configured host did not resolve.
    #[error("failed to resolve host: {host}")]
    Resolution {
        /// Host string that failed to resolve.
        host: String,
    },

    /// Socket creation or TCP connect failed.
    #[error("connect failed: {0}")]
    Connect(#[source] io::Error),

    /// The server answered the upgrade request with a non-101 status.
    #[error("handshake rejected by server")]
    HandshakeRejected,

    /// Zero-byte read or hard socket error; the socket has been released.
    #[error("connection lost: {0}")]
    ConnectionLost(String),

    /// Outbound payload exceeds the fixed frame capacity.
    #[error("frame payload too large ({len} bytes)")]
    PayloadTooLarge {
        /// Payload length in bytes.
        len: usize,
    },

    /// Outbound message failed to serialize.
    #[error("message encoding failed: {0}")]
    Encode(#[from] serde_json::Error),

    /// A new agent name arrived while every registry slot is occupied.
    #[error("agent registry full")]
    RegistryFull,

    /// A send was attempted before the handshake completed.
    #[error("not connected")]
    NotConnected,
}

impl ClientError {
    /// Returns the recovery policy for this variant.
    #[must_use]
    pub const fn recovery(&self) -> Recovery {
        match self {
            Self::Resolution { .. }
            | Self::Connect(_)
            | Self::HandshakeRejected
            | Self::ConnectionLost(_) => Recovery::Reconnect,
            Self::PayloadTooLarge { .. }
            | Self::Encode(_)
            | Self::RegistryFull
            | Self::NotConnected => Recovery::Drop,
        }
    }
}
