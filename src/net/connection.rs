//! Connection lifecycle: resolve, connect, upgrade handshake, tick polling.
//!
//! [`Connection`] exclusively owns the socket and the receive buffer. The
//! per-tick [`Connection::poll`] never blocks; the single blocking point
//! is [`Connection::connect`] (resolution plus TCP connect). Callers must
//! not attempt a connect before the first frame has been drawn, or a slow
//! or absent network freezes the display.

use std::io;

use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;

use crate::error::ClientError;

use super::frame::{self, Decoded, Opcode};
use super::recv_buffer::RecvBuffer;

/// Fixed upgrade handshake key.
///
/// Deliberately not randomized per connection; the companion server does
/// not verify it and the fixed value keeps the handshake reproducible.
pub const HANDSHAKE_KEY: &str = "dGhlIHNhbXBsZSBub25jZQ==";

/// End of the HTTP response header block.
const HEADER_TERMINATOR: &[u8] = b"\r\n\r\n";

/// Connection lifecycle state (process-wide, single instance).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConnectionState {
    /// No socket held.
    #[default]
    Disconnected,
    /// Upgrade request sent, awaiting the HTTP response.
    Connecting,
    /// Handshake confirmed; frames flow.
    Open,
}

/// Owns the socket, the receive buffer, and the handshake state machine.
#[derive(Debug, Default)]
pub struct Connection {
    stream: Option<TcpStream>,
    recv: RecvBuffer,
    state: ConnectionState,
}

impl Connection {
    /// Creates a disconnected connection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current lifecycle state.
    #[must_use]
    pub fn state(&self) -> ConnectionState {
        self.state
    }

    /// Returns `true` once the handshake has been confirmed.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.state == ConnectionState::Open
    }

    /// Resolves `host`, connects, and sends the upgrade request.
    ///
    /// Resolution and connect are the documented blocking phases; run this
    /// from the tick loop's reconnect countdown only. On success the state
    /// is [`ConnectionState::Connecting`] until [`Connection::poll`] sees
    /// the handshake response.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Resolution`] when the host does not resolve
    /// and [`ClientError::Connect`] on socket or connect failure; either
    /// way the state is left [`ConnectionState::Disconnected`].
    pub async fn connect(&mut self, host: &str, port: u16) -> Result<(), ClientError> {
        self.disconnect();

        let mut addrs =
            tokio::net::lookup_host((host, port))
                .await
                .map_err(|_| ClientError::Resolution {
                    host: host.to_string(),
                })?;
        let Some(addr) = addrs.next() else {
            return Err(ClientError::Resolution {
                host: host.to_string(),
            });
        };

        let mut stream = TcpStream::connect(addr).await.map_err(ClientError::Connect)?;

        let request = format!(
            "GET / HTTP/1.1\r\n\
             Host: {host}:{port}\r\n\
             Upgrade: websocket\r\n\
             Connection: Upgrade\r\n\
             Sec-WebSocket-Key: {HANDSHAKE_KEY}\r\n\
             Sec-WebSocket-Version: 13\r\n\
             \r\n"
        );
        stream
            .write_all(request.as_bytes())
            .await
            .map_err(ClientError::Connect)?;

        tracing::info!(%host, port, "upgrade request sent");
        self.stream = Some(stream);
        self.state = ConnectionState::Connecting;
        Ok(())
    }

    /// Closes the socket and resets handshake state. Idempotent.
    ///
    /// The registry's last known values are deliberately left intact;
    /// disconnect only tears down the transport.
    pub fn disconnect(&mut self) {
        if self.stream.take().is_some() {
            tracing::debug!("socket released");
        }
        self.recv.clear();
        self.state = ConnectionState::Disconnected;
    }

    /// Non-blocking per-tick poll.
    ///
    /// Reads whatever bytes are available, completes the handshake once
    /// the response terminator arrives, then drains every complete frame,
    /// returning the text payloads in arrival order. A zero-byte read or
    /// a hard socket error transitions to disconnected.
    pub fn poll(&mut self) -> Vec<String> {
        let mut payloads = Vec::new();
        if self.stream.is_none() {
            return payloads;
        }

        if let Err(err) = self.fill_from_socket() {
            tracing::info!(error = %err, "connection lost");
            self.disconnect();
            return payloads;
        }

        self.process(&mut payloads);
        payloads
    }

    /// Sends one masked text frame.
    ///
    /// The write is awaited; frames are bounded by the send capacity, so
    /// this completes immediately on a healthy socket.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::NotConnected`] before the handshake is
    /// confirmed, [`ClientError::PayloadTooLarge`] for payloads over the
    /// frame capacity, and [`ClientError::ConnectionLost`] (after
    /// disconnecting) when the write fails.
    pub async fn send_text(&mut self, payload: &str) -> Result<(), ClientError> {
        if self.state != ConnectionState::Open {
            return Err(ClientError::NotConnected);
        }
        let frame = frame::encode_text(payload)?;
        let Some(stream) = self.stream.as_mut() else {
            return Err(ClientError::NotConnected);
        };
        if let Err(err) = stream.write_all(&frame).await {
            self.disconnect();
            return Err(ClientError::ConnectionLost(err.to_string()));
        }
        Ok(())
    }

    /// Pulls available bytes into the receive buffer without blocking.
    fn fill_from_socket(&mut self) -> Result<(), ClientError> {
        let Some(stream) = self.stream.as_ref() else {
            return Ok(());
        };
        let spare = self.recv.spare();
        if spare.is_empty() {
            return Ok(());
        }
        match stream.try_read(spare) {
            Ok(0) => Err(ClientError::ConnectionLost("peer closed".to_string())),
            Ok(n) => {
                self.recv.advance(n);
                Ok(())
            }
            Err(err)
                if err.kind() == io::ErrorKind::WouldBlock
                    || err.kind() == io::ErrorKind::Interrupted =>
            {
                Ok(())
            }
            Err(err) => Err(ClientError::ConnectionLost(err.to_string())),
        }
    }

    /// Advances the handshake and drains frames from the buffer.
    fn process(&mut self, payloads: &mut Vec<String>) {
        if self.state == ConnectionState::Connecting && !self.try_complete_handshake() {
            return;
        }
        if self.state != ConnectionState::Open {
            return;
        }
        self.drain_frames(payloads);
    }

    /// Looks for the HTTP response terminator; once it has arrived,
    /// transitions to open on a 101 status line or disconnects otherwise.
    /// Returns `true` when the connection is open.
    fn try_complete_handshake(&mut self) -> bool {
        let filled = self.recv.filled();
        let Some(pos) = find(filled, HEADER_TERMINATOR) else {
            // Response still in flight; no side effects.
            return false;
        };
        let header_len = pos + HEADER_TERMINATOR.len();
        let accepted = filled.get(..header_len).is_some_and(status_line_is_101);

        if accepted {
            self.recv.consume(header_len);
            self.state = ConnectionState::Open;
            tracing::info!("handshake confirmed");
            true
        } else {
            tracing::warn!(error = %ClientError::HandshakeRejected, "dropping connection");
            self.disconnect();
            false
        }
    }

    /// Decodes buffered frames until none is complete, collecting text
    /// payloads and skipping every other opcode.
    fn drain_frames(&mut self, payloads: &mut Vec<String>) {
        loop {
            let (text, consumed) = match frame::decode(self.recv.filled()) {
                Decoded::Incomplete => break,
                Decoded::Frame {
                    opcode,
                    payload,
                    consumed,
                } => {
                    let text = (opcode == Opcode::Text)
                        .then(|| String::from_utf8_lossy(payload).into_owned());
                    (text, consumed)
                }
            };
            if let Some(text) = text {
                payloads.push(text);
            }
            self.recv.consume(consumed);
        }
    }
}

/// Finds the first occurrence of `needle` in `haystack`.
fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

/// True when the first header line carries status code 101.
///
/// Only the status line is inspected; header values that happen to
/// contain "101" must not count as acceptance.
fn status_line_is_101(header: &[u8]) -> bool {
    let line_end = find(header, b"\r\n").unwrap_or(header.len());
    header
        .get(..line_end)
        .map(String::from_utf8_lossy)
        .is_some_and(|line| line.contains(" 101"))
}
