//! Wire frame codec for the framed message layer.
//!
//! Outbound: single, unfragmented, masked text frames. Inbound: header +
//! payload boundaries only, surfacing the opcode so the connection layer
//! can skip everything but text.
//!
//! Protocol deviations preserved from the companion deployment (the server
//! tolerates them and its exact framing behavior is the compatibility
//! target, so they are documented rather than fixed):
//!
//! - the mask key is a fixed constant, not randomized per frame;
//! - inbound frames are assumed unmasked (server-originated) and are not
//!   unmasked before parsing;
//! - the 127 length code (64-bit extended length) is read as a literal
//!   length of 127; payloads are bounded well below that on both sides.

use crate::error::ClientError;

/// Capacity of an encoded outbound frame, header included.
pub const SEND_CAPACITY: usize = 1024;

/// Fixed outbound mask key.
pub const MASK_KEY: [u8; 4] = [0x12, 0x34, 0x56, 0x78];

/// FIN flag plus text opcode, the only first byte this client emits.
const FIN_TEXT: u8 = 0x81;
/// Mask flag on the length byte, required on client-originated frames.
const MASK_BIT: u8 = 0x80;
/// Length code selecting the 16-bit extended length field.
const LEN_EXTENDED_16: u8 = 126;

/// Frame opcode, as read from the low nibble of the first header byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opcode {
    /// Continuation of a fragmented message (never reassembled here).
    Continuation,
    /// UTF-8 text payload, the only opcode dispatched to ingest.
    Text,
    /// Binary payload.
    Binary,
    /// Close control frame (no close handshake is performed).
    Close,
    /// Ping control frame (never answered).
    Ping,
    /// Pong control frame.
    Pong,
    /// Reserved or unknown opcode.
    Reserved,
}

impl Opcode {
    /// Decodes the low nibble of a frame's first byte.
    #[must_use]
    pub const fn from_bits(bits: u8) -> Self {
        match bits & 0x0F {
            0x0 => Self::Continuation,
            0x1 => Self::Text,
            0x2 => Self::Binary,
            0x8 => Self::Close,
            0x9 => Self::Ping,
            0xA => Self::Pong,
            _ => Self::Reserved,
        }
    }
}

/// Outcome of one decode pass over the receive buffer.
#[derive(Debug, PartialEq, Eq)]
pub enum Decoded<'a> {
    /// The full frame is not yet buffered; consume nothing and wait.
    Incomplete,
    /// One complete frame.
    Frame {
        /// Frame opcode.
        opcode: Opcode,
        /// Payload bytes, not unmasked.
        payload: &'a [u8],
        /// Total frame length (header + payload) to consume.
        consumed: usize,
    },
}

/// Encodes `payload` as a single masked text frame.
///
/// Layout: `0x81`, mask bit + 7-bit length (or `126` + 16-bit big-endian
/// length when the payload is 126 bytes or longer), 4-byte mask key, then
/// the payload XORed against the repeating key.
///
/// # Errors
///
/// Returns [`ClientError::PayloadTooLarge`] when the encoded frame would
/// exceed [`SEND_CAPACITY`]. Payload size is bounded by the fixed send
/// capacity; an oversized payload is a programming error upstream, not a
/// recoverable wire condition.
pub fn encode_text(payload: &str) -> Result<Vec<u8>, ClientError> {
    let len = payload.len();
    let header_len = if len < usize::from(LEN_EXTENDED_16) {
        2 + MASK_KEY.len()
    } else {
        4 + MASK_KEY.len()
    };
    if header_len + len > SEND_CAPACITY {
        return Err(ClientError::PayloadTooLarge { len });
    }

    let mut frame = Vec::with_capacity(header_len + len);
    frame.push(FIN_TEXT);
    if len < usize::from(LEN_EXTENDED_16) {
        frame.push(MASK_BIT | len as u8);
    } else {
        frame.push(MASK_BIT | LEN_EXTENDED_16);
        frame.extend_from_slice(&(len as u16).to_be_bytes());
    }
    frame.extend_from_slice(&MASK_KEY);
    frame.extend(
        payload
            .bytes()
            .zip(MASK_KEY.iter().cycle())
            .map(|(b, k)| b ^ k),
    );
    Ok(frame)
}

/// Decodes the next frame from `buf`, if fully buffered.
///
/// Requires 2 header bytes (4 when the length code is 126). Yields
/// [`Decoded::Incomplete`] without consuming anything until the whole
/// frame (header + payload) is present. The payload is returned as-is;
/// inbound frames are not unmasked.
#[must_use]
pub fn decode(buf: &[u8]) -> Decoded<'_> {
    let (Some(first), Some(second)) = (buf.first(), buf.get(1)) else {
        return Decoded::Incomplete;
    };
    let opcode = Opcode::from_bits(*first);

    let len_code = second & 0x7F;
    let (payload_len, header_len) = if len_code == LEN_EXTENDED_16 {
        let Some(ext) = buf.get(2..4) else {
            return Decoded::Incomplete;
        };
        let hi = ext.first().copied().unwrap_or_default();
        let lo = ext.get(1).copied().unwrap_or_default();
        (usize::from(u16::from_be_bytes([hi, lo])), 4)
    } else {
        (usize::from(len_code), 2)
    };

    let consumed = header_len + payload_len;
    match buf.get(header_len..consumed) {
        Some(payload) => Decoded::Frame {
            opcode,
            payload,
            consumed,
        },
        None => Decoded::Incomplete,
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn unmask(masked: &[u8]) -> Vec<u8> {
        masked
            .iter()
            .zip(MASK_KEY.iter().cycle())
            .map(|(b, k)| b ^ k)
            .collect()
    }

    #[test]
    fn short_payload_round_trips() {
        let Ok(frame) = encode_text("hello") else {
            panic!("encode failed");
        };
        assert_eq!(frame.first(), Some(&0x81));

        let Decoded::Frame {
            opcode,
            payload,
            consumed,
        } = decode(&frame)
        else {
            panic!("expected a complete frame");
        };
        assert_eq!(opcode, Opcode::Text);
        assert_eq!(consumed, frame.len());
        assert_eq!(unmask(payload), b"hello");
    }

    #[test]
    fn extended_length_round_trips() {
        let long = "x".repeat(300);
        let Ok(frame) = encode_text(&long) else {
            panic!("encode failed");
        };
        // 126 length code plus 16-bit big-endian length.
        assert_eq!(frame.get(1), Some(&(0x80 | 126)));
        assert_eq!(frame.get(2..4), Some([0x01, 0x2C].as_slice()));

        let Decoded::Frame {
            opcode, payload, ..
        } = decode(&frame)
        else {
            panic!("expected a complete frame");
        };
        assert_eq!(opcode, Opcode::Text);
        assert_eq!(unmask(payload), long.as_bytes());
    }

    #[test]
    fn boundary_125_uses_short_length() {
        let payload = "y".repeat(125);
        let Ok(frame) = encode_text(&payload) else {
            panic!("encode failed");
        };
        assert_eq!(frame.get(1), Some(&(0x80 | 125)));
        assert_eq!(frame.len(), 2 + 4 + 125);
    }

    #[test]
    fn boundary_126_uses_extended_length() {
        let payload = "y".repeat(126);
        let Ok(frame) = encode_text(&payload) else {
            panic!("encode failed");
        };
        assert_eq!(frame.get(1), Some(&(0x80 | 126)));
        assert_eq!(frame.len(), 4 + 4 + 126);
    }

    #[test]
    fn oversized_payload_rejected() {
        let huge = "z".repeat(SEND_CAPACITY);
        let result = encode_text(&huge);
        assert!(matches!(
            result,
            Err(ClientError::PayloadTooLarge { len }) if len == SEND_CAPACITY
        ));
    }

    #[test]
    fn incomplete_header_waits() {
        assert_eq!(decode(&[]), Decoded::Incomplete);
        assert_eq!(decode(&[0x81]), Decoded::Incomplete);
        // Extended length announced but only 3 header bytes buffered.
        assert_eq!(decode(&[0x81, 126, 0x01]), Decoded::Incomplete);
    }

    #[test]
    fn partial_payload_waits() {
        // Header claims 5 payload bytes, only 3 present.
        assert_eq!(decode(&[0x81, 5, b'a', b'b', b'c']), Decoded::Incomplete);
    }

    #[test]
    fn server_frame_without_mask_decodes() {
        // Server-originated frames carry no mask bit and no mask key.
        let mut frame = vec![0x81, 4];
        frame.extend_from_slice(b"ping");
        let Decoded::Frame {
            opcode,
            payload,
            consumed,
        } = decode(&frame)
        else {
            panic!("expected a complete frame");
        };
        assert_eq!(opcode, Opcode::Text);
        assert_eq!(payload, b"ping");
        assert_eq!(consumed, 6);
    }

    #[test]
    fn control_frames_surface_their_opcode() {
        assert!(matches!(
            decode(&[0x89, 0]),
            Decoded::Frame {
                opcode: Opcode::Ping,
                consumed: 2,
                ..
            }
        ));
        assert!(matches!(
            decode(&[0x88, 0]),
            Decoded::Frame {
                opcode: Opcode::Close,
                ..
            }
        ));
        assert!(matches!(
            decode(&[0x82, 1, 0xFF]),
            Decoded::Frame {
                opcode: Opcode::Binary,
                consumed: 3,
                ..
            }
        ));
    }
}
