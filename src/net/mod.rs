//! Network layer: frame codec, receive buffer, and connection manager.

pub mod connection;
pub mod frame;
pub mod recv_buffer;

pub use connection::{Connection, ConnectionState};
pub use frame::{Decoded, Opcode};
pub use recv_buffer::RecvBuffer;
