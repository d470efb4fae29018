//! Fixed-capacity receive buffer with a read cursor.
//!
//! [`RecvBuffer`] accumulates socket bytes and releases them frame by
//! frame. Consumed bytes advance a cursor instead of shifting the
//! remainder on every frame; the buffer compacts only when it runs out of
//! tail space, so steady-state frame draining moves no data at all.

/// Capacity of the receive buffer in bytes.
pub const RECV_CAPACITY: usize = 4096;

/// Receive buffer: a fixed byte array plus `start..end` live region.
#[derive(Debug)]
pub struct RecvBuffer {
    buf: Box<[u8; RECV_CAPACITY]>,
    start: usize,
    end: usize,
}

impl RecvBuffer {
    /// Creates an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            buf: Box::new([0; RECV_CAPACITY]),
            start: 0,
            end: 0,
        }
    }

    /// Returns the unconsumed bytes.
    #[must_use]
    pub fn filled(&self) -> &[u8] {
        self.buf.get(self.start..self.end).unwrap_or_default()
    }

    /// Returns the number of unconsumed bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Returns `true` when no unconsumed bytes remain.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Returns the writable tail, compacting first if the cursor has
    /// freed space at the front. Empty when the buffer is full.
    pub fn spare(&mut self) -> &mut [u8] {
        if self.end == RECV_CAPACITY && self.start > 0 {
            self.compact();
        }
        self.buf.get_mut(self.end..).unwrap_or_default()
    }

    /// Marks `n` bytes of the spare tail as filled.
    pub fn advance(&mut self, n: usize) {
        self.end = (self.end + n).min(RECV_CAPACITY);
    }

    /// Consumes `n` bytes from the front of the live region.
    pub fn consume(&mut self, n: usize) {
        self.start = (self.start + n).min(self.end);
        if self.start == self.end {
            self.start = 0;
            self.end = 0;
        }
    }

    /// Discards everything, including unconsumed bytes.
    pub fn clear(&mut self) {
        self.start = 0;
        self.end = 0;
    }

    fn compact(&mut self) {
        self.buf.copy_within(self.start..self.end, 0);
        self.end -= self.start;
        self.start = 0;
    }
}

impl Default for RecvBuffer {
    fn default() -> Self {
        Self::new()
    }
}
