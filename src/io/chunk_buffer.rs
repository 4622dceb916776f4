use bytes::{Buf, Bytes, BytesMut};

/// Accumulates partially delivered records until a requested length is met.
///
/// Every parser state that consumes a fixed-size record asks the buffer for
/// exactly `n` bytes. If the current chunk plus whatever was carried over is
/// still short, the chunk is absorbed and `None` is returned; the caller
/// retries with the next chunk and the same `n`.
///
/// Invariant: while a request for `n` bytes is outstanding, at most `n - 1`
/// bytes are held. The carry-over is emptied as soon as a request is met.
#[derive(Debug, Default)]
pub struct ChunkBuffer {
    carried: BytesMut,
}

impl ChunkBuffer {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of bytes carried over from earlier chunks.
    #[inline]
    pub fn buffered(&self) -> usize {
        self.carried.len()
    }

    /// Whether no partial record is being held.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.carried.is_empty()
    }

    /// Take exactly `n` bytes, drawing on carried bytes first and then on `input`.
    ///
    /// On success `input` is advanced past the bytes that completed the record.
    /// Otherwise all of `input` is carried over and left empty.
    pub fn take(&mut self, n: usize, input: &mut Bytes) -> Option<Bytes> {
        // Fast path: nothing carried and the chunk covers the record.
        if self.carried.is_empty() && input.len() >= n {
            return Some(input.split_to(n));
        }

        let needed = n.saturating_sub(self.carried.len());
        if input.len() < needed {
            self.carried.extend_from_slice(input);
            input.advance(input.len());
            return None;
        }

        self.carried.extend_from_slice(&input[..needed]);
        input.advance(needed);
        Some(self.carried.split().freeze())
    }

    /// Drop any carried bytes.
    pub fn clear(&mut self) {
        self.carried.clear();
    }
}
