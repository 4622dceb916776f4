use async_trait::async_trait;
use bytes::{Bytes, BytesMut};
use tokio::io::{AsyncRead, AsyncReadExt};

use crate::error::IoError;

/// Default number of bytes requested per chunk.
pub const DEFAULT_CHUNK_SIZE: usize = 4096;

/// Trait for pulling consecutive byte runs from a stream.
///
/// Chunks are delivered in order with no gaps. Their length is arbitrary;
/// the parser never assumes a chunk holds a complete record. `Ok(None)`
/// signals the end of the stream.
#[async_trait]
pub trait ChunkSource: Send {
    /// Fetch the next run of bytes, or `None` at end of stream.
    async fn next_chunk(&mut self) -> Result<Option<Bytes>, IoError>;

    /// Get an identifier for this source (for logging).
    fn identifier(&self) -> &str;
}

// =============================================================================
// ReaderSource
// =============================================================================

/// Chunk source over any tokio `AsyncRead` (files, sockets, stdin).
pub struct ReaderSource<R> {
    reader: R,
    chunk_size: usize,
    identifier: String,
}

impl<R: AsyncRead + Unpin + Send> ReaderSource<R> {
    /// Wrap a reader using [`DEFAULT_CHUNK_SIZE`].
    pub fn new(reader: R, identifier: impl Into<String>) -> Self {
        Self::with_chunk_size(reader, identifier, DEFAULT_CHUNK_SIZE)
    }

    /// Wrap a reader, reading at most `chunk_size` bytes per call.
    pub fn with_chunk_size(reader: R, identifier: impl Into<String>, chunk_size: usize) -> Self {
        Self {
            reader,
            chunk_size: chunk_size.max(1),
            identifier: identifier.into(),
        }
    }
}

#[async_trait]
impl<R: AsyncRead + Unpin + Send> ChunkSource for ReaderSource<R> {
    async fn next_chunk(&mut self) -> Result<Option<Bytes>, IoError> {
        let mut buf = BytesMut::zeroed(self.chunk_size);
        let n = self.reader.read(&mut buf).await?;
        if n == 0 {
            return Ok(None);
        }
        buf.truncate(n);
        Ok(Some(buf.freeze()))
    }

    fn identifier(&self) -> &str {
        &self.identifier
    }
}

// =============================================================================
// MemorySource
// =============================================================================

/// Chunk source serving an in-memory buffer.
///
/// Useful for tests and for callers that already hold the data but want
/// the same single-pass behaviour as a network stream.
pub struct MemorySource {
    chunks: std::collections::VecDeque<Bytes>,
    identifier: String,
}

impl MemorySource {
    /// Split `data` into consecutive chunks of `chunk_size` bytes.
    pub fn new(data: impl Into<Bytes>, chunk_size: usize) -> Self {
        let mut data: Bytes = data.into();
        let chunk_size = chunk_size.max(1);
        let mut chunks = std::collections::VecDeque::new();
        while !data.is_empty() {
            let take = chunk_size.min(data.len());
            chunks.push_back(data.split_to(take));
        }
        Self {
            chunks,
            identifier: "memory".to_string(),
        }
    }

    /// Serve exactly the given chunks, in order.
    pub fn from_chunks<I, B>(chunks: I) -> Self
    where
        I: IntoIterator<Item = B>,
        B: Into<Bytes>,
    {
        Self {
            chunks: chunks.into_iter().map(Into::into).collect(),
            identifier: "memory".to_string(),
        }
    }

    /// Number of chunks not yet delivered.
    pub fn remaining(&self) -> usize {
        self.chunks.len()
    }
}

#[async_trait]
impl ChunkSource for MemorySource {
    async fn next_chunk(&mut self) -> Result<Option<Bytes>, IoError> {
        Ok(self.chunks.pop_front())
    }

    fn identifier(&self) -> &str {
        &self.identifier
    }
}

// =============================================================================
// Endian Helper Functions
// =============================================================================
//
// TIFF bodies can be either little-endian or big-endian, and JPEG segment
// sizes are always big-endian. These helpers back `ByteOrder`.

/// Read a little-endian u16 from a byte slice.
///
/// # Panics
/// Panics if the slice has fewer than 2 bytes.
#[inline]
pub fn read_u16_le(bytes: &[u8]) -> u16 {
    u16::from_le_bytes([bytes[0], bytes[1]])
}

/// Read a big-endian u16 from a byte slice.
///
/// # Panics
/// Panics if the slice has fewer than 2 bytes.
#[inline]
pub fn read_u16_be(bytes: &[u8]) -> u16 {
    u16::from_be_bytes([bytes[0], bytes[1]])
}

/// Read a little-endian u32 from a byte slice.
///
/// # Panics
/// Panics if the slice has fewer than 4 bytes.
#[inline]
pub fn read_u32_le(bytes: &[u8]) -> u32 {
    u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}

/// Read a big-endian u32 from a byte slice.
///
/// # Panics
/// Panics if the slice has fewer than 4 bytes.
#[inline]
pub fn read_u32_be(bytes: &[u8]) -> u32 {
    u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}
