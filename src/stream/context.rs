use bytes::{Buf, Bytes};
use tracing::trace;

use crate::format::tiff::{ByteOrder, DecodedTag, Directory};
use crate::io::ChunkBuffer;

use super::scheduler::PendingQueue;

/// Default limit on an offset-referenced value: one full APP1 payload.
pub const DEFAULT_MAX_VALUE_LEN: u64 = 64 * 1024;

// =============================================================================
// ParserOptions
// =============================================================================

/// Tunables for an [`ExifStream`](super::ExifStream).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserOptions {
    /// Descend into the GPS IFD (0x8825) the same way as the Exif IFD.
    ///
    /// Off by default: the GPS pointer is then reported as a plain LONG tag
    /// and GPS tags are not decoded.
    pub follow_gps_ifd: bool,

    /// Longest offset-referenced value accepted, in bytes.
    pub max_value_len: u64,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            follow_gps_ifd: false,
            max_value_len: DEFAULT_MAX_VALUE_LEN,
        }
    }
}

impl ParserOptions {
    /// Enable or disable GPS IFD descent.
    pub fn with_follow_gps_ifd(mut self, follow: bool) -> Self {
        self.follow_gps_ifd = follow;
        self
    }

    /// Set the value length limit.
    pub fn with_max_value_len(mut self, max: u64) -> Self {
        self.max_value_len = max;
        self
    }
}

// =============================================================================
// ParserContext
// =============================================================================

/// Mutable state shared by all state handlers.
///
/// Exactly one handler borrows it at a time. `position` counts every byte
/// taken from the input, including bytes carried in the chunk buffer, so it
/// only ever grows.
#[derive(Debug)]
pub(crate) struct ParserContext {
    pub options: ParserOptions,

    /// Absolute stream offset of the next unconsumed byte
    pub position: u64,

    /// Byte order declared by the TIFF header
    pub byte_order: ByteOrder,

    /// Absolute offset of the TIFF header, once the EXIF segment is found
    pub tiff_base: Option<u64>,

    /// Directory currently being read
    pub directory: Directory,

    pub pending: PendingQueue,

    /// Resolved tags, in resolution order
    pub tags: Vec<DecodedTag>,

    /// Queue head we are currently skipping towards, to warn once per gap
    pub resync_target: Option<u64>,

    buffer: ChunkBuffer,
}

impl ParserContext {
    pub fn new(options: ParserOptions) -> Self {
        Self {
            options,
            position: 0,
            byte_order: ByteOrder::LittleEndian,
            tiff_base: None,
            directory: Directory::Ifd(0),
            pending: PendingQueue::new(),
            tags: Vec::new(),
            resync_target: None,
            buffer: ChunkBuffer::new(),
        }
    }

    /// Take a fixed-size record, or carry `input` over if it is too short.
    pub fn take(&mut self, n: usize, input: &mut Bytes) -> Option<Bytes> {
        let before = input.len();
        let record = self.buffer.take(n, input);
        self.position += (before - input.len()) as u64;
        record
    }

    /// Discard up to `n` bytes from `input`; returns how many are still owed.
    pub fn skip(&mut self, n: u64, input: &mut Bytes) -> u64 {
        debug_assert!(self.buffer.is_empty());
        let step = n.min(input.len() as u64);
        input.advance(step as usize);
        self.position += step;
        n - step
    }

    /// Discard everything left in `input`.
    pub fn skip_all(&mut self, input: &mut Bytes) {
        self.position += input.len() as u64;
        input.advance(input.len());
    }

    /// Absolute stream offset of a TIFF-relative offset.
    #[inline]
    pub fn absolute(&self, offset: u32) -> u64 {
        self.tiff_base.unwrap_or(0) + offset as u64
    }

    pub fn emit(&mut self, tag: DecodedTag) {
        trace!(
            tag = tag.tag,
            directory = %tag.directory,
            len = tag.data.len(),
            "resolved tag"
        );
        self.tags.push(tag);
    }
}
