//! Single-pass EXIF parser.
//!
//! The parser is a state machine fed by consecutive byte runs. Each state
//! consumes one fixed-size record once enough bytes have arrived, and either
//! emits a tag, updates the parser context, or schedules a read at an offset
//! further down the stream.
//!
//! ```text
//! StartOfImage
//!   -> MarkerHeader -> MarkerPayload -> SkipSegment -> MarkerHeader ...
//!                                    -> TiffByteOrder -> TiffMagic -> TiffFirstIfd -> SkipToIfd
//!   -> IfdHeader -> IfdEntry x count -> IfdEnd
//!   -> PendingValues -> ReadValue -> PendingValues ...
//!                    -> IfdHeader (sub-directory or linked IFD)
//!                    -> Done (queue empty)
//! ```
//!
//! A start-of-scan or end-of-image marker seen before any EXIF segment also
//! leads to `Done`.
//!
//! # Usage
//!
//! ```
//! use exif_stream::ExifStream;
//!
//! let mut parser = ExifStream::new();
//! // A JPEG with no metadata segments: SOI followed by EOI.
//! parser.push(vec![0xFFu8, 0xD8]).unwrap();
//! parser.push(vec![0xFFu8, 0xD9, 0x00, 0x02]).unwrap();
//! assert!(parser.is_done());
//! assert!(parser.tags().is_empty());
//! ```

mod context;
mod directory;
mod driver;
mod scanner;
mod scheduler;
mod state;

use bytes::Bytes;
use tracing::debug;

use crate::error::FormatError;
use crate::format::tiff::{ByteOrder, DecodedTag};

pub use context::{ParserOptions, DEFAULT_MAX_VALUE_LEN};
pub use driver::extract_tags;

use context::ParserContext;
use state::State;

// =============================================================================
// ExifStream
// =============================================================================

/// Push-driven EXIF decoder over a JPEG byte stream.
///
/// Feed consecutive byte runs with [`push`](Self::push). Runs may have any
/// length, including zero. Tags become available as soon as the bytes that
/// hold them have been pushed.
///
/// A fatal format error poisons the parser: the same error is returned by
/// every later `push`, and no further tags are produced.
#[derive(Debug)]
pub struct ExifStream {
    ctx: ParserContext,
    state: State,
    error: Option<FormatError>,
}

impl Default for ExifStream {
    fn default() -> Self {
        Self::new()
    }
}

impl ExifStream {
    /// Create a parser with default options.
    pub fn new() -> Self {
        Self::with_options(ParserOptions::default())
    }

    /// Create a parser with the given options.
    pub fn with_options(options: ParserOptions) -> Self {
        Self {
            ctx: ParserContext::new(options),
            state: State::StartOfImage,
            error: None,
        }
    }

    /// Consume the next run of bytes.
    ///
    /// Returns how many tags were resolved by this run.
    ///
    /// # Errors
    /// Any [`FormatError`] raised while parsing, or the error that poisoned
    /// this parser earlier.
    pub fn push(&mut self, chunk: impl Into<Bytes>) -> Result<usize, FormatError> {
        if let Some(err) = &self.error {
            return Err(err.clone());
        }

        let mut input: Bytes = chunk.into();
        let before = self.ctx.tags.len();

        loop {
            match self.state.step(&mut self.ctx, &mut input) {
                Ok(Some(next)) => {
                    if next == State::Done && self.state != State::Done {
                        debug!(
                            position = self.ctx.position,
                            tags = self.ctx.tags.len(),
                            "parsing finished"
                        );
                    }
                    self.state = next;
                }
                Ok(None) => break,
                Err(err) => {
                    debug!(position = self.ctx.position, error = %err, "parser poisoned");
                    self.error = Some(err.clone());
                    return Err(err);
                }
            }
        }

        Ok(self.ctx.tags.len() - before)
    }

    /// Tags resolved so far, in resolution order.
    pub fn tags(&self) -> &[DecodedTag] {
        &self.ctx.tags
    }

    /// Remove and return the tags resolved so far.
    pub fn take_tags(&mut self) -> Vec<DecodedTag> {
        std::mem::take(&mut self.ctx.tags)
    }

    /// Consume the parser, returning every resolved tag.
    pub fn into_tags(self) -> Vec<DecodedTag> {
        self.ctx.tags
    }

    /// Absolute offset of the next byte the parser expects.
    pub fn position(&self) -> u64 {
        self.ctx.position
    }

    /// Whether the parser has nothing left to resolve.
    ///
    /// Bytes pushed after this point are ignored.
    pub fn is_done(&self) -> bool {
        self.state == State::Done
    }

    /// The error that poisoned this parser, if any.
    pub fn error(&self) -> Option<&FormatError> {
        self.error.as_ref()
    }

    /// Byte order of the TIFF body, once its header has been read.
    pub fn byte_order(&self) -> Option<ByteOrder> {
        self.ctx.tiff_base.and_then(|_| match self.state {
            State::MarkerPayload { .. } | State::TiffByteOrder => None,
            _ => Some(self.ctx.byte_order),
        })
    }

    /// Absolute stream offset of the TIFF header, once the EXIF segment is found.
    pub fn tiff_base(&self) -> Option<u64> {
        self.ctx.tiff_base
    }
}
