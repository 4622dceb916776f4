use bytes::Bytes;

use crate::error::FormatError;

use super::context::ParserContext;
use super::scheduler::PendingValue;
use super::{directory, scanner, scheduler};

/// Outcome of one handler call.
///
/// `Ok(Some(next))` moves to `next`; `Ok(None)` means the handler needs
/// more input and the current state stays as it is.
pub(crate) type Transition = Result<Option<State>, FormatError>;

/// Parser states, in the order a well-formed stream visits them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum State {
    /// Expecting the 0xFFD8 start-of-image marker
    StartOfImage,

    /// Expecting a 4-byte segment header
    MarkerHeader,

    /// Comparing the payload against the EXIF identifier
    MarkerPayload { payload_len: u16, matched: usize },

    /// Discarding a non-EXIF payload
    SkipSegment { remaining: u64 },

    TiffByteOrder,
    TiffMagic,
    TiffFirstIfd,

    /// Discarding filler between the TIFF header and IFD0
    SkipToIfd { remaining: u64 },

    /// Expecting a directory entry count
    IfdHeader,

    /// Reading directory entries
    IfdEntry { remaining: u16 },

    /// Expecting the next-IFD link
    IfdEnd,

    /// Waiting for the stream to reach the next scheduled offset
    PendingValues,

    /// Reading an out-of-line value
    ReadValue(PendingValue),

    /// Nothing left to resolve
    Done,
}

impl State {
    /// Run the handler for this state.
    pub(crate) fn step(self, ctx: &mut ParserContext, input: &mut Bytes) -> Transition {
        match self {
            State::StartOfImage => scanner::start_of_image(ctx, input),
            State::MarkerHeader => scanner::marker_header(ctx, input),
            State::MarkerPayload {
                payload_len,
                matched,
            } => scanner::marker_payload(ctx, input, payload_len, matched),
            State::SkipSegment { remaining } => scanner::skip_segment(ctx, input, remaining),
            State::TiffByteOrder => scanner::tiff_byte_order(ctx, input),
            State::TiffMagic => scanner::tiff_magic(ctx, input),
            State::TiffFirstIfd => scanner::tiff_first_ifd(ctx, input),
            State::SkipToIfd { remaining } => scanner::skip_to_ifd(ctx, input, remaining),
            State::IfdHeader => directory::ifd_header(ctx, input),
            State::IfdEntry { remaining } => directory::ifd_entry(ctx, input, remaining),
            State::IfdEnd => directory::ifd_end(ctx, input),
            State::PendingValues => scheduler::pending_values(ctx, input),
            State::ReadValue(pending) => scheduler::read_value(ctx, input, pending),
            State::Done => {
                ctx.skip_all(input);
                Ok(None)
            }
        }
    }
}
