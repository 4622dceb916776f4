//! Segment and TIFF preamble handlers.
//!
//! These states walk the JPEG marker segments until one carries the EXIF
//! identifier, then read the TIFF header that opens its payload and skip to
//! the first IFD.

use bytes::Bytes;
use tracing::debug;

use crate::format::jpeg::{
    check_start_of_image, continues_exif_identifier, SegmentHeader, EXIF_IDENTIFIER,
    SEGMENT_HEADER_SIZE, SOI,
};
use crate::format::tiff::{check_magic, first_ifd_gap, ByteOrder, Directory};

use super::context::ParserContext;
use super::state::{State, Transition};

// =============================================================================
// JPEG segments
// =============================================================================

pub(crate) fn start_of_image(ctx: &mut ParserContext, input: &mut Bytes) -> Transition {
    let Some(marker) = ctx.take(SOI.len(), input) else {
        return Ok(None);
    };
    check_start_of_image(&marker)?;
    Ok(Some(State::MarkerHeader))
}

pub(crate) fn marker_header(ctx: &mut ParserContext, input: &mut Bytes) -> Transition {
    let Some(record) = ctx.take(SEGMENT_HEADER_SIZE, input) else {
        return Ok(None);
    };
    let header = SegmentHeader::parse(&record)?;

    if header.ends_metadata() {
        debug!(
            marker = header.marker,
            position = ctx.position,
            "reached image data without an EXIF segment"
        );
        return Ok(Some(State::Done));
    }

    debug!(
        marker = header.marker,
        payload_len = header.payload_len,
        position = ctx.position,
        "segment"
    );
    Ok(Some(State::MarkerPayload {
        payload_len: header.payload_len,
        matched: 0,
    }))
}

/// Match the payload against the EXIF identifier as bytes arrive.
///
/// Matched bytes are consumed. On the first mismatch the rest of the payload
/// (including the byte that failed to match) is skipped.
pub(crate) fn marker_payload(
    ctx: &mut ParserContext,
    input: &mut Bytes,
    payload_len: u16,
    matched: usize,
) -> Transition {
    if (payload_len as usize) < EXIF_IDENTIFIER.len() {
        return Ok(Some(State::SkipSegment {
            remaining: payload_len as u64,
        }));
    }
    if input.is_empty() {
        return Ok(None);
    }

    let available = (EXIF_IDENTIFIER.len() - matched).min(input.len());
    if !continues_exif_identifier(matched, &input[..available]) {
        return Ok(Some(State::SkipSegment {
            remaining: (payload_len as usize - matched) as u64,
        }));
    }

    ctx.skip(available as u64, input);
    let matched = matched + available;
    if matched < EXIF_IDENTIFIER.len() {
        return Ok(Some(State::MarkerPayload {
            payload_len,
            matched,
        }));
    }

    debug!(tiff_base = ctx.position, "found EXIF segment");
    ctx.tiff_base = Some(ctx.position);
    Ok(Some(State::TiffByteOrder))
}

pub(crate) fn skip_segment(
    ctx: &mut ParserContext,
    input: &mut Bytes,
    remaining: u64,
) -> Transition {
    if remaining > 0 && input.is_empty() {
        return Ok(None);
    }
    match ctx.skip(remaining, input) {
        0 => Ok(Some(State::MarkerHeader)),
        remaining => Ok(Some(State::SkipSegment { remaining })),
    }
}

// =============================================================================
// TIFF preamble
// =============================================================================

pub(crate) fn tiff_byte_order(ctx: &mut ParserContext, input: &mut Bytes) -> Transition {
    let Some(marker) = ctx.take(2, input) else {
        return Ok(None);
    };
    ctx.byte_order = ByteOrder::from_marker(&marker)?;
    debug!(byte_order = ?ctx.byte_order, "TIFF byte order");
    Ok(Some(State::TiffMagic))
}

pub(crate) fn tiff_magic(ctx: &mut ParserContext, input: &mut Bytes) -> Transition {
    let Some(magic) = ctx.take(2, input) else {
        return Ok(None);
    };
    check_magic(&magic, ctx.byte_order)?;
    Ok(Some(State::TiffFirstIfd))
}

pub(crate) fn tiff_first_ifd(ctx: &mut ParserContext, input: &mut Bytes) -> Transition {
    let Some(offset) = ctx.take(4, input) else {
        return Ok(None);
    };
    let gap = first_ifd_gap(&offset, ctx.byte_order)?;
    Ok(Some(State::SkipToIfd {
        remaining: gap as u64,
    }))
}

/// Discard the filler between the TIFF header and the first IFD.
pub(crate) fn skip_to_ifd(ctx: &mut ParserContext, input: &mut Bytes, remaining: u64) -> Transition {
    if remaining > 0 && input.is_empty() {
        return Ok(None);
    }
    match ctx.skip(remaining, input) {
        0 => {
            ctx.directory = Directory::Ifd(0);
            Ok(Some(State::IfdHeader))
        }
        remaining => Ok(Some(State::SkipToIfd { remaining })),
    }
}
