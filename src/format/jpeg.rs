//! JPEG segment framing.
//!
//! A baseline JPEG stream is a start-of-image marker followed by a sequence
//! of marker segments, each framed as:
//!
//! ```text
//! Byte 0:    0xFF marker prefix
//! Byte 1:    marker type
//! Bytes 2-3: big-endian segment size, including these two bytes
//! Bytes 4..: payload (size - 2 bytes)
//! ```
//!
//! EXIF metadata lives in a segment whose payload starts with the identifier
//! `"Exif\0\0"`, immediately followed by a TIFF body.

use crate::error::FormatError;
use crate::io::read_u16_be;

// =============================================================================
// JPEG Markers
// =============================================================================

/// Marker prefix byte
pub const MARKER_PREFIX: u8 = 0xFF;

/// Start Of Image marker
pub const SOI: [u8; 2] = [0xFF, 0xD8];

/// Start Of Scan marker type (entropy-coded data follows)
pub const SOS: u8 = 0xDA;

/// End Of Image marker type
pub const EOI: u8 = 0xD9;

/// Application segment 0 (JFIF) marker type
pub const APP0: u8 = 0xE0;

/// Application segment 1 (EXIF) marker type
pub const APP1: u8 = 0xE1;

/// Identifier that opens an EXIF payload
pub const EXIF_IDENTIFIER: [u8; 6] = *b"Exif\0\0";

/// Size of a segment header (prefix + type + size field)
pub const SEGMENT_HEADER_SIZE: usize = 4;

// =============================================================================
// Start Of Image
// =============================================================================

/// Validate the first two bytes of the stream.
pub fn check_start_of_image(bytes: &[u8]) -> Result<(), FormatError> {
    if bytes[..2] != SOI {
        return Err(FormatError::InvalidStartOfImage(read_u16_be(bytes)));
    }
    Ok(())
}

// =============================================================================
// Segment Header
// =============================================================================

/// A parsed 4-byte segment header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentHeader {
    /// Marker type byte (e.g. 0xE1 for APP1)
    pub marker: u8,

    /// Payload length, excluding the size field
    pub payload_len: u16,
}

impl SegmentHeader {
    /// Parse a segment header from exactly [`SEGMENT_HEADER_SIZE`] bytes.
    ///
    /// # Errors
    /// - `InvalidMarker` if the first byte is not 0xFF
    /// - `InvalidSegmentLength` if the size field is below 2
    pub fn parse(bytes: &[u8]) -> Result<Self, FormatError> {
        if bytes[0] != MARKER_PREFIX {
            return Err(FormatError::InvalidMarker(bytes[0]));
        }

        let size = read_u16_be(&bytes[2..4]);
        let payload_len = size
            .checked_sub(2)
            .ok_or(FormatError::InvalidSegmentLength(size))?;

        Ok(Self {
            marker: bytes[1],
            payload_len,
        })
    }

    /// Whether this marker means no further metadata segments can follow.
    ///
    /// After start-of-scan the stream is entropy-coded image data; after
    /// end-of-image there is nothing at all.
    #[inline]
    pub fn ends_metadata(&self) -> bool {
        self.marker == SOS || self.marker == EOI
    }
}

/// Compare a partial run of payload bytes against the EXIF identifier.
///
/// `matched` is how many identifier bytes were already confirmed. Returns
/// `true` if `bytes` continues the identifier (it may be shorter than the
/// remainder of the identifier).
pub fn continues_exif_identifier(matched: usize, bytes: &[u8]) -> bool {
    let end = (matched + bytes.len()).min(EXIF_IDENTIFIER.len());
    EXIF_IDENTIFIER[matched..end] == bytes[..end - matched]
}
