//! TIFF preamble parsing.
//!
//! The TIFF body embedded in an EXIF segment starts with an 8-byte header:
//!
//! ```text
//! Bytes 0-1: Byte order (0x4949 = little-endian "II", 0x4D4D = big-endian "MM")
//! Bytes 2-3: Magic (42 = 0x002A)
//! Bytes 4-7: Offset to first IFD, relative to byte 0
//! ```
//!
//! The streaming parser reads these fields one at a time as they arrive,
//! so each is exposed as its own function instead of a whole-header parse.

use serde::Serialize;

use crate::error::FormatError;
use crate::io::{read_u16_be, read_u16_le, read_u32_be, read_u32_le};

// =============================================================================
// Constants
// =============================================================================

/// Magic bytes indicating little-endian byte order ("II" for Intel)
const BYTE_ORDER_LITTLE_ENDIAN: u16 = 0x4949;

/// Magic bytes indicating big-endian byte order ("MM" for Motorola)
const BYTE_ORDER_BIG_ENDIAN: u16 = 0x4D4D;

/// TIFF magic constant
pub const TIFF_MAGIC: u16 = 42;

/// Size of the TIFF header in bytes
pub const TIFF_HEADER_SIZE: u32 = 8;

/// Size of an IFD entry in bytes (2 tag + 2 type + 4 count + 4 value/offset)
pub const IFD_ENTRY_SIZE: usize = 12;

/// Size of the entry count field at the start of an IFD
pub const IFD_COUNT_SIZE: usize = 2;

/// Size of the next IFD offset field at the end of an IFD
pub const IFD_NEXT_OFFSET_SIZE: usize = 4;

// =============================================================================
// ByteOrder
// =============================================================================

/// Byte order (endianness) of a TIFF body.
///
/// Declared once in the TIFF header; every multi-byte value that follows
/// must be read respecting it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ByteOrder {
    /// Little-endian ("II" = Intel)
    #[serde(rename = "little")]
    LittleEndian,
    /// Big-endian ("MM" = Motorola)
    #[serde(rename = "big")]
    BigEndian,
}

impl ByteOrder {
    /// Interpret the 2-byte alignment marker.
    ///
    /// # Errors
    /// `InvalidByteOrder` if the bytes are neither "II" nor "MM".
    pub fn from_marker(bytes: &[u8]) -> Result<Self, FormatError> {
        // Read big-endian: we are matching a byte pattern, not a number.
        match read_u16_be(bytes) {
            BYTE_ORDER_LITTLE_ENDIAN => Ok(ByteOrder::LittleEndian),
            BYTE_ORDER_BIG_ENDIAN => Ok(ByteOrder::BigEndian),
            other => Err(FormatError::InvalidByteOrder(other)),
        }
    }

    /// Read a u16 from a byte slice using this byte order.
    #[inline]
    pub fn read_u16(self, bytes: &[u8]) -> u16 {
        match self {
            ByteOrder::LittleEndian => read_u16_le(bytes),
            ByteOrder::BigEndian => read_u16_be(bytes),
        }
    }

    /// Read a u32 from a byte slice using this byte order.
    #[inline]
    pub fn read_u32(self, bytes: &[u8]) -> u32 {
        match self {
            ByteOrder::LittleEndian => read_u32_le(bytes),
            ByteOrder::BigEndian => read_u32_be(bytes),
        }
    }
}

// =============================================================================
// Header fields
// =============================================================================

/// Validate the 2-byte magic constant.
pub fn check_magic(bytes: &[u8], byte_order: ByteOrder) -> Result<(), FormatError> {
    let magic = byte_order.read_u16(bytes);
    if magic != TIFF_MAGIC {
        return Err(FormatError::InvalidMagic(magic));
    }
    Ok(())
}

/// Read the first IFD offset and return how many bytes separate the end of
/// the header from the first IFD.
///
/// # Errors
/// `InvalidIfdOffset` if the offset points inside the header itself.
pub fn first_ifd_gap(bytes: &[u8], byte_order: ByteOrder) -> Result<u32, FormatError> {
    let offset = byte_order.read_u32(bytes);
    offset
        .checked_sub(TIFF_HEADER_SIZE)
        .ok_or(FormatError::InvalidIfdOffset(offset))
}

// =============================================================================
// Tests
// =============================================================================
