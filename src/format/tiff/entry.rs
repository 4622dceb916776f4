//! IFD entry parsing and inline/offset classification.
//!
//! ```text
//! Bytes 0-1:  Tag ID
//! Bytes 2-3:  Field type
//! Bytes 4-7:  Component count
//! Bytes 8-11: Value (if it fits) or offset to value, relative to the TIFF base
//! ```

use bytes::Bytes;
use serde::Serialize;

use crate::error::FormatError;

use super::parser::{ByteOrder, IFD_ENTRY_SIZE};
use super::tags::{ExifTag, FieldType};

// =============================================================================
// Directory
// =============================================================================

/// Which directory an entry was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Directory {
    /// Position in the main IFD chain (0 = primary image, 1 = thumbnail)
    Ifd(u32),
    /// Exif private IFD
    Exif,
    /// GPS IFD
    Gps,
}

impl Directory {
    /// Directory reached through this directory's next-IFD link.
    pub fn next(self) -> Directory {
        match self {
            Directory::Ifd(index) => Directory::Ifd(index.saturating_add(1)),
            other => other,
        }
    }
}

impl std::fmt::Display for Directory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Directory::Ifd(index) => write!(f, "IFD{index}"),
            Directory::Exif => write!(f, "Exif"),
            Directory::Gps => write!(f, "GPS"),
        }
    }
}

// =============================================================================
// IfdEntry
// =============================================================================

/// A parsed 12-byte directory entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IfdEntry {
    /// Tag ID
    pub tag: u16,

    /// Field type
    pub field_type: FieldType,

    /// Number of components
    pub count: u32,

    /// Raw value/offset field, in file byte order
    pub value_field: Bytes,
}

/// Where an entry's value lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Placement {
    /// Value is the first `len` bytes of the value field
    Inline(Bytes),

    /// Value of `len` bytes sits at `offset` (relative to the TIFF base)
    Deferred { offset: u32, len: u64 },

    /// Value field is the offset of a nested directory
    SubDirectory { offset: u32, directory: Directory },
}

impl IfdEntry {
    /// Parse an entry from exactly [`IFD_ENTRY_SIZE`] bytes.
    ///
    /// # Errors
    /// `UnknownFieldType` if the type code is not one of the 12 TIFF types.
    pub fn parse(record: Bytes, byte_order: ByteOrder) -> Result<Self, FormatError> {
        debug_assert_eq!(record.len(), IFD_ENTRY_SIZE);

        let tag = byte_order.read_u16(&record[0..2]);
        let field_type_raw = byte_order.read_u16(&record[2..4]);
        let field_type =
            FieldType::from_u16(field_type_raw).ok_or(FormatError::UnknownFieldType {
                tag,
                field_type: field_type_raw,
            })?;
        let count = byte_order.read_u32(&record[4..8]);

        Ok(Self {
            tag,
            field_type,
            count,
            value_field: record.slice(8..12),
        })
    }

    /// Total byte length of the value.
    #[inline]
    pub fn value_len(&self) -> u64 {
        self.field_type.total_size(self.count)
    }

    /// The value field read as an offset.
    #[inline]
    pub fn offset(&self, byte_order: ByteOrder) -> u32 {
        byte_order.read_u32(&self.value_field)
    }

    /// Classify the entry as inline, deferred, or a sub-directory link.
    ///
    /// The Exif pointer (0x8769) is always a link, whatever its own length.
    /// The GPS pointer (0x8825) is only treated as a link when
    /// `follow_gps` is set; otherwise it is an ordinary LONG.
    pub fn placement(&self, byte_order: ByteOrder, follow_gps: bool) -> Placement {
        if self.tag == ExifTag::ExifIfdPointer.as_u16() {
            return Placement::SubDirectory {
                offset: self.offset(byte_order),
                directory: Directory::Exif,
            };
        }
        if follow_gps && self.tag == ExifTag::GpsIfdPointer.as_u16() {
            return Placement::SubDirectory {
                offset: self.offset(byte_order),
                directory: Directory::Gps,
            };
        }

        let len = self.value_len();
        if len <= FieldType::INLINE_THRESHOLD {
            Placement::Inline(self.value_field.slice(..len as usize))
        } else {
            Placement::Deferred {
                offset: self.offset(byte_order),
                len,
            }
        }
    }
}
