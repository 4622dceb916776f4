//! TIFF structures embedded in an EXIF segment.
//!
//! # Key Concepts
//!
//! - **Byte order**: the TIFF body declares its endianness (II = little-endian,
//!   MM = big-endian) in the header. All multi-byte values follow it.
//!
//! - **Offsets**: every offset inside the body is relative to the first byte
//!   of the TIFF header (the TIFF base), not to the start of the JPEG stream.
//!
//! - **IFD (Image File Directory)**: a count, fixed 12-byte entries, and a
//!   next-IFD offset. Directories chain through that offset and nest through
//!   pointer tags such as the Exif IFD pointer.
//!
//! - **Inline vs offset values**: values of 4 bytes or less are stored in the
//!   entry itself; larger values are stored elsewhere and referenced by offset.

mod entry;
mod parser;
mod tags;
mod values;

pub use entry::{Directory, IfdEntry, Placement};
pub use parser::{
    check_magic, first_ifd_gap, ByteOrder, IFD_COUNT_SIZE, IFD_ENTRY_SIZE, IFD_NEXT_OFFSET_SIZE,
    TIFF_HEADER_SIZE, TIFF_MAGIC,
};
pub use tags::{tag_label, ExifTag, FieldType};
pub use values::{DecodedTag, Fraction, TagValue};
