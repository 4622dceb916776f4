use thiserror::Error;

/// I/O errors raised while pulling chunks from a source
#[derive(Debug, Clone, Error)]
pub enum IoError {
    /// The underlying reader failed
    #[error("Read error: {0}")]
    Read(String),

    /// Input could not be opened
    #[error("Input not found: {0}")]
    NotFound(String),
}

impl From<std::io::Error> for IoError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => IoError::NotFound(err.to_string()),
            _ => IoError::Read(err.to_string()),
        }
    }
}

/// Fatal structural errors in the JPEG/EXIF/TIFF container.
///
/// Any of these aborts processing of the stream. No partial recovery is
/// attempted; tags resolved before the error remain available.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// Stream does not begin with the JPEG start-of-image marker
    #[error("Invalid start of image: expected 0xFFD8, got 0x{0:04X}")]
    InvalidStartOfImage(u16),

    /// A segment header did not start with the 0xFF marker prefix
    #[error("Invalid marker prefix: expected 0xFF, got 0x{0:02X}")]
    InvalidMarker(u8),

    /// Segment size field is smaller than the size field itself
    #[error("Invalid segment length: {0} (must be at least 2)")]
    InvalidSegmentLength(u16),

    /// TIFF alignment marker is neither II nor MM
    #[error("Invalid TIFF byte order: expected 0x4949 (II) or 0x4D4D (MM), got 0x{0:04X}")]
    InvalidByteOrder(u16),

    /// TIFF magic constant is not 42
    #[error("Invalid TIFF magic: expected 42, got {0}")]
    InvalidMagic(u16),

    /// First IFD offset points inside the TIFF header
    #[error("Invalid IFD offset: {0}")]
    InvalidIfdOffset(u32),

    /// Directory entry uses a type code outside the 12 TIFF types
    #[error("Unknown field type {field_type} for tag 0x{tag:04X}")]
    UnknownFieldType { tag: u16, field_type: u16 },

    /// Offset-referenced value exceeds the configured limit
    #[error("Value for tag 0x{tag:04X} is {len} bytes, limit is {max}")]
    ValueTooLarge { tag: u16, len: u64, max: u64 },
}

/// Errors from driving a parser off a chunk source
#[derive(Debug, Clone, Error)]
pub enum ExtractError {
    /// Chunk source failed
    #[error("I/O error: {0}")]
    Io(#[from] IoError),

    /// Stream is not a well-formed JPEG/EXIF container
    #[error("Format error: {0}")]
    Format(#[from] FormatError),
}
