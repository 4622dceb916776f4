//! # exif-stream
//!
//! A single-pass, streaming EXIF decoder for JPEG byte streams.
//!
//! The decoder consumes a JPEG front to back in chunks of any size, finds the
//! EXIF segment, walks the embedded TIFF directories and resolves tag values,
//! without ever seeking backwards or holding the whole file in memory.
//!
//! ## Features
//!
//! - **Forward-only**: out-of-line values are scheduled by offset and read when
//!   the stream reaches them; values behind the current position are dropped
//! - **Chunk agnostic**: records may be split across any chunk boundaries
//! - **Bounded memory**: at most one partial record is buffered, plus the
//!   queue of pending offsets
//! - **Typed values**: integers, reduced fractions, text, raw bytes and GPS
//!   composites through [`TagValue`]
//!
//! ## Architecture
//!
//! - [`io`] - Chunk buffering and async chunk sources
//! - [`mod@format`] - JPEG segment framing, TIFF entries, tag table and value decoding
//! - [`stream`] - The parser state machine and the async driver
//! - [`config`] - CLI configuration for the `exif-stream` binary
//!
//! ## Example
//!
//! ```rust,no_run
//! use exif_stream::{extract_tags, ParserOptions, ReaderSource};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let file = tokio::fs::File::open("photo.jpg").await?;
//!     let mut source = ReaderSource::new(file, "photo.jpg");
//!
//!     for tag in extract_tags(&mut source, ParserOptions::default()).await? {
//!         println!("{}: {}", tag.name(), tag.display_value());
//!     }
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod format;
pub mod io;
pub mod stream;

// Re-export commonly used types
pub use config::{Config, OutputFormat};
pub use error::{ExtractError, FormatError, IoError};
pub use format::tiff::{
    tag_label, ByteOrder, DecodedTag, Directory, ExifTag, FieldType, Fraction, IfdEntry,
    Placement, TagValue,
};
pub use io::{ChunkBuffer, ChunkSource, MemorySource, ReaderSource, DEFAULT_CHUNK_SIZE};
pub use stream::{extract_tags, ExifStream, ParserOptions, DEFAULT_MAX_VALUE_LEN};
