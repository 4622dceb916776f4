//! Container formats: JPEG segment framing and the embedded TIFF body.
//!
//! These are pure functions over complete records. The streaming parser in
//! [`crate::stream`] is responsible for gathering each record from chunks
//! before handing it to this module.

pub mod jpeg;
pub mod tiff;

pub use jpeg::{SegmentHeader, EXIF_IDENTIFIER, SOI};
