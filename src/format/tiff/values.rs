//! Tag value decoding.
//!
//! A [`DecodedTag`] carries the raw bytes of one resolved directory entry.
//! [`DecodedTag::value`] interprets those bytes according to the field type,
//! and [`DecodedTag::display_value`] adds the tag-specific rendering used for
//! GPS coordinates, altitude and time stamps.

use std::fmt;

use bytes::Bytes;
use serde::Serialize;

use super::entry::Directory;
use super::parser::ByteOrder;
use super::tags::{tag_label, ExifTag, FieldType};

// =============================================================================
// Fraction
// =============================================================================

/// A numerator/denominator pair, kept in lowest terms.
///
/// A zero denominator is preserved as-is rather than rejected; EXIF writers
/// use `0/0` to mean "unknown".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Fraction {
    pub numerator: i64,
    pub denominator: i64,
}

impl Fraction {
    /// Create a fraction, reducing it and moving any sign to the numerator.
    pub fn new(numerator: i64, denominator: i64) -> Self {
        if denominator == 0 {
            return Self {
                numerator,
                denominator,
            };
        }

        let divisor = gcd(numerator.unsigned_abs(), denominator.unsigned_abs()) as i64;
        let sign = if denominator < 0 { -1 } else { 1 };
        Self {
            numerator: sign * numerator / divisor,
            denominator: sign * denominator / divisor,
        }
    }

    /// Floating point value (NaN or infinite for a zero denominator).
    pub fn to_f64(self) -> f64 {
        self.numerator as f64 / self.denominator as f64
    }
}

impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.denominator == 1 {
            write!(f, "{}", self.numerator)
        } else {
            write!(f, "{}/{}", self.numerator, self.denominator)
        }
    }
}

fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a.max(1)
}

// =============================================================================
// TagValue
// =============================================================================

/// Semantic value of a tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum TagValue {
    /// Single SHORT or LONG
    Integer(u32),

    /// Several SHORTs or LONGs
    IntegerArray(Vec<u32>),

    /// Single RATIONAL or SRATIONAL
    Fraction(Fraction),

    /// Several RATIONALs or SRATIONALs
    FractionArray(Vec<Fraction>),

    /// ASCII text (and the EXIF version string)
    Text(String),

    /// BYTE and UNDEFINED data
    Bytes(Vec<u8>),

    /// Data present in a representation this decoder does not interpret
    Unsupported { field_type: u16 },
}

impl fmt::Display for TagValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagValue::Integer(value) => write!(f, "{value}"),
            TagValue::IntegerArray(values) => write_joined(f, values, " "),
            TagValue::Fraction(value) => write!(f, "{value}"),
            TagValue::FractionArray(values) => write_joined(f, values, " "),
            TagValue::Text(text) => f.write_str(text),
            TagValue::Bytes(bytes) => write_joined(f, bytes, " "),
            TagValue::Unsupported { field_type } => {
                write!(f, "Format {field_type} is not parsed")
            }
        }
    }
}

fn write_joined<T: fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    items: &[T],
    separator: &str,
) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(separator)?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

// =============================================================================
// DecodedTag
// =============================================================================

/// One resolved directory entry: its identity plus the raw value bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedTag {
    /// Tag ID
    pub tag: u16,

    /// Field type
    pub field_type: FieldType,

    /// Raw value bytes, exactly type size × count long
    pub data: Bytes,

    /// Byte order of the TIFF body the value came from
    pub byte_order: ByteOrder,

    /// Directory the entry was listed in
    pub directory: Directory,
}

impl DecodedTag {
    /// Human-readable tag name, or `Unknown tag (<hex>)`.
    pub fn name(&self) -> std::borrow::Cow<'static, str> {
        tag_label(self.tag)
    }

    /// Decode the raw bytes according to the field type.
    pub fn value(&self) -> TagValue {
        let data = self.data.as_ref();
        let order = self.byte_order;

        match self.field_type {
            FieldType::Ascii => {
                let text = data.strip_suffix(b"\0").unwrap_or(data);
                TagValue::Text(String::from_utf8_lossy(text).into_owned())
            }
            FieldType::Short => integers(data.chunks_exact(2).map(|c| order.read_u16(c) as u32)),
            FieldType::Long => integers(data.chunks_exact(4).map(|c| order.read_u32(c))),
            // Both rational types are read as unsigned words.
            FieldType::Rational | FieldType::SRational => fractions(
                data.chunks_exact(8)
                    .map(|c| (order.read_u32(&c[..4]) as i64, order.read_u32(&c[4..]) as i64)),
            ),
            FieldType::Undefined if self.tag == ExifTag::ExifVersion.as_u16() => {
                TagValue::Text(String::from_utf8_lossy(data).into_owned())
            }
            FieldType::Undefined | FieldType::Byte => TagValue::Bytes(data.to_vec()),
            other => TagValue::Unsupported {
                field_type: other.as_u16(),
            },
        }
    }

    /// Render the value for display, applying tag-specific formats.
    ///
    /// - GPS latitude/longitude: `D M'S"` with seconds as a decimal
    /// - GPS altitude: the fraction with an `m` suffix
    /// - GPS time stamp: the three fractions joined with `:`
    /// - GPS altitude reference: above/below sea level
    pub fn display_value(&self) -> String {
        let value = self.value();

        match (ExifTag::from_u16(self.tag), &value) {
            (Some(ExifTag::GpsLatitude | ExifTag::GpsLongitude), TagValue::FractionArray(parts))
                if parts.len() >= 3 =>
            {
                format!("{} {}'{:?}\"", parts[0], parts[1], parts[2].to_f64())
            }
            (Some(ExifTag::GpsAltitude), TagValue::Fraction(altitude)) => {
                format!("{altitude} m")
            }
            (Some(ExifTag::GpsTimeStamp), TagValue::FractionArray(parts)) => parts
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(":"),
            (Some(ExifTag::GpsAltitudeRef), TagValue::Bytes(bytes))
                if self.field_type == FieldType::Byte && bytes.len() == 1 =>
            {
                if bytes[0] == 0 {
                    "Above sea level".to_string()
                } else {
                    "Below sea level".to_string()
                }
            }
            _ => value.to_string(),
        }
    }
}

fn integers(values: impl Iterator<Item = u32>) -> TagValue {
    let mut values: Vec<u32> = values.collect();
    if values.len() == 1 {
        TagValue::Integer(values.remove(0))
    } else {
        TagValue::IntegerArray(values)
    }
}

fn fractions(pairs: impl Iterator<Item = (i64, i64)>) -> TagValue {
    let mut values: Vec<Fraction> = pairs.map(|(n, d)| Fraction::new(n, d)).collect();
    if values.len() == 1 {
        TagValue::Fraction(values.remove(0))
    } else {
        TagValue::FractionArray(values)
    }
}
