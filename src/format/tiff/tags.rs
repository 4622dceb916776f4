//! TIFF field type and EXIF tag definitions.
//!
//! This module defines the vocabulary for directory parsing:
//! - Field types, which determine value encoding and the inline/offset split
//! - Tag IDs from the primary, Exif and GPS directories, with display names

use std::borrow::Cow;

use serde::Serialize;

// =============================================================================
// TIFF Field Types
// =============================================================================

/// The 12 TIFF field types.
///
/// Each has a fixed per-component size; size × count decides whether an
/// entry's value sits in its 4-byte value field or out-of-line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[repr(u16)]
pub enum FieldType {
    /// Unsigned 8-bit integer
    Byte = 1,

    /// 8-bit ASCII character, NUL terminated
    Ascii = 2,

    /// Unsigned 16-bit integer
    Short = 3,

    /// Unsigned 32-bit integer
    Long = 4,

    /// Two LONGs: numerator, denominator
    Rational = 5,

    /// Signed 8-bit integer
    SByte = 6,

    /// Opaque byte
    Undefined = 7,

    /// Signed 16-bit integer
    SShort = 8,

    /// Signed 32-bit integer
    SLong = 9,

    /// Two SLONGs: numerator, denominator
    SRational = 10,

    /// IEEE single precision float
    Float = 11,

    /// IEEE double precision float
    Double = 12,
}

impl FieldType {
    /// Bytes in the 4-byte value field of a classic TIFF entry.
    pub const INLINE_THRESHOLD: u64 = 4;

    /// Size of a single component of this type in bytes.
    #[inline]
    pub const fn size_in_bytes(self) -> u64 {
        match self {
            FieldType::Byte | FieldType::Ascii | FieldType::SByte | FieldType::Undefined => 1,
            FieldType::Short | FieldType::SShort => 2,
            FieldType::Long | FieldType::SLong | FieldType::Float => 4,
            FieldType::Rational | FieldType::SRational | FieldType::Double => 8,
        }
    }

    /// Create a FieldType from its numeric code.
    ///
    /// Returns `None` for codes outside the 12 TIFF types.
    pub fn from_u16(value: u16) -> Option<Self> {
        match value {
            1 => Some(FieldType::Byte),
            2 => Some(FieldType::Ascii),
            3 => Some(FieldType::Short),
            4 => Some(FieldType::Long),
            5 => Some(FieldType::Rational),
            6 => Some(FieldType::SByte),
            7 => Some(FieldType::Undefined),
            8 => Some(FieldType::SShort),
            9 => Some(FieldType::SLong),
            10 => Some(FieldType::SRational),
            11 => Some(FieldType::Float),
            12 => Some(FieldType::Double),
            _ => None,
        }
    }

    /// Get the numeric type code.
    #[inline]
    pub const fn as_u16(self) -> u16 {
        self as u16
    }

    /// Total byte length of `count` components.
    #[inline]
    pub const fn total_size(self, count: u32) -> u64 {
        self.size_in_bytes() * count as u64
    }
}

// =============================================================================
// EXIF Tags
// =============================================================================

/// Tag IDs with known display names.
///
/// GPS tags share the low ID range with nothing in the primary or Exif
/// directories, so a single flat table is enough. Tags not listed here are
/// still decoded; they simply have no name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum ExifTag {
    // -------------------------------------------------------------------------
    // GPS
    // -------------------------------------------------------------------------
    GpsVersionId = 0x0,
    GpsLatitudeRef = 0x1,
    GpsLatitude = 0x2,
    GpsLongitudeRef = 0x3,
    GpsLongitude = 0x4,
    GpsAltitudeRef = 0x5,
    GpsAltitude = 0x6,
    GpsTimeStamp = 0x7,
    GpsSpeedRef = 0xC,
    GpsSpeed = 0xD,
    GpsMeasureMode = 0x10,
    GpsImgDirection = 0x11,
    GpsDestBearingRef = 0x17,
    GpsDestBearing = 0x18,
    GpsDateStamp = 0x1D,

    // -------------------------------------------------------------------------
    // Primary image
    // -------------------------------------------------------------------------
    ImageWidth = 0x100,
    ImageHeight = 0x101,
    Make = 0x10F,
    Model = 0x110,
    Orientation = 0x112,
    XResolution = 0x11A,
    YResolution = 0x11B,
    ResolutionUnit = 0x128,
    Software = 0x131,
    DateTime = 0x132,
    YCbCrPositioning = 0x213,

    // -------------------------------------------------------------------------
    // Sub-directory pointers
    // -------------------------------------------------------------------------
    /// Offset of the Exif private IFD
    ExifIfdPointer = 0x8769,

    /// Offset of the GPS IFD
    GpsIfdPointer = 0x8825,

    /// Offset of the interoperability IFD
    InteroperabilityPointer = 0xA005,

    // -------------------------------------------------------------------------
    // Exif private directory
    // -------------------------------------------------------------------------
    ExposureTime = 0x829A,
    FNumber = 0x829D,
    ExposureProgram = 0x8822,
    IsoSpeedRatings = 0x8827,
    ExifVersion = 0x9000,
    DateTimeOriginal = 0x9003,
    DateTimeDigitized = 0x9004,
    ComponentsConfiguration = 0x9101,
    ShutterSpeedValue = 0x9201,
    ApertureValue = 0x9202,
    BrightnessValue = 0x9203,
    ExposureBiasValue = 0x9204,
    MaxApertureValue = 0x9205,
    MeteringMode = 0x9207,
    LightSource = 0x9208,
    Flash = 0x9209,
    FocalLength = 0x920A,
    SubjectArea = 0x9214,
    MakerNote = 0x927C,
    UserComment = 0x9286,
    FlashPixVersion = 0xA000,
    ColorSpace = 0xA001,
    PixelXDimension = 0xA002,
    PixelYDimension = 0xA003,
    SensingMethod = 0xA217,
    SceneType = 0xA301,
    ExposureMode = 0xA402,
    WhiteBalance = 0xA403,
    FocalLengthIn35mmFilm = 0xA405,
    SceneCaptureType = 0xA406,
    ImageUniqueId = 0xA420,
    LensSpecification = 0xA432,
    LensMake = 0xA433,
    LensModel = 0xA434,
}

impl ExifTag {
    /// Create an ExifTag from its numeric value.
    ///
    /// Returns `None` for unrecognized tags. Unknown tags are not an error.
    pub fn from_u16(value: u16) -> Option<Self> {
        use ExifTag::*;
        let tag = match value {
            0x0 => GpsVersionId,
            0x1 => GpsLatitudeRef,
            0x2 => GpsLatitude,
            0x3 => GpsLongitudeRef,
            0x4 => GpsLongitude,
            0x5 => GpsAltitudeRef,
            0x6 => GpsAltitude,
            0x7 => GpsTimeStamp,
            0xC => GpsSpeedRef,
            0xD => GpsSpeed,
            0x10 => GpsMeasureMode,
            0x11 => GpsImgDirection,
            0x17 => GpsDestBearingRef,
            0x18 => GpsDestBearing,
            0x1D => GpsDateStamp,
            0x100 => ImageWidth,
            0x101 => ImageHeight,
            0x10F => Make,
            0x110 => Model,
            0x112 => Orientation,
            0x11A => XResolution,
            0x11B => YResolution,
            0x128 => ResolutionUnit,
            0x131 => Software,
            0x132 => DateTime,
            0x213 => YCbCrPositioning,
            0x8769 => ExifIfdPointer,
            0x8825 => GpsIfdPointer,
            0xA005 => InteroperabilityPointer,
            0x829A => ExposureTime,
            0x829D => FNumber,
            0x8822 => ExposureProgram,
            0x8827 => IsoSpeedRatings,
            0x9000 => ExifVersion,
            0x9003 => DateTimeOriginal,
            0x9004 => DateTimeDigitized,
            0x9101 => ComponentsConfiguration,
            0x9201 => ShutterSpeedValue,
            0x9202 => ApertureValue,
            0x9203 => BrightnessValue,
            0x9204 => ExposureBiasValue,
            0x9205 => MaxApertureValue,
            0x9207 => MeteringMode,
            0x9208 => LightSource,
            0x9209 => Flash,
            0x920A => FocalLength,
            0x9214 => SubjectArea,
            0x927C => MakerNote,
            0x9286 => UserComment,
            0xA000 => FlashPixVersion,
            0xA001 => ColorSpace,
            0xA002 => PixelXDimension,
            0xA003 => PixelYDimension,
            0xA217 => SensingMethod,
            0xA301 => SceneType,
            0xA402 => ExposureMode,
            0xA403 => WhiteBalance,
            0xA405 => FocalLengthIn35mmFilm,
            0xA406 => SceneCaptureType,
            0xA420 => ImageUniqueId,
            0xA432 => LensSpecification,
            0xA433 => LensMake,
            0xA434 => LensModel,
            _ => return None,
        };
        Some(tag)
    }

    /// Get the numeric tag ID.
    #[inline]
    pub const fn as_u16(self) -> u16 {
        self as u16
    }

    /// Human-readable name.
    pub const fn name(self) -> &'static str {
        use ExifTag::*;
        match self {
            GpsVersionId => "GPS version ID",
            GpsLatitudeRef => "GPS latitude reference",
            GpsLatitude => "GPS latitude",
            GpsLongitudeRef => "GPS longitude reference",
            GpsLongitude => "GPS longitude",
            GpsAltitudeRef => "GPS altitude reference",
            GpsAltitude => "GPS altitude",
            GpsTimeStamp => "GPS time stamp",
            GpsSpeedRef => "GPS speed units",
            GpsSpeed => "GPS speed",
            GpsMeasureMode => "GPS measurement mode",
            GpsImgDirection => "GPS image direction",
            GpsDestBearingRef => "GPS reference for destination point bearing",
            GpsDestBearing => "GPS bearing to the destination point",
            GpsDateStamp => "GPS date",
            ImageWidth => "Image width",
            ImageHeight => "Image height",
            Make => "Make",
            Model => "Model",
            Orientation => "Orientation",
            XResolution => "XResolution",
            YResolution => "YResolution",
            ResolutionUnit => "Resolution unit",
            Software => "Software",
            DateTime => "Date/Time",
            YCbCrPositioning => "YCbCrPositioning",
            ExifIfdPointer => "Exif IFD",
            GpsIfdPointer => "GPS IFD",
            InteroperabilityPointer => "Exif interoperability offset",
            ExposureTime => "Exposure time",
            FNumber => "F number",
            ExposureProgram => "Exposure program",
            IsoSpeedRatings => "ISOSpeedRatings",
            ExifVersion => "EXIF version",
            DateTimeOriginal => "Image taken date/time",
            DateTimeDigitized => "Image digitized date/time",
            ComponentsConfiguration => "Component configuration",
            ShutterSpeedValue => "Shutter speed",
            ApertureValue => "Aperture",
            BrightnessValue => "Brightness value",
            ExposureBiasValue => "Exposure bias value",
            MaxApertureValue => "Max aperture value",
            MeteringMode => "Metering mode",
            LightSource => "Light source",
            Flash => "Flash",
            FocalLength => "Focal length",
            SubjectArea => "Subject location",
            MakerNote => "Maker note",
            UserComment => "User comment tag",
            FlashPixVersion => "FlashPix version",
            ColorSpace => "ColorSpace",
            PixelXDimension => "Exif Image width",
            PixelYDimension => "Exif Image height",
            SensingMethod => "Sensing mode",
            SceneType => "Scene type",
            ExposureMode => "Exposure mode",
            WhiteBalance => "White balance",
            FocalLengthIn35mmFilm => "Focal length in 35mm film",
            SceneCaptureType => "Scene capture type",
            ImageUniqueId => "Image ID",
            LensSpecification => "Lens specification",
            LensMake => "Lens make",
            LensModel => "Lens model",
        }
    }
}

/// Display name for any tag id; unknown ids render with their hex value.
pub fn tag_label(tag: u16) -> Cow<'static, str> {
    match ExifTag::from_u16(tag) {
        Some(known) => Cow::Borrowed(known.name()),
        None => Cow::Owned(format!("Unknown tag ({tag:x})")),
    }
}
