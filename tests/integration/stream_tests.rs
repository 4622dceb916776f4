//! End-to-end parser tests over synthetic JPEG streams.
//!
//! Tests verify:
//! - Inline and out-of-line values resolve, with sub-IFDs and IFD chains
//! - Results do not depend on how the stream is split into chunks
//! - Deferred values resolve exactly when their bytes arrive
//! - Unreachable offsets are dropped and gaps are skipped, never fatal
//! - Fatal format errors poison the stream

use exif_stream::{ByteOrder, Directory, ExifStream, FormatError, ParserOptions, TagValue};

use super::test_utils::{
    camera_tiff, exif_segment, jfif_segment, jpeg_with_exif, jpeg_with_segments,
    parse_in_chunks, rendered, xmp_segment, ByteOrderType, IfdBuilder, TiffBuilder,
    TAG_EXIF_IFD, TAG_GPS_ALTITUDE, TAG_GPS_ALTITUDE_REF, TAG_GPS_IFD, TAG_GPS_LATITUDE,
    TAG_GPS_LATITUDE_REF, TAG_GPS_TIME_STAMP, TAG_IMAGE_WIDTH, TAG_MAKE, TAG_MODEL,
    TAG_ORIENTATION, TAG_X_RESOLUTION, RATIONAL, UNDEFINED,
};

fn expected_camera_tags() -> Vec<(String, String)> {
    [
        ("Model", "EOS"),
        ("Orientation", "1"),
        ("Make", "Canon"),
        ("XResolution", "72"),
        ("ISOSpeedRatings", "100"),
        ("EXIF version", "0230"),
        ("Exposure time", "1/250"),
        ("Image width", "160"),
    ]
    .into_iter()
    .map(|(name, value)| (name.to_string(), value.to_string()))
    .collect()
}

// =============================================================================
// Directory Traversal
// =============================================================================

#[test]
fn test_camera_layout_little_endian() {
    let jpeg = jpeg_with_exif(&camera_tiff(ByteOrderType::LittleEndian));

    let mut parser = ExifStream::new();
    parse_in_chunks(&mut parser, &jpeg, jpeg.len());

    assert!(parser.is_done());
    assert_eq!(parser.byte_order(), Some(ByteOrder::LittleEndian));
    // SOI (2) + APP0 (4 + 14) + APP1 header (4) + identifier (6)
    assert_eq!(parser.tiff_base(), Some(30));
    assert_eq!(rendered(&parser), expected_camera_tags());
}

#[test]
fn test_camera_layout_big_endian() {
    let jpeg = jpeg_with_exif(&camera_tiff(ByteOrderType::BigEndian));

    let mut parser = ExifStream::new();
    parse_in_chunks(&mut parser, &jpeg, 64);

    assert_eq!(parser.byte_order(), Some(ByteOrder::BigEndian));
    assert_eq!(rendered(&parser), expected_camera_tags());
}

#[test]
fn test_directory_labels() {
    let jpeg = jpeg_with_exif(&camera_tiff(ByteOrderType::LittleEndian));
    let mut parser = ExifStream::new();
    parse_in_chunks(&mut parser, &jpeg, 16);

    let directories: Vec<(u16, Directory)> = parser
        .tags()
        .iter()
        .map(|tag| (tag.tag, tag.directory))
        .collect();
    assert!(directories.contains(&(TAG_MAKE, Directory::Ifd(0))));
    assert!(directories.contains(&(0x829A, Directory::Exif)));
    assert!(directories.contains(&(TAG_IMAGE_WIDTH, Directory::Ifd(1))));
}

#[test]
fn test_exif_pointer_is_not_reported_as_tag() {
    let jpeg = jpeg_with_exif(&camera_tiff(ByteOrderType::LittleEndian));
    let mut parser = ExifStream::new();
    parse_in_chunks(&mut parser, &jpeg, 7);
    assert!(parser.tags().iter().all(|tag| tag.tag != TAG_EXIF_IFD));
}

// =============================================================================
// Chunking
// =============================================================================

#[test]
fn test_results_do_not_depend_on_chunking() {
    let jpeg = jpeg_with_exif(&camera_tiff(ByteOrderType::LittleEndian));

    let mut reference = ExifStream::new();
    parse_in_chunks(&mut reference, &jpeg, jpeg.len());
    let reference = reference.into_tags();

    for chunk_size in 1..=80 {
        let mut parser = ExifStream::new();
        parse_in_chunks(&mut parser, &jpeg, chunk_size);
        assert!(parser.is_done(), "chunk size {chunk_size}");
        assert_eq!(parser.tags(), &reference[..], "chunk size {chunk_size}");
    }
}

#[test]
fn test_empty_chunks_are_harmless() {
    let jpeg = jpeg_with_exif(&camera_tiff(ByteOrderType::LittleEndian));
    let mut parser = ExifStream::new();
    for byte in &jpeg {
        parser.push(Vec::<u8>::new()).unwrap();
        parser.push(vec![*byte]).unwrap();
    }
    assert_eq!(rendered(&parser), expected_camera_tags());
}

#[test]
fn test_deferred_value_resolves_when_its_bytes_arrive() {
    let jpeg = jpeg_with_exif(&camera_tiff(ByteOrderType::LittleEndian));
    let value_start = jpeg
        .windows(6)
        .position(|window| window == b"Canon\0")
        .unwrap();
    let value_end = value_start + 6;

    let mut parser = ExifStream::new();
    parser.push(jpeg[..value_end - 1].to_vec()).unwrap();
    assert!(parser.tags().iter().all(|tag| tag.tag != TAG_MAKE));
    assert_eq!(parser.position(), (value_end - 1) as u64);

    let resolved = parser.push(vec![jpeg[value_end - 1]]).unwrap();
    assert_eq!(resolved, 1);
    assert_eq!(parser.tags().last().unwrap().tag, TAG_MAKE);
}

#[test]
fn test_take_tags_drains_incrementally() {
    let jpeg = jpeg_with_exif(&camera_tiff(ByteOrderType::LittleEndian));
    let mut parser = ExifStream::new();
    let mut collected = Vec::new();
    for chunk in jpeg.chunks(10) {
        parser.push(chunk.to_vec()).unwrap();
        collected.extend(parser.take_tags());
    }
    assert_eq!(collected.len(), expected_camera_tags().len());
    assert!(parser.tags().is_empty());
}

// =============================================================================
// Segment Handling
// =============================================================================

#[test]
fn test_no_exif_segment() {
    let jpeg = jpeg_with_segments(&[jfif_segment()]);
    let mut parser = ExifStream::new();
    parse_in_chunks(&mut parser, &jpeg, 5);
    assert!(parser.is_done());
    assert!(parser.tags().is_empty());
    assert_eq!(parser.tiff_base(), None);
}

#[test]
fn test_non_exif_app1_is_skipped() {
    let tiff = camera_tiff(ByteOrderType::LittleEndian);
    let jpeg = jpeg_with_segments(&[jfif_segment(), xmp_segment(), exif_segment(&tiff)]);

    let mut parser = ExifStream::new();
    parse_in_chunks(&mut parser, &jpeg, 3);
    assert_eq!(rendered(&parser), expected_camera_tags());
}

#[test]
fn test_short_segment_payloads() {
    // An APP2 whose payload is shorter than the EXIF identifier, and an
    // empty APP3.
    let short = vec![0xFF, 0xE2, 0x00, 0x05, b'E', b'x', b'i'];
    let empty = vec![0xFF, 0xE3, 0x00, 0x02];
    let tiff = camera_tiff(ByteOrderType::LittleEndian);
    let jpeg = jpeg_with_segments(&[short, empty, exif_segment(&tiff)]);

    let mut parser = ExifStream::new();
    parse_in_chunks(&mut parser, &jpeg, 2);
    assert_eq!(rendered(&parser), expected_camera_tags());
}

#[test]
fn test_first_ifd_gap_is_skipped() {
    let tiff = TiffBuilder::new()
        .with_first_ifd_gap(10)
        .add_ifd(IfdBuilder::new().short(TAG_ORIENTATION, &[6]))
        .build();
    let jpeg = jpeg_with_exif(&tiff);

    let mut parser = ExifStream::new();
    parse_in_chunks(&mut parser, &jpeg, 4);
    assert_eq!(
        rendered(&parser),
        vec![("Orientation".to_string(), "6".to_string())]
    );
}

// =============================================================================
// Unreachable Data
// =============================================================================

#[test]
fn test_value_behind_position_is_dropped() {
    // Make points back into the TIFF header: already consumed.
    let tiff = TiffBuilder::new()
        .add_ifd(
            IfdBuilder::new()
                .raw(TAG_MAKE, 2, 8, 0u32.to_le_bytes())
                .short(TAG_ORIENTATION, &[3]),
        )
        .build();
    let jpeg = jpeg_with_exif(&tiff);

    let mut parser = ExifStream::new();
    parse_in_chunks(&mut parser, &jpeg, 9);
    assert!(parser.is_done());
    assert_eq!(
        rendered(&parser),
        vec![("Orientation".to_string(), "3".to_string())]
    );
}

#[test]
fn test_oversized_value_behind_position_is_dropped() {
    // Larger than the value limit, but unreachable anyway.
    let tiff = TiffBuilder::new()
        .add_ifd(
            IfdBuilder::new()
                .raw(TAG_MAKE, 2, 100_000, 0u32.to_le_bytes())
                .short(TAG_ORIENTATION, &[3]),
        )
        .build();
    let jpeg = jpeg_with_exif(&tiff);

    let mut parser = ExifStream::new();
    assert_eq!(parser.push(jpeg), Ok(1));
    assert!(parser.is_done());
    assert!(parser.error().is_none());
    assert_eq!(
        rendered(&parser),
        vec![("Orientation".to_string(), "3".to_string())]
    );
}

#[test]
fn test_directory_cycle_terminates() {
    // IFD0's next link points back at IFD0.
    let tiff = TiffBuilder::new()
        .add_ifd(IfdBuilder::new().short(TAG_ORIENTATION, &[1]).next(0))
        .build();
    let jpeg = jpeg_with_exif(&tiff);

    let mut parser = ExifStream::new();
    parse_in_chunks(&mut parser, &jpeg, 1);
    assert!(parser.is_done());
    assert_eq!(parser.tags().len(), 1);
}

#[test]
fn test_unreferenced_bytes_are_skipped() {
    let tiff = TiffBuilder::new()
        .add_ifd(IfdBuilder::new().short(TAG_ORIENTATION, &[1]).next(1))
        .add_ifd(
            IfdBuilder::new()
                .with_padding(37)
                .long(TAG_IMAGE_WIDTH, &[640]),
        )
        .build();
    let jpeg = jpeg_with_exif(&tiff);

    for chunk_size in [1, 5, 64, jpeg.len()] {
        let mut parser = ExifStream::new();
        parse_in_chunks(&mut parser, &jpeg, chunk_size);
        assert_eq!(
            rendered(&parser),
            vec![
                ("Orientation".to_string(), "1".to_string()),
                ("Image width".to_string(), "640".to_string()),
            ],
            "chunk size {chunk_size}"
        );
    }
}

#[test]
fn test_overlapping_values_keep_first() {
    // Two entries pointing at the same bytes: only the first can be read.
    let tiff = TiffBuilder::new()
        .add_ifd(
            IfdBuilder::new()
                .ascii(TAG_MAKE, "Nikon")
                .raw(TAG_MODEL, 2, 6, 38u32.to_le_bytes()),
        )
        .build();
    // IFD0 at 8 with 2 entries ends at 38, where Make's value sits. Model
    // points at the same bytes, which are behind once Make is read.
    let jpeg = jpeg_with_exif(&tiff);

    let mut parser = ExifStream::new();
    parse_in_chunks(&mut parser, &jpeg, 11);
    assert_eq!(
        rendered(&parser),
        vec![("Make".to_string(), "Nikon".to_string())]
    );
}

// =============================================================================
// GPS
// =============================================================================

fn gps_tiff() -> Vec<u8> {
    TiffBuilder::new()
        .add_ifd(IfdBuilder::new().ascii(TAG_MODEL, "X").pointer(TAG_GPS_IFD, 1))
        .add_ifd(
            IfdBuilder::new()
                .ascii(TAG_GPS_LATITUDE_REF, "N")
                .rational(TAG_GPS_LATITUDE, &[(35, 1), (39, 1), (3030, 100)])
                .byte(TAG_GPS_ALTITUDE_REF, &[1])
                .rational(TAG_GPS_ALTITUDE, &[(125, 2)])
                .rational(TAG_GPS_TIME_STAMP, &[(14, 1), (5, 1), (9, 1)]),
        )
        .build()
}

#[test]
fn test_gps_pointer_is_a_plain_tag_by_default() {
    let jpeg = jpeg_with_exif(&gps_tiff());
    let mut parser = ExifStream::new();
    parse_in_chunks(&mut parser, &jpeg, 8);

    let offset = TiffBuilder::new()
        .add_ifd(IfdBuilder::new().ascii(TAG_MODEL, "X").pointer(TAG_GPS_IFD, 1))
        .add_ifd(IfdBuilder::new())
        .directory_offsets()[1];

    let tags = parser.tags();
    assert_eq!(tags.len(), 2);
    assert_eq!(tags[1].tag, TAG_GPS_IFD);
    assert_eq!(tags[1].value(), TagValue::Integer(offset));
    assert_eq!(tags[1].name(), "GPS IFD");
}

#[test]
fn test_gps_ifd_with_opt_in() {
    let jpeg = jpeg_with_exif(&gps_tiff());
    let mut parser = ExifStream::with_options(ParserOptions::default().with_follow_gps_ifd(true));
    parse_in_chunks(&mut parser, &jpeg, 8);

    assert_eq!(
        rendered(&parser),
        vec![
            ("Model".to_string(), "X".to_string()),
            ("GPS latitude reference".to_string(), "N".to_string()),
            ("GPS altitude reference".to_string(), "Below sea level".to_string()),
            ("GPS latitude".to_string(), "35 39'30.3\"".to_string()),
            ("GPS altitude".to_string(), "125/2 m".to_string()),
            ("GPS time stamp".to_string(), "14:5:9".to_string()),
        ]
    );
    assert!(parser
        .tags()
        .iter()
        .skip(1)
        .all(|tag| tag.directory == Directory::Gps));
}

// =============================================================================
// Fatal Errors
// =============================================================================

#[test]
fn test_invalid_start_of_image() {
    let mut parser = ExifStream::new();
    let result = parser.push(vec![0x00u8, 0x00, 0xFF, 0xE1]);
    assert_eq!(result, Err(FormatError::InvalidStartOfImage(0x0000)));
    assert!(parser.tags().is_empty());

    // Poisoned: a valid stream afterwards changes nothing.
    let jpeg = jpeg_with_exif(&camera_tiff(ByteOrderType::LittleEndian));
    assert_eq!(
        parser.push(jpeg),
        Err(FormatError::InvalidStartOfImage(0x0000))
    );
    assert!(parser.tags().is_empty());
}

#[test]
fn test_invalid_byte_order() {
    let mut tiff = camera_tiff(ByteOrderType::LittleEndian);
    tiff[0] = b'X';
    let jpeg = jpeg_with_exif(&tiff);

    let mut parser = ExifStream::new();
    assert_eq!(
        parser.push(jpeg),
        Err(FormatError::InvalidByteOrder(0x5849))
    );
}

#[test]
fn test_invalid_magic() {
    let mut tiff = camera_tiff(ByteOrderType::BigEndian);
    tiff[3] = 43;
    let jpeg = jpeg_with_exif(&tiff);

    let mut parser = ExifStream::new();
    assert_eq!(parser.push(jpeg), Err(FormatError::InvalidMagic(43)));
}

#[test]
fn test_unknown_field_type_keeps_earlier_tags() {
    let tiff = TiffBuilder::new()
        .add_ifd(
            IfdBuilder::new()
                .short(TAG_ORIENTATION, &[1])
                .raw(0x0131, 13, 1, [0; 4]),
        )
        .build();
    let jpeg = jpeg_with_exif(&tiff);

    let mut parser = ExifStream::new();
    assert_eq!(
        parser.push(jpeg),
        Err(FormatError::UnknownFieldType {
            tag: 0x0131,
            field_type: 13
        })
    );
    assert_eq!(parser.tags().len(), 1);
}

#[test]
fn test_value_too_large() {
    let tiff = TiffBuilder::new()
        .add_ifd(IfdBuilder::new().undefined(0x927C, &[0xAB; 64]))
        .build();
    let jpeg = jpeg_with_exif(&tiff);

    let mut parser = ExifStream::with_options(ParserOptions::default().with_max_value_len(32));
    assert_eq!(
        parser.push(jpeg),
        Err(FormatError::ValueTooLarge {
            tag: 0x927C,
            len: 64,
            max: 32
        })
    );
}

#[test]
fn test_invalid_segment_length() {
    let jpeg = vec![0xFFu8, 0xD8, 0xFF, 0xE1, 0x00, 0x01];
    let mut parser = ExifStream::new();
    assert_eq!(
        parser.push(jpeg),
        Err(FormatError::InvalidSegmentLength(1))
    );
}

#[test]
fn test_unparsed_format_is_reported() {
    let tiff = TiffBuilder::new()
        .add_ifd(IfdBuilder::new().raw(0x0131, 9, 1, 7i32.to_le_bytes()))
        .build();
    let jpeg = jpeg_with_exif(&tiff);

    let mut parser = ExifStream::new();
    parse_in_chunks(&mut parser, &jpeg, 32);
    assert_eq!(parser.tags()[0].display_value(), "Format 9 is not parsed");
}

#[test]
fn test_rational_array_and_undefined() {
    let tiff = TiffBuilder::new()
        .add_ifd(
            IfdBuilder::new()
                .rational(TAG_X_RESOLUTION, &[(1, 2), (3, 4)])
                .raw(0xA000, UNDEFINED, 4, *b"0100"),
        )
        .build();
    let jpeg = jpeg_with_exif(&tiff);

    let mut parser = ExifStream::new();
    parse_in_chunks(&mut parser, &jpeg, 6);
    let rendered = rendered(&parser);
    assert!(rendered.contains(&("FlashPix version".to_string(), "48 49 48 48".to_string())));
    assert!(rendered.contains(&("XResolution".to_string(), "1/2 3/4".to_string())));
    assert_eq!(parser.tags()[1].field_type.as_u16(), RATIONAL);
}
