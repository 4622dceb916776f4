//! Async driver tests.
//!
//! Tests verify:
//! - Tags are extracted from in-memory and reader-backed sources
//! - The source is not read further once parsing is done
//! - I/O and format errors surface through `ExtractError`

use std::io::Cursor;

use exif_stream::{
    extract_tags, ExtractError, FormatError, MemorySource, ParserOptions, ReaderSource,
};

use super::test_utils::{camera_tiff, jpeg_with_exif, ByteOrderType};

#[tokio::test]
async fn test_extract_from_memory() {
    let jpeg = jpeg_with_exif(&camera_tiff(ByteOrderType::LittleEndian));
    let mut source = MemorySource::new(jpeg, 7);

    let tags = extract_tags(&mut source, ParserOptions::default())
        .await
        .unwrap();
    assert_eq!(tags.len(), 8);
    assert_eq!(tags[0].name(), "Model");
}

#[tokio::test]
async fn test_extract_from_reader() {
    let jpeg = jpeg_with_exif(&camera_tiff(ByteOrderType::BigEndian));
    let mut source = ReaderSource::with_chunk_size(Cursor::new(jpeg), "cursor", 13);

    let tags = extract_tags(&mut source, ParserOptions::default())
        .await
        .unwrap();
    let names: Vec<String> = tags.iter().map(|tag| tag.name().into_owned()).collect();
    assert!(names.contains(&"Make".to_string()));
    assert!(names.contains(&"Exposure time".to_string()));
}

#[tokio::test]
async fn test_stops_before_image_data() {
    let mut jpeg = jpeg_with_exif(&camera_tiff(ByteOrderType::LittleEndian));
    jpeg.extend(std::iter::repeat(0x55).take(64 * 1024));
    let mut source = MemorySource::new(jpeg, 256);
    let total = source.remaining();

    let tags = extract_tags(&mut source, ParserOptions::default())
        .await
        .unwrap();
    assert_eq!(tags.len(), 8);
    assert!(source.remaining() > total - 4);
}

#[tokio::test]
async fn test_format_error_surfaces() {
    let mut source = MemorySource::from_chunks(vec![vec![0xFFu8], vec![0xD9]]);
    let result = extract_tags(&mut source, ParserOptions::default()).await;
    assert!(matches!(
        result,
        Err(ExtractError::Format(FormatError::InvalidStartOfImage(0xFFD9)))
    ));
}

#[tokio::test]
async fn test_missing_file() {
    let result = tokio::fs::File::open("/nonexistent/photo.jpg").await;
    let err = exif_stream::IoError::from(result.unwrap_err());
    assert!(matches!(err, exif_stream::IoError::NotFound(_)));
}
