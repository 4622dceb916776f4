use tracing::{debug, info};

use crate::error::ExtractError;
use crate::format::tiff::DecodedTag;
use crate::io::ChunkSource;

use super::{ExifStream, ParserOptions};

/// Pull chunks from `source` through a parser until it is done or the
/// source runs dry.
///
/// The source is not read past the point where the parser stops needing
/// bytes, so a large image body is never fetched once the metadata is
/// resolved.
///
/// # Errors
/// I/O errors from the source and format errors from the parser.
pub async fn extract_tags<S>(
    source: &mut S,
    options: ParserOptions,
) -> Result<Vec<DecodedTag>, ExtractError>
where
    S: ChunkSource + ?Sized,
{
    let mut parser = ExifStream::with_options(options);
    let mut chunks = 0u64;

    while !parser.is_done() {
        let Some(chunk) = source.next_chunk().await? else {
            debug!(
                source = source.identifier(),
                position = parser.position(),
                "source exhausted before parsing finished"
            );
            break;
        };
        chunks += 1;
        parser.push(chunk)?;
    }

    info!(
        source = source.identifier(),
        chunks,
        bytes = parser.position(),
        tags = parser.tags().len(),
        "extracted EXIF tags"
    );
    Ok(parser.into_tags())
}
