//! exif-stream - Print the EXIF tags of a JPEG file or stream.
//!
//! This binary reads the input in chunks, feeds them to the streaming parser
//! and prints every resolved tag.

use clap::Parser;
use std::process::ExitCode;
use tracing::{debug, error};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use exif_stream::{
    config::{Config, OutputFormat},
    extract_tags, DecodedTag, ExtractError, IoError, ReaderSource,
};

#[tokio::main]
async fn main() -> ExitCode {
    let config = Config::parse();

    init_logging(config.verbose);

    if let Err(e) = config.validate() {
        error!("Configuration error: {}", e);
        return ExitCode::FAILURE;
    }

    let tags = match run(&config).await {
        Ok(tags) => tags,
        Err(e) => {
            error!("{}: {}", config.input.display(), e);
            return ExitCode::FAILURE;
        }
    };

    match config.format {
        OutputFormat::Text => print_text(&tags),
        OutputFormat::Json => {
            if let Err(e) = print_json(&config, &tags) {
                error!("Failed to serialize output: {}", e);
                return ExitCode::FAILURE;
            }
        }
    }

    ExitCode::SUCCESS
}

/// Initialize the tracing/logging subsystem.
///
/// Logs go to stderr so stdout carries only the report.
fn init_logging(verbose: bool) {
    let env_filter = if verbose {
        "exif_stream=debug"
    } else {
        "exif_stream=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| env_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Open the configured input and extract its tags.
async fn run(config: &Config) -> Result<Vec<DecodedTag>, ExtractError> {
    let options = config.parser_options();
    debug!(?options, chunk_size = config.chunk_size, "starting extraction");

    if config.reads_stdin() {
        let mut source = ReaderSource::with_chunk_size(tokio::io::stdin(), "stdin", config.chunk_size);
        return extract_tags(&mut source, options).await;
    }

    let file = tokio::fs::File::open(&config.input)
        .await
        .map_err(IoError::from)?;
    let mut source = ReaderSource::with_chunk_size(
        file,
        config.input.display().to_string(),
        config.chunk_size,
    );
    extract_tags(&mut source, options).await
}

// =============================================================================
// Output
// =============================================================================

fn print_text(tags: &[DecodedTag]) {
    for tag in tags {
        println!("{}: {}", tag.name(), tag.display_value());
    }
}

fn print_json(config: &Config, tags: &[DecodedTag]) -> Result<(), serde_json::Error> {
    let tags: Vec<serde_json::Value> = tags
        .iter()
        .map(|tag| {
            serde_json::json!({
                "tag": tag.tag,
                "name": tag.name(),
                "directory": tag.directory,
                "field_type": tag.field_type.as_u16(),
                "value": tag.value(),
                "display": tag.display_value(),
            })
        })
        .collect();

    let json = serde_json::json!({
        "input": config.input.display().to_string(),
        "tags": tags,
    });
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
