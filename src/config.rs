//! Configuration for the `exif-stream` command line tool.
//!
//! Options come from command-line arguments via clap, each with an
//! environment variable fallback using the `EXIF_STREAM_` prefix.
//!
//! # Example
//!
//! ```ignore
//! use clap::Parser;
//! use exif_stream::config::Config;
//!
//! let config = Config::parse();
//! config.validate()?;
//! let options = config.parser_options();
//! ```
//!
//! # Environment Variables
//!
//! - `EXIF_STREAM_CHUNK_SIZE` - Bytes read per chunk (default: 4096)
//! - `EXIF_STREAM_FORMAT` - Output format, `text` or `json` (default: text)
//! - `EXIF_STREAM_FOLLOW_GPS` - Descend into the GPS IFD (default: false)
//! - `EXIF_STREAM_MAX_VALUE_LEN` - Largest out-of-line value accepted (default: 65536)

use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};

use crate::io::DEFAULT_CHUNK_SIZE;
use crate::stream::{ParserOptions, DEFAULT_MAX_VALUE_LEN};

// =============================================================================
// Default Values
// =============================================================================

/// Largest accepted chunk size (16 MiB).
pub const MAX_CHUNK_SIZE: usize = 16 * 1024 * 1024;

/// Input path meaning "read standard input".
pub const STDIN_PATH: &str = "-";

// =============================================================================
// CLI Arguments
// =============================================================================

/// Output format for the tag report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One `name: value` line per tag
    Text,
    /// A JSON document with every tag and its decoded value
    Json,
}

/// exif-stream - Stream EXIF metadata out of a JPEG in a single pass.
///
/// Reads the input front to back without seeking and stops reading as soon
/// as every tag has been resolved.
#[derive(Parser, Debug, Clone)]
#[command(name = "exif-stream")]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// JPEG file to read, or `-` for standard input.
    #[arg(default_value = STDIN_PATH)]
    pub input: PathBuf,

    /// Number of bytes requested per read.
    #[arg(long, default_value_t = DEFAULT_CHUNK_SIZE, env = "EXIF_STREAM_CHUNK_SIZE")]
    pub chunk_size: usize,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, env = "EXIF_STREAM_FORMAT")]
    pub format: OutputFormat,

    /// Descend into the GPS IFD and decode GPS tags.
    #[arg(long, default_value_t = false, env = "EXIF_STREAM_FOLLOW_GPS")]
    pub follow_gps: bool,

    /// Largest offset-referenced value accepted, in bytes.
    #[arg(long, default_value_t = DEFAULT_MAX_VALUE_LEN, env = "EXIF_STREAM_MAX_VALUE_LEN")]
    pub max_value_len: u64,

    /// Enable verbose logging (debug level).
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

impl Config {
    /// Validate the configuration and return an error message if invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.chunk_size == 0 || self.chunk_size > MAX_CHUNK_SIZE {
            return Err("chunk_size must be between 1 byte and 16MB".to_string());
        }

        if self.max_value_len == 0 {
            return Err("max_value_len must be greater than 0".to_string());
        }

        if self.input.as_os_str().is_empty() {
            return Err("input path is empty. Pass a file or '-' for stdin".to_string());
        }

        Ok(())
    }

    /// Whether the input is standard input.
    pub fn reads_stdin(&self) -> bool {
        self.input == Path::new(STDIN_PATH)
    }

    /// Parser options selected by this configuration.
    pub fn parser_options(&self) -> ParserOptions {
        ParserOptions::default()
            .with_follow_gps_ifd(self.follow_gps)
            .with_max_value_len(self.max_value_len)
    }
}

// =============================================================================
// Tests
// =============================================================================
