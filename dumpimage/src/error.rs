//! Error types for legacy image parsing and extraction

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while decoding or unpacking a legacy image
#[derive(Error, Debug)]
pub enum DumpImageError {
    /// The buffer ends before a structure it must contain
    #[error("Truncated input: {context} needs {needed} bytes, buffer holds {available}")]
    TruncatedInput {
        context: &'static str,
        needed: u64,
        available: usize,
    },

    /// The name field is not valid UTF-8 once trailing NULs are removed
    #[error("Invalid image name: {0}")]
    InvalidName(#[from] std::str::Utf8Error),

    /// Raised only by explicit magic validation, never by decoding
    #[error("Bad magic number: expected 0x{expected:08x}, found 0x{found:08x}")]
    BadMagic { expected: u32, found: u32 },

    #[error("Part {index} does not exist (image has {count} parts)")]
    PartOutOfRange { index: usize, count: usize },

    #[error("Refusing to overwrite existing file: {}", .0.display())]
    OutputExists(PathBuf),

    #[error("Invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for dumpimage operations
pub type Result<T> = std::result::Result<T, DumpImageError>;

impl DumpImageError {
    pub fn truncated(context: &'static str, needed: u64, available: usize) -> Self {
        Self::TruncatedInput {
            context,
            needed,
            available,
        }
    }

    pub fn bad_magic(expected: u32, found: u32) -> Self {
        Self::BadMagic { expected, found }
    }

    /// True for errors caused by a short or malformed buffer
    pub fn is_truncated(&self) -> bool {
        matches!(self, Self::TruncatedInput { .. })
    }
}
