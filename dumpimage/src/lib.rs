//! # dumpimage
//!
//! Reader for U-Boot legacy images (`uImage`): decodes the 64-byte header
//! and splits the data area into its payloads, including multi-file images.
//!
//! Decoding never rejects an image because of its magic number or unknown
//! code bytes, so corrupt headers can still be inspected. Check
//! [`ImageHeader::check_magic`] before trusting the payload layout.
//!
//! ## Example
//!
//! ```rust,no_run
//! use dumpimage::LegacyImage;
//!
//! let data = std::fs::read("uImage")?;
//! let image = LegacyImage::parse_checked(&data)?;
//!
//! println!("{}", image.summary());
//! for (index, part) in image.parts().iter().enumerate() {
//!     println!("{}: {} bytes", image.part_file_name(index), part.len());
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod extract;
pub mod image;
pub mod image_header;
pub mod image_types;
pub mod logger;
pub mod payload;

// Re-export main types for convenience
pub use config::ExtractConfig;
pub use error::{DumpImageError, Result};
pub use extract::{part_file_name, write_parts};
pub use image::{ImageInfo, LegacyImage};
pub use image_header::{IH_NMLEN, ImageHeader};
pub use image_types::*;
pub use payload::{PayloadLayout, split, split_ranges};

/// Current version of the dumpimage implementation
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Magic number for U-Boot legacy images
pub const IH_MAGIC: u32 = 0x27051956;

/// Size of the legacy image header: 7 words, 4 code bytes and the name
pub const IH_HEADER_SIZE: usize = 7 * 4 + 4 + IH_NMLEN;
