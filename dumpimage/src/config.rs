//! Extraction settings, optionally loaded from a TOML file
//!
//! ```toml
//! output_dir = "out"
//! prefix = "part"
//! overwrite = true
//! ```

use crate::error::Result;
use crate::extract::DEFAULT_PREFIX;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct ExtractConfig {
    /// Directory the part files are written to
    pub output_dir: PathBuf,
    /// File name prefix, `part` gives `part_00.gz`
    pub prefix: String,
    /// Replace files that already exist
    pub overwrite: bool,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            prefix: DEFAULT_PREFIX.to_string(),
            overwrite: false,
        }
    }
}

impl ExtractConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}
