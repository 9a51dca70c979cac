//! Writing image parts to individual files

use crate::config::ExtractConfig;
use crate::error::{DumpImageError, Result};
use crate::image::LegacyImage;
use crate::image_types::Compression;
use log::{debug, info};
use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

pub const DEFAULT_PREFIX: &str = "part";

/// Extension for parts whose compression code is not in the table
const UNKNOWN_EXTENSION: &str = "bin";

/// `<prefix>_<NN>.<ext>`, the extension chosen by compression code
pub fn part_file_name(prefix: &str, index: usize, comp: u8) -> String {
    let extension = Compression::try_from(comp)
        .map(Compression::extension)
        .unwrap_or(UNKNOWN_EXTENSION);
    format!("{}_{:02}.{}", prefix, index, extension)
}

/// Write the parts of `image` below `config.output_dir`
///
/// With `only` set, just that part is written. Returns the paths written,
/// in part order.
pub fn write_parts(
    image: &LegacyImage<'_>,
    config: &ExtractConfig,
    only: Option<usize>,
) -> Result<Vec<PathBuf>> {
    let parts = image.parts();
    let selected: Vec<usize> = match only {
        Some(index) if index >= parts.len() => {
            return Err(DumpImageError::PartOutOfRange {
                index,
                count: parts.len(),
            });
        }
        Some(index) => vec![index],
        None => (0..parts.len()).collect(),
    };

    let targets: Vec<(usize, PathBuf)> = selected
        .into_iter()
        .map(|index| {
            let name = part_file_name(&config.prefix, index, image.header().comp);
            (index, config.output_dir.join(name))
        })
        .collect();

    if !config.overwrite {
        if let Some((_, path)) = targets.iter().find(|(_, path)| path.exists()) {
            return Err(DumpImageError::OutputExists(path.clone()));
        }
    }

    fs::create_dir_all(&config.output_dir)?;

    let mut written = Vec::with_capacity(targets.len());
    for (index, path) in targets {
        debug!("writing part {} ({} bytes) to {}", index, parts[index].len(), path.display());
        create_output(&path, config.overwrite)?.write_all(parts[index])?;
        written.push(path);
    }

    info!("extracted {} part(s) to {}", written.len(), config.output_dir.display());
    Ok(written)
}

/// Open `path` for writing; without `overwrite` an existing file is an error
fn create_output(path: &Path, overwrite: bool) -> Result<File> {
    OpenOptions::new()
        .write(true)
        .create_new(!overwrite)
        .create(overwrite)
        .truncate(overwrite)
        .open(path)
        .map_err(|err| match err.kind() {
            ErrorKind::AlreadyExists => DumpImageError::OutputExists(path.to_path_buf()),
            _ => err.into(),
        })
}
