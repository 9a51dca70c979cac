//! Command line interface for dumpimage

use crate::config::ExtractConfig;
use crate::extract::write_parts;
use crate::image::LegacyImage;
use crate::image_header::ImageHeader;
use crate::{VERSION, logger};
use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use colored::Colorize;
use log::{debug, warn};
use std::fs;
use std::path::{Path, PathBuf};

/// Command line arguments for dumpimage
#[derive(Parser, Debug)]
#[command(name = "dumpimage")]
#[command(version = VERSION)]
#[command(about = "Inspect and unpack U-Boot legacy images", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet mode - only output errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the header of an image
    List(ListArgs),
    /// Write the parts of an image to files
    Extract(ExtractArgs),
}

/// Arguments for listing image information
#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Image file to examine
    pub image_file: PathBuf,

    /// Print in JSON format
    #[arg(long)]
    pub json: bool,

    /// Continue even if the magic number is wrong
    #[arg(long)]
    pub force: bool,
}

/// Arguments for extracting parts
#[derive(Parser, Debug)]
pub struct ExtractArgs {
    /// Image file to unpack
    pub image_file: PathBuf,

    /// Output directory (default: current directory)
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Only extract the part with this index
    #[arg(short, long)]
    pub part: Option<usize>,

    /// File name prefix for the parts
    #[arg(long)]
    pub prefix: Option<String>,

    /// Replace existing output files
    #[arg(long)]
    pub overwrite: bool,

    /// TOML file with extraction defaults
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Continue even if the magic number is wrong
    #[arg(long)]
    pub force: bool,
}

impl ExtractArgs {
    /// Config file values, overridden by whatever was given on the command line
    pub fn resolve_config(&self) -> Result<ExtractConfig> {
        let mut config = match &self.config {
            Some(path) => ExtractConfig::load(path)
                .with_context(|| format!("Failed to load config '{}'", path.display()))?,
            None => ExtractConfig::default(),
        };

        if let Some(dir) = &self.output_dir {
            config.output_dir = dir.clone();
        }
        if let Some(prefix) = &self.prefix {
            config.prefix = prefix.clone();
        }
        if self.overwrite {
            config.overwrite = true;
        }

        Ok(config)
    }
}

/// Main CLI handler
pub fn run_cli(args: Args) -> Result<()> {
    logger::init(logger::level_for(args.verbose, args.quiet));

    match args.command {
        Commands::List(list_args) => handle_list(list_args),
        Commands::Extract(extract_args) => handle_extract(extract_args, args.quiet),
    }
}

fn read_image(path: &Path) -> Result<Vec<u8>> {
    debug!("Reading image: {}", path.display());
    fs::read(path).with_context(|| format!("Failed to read image file '{}'", path.display()))
}

/// Decode and split, refusing a bad magic number unless forced
fn open_image(data: &[u8], force: bool) -> Result<LegacyImage<'_>> {
    let header = ImageHeader::from_bytes(data)?;
    if !header.check_magic() {
        if !force {
            bail!("bad magic number 0x{:08x}", header.magic);
        }
        warn!("bad magic number 0x{:08x}, continuing anyway", header.magic);
    }
    Ok(LegacyImage::with_header(data, header)?)
}

fn handle_list(args: ListArgs) -> Result<()> {
    let data = read_image(&args.image_file)?;
    let image = open_image(&data, args.force)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&image.info())?);
    } else {
        println!("{}", image.summary());
    }

    Ok(())
}

fn handle_extract(args: ExtractArgs, quiet: bool) -> Result<()> {
    let config = args.resolve_config()?;
    let data = read_image(&args.image_file)?;
    let image = open_image(&data, args.force)?;

    let written = write_parts(&image, &config, args.part)?;

    if !quiet {
        for path in &written {
            println!("{} {}", "extracted".green().bold(), path.display());
        }
    }

    Ok(())
}
