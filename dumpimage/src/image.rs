//! A decoded legacy image: header plus borrowed payloads

use crate::error::Result;
use crate::extract::{DEFAULT_PREFIX, part_file_name};
use crate::image_header::ImageHeader;
use crate::payload;
use crate::IH_HEADER_SIZE;
use byte_unit::{Byte, UnitType};
use serde::Serialize;
use std::fmt::Write;

/// Header and payload views of one image buffer
///
/// The payloads borrow from the buffer passed to [`LegacyImage::parse`],
/// nothing is copied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegacyImage<'a> {
    header: ImageHeader,
    parts: Vec<&'a [u8]>,
}

/// Flat, printable summary of an image header
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageInfo {
    pub magic: u32,
    pub header_crc: u32,
    pub time: u32,
    pub size: u32,
    pub load_address: u32,
    pub entry_point: u32,
    pub data_crc: u32,
    pub os: String,
    pub arch: String,
    pub image_type: String,
    pub compression: String,
    pub name: String,
    pub parts: usize,
    pub part_sizes: Vec<usize>,
}

impl<'a> LegacyImage<'a> {
    /// Decode the header and split the payloads
    ///
    /// The magic number is not enforced; see [`LegacyImage::parse_checked`].
    pub fn parse(data: &'a [u8]) -> Result<Self> {
        let header = ImageHeader::from_bytes(data)?;
        Self::with_header(data, header)
    }

    /// Like [`LegacyImage::parse`], but rejects a bad magic number
    pub fn parse_checked(data: &'a [u8]) -> Result<Self> {
        let header = ImageHeader::from_bytes(data)?;
        header.validate()?;
        Self::with_header(data, header)
    }

    /// Split the payloads of `data` using an already decoded header
    pub fn with_header(data: &'a [u8], header: ImageHeader) -> Result<Self> {
        let parts = payload::split(data, &header, IH_HEADER_SIZE)?;
        Ok(Self { header, parts })
    }

    pub fn header(&self) -> &ImageHeader {
        &self.header
    }

    pub fn parts(&self) -> &[&'a [u8]] {
        &self.parts
    }

    pub fn check_magic(&self) -> bool {
        self.header.check_magic()
    }

    /// Default output file name for part `index`, e.g. `part_00.gz`
    pub fn part_file_name(&self, index: usize) -> String {
        part_file_name(DEFAULT_PREFIX, index, self.header.comp)
    }

    pub fn info(&self) -> ImageInfo {
        let header = &self.header;
        ImageInfo {
            magic: header.magic,
            header_crc: header.hcrc,
            time: header.time,
            size: header.size,
            load_address: header.load,
            entry_point: header.ep,
            data_crc: header.dcrc,
            os: header.os_name().into_owned(),
            arch: header.arch_name().into_owned(),
            image_type: header.type_name().into_owned(),
            compression: header.comp_name().into_owned(),
            name: header.name.clone(),
            parts: self.parts.len(),
            part_sizes: self.parts.iter().map(|part| part.len()).collect(),
        }
    }

    /// Multi-line description in the layout U-Boot prints for `iminfo`
    pub fn summary(&self) -> String {
        let header = &self.header;
        let created = header
            .timestamp()
            .map(|t| t.format("%Y-%m-%d  %H:%M:%S UTC").to_string())
            .unwrap_or_else(|| "-".to_string());

        let mut out = String::new();
        let _ = writeln!(out, "Image Name:   {}", header.name);
        let _ = writeln!(out, "Created:      {}", created);
        let _ = writeln!(
            out,
            "Image Type:   {} {} {} ({})",
            header.arch_name(),
            header.os_name(),
            header.type_name(),
            header.comp_name()
        );
        let _ = writeln!(out, "Data Size:    {}", format_size(u64::from(header.size)));
        let _ = writeln!(out, "Load Address: {:08x}", header.load);
        let _ = write!(out, "Entry Point:  {:08x}", header.ep);

        if header.is_multi() {
            let _ = write!(out, "\nContents:");
            for (index, part) in self.parts.iter().enumerate() {
                let _ = write!(
                    out,
                    "\n   Image {}: {}",
                    index,
                    format_size(part.len() as u64)
                );
            }
        }

        out
    }
}

/// `1234 Bytes = 1.21 KiB`
pub fn format_size(bytes: u64) -> String {
    let adjusted = Byte::from_u64(bytes).get_appropriate_unit(UnitType::Binary);
    format!("{} Bytes = {:.2}", bytes, adjusted)
}
