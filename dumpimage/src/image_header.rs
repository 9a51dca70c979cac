//! U-Boot legacy image header decoding

use crate::error::{DumpImageError, Result};
use crate::image_types::{
    Arch, Compression, ImageType, OsType, arch_name, comp_name, os_name, type_name,
};
use crate::{IH_HEADER_SIZE, IH_MAGIC};
use byteorder::{BigEndian, ReadBytesExt};
use chrono::{DateTime, Utc};
use std::borrow::Cow;
use std::io::{Cursor, Read};

/// Maximum length of image name
pub const IH_NMLEN: usize = 32;

/// U-Boot legacy image header
///
/// All integers are stored big-endian on disk. The four code fields keep
/// the raw byte so that unknown values survive decoding untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageHeader {
    /// Magic number, `IH_MAGIC` for well-formed images
    pub magic: u32,
    /// Header CRC32 (not verified)
    pub hcrc: u32,
    /// Creation time, seconds since the Unix epoch
    pub time: u32,
    /// Size of the image data, header excluded
    pub size: u32,
    /// Load address of the image
    pub load: u32,
    /// Entry point address
    pub ep: u32,
    /// Data CRC32 (not verified)
    pub dcrc: u32,
    /// Operating system code
    pub os: u8,
    /// CPU architecture code
    pub arch: u8,
    /// Image type code
    pub type_: u8,
    /// Compression code
    pub comp: u8,
    /// Image name with trailing NUL padding removed
    pub name: String,
}

impl ImageHeader {
    /// Decode a header from the start of `data`
    ///
    /// Only the first `IH_HEADER_SIZE` bytes are read. The magic number is
    /// not checked here, so headers of corrupt images can still be
    /// inspected; call [`ImageHeader::check_magic`] before trusting the
    /// payload layout.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        if data.len() < IH_HEADER_SIZE {
            return Err(DumpImageError::truncated(
                "image header",
                IH_HEADER_SIZE as u64,
                data.len(),
            ));
        }

        let mut cursor = Cursor::new(data);

        let magic = cursor.read_u32::<BigEndian>()?;
        let hcrc = cursor.read_u32::<BigEndian>()?;
        let time = cursor.read_u32::<BigEndian>()?;
        let size = cursor.read_u32::<BigEndian>()?;
        let load = cursor.read_u32::<BigEndian>()?;
        let ep = cursor.read_u32::<BigEndian>()?;
        let dcrc = cursor.read_u32::<BigEndian>()?;

        let os = cursor.read_u8()?;
        let arch = cursor.read_u8()?;
        let type_ = cursor.read_u8()?;
        let comp = cursor.read_u8()?;

        let mut name_bytes = [0u8; IH_NMLEN];
        cursor.read_exact(&mut name_bytes)?;
        let name = decode_name(&name_bytes)?;

        Ok(Self {
            magic,
            hcrc,
            time,
            size,
            load,
            ep,
            dcrc,
            os,
            arch,
            type_,
            comp,
            name,
        })
    }

    /// Whether the magic number identifies a legacy image
    pub fn check_magic(&self) -> bool {
        self.magic == IH_MAGIC
    }

    /// Like [`ImageHeader::check_magic`], but as an error for `?` callers
    pub fn validate(&self) -> Result<()> {
        if !self.check_magic() {
            return Err(DumpImageError::bad_magic(IH_MAGIC, self.magic));
        }
        Ok(())
    }

    pub fn is_multi(&self) -> bool {
        self.type_ == ImageType::Multi as u8
    }

    pub fn os_name(&self) -> Cow<'static, str> {
        os_name(self.os)
    }

    pub fn arch_name(&self) -> Cow<'static, str> {
        arch_name(self.arch)
    }

    pub fn type_name(&self) -> Cow<'static, str> {
        type_name(self.type_)
    }

    pub fn comp_name(&self) -> Cow<'static, str> {
        comp_name(self.comp)
    }

    pub fn os_type(&self) -> Option<OsType> {
        OsType::try_from(self.os).ok()
    }

    pub fn arch_type(&self) -> Option<Arch> {
        Arch::try_from(self.arch).ok()
    }

    pub fn image_type(&self) -> Option<ImageType> {
        ImageType::try_from(self.type_).ok()
    }

    pub fn compression(&self) -> Option<Compression> {
        Compression::try_from(self.comp).ok()
    }

    /// Get the creation time as a DateTime
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(i64::from(self.time), 0)
    }

    /// Header plus declared data size
    pub fn total_size(&self) -> u64 {
        IH_HEADER_SIZE as u64 + u64::from(self.size)
    }
}

/// Strip the NUL padding from the end of the name field and decode the rest
fn decode_name(raw: &[u8]) -> Result<String> {
    let len = raw.iter().rposition(|&b| b != 0).map_or(0, |last| last + 1);
    let name = std::str::from_utf8(&raw[..len])?;
    Ok(name.to_owned())
}
