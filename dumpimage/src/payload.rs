//! Splitting the data area of an image into its payloads
//!
//! A plain image carries a single payload of `size` bytes right after the
//! header. A multi-file image starts its data area with a table of
//! big-endian `u32` sizes terminated by a zero word; the payloads follow
//! the table back to back, each one padded to a 4-byte boundary.

use crate::error::{DumpImageError, Result};
use crate::image_header::ImageHeader;
use byteorder::{BigEndian, ByteOrder};
use log::{debug, trace};
use std::ops::Range;

/// Width of one entry in the multi-image size table
const SIZE_WORD: usize = 4;

/// Byte ranges of the payloads inside an image buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayloadLayout {
    /// Payload ranges in image order, never including padding
    pub ranges: Vec<Range<usize>>,
    /// Offset one past the last consumed byte, padding included
    pub end: usize,
}

impl PayloadLayout {
    /// Borrow every payload from the buffer the layout was computed on
    pub fn slices<'a>(&self, data: &'a [u8]) -> Vec<&'a [u8]> {
        self.ranges.iter().map(|range| &data[range.clone()]).collect()
    }
}

/// Locate the payloads that follow a header ending at `header_end`
///
/// Fails with `TruncatedInput` when a declared payload (or the size table
/// of a multi-file image) runs past the end of `data`.
pub fn split_ranges(
    data: &[u8],
    header: &ImageHeader,
    header_end: usize,
) -> Result<PayloadLayout> {
    if header.is_multi() {
        split_multi(data, header_end)
    } else {
        split_single(data, header.size, header_end)
    }
}

/// Same as [`split_ranges`], returning views into `data`
pub fn split<'a>(
    data: &'a [u8],
    header: &ImageHeader,
    header_end: usize,
) -> Result<Vec<&'a [u8]>> {
    Ok(split_ranges(data, header, header_end)?.slices(data))
}

fn split_single(data: &[u8], size: u32, start: usize) -> Result<PayloadLayout> {
    let range = payload_range(data, start, size, "image data")?;
    debug!("single image: {} bytes at {:#x}", size, start);
    Ok(PayloadLayout {
        end: range.end,
        ranges: vec![range],
    })
}

fn split_multi(data: &[u8], start: usize) -> Result<PayloadLayout> {
    let (sizes, mut cursor) = read_size_table(data, start)?;
    debug!("multi-file image: {} parts, data starts at {:#x}", sizes.len(), cursor);

    let mut ranges = Vec::with_capacity(sizes.len());
    for (index, &size) in sizes.iter().enumerate() {
        let range = payload_range(data, cursor, size, "multi-file image part")?;
        trace!("part {}: {:#x}..{:#x}", index, range.start, range.end);
        // Padding is skipped after every part, the last one included.
        cursor = range.end + padding(size);
        ranges.push(range);
    }

    Ok(PayloadLayout { ranges, end: cursor })
}

/// Read the zero-terminated size table starting at `start`
///
/// Returns the non-zero sizes and the offset just past the terminator.
pub fn read_size_table(data: &[u8], start: usize) -> Result<(Vec<u32>, usize)> {
    let mut sizes = Vec::new();
    let mut offset = start;

    loop {
        let word = offset
            .checked_add(SIZE_WORD)
            .and_then(|end| data.get(offset..end))
            .ok_or_else(|| {
                DumpImageError::truncated(
                    "multi-file size table",
                    (offset as u64).saturating_add(SIZE_WORD as u64),
                    data.len(),
                )
            })?;
        offset += SIZE_WORD;

        match BigEndian::read_u32(word) {
            0 => break,
            size => sizes.push(size),
        }
    }

    Ok((sizes, offset))
}

fn payload_range(
    data: &[u8],
    start: usize,
    size: u32,
    context: &'static str,
) -> Result<Range<usize>> {
    start
        .checked_add(size as usize)
        .filter(|&end| end <= data.len())
        .map(|end| start..end)
        .ok_or_else(|| {
            DumpImageError::truncated(
                context,
                (start as u64).saturating_add(u64::from(size)),
                data.len(),
            )
        })
}

/// Bytes needed to bring `size` up to a multiple of four
fn padding(size: u32) -> usize {
    (SIZE_WORD - size as usize % SIZE_WORD) % SIZE_WORD
}
