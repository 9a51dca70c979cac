//! Helpers shared by the integration tests
#![allow(dead_code)]

use dumpimage::{IH_HEADER_SIZE, IH_MAGIC, IH_NMLEN, ImageHeader};

/// Serialize a header in the on-disk layout
pub fn encode_header(header: &ImageHeader) -> Vec<u8> {
    let mut out = Vec::with_capacity(IH_HEADER_SIZE);
    for word in [
        header.magic,
        header.hcrc,
        header.time,
        header.size,
        header.load,
        header.ep,
        header.dcrc,
    ] {
        out.extend_from_slice(&word.to_be_bytes());
    }
    out.extend_from_slice(&[header.os, header.arch, header.type_, header.comp]);
    let mut name = [0u8; IH_NMLEN];
    name[..header.name.len()].copy_from_slice(header.name.as_bytes());
    out.extend_from_slice(&name);
    out
}

pub fn header(type_: u8, comp: u8, name: &str) -> ImageHeader {
    ImageHeader {
        magic: IH_MAGIC,
        hcrc: 0,
        time: 1_700_000_000,
        size: 0,
        load: 0x8000_0000,
        ep: 0x8000_0000,
        dcrc: 0,
        os: 5,
        arch: 2,
        type_,
        comp,
        name: name.to_string(),
    }
}

/// Single payload image
pub fn single_image(comp: u8, payload: &[u8]) -> Vec<u8> {
    let mut header = header(2, comp, "kernel");
    header.size = payload.len() as u32;
    let mut data = encode_header(&header);
    data.extend_from_slice(payload);
    data
}

/// Multi-file image with the usual 4-byte padding between parts
pub fn multi_image(comp: u8, parts: &[&[u8]]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(&(part.len() as u32).to_be_bytes());
    }
    body.extend_from_slice(&0u32.to_be_bytes());
    for part in parts {
        body.extend_from_slice(part);
        while body.len() % 4 != 0 {
            body.push(0);
        }
    }

    let mut header = header(4, comp, "multi");
    header.size = body.len() as u32;
    let mut data = encode_header(&header);
    data.extend_from_slice(&body);
    data
}
