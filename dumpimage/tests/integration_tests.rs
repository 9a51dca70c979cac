//! Integration tests for dumpimage

mod common;

use common::{encode_header, header, multi_image, single_image};
use dumpimage::{
    DumpImageError, ExtractConfig, IH_HEADER_SIZE, ImageHeader, LegacyImage, split_ranges,
    write_parts,
};
use std::fs;
use tempfile::TempDir;

/// Test parsing a plain kernel image
#[test]
fn test_single_image() {
    let data = single_image(1, b"compressed kernel");
    let image = LegacyImage::parse_checked(&data).unwrap();

    assert_eq!(image.header().name, "kernel");
    assert_eq!(image.header().os_name(), "Linux");
    assert_eq!(image.header().arch_name(), "ARM");
    assert_eq!(image.header().type_name(), "Kernel Image");
    assert_eq!(image.parts(), &[&b"compressed kernel"[..]]);
    assert_eq!(image.part_file_name(0), "part_00.gz");
}

/// Test a kernel + ramdisk + device tree bundle
#[test]
fn test_multi_image() {
    let kernel = vec![0x11u8; 1001];
    let ramdisk = vec![0x22u8; 514];
    let fdt = vec![0x33u8; 64];
    let data = multi_image(0, &[&kernel[..], &ramdisk[..], &fdt[..]]);

    let image = LegacyImage::parse_checked(&data).unwrap();
    assert_eq!(image.parts().len(), 3);
    assert_eq!(image.parts()[0], &kernel[..]);
    assert_eq!(image.parts()[1], &ramdisk[..]);
    assert_eq!(image.parts()[2], &fdt[..]);
}

/// The size table layout from the format description
#[test]
fn test_multi_image_consumption() {
    let data = multi_image(0, &[&[0xaa; 10][..], &[0xbb; 3][..]]);
    let header = ImageHeader::from_bytes(&data).unwrap();
    let layout = split_ranges(&data, &header, IH_HEADER_SIZE).unwrap();

    assert_eq!(layout.ranges.len(), 2);
    assert_eq!(layout.ranges[0].len(), 10);
    assert_eq!(layout.ranges[1].len(), 3);
    assert_eq!(layout.end - IH_HEADER_SIZE, 12 + 12 + 4);
    assert_eq!(layout.end, data.len());
}

#[test]
fn test_empty_multi_image() {
    let data = multi_image(0, &[]);
    let image = LegacyImage::parse(&data).unwrap();
    assert!(image.parts().is_empty());
    assert_eq!(image.info().parts, 0);
}

#[test]
fn test_short_buffer() {
    for len in [0, 10, 43, 44, 63] {
        let err = ImageHeader::from_bytes(&vec![0u8; len]).unwrap_err();
        assert!(matches!(err, DumpImageError::TruncatedInput { .. }), "length {len}");
    }
}

#[test]
fn test_truncated_payload() {
    let mut data = single_image(0, &[7u8; 32]);
    data.truncate(data.len() - 1);
    let err = LegacyImage::parse(&data).unwrap_err();
    assert!(err.is_truncated());
}

/// A wrong magic number does not stop decoding
#[test]
fn test_bad_magic_is_advisory() {
    let mut corrupt = header(2, 0, "corrupt");
    corrupt.magic = 0xd00d_feed;
    let data = encode_header(&corrupt);

    let parsed = ImageHeader::from_bytes(&data).unwrap();
    assert_eq!(parsed.magic, 0xd00d_feed);
    assert!(!parsed.check_magic());

    let image = LegacyImage::parse(&data).unwrap();
    assert!(!image.check_magic());
    assert!(matches!(
        LegacyImage::parse_checked(&data),
        Err(DumpImageError::BadMagic { found: 0xd00d_feed, .. })
    ));
}

/// Unknown code bytes render as placeholders
#[test]
fn test_unknown_codes() {
    let mut odd = header(2, 0, "odd");
    odd.os = 99;
    odd.arch = 200;
    odd.comp = 42;
    let data = encode_header(&odd);

    let image = LegacyImage::parse(&data).unwrap();
    let info = image.info();
    assert_eq!(info.os, "unsupported code 0x63");
    assert_eq!(info.arch, "unsupported code 0xc8");
    assert_eq!(info.compression, "unsupported code 0x2a");
    assert_eq!(image.part_file_name(0), "part_00.bin");
}

/// Test extracting all parts to a directory
#[test]
fn test_write_parts() {
    let dir = TempDir::new().unwrap();
    let data = multi_image(3, &[&b"first"[..], &b"second"[..]]);
    let image = LegacyImage::parse(&data).unwrap();

    let config = ExtractConfig {
        output_dir: dir.path().join("out"),
        ..ExtractConfig::default()
    };
    let written = write_parts(&image, &config, None).unwrap();

    assert_eq!(written.len(), 2);
    assert!(written[0].ends_with("part_00.lzma"));
    assert!(written[1].ends_with("part_01.lzma"));
    assert_eq!(fs::read(&written[0]).unwrap(), b"first");
    assert_eq!(fs::read(&written[1]).unwrap(), b"second");
}

#[test]
fn test_write_single_part() {
    let dir = TempDir::new().unwrap();
    let data = multi_image(0, &[&b"a"[..], &b"b"[..], &b"c"[..]]);
    let image = LegacyImage::parse(&data).unwrap();

    let config = ExtractConfig {
        output_dir: dir.path().to_path_buf(),
        prefix: "img".to_string(),
        ..ExtractConfig::default()
    };
    let written = write_parts(&image, &config, Some(2)).unwrap();
    assert_eq!(written, vec![dir.path().join("img_02.dat")]);
    assert_eq!(fs::read(&written[0]).unwrap(), b"c");

    let err = write_parts(&image, &config, Some(3)).unwrap_err();
    assert!(matches!(err, DumpImageError::PartOutOfRange { index: 3, count: 3 }));
}

#[test]
fn test_write_parts_respects_overwrite() {
    let dir = TempDir::new().unwrap();
    let data = single_image(0, b"new");
    let image = LegacyImage::parse(&data).unwrap();
    let existing = dir.path().join("part_00.dat");
    fs::write(&existing, b"old").unwrap();

    let mut config = ExtractConfig {
        output_dir: dir.path().to_path_buf(),
        ..ExtractConfig::default()
    };
    let err = write_parts(&image, &config, None).unwrap_err();
    assert!(matches!(err, DumpImageError::OutputExists(_)));
    assert_eq!(fs::read(&existing).unwrap(), b"old");

    config.overwrite = true;
    write_parts(&image, &config, None).unwrap();
    assert_eq!(fs::read(&existing).unwrap(), b"new");
}

/// A clash on any part aborts before the first file is written
#[test]
fn test_write_parts_refusal_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let data = multi_image(0, &[&b"one"[..], &b"two"[..], &b"three"[..]]);
    let image = LegacyImage::parse(&data).unwrap();
    let existing = dir.path().join("part_01.dat");
    fs::write(&existing, b"old").unwrap();

    let config = ExtractConfig {
        output_dir: dir.path().to_path_buf(),
        ..ExtractConfig::default()
    };
    let err = write_parts(&image, &config, None).unwrap_err();
    match err {
        DumpImageError::OutputExists(path) => assert_eq!(path, existing),
        other => panic!("unexpected error: {other}"),
    }

    assert!(!dir.path().join("part_00.dat").exists());
    assert!(!dir.path().join("part_02.dat").exists());
    assert_eq!(fs::read(&existing).unwrap(), b"old");
}

/// Overwriting a longer file leaves no stale tail behind
#[test]
fn test_write_parts_overwrite_truncates() {
    let dir = TempDir::new().unwrap();
    let data = single_image(0, b"new");
    let image = LegacyImage::parse(&data).unwrap();
    let existing = dir.path().join("part_00.dat");
    fs::write(&existing, b"much older content").unwrap();

    let config = ExtractConfig {
        output_dir: dir.path().to_path_buf(),
        overwrite: true,
        ..ExtractConfig::default()
    };
    write_parts(&image, &config, None).unwrap();
    assert_eq!(fs::read(&existing).unwrap(), b"new");
}

/// Parsing only reads, so one buffer can be shared between threads
#[test]
fn test_parse_from_threads() {
    let data = multi_image(0, &[&b"left"[..], &b"right"[..]]);
    let data = &data;
    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(move || LegacyImage::parse(data).unwrap().parts().len()))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), 2);
        }
    });
}
