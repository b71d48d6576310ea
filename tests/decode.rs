extern crate icogen;

use icogen::{ClipboardArt, IconDir, Image, PixelFormat};
use std::io::Cursor;

//===========================================================================//

#[test]
fn round_trip_multi_size_clipboard() {
    let sizes = [16, 32, 48];
    let images: Vec<Image> = sizes
        .iter()
        .map(|&size| {
            ClipboardArt::Scaled.render(size, PixelFormat::Rgba).unwrap()
        })
        .collect();
    let output = icogen::encode(&images).unwrap();
    let icondir = IconDir::read(Cursor::new(&output)).unwrap();
    assert_eq!(icondir.entries().len(), sizes.len());
    for (entry, image) in icondir.entries().iter().zip(images.iter()) {
        assert_eq!(entry.width(), image.width());
        assert_eq!(entry.height(), image.height());
        assert_eq!(entry.bits_per_pixel(), 32);
        assert_eq!(&entry.decode().unwrap(), image);
    }
}

#[test]
fn round_trip_grid_clipboard_at_24_bpp() {
    let image = ClipboardArt::Grid.render(32, PixelFormat::Rgb).unwrap();
    let output = icogen::encode(&[image.clone()]).unwrap();
    let icondir = IconDir::read(Cursor::new(&output)).unwrap();
    let entry = &icondir.entries()[0];
    assert_eq!(entry.bits_per_pixel(), 24);
    let decoded = entry.decode().unwrap();
    assert_eq!(decoded.format(), PixelFormat::Rgb);
    assert_eq!(decoded, image);
    // The clip, near the top of the image, must come back near the top.
    assert_eq!(decoded.pixel(16, 8), [70, 70, 75, 255]);
}

#[test]
fn round_trip_odd_sizes() {
    let mut images = Vec::new();
    for &(width, height) in &[(1, 1), (3, 5), (7, 2), (31, 33), (256, 3)] {
        images.push(
            Image::from_fn(width, height, PixelFormat::Rgb, |x, y| {
                [(x * 7) as u8, (y * 13) as u8, (x ^ y) as u8, 255]
            })
            .unwrap(),
        );
        images.push(
            Image::from_fn(width, height, PixelFormat::Rgba, |x, y| {
                [(y * 3) as u8, (x * 5) as u8, 0x5a, (x + y) as u8]
            })
            .unwrap(),
        );
    }
    let output = icogen::encode(&images).unwrap();
    let icondir = IconDir::read(Cursor::new(&output)).unwrap();
    let decoded: Vec<Image> = icondir
        .entries()
        .iter()
        .map(|entry| entry.decode().unwrap())
        .collect();
    assert_eq!(decoded, images);
    // Width 256 is stored as a zero byte but recovered from the BMP header.
    assert_eq!(icondir.entries()[8].width(), 256);
}

#[test]
fn write_and_read_file() {
    let image = ClipboardArt::Scaled.render(16, PixelFormat::Rgba).unwrap();
    let icondir = IconDir::from_images(&[image.clone()]).unwrap();
    let path = std::env::temp_dir()
        .join(format!("icogen-decode-test-{}.ico", std::process::id()));
    icondir.write(std::fs::File::create(&path).unwrap()).unwrap();
    let bytes = std::fs::read(&path).unwrap();
    let icondir = IconDir::read(std::fs::File::open(&path).unwrap()).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert_eq!(bytes, icogen::encode(&[image.clone()]).unwrap());
    assert_eq!(icondir.entries()[0].decode().unwrap(), image);
}

#[test]
fn read_rejects_truncated_file() {
    let image = ClipboardArt::Scaled.render(16, PixelFormat::Rgba).unwrap();
    let output = icogen::encode(&[image]).unwrap();
    let truncated = &output[..output.len() - 1];
    assert!(IconDir::read(Cursor::new(truncated)).is_err());
}

//===========================================================================//
