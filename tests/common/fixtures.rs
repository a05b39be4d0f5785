//! Test fixture helpers.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use image::{DynamicImage, ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};

use stickers::record::StickerRecord;

/// The record from the three-sticker reference scenario.
#[must_use]
pub fn acme() -> StickerRecord {
    StickerRecord::new("Acme", "Widget", "Blue widget", "01-2026-0001", "10")
}

/// `count` distinct records; customer names are `Customer {i}`.
#[must_use]
pub fn sample_records(count: usize) -> Vec<StickerRecord> {
    (0..count)
        .map(|i| {
            StickerRecord::new(
                format!("Customer {i}"),
                "Resin",
                format!("Batch {i}"),
                format!("LAB-2026-{:06}", i + 1),
                format!("{} pcs", i + 1),
            )
        })
        .collect()
}

/// Solid-color PNG bytes.
#[must_use]
pub fn png_logo(width: u32, height: u32, color: [u8; 3]) -> Vec<u8> {
    let img = RgbImage::from_pixel(width, height, Rgb(color));
    encode(&DynamicImage::ImageRgb8(img), ImageFormat::Png)
}

/// Half-transparent PNG bytes.
#[must_use]
pub fn translucent_png(width: u32, height: u32) -> Vec<u8> {
    let img = RgbaImage::from_pixel(width, height, Rgba([0, 0, 255, 128]));
    encode(&DynamicImage::ImageRgba8(img), ImageFormat::Png)
}

/// Solid-color JPEG bytes.
#[must_use]
pub fn jpeg_logo(width: u32, height: u32) -> Vec<u8> {
    let img = RgbImage::from_pixel(width, height, Rgb([200, 30, 30]));
    encode(&DynamicImage::ImageRgb8(img), ImageFormat::Jpeg)
}

fn encode(img: &DynamicImage, format: ImageFormat) -> Vec<u8> {
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, format).expect("encode test image");
    buf.into_inner()
}

/// Write `content` to `dir/name` and return the path.
pub fn write_file(dir: &Path, name: &str, content: impl AsRef<[u8]>) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).expect("write fixture file");
    path
}
