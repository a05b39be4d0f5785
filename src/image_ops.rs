//! Logo image processing.
//!
//! Logos arrive as arbitrary raster bytes. They are decoded, flattened onto an
//! opaque white background, bounded in size and re-encoded as baseline JPEG,
//! which PDF viewers decode natively through `/DCTDecode`.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ExtendedColorType, GenericImageView, ImageEncoder, Rgb, RgbImage};
use tracing::{debug, trace};

use crate::error::{Result, StickerError};

/// JPEG quality for embedded logos.
pub const LOGO_JPEG_QUALITY: u8 = 90;

/// Logos larger than this multiple of the drawn box are downscaled first.
pub const LOGO_OVERSAMPLE: f32 = 4.0;

/// A logo ready for embedding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogoImage {
    pub width: u32,
    pub height: u32,
    /// Baseline JPEG, three 8-bit channels.
    pub jpeg: Vec<u8>,
}

/// Decode, flatten and re-encode a logo for the sticker at `index`.
///
/// `box_width`/`box_height` are the drawn size in points; pixel data beyond
/// [`LOGO_OVERSAMPLE`] times that size is discarded.
///
/// # Errors
///
/// Returns [`StickerError::ImageDecode`] if the bytes are not a decodable image.
pub fn prepare_logo(bytes: &[u8], index: usize, box_width: f32, box_height: f32) -> Result<LogoImage> {
    let img = image::load_from_memory(bytes).map_err(|e| StickerError::ImageDecode {
        index,
        reason: e.to_string(),
    })?;

    let (w, h) = img.dimensions();
    if w == 0 || h == 0 {
        return Err(StickerError::ImageDecode {
            index,
            reason: "image has no pixels".to_string(),
        });
    }
    trace!(index, width = w, height = h, "Decoded logo");

    let max_w = (box_width * LOGO_OVERSAMPLE).ceil().max(1.0) as u32;
    let max_h = (box_height * LOGO_OVERSAMPLE).ceil().max(1.0) as u32;
    let img = if w > max_w || h > max_h {
        // resize() keeps the aspect ratio and fits within bounds
        let resized = img.resize(max_w, max_h, image::imageops::FilterType::Lanczos3);
        debug!(
            index,
            from = %format!("{w}x{h}"),
            to = %format!("{}x{}", resized.width(), resized.height()),
            "Downscaled oversized logo"
        );
        resized
    } else {
        img
    };

    let rgb = flatten_alpha(&img);
    let jpeg = encode_jpeg(&rgb)?;
    Ok(LogoImage {
        width: rgb.width(),
        height: rgb.height(),
        jpeg,
    })
}

/// Composite the image over opaque white and drop the alpha channel.
pub fn flatten_alpha(img: &DynamicImage) -> RgbImage {
    let rgba = img.to_rgba8();
    let (w, h) = rgba.dimensions();
    let mut out = RgbImage::new(w, h);
    for (x, y, px) in rgba.enumerate_pixels() {
        let [r, g, b, a] = px.0;
        let a = u16::from(a);
        let blend = |c: u8| ((u16::from(c) * a + 255 * (255 - a) + 127) / 255) as u8;
        out.put_pixel(x, y, Rgb([blend(r), blend(g), blend(b)]));
    }
    out
}

fn encode_jpeg(rgb: &RgbImage) -> Result<Vec<u8>> {
    let mut buf = Cursor::new(Vec::new());
    JpegEncoder::new_with_quality(&mut buf, LOGO_JPEG_QUALITY)
        .write_image(rgb.as_raw(), rgb.width(), rgb.height(), ExtendedColorType::Rgb8)
        .map_err(|e| StickerError::ImageEncode(e.to_string()))?;
    Ok(buf.into_inner())
}
