//! Image loading and normalization
//!
//! Decodes uploaded bytes into an RGB buffer and bounds its dimensions
//! before the filter pipeline runs.

use image::imageops::FilterType;
use image::RgbImage;

/// User-facing message for undecodable or zero-area input.
pub const LOAD_FAILURE_MESSAGE: &str = "画像の読み込みに失敗しました";

/// Decode arbitrary image bytes (PNG/JPEG/WEBP container) into an RGB buffer.
///
/// The container format is sniffed from the content, not a filename.
/// Fails when the bytes are not a decodable image or decode to zero area.
pub fn load_rgb(bytes: &[u8]) -> Result<RgbImage, String> {
    let decoded = image::load_from_memory(bytes).map_err(|_| LOAD_FAILURE_MESSAGE.to_string())?;
    let rgb = decoded.to_rgb8();

    if rgb.width() == 0 || rgb.height() == 0 {
        return Err(LOAD_FAILURE_MESSAGE.to_string());
    }

    Ok(rgb)
}

/// Downscale proportionally when the longer side exceeds `max_dim`.
///
/// Uses Lanczos3 resampling and preserves aspect ratio. Images already
/// within bounds are returned unchanged.
pub fn resize_if_needed(img: RgbImage, max_dim: u32) -> RgbImage {
    let (width, height) = img.dimensions();
    let longest = width.max(height);

    if longest <= max_dim {
        return img;
    }

    let scale = max_dim as f64 / longest as f64;
    let new_width = ((width as f64 * scale) as u32).max(1);
    let new_height = ((height as f64 * scale) as u32).max(1);

    image::imageops::resize(&img, new_width, new_height, FilterType::Lanczos3)
}
