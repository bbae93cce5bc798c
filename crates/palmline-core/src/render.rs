//! Overlay rendering and PNG encoding
//!
//! Builds the two visualization images: the edge overlay blended onto
//! the source photo, and the standalone edge display. Both are encoded
//! as PNG data URIs.

use crate::presets::PipelinePreset;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use image::{GrayImage, Rgb, RgbImage};
use std::io::Cursor;

/// Blend a solid line color, masked by the edge map, onto the source.
///
/// Foreground edge pixels contribute the preset's line color, the rest
/// black; the composite is alpha-blended over the source at the
/// preset's overlay opacity.
pub fn create_visualization(
    img: &RgbImage,
    edges: &GrayImage,
    preset: &PipelinePreset,
) -> Result<RgbImage, String> {
    if img.dimensions() != edges.dimensions() {
        return Err(format!(
            "Edge map {}x{} does not match source {}x{}",
            edges.width(),
            edges.height(),
            img.width(),
            img.height()
        ));
    }

    let alpha = preset.overlay_opacity;
    let mut out = RgbImage::new(img.width(), img.height());
    for (x, y, pixel) in out.enumerate_pixels_mut() {
        let source = img.get_pixel(x, y).0;
        let overlay = if edges.get_pixel(x, y).0[0] > 0 {
            preset.line_color
        } else {
            [0, 0, 0]
        };

        let mut blended = [0u8; 3];
        for c in 0..3 {
            let value = source[c] as f32 * (1.0 - alpha) + overlay[c] as f32 * alpha;
            blended[c] = value.round().clamp(0.0, 255.0) as u8;
        }
        *pixel = Rgb(blended);
    }

    Ok(out)
}

/// Render the edge map alone: bright line color on a dark background.
pub fn edges_display(edges: &GrayImage, preset: &PipelinePreset) -> RgbImage {
    let mut out = RgbImage::new(edges.width(), edges.height());
    for (x, y, pixel) in out.enumerate_pixels_mut() {
        *pixel = if edges.get_pixel(x, y).0[0] > 0 {
            Rgb(preset.edge_display_color)
        } else {
            Rgb(preset.edge_display_background)
        };
    }
    out
}

/// Encode an RGB buffer as an in-memory PNG.
pub fn encode_png(img: &RgbImage) -> Result<Vec<u8>, String> {
    let mut buffer = Cursor::new(Vec::new());
    img.write_to(&mut buffer, image::ImageFormat::Png)
        .map_err(|e| format!("Failed to encode PNG: {}", e))?;
    Ok(buffer.into_inner())
}

/// Encode an RGB buffer as a base64 PNG data URI.
pub fn png_data_uri(img: &RgbImage) -> Result<String, String> {
    Ok(format!(
        "data:image/png;base64,{}",
        STANDARD.encode(encode_png(img)?)
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presets;
    use image::Luma;

    #[test]
    fn test_visualization_blends_line_color() {
        let preset = presets::standard();
        let img = RgbImage::from_pixel(4, 4, Rgb([100, 100, 100]));
        let mut edges = GrayImage::new(4, 4);
        edges.put_pixel(1, 1, Luma([255]));

        let result = create_visualization(&img, &edges, &preset).unwrap();

        // Background pixel: source dimmed by (1 - 0.78)
        assert_eq!(result.get_pixel(0, 0).0, [22, 22, 22]);
        // Edge pixel: blend of source and cyan line color
        let edge_pixel = result.get_pixel(1, 1).0;
        assert_eq!(edge_pixel, [22, 221, 194]);
    }

    #[test]
    fn test_visualization_rejects_dimension_mismatch() {
        let preset = presets::standard();
        let img = RgbImage::new(4, 4);
        let edges = GrayImage::new(5, 4);
        assert!(create_visualization(&img, &edges, &preset).is_err());
    }

    #[test]
    fn test_edges_display_uses_preset_colors() {
        let preset = presets::standard();
        let mut edges = GrayImage::new(2, 1);
        edges.put_pixel(0, 0, Luma([255]));

        let display = edges_display(&edges, &preset);
        assert_eq!(display.get_pixel(0, 0).0, preset.edge_display_color);
        assert_eq!(display.get_pixel(1, 0).0, preset.edge_display_background);
    }

    #[test]
    fn test_png_data_uri_shape() {
        let img = RgbImage::from_pixel(2, 2, Rgb([1, 2, 3]));
        let uri = png_data_uri(&img).unwrap();
        assert!(uri.starts_with("data:image/png;base64,"));

        // Decoding the payload reproduces the image
        let payload = uri.strip_prefix("data:image/png;base64,").unwrap();
        let bytes = STANDARD.decode(payload).unwrap();
        let decoded = crate::decoders::load_rgb(&bytes).unwrap();
        assert_eq!(decoded, img);
    }
}
