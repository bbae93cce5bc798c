//! Edge extraction
//!
//! Runs the enhancement chain, then tries each candidate blur radius
//! and keeps the binarized result whose foreground count lands closest
//! to the preset's target line density. No single radius works across
//! lighting and skin-tone variation; the target-density rule is a cheap
//! proxy for "a plausible amount of detected line structure".

use crate::filters;
use crate::lighting;
use crate::presets::PipelinePreset;
use crate::verbose_println;
use image::{GrayImage, RgbImage};

/// Detect line-like edges in a palm photo.
///
/// Returns the winning binary edge map (same dimensions as the input)
/// together with the enhanced grayscale intermediate.
pub fn detect_palm_lines(
    img: &RgbImage,
    preset: &PipelinePreset,
) -> Result<(GrayImage, GrayImage), String> {
    if preset.blur_radii.is_empty() {
        return Err(format!("Preset '{}' defines no blur radii", preset.name));
    }

    let corrected;
    let source = if preset.lighting_stage {
        corrected = lighting::correct_lighting(img);
        &corrected
    } else {
        img
    };

    let mut enhanced = filters::to_luma(source);
    if preset.equalize {
        enhanced = filters::equalize(&enhanced);
    }
    enhanced = filters::enhance_contrast(&enhanced, preset.contrast_boost);
    enhanced = filters::enhance_sharpness(&enhanced, preset.sharpness_boost);
    if preset.edge_enhance {
        enhanced = filters::edge_enhance(&enhanced);
    }

    let mut best: Option<(GrayImage, u64, u32)> = None;
    for &radius in &preset.blur_radii {
        let binary = binarize_candidate(&enhanced, radius, preset);
        let count = filters::count_foreground(&binary);
        verbose_println!("[edges] radius={} foreground={}", radius, count);

        let distance = count.abs_diff(preset.target_density);
        let improves = match &best {
            None => true,
            // Strict comparison keeps the earliest radius on ties
            Some((_, best_count, _)) => distance < best_count.abs_diff(preset.target_density),
        };
        if improves {
            best = Some((binary, count, radius));
        }
    }

    // Non-empty radii guarantee a winner
    let (edge_map, count, radius) = best.ok_or_else(|| "No edge candidate produced".to_string())?;
    verbose_println!(
        "[edges] selected radius={} foreground={} target={}",
        radius,
        count,
        preset.target_density
    );

    Ok((edge_map, enhanced))
}

fn binarize_candidate(enhanced: &GrayImage, radius: u32, preset: &PipelinePreset) -> GrayImage {
    let blurred = filters::gaussian_blur(enhanced, radius as f32);
    let edges = filters::find_edges(&blurred);
    let boosted = filters::enhance_contrast(&edges, preset.edge_contrast);
    let mut binary = filters::threshold(&boosted, preset.binarize_threshold);
    if let Some(size) = preset.dilate_kernel {
        binary = filters::max_filter(&binary, size);
    }
    binary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presets;
    use image::Rgb;

    #[test]
    fn test_detect_preserves_dimensions() {
        let img = RgbImage::from_pixel(64, 48, Rgb([120, 110, 100]));
        let (edge_map, enhanced) = detect_palm_lines(&img, &presets::standard()).unwrap();
        assert_eq!(edge_map.dimensions(), (64, 48));
        assert_eq!(enhanced.dimensions(), (64, 48));
    }

    #[test]
    fn test_detect_produces_binary_map() {
        let mut img = RgbImage::from_pixel(64, 64, Rgb([140, 130, 120]));
        for x in 0..64 {
            img.put_pixel(x, 32, Rgb([30, 25, 20]));
        }
        let (edge_map, _) = detect_palm_lines(&img, &presets::standard()).unwrap();
        assert!(edge_map.pixels().all(|p| p.0[0] == 0 || p.0[0] == 255));
    }

    #[test]
    fn test_uniform_input_yields_empty_edge_map() {
        let img = RgbImage::from_pixel(100, 100, Rgb([128, 128, 128]));
        for preset in [presets::standard(), presets::compact()] {
            let (edge_map, _) = detect_palm_lines(&img, &preset).unwrap();
            assert_eq!(filters::count_foreground(&edge_map), 0, "{}", preset.name);
        }
    }

    #[test]
    fn test_detect_is_deterministic() {
        let mut img = RgbImage::from_pixel(80, 80, Rgb([150, 140, 130]));
        for i in 0..80 {
            img.put_pixel(i, i, Rgb([40, 40, 40]));
        }
        let first = detect_palm_lines(&img, &presets::compact()).unwrap().0;
        let second = detect_palm_lines(&img, &presets::compact()).unwrap().0;
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_radii_is_an_error() {
        let mut preset = presets::standard();
        preset.blur_radii.clear();
        let img = RgbImage::from_pixel(10, 10, Rgb([0, 0, 0]));
        assert!(detect_palm_lines(&img, &preset).is_err());
    }
}
