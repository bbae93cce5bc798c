//! Grayscale and RGB filter primitives
//!
//! The building blocks of the edge pipeline: luma conversion, histogram
//! equalization, contrast/sharpness enhancement, small-kernel
//! convolutions, Gaussian blur, binarization, and dilation. Every
//! function returns a new buffer; convolutions replicate edge pixels at
//! the borders.

use image::{GrayImage, Luma, RgbImage};

/// Pillow-compatible edge-enhance kernel (strong variant).
const EDGE_ENHANCE_KERNEL: [i32; 9] = [-1, -1, -1, -1, 9, -1, -1, -1, -1];

/// Gradient-magnitude ("find edges") kernel.
const FIND_EDGES_KERNEL: [i32; 9] = [-1, -1, -1, -1, 8, -1, -1, -1, -1];

/// 3x3 smoothing kernel used as the soft reference for sharpening.
const SMOOTH_KERNEL: [i32; 9] = [1, 1, 1, 1, 5, 1, 1, 1, 1];

/// Convert an RGB buffer to 8-bit luma (ITU-R 601 weights, 299/587/114).
pub fn to_luma(img: &RgbImage) -> GrayImage {
    let mut out = GrayImage::new(img.width(), img.height());
    for (src, dst) in img.pixels().zip(out.pixels_mut()) {
        let [r, g, b] = src.0;
        // Fixed-point 299/587/114 with rounding
        let luma = (r as u32 * 19595 + g as u32 * 38470 + b as u32 * 7471 + 0x8000) >> 16;
        dst.0[0] = luma as u8;
    }
    out
}

/// Mean pixel intensity of a grayscale buffer.
pub fn mean_intensity(gray: &GrayImage) -> f64 {
    let count = gray.width() as u64 * gray.height() as u64;
    if count == 0 {
        return 0.0;
    }
    let sum: u64 = gray.pixels().map(|p| p.0[0] as u64).sum();
    sum as f64 / count as f64
}

/// Count pixels with any foreground intensity (value > 0).
pub fn count_foreground(gray: &GrayImage) -> u64 {
    gray.pixels().filter(|p| p.0[0] > 0).count() as u64
}

/// Histogram equalization.
///
/// Follows the classic cumulative-step construction: images whose
/// histogram occupies a single bin are returned unchanged.
pub fn equalize(gray: &GrayImage) -> GrayImage {
    let mut histogram = [0u64; 256];
    for p in gray.pixels() {
        histogram[p.0[0] as usize] += 1;
    }

    let occupied: Vec<u64> = histogram.iter().copied().filter(|&c| c > 0).collect();
    if occupied.len() <= 1 {
        return gray.clone();
    }

    let total: u64 = occupied.iter().sum();
    let step = (total - occupied.last().copied().unwrap_or(0)) / 255;
    if step == 0 {
        return gray.clone();
    }

    let mut lut = [0u8; 256];
    let mut n = step / 2;
    for (i, entry) in lut.iter_mut().enumerate() {
        *entry = (n / step).min(255) as u8;
        n += histogram[i];
    }

    apply_lut(gray, &lut)
}

/// Contrast enhancement pivoted on the rounded mean intensity.
///
/// factor 1.0 is the identity; larger values push pixels away from the
/// mean, smaller values pull them toward it.
pub fn enhance_contrast(gray: &GrayImage, factor: f32) -> GrayImage {
    let mean = (mean_intensity(gray) + 0.5).floor() as f32;
    let mut out = gray.clone();
    for p in out.pixels_mut() {
        let value = mean + (p.0[0] as f32 - mean) * factor;
        p.0[0] = value.round().clamp(0.0, 255.0) as u8;
    }
    out
}

/// Sharpness enhancement: blend between a smoothed copy and the input.
///
/// factor 1.0 is the identity, 0.0 is fully smoothed, values above 1.0
/// overshoot the original against the smooth reference.
pub fn enhance_sharpness(gray: &GrayImage, factor: f32) -> GrayImage {
    let smooth = convolve3x3(gray, &SMOOTH_KERNEL, 13);
    let mut out = gray.clone();
    for (dst, soft) in out.pixels_mut().zip(smooth.pixels()) {
        let value = soft.0[0] as f32 + (dst.0[0] as f32 - soft.0[0] as f32) * factor;
        dst.0[0] = value.round().clamp(0.0, 255.0) as u8;
    }
    out
}

/// Edge-enhancing convolution (center 9, -1 ring).
pub fn edge_enhance(gray: &GrayImage) -> GrayImage {
    convolve3x3(gray, &EDGE_ENHANCE_KERNEL, 1)
}

/// Gradient-magnitude filter (center 8, -1 ring). Flat regions map to 0.
pub fn find_edges(gray: &GrayImage) -> GrayImage {
    convolve3x3(gray, &FIND_EDGES_KERNEL, 1)
}

/// Separable Gaussian blur with sigma equal to `radius`.
pub fn gaussian_blur(gray: &GrayImage, radius: f32) -> GrayImage {
    if radius <= 0.0 {
        return gray.clone();
    }

    let sigma = radius;
    let half = (sigma * 3.0).ceil().max(1.0) as i32;
    let mut weights = Vec::with_capacity((2 * half + 1) as usize);
    for i in -half..=half {
        weights.push((-((i * i) as f32) / (2.0 * sigma * sigma)).exp());
    }
    let sum: f32 = weights.iter().sum();
    for weight in weights.iter_mut() {
        *weight /= sum;
    }

    let (width, height) = gray.dimensions();

    // Horizontal pass into a float buffer to avoid double rounding
    let mut intermediate = vec![0.0f32; (width * height) as usize];
    for y in 0..height {
        for x in 0..width {
            let mut acc = 0.0;
            for (k, weight) in weights.iter().enumerate() {
                let sx = (x as i32 + k as i32 - half).clamp(0, width as i32 - 1) as u32;
                acc += weight * gray.get_pixel(sx, y).0[0] as f32;
            }
            intermediate[(y * width + x) as usize] = acc;
        }
    }

    // Vertical pass back to u8
    let mut out = GrayImage::new(width, height);
    for y in 0..height {
        for x in 0..width {
            let mut acc = 0.0;
            for (k, weight) in weights.iter().enumerate() {
                let sy = (y as i32 + k as i32 - half).clamp(0, height as i32 - 1) as u32;
                acc += weight * intermediate[(sy * width + x) as usize];
            }
            out.put_pixel(x, y, Luma([acc.round().clamp(0.0, 255.0) as u8]));
        }
    }
    out
}

/// Binarize: pixels strictly above `threshold` become 255, the rest 0.
pub fn threshold(gray: &GrayImage, threshold: u8) -> GrayImage {
    let mut out = gray.clone();
    for p in out.pixels_mut() {
        p.0[0] = if p.0[0] > threshold { 255 } else { 0 };
    }
    out
}

/// Morphological dilation with a square window of `size` pixels. The
/// window is centered on each pixel, so an even `size` widens to the
/// next odd window (size 4 dilates like size 5).
pub fn max_filter(gray: &GrayImage, size: u32) -> GrayImage {
    let (width, height) = gray.dimensions();
    let half = (size / 2) as i32;
    let mut out = GrayImage::new(width, height);
    for y in 0..height {
        for x in 0..width {
            let mut max = 0u8;
            for dy in -half..=half {
                for dx in -half..=half {
                    let sx = (x as i32 + dx).clamp(0, width as i32 - 1) as u32;
                    let sy = (y as i32 + dy).clamp(0, height as i32 - 1) as u32;
                    max = max.max(gray.get_pixel(sx, sy).0[0]);
                }
            }
            out.put_pixel(x, y, Luma([max]));
        }
    }
    out
}

/// Scale all RGB channels by `factor`, clamping to the 8-bit range.
pub fn scale_brightness(img: &RgbImage, factor: f32) -> RgbImage {
    let mut out = img.clone();
    for p in out.pixels_mut() {
        for channel in p.0.iter_mut() {
            *channel = (*channel as f32 * factor).round().clamp(0.0, 255.0) as u8;
        }
    }
    out
}

/// Per-channel automatic contrast stretching with a percentage cutoff.
///
/// For each channel the darkest and brightest `cutoff_percent` of pixels
/// are discarded from the histogram before the remaining range is
/// stretched to 0..255. A channel whose remaining range is a single
/// value is left unchanged.
pub fn autocontrast_rgb(img: &RgbImage, cutoff_percent: f32) -> RgbImage {
    let mut out = img.clone();
    for channel in 0..3 {
        let mut histogram = [0u64; 256];
        for p in img.pixels() {
            histogram[p.0[channel] as usize] += 1;
        }
        let lut = autocontrast_lut(&mut histogram, cutoff_percent);
        for p in out.pixels_mut() {
            p.0[channel] = lut[p.0[channel] as usize];
        }
    }
    out
}

fn autocontrast_lut(histogram: &mut [u64; 256], cutoff_percent: f32) -> [u8; 256] {
    let mut identity = [0u8; 256];
    for (i, entry) in identity.iter_mut().enumerate() {
        *entry = i as u8;
    }

    let total: u64 = histogram.iter().sum();
    if total == 0 {
        return identity;
    }

    if cutoff_percent > 0.0 {
        let budget = (total as f64 * cutoff_percent as f64 / 100.0) as u64;

        let mut cut = budget;
        for count in histogram.iter_mut() {
            if cut > *count {
                cut -= *count;
                *count = 0;
            } else {
                *count -= cut;
                cut = 0;
            }
            if cut == 0 {
                break;
            }
        }

        let mut cut = budget;
        for count in histogram.iter_mut().rev() {
            if cut > *count {
                cut -= *count;
                *count = 0;
            } else {
                *count -= cut;
                cut = 0;
            }
            if cut == 0 {
                break;
            }
        }
    }

    let lo = histogram.iter().position(|&c| c > 0);
    let hi = histogram.iter().rposition(|&c| c > 0);
    match (lo, hi) {
        (Some(lo), Some(hi)) if hi > lo => {
            let scale = 255.0 / (hi - lo) as f64;
            let offset = -(lo as f64) * scale;
            let mut lut = [0u8; 256];
            for (i, entry) in lut.iter_mut().enumerate() {
                *entry = (i as f64 * scale + offset).round().clamp(0.0, 255.0) as u8;
            }
            lut
        }
        _ => identity,
    }
}

fn apply_lut(gray: &GrayImage, lut: &[u8; 256]) -> GrayImage {
    let mut out = gray.clone();
    for p in out.pixels_mut() {
        p.0[0] = lut[p.0[0] as usize];
    }
    out
}

/// 3x3 convolution with replicated borders and integer accumulation.
///
/// Pillow's kernel filters copy the one-pixel border through
/// unchanged instead of convolving it, which leaves a bright rim
/// after an edge kernel even on flat input. Replication convolves the
/// whole frame, so the rim stays zero on flat input and foreground
/// counts near the border run slightly lower than Pillow's for the
/// same thresholds.
fn convolve3x3(gray: &GrayImage, kernel: &[i32; 9], divisor: i32) -> GrayImage {
    let (width, height) = gray.dimensions();
    let mut out = GrayImage::new(width, height);
    for y in 0..height {
        for x in 0..width {
            let mut acc = 0i32;
            let mut k = 0;
            for dy in -1i32..=1 {
                for dx in -1i32..=1 {
                    let sx = (x as i32 + dx).clamp(0, width as i32 - 1) as u32;
                    let sy = (y as i32 + dy).clamp(0, height as i32 - 1) as u32;
                    acc += kernel[k] * gray.get_pixel(sx, sy).0[0] as i32;
                    k += 1;
                }
            }
            out.put_pixel(x, y, Luma([(acc / divisor).clamp(0, 255) as u8]));
        }
    }
    out
}
