//! Zone geometry and density scoring
//!
//! Partitions the edge map into nine fixed (and deliberately
//! overlapping) rectangular regions and scores each by foreground
//! density.

use image::GrayImage;
use std::collections::BTreeMap;

/// Fixed palm regions as fractions of (width, height):
/// (zone key, left, top, right, bottom).
pub const ZONES: [(&str, f64, f64, f64, f64); 9] = [
    ("heart_zone", 0.0, 0.0, 1.0, 0.35),
    ("marriage_zone", 0.65, 0.0, 1.0, 0.25),
    ("head_zone", 0.0, 0.35, 1.0, 0.55),
    ("life_zone", 0.0, 0.0, 0.35, 1.0),
    ("fate_zone", 0.35, 0.0, 0.65, 1.0),
    ("sun_zone", 0.5, 0.2, 0.8, 0.6),
    ("money_zone", 0.25, 0.4, 0.6, 0.8),
    ("health_zone", 0.3, 0.5, 0.55, 1.0),
    ("intuition_zone", 0.55, 0.55, 1.0, 1.0),
];

/// Score assigned to a degenerate (zero-area) region. A placeholder,
/// not a measurement.
pub const NEUTRAL_SCORE: f64 = 50.0;

/// Score every zone of an edge map. Always returns exactly the nine
/// fixed keys, each in [0, 100].
pub fn score_zones(edges: &GrayImage) -> BTreeMap<String, f64> {
    let (width, height) = edges.dimensions();
    let mut analysis = BTreeMap::new();

    for &(name, fraction_left, fraction_top, fraction_right, fraction_bottom) in ZONES.iter() {
        let left = (width as f64 * fraction_left) as u32;
        let top = (height as f64 * fraction_top) as u32;
        let right = (width as f64 * fraction_right) as u32;
        let bottom = (height as f64 * fraction_bottom) as u32;
        analysis.insert(name.to_string(), score_region(edges, left, top, right, bottom));
    }

    analysis
}

/// Density score of one rectangular region: foreground fraction x 1000,
/// clamped to 100.
fn score_region(edges: &GrayImage, left: u32, top: u32, right: u32, bottom: u32) -> f64 {
    if right <= left || bottom <= top {
        return NEUTRAL_SCORE;
    }

    let area = (right - left) as u64 * (bottom - top) as u64;
    let mut count = 0u64;
    for y in top..bottom {
        for x in left..right {
            if edges.get_pixel(x, y).0[0] > 0 {
                count += 1;
            }
        }
    }

    let density = count as f64 / area as f64 * 100.0;
    (density * 10.0).min(100.0)
}
