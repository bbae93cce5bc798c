//! Lighting assessment and correction
//!
//! Classifies the mean brightness of the uploaded photo into an advisory
//! status, and optionally normalizes brightness/contrast before edge
//! extraction. The assessment always reads the original buffer; the
//! corrected buffer feeds only the detector.

use crate::filters;
use image::RgbImage;
use serde::{Deserialize, Serialize};

/// Advisory classification of the photo's mean brightness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LightingStatus {
    TooDark,
    Dark,
    Good,
    Ok,
    Bright,
    TooBright,
}

/// Result of assessing a photo's lighting. Advisory only; never blocks
/// processing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LightingAssessment {
    pub status: LightingStatus,
    pub message: String,

    /// Mean intensity rounded to one decimal place.
    pub brightness: f64,
}

/// Classify mean grayscale intensity with fixed breakpoints.
pub fn assess_lighting(img: &RgbImage) -> LightingAssessment {
    let mean = filters::mean_intensity(&filters::to_luma(img));

    let (status, message) = if mean < 60.0 {
        (
            LightingStatus::TooDark,
            "照明が不足しています。明るい場所でもう一度撮影することをおすすめします。",
        )
    } else if mean < 90.0 {
        (
            LightingStatus::Dark,
            "やや暗めです。もう少し明るい場所で撮影すると、より正確に解析できます。",
        )
    } else if mean > 220.0 {
        (
            LightingStatus::TooBright,
            "明るすぎます。直射日光や強い光を避け、柔らかい光で撮影してみてください。",
        )
    } else if mean > 180.0 {
        (
            LightingStatus::Bright,
            "やや明るめです。解析は可能ですが、少し暗めの環境だとより良い結果が出る場合があります。",
        )
    } else if (100.0..=160.0).contains(&mean) {
        (
            LightingStatus::Good,
            "照明は適切です。手相の線がはっきり検出しやすい条件です。",
        )
    } else {
        (LightingStatus::Ok, "照明は問題ありません。解析できます。")
    };

    LightingAssessment {
        status,
        message: message.to_string(),
        brightness: (mean * 10.0).round() / 10.0,
    }
}

/// Normalize brightness and contrast ahead of edge extraction.
///
/// Dark photos (mean < 80) are brightened by `100/max(mean, 20)` capped
/// at 2.5x; bright photos (mean > 180) are dimmed by `140/mean` floored
/// at 0.6x. Each color channel is then auto-contrast stretched with a
/// 2% cutoff.
pub fn correct_lighting(img: &RgbImage) -> RgbImage {
    let mean = filters::mean_intensity(&filters::to_luma(img));

    let adjusted = if mean < 80.0 {
        let factor = (100.0 / mean.max(20.0)).min(2.5);
        filters::scale_brightness(img, factor as f32)
    } else if mean > 180.0 {
        let factor = (140.0 / mean).max(0.6);
        filters::scale_brightness(img, factor as f32)
    } else {
        img.clone()
    };

    filters::autocontrast_rgb(&adjusted, 2.0)
}
