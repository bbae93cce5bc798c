//! End-to-end analysis pipeline
//!
//! Single deterministic pass: decode, bound, assess, detect, score,
//! interpret, render. Either the full report is produced or an error
//! string is returned; there are no partial results and no state kept
//! between invocations.

use crate::decoders;
use crate::edges;
use crate::interpret;
use crate::lighting;
use crate::models::AnalysisReport;
use crate::presets::PipelinePreset;
use crate::render;
use crate::verbose_println;
use crate::zones;

/// Analyze a palm photo from raw image bytes.
pub fn analyze(bytes: &[u8], preset: &PipelinePreset) -> Result<AnalysisReport, String> {
    let img = decoders::load_rgb(bytes)?;
    let img = decoders::resize_if_needed(img, preset.max_dim);
    verbose_println!(
        "[pipeline] preset={} input={}x{}",
        preset.name,
        img.width(),
        img.height()
    );

    // Assessment reads the original buffer; correction happens inside
    // the detector and never feeds the final blend.
    let lighting = if preset.lighting_stage {
        Some(lighting::assess_lighting(&img))
    } else {
        None
    };

    let (edge_map, _enhanced) = edges::detect_palm_lines(&img, preset)?;
    let analysis = zones::score_zones(&edge_map);
    let interpretations = interpret::interpret(&analysis);

    let visualization = render::png_data_uri(&render::create_visualization(&img, &edge_map, preset)?)?;
    let edges_image = render::png_data_uri(&render::edges_display(&edge_map, preset))?;

    Ok(AnalysisReport {
        success: true,
        interpretations,
        categories: interpret::categories(),
        analysis,
        lighting,
        visualization,
        edges_image,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presets;
    use image::{Rgb, RgbImage};
    use std::io::Cursor;

    fn png_bytes(img: &RgbImage) -> Vec<u8> {
        let mut buffer = Cursor::new(Vec::new());
        img.write_to(&mut buffer, image::ImageFormat::Png)
            .expect("PNG encode failed");
        buffer.into_inner()
    }

    fn uniform_gray_png(size: u32) -> Vec<u8> {
        png_bytes(&RgbImage::from_pixel(size, size, Rgb([128, 128, 128])))
    }

    #[test]
    fn test_uniform_gray_scores_zero_and_reads_low() {
        let report = analyze(&uniform_gray_png(200), &presets::standard()).unwrap();

        assert!(report.success);
        assert_eq!(report.analysis.len(), 9);
        for (zone, score) in &report.analysis {
            assert_eq!(*score, 0.0, "{}", zone);
        }
        assert_eq!(report.interpretations.len(), 9);
        for interpretation in &report.interpretations {
            assert_eq!(crate::band(interpretation.score), crate::Band::Low);
        }
    }

    #[test]
    fn test_report_carries_catalogue_and_images() {
        let report = analyze(&uniform_gray_png(64), &presets::standard()).unwrap();
        assert_eq!(report.categories.len(), 6);
        assert!(report.visualization.starts_with("data:image/png;base64,"));
        assert!(report.edges_image.starts_with("data:image/png;base64,"));
    }

    #[test]
    fn test_lighting_presence_follows_preset() {
        let bytes = uniform_gray_png(64);
        let with = analyze(&bytes, &presets::standard()).unwrap();
        let without = analyze(&bytes, &presets::compact()).unwrap();
        assert!(with.lighting.is_some());
        assert!(without.lighting.is_none());
    }

    #[test]
    fn test_analysis_is_idempotent() {
        let mut img = RgbImage::from_pixel(120, 120, Rgb([150, 140, 130]));
        for i in 0..120 {
            img.put_pixel(i, i / 2, Rgb([40, 30, 20]));
        }
        let bytes = png_bytes(&img);

        let first = analyze(&bytes, &presets::standard()).unwrap();
        let second = analyze(&bytes, &presets::standard()).unwrap();

        assert_eq!(
            serde_json::to_string(&first.analysis).unwrap(),
            serde_json::to_string(&second.analysis).unwrap()
        );
        assert_eq!(
            serde_json::to_string(&first.interpretations).unwrap(),
            serde_json::to_string(&second.interpretations).unwrap()
        );
        assert_eq!(first.visualization, second.visualization);
    }

    #[test]
    fn test_non_image_bytes_fail_with_load_message() {
        let result = analyze(b"not an image at all", &presets::standard());
        assert_eq!(result.unwrap_err(), decoders::LOAD_FAILURE_MESSAGE);
    }

    #[test]
    fn test_oversized_input_is_bounded() {
        let bytes = png_bytes(&RgbImage::from_pixel(1600, 900, Rgb([128, 128, 128])));
        let mut preset = presets::compact();
        preset.max_dim = 400;
        let report = analyze(&bytes, &preset).unwrap();

        // Edge map dimensions equal the resized source; the visualization
        // data URI decodes back to the bounded size.
        let payload = report
            .visualization
            .strip_prefix("data:image/png;base64,")
            .unwrap();
        use base64::Engine;
        let png = base64::engine::general_purpose::STANDARD.decode(payload).unwrap();
        let decoded = decoders::load_rgb(&png).unwrap();
        assert_eq!(decoded.dimensions(), (400, 225));
    }

    #[test]
    fn test_report_serializes_expected_shape() {
        let report = analyze(&uniform_gray_png(64), &presets::compact()).unwrap();
        let value: serde_json::Value = serde_json::to_value(&report).unwrap();

        assert_eq!(value["success"], serde_json::json!(true));
        assert!(value["interpretations"].as_array().unwrap().len() == 9);
        assert!(value["analysis"].as_object().unwrap().contains_key("heart_zone"));
        // No lighting stage in the compact preset, so the key is absent
        assert!(value.get("lighting").is_none());
        let entry = &value["interpretations"][0];
        for key in ["line", "category", "reading", "score"] {
            assert!(entry.get(key).is_some(), "missing {}", key);
        }
    }
}
