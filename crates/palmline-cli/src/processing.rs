//! File handling and preset resolution for the CLI.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use palmline_core::models::AnalysisReport;
use palmline_core::presets::{self, PipelinePreset};
use std::path::Path;

/// Image container extensions the CLI accepts without a warning. A
/// convenience check only; the decoder sniffs the actual content.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp"];

/// Check a path against the supported extension list (case-insensitive).
pub fn is_supported_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| SUPPORTED_EXTENSIONS.contains(&e.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Resolve a preset argument: a built-in name first, otherwise a path
/// to a YAML preset file.
pub fn resolve_preset(spec: &str) -> Result<PipelinePreset, String> {
    if presets::validate_preset_name(spec).is_ok() {
        if let Some(preset) = presets::builtin(spec) {
            return Ok(preset);
        }
    }

    let path = Path::new(spec);
    if path.exists() {
        return presets::load_preset(path);
    }

    Err(format!(
        "Unknown preset '{}' (built-ins: {})",
        spec,
        presets::builtin_names().join(", ")
    ))
}

/// Look up a built-in preset by name, rejecting names that could not
/// be preset names at all (path separators, traversal, hidden files).
pub fn builtin_preset(name: &str) -> Result<PipelinePreset, String> {
    presets::validate_preset_name(name)?;
    presets::builtin(name).ok_or_else(|| format!("Unknown built-in preset '{}'", name))
}

/// Read an image file and run the full analysis.
pub fn analyze_file(path: &Path, preset: &PipelinePreset) -> Result<AnalysisReport, String> {
    if !is_supported_extension(path) {
        log::warn!(
            "{}: extension not in {:?}, relying on content sniffing",
            path.display(),
            SUPPORTED_EXTENSIONS
        );
    }

    let bytes =
        std::fs::read(path).map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;

    palmline_core::analyze(&bytes, preset)
}

/// Write the report's two rendered images as PNG files next to `stem`
/// inside `dir`.
pub fn write_report_images(report: &AnalysisReport, dir: &Path, stem: &str) -> Result<(), String> {
    std::fs::create_dir_all(dir)
        .map_err(|e| format!("Failed to create output directory: {}", e))?;

    write_data_uri(&report.visualization, &dir.join(format!("{}_overlay.png", stem)))?;
    write_data_uri(&report.edges_image, &dir.join(format!("{}_edges.png", stem)))
}

fn write_data_uri(uri: &str, path: &Path) -> Result<(), String> {
    let payload = uri
        .strip_prefix("data:image/png;base64,")
        .ok_or_else(|| "Report image is not a PNG data URI".to_string())?;

    let bytes = STANDARD
        .decode(payload)
        .map_err(|e| format!("Failed to decode report image: {}", e))?;

    std::fs::write(path, bytes).map_err(|e| format!("Failed to write {}: {}", path.display(), e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supported_extensions() {
        assert!(is_supported_extension(Path::new("palm.png")));
        assert!(is_supported_extension(Path::new("palm.JPG")));
        assert!(is_supported_extension(Path::new("photo.webp")));
        assert!(!is_supported_extension(Path::new("scan.tiff")));
        assert!(!is_supported_extension(Path::new("noext")));
    }

    #[test]
    fn test_resolve_builtin_preset() {
        assert_eq!(resolve_preset("standard").unwrap().name, "standard");
        assert_eq!(resolve_preset("compact").unwrap().name, "compact");
    }

    #[test]
    fn test_resolve_unknown_preset_lists_builtins() {
        let err = resolve_preset("mystery").unwrap_err();
        assert!(err.contains("standard"));
        assert!(err.contains("compact"));
    }

    #[test]
    fn test_builtin_preset_rejects_path_like_names() {
        assert!(builtin_preset("../standard").is_err());
        assert!(builtin_preset("tunings/custom").is_err());
        assert!(builtin_preset(".hidden").is_err());
        assert_eq!(builtin_preset("standard").unwrap().name, "standard");
    }

    #[test]
    fn test_builtin_preset_unknown_name() {
        let err = builtin_preset("mystery").unwrap_err();
        assert!(err.contains("mystery"));
    }

    #[test]
    fn test_analyze_missing_file_reports_path() {
        let err = analyze_file(Path::new("/nonexistent/palm.png"), &presets::standard())
            .unwrap_err();
        assert!(err.contains("/nonexistent/palm.png"));
    }
}
