//! Pipeline presets
//!
//! The detector historically shipped in two tunings that differed only
//! in constants. Both live here as named presets of one configurable
//! pipeline; neither is silently preferred. Presets can also be loaded
//! from and saved to YAML files for tuning.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// All tunable constants of the analysis pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelinePreset {
    /// Preset name
    pub name: String,

    /// Longest-side bound applied before processing
    pub max_dim: u32,

    /// Run lighting assessment and correction before detection
    pub lighting_stage: bool,

    /// Apply histogram equalization to the grayscale buffer
    pub equalize: bool,

    /// Apply the edge-enhance convolution before blurring
    pub edge_enhance: bool,

    /// Contrast multiplier applied to the grayscale buffer
    pub contrast_boost: f32,

    /// Sharpness multiplier applied to the grayscale buffer
    pub sharpness_boost: f32,

    /// Candidate Gaussian blur radii, tried in order
    pub blur_radii: Vec<u32>,

    /// Contrast multiplier applied to each gradient-magnitude candidate
    pub edge_contrast: f32,

    /// Binarization threshold: intensities above become foreground
    pub binarize_threshold: u8,

    /// Dilate foreground with a max filter of this odd kernel size
    pub dilate_kernel: Option<u32>,

    /// Foreground pixel count the winning candidate should be closest to
    pub target_density: u64,

    /// Overlay line color (RGB)
    pub line_color: [u8; 3],

    /// Overlay blend opacity in [0, 1]
    pub overlay_opacity: f32,

    /// Background color of the standalone edge display
    pub edge_display_background: [u8; 3],

    /// Line color of the standalone edge display
    pub edge_display_color: [u8; 3],
}

impl Default for PipelinePreset {
    fn default() -> Self {
        standard()
    }
}

/// The lighting-aware tuning: full preprocessing, permissive threshold,
/// thickened lines, high-contrast cyan overlay.
pub fn standard() -> PipelinePreset {
    PipelinePreset {
        name: "standard".to_string(),
        max_dim: 1000,
        lighting_stage: true,
        equalize: true,
        edge_enhance: true,
        contrast_boost: 3.0,
        sharpness_boost: 3.0,
        blur_radii: vec![1, 2, 3],
        edge_contrast: 6.0,
        binarize_threshold: 12,
        dilate_kernel: Some(5),
        target_density: 6000,
        line_color: [0, 255, 220],
        overlay_opacity: 0.78,
        edge_display_background: [15, 15, 18],
        edge_display_color: [0, 255, 220],
    }
}

/// The compact tuning: lighter preprocessing and a stricter threshold,
/// with a subtle green overlay. No lighting stage.
pub fn compact() -> PipelinePreset {
    PipelinePreset {
        name: "compact".to_string(),
        max_dim: 800,
        lighting_stage: false,
        equalize: false,
        edge_enhance: false,
        contrast_boost: 1.8,
        sharpness_boost: 1.5,
        blur_radii: vec![1, 2],
        edge_contrast: 2.0,
        binarize_threshold: 80,
        dilate_kernel: None,
        target_density: 5000,
        line_color: [0, 200, 100],
        overlay_opacity: 0.3,
        edge_display_background: [15, 15, 18],
        edge_display_color: [0, 255, 220],
    }
}

/// Names of the built-in presets.
pub fn builtin_names() -> &'static [&'static str] {
    &["standard", "compact"]
}

/// Look up a built-in preset by name.
pub fn builtin(name: &str) -> Option<PipelinePreset> {
    match name {
        "standard" => Some(standard()),
        "compact" => Some(compact()),
        _ => None,
    }
}

/// Validate a preset name to prevent path traversal attacks.
/// Rejects names containing path separators, "..", or other dangerous patterns.
pub fn validate_preset_name(name: &str) -> Result<(), String> {
    if name.is_empty() {
        return Err("Preset name cannot be empty".to_string());
    }

    if name.contains('/') || name.contains('\\') {
        return Err("Preset name cannot contain path separators".to_string());
    }

    if name.contains("..") {
        return Err("Preset name cannot contain '..'".to_string());
    }

    if name.starts_with('.') {
        return Err("Preset name cannot start with '.'".to_string());
    }

    if name.contains('\0') {
        return Err("Preset name cannot contain null bytes".to_string());
    }

    Ok(())
}

/// Load a pipeline preset from a YAML file
pub fn load_preset<P: AsRef<Path>>(path: P) -> Result<PipelinePreset, String> {
    let path = path.as_ref();
    let contents =
        std::fs::read_to_string(path).map_err(|e| format!("Failed to read preset file: {}", e))?;

    let preset: PipelinePreset =
        serde_yaml::from_str(&contents).map_err(|e| format!("Failed to parse preset YAML: {}", e))?;

    if preset.blur_radii.is_empty() {
        log::warn!("Preset '{}' has no blur radii; detection will fail", preset.name);
    }

    Ok(preset)
}

/// Save a pipeline preset to a YAML file
pub fn save_preset<P: AsRef<Path>>(preset: &PipelinePreset, path: P) -> Result<(), String> {
    let path = path.as_ref();
    let yaml =
        serde_yaml::to_string(preset).map_err(|e| format!("Failed to serialize preset: {}", e))?;

    std::fs::write(path, yaml).map_err(|e| format!("Failed to write preset file: {}", e))
}
