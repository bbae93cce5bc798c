//! Palmline Core Library
//!
//! Deterministic palm-photo analysis: a fixed image-filtering pipeline
//! that surfaces line-like edges, scores their density over nine palm
//! zones, and maps each score to a canned interpretive reading.

pub mod config;
pub mod decoders;
pub mod edges;
pub mod filters;
pub mod interpret;
pub mod lighting;
pub mod models;
pub mod pipeline;
pub mod presets;
pub mod render;
pub mod zones;

// Re-export commonly used types
pub use interpret::{band, Band};
pub use lighting::{LightingAssessment, LightingStatus};
pub use models::{AnalysisReport, Category, Interpretation};
pub use pipeline::analyze;
pub use presets::PipelinePreset;
