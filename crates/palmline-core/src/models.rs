//! Data models for the analysis report
//!
//! The structured result handed back to the caller (CLI or any HTTP
//! collaborator), serialized as-is to JSON.

use crate::lighting::LightingAssessment;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One interpreted palm line: the zone's score mapped to a canned
/// reading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Interpretation {
    /// Traditional line name (e.g. 感情線)
    pub line: String,

    /// Category id from the fixed catalogue
    pub category: String,

    /// Selected reading text for the score band
    pub reading: String,

    /// The zone's density score in [0, 100]
    pub score: f64,
}

/// Catalogue entry grouping interpretations by life area.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub icon: String,
}

/// Full analysis result for one photo.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub success: bool,

    /// Nine interpretations in fixed declaration order
    /// (heart, marriage, head, life, fate, sun, money, health, intuition)
    pub interpretations: Vec<Interpretation>,

    /// Fixed six-entry category catalogue
    pub categories: Vec<Category>,

    /// Zone key -> density score
    pub analysis: BTreeMap<String, f64>,

    /// Lighting assessment, present when the preset runs the lighting stage
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lighting: Option<LightingAssessment>,

    /// PNG data URI of the edge overlay blended onto the source photo
    pub visualization: String,

    /// PNG data URI of the edge map rendered for standalone display
    pub edges_image: String,
}
