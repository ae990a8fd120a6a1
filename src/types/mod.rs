//! Shared data types.

pub mod http;
pub mod options;

pub use http::HttpConfig;
pub use options::{
    CameraDirection, CameraStyle, GenerationOptions, Pacing, PromptLength, SpecialEffects,
    VisualStyle,
};

use serde::{Deserialize, Serialize};

/// A selectable model as listed to the UI (`GET /models`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelInfo {
    pub name: String,
    pub icon: String,
}

/// Shared-credential pool counters (`GET /key-stats`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyStats {
    pub total_keys: usize,
    pub failed_keys: usize,
    pub available_keys: usize,
}
