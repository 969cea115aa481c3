//! Engine configuration.
//!
//! One serde struct loaded through `confy` (`~/.config/screenlate/`
//! on Linux, platform equivalent elsewhere). Every field has a
//! default, so a missing or partial config file is never an error.

use serde::{Deserialize, Serialize};

use crate::layout::LayoutConfig;
use crate::normalize::CaptureGeometry;
use crate::translate::TranslationConfig;

/// Word filter settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Words at or below this confidence (0-100) are discarded.
    pub min_confidence: f32,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            min_confidence: 60.0,
        }
    }
}

/// Region segmentation settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmenterConfig {
    /// Vertical gap (source-space px) that starts a new block.
    pub vertical_gap: f32,
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self { vertical_gap: 40.0 }
    }
}

/// Producer-loop timing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CycleConfig {
    /// Delay between capture cycles, in milliseconds.
    pub debounce_ms: u64,
    /// How long the overlay stays blanked before the frame grab, so
    /// the overlay never captures itself.
    pub blank_ms: u64,
}

impl Default for CycleConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 1500,
            blank_ms: 100,
        }
    }
}

/// Top-level engine configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub filter: FilterConfig,
    pub segmenter: SegmenterConfig,
    pub capture: CaptureGeometry,
    pub translation: TranslationConfig,
    pub layout: LayoutConfig,
    pub cycle: CycleConfig,
}

impl EngineConfig {
    /// Load from the per-user config file, falling back to defaults on
    /// any read or parse problem.
    pub fn load() -> Self {
        confy::load("screenlate", None).unwrap_or_else(|error| {
            tracing::warn!(%error, "failed to load config, using defaults");
            Self::default()
        })
    }
}
