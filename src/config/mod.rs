// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Settings for the metronome.
//!
//! A small YAML file selects the starting tempo, the operating mode, the
//! click volume and the UI frame rate. Every field has a default, so an
//! absent file (or an empty one) means "factory settings".

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::tempo::{TempoMode, DEFAULT_BPM, MAX_BPM, MIN_BPM};

/// Persisted settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Settings {
    /// Starting tempo in BPM
    #[serde(default = "default_tempo")]
    pub tempo: u32,
    /// Starting mode
    #[serde(default = "default_mode")]
    pub mode: TempoMode,
    /// Click volume (0.0 - 1.0)
    #[serde(default = "default_volume")]
    pub volume: f32,
    /// UI frame rate in frames per second
    #[serde(default = "default_frame_rate")]
    pub frame_rate: u32,
}

fn default_tempo() -> u32 {
    DEFAULT_BPM
}
fn default_mode() -> TempoMode {
    TempoMode::Maelzel
}
fn default_volume() -> f32 {
    0.8
}
fn default_frame_rate() -> u32 {
    60
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tempo: default_tempo(),
            mode: default_mode(),
            volume: default_volume(),
            frame_rate: default_frame_rate(),
        }
    }
}

impl Settings {
    /// Load settings from a YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read settings file: {:?}", path.as_ref()))?;
        Self::from_yaml(&contents)
    }

    /// Parse settings from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml).context("Failed to parse YAML settings")
    }

    /// Serialize to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("Failed to serialize settings to YAML")
    }

    /// Save settings to a YAML file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let yaml = self.to_yaml()?;
        fs::write(path.as_ref(), yaml)
            .with_context(|| format!("Failed to write settings file: {:?}", path.as_ref()))
    }

    /// Check field ranges, returning a list of problems (empty if valid).
    ///
    /// The tempo is checked against the configured mode's range; the model
    /// would clamp it anyway, but a validation message beats a silent change.
    pub fn validate(&self) -> Vec<String> {
        let mut problems = Vec::new();

        if self.tempo < self.mode.min() || self.tempo > self.mode.max() {
            problems.push(format!(
                "tempo {} is outside the {} range {}-{}",
                self.tempo,
                self.mode,
                self.mode.min(),
                self.mode.max()
            ));
        }
        if self.tempo < MIN_BPM || self.tempo > MAX_BPM {
            problems.push(format!(
                "tempo {} is outside the supported range {}-{}",
                self.tempo, MIN_BPM, MAX_BPM
            ));
        }
        if !(0.0..=1.0).contains(&self.volume) {
            problems.push(format!("volume {} is outside 0.0-1.0", self.volume));
        }
        if self.frame_rate == 0 || self.frame_rate > 120 {
            problems.push(format!("frame_rate {} is outside 1-120", self.frame_rate));
        }

        problems
    }
}
