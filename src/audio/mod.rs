// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Click playback for the metronome.
//!
//! This module provides:
//! - A synthesized click sound
//! - Audio output via cpal
//! - The fire-and-forget `play` call the beat clock's tick invokes
//!
//! Audio failures stay inside this module: a metronome without a sound
//! device still runs, it just runs silently.

pub mod click;
pub mod output;

pub use click::ClickSynth;
pub use output::{AudioConfig, AudioOutput};

use std::sync::{Arc, Mutex};

use tracing::info;

/// Click engine combining the synth and the output stream
pub struct ClickEngine {
    /// Shared click synth, rendered by the audio callback
    synth: Arc<Mutex<ClickSynth>>,
    /// Audio output, present while running
    output: Option<AudioOutput>,
    /// Stream configuration
    config: AudioConfig,
}

impl ClickEngine {
    /// Create a stopped engine with the default configuration
    pub fn new() -> Self {
        Self::with_config(AudioConfig::default())
    }

    /// Create a stopped engine with a custom configuration
    pub fn with_config(config: AudioConfig) -> Self {
        Self {
            synth: Arc::new(Mutex::new(ClickSynth::new(config.sample_rate))),
            output: None,
            config,
        }
    }

    /// Open the output stream. Idempotent while running.
    pub fn start(&mut self) -> Result<(), AudioError> {
        if self.output.is_some() {
            return Ok(());
        }

        let synth = Arc::clone(&self.synth);
        let output = AudioOutput::new(self.config.clone(), move |buffer, channels| {
            if let Ok(mut synth) = synth.lock() {
                synth.render(buffer, channels);
            }
        })?;

        info!(
            latency_ms = output.latency_ms(),
            sample_rate = self.config.sample_rate,
            "audio output started"
        );
        self.output = Some(output);
        Ok(())
    }

    /// Close the output stream
    pub fn stop(&mut self) {
        self.output = None;
    }

    /// Whether the output stream is open
    pub fn is_running(&self) -> bool {
        self.output.is_some()
    }

    /// Play one click. Fire-and-forget: returns immediately, and a click
    /// that cannot be played (stream closed, lock poisoned) is dropped.
    pub fn play(&self) {
        if let Ok(mut synth) = self.synth.lock() {
            synth.trigger();
        }
    }

    /// Set click volume (0.0 - 1.0)
    pub fn set_volume(&self, volume: f32) {
        if let Ok(mut synth) = self.synth.lock() {
            synth.set_gain(volume);
        }
    }

    /// Current click volume
    pub fn volume(&self) -> f32 {
        self.synth.lock().map(|s| s.gain()).unwrap_or(0.0)
    }
}

impl Default for ClickEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Audio error types
#[derive(Debug, Clone)]
pub enum AudioError {
    /// Failed to start audio stream
    StreamFailed(String),
    /// No audio device available
    NoDevice,
}

impl std::fmt::Display for AudioError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AudioError::StreamFailed(msg) => write!(f, "Audio stream failed: {}", msg),
            AudioError::NoDevice => write!(f, "No audio device available"),
        }
    }
}

impl std::error::Error for AudioError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_starts_stopped() {
        let engine = ClickEngine::new();
        assert!(!engine.is_running());
    }

    #[test]
    fn test_play_without_stream_is_harmless() {
        // Trigger with no output open: the synth arms, nothing renders
        let engine = ClickEngine::new();
        engine.play();
        assert!(!engine.is_running());
    }

    #[test]
    fn test_volume_roundtrip() {
        let engine = ClickEngine::new();
        engine.set_volume(0.3);
        assert!((engine.volume() - 0.3).abs() < f32::EPSILON);

        engine.set_volume(2.0); // clamped by the synth
        assert!((engine.volume() - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_error_display() {
        let err = AudioError::NoDevice;
        assert_eq!(err.to_string(), "No audio device available");
    }
}
