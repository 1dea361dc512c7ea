// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Synthesized metronome click.
//!
//! Renders a short percussive click: a 2 ms noise transient into a 1 kHz
//! sine ping with an exponential decay, about 30 ms in total. The sample is
//! generated once at a fixed sample rate and replayed on every trigger.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Click length in milliseconds
const CLICK_DURATION_MS: f32 = 30.0;

/// Noise transient length in milliseconds
const TRANSIENT_MS: f32 = 2.0;

/// Ping frequency in Hz
const PING_HZ: f32 = 1000.0;

/// Build the click waveform for a sample rate.
///
/// Deterministic: the noise transient uses a fixed seed, so two synths at the
/// same rate produce identical samples.
pub fn build_click_sample(sample_rate: u32) -> Vec<f32> {
    let total = (sample_rate as f32 * CLICK_DURATION_MS / 1000.0) as usize;
    let transient = (sample_rate as f32 * TRANSIENT_MS / 1000.0) as usize;
    let mut rng = StdRng::seed_from_u64(7);

    let mut samples = Vec::with_capacity(total);
    for i in 0..total {
        let t = i as f32 / sample_rate as f32;
        let envelope = (-t * 160.0).exp();
        let ping = (t * PING_HZ * 2.0 * std::f32::consts::PI).sin();
        let noise = if i < transient {
            rng.gen_range(-0.5..0.5)
        } else {
            0.0
        };
        samples.push((ping + noise) * envelope);
    }

    samples
}

/// Click playback state shared with the audio callback
pub struct ClickSynth {
    /// Pre-rendered click waveform
    sample: Vec<f32>,
    /// Playback position, `None` while silent
    position: Option<usize>,
    /// Output gain (0.0 - 1.0)
    gain: f32,
    /// Sample rate the waveform was rendered at
    sample_rate: u32,
}

impl ClickSynth {
    /// Create a synth for the given sample rate
    pub fn new(sample_rate: u32) -> Self {
        Self {
            sample: build_click_sample(sample_rate),
            position: None,
            gain: 0.8,
            sample_rate,
        }
    }

    /// Restart click playback from the top.
    ///
    /// A trigger during an unfinished click cuts it off; at 300 BPM the
    /// interval (200 ms) is still far longer than the click itself.
    pub fn trigger(&mut self) {
        self.position = Some(0);
    }

    /// Whether a click is currently sounding
    pub fn is_sounding(&self) -> bool {
        self.position.is_some()
    }

    /// Set output gain (clamped to 0.0 - 1.0)
    pub fn set_gain(&mut self, gain: f32) {
        self.gain = gain.clamp(0.0, 1.0);
    }

    /// Current output gain
    pub fn gain(&self) -> f32 {
        self.gain
    }

    /// Sample rate the click was rendered at
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Mix the click into an interleaved output buffer.
    ///
    /// The buffer arrives zeroed from the output stream; all channels of a
    /// frame get the same value.
    pub fn render(&mut self, buffer: &mut [f32], channels: usize) {
        let Some(mut pos) = self.position else {
            return;
        };
        if channels == 0 {
            return;
        }

        for frame in buffer.chunks_mut(channels) {
            if pos >= self.sample.len() {
                break;
            }
            let value = self.sample[pos] * self.gain;
            for out in frame.iter_mut() {
                *out = value;
            }
            pos += 1;
        }

        self.position = if pos >= self.sample.len() {
            None
        } else {
            Some(pos)
        };
    }
}
