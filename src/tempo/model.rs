// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Tempo model: current BPM, operating mode and marking resolution.
//!
//! Interactive callers (slider, arrow keys) go through the clamping entry
//! points and can never observe a failure; the strict entry point is for
//! programmatic use (CLI flags, tests) and surfaces out-of-range input.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::marking::{lookup_marking, MAELZEL_STOPS, MAX_BPM, MIN_BPM};

/// Default tempo at startup
pub const DEFAULT_BPM: u32 = 120;

/// Tempo selection mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TempoMode {
    /// Classical dial range, discrete stops
    Maelzel,
    /// Full range, 1 BPM resolution
    Precise,
}

impl TempoMode {
    /// Lowest BPM this mode accepts
    pub fn min(&self) -> u32 {
        match self {
            TempoMode::Maelzel => 40,
            TempoMode::Precise => MIN_BPM,
        }
    }

    /// Highest BPM this mode accepts
    pub fn max(&self) -> u32 {
        match self {
            TempoMode::Maelzel => 208,
            TempoMode::Precise => MAX_BPM,
        }
    }

    /// Clamp a BPM value into this mode's range
    pub fn clamp(&self, bpm: u32) -> u32 {
        bpm.clamp(self.min(), self.max())
    }

    /// The other mode
    pub fn toggled(&self) -> Self {
        match self {
            TempoMode::Maelzel => TempoMode::Precise,
            TempoMode::Precise => TempoMode::Maelzel,
        }
    }
}

impl std::fmt::Display for TempoMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TempoMode::Maelzel => write!(f, "Maelzel's metronome"),
            TempoMode::Precise => write!(f, "Precise tempo"),
        }
    }
}

/// Tempo errors (strict entry point only)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TempoError {
    /// Requested BPM lies outside the active mode's range
    #[error("tempo {bpm} BPM is outside the {mode} range {min}-{max}")]
    OutOfRange {
        bpm: u32,
        mode: TempoMode,
        min: u32,
        max: u32,
    },
}

/// Snapshot of the model for rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayState {
    /// Current tempo in BPM
    pub bpm: u32,
    /// Traditional marking for the current tempo
    pub marking: &'static str,
    /// Active mode
    pub mode: TempoMode,
}

/// The tempo model
///
/// Invariant: `bpm` always lies within the active mode's range. Every
/// mutation path clamps or rejects before storing.
#[derive(Debug, Clone)]
pub struct TempoModel {
    bpm: u32,
    mode: TempoMode,
}

impl TempoModel {
    /// Create a model at the given tempo and mode, clamping if needed
    pub fn new(bpm: u32, mode: TempoMode) -> Self {
        Self {
            bpm: mode.clamp(bpm),
            mode,
        }
    }

    /// Current tempo in BPM
    pub fn bpm(&self) -> u32 {
        self.bpm
    }

    /// Active mode
    pub fn mode(&self) -> TempoMode {
        self.mode
    }

    /// Marking for the current tempo
    pub fn marking(&self) -> &'static str {
        lookup_marking(self.bpm)
    }

    /// Snapshot for rendering; side-effect-free
    pub fn display_state(&self) -> DisplayState {
        DisplayState {
            bpm: self.bpm,
            marking: self.marking(),
            mode: self.mode,
        }
    }

    /// Switch the active mode.
    ///
    /// A tempo outside the new mode's range is clamped to the nearest bound.
    /// Returns the marking for the (possibly clamped) tempo. Never fails.
    pub fn set_mode(&mut self, mode: TempoMode) -> &'static str {
        self.mode = mode;
        self.bpm = mode.clamp(self.bpm);
        self.marking()
    }

    /// Toggle between Maelzel and precise mode
    pub fn switch_mode(&mut self) -> &'static str {
        self.set_mode(self.mode.toggled())
    }

    /// Strict tempo entry: rejects values outside the active range
    pub fn set_tempo(&mut self, bpm: u32) -> Result<(), TempoError> {
        if bpm < self.mode.min() || bpm > self.mode.max() {
            return Err(TempoError::OutOfRange {
                bpm,
                mode: self.mode,
                min: self.mode.min(),
                max: self.mode.max(),
            });
        }
        self.bpm = bpm;
        Ok(())
    }

    /// Interactive tempo entry: silently clamps, returns the stored value
    pub fn set_tempo_clamped(&mut self, bpm: u32) -> u32 {
        self.bpm = self.mode.clamp(bpm);
        self.bpm
    }

    /// Adjust the tempo by a signed delta, clamped to the active range
    pub fn nudge(&mut self, delta: i32) -> u32 {
        let target = self.bpm.saturating_add_signed(delta);
        self.set_tempo_clamped(target)
    }

    /// Step to the next higher tempo: adjacent dial stop in Maelzel mode,
    /// +1 BPM in precise mode
    pub fn step_up(&mut self) -> u32 {
        match self.mode {
            TempoMode::Maelzel => {
                let next = MAELZEL_STOPS
                    .iter()
                    .find(|&&stop| stop > self.bpm)
                    .copied()
                    .unwrap_or(self.mode.max());
                self.set_tempo_clamped(next)
            }
            TempoMode::Precise => self.nudge(1),
        }
    }

    /// Step to the next lower tempo: adjacent dial stop in Maelzel mode,
    /// -1 BPM in precise mode
    pub fn step_down(&mut self) -> u32 {
        match self.mode {
            TempoMode::Maelzel => {
                let prev = MAELZEL_STOPS
                    .iter()
                    .rev()
                    .find(|&&stop| stop < self.bpm)
                    .copied()
                    .unwrap_or(self.mode.min());
                self.set_tempo_clamped(prev)
            }
            TempoMode::Precise => self.nudge(-1),
        }
    }
}

impl Default for TempoModel {
    fn default() -> Self {
        Self::new(DEFAULT_BPM, TempoMode::Maelzel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_default() {
        let model = TempoModel::default();
        assert_eq!(model.bpm(), 120);
        assert_eq!(model.mode(), TempoMode::Maelzel);
        assert_eq!(model.marking(), "Moderato");
    }

    #[test]
    fn test_new_clamps_into_mode_range() {
        let model = TempoModel::new(10, TempoMode::Maelzel);
        assert_eq!(model.bpm(), 40);

        let model = TempoModel::new(250, TempoMode::Maelzel);
        assert_eq!(model.bpm(), 208);

        let model = TempoModel::new(250, TempoMode::Precise);
        assert_eq!(model.bpm(), 250);
    }

    #[test]
    fn test_strict_set_tempo_rejects_out_of_range() {
        let mut model = TempoModel::new(120, TempoMode::Precise);

        assert!(model.set_tempo(19).is_err());
        assert!(model.set_tempo(301).is_err());
        assert_eq!(model.bpm(), 120); // unchanged on error

        assert!(model.set_tempo(20).is_ok());
        assert_eq!(model.bpm(), 20);
        assert!(model.set_tempo(300).is_ok());
        assert_eq!(model.bpm(), 300);
    }

    #[test]
    fn test_strict_set_tempo_respects_maelzel_range() {
        let mut model = TempoModel::new(120, TempoMode::Maelzel);

        let err = model.set_tempo(20).unwrap_err();
        let TempoError::OutOfRange { min, max, .. } = err;
        assert_eq!(min, 40);
        assert_eq!(max, 208);
    }

    #[test]
    fn test_clamped_set_tempo_stores_nearest_bound() {
        let mut model = TempoModel::new(120, TempoMode::Precise);

        assert_eq!(model.set_tempo_clamped(5), 20);
        assert_eq!(model.set_tempo_clamped(1000), 300);
        assert_eq!(model.set_tempo_clamped(72), 72);
    }

    #[test]
    fn test_mode_switch_clamps_tempo() {
        // Precise at 10 is already clamped to 20; drive to the edges instead
        let mut model = TempoModel::new(20, TempoMode::Precise);
        model.set_mode(TempoMode::Maelzel);
        assert_eq!(model.bpm(), 40);

        let mut model = TempoModel::new(250, TempoMode::Precise);
        model.set_mode(TempoMode::Maelzel);
        assert_eq!(model.bpm(), 208);

        // In-range tempo survives the switch untouched
        let mut model = TempoModel::new(96, TempoMode::Precise);
        let marking = model.set_mode(TempoMode::Maelzel);
        assert_eq!(model.bpm(), 96);
        assert_eq!(marking, "Andante");
    }

    #[test]
    fn test_switch_mode_toggles() {
        let mut model = TempoModel::default();
        model.switch_mode();
        assert_eq!(model.mode(), TempoMode::Precise);
        model.switch_mode();
        assert_eq!(model.mode(), TempoMode::Maelzel);
    }

    #[test]
    fn test_nudge_clamps() {
        let mut model = TempoModel::new(205, TempoMode::Maelzel);
        assert_eq!(model.nudge(10), 208);
        assert_eq!(model.nudge(-500), 40);
    }

    #[test]
    fn test_step_follows_dial_stops_in_maelzel_mode() {
        let mut model = TempoModel::new(60, TempoMode::Maelzel);
        assert_eq!(model.step_up(), 63);
        assert_eq!(model.step_up(), 66);
        assert_eq!(model.step_down(), 63);
        assert_eq!(model.step_down(), 60);
        assert_eq!(model.step_down(), 58);
    }

    #[test]
    fn test_step_saturates_at_dial_ends() {
        let mut model = TempoModel::new(208, TempoMode::Maelzel);
        assert_eq!(model.step_up(), 208);

        let mut model = TempoModel::new(40, TempoMode::Maelzel);
        assert_eq!(model.step_down(), 40);
    }

    #[test]
    fn test_step_is_single_bpm_in_precise_mode() {
        let mut model = TempoModel::new(100, TempoMode::Precise);
        assert_eq!(model.step_up(), 101);
        assert_eq!(model.step_down(), 100);
    }

    #[test]
    fn test_display_state() {
        let model = TempoModel::new(72, TempoMode::Precise);
        let state = model.display_state();
        assert_eq!(state.bpm, 72);
        assert_eq!(state.marking, "Adagio");
        assert_eq!(state.mode, TempoMode::Precise);
    }

    #[test]
    fn test_mode_display_names() {
        assert_eq!(TempoMode::Maelzel.to_string(), "Maelzel's metronome");
        assert_eq!(TempoMode::Precise.to_string(), "Precise tempo");
    }
}
