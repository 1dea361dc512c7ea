// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! MetronomiQ - a terminal metronome.
//!
//! Emits audible clicks at a selected tempo and shows the traditional tempo
//! marking. Two modes: Maelzel's metronome (the classical dial, 40-208 BPM,
//! discrete stops) and precise tempo (20-300 BPM, 1 BPM steps).

pub mod audio;
pub mod clipboard;
pub mod config;
pub mod tempo;
pub mod timing;
pub mod ui;

pub use audio::ClickEngine;
pub use clipboard::{ClipboardSink, NullClipboard, Osc52Clipboard};
pub use config::Settings;
pub use tempo::{TempoError, TempoMode, TempoModel};
pub use timing::{interval_for_bpm, BeatClock, ClockState};
