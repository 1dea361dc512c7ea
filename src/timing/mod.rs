// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Timing and clock module.
//!
//! This module provides the beat clock that paces click playback.

pub mod clock;

pub use clock::{interval_for_bpm, BeatClock, ClockState, MonotonicTime, TimeSource};
