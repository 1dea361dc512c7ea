// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Tempo module.
//!
//! Owns the current tempo and mode, and resolves BPM values to traditional
//! tempo markings.

pub mod marking;
pub mod model;

pub use marking::{lookup_marking, nearest_stop, Marking, MAELZEL_STOPS, MARKINGS, MAX_BPM, MIN_BPM};
pub use model::{DisplayState, TempoError, TempoMode, TempoModel, DEFAULT_BPM};
