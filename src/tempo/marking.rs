// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Traditional tempo marking table.
//!
//! Maps integer BPM values to the classical Italian tempo names. The table
//! covers the full precise-mode range (20-300 BPM) with contiguous,
//! non-overlapping records, so every BPM in range matches exactly one name.

/// Lowest tempo the table (and precise mode) covers
pub const MIN_BPM: u32 = 20;

/// Highest tempo the table (and precise mode) covers
pub const MAX_BPM: u32 = 300;

/// One tempo marking record: an inclusive BPM range and its name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Marking {
    /// Inclusive lower bound
    pub low: u32,
    /// Inclusive upper bound
    pub high: u32,
    /// Traditional Italian name
    pub name: &'static str,
}

/// The marking table, ordered by ascending tempo.
///
/// Boundary values follow the common convention: each grade runs up to and
/// including its upper bound, the next grade starts one BPM above.
pub const MARKINGS: [Marking; 10] = [
    Marking { low: 20, high: 24, name: "Larghissimo" },
    Marking { low: 25, high: 40, name: "Grave" },
    Marking { low: 41, high: 60, name: "Largo" },
    Marking { low: 61, high: 66, name: "Larghetto" },
    Marking { low: 67, high: 76, name: "Adagio" },
    Marking { low: 77, high: 108, name: "Andante" },
    Marking { low: 109, high: 120, name: "Moderato" },
    Marking { low: 121, high: 168, name: "Allegro" },
    Marking { low: 169, high: 200, name: "Presto" },
    Marking { low: 201, high: 300, name: "Prestissimo" },
];

/// The discrete dial stops of a mechanical (Maelzel) metronome.
///
/// Classical dials step by 2 up to 60, by 3 up to 72, by 4 up to 120,
/// by 6 up to 144 and by 8 up to 208.
pub const MAELZEL_STOPS: [u32; 39] = [
    40, 42, 44, 46, 48, 50, 52, 54, 56, 58, 60, // by 2
    63, 66, 69, 72, // by 3
    76, 80, 84, 88, 92, 96, 100, 104, 108, 112, 116, 120, // by 4
    126, 132, 138, 144, // by 6
    152, 160, 168, 176, 184, 192, 200, 208, // by 8
];

/// Look up the tempo marking for a BPM value.
///
/// Values below 20 fall into the lowest grade and values above 300 into the
/// highest, so the lookup is total even for out-of-range input.
pub fn lookup_marking(bpm: u32) -> &'static str {
    for marking in &MARKINGS {
        if bpm <= marking.high {
            return marking.name;
        }
    }
    MARKINGS[MARKINGS.len() - 1].name
}

/// Index of the dial stop closest to `bpm` (ties resolve downward)
pub fn nearest_stop(bpm: u32) -> usize {
    let mut best = 0;
    for (i, &stop) in MAELZEL_STOPS.iter().enumerate() {
        if stop.abs_diff(bpm) < MAELZEL_STOPS[best].abs_diff(bpm) {
            best = i;
        }
    }
    best
}
