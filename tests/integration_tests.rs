// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Integration tests for MetronomiQ
//!
//! These tests drive the tempo model and beat clock together the way the
//! event loop does, using a manual time source so no test sleeps.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use metronomiq::tempo::{TempoMode, TempoModel};
use metronomiq::timing::{interval_for_bpm, BeatClock, ClockState, TimeSource};

/// Manually advanced time source
#[derive(Clone)]
struct ManualTime {
    now: Rc<Cell<Instant>>,
}

impl ManualTime {
    fn new() -> Self {
        Self {
            now: Rc::new(Cell::new(Instant::now())),
        }
    }

    fn advance(&self, d: Duration) {
        self.now.set(self.now.get() + d);
    }
}

impl TimeSource for ManualTime {
    fn now(&self) -> Instant {
        self.now.get()
    }
}

fn drain(clock: &mut BeatClock<ManualTime>) -> u64 {
    let mut count = 0;
    while clock.tick() {
        count += 1;
    }
    count
}

/// Changing tempo while running restarts the cadence at the new interval
#[test]
fn test_tempo_change_retimes_running_clock() {
    let time = ManualTime::new();
    let mut model = TempoModel::new(120, TempoMode::Precise);
    let mut clock = BeatClock::with_time_source(time.clone());

    clock.start(interval_for_bpm(model.bpm())); // 500ms
    time.advance(Duration::from_millis(500));
    assert_eq!(drain(&mut clock), 1);

    // User types 200 BPM; the loop restarts the clock
    model.set_tempo_clamped(200);
    clock.restart(interval_for_bpm(model.bpm())); // 300ms

    // The old 500ms cadence would have clicked 500ms after the first click;
    // nothing may fire there
    time.advance(Duration::from_millis(299));
    assert_eq!(drain(&mut clock), 0);
    time.advance(Duration::from_millis(1));
    assert_eq!(drain(&mut clock), 1);
    assert_eq!(clock.state(), ClockState::Running(300));
}

/// Mode switching clamps the tempo and the clamped tempo drives the cadence
#[test]
fn test_mode_switch_clamps_and_retimes() {
    let time = ManualTime::new();
    let mut model = TempoModel::new(250, TempoMode::Precise);
    let mut clock = BeatClock::with_time_source(time.clone());
    clock.start(interval_for_bpm(model.bpm()));

    let marking = model.set_mode(TempoMode::Maelzel);
    assert_eq!(model.bpm(), 208);
    assert_eq!(marking, "Prestissimo");

    clock.restart(interval_for_bpm(model.bpm()));
    assert_eq!(clock.state(), ClockState::Running(288)); // 60000 / 208

    time.advance(Duration::from_millis(288 * 3));
    assert_eq!(drain(&mut clock), 3);
}

/// The display state always reflects the stored, clamped tempo
#[test]
fn test_display_state_tracks_clamping() {
    let mut model = TempoModel::new(120, TempoMode::Maelzel);

    model.set_tempo_clamped(1000);
    let state = model.display_state();
    assert_eq!(state.bpm, 208);
    assert_eq!(state.marking, "Prestissimo");

    model.set_tempo_clamped(0);
    let state = model.display_state();
    assert_eq!(state.bpm, 40);
    assert_eq!(state.marking, "Grave");
}

/// A full session: start, click for a while, change tempo, stop
#[test]
fn test_session_click_counts() {
    let time = ManualTime::new();
    let mut model = TempoModel::new(60, TempoMode::Precise);
    let mut clock = BeatClock::with_time_source(time.clone());

    // 60 BPM = one click per second; 5.5 seconds = 5 clicks
    clock.start(interval_for_bpm(model.bpm()));
    let mut clicks = 0;
    for _ in 0..55 {
        time.advance(Duration::from_millis(100));
        clicks += drain(&mut clock);
    }
    assert_eq!(clicks, 5);

    // Double the tempo, run another 2 seconds = 4 clicks
    model.set_tempo_clamped(120);
    clock.restart(interval_for_bpm(model.bpm()));
    let mut clicks = 0;
    for _ in 0..20 {
        time.advance(Duration::from_millis(100));
        clicks += drain(&mut clock);
    }
    assert_eq!(clicks, 4);

    clock.stop();
    time.advance(Duration::from_secs(10));
    assert_eq!(drain(&mut clock), 0);
    assert_eq!(clock.state(), ClockState::Stopped);
}

/// Strict and clamping entry points disagree only outside the range
#[test]
fn test_strict_and_clamped_entry_points_agree_in_range() {
    for bpm in [20u32, 72, 120, 208, 300] {
        let mut strict = TempoModel::new(120, TempoMode::Precise);
        let mut clamped = TempoModel::new(120, TempoMode::Precise);

        strict.set_tempo(bpm).unwrap();
        clamped.set_tempo_clamped(bpm);
        assert_eq!(strict.bpm(), clamped.bpm());
    }

    let mut strict = TempoModel::new(120, TempoMode::Precise);
    let mut clamped = TempoModel::new(120, TempoMode::Precise);
    assert!(strict.set_tempo(301).is_err());
    assert_eq!(clamped.set_tempo_clamped(301), 300);
}
