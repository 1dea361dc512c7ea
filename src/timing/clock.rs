// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Beat clock implementation.
//!
//! A poll-driven periodic signal: the event loop calls [`BeatClock::tick`]
//! each iteration and plays a click whenever it returns `true`. The first
//! click fires one full interval after `start` (the clock counts off, it
//! does not click on the downbeat of the call itself).
//!
//! No real-time guarantees: a late poll produces a late click. Deadlines
//! advance from the scheduled time rather than the observed time, so polling
//! latency does not accumulate into drift.

use std::time::{Duration, Instant};

use tracing::debug;

/// Source of monotonic time, a seam so the clock is testable without sleeping
pub trait TimeSource {
    fn now(&self) -> Instant;
}

/// Production time source backed by `Instant::now`
#[derive(Debug, Clone, Copy, Default)]
pub struct MonotonicTime;

impl TimeSource for MonotonicTime {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Beat clock state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockState {
    Stopped,
    /// Running with the given interval in milliseconds
    Running(u64),
}

/// Compute the click interval for a tempo: 60 000 / BPM milliseconds
/// (integer division, 1 ms resolution)
pub fn interval_for_bpm(bpm: u32) -> Duration {
    Duration::from_millis(60_000 / bpm.max(1) as u64)
}

/// Periodic beat signal
///
/// State machine: `Stopped --start--> Running`, `Running --stop--> Stopped`,
/// `Running --restart--> Running` (new interval). `stop` on a stopped clock
/// is a no-op. The clock never self-transitions.
#[derive(Debug)]
pub struct BeatClock<T: TimeSource = MonotonicTime> {
    /// Time source
    time: T,
    /// Current state
    state: ClockState,
    /// Interval between clicks while running
    interval: Duration,
    /// Next scheduled click deadline
    deadline: Option<Instant>,
    /// Clicks emitted since the last start
    ticks: u64,
}

impl BeatClock<MonotonicTime> {
    /// Create a stopped clock on the system monotonic time
    pub fn new() -> Self {
        Self::with_time_source(MonotonicTime)
    }
}

impl Default for BeatClock<MonotonicTime> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: TimeSource> BeatClock<T> {
    /// Create a stopped clock on a custom time source
    pub fn with_time_source(time: T) -> Self {
        Self {
            time,
            state: ClockState::Stopped,
            interval: Duration::ZERO,
            deadline: None,
            ticks: 0,
        }
    }

    /// Current state
    pub fn state(&self) -> ClockState {
        self.state
    }

    /// Whether the clock is running
    pub fn is_running(&self) -> bool {
        matches!(self.state, ClockState::Running(_))
    }

    /// Clicks emitted since the last start
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Begin the cadence. The first click fires one interval from now.
    pub fn start(&mut self, interval: Duration) {
        let interval = interval.max(Duration::from_millis(1));
        self.state = ClockState::Running(interval.as_millis() as u64);
        self.interval = interval;
        self.deadline = Some(self.time.now() + interval);
        self.ticks = 0;
        debug!(interval_ms = interval.as_millis() as u64, "clock started");
    }

    /// Stop and start with a new interval.
    ///
    /// The old cadence is discarded before the new one begins: no click from
    /// the previous interval can fire after this call, and the next click
    /// lands one new interval after it.
    pub fn restart(&mut self, interval: Duration) {
        self.stop();
        self.start(interval);
    }

    /// Halt the cadence. Idempotent; takes effect before returning, so no
    /// previously scheduled click is observed afterwards.
    pub fn stop(&mut self) {
        if self.is_running() {
            debug!(ticks = self.ticks, "clock stopped");
        }
        self.state = ClockState::Stopped;
        self.deadline = None;
    }

    /// Poll the clock. Returns `true` when a click is due; emits at most one
    /// click per call, so a delayed poll catches up over successive calls.
    pub fn tick(&mut self) -> bool {
        let Some(deadline) = self.deadline else {
            return false;
        };

        if self.time.now() >= deadline {
            self.deadline = Some(deadline + self.interval);
            self.ticks += 1;
            return true;
        }

        false
    }

    /// Time until the next scheduled click, zero if due or stopped.
    /// Used as the event-loop poll timeout.
    pub fn time_until_next_tick(&self) -> Duration {
        match self.deadline {
            Some(deadline) => deadline.saturating_duration_since(self.time.now()),
            None => Duration::ZERO,
        }
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::ManualTime;
    use super::*;

    fn manual_clock() -> (BeatClock<ManualTime>, ManualTime) {
        let time = ManualTime::new();
        let clock = BeatClock::with_time_source(time.clone());
        (clock, time)
    }

    /// Drain all due clicks at the current instant
    fn drain(clock: &mut BeatClock<ManualTime>) -> u64 {
        let mut count = 0;
        while clock.tick() {
            count += 1;
        }
        count
    }

    #[test]
    fn test_initial_state() {
        let clock = BeatClock::new();
        assert_eq!(clock.state(), ClockState::Stopped);
        assert!(!clock.is_running());
        assert_eq!(clock.ticks(), 0);
    }

    #[test]
    fn test_interval_for_bpm() {
        assert_eq!(interval_for_bpm(120), Duration::from_millis(500));
        assert_eq!(interval_for_bpm(60), Duration::from_millis(1000));
        assert_eq!(interval_for_bpm(40), Duration::from_millis(1500));
        // Integer division, matching the original interval arithmetic
        assert_eq!(interval_for_bpm(208), Duration::from_millis(288));
        assert_eq!(interval_for_bpm(300), Duration::from_millis(200));
    }

    #[test]
    fn test_start_records_interval_in_state() {
        let (mut clock, _time) = manual_clock();
        clock.start(Duration::from_millis(500));
        assert_eq!(clock.state(), ClockState::Running(500));
    }

    #[test]
    fn test_no_click_before_first_interval() {
        let (mut clock, time) = manual_clock();
        clock.start(Duration::from_millis(500));

        assert!(!clock.tick()); // immediately after start
        time.advance(Duration::from_millis(499));
        assert!(!clock.tick());
        time.advance(Duration::from_millis(1));
        assert!(clock.tick()); // exactly one interval in
    }

    #[test]
    fn test_stop_before_first_interval_emits_nothing() {
        let (mut clock, time) = manual_clock();
        clock.start(Duration::from_millis(500));
        clock.stop();

        time.advance(Duration::from_millis(2000));
        assert_eq!(drain(&mut clock), 0);
        assert_eq!(clock.ticks(), 0);
    }

    #[test]
    fn test_two_clicks_in_1200ms_at_500ms_interval() {
        let (mut clock, time) = manual_clock();
        clock.start(Duration::from_millis(500));

        // Clicks due at 500 and 1000; the 1500 deadline has not been reached
        time.advance(Duration::from_millis(1200));
        assert_eq!(drain(&mut clock), 2);
        clock.stop();
        assert_eq!(clock.ticks(), 2);
    }

    #[test]
    fn test_cadence_does_not_drift_with_late_polls() {
        let (mut clock, time) = manual_clock();
        clock.start(Duration::from_millis(500));

        // Poll 70ms late; the next deadline still derives from the schedule
        time.advance(Duration::from_millis(570));
        assert!(clock.tick());
        assert!(!clock.tick());

        // Second click is due at 1000, not 1070
        time.advance(Duration::from_millis(430));
        assert!(clock.tick());
    }

    #[test]
    fn test_restart_supersedes_old_cadence() {
        let (mut clock, time) = manual_clock();
        clock.start(Duration::from_millis(500));

        // 200ms in, retime to 300ms. The old 500ms deadline must not fire.
        time.advance(Duration::from_millis(200));
        clock.restart(Duration::from_millis(300));

        time.advance(Duration::from_millis(299)); // 1ms before the old deadline
        assert!(!clock.tick());
        time.advance(Duration::from_millis(1)); // exactly restart + 300ms
        assert!(clock.tick());
        assert_eq!(clock.state(), ClockState::Running(300));
    }

    #[test]
    fn test_stop_is_idempotent() {
        let (mut clock, _time) = manual_clock();
        clock.start(Duration::from_millis(500));
        clock.stop();
        clock.stop();
        assert_eq!(clock.state(), ClockState::Stopped);
    }

    #[test]
    fn test_restart_resets_tick_count() {
        let (mut clock, time) = manual_clock();
        clock.start(Duration::from_millis(100));
        time.advance(Duration::from_millis(350));
        assert_eq!(drain(&mut clock), 3);

        clock.restart(Duration::from_millis(100));
        assert_eq!(clock.ticks(), 0);
    }

    #[test]
    fn test_time_until_next_tick() {
        let (mut clock, time) = manual_clock();
        assert_eq!(clock.time_until_next_tick(), Duration::ZERO);

        clock.start(Duration::from_millis(500));
        assert_eq!(clock.time_until_next_tick(), Duration::from_millis(500));

        time.advance(Duration::from_millis(300));
        assert_eq!(clock.time_until_next_tick(), Duration::from_millis(200));

        time.advance(Duration::from_millis(400)); // past the deadline
        assert_eq!(clock.time_until_next_tick(), Duration::ZERO);
    }
}
