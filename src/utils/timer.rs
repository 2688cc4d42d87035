//! Timing helpers
//!
//! Scenario durations go into results as milliseconds; the stopwatch laps
//! the phases of composite step flows.

#![allow(dead_code)]

use std::time::{Duration, Instant};

/// Measures one scenario or step duration
#[derive(Debug)]
pub struct Timer {
    start: Instant,
    label: String,
}

impl Timer {
    /// Create and start a new timer
    pub fn start(label: impl Into<String>) -> Self {
        Self {
            start: Instant::now(),
            label: label.into(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Elapsed time in milliseconds, the unit scenario results carry
    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed().as_millis() as u64
    }

    /// Consume the timer, log the measurement, and return it
    pub fn finish(self) -> u64 {
        let elapsed_ms = self.elapsed_ms();
        tracing::debug!("{}: {}ms", self.label, elapsed_ms);
        elapsed_ms
    }
}

/// Lap-based stopwatch for multi-phase flows
#[derive(Debug, Default)]
pub struct Stopwatch {
    laps: Vec<(String, Duration)>,
    start: Option<Instant>,
}

impl Stopwatch {
    pub fn new() -> Self {
        Self {
            laps: Vec::new(),
            start: Some(Instant::now()),
        }
    }

    /// Record the time since the previous lap (or since start)
    pub fn lap(&mut self, label: impl Into<String>) {
        let elapsed = self
            .start
            .map(|s| s.elapsed())
            .unwrap_or(Duration::ZERO);
        self.laps.push((label.into(), elapsed));
    }

    pub fn total_ms(&self) -> u64 {
        self.start
            .map(|s| s.elapsed().as_millis() as u64)
            .unwrap_or(0)
    }

    /// Per-lap durations (not cumulative)
    pub fn lap_times(&self) -> Vec<(String, Duration)> {
        let mut times = Vec::new();
        let mut prev = Duration::ZERO;

        for (label, cumulative) in &self.laps {
            times.push((label.clone(), cumulative.saturating_sub(prev)));
            prev = *cumulative;
        }

        times
    }

    /// One line per lap plus the total, for debug logs
    pub fn format(&self) -> String {
        let mut output = String::new();
        for (label, duration) in self.lap_times() {
            output.push_str(&format!("{}: {}ms\n", label, duration.as_millis()));
        }
        output.push_str(&format!("Total: {}ms", self.total_ms()));
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;

    #[test]
    fn test_timer_measures_elapsed() {
        let timer = Timer::start("test");
        sleep(Duration::from_millis(10));
        assert!(timer.elapsed_ms() >= 10);
        assert!(timer.finish() >= 10);
    }

    #[test]
    fn test_stopwatch_laps_are_deltas() {
        let mut watch = Stopwatch::new();
        sleep(Duration::from_millis(10));
        watch.lap("first");
        sleep(Duration::from_millis(10));
        watch.lap("second");

        let times = watch.lap_times();
        assert_eq!(times.len(), 2);
        assert!(times[1].1 < watch.laps[1].1, "second lap is a delta, not cumulative");

        let formatted = watch.format();
        assert!(formatted.contains("first"));
        assert!(formatted.contains("Total:"));
    }
}
