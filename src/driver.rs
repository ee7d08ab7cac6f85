//! Timer-driven progress source for the demo loop.
//!
//! The driver owns the current progress value and advances it one step per
//! interval until it reaches the maximum. It is a plain state machine: the
//! caller passes the clock in, so the render loop and tests drive it the
//! same way.

use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::error::{GeometryError, Result};

#[derive(Debug, Clone)]
pub struct ProgressDriver {
    progress: i32,
    max_value: i32,
    step: i32,
    interval: Duration,
    last_tick: Instant,
    running: bool,
    loop_when_done: bool,
}

impl ProgressDriver {
    pub fn new(max_value: i32, step: i32, interval: Duration, now: Instant) -> Result<Self> {
        if max_value <= 0 {
            return Err(GeometryError::invalid(
                "max_value",
                format!("{} must be positive", max_value),
            ));
        }
        if step <= 0 {
            return Err(GeometryError::invalid("step", format!("{} must be positive", step)));
        }
        if interval.is_zero() {
            return Err(GeometryError::invalid("interval", "must be non-zero"));
        }

        Ok(Self {
            progress: 0,
            max_value,
            step,
            interval,
            last_tick: now,
            running: true,
            loop_when_done: false,
        })
    }

    /// Wrap back to zero instead of halting at the maximum.
    pub fn looping(mut self, enabled: bool) -> Self {
        self.loop_when_done = enabled;
        self
    }

    pub fn paused(mut self) -> Self {
        self.running = false;
        self
    }

    pub fn progress(&self) -> i32 {
        self.progress
    }

    pub fn max_value(&self) -> i32 {
        self.max_value
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_finished(&self) -> bool {
        self.progress >= self.max_value
    }

    /// Advance if an interval has elapsed since the last step.
    /// Returns true when the progress value changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        if !self.running || now.saturating_duration_since(self.last_tick) < self.interval {
            return false;
        }
        self.last_tick = now;

        if self.is_finished() {
            if self.loop_when_done {
                self.progress = 0;
                debug!("Progress wrapped to 0");
                return true;
            }
            self.running = false;
            return false;
        }

        self.progress = self.progress.saturating_add(self.step).min(self.max_value);
        debug!(progress = self.progress, max = self.max_value, "Progress advanced");

        if self.is_finished() && !self.loop_when_done {
            self.running = false;
            info!("Progress complete at {}", self.max_value);
        }
        true
    }

    /// Reset to zero and resume stepping.
    pub fn restart(&mut self, now: Instant) {
        self.progress = 0;
        self.last_tick = now;
        self.running = true;
        info!("Progress restarted");
    }

    pub fn toggle_pause(&mut self, now: Instant) {
        if self.running {
            self.running = false;
        } else if !self.is_finished() || self.loop_when_done {
            self.running = true;
            self.last_tick = now;
        }
    }

    /// Jump straight to `progress`. Out-of-range values are rejected, not clamped.
    pub fn set_progress(&mut self, progress: i32) -> Result<()> {
        if !(0..=self.max_value).contains(&progress) {
            return Err(GeometryError::invalid(
                "progress",
                format!("{} is not within [0, {}]", progress, self.max_value),
            ));
        }
        self.progress = progress;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TICK: Duration = Duration::from_millis(150);

    fn driver(now: Instant) -> ProgressDriver {
        ProgressDriver::new(100, 1, TICK, now).unwrap()
    }

    #[test]
    fn waits_for_interval() {
        let start = Instant::now();
        let mut d = driver(start);
        assert!(!d.tick(start + Duration::from_millis(149)));
        assert_eq!(d.progress(), 0);
        assert!(d.tick(start + TICK));
        assert_eq!(d.progress(), 1);
    }

    #[test]
    fn halts_at_maximum() {
        let start = Instant::now();
        let mut d = driver(start);
        let mut now = start;
        for _ in 0..150 {
            now += TICK;
            d.tick(now);
        }
        assert_eq!(d.progress(), 100);
        assert!(d.is_finished());
        assert!(!d.is_running());
        assert!(!d.tick(now + TICK));
    }

    #[test]
    fn large_step_saturates() {
        let start = Instant::now();
        let mut d = ProgressDriver::new(10, 4, TICK, start).unwrap();
        let mut now = start;
        for _ in 0..3 {
            now += TICK;
            d.tick(now);
        }
        assert_eq!(d.progress(), 10);
    }

    #[test]
    fn step_near_i32_max_does_not_overflow() {
        let start = Instant::now();
        let mut d = ProgressDriver::new(i32::MAX, (1 << 30) + 1, TICK, start).unwrap();
        let mut now = start;
        for _ in 0..3 {
            now += TICK;
            d.tick(now);
        }
        assert_eq!(d.progress(), i32::MAX);
        assert!(d.is_finished());
        assert!(!d.is_running());
    }

    #[test]
    fn restart_resets_and_resumes() {
        let start = Instant::now();
        let mut d = driver(start);
        d.set_progress(100).unwrap();
        d.tick(start + TICK);
        assert!(!d.is_running());

        let later = start + TICK * 2;
        d.restart(later);
        assert_eq!(d.progress(), 0);
        assert!(d.is_running());
        assert!(d.tick(later + TICK));
        assert_eq!(d.progress(), 1);
    }

    #[test]
    fn looping_wraps_to_zero() {
        let start = Instant::now();
        let mut d = ProgressDriver::new(2, 1, TICK, start).unwrap().looping(true);
        let mut now = start;
        let mut seen = Vec::new();
        for _ in 0..4 {
            now += TICK;
            d.tick(now);
            seen.push(d.progress());
        }
        assert_eq!(seen, vec![1, 2, 0, 1]);
    }

    #[test]
    fn pause_stops_ticks() {
        let start = Instant::now();
        let mut d = driver(start);
        d.toggle_pause(start);
        assert!(!d.tick(start + TICK));
        d.toggle_pause(start + TICK);
        assert!(d.tick(start + TICK * 2));
    }

    #[test]
    fn set_progress_rejects_out_of_range() {
        let mut d = driver(Instant::now());
        assert!(d.set_progress(-1).is_err());
        assert!(d.set_progress(101).is_err());
        assert!(d.set_progress(42).is_ok());
        assert_eq!(d.progress(), 42);
    }

    #[test]
    fn invalid_construction() {
        let now = Instant::now();
        assert!(ProgressDriver::new(0, 1, TICK, now).is_err());
        assert!(ProgressDriver::new(100, 0, TICK, now).is_err());
        assert!(ProgressDriver::new(100, 1, Duration::ZERO, now).is_err());
    }
}
