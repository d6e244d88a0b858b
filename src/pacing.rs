use std::thread;
use std::time::{Duration, Instant};

use log::warn;

use crate::config::TimingConfig;

/// Converts wall-clock time into a whole number of fixed simulation steps.
#[derive(Clone, Debug)]
pub struct FixedStep {
    step: Duration,
    backlog: Duration,
    max_steps: u32,
}

impl FixedStep {
    /// # Panics
    ///
    /// If `ticks_per_second` is not a positive finite rate. Use
    /// [`FixedStep::from_timing`] with a validated config to rule that out.
    pub fn new(ticks_per_second: f64, max_steps: u32) -> Self {
        FixedStep {
            step: Duration::from_secs_f64(1.0 / ticks_per_second),
            backlog: Duration::from_secs(0),
            max_steps: max_steps.max(1),
        }
    }

    pub fn from_timing(timing: &TimingConfig) -> Self {
        FixedStep::new(timing.ticks_per_second, timing.max_steps_per_frame)
    }

    pub fn step(&self) -> Duration {
        self.step
    }

    pub fn backlog(&self) -> Duration {
        self.backlog
    }

    /// Adds `elapsed` to the backlog and returns how many steps are now due.
    /// If more than the cap is owed the extra time is thrown away rather than
    /// letting the simulation fall further behind.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        self.backlog += elapsed;

        let mut due = 0;
        while self.backlog >= self.step && due < self.max_steps {
            self.backlog -= self.step;
            due += 1;
        }

        if self.backlog >= self.step {
            warn!(
                "simulation is {:.1} ms behind, dropping backlog",
                self.backlog.as_secs_f64() * 1000.0
            );
            self.backlog = Duration::from_secs(0);
        }
        due
    }
}

/// Holds the render loop to a target frame rate.
#[derive(Clone, Debug)]
pub struct FramePacer {
    budget: Duration,
    frame_start: Instant,
}

impl FramePacer {
    /// # Panics
    ///
    /// If `frames_per_second` is not a positive finite rate.
    pub fn new(frames_per_second: f64) -> Self {
        FramePacer {
            budget: Duration::from_secs_f64(1.0 / frames_per_second),
            frame_start: Instant::now(),
        }
    }

    pub fn from_timing(timing: &TimingConfig) -> Self {
        FramePacer::new(timing.frames_per_second)
    }

    /// Starts a new frame and returns the time since the previous one began.
    pub fn begin(&mut self) -> Duration {
        let now = Instant::now();
        let elapsed = now.saturating_duration_since(self.frame_start);
        self.frame_start = now;
        elapsed
    }

    /// Frame budget left as of `now`.
    pub fn remaining(&self, now: Instant) -> Duration {
        let spent = now.saturating_duration_since(self.frame_start);
        self.budget.checked_sub(spent).unwrap_or_default()
    }

    /// Sleeps out whatever is left of the current frame.
    pub fn finish(&self) {
        let idle = self.remaining(Instant::now());
        if idle > Duration::from_secs(0) {
            thread::sleep(idle);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_steps_only() {
        let mut clock = FixedStep::new(100.0, 8);
        assert_eq!(clock.step(), Duration::from_millis(10));
        assert_eq!(clock.advance(Duration::from_millis(25)), 2);
        assert_eq!(clock.backlog(), Duration::from_millis(5));
        assert_eq!(clock.advance(Duration::from_millis(5)), 1);
        assert_eq!(clock.backlog(), Duration::from_millis(0));
    }

    #[test]
    fn test_short_frames_accumulate() {
        let mut clock = FixedStep::new(100.0, 8);
        assert_eq!(clock.advance(Duration::from_millis(4)), 0);
        assert_eq!(clock.advance(Duration::from_millis(4)), 0);
        assert_eq!(clock.advance(Duration::from_millis(4)), 1);
        assert_eq!(clock.backlog(), Duration::from_millis(2));
    }

    #[test]
    fn test_backlog_is_capped() {
        let mut clock = FixedStep::new(100.0, 3);
        assert_eq!(clock.advance(Duration::from_millis(500)), 3);
        assert_eq!(clock.backlog(), Duration::from_secs(0));
        assert_eq!(clock.advance(Duration::from_millis(10)), 1);
    }

    #[test]
    #[should_panic]
    fn test_zero_tick_rate_panics() {
        FixedStep::new(0.0, 8);
    }

    #[test]
    #[should_panic]
    fn test_nan_frame_rate_panics() {
        FramePacer::new(f64::NAN);
    }

    #[test]
    fn test_from_validated_timing() {
        let timing = TimingConfig {
            ticks_per_second: 50.0,
            frames_per_second: 25.0,
            max_steps_per_frame: 2,
        };
        let mut clock = FixedStep::from_timing(&timing);
        assert_eq!(clock.step(), Duration::from_millis(20));
        assert_eq!(clock.advance(Duration::from_millis(100)), 2);

        let pacer = FramePacer::from_timing(&timing);
        assert_eq!(pacer.remaining(pacer.frame_start), Duration::from_millis(40));
    }

    #[test]
    fn test_remaining_budget() {
        let pacer = FramePacer::new(50.0);
        let start = pacer.frame_start;
        assert_eq!(pacer.remaining(start), Duration::from_millis(20));
        assert_eq!(pacer.remaining(start + Duration::from_millis(15)), Duration::from_millis(5));
        assert_eq!(pacer.remaining(start + Duration::from_millis(40)), Duration::from_secs(0));
    }

    #[test]
    fn test_begin_measures_frame_time() {
        let mut pacer = FramePacer::new(1000.0);
        thread::sleep(Duration::from_millis(3));
        assert!(pacer.begin() >= Duration::from_millis(3));
        assert!(pacer.begin() < Duration::from_secs(1));
    }
}
