//! Solve stopwatch with a best time.
//!
//! The timer counts whole ticks of [`TICK`]; time fed in through
//! [`Timer::advance`] that does not fill a tick is carried over to the next
//! call, so frame-sized steps add up exactly.

use std::time::Duration;

use log::info;

/// Resolution of the stopwatch.
pub const TICK: Duration = Duration::from_millis(10);

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Timer {
    elapsed: Duration,
    carry: Duration,
    running: bool,
    best: Option<Duration>,
}

impl Timer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a stopped timer that already knows a best time.
    pub fn with_best(best: Option<Duration>) -> Self {
        Self {
            best,
            ..Self::default()
        }
    }

    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    #[inline]
    pub fn best(&self) -> Option<Duration> {
        self.best
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Starts a fresh run. Does nothing if already running.
    pub fn start(&mut self) {
        if self.running {
            return;
        }
        self.elapsed = Duration::ZERO;
        self.carry = Duration::ZERO;
        self.running = true;
    }

    /// Stops the run and records it if it beats the best time.
    ///
    /// Returns `true` when a new best time was set. Zero-length runs are
    /// never recorded.
    pub fn stop(&mut self) -> bool {
        if !self.running {
            return false;
        }
        self.running = false;

        let is_record = match self.best {
            _ if self.elapsed.is_zero() => false,
            Some(best) => self.elapsed < best,
            None => true,
        };
        if is_record {
            info!("new best time {}", format_time(self.elapsed));
            self.best = Some(self.elapsed);
        }
        is_record
    }

    /// Stops the run without comparing it against the best time.
    pub fn cancel(&mut self) {
        self.running = false;
    }

    /// Stops a running timer, or starts a stopped one.
    ///
    /// Returns `true` when stopping set a new best time.
    pub fn toggle(&mut self) -> bool {
        if self.running {
            self.stop()
        } else {
            self.start();
            false
        }
    }

    /// Stops the timer and zeroes the elapsed time, keeping the best time.
    pub fn clear(&mut self) {
        self.running = false;
        self.elapsed = Duration::ZERO;
        self.carry = Duration::ZERO;
    }

    /// Feeds wall-clock time into a running timer.
    pub fn advance(&mut self, dt: Duration) {
        if !self.running {
            return;
        }
        let total = self.carry + dt;
        let ticks = total.as_nanos() / TICK.as_nanos();
        let counted = TICK * u32::try_from(ticks).unwrap_or(u32::MAX);
        self.elapsed += counted;
        self.carry = total - counted;
    }
}

/// Formats a duration as `mm:ss.cc`.
pub fn format_time(time: Duration) -> String {
    let millis = time.as_millis();
    let minutes = millis / 60_000;
    let seconds = (millis % 60_000) / 1000;
    let centis = (millis % 1000) / 10;
    format!("{minutes:02}:{seconds:02}.{centis:02}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_for(timer: &mut Timer, total_ms: u64, step_ms: u64) {
        let mut remaining = total_ms;
        while remaining > 0 {
            let step = step_ms.min(remaining);
            timer.advance(Duration::from_millis(step));
            remaining -= step;
        }
    }

    #[test]
    fn test_timer_counts_elapsed_time_and_sets_best() {
        let mut timer = Timer::new();
        timer.start();
        run_for(&mut timer, 1500, 10);
        assert!(timer.stop());
        assert_eq!(timer.elapsed(), Duration::from_millis(1500));
        assert_eq!(timer.best(), Some(Duration::from_millis(1500)));
    }

    #[test]
    fn test_uneven_frames_carry_partial_ticks() {
        let mut timer = Timer::new();
        timer.start();
        run_for(&mut timer, 1500, 16);
        timer.stop();
        assert_eq!(timer.elapsed(), Duration::from_millis(1500));
    }

    #[test]
    fn test_start_while_running_is_a_noop() {
        let mut timer = Timer::new();
        timer.start();
        run_for(&mut timer, 200, 10);
        timer.start();
        assert_eq!(timer.elapsed(), Duration::from_millis(200));
        assert!(timer.is_running());
    }

    #[test]
    fn test_slower_run_keeps_previous_best() {
        let mut timer = Timer::with_best(Some(Duration::from_millis(900)));
        timer.start();
        run_for(&mut timer, 1200, 10);
        assert!(!timer.stop());
        assert_eq!(timer.best(), Some(Duration::from_millis(900)));

        // restarting zeroes the previous run
        timer.start();
        assert_eq!(timer.elapsed(), Duration::ZERO);
        run_for(&mut timer, 500, 10);
        assert!(timer.stop());
        assert_eq!(timer.best(), Some(Duration::from_millis(500)));
    }

    #[test]
    fn test_cancel_and_empty_runs_do_not_record() {
        let mut timer = Timer::new();
        timer.start();
        run_for(&mut timer, 300, 10);
        timer.cancel();
        assert_eq!(timer.best(), None);
        assert_eq!(timer.elapsed(), Duration::from_millis(300));

        timer.start();
        assert!(!timer.stop());
        assert_eq!(timer.best(), None);
    }

    #[test]
    fn test_stopped_timer_ignores_time() {
        let mut timer = Timer::new();
        timer.advance(Duration::from_secs(5));
        assert_eq!(timer.elapsed(), Duration::ZERO);
    }

    #[test]
    fn test_toggle() {
        let mut timer = Timer::new();
        assert!(!timer.toggle());
        assert!(timer.is_running());
        run_for(&mut timer, 50, 10);
        assert!(timer.toggle());
        assert!(!timer.is_running());
    }

    #[test]
    fn test_huge_step_saturates_instead_of_wrapping() {
        let mut timer = Timer::new();
        timer.start();
        timer.advance(Duration::from_secs(u64::from(u32::MAX)));
        assert_eq!(timer.elapsed(), TICK * u32::MAX);
    }

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(Duration::ZERO), "00:00.00");
        assert_eq!(format_time(Duration::from_millis(1500)), "00:01.50");
        assert_eq!(format_time(Duration::from_millis(83_456)), "01:23.45");
    }
}
