use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

/// Per-iteration frame snapshot. Created at the start of a loop iteration and
/// dropped at its end.
#[derive(Debug, Copy, Clone)]
pub struct FrameContext {
    /// Frame counter value for this iteration (first iteration is `1`).
    pub frame: u64,

    /// Monotonic timestamp taken at the tick.
    pub now: Instant,

    /// Wall-clock time of the tick in seconds since the Unix epoch.
    ///
    /// Game entities (voyage departure/arrival, animation phases) are
    /// expressed in this clock.
    pub timestamp: f64,

    /// Time elapsed since the previous tick, in seconds.
    pub dt: f32,
}

impl FrameContext {
    /// Builds a context at a fixed wall-clock time. Useful for driving entity
    /// renderers outside the loop.
    pub fn at(frame: u64, timestamp: f64) -> Self {
        Self { frame, now: Instant::now(), timestamp, dt: 0.0 }
    }
}

/// Shared, read-only view of a clock's frame counter.
///
/// Cloned out of the clock so the counter stays readable while the renderer
/// that owns the clock is busy drawing.
#[derive(Debug, Clone, Default)]
pub struct FrameCounter(Rc<Cell<u64>>);

impl FrameCounter {
    #[inline]
    pub fn get(&self) -> u64 {
        self.0.get()
    }

    #[inline]
    fn advance(&self) -> u64 {
        let next = self.0.get().wrapping_add(1);
        self.0.set(next);
        next
    }
}

/// Frame clock producing `FrameContext` snapshots.
///
/// Delta time is clamped to avoid pathological values when the host stalls
/// (debugger, minimised window, background tab).
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Instant,
    counter: FrameCounter,
    dt_min: Duration,
    dt_max: Duration,
}

impl FrameClock {
    /// Creates a new clock with default clamps. The counter starts at zero.
    pub fn new() -> Self {
        Self::with_clamps(Duration::from_micros(100), Duration::from_millis(250))
    }

    /// Creates a clock with custom delta-time clamps.
    pub fn with_clamps(dt_min: Duration, dt_max: Duration) -> Self {
        debug_assert!(dt_min <= dt_max);
        Self {
            last: Instant::now(),
            counter: FrameCounter::default(),
            dt_min,
            dt_max,
        }
    }

    /// Number of ticks so far.
    #[inline]
    pub fn frame_count(&self) -> u64 {
        self.counter.get()
    }

    /// Handle that observes this clock's counter.
    #[inline]
    pub fn counter(&self) -> FrameCounter {
        self.counter.clone()
    }

    /// Increments the frame counter and captures the current time once.
    pub fn tick(&mut self) -> FrameContext {
        let now = Instant::now();
        let dt = now
            .saturating_duration_since(self.last)
            .clamp(self.dt_min, self.dt_max);
        self.last = now;

        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs_f64())
            .unwrap_or(0.0);

        FrameContext {
            frame: self.counter.advance(),
            now,
            timestamp,
            dt: dt.as_secs_f32(),
        }
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counter_starts_at_zero_and_increments_per_tick() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.frame_count(), 0);
        assert_eq!(clock.tick().frame, 1);
        assert_eq!(clock.tick().frame, 2);
        assert_eq!(clock.frame_count(), 2);
    }

    #[test]
    fn counter_handle_tracks_the_clock() {
        let mut clock = FrameClock::new();
        let counter = clock.counter();
        clock.tick();
        clock.tick();
        clock.tick();
        assert_eq!(counter.get(), 3);
    }

    #[test]
    fn dt_is_clamped() {
        let mut clock =
            FrameClock::with_clamps(Duration::from_millis(5), Duration::from_millis(10));
        let ctx = clock.tick();
        assert!(ctx.dt >= 0.005 - f32::EPSILON);
        assert!(ctx.dt <= 0.010 + f32::EPSILON);
    }

    #[test]
    fn timestamp_is_wall_clock_seconds() {
        let ctx = FrameClock::new().tick();
        // Anything after 2020-01-01.
        assert!(ctx.timestamp > 1_577_836_800.0);
    }
}
