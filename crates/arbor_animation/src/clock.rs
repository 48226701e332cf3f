//! Frame clock
//!
//! Turns the host's raw per-frame delta into the values the pose pass consumes.
//! Timers run on the raw delta; every rate computation uses the clamped one.

/// Timing for one frame
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameTime {
    /// Delta reported by the host, seconds
    pub raw_dt: f32,
    /// Delta clamped to the clock's maximum, seconds
    pub dt: f32,
    /// Sum of raw deltas since the clock started, seconds
    pub elapsed: f64,
    /// Frames ticked so far, starting at 1 for the first frame
    pub frame: u64,
}

/// Accumulates frame deltas and clamps them for rate computations
#[derive(Clone, Debug)]
pub struct FrameClock {
    max_dt: f32,
    elapsed: f64,
    frame: u64,
}

impl FrameClock {
    /// Create a clock whose clamped delta never exceeds `max_dt`
    pub fn new(max_dt: f32) -> Self {
        Self {
            max_dt,
            elapsed: 0.0,
            frame: 0,
        }
    }

    pub fn max_dt(&self) -> f32 {
        self.max_dt
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Advance by the host's raw delta
    ///
    /// Negative or non-finite deltas are treated as zero.
    pub fn tick(&mut self, raw_dt: f32) -> FrameTime {
        let raw_dt = if raw_dt.is_finite() { raw_dt.max(0.0) } else { 0.0 };
        self.elapsed += raw_dt as f64;
        self.frame += 1;
        FrameTime {
            raw_dt,
            dt: raw_dt.min(self.max_dt),
            elapsed: self.elapsed,
            frame: self.frame,
        }
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(0.1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stalled_frame_is_clamped() {
        let mut clock = FrameClock::new(0.1);
        let t = clock.tick(2.5);
        assert_eq!(t.dt, 0.1);
        assert_eq!(t.raw_dt, 2.5);
        assert_eq!(t.elapsed, 2.5);
    }

    #[test]
    fn test_garbage_delta_is_zero() {
        let mut clock = FrameClock::default();
        assert_eq!(clock.tick(f32::NAN).dt, 0.0);
        assert_eq!(clock.tick(-1.0).dt, 0.0);
        assert_eq!(clock.elapsed(), 0.0);
        assert_eq!(clock.tick(0.016).frame, 3);
    }
}
