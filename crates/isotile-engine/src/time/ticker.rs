/// Framerate used when none (or an invalid one) is given.
pub const DEFAULT_FRAMERATE: f32 = 60.0;

/// Fractional frame accumulator.
///
/// Each `advance(elapsed)` adds `elapsed * framerate` to an internal clock and
/// reports how many whole steps were crossed. Several steps per call is normal
/// after a slow frame; the caller runs them back to back.
#[derive(Debug, Clone)]
pub struct Ticker {
    framerate: f32,
    clock: f32,
    frozen: bool,
}

impl Ticker {
    pub fn new(framerate: f32) -> Self {
        let framerate = if framerate > 0.0 { framerate } else { DEFAULT_FRAMERATE };
        Self { framerate, clock: 0.0, frozen: false }
    }

    #[inline]
    pub fn framerate(&self) -> f32 {
        self.framerate
    }

    /// Ignores non-positive (and NaN) rates; returns whether `framerate` was taken.
    pub fn set_framerate(&mut self, framerate: f32) -> bool {
        if framerate > 0.0 {
            self.framerate = framerate;
            true
        } else {
            log::debug!("ignoring non-positive framerate {framerate}");
            false
        }
    }

    #[inline]
    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// A frozen ticker accumulates nothing; thawing resumes from the stored fraction.
    #[inline]
    pub fn set_frozen(&mut self, frozen: bool) {
        self.frozen = frozen;
    }

    /// Accumulates `elapsed` seconds and returns the number of whole steps due.
    /// Non-positive and non-finite spans are ignored and leave the clock as it was.
    pub fn advance(&mut self, elapsed: f32) -> u32 {
        if self.frozen || !(elapsed > 0.0) {
            return 0;
        }

        let clock = self.clock + elapsed * self.framerate;
        if !clock.is_finite() {
            log::debug!("ticker: ignoring unbounded elapsed time {elapsed}");
            return 0;
        }

        let steps = clock.floor();
        self.clock = clock - steps;
        steps as u32
    }
}

impl Default for Ticker {
    fn default() -> Self {
        Self::new(DEFAULT_FRAMERATE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_second_is_framerate_steps() {
        let mut t = Ticker::new(60.0);
        assert_eq!(t.advance(1.0), 60);
    }

    #[test]
    fn fractions_carry_over() {
        let mut t = Ticker::new(10.0);
        assert_eq!(t.advance(0.05), 0);
        assert_eq!(t.advance(0.05), 1);
        assert_eq!(t.advance(0.25), 2);
    }

    #[test]
    fn catches_up_after_stall() {
        let mut t = Ticker::new(60.0);
        assert_eq!(t.advance(0.25), 15);
    }

    #[test]
    fn invalid_framerate_keeps_previous() {
        let mut t = Ticker::new(-5.0);
        assert_eq!(t.framerate(), DEFAULT_FRAMERATE);
        assert!(!t.set_framerate(0.0));
        assert!(!t.set_framerate(f32::NAN));
        assert!(t.set_framerate(30.0));
        assert_eq!(t.framerate(), 30.0);
    }

    #[test]
    fn frozen_ticker_does_not_step() {
        let mut t = Ticker::new(60.0);
        t.set_frozen(true);
        assert_eq!(t.advance(1.0), 0);
        t.set_frozen(false);
        assert_eq!(t.advance(0.5), 30);
    }

    #[test]
    fn infinite_elapsed_leaves_ticker_usable() {
        let mut ticker = Ticker::new(60.0);
        assert_eq!(ticker.advance(f32::INFINITY), 0);
        assert_eq!(ticker.advance(f32::NAN), 0);
        assert_eq!(ticker.advance(f32::MAX), 0);
        assert_eq!(ticker.advance(0.5), 30);
    }
}
