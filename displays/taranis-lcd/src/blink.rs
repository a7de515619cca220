//! Blink phase timer
//!
//! Counts 10 ms ticks. A full blink period is 128 ticks (1.28 s); the
//! second half of each period is the "on" phase during which blinking
//! elements are drawn inverted.

/// Bit of the tick counter selecting the blink phase
const BLINK_PHASE_BIT: u16 = 1 << 6;

/// Free-running 10 ms blink counter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BlinkTimer {
    ticks_10ms: u16,
}

impl BlinkTimer {
    /// Create a timer at tick zero ("off" phase)
    pub const fn new() -> Self {
        Self { ticks_10ms: 0 }
    }

    /// Advance by one 10 ms tick
    pub fn tick(&mut self) {
        self.ticks_10ms = self.ticks_10ms.wrapping_add(1);
    }

    /// Advance by an elapsed duration in milliseconds
    pub fn advance_ms(&mut self, elapsed_ms: u32) {
        self.ticks_10ms = self.ticks_10ms.wrapping_add((elapsed_ms / 10) as u16);
    }

    /// Current tick count
    pub const fn ticks(&self) -> u16 {
        self.ticks_10ms
    }

    /// Whether blinking elements are currently shown inverted
    pub const fn is_on_phase(&self) -> bool {
        self.ticks_10ms & BLINK_PHASE_BIT != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_flips_every_64_ticks() {
        let mut timer = BlinkTimer::new();
        assert!(!timer.is_on_phase());

        for _ in 0..63 {
            timer.tick();
        }
        assert!(!timer.is_on_phase());

        timer.tick();
        assert!(timer.is_on_phase());

        timer.advance_ms(640);
        assert_eq!(timer.ticks(), 128);
        assert!(!timer.is_on_phase());
    }

    #[test]
    fn test_wraps() {
        let mut timer = BlinkTimer::new();
        timer.advance_ms(u16::MAX as u32 * 10);
        timer.tick();
        assert_eq!(timer.ticks(), 0);
    }
}
