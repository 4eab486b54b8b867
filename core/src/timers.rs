/// # Timers
/// Two 8-bit counters that count down to zero at 60Hz.
///
/// - `delay` can be read and written by programs
/// - `sound` can only be written; a tone plays for as long as it's nonzero
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct Timers {
    pub delay: u8,
    pub sound: u8,
}

impl Timers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decrements both timers, stopping at 0
    pub fn tick(&mut self) {
        self.delay = self.delay.saturating_sub(1);
        self.sound = self.sound.saturating_sub(1);
    }

    /// Whether a tone should currently be playing
    pub fn is_sounding(&self) -> bool {
        self.sound != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_decrements_independently() {
        let mut timers = Timers { delay: 0, sound: 3 };
        timers.tick();
        assert_eq!(timers, Timers { delay: 0, sound: 2 });
        for _ in 0..3 {
            timers.tick();
        }
        assert_eq!(timers.sound, 0);
        timers.tick();
        assert_eq!(timers.sound, 0);
        assert_eq!(timers.delay, 0);
    }

    #[test]
    fn test_tick_decrements_delay() {
        let mut timers = Timers { delay: 2, sound: 0 };
        timers.tick();
        assert_eq!(timers.delay, 1);
    }

    #[test]
    fn test_is_sounding() {
        let mut timers = Timers::new();
        assert!(!timers.is_sounding());
        timers.sound = 1;
        assert!(timers.is_sounding());
        timers.tick();
        assert!(!timers.is_sounding());
    }
}
