/// The delay and sound countdown timers.
///
/// Both count down by one per `tick` and stop at zero. How often `tick`
/// runs is up to whoever drives the emulator.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Timers {
    pub delay: u8,
    pub sound: u8,
}

impl Timers {
    pub fn new() -> Timers {
        Timers::default()
    }

    pub fn tick(&mut self) {
        self.delay = self.delay.saturating_sub(1);
        self.sound = self.sound.saturating_sub(1);
    }

    /// The buzzer sounds while the sound timer is non-zero.
    pub fn sound_active(&self) -> bool {
        self.sound > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn tick_stops_at_zero() {
        let mut timers = Timers { delay: 1, sound: 0 };
        timers.tick();
        assert_eq!(timers, Timers { delay: 0, sound: 0 });
        timers.tick();
        assert_eq!(timers, Timers { delay: 0, sound: 0 });
        assert!(!timers.sound_active());
    }

    proptest! {
        #[test]
        fn tick_decrements_by_exactly_one(delay in any::<u8>(), sound in any::<u8>(), ticks in 0usize..300) {
            let mut timers = Timers { delay, sound };
            for _ in 0..ticks {
                timers.tick();
            }
            prop_assert_eq!(timers.delay as usize, (delay as usize).saturating_sub(ticks));
            prop_assert_eq!(timers.sound as usize, (sound as usize).saturating_sub(ticks));
        }
    }
}
