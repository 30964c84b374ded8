//! The outer loop: poll input, step the emulator, present the result.

use std::thread;
use std::time::Duration;

use super::error::Result;
use super::input::EmulatorInput;
use super::output::EmulatorOutput;
use super::random::RandomSource;
use super::Emulator;

/// Drives an [`Emulator`] with an input and an output device.
///
/// One call to `Emulator::step` is made per cycle, so the cycle period also
/// sets the timer rate.
pub struct Driver<I: EmulatorInput, O: EmulatorOutput, R: RandomSource> {
    pub emulator: Emulator<R>,
    pub input: I,
    pub output: O,
    cycle_period: Duration,
}

impl<I: EmulatorInput, O: EmulatorOutput, R: RandomSource> Driver<I, O, R> {
    pub fn new(emulator: Emulator<R>, input: I, output: O, cycle_period: Duration) -> Self {
        Driver {
            emulator,
            input,
            output,
            cycle_period,
        }
    }

    /// Run until the input device asks to stop or the emulator fails.
    pub fn run(&mut self) -> Result<()> {
        log::info!("Running with a cycle period of {:?}", self.cycle_period);
        while self.cycle()? {
            if !self.cycle_period.is_zero() {
                thread::sleep(self.cycle_period);
            }
        }
        log::info!("Input asked to stop");
        Ok(())
    }

    /// Run at most `cycles` cycles without sleeping.
    /// Returns how many cycles ran before the input asked to stop.
    pub fn run_cycles(&mut self, cycles: usize) -> Result<usize> {
        for done in 0..cycles {
            if !self.cycle()? {
                return Ok(done);
            }
        }
        Ok(cycles)
    }

    /// Poll, step and present once. Returns `false` if the input asked to stop.
    fn cycle(&mut self) -> Result<bool> {
        if !self.input.poll(self.emulator.keypad_mut()) {
            return Ok(false);
        }

        self.emulator.step()?;

        if let Some(screen) = self.emulator.take_frame() {
            self.output.refresh(screen);
        }
        self.output.sound(self.emulator.sound_active());

        Ok(true)
    }
}
