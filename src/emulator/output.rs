use super::screen::Screen;

/// Represents an output device: somewhere to show the screen and a buzzer.
pub trait EmulatorOutput {
    /// Present the framebuffer. Called only when it changed.
    fn refresh(&mut self, screen: &Screen);

    /// Turn the buzzer on or off. Called every cycle.
    fn sound(&mut self, active: bool);
}

/// An output device that only remembers what it was asked to do.
#[derive(Debug, Default)]
pub struct DummyOutput {
    pub refreshes: usize,
    pub last_frame: Option<String>,
    pub sounding: bool,
}

impl DummyOutput {
    pub fn new() -> DummyOutput {
        DummyOutput::default()
    }
}

impl EmulatorOutput for DummyOutput {
    fn refresh(&mut self, screen: &Screen) {
        self.refreshes += 1;
        self.last_frame = Some(screen.to_string());
    }

    fn sound(&mut self, active: bool) {
        self.sounding = active;
    }
}
