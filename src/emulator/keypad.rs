pub const NUM_KEYS: usize = 16;

/// The hex keypad, one flag per logical key `0x0..=0xF`.
///
/// Written by an input device between cycles, only read by the CPU.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Keypad {
    keys: [bool; NUM_KEYS],
}

impl Keypad {
    pub fn new() -> Keypad {
        Keypad::default()
    }

    /// Press or release a key. Keys outside `0x0..=0xF` are ignored.
    pub fn set(&mut self, key: u8, pressed: bool) {
        match self.keys.get_mut(key as usize) {
            Some(state) => *state = pressed,
            None => log::warn!("Ignoring write to unknown key {:#04x}", key),
        }
    }

    /// Keys outside `0x0..=0xF` always read as released.
    pub fn is_pressed(&self, key: u8) -> bool {
        self.keys.get(key as usize).copied().unwrap_or(false)
    }

    /// The lowest pressed key, if any.
    pub fn first_pressed(&self) -> Option<u8> {
        self.keys.iter().position(|pressed| *pressed).map(|key| key as u8)
    }

    pub fn release_all(&mut self) {
        self.keys = [false; NUM_KEYS];
    }
}
