use super::keypad::Keypad;

/// Represents an input device that writes the keypad state between cycles.
pub trait EmulatorInput {
    /// Update `keypad` with the current key state.
    /// Returns `false` once the user asks to stop.
    fn poll(&mut self, keypad: &mut Keypad) -> bool;
}

/// An input device that never presses anything and never quits.
pub struct DummyInput;

impl EmulatorInput for DummyInput {
    fn poll(&mut self, _: &mut Keypad) -> bool {
        true
    }
}

/// Replays a list of key states, one per poll, then asks to stop.
/// Each entry is the list of keys held during that poll.
pub struct ScriptedInput {
    frames: std::vec::IntoIter<Vec<u8>>,
}

impl ScriptedInput {
    pub fn new(frames: Vec<Vec<u8>>) -> ScriptedInput {
        ScriptedInput {
            frames: frames.into_iter(),
        }
    }
}

impl EmulatorInput for ScriptedInput {
    fn poll(&mut self, keypad: &mut Keypad) -> bool {
        match self.frames.next() {
            Some(held) => {
                keypad.release_all();
                for key in held {
                    keypad.set(key, true);
                }
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripted_input_replays_then_quits() {
        let mut input = ScriptedInput::new(vec![vec![0x1, 0x2], vec![]]);
        let mut keypad = Keypad::new();

        assert!(input.poll(&mut keypad));
        assert!(keypad.is_pressed(0x1) && keypad.is_pressed(0x2));

        assert!(input.poll(&mut keypad));
        assert_eq!(keypad.first_pressed(), None);

        assert!(!input.poll(&mut keypad));
    }

    #[test]
    fn dummy_input_never_quits() {
        let mut keypad = Keypad::new();
        assert!(DummyInput.poll(&mut keypad));
        assert_eq!(keypad, Keypad::new());
    }
}
