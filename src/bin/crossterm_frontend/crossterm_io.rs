use chip8_vm::emulator::input::EmulatorInput;
use chip8_vm::emulator::keypad::Keypad;
use chip8_vm::emulator::output::EmulatorOutput;
use chip8_vm::emulator::screen::{Screen, SCREEN_HEIGHT, SCREEN_WIDTH};

use super::key_latch::KeyLatch;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::style::Print;
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute, queue};
use std::io::{stdout, Stdout, Write};
use std::time::Duration;

/// How long a key counts as held after the terminal reported it.
const HOLD: Duration = Duration::from_millis(250);

/// The conventional layout: the left side of a QWERTY keyboard
/// stands in for the 4x4 hex keypad.
const KEYMAP: [(char, u8); 16] = [
    ('1', 0x1), ('2', 0x2), ('3', 0x3), ('4', 0xC),
    ('q', 0x4), ('w', 0x5), ('e', 0x6), ('r', 0xD),
    ('a', 0x7), ('s', 0x8), ('d', 0x9), ('f', 0xE),
    ('z', 0xA), ('x', 0x0), ('c', 0xB), ('v', 0xF),
];

pub struct CrosstermInput {
    latch: KeyLatch<u8>,
}

impl CrosstermInput {
    pub fn new() -> CrosstermInput {
        CrosstermInput {
            latch: KeyLatch::new(HOLD),
        }
    }

    /// Handle every pending terminal event. Returns `false` on quit.
    fn drain_events(&mut self) -> crossterm::Result<bool> {
        while event::poll(Duration::from_secs(0))? {
            match event::read()? {
                Event::Key(KeyEvent { code: KeyCode::Esc, .. }) => return Ok(false),
                Event::Key(KeyEvent { code: KeyCode::Char('c'), modifiers }) if modifiers.contains(KeyModifiers::CONTROL) => {
                    return Ok(false)
                }
                Event::Key(KeyEvent { code: KeyCode::Char(c), .. }) => match key_to_u8(c) {
                    Some(key) => self.latch.press(key),
                    None => log::debug!("Unmapped key {:?}", c),
                },
                _ => {}
            }
        }
        Ok(true)
    }
}

impl EmulatorInput for CrosstermInput {
    fn poll(&mut self, keypad: &mut Keypad) -> bool {
        match self.drain_events() {
            Ok(true) => {}
            Ok(false) => return false,
            Err(e) => {
                log::error!("Could not read terminal events: {}", e);
                return false;
            }
        }
        for key in 0..0x10 {
            keypad.set(key, self.latch.is_held(&key));
        }
        true
    }
}

pub struct CrosstermOutput {
    stdout: Stdout,
    sounding: bool,
}

impl CrosstermOutput {
    /// Switch the terminal to raw mode on an alternate screen and draw a frame.
    pub fn new() -> crossterm::Result<CrosstermOutput> {
        let mut stdout = stdout();
        terminal::enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen, cursor::Hide, Clear(ClearType::All))?;

        let horizontal = "━".repeat(2 * SCREEN_WIDTH);
        let bottom = SCREEN_HEIGHT as u16 + 1;
        let right = 2 * SCREEN_WIDTH as u16 + 1;
        queue!(stdout, cursor::MoveTo(0, 0), Print(format!("┏{}┓", horizontal)))?;
        for y in 1..bottom {
            queue!(stdout, cursor::MoveTo(0, y), Print('┃'), cursor::MoveTo(right, y), Print('┃'))?;
        }
        queue!(stdout, cursor::MoveTo(0, bottom), Print(format!("┗{}┛", horizontal)))?;
        stdout.flush()?;

        Ok(CrosstermOutput {
            stdout,
            sounding: false,
        })
    }

    fn draw(&mut self, screen: &Screen) -> crossterm::Result<()> {
        for (y, row) in screen.rows().enumerate() {
            let line: String = row.iter().map(|on| if *on { "██" } else { "  " }).collect();
            queue!(self.stdout, cursor::MoveTo(1, y as u16 + 1), Print(line))?;
        }
        self.stdout.flush()?;
        Ok(())
    }
}

impl Drop for CrosstermOutput {
    fn drop(&mut self) {
        let _ = execute!(self.stdout, LeaveAlternateScreen, cursor::Show);
        let _ = terminal::disable_raw_mode();
    }
}

impl EmulatorOutput for CrosstermOutput {
    fn refresh(&mut self, screen: &Screen) {
        if let Err(e) = self.draw(screen) {
            log::error!("Could not draw to the terminal: {}", e);
        }
    }

    /// Ring the terminal bell when the buzzer switches on.
    fn sound(&mut self, active: bool) {
        if active && !self.sounding {
            let _ = write!(self.stdout, "\x07").and_then(|_| self.stdout.flush());
        }
        self.sounding = active;
    }
}

fn key_to_u8(c: char) -> Option<u8> {
    let c = c.to_ascii_lowercase();
    KEYMAP.iter().find(|(k, _)| *k == c).map(|(_, key)| *key)
}
