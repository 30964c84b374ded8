use std::fmt;

pub const SCREEN_WIDTH: usize = 64;
pub const SCREEN_HEIGHT: usize = 32;

type Cells = [[bool; SCREEN_WIDTH]; SCREEN_HEIGHT];
const EMPTY_SCREEN: Cells = [[false; SCREEN_WIDTH]; SCREEN_HEIGHT];

/// The monochrome 64x32 framebuffer.
///
/// Pixels are only ever toggled, never set directly. The dirty flag
/// tells a frontend that something changed since it last looked.
#[derive(Clone)]
pub struct Screen {
    cells: Cells,
    dirty: bool,
}

impl Screen {
    pub fn new() -> Screen {
        Screen {
            cells: EMPTY_SCREEN,
            dirty: false,
        }
    }

    pub fn clear(&mut self) {
        self.cells = EMPTY_SCREEN;
        self.dirty = true;
    }

    /// XOR the pixel at `(x, y)` and report whether it was turned off.
    /// Coordinates outside the screen are clipped and never collide.
    pub fn toggle(&mut self, x: usize, y: usize) -> bool {
        match self.cells.get_mut(y).and_then(|row| row.get_mut(x)) {
            Some(cell) => {
                let collided = *cell;
                *cell = !*cell;
                self.dirty = true;
                collided
            }
            None => false,
        }
    }

    pub fn get(&self, x: usize, y: usize) -> bool {
        self.cells
            .get(y)
            .and_then(|row| row.get(x))
            .copied()
            .unwrap_or(false)
    }

    pub fn rows(&self) -> impl Iterator<Item = &[bool; SCREEN_WIDTH]> {
        self.cells.iter()
    }

    pub fn lit_pixels(&self) -> usize {
        self.rows().flatten().filter(|cell| **cell).count()
    }

    /// Return the dirty flag and reset it.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::replace(&mut self.dirty, false)
    }
}

impl Default for Screen {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Screen")
            .field("lit_pixels", &self.lit_pixels())
            .field("dirty", &self.dirty)
            .finish()
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            for cell in row.iter() {
                write!(f, "{}", if *cell { "#" } else { "." })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_xors_and_reports_collisions() {
        let mut screen = Screen::new();
        assert_eq!(screen.toggle(3, 4), false);
        assert!(screen.get(3, 4));
        assert_eq!(screen.toggle(3, 4), true);
        assert!(!screen.get(3, 4));
    }

    #[test]
    fn toggle_outside_screen_is_clipped() {
        let mut screen = Screen::new();
        assert_eq!(screen.toggle(SCREEN_WIDTH, 0), false);
        assert_eq!(screen.toggle(0, SCREEN_HEIGHT), false);
        assert_eq!(screen.lit_pixels(), 0);
        assert!(!screen.take_dirty());
    }

    #[test]
    fn clear_turns_everything_off() {
        let mut screen = Screen::new();
        screen.toggle(0, 0);
        screen.toggle(63, 31);
        assert_eq!(screen.lit_pixels(), 2);
        screen.clear();
        assert_eq!(screen.lit_pixels(), 0);
    }

    #[test]
    fn dirty_flag_is_consumed() {
        let mut screen = Screen::new();
        assert!(!screen.take_dirty());
        screen.toggle(1, 1);
        assert!(screen.take_dirty());
        assert!(!screen.take_dirty());
    }

    #[test]
    fn display_renders_one_line_per_row() {
        let mut screen = Screen::new();
        screen.toggle(0, 0);
        let text = screen.to_string();
        assert_eq!(text.lines().count(), SCREEN_HEIGHT);
        assert!(text.lines().all(|line| line.len() == SCREEN_WIDTH));
        assert!(text.starts_with("#."));
    }
}
