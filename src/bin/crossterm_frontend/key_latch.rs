use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Remembers when each key was last pressed.
///
/// Terminals only report presses, so a key counts as held until `hold`
/// has passed since its last press event. Key repeat keeps it held.
pub struct KeyLatch<K> {
    hold: Duration,
    pressed_at: HashMap<K, Instant>,
}

impl<K: std::hash::Hash + Eq> KeyLatch<K> {
    pub fn new(hold: Duration) -> KeyLatch<K> {
        KeyLatch {
            hold,
            pressed_at: HashMap::new(),
        }
    }

    pub fn press(&mut self, key: K) {
        self.press_at(key, Instant::now());
    }

    pub fn is_held(&self, key: &K) -> bool {
        self.is_held_at(key, Instant::now())
    }

    fn press_at(&mut self, key: K, now: Instant) {
        self.pressed_at.insert(key, now);
    }

    fn is_held_at(&self, key: &K, now: Instant) -> bool {
        self.pressed_at
            .get(key)
            .map_or(false, |pressed| now.saturating_duration_since(*pressed) < self.hold)
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn held_until_timeout() {
        let mut latch = KeyLatch::new(Duration::from_millis(100));
        let start = Instant::now();
        latch.press_at('a', start);

        assert!(latch.is_held_at(&'a', start));
        assert!(latch.is_held_at(&'a', start + Duration::from_millis(99)));
        assert!(!latch.is_held_at(&'a', start + Duration::from_millis(100)));
        assert!(!latch.is_held_at(&'b', start));
    }

    #[test]
    fn repeat_extends_hold() {
        let mut latch = KeyLatch::new(Duration::from_millis(100));
        let start = Instant::now();
        latch.press_at('a', start);
        latch.press_at('a', start + Duration::from_millis(80));
        assert!(latch.is_held_at(&'a', start + Duration::from_millis(150)));
    }
}
