use rand::rngs::{StdRng, ThreadRng};
use rand::{Rng, SeedableRng};

/// Somewhere to get random bytes from, used by `CXKK`.
pub trait RandomSource {
    fn random_byte(&mut self) -> u8;
}

/// Uniform random bytes from any `rand` generator.
pub struct Entropy<R: Rng> {
    rng: R,
}

impl Entropy<ThreadRng> {
    /// Non-deterministic bytes from the thread-local generator.
    pub fn new() -> Entropy<ThreadRng> {
        Entropy {
            rng: rand::thread_rng(),
        }
    }
}

impl Default for Entropy<ThreadRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl Entropy<StdRng> {
    /// A reproducible stream of bytes.
    pub fn seeded(seed: u64) -> Entropy<StdRng> {
        Entropy {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl<R: Rng> RandomSource for Entropy<R> {
    fn random_byte(&mut self) -> u8 {
        self.rng.gen()
    }
}

/// Replays a fixed list of bytes, starting over when it runs out.
#[derive(Debug, Clone)]
pub struct Sequence {
    bytes: Vec<u8>,
    next: usize,
}

impl Sequence {
    pub fn new(bytes: Vec<u8>) -> Sequence {
        Sequence { bytes, next: 0 }
    }
}

impl RandomSource for Sequence {
    fn random_byte(&mut self) -> u8 {
        if self.bytes.is_empty() {
            return 0;
        }
        let byte = self.bytes[self.next];
        self.next = (self.next + 1) % self.bytes.len();
        byte
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequence_wraps_around() {
        let mut source = Sequence::new(vec![1, 2, 3]);
        let bytes: Vec<u8> = (0..5).map(|_| source.random_byte()).collect();
        assert_eq!(bytes, vec![1, 2, 3, 1, 2]);
    }

    #[test]
    fn empty_sequence_yields_zero() {
        assert_eq!(Sequence::new(vec![]).random_byte(), 0);
    }

    #[test]
    fn same_seed_same_bytes() {
        let mut a = Entropy::seeded(42);
        let mut b = Entropy::seeded(42);
        for _ in 0..32 {
            assert_eq!(a.random_byte(), b.random_byte());
        }
    }
}
