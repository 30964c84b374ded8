/// Splits a fetched opcode into the fields the decoder cares about.
///
/// An opcode is stored as two bytes, high byte first, and is usually
/// read as four nibbles: `(family, x, y, n)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitSplitter(u8, u8);

impl BitSplitter {
    pub fn new(left: u8, right: u8) -> BitSplitter {
        BitSplitter(left, right)
    }

    pub fn from_u16(value: u16) -> BitSplitter {
        BitSplitter((value >> 8) as u8, (value & 0x00FF) as u8)
    }

    /// Join the two bytes back into a big-endian `u16`.
    pub fn as_u16(&self) -> u16 {
        ((self.0 as u16) << 8) | self.1 as u16
    }

    /// The four nibbles, most significant first.
    pub fn as_four_u8(&self) -> (u8, u8, u8, u8) {
        (self.0 >> 4, self.0 & 0x0F, self.1 >> 4, self.1 & 0x0F)
    }

    /// Trailing byte `KK`.
    pub fn last_8_bits(&self) -> u8 {
        self.1
    }

    /// Trailing address `NNN`.
    pub fn last_12_bits(&self) -> u16 {
        self.as_u16() & 0x0FFF
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(0x00E0 => (0x0, 0x0, 0xE, 0x0) ; "clear screen")]
    #[test_case(0xD12F => (0xD, 0x1, 0x2, 0xF) ; "draw")]
    #[test_case(0xFFFF => (0xF, 0xF, 0xF, 0xF) ; "all ones")]
    fn as_four_u8_splits_nibbles(opcode: u16) -> (u8, u8, u8, u8) {
        BitSplitter::from_u16(opcode).as_four_u8()
    }

    #[test]
    fn trailing_fields() {
        let op = BitSplitter::new(0xD1, 0x2F);
        assert_eq!(op.last_8_bits(), 0x2F);
        assert_eq!(op.last_12_bits(), 0x12F);
    }

    #[test]
    fn from_u16_is_big_endian() {
        assert_eq!(BitSplitter::from_u16(0x1234), BitSplitter::new(0x12, 0x34));
        assert_eq!(BitSplitter::from_u16(0xF0F0).as_u16(), 0xF0F0);
    }
}
