use super::error::{Error, Result};

pub const MEM_SIZE: usize = 4096;
pub const PROGRAM_START: u16 = 0x200;
pub const FONT_START: u16 = 0x050;

/// Each glyph is 5 bytes tall.
pub const GLYPH_SIZE: u16 = 5;

const FONT: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];

/// The flat 4 KiB address space.
///
/// Everything below `PROGRAM_START` belongs to the interpreter; the only
/// thing we keep there is the built-in font.
pub struct Memory {
    bytes: [u8; MEM_SIZE],
}

impl Memory {
    /// Create memory with the font preloaded.
    pub fn new() -> Memory {
        let mut bytes = [0; MEM_SIZE];
        let font_start = FONT_START as usize;
        bytes[font_start..font_start + FONT.len()].copy_from_slice(&FONT);
        Memory { bytes }
    }

    /// Largest program that fits after `PROGRAM_START`.
    pub fn max_program_size() -> usize {
        MEM_SIZE - PROGRAM_START as usize
    }

    /// Copy a program image into memory at `PROGRAM_START`.
    /// Nothing is written if the image doesn't fit.
    pub fn load(&mut self, program: &[u8]) -> Result<()> {
        let max_size = Self::max_program_size();
        if program.len() > max_size {
            return Err(Error::ProgramTooLarge {
                size: program.len(),
                max_size,
            });
        }
        let start = PROGRAM_START as usize;
        self.bytes[start..start + program.len()].copy_from_slice(program);
        Ok(())
    }

    pub fn read(&self, address: usize) -> Result<u8> {
        self.bytes
            .get(address)
            .copied()
            .ok_or(Error::MemoryOutOfBounds { address })
    }

    pub fn write(&mut self, address: usize, value: u8) -> Result<()> {
        let cell = self
            .bytes
            .get_mut(address)
            .ok_or(Error::MemoryOutOfBounds { address })?;
        *cell = value;
        Ok(())
    }

    /// Borrow `len` bytes starting at `address`.
    pub fn slice(&self, address: usize, len: usize) -> Result<&[u8]> {
        self.check_range(address, len)?;
        Ok(&self.bytes[address..address + len])
    }

    /// Mutably borrow `len` bytes starting at `address`.
    pub fn slice_mut(&mut self, address: usize, len: usize) -> Result<&mut [u8]> {
        self.check_range(address, len)?;
        Ok(&mut self.bytes[address..address + len])
    }

    /// Read the big-endian opcode at `pc`.
    pub fn fetch(&self, pc: u16) -> Result<(u8, u8)> {
        let pc = pc as usize;
        Ok((self.read(pc)?, self.read(pc + 1)?))
    }

    /// Address of the glyph for a hex digit. Only the low nibble is used.
    pub fn glyph_address(digit: u8) -> u16 {
        FONT_START + GLYPH_SIZE * (digit & 0x0F) as u16
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    fn check_range(&self, address: usize, len: usize) -> Result<()> {
        // Report the first address that falls outside memory.
        let end = address.saturating_add(len);
        if end > MEM_SIZE {
            return Err(Error::MemoryOutOfBounds {
                address: address.max(MEM_SIZE),
            });
        }
        Ok(())
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn font_is_preloaded() {
        let memory = Memory::new();
        assert_eq!(memory.slice(0x050, 5).unwrap(), &[0xF0, 0x90, 0x90, 0x90, 0xF0]);
        assert_eq!(memory.slice(0x09B, 5).unwrap(), &[0xF0, 0x80, 0xF0, 0x80, 0x80]);
        assert!(memory.as_slice()[..0x050].iter().all(|b| *b == 0));
        assert!(memory.as_slice()[0x0A0..].iter().all(|b| *b == 0));
    }

    #[test]
    fn glyph_address_steps_by_five() {
        assert_eq!(Memory::glyph_address(0), 0x050);
        assert_eq!(Memory::glyph_address(1), 0x055);
        assert_eq!(Memory::glyph_address(0xF), 0x09B);
        assert_eq!(Memory::glyph_address(0x1A), 0x082);
    }

    #[test]
    fn load_places_program_at_0x200() {
        let mut memory = Memory::new();
        memory.load(&[0x12, 0x34, 0x56]).unwrap();
        assert_eq!(memory.slice(0x200, 3).unwrap(), &[0x12, 0x34, 0x56]);
        assert_eq!(memory.fetch(0x200).unwrap(), (0x12, 0x34));
    }

    #[test]
    fn load_accepts_exactly_full_memory() {
        let mut memory = Memory::new();
        let program = vec![0xAB; Memory::max_program_size()];
        memory.load(&program).unwrap();
        assert_eq!(memory.read(MEM_SIZE - 1).unwrap(), 0xAB);
    }

    #[test]
    fn load_rejects_oversized_program_without_writing() {
        let mut memory = Memory::new();
        let program = vec![0xAB; Memory::max_program_size() + 1];
        match memory.load(&program) {
            Err(Error::ProgramTooLarge { size, max_size }) => {
                assert_eq!(size, 3585);
                assert_eq!(max_size, 3584);
            }
            other => panic!("unexpected result {:?}", other),
        }
        assert_eq!(memory.read(0x200).unwrap(), 0);
    }

    #[test]
    fn out_of_bounds_access_fails() {
        let mut memory = Memory::new();
        assert!(matches!(memory.read(0x1000), Err(Error::MemoryOutOfBounds { address: 0x1000 })));
        assert!(matches!(memory.write(0x1000, 1), Err(Error::MemoryOutOfBounds { .. })));
        assert!(matches!(memory.fetch(0xFFF), Err(Error::MemoryOutOfBounds { address: 0x1000 })));
        assert!(matches!(memory.slice(0xFFE, 3), Err(Error::MemoryOutOfBounds { address: 0x1000 })));
        assert!(memory.slice(0xFFE, 2).is_ok());
        assert!(memory.slice(0x1000, 0).is_ok());
    }
}
