use crate::util::bit_splitter::BitSplitter;
use std::fmt;

/// A 12-bit memory address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Addr(pub u16);

/// A register selector, `V0` to `VF`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reg(pub u8);

/// An immediate byte or nibble.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Const(pub u8);

/// A single instruction from the CHIP-8 instruction set.
/// Opcodes are written in hexadecimal, with the following special characters:
/// - NNN: address
/// - KK: 8-bit constant
/// - N: 4-bit constant
/// - X and Y: 4-bit register identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    ClearScreen,                 // 00E0
    Return,                      // 00EE
    Jump(Addr),                  // 1NNN
    Call(Addr),                  // 2NNN
    SkipIfEqConst(Reg, Const),   // 3XKK
    SkipIfNeqConst(Reg, Const),  // 4XKK
    SkipIfEqReg(Reg, Reg),       // 5XY0
    LoadConst(Reg, Const),       // 6XKK
    AddConst(Reg, Const),        // 7XKK
    Assign(Reg, Reg),            // 8XY0
    Or(Reg, Reg),                // 8XY1
    And(Reg, Reg),               // 8XY2
    Xor(Reg, Reg),               // 8XY3
    Add(Reg, Reg),               // 8XY4
    Sub(Reg, Reg),               // 8XY5
    ShiftRight(Reg),             // 8XY6
    SubReverse(Reg, Reg),        // 8XY7
    ShiftLeft(Reg),              // 8XYE
    SkipIfNeqReg(Reg, Reg),      // 9XY0
    LoadIndex(Addr),             // ANNN
    JumpIndexed(Addr),           // BNNN
    Random(Reg, Const),          // CXKK
    Draw(Reg, Reg, Const),       // DXYN
    SkipIfKey(Reg),              // EX9E
    SkipIfNotKey(Reg),           // EXA1
    LoadDelayTimer(Reg),         // FX07
    WaitForKey(Reg),             // FX0A
    SetDelayTimer(Reg),          // FX15
    SetSoundTimer(Reg),          // FX18
    AddToIndex(Reg),             // FX1E
    LoadGlyphAddr(Reg),          // FX29
    StoreBcd(Reg),               // FX33
    DumpRegisters(Reg),          // FX55
    LoadRegisters(Reg),          // FX65
    /// Anything else. Executes as a no-op.
    Unknown(u16),
}

impl Instruction {
    pub fn from_u16(value: u16) -> Instruction {
        Instruction::decode(BitSplitter::from_u16(value))
    }

    pub fn from_two_u8(left: u8, right: u8) -> Instruction {
        Instruction::decode(BitSplitter::new(left, right))
    }

    /// Select an instruction by its leading nibble. The `0`, `8`, `E` and `F`
    /// families need a second look at the trailing byte or nibble.
    fn decode(opcode: BitSplitter) -> Instruction {
        let (family, x, y, n) = opcode.as_four_u8();
        let (x, y) = (Reg(x), Reg(y));
        let kk = Const(opcode.last_8_bits());
        let nnn = Addr(opcode.last_12_bits());

        match family {
            0x0 => match opcode.as_u16() {
                0x00E0 => Instruction::ClearScreen,
                0x00EE => Instruction::Return,
                other => Instruction::Unknown(other),
            },
            0x1 => Instruction::Jump(nnn),
            0x2 => Instruction::Call(nnn),
            0x3 => Instruction::SkipIfEqConst(x, kk),
            0x4 => Instruction::SkipIfNeqConst(x, kk),
            0x5 => Instruction::SkipIfEqReg(x, y),
            0x6 => Instruction::LoadConst(x, kk),
            0x7 => Instruction::AddConst(x, kk),
            0x8 => match n {
                0x0 => Instruction::Assign(x, y),
                0x1 => Instruction::Or(x, y),
                0x2 => Instruction::And(x, y),
                0x3 => Instruction::Xor(x, y),
                0x4 => Instruction::Add(x, y),
                0x5 => Instruction::Sub(x, y),
                0x6 => Instruction::ShiftRight(x),
                0x7 => Instruction::SubReverse(x, y),
                0xE => Instruction::ShiftLeft(x),
                _ => Instruction::Unknown(opcode.as_u16()),
            },
            0x9 => Instruction::SkipIfNeqReg(x, y),
            0xA => Instruction::LoadIndex(nnn),
            0xB => Instruction::JumpIndexed(nnn),
            0xC => Instruction::Random(x, kk),
            0xD => Instruction::Draw(x, y, Const(n)),
            0xE => match kk.0 {
                0x9E => Instruction::SkipIfKey(x),
                0xA1 => Instruction::SkipIfNotKey(x),
                _ => Instruction::Unknown(opcode.as_u16()),
            },
            0xF => match kk.0 {
                0x07 => Instruction::LoadDelayTimer(x),
                0x0A => Instruction::WaitForKey(x),
                0x15 => Instruction::SetDelayTimer(x),
                0x18 => Instruction::SetSoundTimer(x),
                0x1E => Instruction::AddToIndex(x),
                0x29 => Instruction::LoadGlyphAddr(x),
                0x33 => Instruction::StoreBcd(x),
                0x55 => Instruction::DumpRegisters(x),
                0x65 => Instruction::LoadRegisters(x),
                _ => Instruction::Unknown(opcode.as_u16()),
            },
            _ => unreachable!("a nibble is at most 0xF"),
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Instruction::*;
        match *self {
            ClearScreen => write!(f, "CLS"),
            Return => write!(f, "RET"),
            Jump(Addr(a)) => write!(f, "JP {:#05X}", a),
            Call(Addr(a)) => write!(f, "CALL {:#05X}", a),
            SkipIfEqConst(Reg(x), Const(k)) => write!(f, "SE V{:X}, {:#04X}", x, k),
            SkipIfNeqConst(Reg(x), Const(k)) => write!(f, "SNE V{:X}, {:#04X}", x, k),
            SkipIfEqReg(Reg(x), Reg(y)) => write!(f, "SE V{:X}, V{:X}", x, y),
            LoadConst(Reg(x), Const(k)) => write!(f, "LD V{:X}, {:#04X}", x, k),
            AddConst(Reg(x), Const(k)) => write!(f, "ADD V{:X}, {:#04X}", x, k),
            Assign(Reg(x), Reg(y)) => write!(f, "LD V{:X}, V{:X}", x, y),
            Or(Reg(x), Reg(y)) => write!(f, "OR V{:X}, V{:X}", x, y),
            And(Reg(x), Reg(y)) => write!(f, "AND V{:X}, V{:X}", x, y),
            Xor(Reg(x), Reg(y)) => write!(f, "XOR V{:X}, V{:X}", x, y),
            Add(Reg(x), Reg(y)) => write!(f, "ADD V{:X}, V{:X}", x, y),
            Sub(Reg(x), Reg(y)) => write!(f, "SUB V{:X}, V{:X}", x, y),
            ShiftRight(Reg(x)) => write!(f, "SHR V{:X}", x),
            SubReverse(Reg(x), Reg(y)) => write!(f, "SUBN V{:X}, V{:X}", x, y),
            ShiftLeft(Reg(x)) => write!(f, "SHL V{:X}", x),
            SkipIfNeqReg(Reg(x), Reg(y)) => write!(f, "SNE V{:X}, V{:X}", x, y),
            LoadIndex(Addr(a)) => write!(f, "LD I, {:#05X}", a),
            JumpIndexed(Addr(a)) => write!(f, "JP V0, {:#05X}", a),
            Random(Reg(x), Const(k)) => write!(f, "RND V{:X}, {:#04X}", x, k),
            Draw(Reg(x), Reg(y), Const(n)) => write!(f, "DRW V{:X}, V{:X}, {}", x, y, n),
            SkipIfKey(Reg(x)) => write!(f, "SKP V{:X}", x),
            SkipIfNotKey(Reg(x)) => write!(f, "SKNP V{:X}", x),
            LoadDelayTimer(Reg(x)) => write!(f, "LD V{:X}, DT", x),
            WaitForKey(Reg(x)) => write!(f, "LD V{:X}, K", x),
            SetDelayTimer(Reg(x)) => write!(f, "LD DT, V{:X}", x),
            SetSoundTimer(Reg(x)) => write!(f, "LD ST, V{:X}", x),
            AddToIndex(Reg(x)) => write!(f, "ADD I, V{:X}", x),
            LoadGlyphAddr(Reg(x)) => write!(f, "LD F, V{:X}", x),
            StoreBcd(Reg(x)) => write!(f, "LD B, V{:X}", x),
            DumpRegisters(Reg(x)) => write!(f, "LD [I], V{:X}", x),
            LoadRegisters(Reg(x)) => write!(f, "LD V{:X}, [I]", x),
            Unknown(op) => write!(f, "??? {:#06X}", op),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use test_case::test_case;

    #[test_case(0x00E0 => Instruction::ClearScreen)]
    #[test_case(0x00EE => Instruction::Return)]
    #[test_case(0x1025 => Instruction::Jump(Addr(0x25)))]
    #[test_case(0x2037 => Instruction::Call(Addr(0x37)))]
    #[test_case(0x3A08 => Instruction::SkipIfEqConst(Reg(0xA), Const(8)))]
    #[test_case(0x4A08 => Instruction::SkipIfNeqConst(Reg(0xA), Const(8)))]
    #[test_case(0x5AB0 => Instruction::SkipIfEqReg(Reg(0xA), Reg(0xB)))]
    #[test_case(0x6B23 => Instruction::LoadConst(Reg(0xB), Const(0x23)))]
    #[test_case(0x7CA1 => Instruction::AddConst(Reg(0xC), Const(0xA1)))]
    #[test_case(0x8AB0 => Instruction::Assign(Reg(0xA), Reg(0xB)))]
    #[test_case(0x8DE1 => Instruction::Or(Reg(0xD), Reg(0xE)))]
    #[test_case(0x8DE2 => Instruction::And(Reg(0xD), Reg(0xE)))]
    #[test_case(0x8DE3 => Instruction::Xor(Reg(0xD), Reg(0xE)))]
    #[test_case(0x8AB4 => Instruction::Add(Reg(0xA), Reg(0xB)))]
    #[test_case(0x8AB5 => Instruction::Sub(Reg(0xA), Reg(0xB)))]
    #[test_case(0x8AB6 => Instruction::ShiftRight(Reg(0xA)))]
    #[test_case(0x8AB7 => Instruction::SubReverse(Reg(0xA), Reg(0xB)))]
    #[test_case(0x8A0E => Instruction::ShiftLeft(Reg(0xA)))]
    #[test_case(0x9AB0 => Instruction::SkipIfNeqReg(Reg(0xA), Reg(0xB)))]
    #[test_case(0xA025 => Instruction::LoadIndex(Addr(0x25)))]
    #[test_case(0xB025 => Instruction::JumpIndexed(Addr(0x25)))]
    #[test_case(0xCA23 => Instruction::Random(Reg(0xA), Const(0x23)))]
    #[test_case(0xDABC => Instruction::Draw(Reg(0xA), Reg(0xB), Const(0xC)))]
    #[test_case(0xEA9E => Instruction::SkipIfKey(Reg(0xA)))]
    #[test_case(0xEAA1 => Instruction::SkipIfNotKey(Reg(0xA)))]
    #[test_case(0xFA07 => Instruction::LoadDelayTimer(Reg(0xA)))]
    #[test_case(0xFA0A => Instruction::WaitForKey(Reg(0xA)))]
    #[test_case(0xFA15 => Instruction::SetDelayTimer(Reg(0xA)))]
    #[test_case(0xFA18 => Instruction::SetSoundTimer(Reg(0xA)))]
    #[test_case(0xFA1E => Instruction::AddToIndex(Reg(0xA)))]
    #[test_case(0xFA29 => Instruction::LoadGlyphAddr(Reg(0xA)))]
    #[test_case(0xFA33 => Instruction::StoreBcd(Reg(0xA)))]
    #[test_case(0xFA55 => Instruction::DumpRegisters(Reg(0xA)))]
    #[test_case(0xFA65 => Instruction::LoadRegisters(Reg(0xA)))]
    fn decodes_known_opcodes(opcode: u16) -> Instruction {
        Instruction::from_u16(opcode)
    }

    #[test_case(0x0000 ; "zero word")]
    #[test_case(0x0123 ; "machine code routine")]
    #[test_case(0x00E1 ; "near clear screen")]
    #[test_case(0x8AB8 ; "undefined alu op")]
    #[test_case(0xEA9F ; "undefined key op")]
    #[test_case(0xFA99 ; "undefined misc op")]
    fn unmatched_selectors_decode_to_unknown(opcode: u16) {
        assert_eq!(Instruction::from_u16(opcode), Instruction::Unknown(opcode));
    }

    #[test]
    fn register_families_ignore_trailing_nibble() {
        assert_eq!(Instruction::from_u16(0x5AB3), Instruction::SkipIfEqReg(Reg(0xA), Reg(0xB)));
        assert_eq!(Instruction::from_u16(0x9AB7), Instruction::SkipIfNeqReg(Reg(0xA), Reg(0xB)));
    }

    #[test]
    fn display_uses_mnemonics() {
        assert_eq!(Instruction::from_u16(0x00E0).to_string(), "CLS");
        assert_eq!(Instruction::from_u16(0x2300).to_string(), "CALL 0x300");
        assert_eq!(Instruction::from_u16(0xD125).to_string(), "DRW V1, V2, 5");
        assert_eq!(Instruction::from_u16(0xF155).to_string(), "LD [I], V1");
    }

    proptest! {
        #[test]
        fn from_two_u8_equals_from_u16(left in any::<u8>(), right in any::<u8>()) {
            let joined = ((left as u16) << 8) | right as u16;
            prop_assert_eq!(Instruction::from_two_u8(left, right), Instruction::from_u16(joined));
        }
    }
}
