use rand::rngs::ThreadRng;
use std::path::Path;

use super::error::{Error, Result};
use super::instruction::*;
use super::keypad::Keypad;
use super::memory::{Memory, PROGRAM_START};
use super::random::{Entropy, RandomSource};
use super::screen::{Screen, SCREEN_HEIGHT, SCREEN_WIDTH};
use super::timers::Timers;

pub const NUM_REGISTERS: usize = 16;
pub const STACK_SIZE: usize = 16;

/// Index of the flag register `VF`.
const FLAG: usize = 0xF;

/// Every bit of CHIP-8 state, plus a source of random bytes for `CXKK`.
pub struct Emulator<R: RandomSource = Entropy<ThreadRng>> {
    memory: Memory,
    registers: [u8; NUM_REGISTERS],
    i: u16,
    program_counter: u16,
    stack_pointer: usize,
    stack: [u16; STACK_SIZE],
    timers: Timers,
    keypad: Keypad,
    screen: Screen,
    random: R,
}

impl Emulator<Entropy<ThreadRng>> {
    /// Create a new emulator drawing random bytes from the thread-local generator.
    pub fn new() -> Emulator<Entropy<ThreadRng>> {
        Emulator::with_random(Entropy::new())
    }
}

impl Default for Emulator<Entropy<ThreadRng>> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RandomSource> Emulator<R> {
    /// Create a new emulator with a specific random source.
    pub fn with_random(random: R) -> Emulator<R> {
        Emulator {
            memory: Memory::new(),
            registers: [0; NUM_REGISTERS],
            i: 0,
            program_counter: PROGRAM_START,
            stack_pointer: 0,
            stack: [0; STACK_SIZE],
            timers: Timers::new(),
            keypad: Keypad::new(),
            screen: Screen::new(),
            random,
        }
    }

    /// Copy a program into memory at 0x200.
    pub fn load(&mut self, program: &[u8]) -> Result<()> {
        self.memory.load(program)?;
        log::info!("Loaded {} byte program", program.len());
        Ok(())
    }

    /// Read a program image from disk and load it at 0x200.
    /// Nothing is loaded if the file can't be read.
    pub fn load_file<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        log::info!("Reading program from {:?}", path.as_ref());
        let program = std::fs::read(path)?;
        self.load(&program)
    }

    /// Perform a single step: run one cycle, then count the timers down.
    /// The timers therefore run at whatever rate `step` is called.
    pub fn step(&mut self) -> Result<()> {
        self.cycle()?;
        self.tick_timers();
        Ok(())
    }

    /// Fetch the instruction at PC, move PC past it and execute it.
    pub fn cycle(&mut self) -> Result<()> {
        let (left, right) = self.memory.fetch(self.program_counter)?;
        let instruction = Instruction::from_two_u8(left, right);

        log::trace!("{:#05x}: {}", self.program_counter, instruction);

        self.program_counter = self.program_counter.wrapping_add(2);
        self.execute_single(instruction)
    }

    /// Count both timers down by one.
    pub fn tick_timers(&mut self) {
        self.timers.tick();
    }

    /// Execute many instructions in order, stopping at the first error.
    pub fn execute_many(&mut self, instructions: &[Instruction]) -> Result<()> {
        for instruction in instructions {
            self.execute_single(*instruction)?;
        }
        Ok(())
    }

    /// Execute a single instruction against the current state.
    /// PC is expected to already point past the instruction.
    pub fn execute_single(&mut self, instruction: Instruction) -> Result<()> {
        match instruction {
            Instruction::ClearScreen => self.screen.clear(),

            // Pop the return address off the stack
            Instruction::Return => {
                if self.stack_pointer == 0 {
                    return Err(Error::StackUnderflow {
                        pc: self.program_counter,
                    });
                }
                self.stack_pointer -= 1;
                self.program_counter = self.stack[self.stack_pointer];
            }

            Instruction::Jump(Addr(addr)) => self.program_counter = addr,

            // Push the address of the next instruction, then jump
            Instruction::Call(Addr(addr)) => {
                if self.stack_pointer == STACK_SIZE {
                    return Err(Error::StackOverflow {
                        pc: self.program_counter,
                        depth: STACK_SIZE,
                    });
                }
                self.stack[self.stack_pointer] = self.program_counter;
                self.stack_pointer += 1;
                self.program_counter = addr;
            }

            Instruction::SkipIfEqConst(x, Const(n)) => self.skip_if(self.v(x) == n),
            Instruction::SkipIfNeqConst(x, Const(n)) => self.skip_if(self.v(x) != n),
            Instruction::SkipIfEqReg(x, y) => self.skip_if(self.v(x) == self.v(y)),
            Instruction::SkipIfNeqReg(x, y) => self.skip_if(self.v(x) != self.v(y)),

            Instruction::LoadConst(x, Const(n)) => self.set_v(x, n),

            // No carry flag for immediates
            Instruction::AddConst(x, Const(n)) => self.set_v(x, self.v(x).wrapping_add(n)),

            Instruction::Assign(x, y) => self.set_v(x, self.v(y)),
            Instruction::Or(x, y) => self.set_v(x, self.v(x) | self.v(y)),
            Instruction::And(x, y) => self.set_v(x, self.v(x) & self.v(y)),
            Instruction::Xor(x, y) => self.set_v(x, self.v(x) ^ self.v(y)),

            // VF is set when the sum doesn't fit in a byte
            Instruction::Add(x, y) => {
                let (sum, carry) = self.v(x).overflowing_add(self.v(y));
                self.set_v_with_flag(x, sum, carry);
            }

            // VF is set when there is no borrow
            Instruction::Sub(x, y) => {
                let (vx, vy) = (self.v(x), self.v(y));
                self.set_v_with_flag(x, vx.wrapping_sub(vy), vx > vy);
            }

            Instruction::SubReverse(x, y) => {
                let (vx, vy) = (self.v(x), self.v(y));
                self.set_v_with_flag(x, vy.wrapping_sub(vx), vy > vx);
            }

            // VF gets the bit that is shifted out
            Instruction::ShiftRight(x) => {
                let vx = self.v(x);
                self.set_v_with_flag(x, vx >> 1, vx & 0x01 != 0);
            }

            Instruction::ShiftLeft(x) => {
                let vx = self.v(x);
                self.set_v_with_flag(x, vx << 1, vx & 0x80 != 0);
            }

            Instruction::LoadIndex(Addr(addr)) => self.i = addr,

            Instruction::JumpIndexed(Addr(addr)) => {
                self.program_counter = addr.wrapping_add(self.registers[0] as u16);
            }

            Instruction::Random(x, Const(mask)) => {
                let byte = self.random.random_byte();
                self.set_v(x, byte & mask);
            }

            Instruction::Draw(x, y, Const(height)) => self.draw(x, y, height)?,

            Instruction::SkipIfKey(x) => self.skip_if(self.keypad.is_pressed(self.v(x))),
            Instruction::SkipIfNotKey(x) => self.skip_if(!self.keypad.is_pressed(self.v(x))),

            Instruction::LoadDelayTimer(x) => self.set_v(x, self.timers.delay),

            // Not a real wait: rewind so the same instruction runs again next cycle
            Instruction::WaitForKey(x) => match self.keypad.first_pressed() {
                Some(key) => self.set_v(x, key),
                None => self.program_counter = self.program_counter.wrapping_sub(2),
            },

            Instruction::SetDelayTimer(x) => self.timers.delay = self.v(x),
            Instruction::SetSoundTimer(x) => self.timers.sound = self.v(x),

            Instruction::AddToIndex(x) => self.i = self.i.wrapping_add(self.v(x) as u16),

            Instruction::LoadGlyphAddr(x) => self.i = Memory::glyph_address(self.v(x)),

            // Hundreds at I, tens at I+1, ones at I+2
            Instruction::StoreBcd(x) => {
                let value = self.v(x);
                let digits = self.memory.slice_mut(self.i as usize, 3)?;
                digits.copy_from_slice(&[value / 100, value / 10 % 10, value % 10]);
            }

            // V0 up to, but not including, VX
            Instruction::DumpRegisters(Reg(x)) => {
                let count = (x & 0x0F) as usize;
                let cells = self.memory.slice_mut(self.i as usize, count)?;
                cells.copy_from_slice(&self.registers[..count]);
            }

            Instruction::LoadRegisters(Reg(x)) => {
                let count = (x & 0x0F) as usize;
                let cells = self.memory.slice(self.i as usize, count)?;
                self.registers[..count].copy_from_slice(cells);
            }

            Instruction::Unknown(opcode) => {
                log::debug!("Ignoring unknown opcode {:#06x}", opcode);
            }
        };

        Ok(())
    }

    /// XOR an 8 pixel wide sprite of `height` rows, read from I, onto the screen.
    /// Only the origin wraps around; pixels past the right or bottom edge are clipped.
    fn draw(&mut self, x: Reg, y: Reg, height: u8) -> Result<()> {
        let origin_x = self.v(x) as usize % SCREEN_WIDTH;
        let origin_y = self.v(y) as usize % SCREEN_HEIGHT;
        let sprite = self.memory.slice(self.i as usize, height as usize)?;

        let mut collision = false;
        for (row, bits) in sprite.iter().enumerate() {
            for column in 0..8 {
                if bits & (0x80 >> column) != 0 {
                    collision |= self.screen.toggle(origin_x + column, origin_y + row);
                }
            }
        }

        self.registers[FLAG] = collision as u8;
        Ok(())
    }

    fn skip_if(&mut self, condition: bool) {
        if condition {
            self.program_counter = self.program_counter.wrapping_add(2);
        }
    }

    fn v(&self, Reg(x): Reg) -> u8 {
        self.registers[(x & 0x0F) as usize]
    }

    fn set_v(&mut self, Reg(x): Reg, value: u8) {
        self.registers[(x & 0x0F) as usize] = value;
    }

    /// Write the result first and the flag last, so the flag wins when X is F.
    fn set_v_with_flag(&mut self, x: Reg, value: u8, flag: bool) {
        self.set_v(x, value);
        self.registers[FLAG] = flag as u8;
    }

    pub fn registers(&self) -> &[u8; NUM_REGISTERS] {
        &self.registers
    }

    pub fn register(&self, x: u8) -> u8 {
        self.v(Reg(x))
    }

    pub fn index(&self) -> u16 {
        self.i
    }

    pub fn program_counter(&self) -> u16 {
        self.program_counter
    }

    /// The return addresses currently on the stack, oldest first.
    pub fn stack(&self) -> &[u16] {
        &self.stack[..self.stack_pointer]
    }

    pub fn delay_timer(&self) -> u8 {
        self.timers.delay
    }

    pub fn sound_timer(&self) -> u8 {
        self.timers.sound
    }

    /// Whether the buzzer should sound right now.
    pub fn sound_active(&self) -> bool {
        self.timers.sound_active()
    }

    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// The screen, if it changed since the last call.
    pub fn take_frame(&mut self) -> Option<&Screen> {
        if self.screen.take_dirty() {
            Some(&self.screen)
        } else {
            None
        }
    }

    pub fn keypad(&self) -> &Keypad {
        &self.keypad
    }

    pub fn keypad_mut(&mut self) -> &mut Keypad {
        &mut self.keypad
    }

    pub fn set_key(&mut self, key: u8, pressed: bool) {
        self.keypad.set(key, pressed);
    }
}
