/*!

A CHIP-8 virtual machine as specified at https://en.wikipedia.org/wiki/CHIP-8.

# Crossterm Frontend

If you want to try the emulator on some programs, there is a ready-to-use terminal frontend
you can run by using `cargo run --release --bin crossterm_frontend -- <program>`.
The keypad is mapped onto `1234`, `qwer`, `asdf` and `zxcv`, and `Esc` quits.

For a headless run, `cargo run --bin no_frontend -- --cycles 500 <program>` prints the screen
after the given number of cycles, and `--disassemble` lists the program instead.

# Library

The main way of running a program is to load it as bytes and step through it.

```rust
use chip8_vm::emulator::Emulator;

let mut emulator = Emulator::new();

// Load a program at address 0x200.
let clear_display = [0x00, 0xE0];
emulator.load(&clear_display)?;
emulator.step()?; // Will now clear the display
assert_eq!(emulator.program_counter(), 0x202);
# Ok::<(), chip8_vm::emulator::Error>(())
```

Alternatively, you can experiment by executing instructions manually.

```rust
use chip8_vm::emulator::Emulator;
use chip8_vm::emulator::instruction::{Instruction, Reg, Const, Addr};

let mut emulator = Emulator::new();

// Execute instructions manually
emulator.execute_single(Instruction::ClearScreen)?;

// Or many sequentially
emulator.execute_many(&[
    Instruction::Jump(Addr(0x250)),
    Instruction::LoadConst(Reg(0xA), Const(35)),
    Instruction::Assign(Reg(0xB), Reg(0xA)),
])?;
assert_eq!(emulator.register(0xB), 35);
# Ok::<(), chip8_vm::emulator::Error>(())
```

Programs that misbehave stop with an [`emulator::Error`] instead of corrupting state.

```rust
use chip8_vm::emulator::{Emulator, Error};

let mut emulator = Emulator::new();
emulator.load(&[0x00, 0xEE])?; // Return, with nothing to return to
assert!(matches!(emulator.step(), Err(Error::StackUnderflow { .. })));
# Ok::<(), Error>(())
```

## Random numbers

`CXKK` draws from a [`emulator::random::RandomSource`]. Tests and reproducible runs
can pass their own.

```rust
use chip8_vm::emulator::Emulator;
use chip8_vm::emulator::random::Sequence;

let mut emulator = Emulator::with_random(Sequence::new(vec![0xAB]));
emulator.load(&[0xC0, 0x0F])?; // V0 = random & 0x0F
emulator.step()?;
assert_eq!(emulator.register(0), 0x0B);
# Ok::<(), chip8_vm::emulator::Error>(())
```

## Custom input and output

The emulator itself never blocks or draws. To hook it up to a real keyboard and screen,
implement `EmulatorInput` and `EmulatorOutput`, which write the keypad between cycles and
present the screen respectively. Take a look at `src/emulator/input.rs` and
`src/emulator/output.rs` to see how to implement them, then hand everything to a `Driver`.

```ignore
use chip8_vm::emulator::{driver::Driver, Emulator};

let mut driver = Driver::new(Emulator::new(), MyInput::new(), MyOutput::new(), cycle_period);
driver.run()?;
```
*/

pub mod emulator;
pub mod util;
