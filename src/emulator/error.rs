use thiserror::Error;

/// Everything that can stop the virtual machine.
///
/// Only program loading is expected to fail in practice. The remaining
/// variants are raised by malformed programs and stop execution instead
/// of silently corrupting state.
#[derive(Debug, Error)]
pub enum Error {
    #[error("program is {size} bytes, but only {max_size} bytes fit in memory")]
    ProgramTooLarge { size: usize, max_size: usize },

    #[error("memory access out of bounds at address {address:#06X}")]
    MemoryOutOfBounds { address: usize },

    #[error("call stack overflow at PC {pc:#06X}, all {depth} slots are in use")]
    StackOverflow { pc: u16, depth: usize },

    #[error("return with empty call stack at PC {pc:#06X}")]
    StackUnderflow { pc: u16 },

    #[error("could not read program: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
