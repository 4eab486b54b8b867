use std::io;

use thiserror::Error;

/// Everything that can stop a running program.
///
/// None of these are recoverable; the driver is expected to report the error
/// and end the run.
#[derive(Debug, Error)]
pub enum Chip8Error {
    #[error("unable to read ROM")]
    Io(#[from] io::Error),

    #[error("ROM is too large ({size} bytes), max size is {max_size} bytes")]
    RomTooLarge { size: usize, max_size: usize },

    #[error("stack overflow: subroutine calls nested deeper than {depth}")]
    StackOverflow { depth: usize },

    #[error("stack underflow: return with an empty call stack")]
    StackUnderflow,

    #[error("memory access out of bounds at address {address:#06X}")]
    AddressOutOfRange { address: usize },
}

pub type Result<T> = std::result::Result<T, Chip8Error>;
