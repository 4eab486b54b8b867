pub use chip8::{cycles_per_frame, Chip8};
pub use error::{Chip8Error, Result};
pub use frame::FrameBuffer;
pub use keypad::InputLatch;
pub use timers::Timers;

mod chip8;
pub mod constants;
mod error;
mod frame;
pub mod instruction;
mod keypad;
pub mod memory;
pub mod opcode;
mod operations;
mod state;
mod timers;
