use crate::constants::{PROGRAM_START, STACK_DEPTH};
use crate::error::{Chip8Error, Result};

/// The Chip8 CPU state
///
/// Registers
/// - (v) 16 primary 8-bit registers (V0..VF)
///     - the first 15 (V0..VE) are general purpose registers
///     - the 16th (VF) is the flag register for carries, shifts and sprite collisions
/// - (i) a 16-bit memory address register
///
/// Counter
/// - (pc) a 16-bit program counter, starting where programs are loaded
///
/// Stack
/// - up to 16 return addresses, pushed by calls and popped by returns
/// - (sp) the number of addresses currently on the stack
#[derive(Debug, Copy, Clone)]
pub struct State {
    pub v: [u8; 16],
    pub i: u16,
    pub pc: u16,
    stack: [u16; STACK_DEPTH],
    sp: usize,
}

impl State {
    pub fn new() -> Self {
        State {
            v: [0; 16],
            i: 0,
            pc: PROGRAM_START,
            stack: [0; STACK_DEPTH],
            sp: 0,
        }
    }

    /// Pushes a return address; calling past the stack's capacity is fatal
    pub fn push(&mut self, address: u16) -> Result<()> {
        if self.sp == STACK_DEPTH {
            return Err(Chip8Error::StackOverflow { depth: STACK_DEPTH });
        }
        self.stack[self.sp] = address;
        self.sp += 1;
        Ok(())
    }

    /// Pops the most recent return address; returning with nothing to return to is fatal
    pub fn pop(&mut self) -> Result<u16> {
        if self.sp == 0 {
            return Err(Chip8Error::StackUnderflow);
        }
        self.sp -= 1;
        Ok(self.stack[self.sp])
    }

    /// Number of return addresses on the stack
    pub fn depth(&self) -> usize {
        self.sp
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let state = State::new();
        assert_eq!(state.pc, 0x200);
        assert_eq!(state.i, 0x0);
        assert_eq!(state.v, [0; 16]);
        assert_eq!(state.depth(), 0);
    }

    #[test]
    fn test_stack_is_lifo() {
        let mut state = State::new();
        state.push(0x202).unwrap();
        state.push(0x304).unwrap();
        assert_eq!(state.depth(), 2);
        assert_eq!(state.pop().unwrap(), 0x304);
        assert_eq!(state.pop().unwrap(), 0x202);
    }

    #[test]
    fn test_stack_overflow() {
        let mut state = State::new();
        for address in 0..STACK_DEPTH as u16 {
            state.push(address).unwrap();
        }
        match state.push(0xABC) {
            Err(Chip8Error::StackOverflow { depth }) => assert_eq!(depth, 16),
            other => panic!("expected StackOverflow, got {:?}", other),
        }
        assert_eq!(state.depth(), STACK_DEPTH);
    }

    #[test]
    fn test_stack_underflow() {
        let mut state = State::new();
        assert!(matches!(state.pop(), Err(Chip8Error::StackUnderflow)));
    }
}
