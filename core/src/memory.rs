use std::ops::Range;

use crate::constants::{FONT_START, MEMORY_SIZE, SPRITE_SHEET};
use crate::error::{Chip8Error, Result};

/// # Memory
/// 4096 bytes of addressable memory.
///
/// ```text
/// 0x000..0x050  reserved
/// 0x050..0x0A0  sprite sheet (hex font)
/// 0x0A0..0x200  reserved
/// 0x200..0x1000 program
/// ```
///
/// `read` and `write` index directly and panic on a bad address. Anything
/// that computes an address from program data goes through `range` first.
pub struct Memory {
    bytes: [u8; MEMORY_SIZE],
}

impl Memory {
    pub fn new() -> Self {
        let mut bytes = [0; MEMORY_SIZE];
        let font = FONT_START as usize;
        bytes[font..font + SPRITE_SHEET.len()].copy_from_slice(&SPRITE_SHEET);
        Memory { bytes }
    }

    pub fn read(&self, address: u16) -> u8 {
        self.bytes[address as usize]
    }

    pub fn write(&mut self, address: u16, value: u8) {
        self.bytes[address as usize] = value;
    }

    /// Validates that `len` bytes starting at `start` are addressable.
    ///
    /// # Arguments
    /// * `start` the first address of the range
    /// * `len` the number of bytes in the range
    pub fn range(start: u16, len: usize) -> Result<Range<usize>> {
        let start = start as usize;
        let end = start + len;
        if end > MEMORY_SIZE {
            // report the first byte that would have been touched out of bounds
            return Err(Chip8Error::AddressOutOfRange {
                address: start.max(MEMORY_SIZE),
            });
        }
        Ok(start..end)
    }

    pub fn slice(&self, range: Range<usize>) -> &[u8] {
        &self.bytes[range]
    }

    pub fn slice_mut(&mut self, range: Range<usize>) -> &mut [u8] {
        &mut self.bytes[range]
    }

    /// Copies `data` into memory starting at `address`.
    /// Fails instead of truncating if the data doesn't fit.
    pub fn load(&mut self, address: u16, data: &[u8]) -> Result<()> {
        let range = Memory::range(address, data.len()).map_err(|_| Chip8Error::RomTooLarge {
            size: data.len(),
            max_size: MEMORY_SIZE - address as usize,
        })?;
        self.bytes[range].copy_from_slice(data);
        Ok(())
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}
