/// Size of the addressable memory in bytes.
pub const MEMORY_SIZE: usize = 4096;

/// Programs are loaded (and the program counter starts) here.
pub const PROGRAM_START: u16 = 0x200;

/// The built-in hex font lives in the reserved area starting here.
pub const FONT_START: u16 = 0x050;

/// Each font glyph is 5 rows tall.
pub const FONT_GLYPH_SIZE: u16 = 5;

/// Maximum number of nested subroutine calls.
pub const STACK_DEPTH: usize = 16;

pub const DISPLAY_WIDTH: usize = 64;
pub const DISPLAY_HEIGHT: usize = 32;

/// Number of keys on the hex keypad.
pub const KEY_COUNT: usize = 16;

/// Timers, display and sound all run at this rate.
pub const FRAME_RATE: u32 = 60;

/// Instructions per second used when the driver isn't told otherwise.
pub const DEFAULT_IPS: u32 = 700;

/// # Sprite Sheet
/// Hex digits 0..F, each glyph 4 pixels wide and 5 rows tall.
/// Only the high nibble of each row is used.
///
/// ```text
/// 0xF0  ####
/// 0x90  #  #
/// 0x90  #  #
/// 0x90  #  #
/// 0xF0  ####
/// ```
pub const SPRITE_SHEET: [u8; 80] = [
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
