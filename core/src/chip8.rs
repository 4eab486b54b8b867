use std::io::Read;

use log::{debug, trace};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::constants::{FRAME_RATE, KEY_COUNT, PROGRAM_START};
use crate::error::Result;
use crate::frame::FrameBuffer;
use crate::instruction::Instruction;
use crate::keypad::InputLatch;
use crate::memory::Memory;
use crate::state::State;
use crate::timers::Timers;

/// # Chip-8
/// Chip-8 is a virtual machine and corresponding interpreted language.
///
/// Tracks:
///  - the CPU `state` (registers and stack)
///  - `memory`, with the font installed and the program loaded at 0x200
///  - the delay and sound `timers`
///  - the `frame` buffer and whether it changed since it was last taken
///  - the `input` latch, generic over the host's key codes
///
/// Supplies interfaces for:
/// - loading roms
/// - fetching and executing instructions
/// - advancing its timers
/// - inspecting its frame buffer for rendering by some display
///
/// All fatal conditions come back as errors; after one the run is over and
/// the instance should be dropped.
pub struct Chip8<K> {
    pub(crate) state: State,
    pub(crate) memory: Memory,
    pub(crate) timers: Timers,
    pub(crate) frame: FrameBuffer,
    pub(crate) input: InputLatch<K>,
    pub(crate) rng: StdRng,
    pub(crate) draw_flag: bool,
}

impl<K: Copy + PartialEq> Chip8<K> {
    /// # Arguments
    /// * `keys` the host key code bound to each of the 16 keypad keys
    pub fn new(keys: [K; KEY_COUNT]) -> Self {
        Self::with_rng(keys, StdRng::from_entropy())
    }

    /// Like `new`, but with a reproducible random number sequence
    pub fn with_seed(keys: [K; KEY_COUNT], seed: u64) -> Self {
        Self::with_rng(keys, StdRng::seed_from_u64(seed))
    }

    fn with_rng(keys: [K; KEY_COUNT], rng: StdRng) -> Self {
        Chip8 {
            state: State::new(),
            memory: Memory::new(),
            timers: Timers::new(),
            frame: FrameBuffer::new(),
            input: InputLatch::new(keys),
            rng,
            draw_flag: false,
        }
    }

    /// Load a rom from a source file
    ///
    /// # Arguments
    /// * `reader` a reader that contains a ROM
    ///
    /// Returns the size of the program in bytes.
    pub fn load_rom(&mut self, reader: &mut dyn Read) -> Result<usize> {
        let mut rom = Vec::new();
        reader.read_to_end(&mut rom)?;
        self.memory.load(PROGRAM_START, &rom)?;
        debug!("loaded {} byte ROM at {:#05X}", rom.len(), PROGRAM_START);
        Ok(rom.len())
    }

    /// Gets the opcode currently pointed at by the pc and moves past it.
    /// Memory is stored as bytes, but opcodes are 16 bits so we combine two subsequent bytes.
    pub fn fetch(&mut self) -> Result<u16> {
        let range = Memory::range(self.state.pc, 2)?;
        let bytes = self.memory.slice(range);
        let op = u16::from(bytes[0]) << 8 | u16::from(bytes[1]);
        self.state.pc += 2;
        Ok(op)
    }

    /// Decodes and executes a single opcode
    pub fn execute(&mut self, op: u16) -> Result<()> {
        self.execute_instruction(Instruction::decode(op))
    }

    /// Advances the CPU by a single cycle
    pub fn step(&mut self) -> Result<()> {
        let op = self.fetch()?;
        trace!(
            "{:04X} v{:02X?} i{:04X} pc{:04X} sp{}",
            op,
            self.state.v,
            self.state.i,
            self.state.pc,
            self.state.depth()
        );
        self.execute(op)
    }

    /// Runs `cycles` cycles back to back, stopping at the first error
    pub fn run_frame(&mut self, cycles: u32) -> Result<()> {
        for _ in 0..cycles {
            self.step()?;
        }
        Ok(())
    }

    /// Decrements the delay and sound timers; call this at 60Hz
    pub fn tick_timers(&mut self) {
        self.timers.tick();
    }

    pub fn frame(&self) -> &FrameBuffer {
        &self.frame
    }

    /// Whether the frame changed since this was last called
    pub fn take_redraw(&mut self) -> bool {
        std::mem::replace(&mut self.draw_flag, false)
    }

    pub fn input_mut(&mut self) -> &mut InputLatch<K> {
        &mut self.input
    }

    pub fn timers(&self) -> &Timers {
        &self.timers
    }

    pub fn is_sounding(&self) -> bool {
        self.timers.is_sounding()
    }

    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    pub fn pc(&self) -> u16 {
        self.state.pc
    }

    pub fn i(&self) -> u16 {
        self.state.i
    }

    pub fn v(&self) -> &[u8; 16] {
        &self.state.v
    }
}

/// Number of cycles to run per 60Hz frame to hit `ips` instructions per second
pub fn cycles_per_frame(ips: u32) -> u32 {
    ips.div_ceil(FRAME_RATE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Chip8Error;

    const KEYS: [u8; 16] = [
        0x0, 0x1, 0x2, 0x3, 0x4, 0x5, 0x6, 0x7, 0x8, 0x9, 0xA, 0xB, 0xC, 0xD, 0xE, 0xF,
    ];

    fn chip8_with_rom(rom: &[u8]) -> Chip8<u8> {
        let mut chip8 = Chip8::with_seed(KEYS, 0);
        chip8.load_rom(&mut &rom[..]).unwrap();
        chip8
    }

    #[test]
    fn test_chip8_fetches_op() {
        let mut chip8 = chip8_with_rom(&[0xAA, 0xBB]);
        assert_eq!(chip8.fetch().unwrap(), 0xAABB);
        assert_eq!(chip8.pc(), 0x202);
    }

    #[test]
    fn test_fetch_at_end_of_memory() {
        let mut chip8 = chip8_with_rom(&[]);
        chip8.state.pc = 0xFFE;
        chip8.memory.write(0xFFE, 0x12);
        chip8.memory.write(0xFFF, 0x34);
        assert_eq!(chip8.fetch().unwrap(), 0x1234);
        assert_eq!(chip8.pc(), 0x1000);
    }

    #[test]
    fn test_fetch_past_end_of_memory() {
        let mut chip8 = chip8_with_rom(&[]);
        chip8.state.pc = 0xFFF;
        assert!(matches!(
            chip8.fetch(),
            Err(Chip8Error::AddressOutOfRange { address: 0x1000 })
        ));
        // the pc is left where it was
        assert_eq!(chip8.pc(), 0xFFF);
    }

    #[test]
    fn test_step_advances_pc() {
        // insert a cls opcode so there's something to execute
        let mut chip8 = chip8_with_rom(&[0x00, 0xE0]);
        chip8.step().unwrap();
        assert_eq!(chip8.pc(), 0x202);
    }

    #[test]
    fn test_load_rom_reports_size() {
        let mut chip8 = Chip8::with_seed(KEYS, 0);
        let rom: &[u8] = &[0x60, 0x05, 0x61, 0x03];
        assert_eq!(chip8.load_rom(&mut &rom[..]).unwrap(), 4);
        assert_eq!(chip8.memory().slice(0x200..0x204), rom);
    }

    #[test]
    fn test_load_rom_too_large() {
        let mut chip8 = Chip8::with_seed(KEYS, 0);
        let rom = vec![0; 0xE01];
        assert!(matches!(
            chip8.load_rom(&mut &rom[..]),
            Err(Chip8Error::RomTooLarge { .. })
        ));
    }

    #[test]
    fn test_run_frame_stops_at_error() {
        // V0 = 1, return with an empty stack, V0 = 2
        let mut chip8 = chip8_with_rom(&[0x60, 0x01, 0x00, 0xEE, 0x60, 0x02]);
        assert!(matches!(
            chip8.run_frame(3),
            Err(Chip8Error::StackUnderflow)
        ));
        assert_eq!(chip8.v()[0x0], 0x1);
        assert_eq!(chip8.pc(), 0x204);
    }

    #[test]
    fn test_tick_timers() {
        let mut chip8 = chip8_with_rom(&[]);
        chip8.timers.sound = 0x2;
        assert!(chip8.is_sounding());
        chip8.tick_timers();
        chip8.tick_timers();
        assert!(!chip8.is_sounding());
    }

    #[test]
    fn test_take_redraw() {
        let mut chip8 = chip8_with_rom(&[0x00, 0xE0]);
        assert!(!chip8.take_redraw());
        chip8.step().unwrap();
        assert!(chip8.take_redraw());
        assert!(!chip8.take_redraw());
    }

    #[test]
    fn test_cycles_per_frame() {
        assert_eq!(cycles_per_frame(700), 12);
        assert_eq!(cycles_per_frame(600), 10);
        assert_eq!(cycles_per_frame(1), 1);
    }
}
