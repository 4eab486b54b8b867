use log::debug;
use rand::RngCore;

use crate::chip8::Chip8;
use crate::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH, FONT_GLYPH_SIZE, FONT_START, MEMORY_SIZE};
use crate::error::Result;
use crate::instruction::Instruction;
use crate::memory::Memory;

const VF: usize = 0xF;

impl<K: Copy + PartialEq> Chip8<K> {
    /// Applies a decoded instruction to the machine.
    /// The pc has already been moved past the instruction by `fetch`.
    pub(crate) fn execute_instruction(&mut self, instruction: Instruction) -> Result<()> {
        match instruction {
            Instruction::Clear => self.clr(),
            Instruction::Return => self.state.pc = self.state.pop()?,
            Instruction::Jump { nnn } => self.state.pc = nnn,
            Instruction::Call { nnn } => {
                self.state.push(self.state.pc)?;
                self.state.pc = nnn;
            }
            Instruction::SkipEqImm { x, nn } => self.skip_if(self.state.v[x] == nn),
            Instruction::SkipNeImm { x, nn } => self.skip_if(self.state.v[x] != nn),
            Instruction::SkipEqReg { x, y } => self.skip_if(self.state.v[x] == self.state.v[y]),
            Instruction::LoadImm { x, nn } => self.state.v[x] = nn,
            Instruction::AddImm { x, nn } => self.state.v[x] = self.state.v[x].wrapping_add(nn),
            Instruction::Copy { x, y } => self.state.v[x] = self.state.v[y],
            Instruction::Or { x, y } => self.state.v[x] |= self.state.v[y],
            Instruction::And { x, y } => self.state.v[x] &= self.state.v[y],
            Instruction::Xor { x, y } => self.state.v[x] ^= self.state.v[y],
            // The flag is written before the result, so when x or y is F the
            // result is computed from the fresh flag.
            Instruction::Add { x, y } => {
                self.state.v[VF] = u8::from(self.state.v[x] > u8::MAX - self.state.v[y]);
                self.state.v[x] = self.state.v[x].wrapping_add(self.state.v[y]);
            }
            Instruction::Sub { x, y } => {
                self.state.v[VF] = u8::from(self.state.v[x] > self.state.v[y]);
                self.state.v[x] = self.state.v[x].wrapping_sub(self.state.v[y]);
            }
            Instruction::ShiftRight { x } => {
                self.state.v[VF] = self.state.v[x] & 0x1;
                self.state.v[x] >>= 1;
            }
            Instruction::SubRev { x, y } => {
                self.state.v[VF] = u8::from(self.state.v[y] > self.state.v[x]);
                self.state.v[x] = self.state.v[y].wrapping_sub(self.state.v[x]);
            }
            // VF gets the raw high bit (0x80), not 1
            Instruction::ShiftLeft { x } => {
                self.state.v[VF] = self.state.v[x] & 0x80;
                self.state.v[x] <<= 1;
            }
            Instruction::SkipNeReg { x, y } => self.skip_if(self.state.v[x] != self.state.v[y]),
            Instruction::LoadIndex { nnn } => self.state.i = nnn,
            Instruction::JumpOffset { x, nnn } => self.state.pc = nnn + u16::from(self.state.v[x]),
            Instruction::Random { x, nn } => self.state.v[x] = self.rng.next_u32() as u8 & nn,
            Instruction::Draw { x, y, n } => self.draw(x, y, n)?,
            Instruction::SkipKeyDown { x } => self.skip_if(self.input.is_pressed(self.state.v[x])),
            Instruction::SkipKeyUp { x } => self.skip_if(!self.input.is_pressed(self.state.v[x])),
            Instruction::ReadDelay { x } => self.state.v[x] = self.timers.delay,
            Instruction::WaitKeyRelease { x } => self.keyd(x),
            Instruction::SetDelay { x } => self.timers.delay = self.state.v[x],
            Instruction::SetSound { x } => self.timers.sound = self.state.v[x],
            // VF is only ever set here, never cleared. I saturates so it can't
            // wrap back into memory once it has run off the end.
            Instruction::AddIndex { x } => {
                self.state.i = self.state.i.saturating_add(u16::from(self.state.v[x]));
                if self.state.i as usize >= MEMORY_SIZE {
                    self.state.v[VF] = 0x1;
                }
            }
            Instruction::FontAddr { x } => {
                self.state.i = FONT_START + FONT_GLYPH_SIZE * u16::from(self.state.v[x] & 0x0F)
            }
            Instruction::Bcd { x } => self.bcd(x)?,
            Instruction::StoreRegs { x } => self.stor(x)?,
            Instruction::LoadRegs { x } => self.read(x)?,
            Instruction::Unknown(op) => debug!("ignoring unknown opcode {:04X}", op),
        }
        Ok(())
    }

    /// if condition then pc += 2
    fn skip_if(&mut self, condition: bool) {
        if condition {
            self.state.pc = self.state.pc.wrapping_add(2);
        }
    }

    /// clear
    fn clr(&mut self) {
        self.frame.clear();
        self.draw_flag = true;
    }

    /// draw_sprite(x=Vx y=Vy size=n)
    /// XORs a sprite from memory i..i+n at position Vx, Vy on the FrameBuffer.
    /// The origin wraps but the sprite itself is clipped at the edges.
    /// Sets VF if any pixels are erased.
    fn draw(&mut self, x: usize, y: usize, n: u8) -> Result<()> {
        let sprite = Memory::range(self.state.i, n as usize)?;
        let origin_x = self.state.v[x] as usize % DISPLAY_WIDTH;
        let origin_y = self.state.v[y] as usize % DISPLAY_HEIGHT;

        // Reset the flag (used for collision detection)
        self.state.v[VF] = 0x0;

        let mut collision = false;
        for (row, &byte) in self.memory.slice(sprite).iter().enumerate() {
            collision |= self.frame.draw_byte(origin_x, origin_y + row, byte);
        }
        if collision {
            self.state.v[VF] = 0x1;
        }
        self.draw_flag = true;
        Ok(())
    }

    /// await key release for Vx
    /// Rewinds the pc onto this instruction until a bound key has been released,
    /// so it's retried on every cycle without ever blocking the caller.
    fn keyd(&mut self, x: usize) {
        let released = self
            .input
            .last_released()
            .and_then(|code| self.input.index_of(code));
        match released {
            Some(ordinal) => self.state.v[x] = ordinal,
            None => self.state.pc = self.state.pc.wrapping_sub(2),
        }
    }

    /// mem[I..I+3] = bcd(Vx)
    /// Store BCD repr of Vx in memory starting at address i
    fn bcd(&mut self, x: usize) -> Result<()> {
        let value = self.state.v[x];
        let digits = [value / 100, value / 10 % 10, value % 10];
        let range = Memory::range(self.state.i, digits.len())?;
        self.memory.slice_mut(range).copy_from_slice(&digits);
        Ok(())
    }

    /// mem[I..=I+x] = V0..=Vx
    fn stor(&mut self, x: usize) -> Result<()> {
        let range = Memory::range(self.state.i, x + 1)?;
        self.memory
            .slice_mut(range)
            .copy_from_slice(&self.state.v[..=x]);
        Ok(())
    }

    /// V0..=Vx = mem[I..=I+x]
    fn read(&mut self, x: usize) -> Result<()> {
        let range = Memory::range(self.state.i, x + 1)?;
        self.state.v[..=x].copy_from_slice(self.memory.slice(range));
        Ok(())
    }
}
