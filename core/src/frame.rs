use crate::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH};

/// # FrameBuffer
/// The 64x32 monochrome display, packed one row per `u64`.
///
/// The most significant bit of a row is its leftmost pixel (x = 0), which
/// lines up with sprite bytes being drawn MSB first.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    rows: [u64; DISPLAY_HEIGHT],
}

impl FrameBuffer {
    pub fn new() -> Self {
        FrameBuffer {
            rows: [0; DISPLAY_HEIGHT],
        }
    }

    /// Turns every pixel off
    pub fn clear(&mut self) {
        self.rows = [0; DISPLAY_HEIGHT];
    }

    /// Whether the pixel at `(x, y)` is on; off-screen pixels are always off
    pub fn pixel(&self, x: usize, y: usize) -> bool {
        if x >= DISPLAY_WIDTH || y >= DISPLAY_HEIGHT {
            return false;
        }
        self.rows[y] >> (DISPLAY_WIDTH - 1 - x) & 1 == 1
    }

    pub fn rows(&self) -> &[u64; DISPLAY_HEIGHT] {
        &self.rows
    }

    pub fn is_blank(&self) -> bool {
        self.rows.iter().all(|&row| row == 0)
    }

    /// Every pixel in row-major order
    pub fn pixels(&self) -> impl Iterator<Item = bool> + '_ {
        (0..DISPLAY_HEIGHT)
            .flat_map(move |y| (0..DISPLAY_WIDTH).map(move |x| self.pixel(x, y)))
    }

    /// XORs one byte of a sprite onto row `y` starting at column `x`.
    ///
    /// Bits that land past the right edge are dropped, as is the whole byte
    /// if `y` is below the bottom edge. Nothing wraps.
    ///
    /// Returns true if any pixel that was on got turned off.
    pub fn draw_byte(&mut self, x: usize, y: usize, sprite: u8) -> bool {
        if x >= DISPLAY_WIDTH || y >= DISPLAY_HEIGHT {
            return false;
        }
        let mask = (u64::from(sprite) << (DISPLAY_WIDTH - 8)) >> x;
        let collision = self.rows[y] & mask != 0;
        self.rows[y] ^= mask;
        collision
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_blank() {
        assert!(FrameBuffer::new().is_blank());
    }

    #[test]
    fn test_draw_byte_msb_first() {
        let mut frame = FrameBuffer::new();
        assert!(!frame.draw_byte(0, 0, 0b1000_0001));
        assert!(frame.pixel(0, 0));
        assert!(!frame.pixel(1, 0));
        assert!(frame.pixel(7, 0));
        assert_eq!(frame.rows()[0], 0x8100_0000_0000_0000);
    }

    #[test]
    fn test_draw_byte_xors_and_collides() {
        let mut frame = FrameBuffer::new();
        frame.draw_byte(2, 3, 0b0101_0000);
        let collision = frame.draw_byte(2, 3, 0b1100_0000);
        assert!(collision);
        assert!(frame.pixel(2, 3));
        assert!(!frame.pixel(3, 3));
        assert!(!frame.pixel(4, 3));
        assert!(frame.pixel(5, 3));
    }

    #[test]
    fn test_draw_byte_clips_right_edge() {
        let mut frame = FrameBuffer::new();
        frame.draw_byte(60, 0, 0xFF);
        assert!((60..64).all(|x| frame.pixel(x, 0)));
        // clipped pixels don't wrap onto the left edge or the next row
        assert!((0..4).all(|x| !frame.pixel(x, 0)));
        assert!(frame.rows()[1] == 0);
    }

    #[test]
    fn test_draw_byte_off_screen_is_dropped() {
        let mut frame = FrameBuffer::new();
        assert!(!frame.draw_byte(0, DISPLAY_HEIGHT, 0xFF));
        assert!(!frame.draw_byte(DISPLAY_WIDTH, 0, 0xFF));
        assert!(frame.is_blank());
    }

    #[test]
    fn test_clear() {
        let mut frame = FrameBuffer::new();
        frame.draw_byte(10, 10, 0xFF);
        frame.clear();
        assert!(frame.is_blank());
    }

    #[test]
    fn test_pixels_row_major() {
        let mut frame = FrameBuffer::new();
        frame.draw_byte(1, 0, 0x80);
        frame.draw_byte(0, 1, 0x80);
        let pixels: Vec<bool> = frame.pixels().collect();
        assert_eq!(pixels.len(), DISPLAY_WIDTH * DISPLAY_HEIGHT);
        assert!(pixels[1]);
        assert!(pixels[DISPLAY_WIDTH]);
        assert_eq!(pixels.iter().filter(|&&p| p).count(), 2);
    }
}
