use crate::constants::KEY_COUNT;

/// # Keypad
/// Chip-8 input is generated with a hexadecimal keypad.
///
/// Each of the 16 keys is bound to exactly one host input code; the key's
/// ordinal (0x0..0xF) is its position in the binding table.
/// The latch is generic over the host's code type so the interpreter doesn't
/// need to know where its input comes from.
///
/// Besides the pressed state it remembers the most recent release. That
/// marker is a one-shot signal: the driver clears it at the start of every
/// polling cycle.
pub struct InputLatch<K> {
    bindings: [K; KEY_COUNT],
    pressed: [bool; KEY_COUNT],
    last_released: Option<K>,
}

impl<K: Copy + PartialEq> InputLatch<K> {
    /// # Arguments
    /// * `bindings` the host code for each key, indexed by ordinal
    pub fn new(bindings: [K; KEY_COUNT]) -> Self {
        InputLatch {
            bindings,
            pressed: [false; KEY_COUNT],
            last_released: None,
        }
    }

    /// Whether `code` is bound to any key
    pub fn contains(&self, code: K) -> bool {
        self.index_of(code).is_some()
    }

    /// The ordinal of the key bound to `code`
    pub fn index_of(&self, code: K) -> Option<u8> {
        self.bindings
            .iter()
            .position(|&bound| bound == code)
            .map(|ordinal| ordinal as u8)
    }

    /// Records a press or release of `code`; unbound codes are ignored
    ///
    /// # Arguments
    /// * `code` the host input code
    /// * `pressed` true on key-down, false on key-up
    pub fn set_key(&mut self, code: K, pressed: bool) {
        if let Some(ordinal) = self.index_of(code) {
            self.pressed[ordinal as usize] = pressed;
            if !pressed {
                self.last_released = Some(code);
            }
        }
    }

    /// Whether the key at `ordinal` is held down.
    /// Ordinals past 0xF are never pressed.
    pub fn is_pressed(&self, ordinal: u8) -> bool {
        self.pressed
            .get(ordinal as usize)
            .copied()
            .unwrap_or(false)
    }

    pub fn last_released(&self) -> Option<K> {
        self.last_released
    }

    /// Forgets the most recent release
    pub fn clear_release(&mut self) {
        self.last_released = None;
    }
}
