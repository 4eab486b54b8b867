use anyhow::{Error, Result};
use sdl2::audio::{AudioCallback, AudioDevice, AudioSpecDesired};

const SAMPLE_RATE: i32 = 44_100;
const VOLUME: f32 = 0.25;

/// A square wave; the only sound a Chip-8 can make
struct SquareWave {
    phase_inc: f32,
    phase: f32,
    volume: f32,
}

impl AudioCallback for SquareWave {
    type Channel = f32;

    fn callback(&mut self, out: &mut [f32]) {
        for sample in out.iter_mut() {
            *sample = if self.phase <= 0.5 {
                self.volume
            } else {
                -self.volume
            };
            self.phase = (self.phase + self.phase_inc) % 1.0;
        }
    }
}

/// # Beeper
/// Plays a tone for as long as the sound timer is running.
/// The tone is generated on SDL's audio thread; this only pauses and resumes it.
pub struct Beeper {
    device: AudioDevice<SquareWave>,
    playing: bool,
}

impl Beeper {
    /// # Arguments
    /// * `sdl` an sdl2 context with which to play sound
    /// * `pitch` the frequency of the tone in Hz
    pub fn new(sdl: &sdl2::Sdl, pitch: f32) -> Result<Self> {
        let audio_subsystem = sdl.audio().map_err(Error::msg)?;
        let desired = AudioSpecDesired {
            freq: Some(SAMPLE_RATE),
            channels: Some(1),
            samples: None,
        };
        let device = audio_subsystem
            .open_playback(None, &desired, |spec| SquareWave {
                phase_inc: pitch / spec.freq as f32,
                phase: 0.0,
                volume: VOLUME,
            })
            .map_err(Error::msg)?;
        Ok(Beeper {
            device,
            playing: false,
        })
    }

    /// Starts or stops the tone; does nothing if it's already in that state
    pub fn set_playing(&mut self, playing: bool) {
        if playing == self.playing {
            return;
        }
        if playing {
            self.device.resume();
        } else {
            self.device.pause();
        }
        self.playing = playing;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_wave_alternates() {
        let mut wave = SquareWave {
            phase_inc: 0.25,
            phase: 0.0,
            volume: 0.5,
        };
        let mut out = [0.0; 8];
        wave.callback(&mut out);
        assert_eq!(out, [0.5, 0.5, 0.5, -0.5, 0.5, 0.5, 0.5, -0.5]);
    }
}
