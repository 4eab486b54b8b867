use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Error, Result};
use log::{debug, info};
use sdl2::event::Event;
use sdl2::keyboard::Scancode;

use chip8_core::constants::FRAME_RATE;
use chip8_core::{cycles_per_frame, Chip8};
use display::Display;

use crate::audio::Beeper;
use crate::keymap::KEYMAP;

/// Everything the frontend needs to know to run a ROM
#[derive(Debug)]
pub struct Config {
    pub rom: PathBuf,
    pub ips: u32,
    pub scale: u32,
    pub pitch: f32,
    pub seed: Option<u64>,
    pub mute: bool,
}

pub fn run(config: Config) -> Result<()> {
    let mut chip8 = match config.seed {
        Some(seed) => Chip8::with_seed(KEYMAP, seed),
        None => Chip8::new(KEYMAP),
    };

    // Load ROM
    let file = File::open(&config.rom)
        .with_context(|| format!("unable to open {}", config.rom.display()))?;
    let mut reader = BufReader::new(file);
    let size = chip8
        .load_rom(&mut reader)
        .with_context(|| format!("unable to load {}", config.rom.display()))?;
    info!("loaded {} ({} bytes)", config.rom.display(), size);

    // Get SDL2 context
    let sdl: sdl2::Sdl = sdl2::init().map_err(Error::msg)?;
    let mut display = Display::new(&sdl, config.scale)?;
    let mut beeper = if config.mute {
        None
    } else {
        Some(Beeper::new(&sdl, config.pitch)?)
    };
    let mut events = sdl.event_pump().map_err(Error::msg)?;

    // Set timing: a fixed batch of cycles per 60Hz frame
    let frame_time = Duration::from_secs(1) / FRAME_RATE;
    let cycles = cycles_per_frame(config.ips);
    info!("running {} cycles per frame", cycles);

    // Whether or not the frame rate should be respected
    let mut fast_forward = false;

    'event: loop {
        let frame_start = Instant::now();

        // Handle input; releases only count for the frame they happen in
        chip8.input_mut().clear_release();
        for event in events.poll_iter() {
            match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    scancode: Some(Scancode::Escape),
                    ..
                } => break 'event,
                Event::KeyDown {
                    scancode: Some(Scancode::Space),
                    ..
                } => fast_forward = true,
                Event::KeyUp {
                    scancode: Some(Scancode::Space),
                    ..
                } => fast_forward = false,
                Event::KeyDown {
                    scancode: Some(key),
                    repeat: false,
                    ..
                } => chip8.input_mut().set_key(key, true),
                Event::KeyUp {
                    scancode: Some(key),
                    ..
                } => chip8.input_mut().set_key(key, false),
                _ => continue,
            };
        }

        // Update state
        chip8
            .run_frame(cycles)
            .with_context(|| format!("halted at pc {:#05X}", chip8.pc()))?;
        chip8.tick_timers();

        // Output
        if chip8.take_redraw() {
            display.render(chip8.frame())?;
        }
        if let Some(beeper) = beeper.as_mut() {
            beeper.set_playing(chip8.is_sounding());
        }

        // Handle timing
        let elapsed = frame_start.elapsed();
        if !fast_forward && frame_time > elapsed {
            std::thread::sleep(frame_time - elapsed);
        }
    }

    debug!("window closed");
    Ok(())
}
