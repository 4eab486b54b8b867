use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::{Parser, ValueEnum};
use log::{error, LevelFilter};
use simple_logger::SimpleLogger;

use chip8_core::constants::DEFAULT_IPS;

mod audio;
mod keymap;
mod run;

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Runs a Chip-8 ROM in a window.
///
/// Keys: 1234/QWER/ASDF/ZXCV are the keypad, hold Space to fast forward,
/// Escape quits.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the ROM file to run
    rom: PathBuf,

    /// Instructions per second
    #[arg(short, long, default_value_t = DEFAULT_IPS, value_parser = clap::value_parser!(u32).range(1..))]
    ips: u32,

    /// Size of each Chip-8 pixel on screen
    #[arg(short, long, default_value_t = 10, value_parser = clap::value_parser!(u32).range(1..=64))]
    scale: u32,

    /// Frequency of the beep in Hz
    #[arg(long, default_value_t = 440.0)]
    pitch: f32,

    /// Seed for the random number generator, for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Don't play any sound
    #[arg(short, long)]
    mute: bool,

    #[arg(long, value_enum, default_value_t = LogLevel::Warn)]
    log_level: LogLevel,
}

fn main() -> Result<()> {
    let args = Args::parse();
    SimpleLogger::new()
        .with_level(args.log_level.into())
        .init()
        .map_err(|err| anyhow!("unable to start logger: {}", err))?;

    let config = run::Config {
        rom: args.rom,
        ips: args.ips,
        scale: args.scale,
        pitch: args.pitch,
        seed: args.seed,
        mute: args.mute,
    };
    run::run(config).map_err(|err| {
        error!("{:#}", err);
        err
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_args_are_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["chip8", "pong.ch8"]).unwrap();
        assert_eq!(args.rom, PathBuf::from("pong.ch8"));
        assert_eq!(args.ips, 700);
        assert_eq!(args.scale, 10);
        assert_eq!(args.seed, None);
        assert!(!args.mute);
        assert_eq!(args.log_level, LogLevel::Warn);
    }

    #[test]
    fn test_overrides() {
        let args = Args::try_parse_from([
            "chip8",
            "--ips",
            "1000",
            "--scale",
            "16",
            "--seed",
            "42",
            "--mute",
            "--log-level",
            "trace",
            "pong.ch8",
        ])
        .unwrap();
        assert_eq!(args.ips, 1000);
        assert_eq!(args.scale, 16);
        assert_eq!(args.seed, Some(42));
        assert!(args.mute);
        assert_eq!(LevelFilter::from(args.log_level), LevelFilter::Trace);
    }

    #[test]
    fn test_zero_ips_rejected() {
        assert!(Args::try_parse_from(["chip8", "--ips", "0", "pong.ch8"]).is_err());
    }
}
