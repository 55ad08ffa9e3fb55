//! Command-line options.

use std::time::Duration;

use clap::Parser;

use crate::types::TICK_MS;

#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(version, about, long_about = None)]
pub struct Config {
    /// Seed for the piece sequence. The same seed replays the same pieces.
    /// A random seed is used when omitted.
    #[arg(short, long)]
    pub seed: Option<u64>,
    /// Gravity interval in milliseconds.
    #[arg(short, long, default_value_t = TICK_MS as u64, value_parser = clap::value_parser!(u64).range(1..))]
    pub tick_ms: u64,
    /// Run without sound.
    #[arg(short, long)]
    pub mute: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: None,
            tick_ms: TICK_MS as u64,
            mute: false,
        }
    }
}

impl Config {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    /// The configured seed, or a fresh random one.
    pub fn seed_or_random(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random)
    }
}
