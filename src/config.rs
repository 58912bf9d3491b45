use crate::error::ConfigError;
use crate::speed::SpeedController;
use clap::Parser;
use log::LevelFilter;
use std::path::PathBuf;

/// Terminal snake: eat, grow, speed up, don't bite yourself.
#[derive(Debug, Clone, Parser)]
#[command(version, about)]
pub struct Config {
    /// Rows of the playable area.
    #[arg(
        long,
        default_value_t = 20,
        value_parser = clap::value_parser!(i32).range(3..=100)
    )]
    pub rows: i32,
    /// Columns of the playable area.
    #[arg(
        long,
        default_value_t = 30,
        value_parser = clap::value_parser!(i32).range(3..=200)
    )]
    pub cols: i32,
    /// Delay between moves once the score reaches --max-score.
    #[arg(long = "min-delay-ms", value_name = "MILLISECONDS", default_value_t = 50)]
    pub min_delay_ms: u64,
    /// Delay between moves at the start of a game.
    #[arg(long = "max-delay-ms", value_name = "MILLISECONDS", default_value_t = 300)]
    pub max_delay_ms: u64,
    /// Score at which the snake reaches its top speed.
    #[arg(
        long = "max-score",
        default_value_t = 100,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub max_score: u32,
    /// Where log records are written, the terminal is busy drawing the game.
    #[arg(long = "log-file", value_name = "PATH", default_value = "cursnake.log")]
    pub log_file: PathBuf,
    /// One of off, error, warn, info, debug, trace.
    #[arg(long = "log-level", value_name = "LEVEL", default_value_t = LevelFilter::Info)]
    pub log_level: LevelFilter,
}

impl Config {
    pub fn speed_controller(&self) -> Result<SpeedController, ConfigError> {
        SpeedController::new(self.min_delay_ms, self.max_delay_ms, self.max_score)
    }
}
