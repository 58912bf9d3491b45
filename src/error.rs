use std::io;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("minimum delay {min}ms must be below maximum delay {max}ms")]
    DelayRange { min: u64, max: u64 },
    #[error("max score must be at least 1")]
    ZeroMaxScore,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("could not start logging: {0}")]
    Logger(#[from] log::SetLoggerError),
    #[error("keyboard input closed")]
    InputClosed,
}

pub type Result<T> = std::result::Result<T, Error>;
