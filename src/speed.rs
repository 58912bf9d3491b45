// the snake speeds up as the score grows
// the delay slides linearly from max_timeout at score 0 down to min_timeout at max_score
// and stays at min_timeout from there on
use crate::error::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpeedController {
    min_timeout: u64,
    max_timeout: u64,
    max_score: u32,
}

impl SpeedController {
    pub fn new(min_timeout: u64, max_timeout: u64, max_score: u32) -> Result<Self, ConfigError> {
        if min_timeout >= max_timeout {
            return Err(ConfigError::DelayRange {
                min: min_timeout,
                max: max_timeout,
            });
        }
        if max_score == 0 {
            return Err(ConfigError::ZeroMaxScore);
        }
        Ok(SpeedController {
            min_timeout,
            max_timeout,
            max_score,
        })
    }

    /// Input-read timeout in milliseconds for the given score.
    pub fn timeout_for(&self, score: u32) -> u64 {
        let score = num::clamp(score, 0, self.max_score) as u64;
        let span = self.max_timeout - self.min_timeout;
        self.max_timeout - score * span / self.max_score as u64
    }
}
