use crate::snake::Direction;
use thiserror::Error;

/// The player asked the snake to turn back onto itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("turned from {current:?} straight back {requested:?}")]
pub struct Reversal {
    pub current: Direction,
    pub requested: Direction,
}

/// Accepts any turn except a full reversal, which counts as a collision.
pub fn propose_direction(current: Direction, requested: Direction) -> Result<Direction, Reversal> {
    if requested == current.opposite() {
        return Err(Reversal { current, requested });
    }
    Ok(requested)
}
