use crate::food::{BoardFull, FoodPlacer};
use crate::grid::Grid;
use crate::motion::{propose_direction, Reversal};
use crate::snake::{Body, Coordinates, Direction, Outcome};
use crate::speed::SpeedController;
use log::{debug, info};
use rand::Rng;
use std::ops::Range;
use thiserror::Error;

/// Why a game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GameOver {
    #[error("the snake hit the wall")]
    OutOfBounds,
    #[error("the snake bit itself")]
    SelfCollision,
    #[error("the snake {0}")]
    Reversal(Reversal),
    #[error("the snake filled the whole board")]
    BoardFull,
}

impl From<Reversal> for GameOver {
    fn from(reversal: Reversal) -> Self {
        GameOver::Reversal(reversal)
    }
}

impl From<BoardFull> for GameOver {
    fn from(_: BoardFull) -> Self {
        GameOver::BoardFull
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Idle,
    Playing,
    Over(GameOver),
}

/// What a single tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    Moved,
    Grew { food: Coordinates },
    Over(GameOver),
    /// No game is running.
    Ignored,
}

/// One player's sequence of games on a fixed grid.
///
/// Score and body are per game, the random source lives as long as the session.
#[derive(Debug, Clone)]
pub struct Session<R> {
    body: Body,
    food: FoodPlacer<R>,
    speed: SpeedController,
    score: u32,
    state: GameState,
}

impl<R: Rng> Session<R> {
    pub fn new(rows: i32, cols: i32, speed: SpeedController, rng: R) -> Self {
        Session {
            body: Body::new(rows, cols),
            food: FoodPlacer::new(rng),
            speed,
            score: 0,
            state: GameState::Idle,
        }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn body(&self) -> &Body {
        &self.body
    }

    /// Milliseconds to wait for input before the next tick.
    pub fn timeout(&self) -> u64 {
        self.speed.timeout_for(self.score)
    }

    /// Starts a game at a random spot away from the walls.
    pub fn start<G: Grid>(&mut self, grid: &mut G) -> GameState {
        let (rows, cols) = grid.dimensions();
        let rng = self.food.rng();
        let start = Coordinates::new(
            rng.random_range(interior(rows)),
            rng.random_range(interior(cols)),
        );
        // head for the far side so the first move never hits the wall
        let direction = if start.col < cols / 2 {
            Direction::Right
        } else {
            Direction::Left
        };
        self.begin(grid, start, direction)
    }

    pub fn begin<G: Grid>(
        &mut self,
        grid: &mut G,
        start: Coordinates,
        direction: Direction,
    ) -> GameState {
        if self.state != GameState::Idle {
            return self.state;
        }
        let (rows, cols) = grid.dimensions();
        debug_assert_eq!((rows * cols) as usize, self.body.capacity());

        grid.clear();
        self.body.reset(start, direction, grid);
        self.score = 0;
        info!("new game at {start:?} heading {direction:?}");
        self.state = match self.food.place_food(grid) {
            Ok(_) => GameState::Playing,
            Err(full) => GameState::Over(full.into()),
        };
        self.state
    }

    /// Moves the snake once, turning first if the player asked for it.
    pub fn tick<G: Grid>(&mut self, grid: &mut G, requested: Option<Direction>) -> Tick {
        if self.state != GameState::Playing {
            return Tick::Ignored;
        }

        let current = self.body.direction();
        let direction = match requested.map(|r| propose_direction(current, r)) {
            None => current,
            Some(Ok(direction)) => direction,
            Some(Err(reversal)) => return self.finish(reversal.into()),
        };
        if !self.body.can_advance(direction) {
            return self.finish(GameOver::OutOfBounds);
        }

        match self.body.advance(direction, grid) {
            Outcome::Moved => Tick::Moved,
            Outcome::CollidedWithSelf => self.finish(GameOver::SelfCollision),
            Outcome::Grew => {
                self.score += 1;
                debug!("score {} delay {}ms", self.score, self.timeout());
                match self.food.place_food(grid) {
                    Ok(food) => Tick::Grew { food },
                    Err(full) => self.finish(full.into()),
                }
            }
        }
    }

    /// Goes back to idle once the player has seen the game-over screen.
    pub fn acknowledge(&mut self) {
        if let GameState::Over(_) = self.state {
            self.state = GameState::Idle;
        }
    }

    fn finish(&mut self, reason: GameOver) -> Tick {
        info!(
            "game over with score {} and length {}: {reason}",
            self.score,
            self.body.len()
        );
        self.state = GameState::Over(reason);
        Tick::Over(reason)
    }
}

fn interior(extent: i32) -> Range<i32> {
    if extent > 2 {
        1..extent - 1
    } else {
        0..extent
    }
}
