use crate::grid::{Cell, Grid};
use crate::snake::Coordinates;
use log::{debug, warn};
use rand::seq::IndexedRandom;
use rand::Rng;
use thiserror::Error;

/// Random guesses tried before falling back to a scan of the grid.
pub const MAX_SAMPLES: usize = 256;

/// Every cell of the grid is taken, there is nowhere left to put food.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("no empty cell left for food")]
pub struct BoardFull;

#[derive(Debug, Clone)]
pub struct FoodPlacer<R> {
    rng: R,
    max_samples: usize,
}

impl<R: Rng> FoodPlacer<R> {
    pub fn new(rng: R) -> Self {
        FoodPlacer {
            rng,
            max_samples: MAX_SAMPLES,
        }
    }

    pub fn rng(&mut self) -> &mut R {
        &mut self.rng
    }

    /// Drops a food marker on a random empty cell and returns where it went.
    pub fn place_food<G: Grid>(&mut self, grid: &mut G) -> Result<Coordinates, BoardFull> {
        let (rows, cols) = grid.dimensions();
        // cheap guesses first, they almost always hit while the snake is short
        for _ in 0..self.max_samples {
            let at = Coordinates::new(
                self.rng.random_range(0..rows),
                self.rng.random_range(0..cols),
            );
            if grid.content_at(at) == Cell::Empty {
                return Ok(self.drop_at(grid, at));
            }
        }

        warn!("no empty cell after {} samples, scanning the grid", self.max_samples);
        let mut empty_positions: Vec<Coordinates> = vec![];
        for row in 0..rows {
            for col in 0..cols {
                let at = Coordinates::new(row, col);
                if grid.content_at(at) == Cell::Empty {
                    empty_positions.push(at);
                }
            }
        }
        match empty_positions.choose(&mut self.rng) {
            Some(at) => Ok(self.drop_at(grid, *at)),
            None => Err(BoardFull),
        }
    }

    fn drop_at<G: Grid>(&mut self, grid: &mut G, at: Coordinates) -> Coordinates {
        grid.set_content(at, Cell::Food);
        debug!("food placed at {at:?}");
        at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Board;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const RNG_SEED: u64 = 0x5EED_0F_F00D;

    fn placer() -> FoodPlacer<StdRng> {
        FoodPlacer::new(StdRng::seed_from_u64(RNG_SEED))
    }

    fn fill(board: &mut Board, cell: Cell) {
        let (rows, cols) = board.dimensions();
        for row in 0..rows {
            for col in 0..cols {
                board.set_content(Coordinates::new(row, col), cell);
            }
        }
    }

    #[test]
    fn lands_on_an_empty_cell() {
        let mut food = placer();
        let mut board = Board::new(8, 8);
        for col in 0..8 {
            board.set_content(Coordinates::new(3, col), Cell::SnakePiece);
        }
        for _ in 0..20 {
            let at = food.place_food(&mut board).unwrap();
            assert!(board.contains(at));
            assert_ne!(at.row, 3);
            assert_eq!(board.content_at(at), Cell::Food);
            board.set_content(at, Cell::Empty);
        }
        assert_eq!(board.count(Cell::SnakePiece), 8);
    }

    #[test]
    fn finds_the_last_free_cell() {
        let mut food = placer();
        let mut board = Board::new(20, 20);
        fill(&mut board, Cell::SnakePiece);
        let hole = Coordinates::new(13, 7);
        board.set_content(hole, Cell::Empty);

        assert_eq!(food.place_food(&mut board), Ok(hole));
        assert_eq!(board.content_at(hole), Cell::Food);
        assert_eq!(board.count(Cell::Empty), 0);
    }

    #[test]
    fn full_board_is_reported() {
        let mut food = placer();
        let mut board = Board::new(4, 4);
        fill(&mut board, Cell::SnakePiece);
        assert_eq!(food.place_food(&mut board), Err(BoardFull));
        assert_eq!(board.count(Cell::Food), 0);
    }

    #[test]
    fn never_stacks_on_existing_food() {
        let mut food = placer();
        let mut board = Board::new(3, 3);
        for _ in 0..9 {
            food.place_food(&mut board).unwrap();
        }
        assert_eq!(board.count(Cell::Food), 9);
        assert_eq!(food.place_food(&mut board), Err(BoardFull));
    }
}
