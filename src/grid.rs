use crate::snake::Coordinates;

/// What is drawn on a single cell of the playable area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    #[default]
    Empty,
    SnakePiece,
    Food,
}

/// Drawing surface the snake moves over.
///
/// Rows and columns are counted from zero inside the playable area, so any
/// border the presentation layer draws is not part of the grid.
pub trait Grid {
    fn content_at(&self, at: Coordinates) -> Cell;
    fn set_content(&mut self, at: Coordinates, cell: Cell);
    /// `(rows, cols)` of the playable area.
    fn dimensions(&self) -> (i32, i32);

    fn clear(&mut self) {
        let (rows, cols) = self.dimensions();
        for row in 0..rows {
            for col in 0..cols {
                self.set_content(Coordinates::new(row, col), Cell::Empty);
            }
        }
    }
}

/// Plain in-memory grid.
#[derive(Debug, Clone)]
pub struct Board {
    rows: i32,
    cols: i32,
    cells: Vec<Cell>,
}

impl Board {
    pub fn new(rows: i32, cols: i32) -> Self {
        assert!(rows > 0 && cols > 0, "board needs at least one cell");
        Board {
            rows,
            cols,
            cells: vec![Cell::Empty; (rows * cols) as usize],
        }
    }

    pub fn contains(&self, at: Coordinates) -> bool {
        at.row >= 0 && at.row < self.rows && at.col >= 0 && at.col < self.cols
    }

    #[cfg(test)]
    pub fn count(&self, cell: Cell) -> usize {
        self.cells.iter().filter(|c| **c == cell).count()
    }

    fn index(&self, at: Coordinates) -> usize {
        debug_assert!(self.contains(at), "{at:?} is outside the board");
        (at.row * self.cols + at.col) as usize
    }
}

impl Grid for Board {
    fn content_at(&self, at: Coordinates) -> Cell {
        self.cells[self.index(at)]
    }

    fn set_content(&mut self, at: Coordinates, cell: Cell) {
        let index = self.index(at);
        self.cells[index] = cell;
    }

    fn dimensions(&self) -> (i32, i32) {
        (self.rows, self.cols)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_board_is_empty() {
        let board = Board::new(4, 7);
        assert_eq!(board.dimensions(), (4, 7));
        assert_eq!(board.count(Cell::Empty), 28);
    }

    #[test]
    fn writes_are_addressed_by_row_then_column() {
        let mut board = Board::new(3, 5);
        board.set_content(Coordinates::new(1, 4), Cell::Food);
        assert_eq!(board.content_at(Coordinates::new(1, 4)), Cell::Food);
        assert_eq!(board.content_at(Coordinates::new(2, 1)), Cell::Empty);
        assert!(!board.contains(Coordinates::new(4, 1)));
        assert_eq!(board.count(Cell::Food), 1);
    }

    #[test]
    fn clear_resets_every_cell() {
        let mut board = Board::new(3, 3);
        board.set_content(Coordinates::new(0, 0), Cell::SnakePiece);
        board.set_content(Coordinates::new(2, 2), Cell::Food);
        board.clear();
        assert_eq!(board.count(Cell::Empty), 9);
    }
}
