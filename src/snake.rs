// the snake lives in a ring buffer sized to the whole grid: it can never be longer than that
// head is the newest slot, tail the oldest one, both wrap around modulo the capacity
// the ring buffer knows where the snake is, the grid knows what is drawn, every move updates both
use crate::grid::{Cell, Grid};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn opposite(&self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Coordinates {
    pub row: i32,
    pub col: i32,
}

impl Coordinates {
    pub fn new(row: i32, col: i32) -> Coordinates {
        Coordinates { row, col }
    }

    pub fn move_towards(&mut self, direction: Direction) {
        match direction {
            Direction::Up => self.row -= 1,
            Direction::Down => self.row += 1,
            Direction::Left => self.col -= 1,
            Direction::Right => self.col += 1,
        }
    }

    pub fn get_towards(&self, direction: Direction) -> Coordinates {
        let mut res = *self;
        res.move_towards(direction);
        res
    }
}

/// Result of moving the snake by one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Ate the food: one cell longer, a new food has to be placed.
    Grew,
    Moved,
    CollidedWithSelf,
}

#[derive(Debug, Clone)]
pub struct Body {
    rows: i32,
    cols: i32,
    positions: Vec<Coordinates>,
    head: usize,
    tail: usize,
    direction: Direction,
}

impl Body {
    /// Allocates a body able to cover a `rows` x `cols` grid.
    pub fn new(rows: i32, cols: i32) -> Self {
        assert!(rows > 0 && cols > 0, "grid must have at least one cell");
        Body {
            rows,
            cols,
            positions: vec![Coordinates::default(); (rows * cols) as usize],
            head: 0,
            tail: 0,
            direction: Direction::Right,
        }
    }

    pub fn capacity(&self) -> usize {
        self.positions.len()
    }

    /// Number of live cells, derived from the ring indices.
    pub fn len(&self) -> usize {
        (self.head + self.capacity() - self.tail) % self.capacity() + 1
    }

    pub fn head(&self) -> Coordinates {
        self.positions[self.head]
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Live cells from tail to head.
    pub fn cells(&self) -> impl Iterator<Item = Coordinates> + '_ {
        (0..self.len()).map(move |i| self.positions[(self.tail + i) % self.capacity()])
    }

    pub fn reset<G: Grid>(&mut self, start: Coordinates, direction: Direction, grid: &mut G) {
        // wipe the previous snake before forgetting where it was
        let footprint: Vec<Coordinates> = self.cells().collect();
        for position in footprint {
            grid.set_content(position, Cell::Empty);
        }
        self.head = 0;
        self.tail = 0;
        self.positions[0] = start;
        self.direction = direction;
        grid.set_content(start, Cell::SnakePiece);
    }

    /// False when the head sits on the edge it is heading towards.
    pub fn can_advance(&self, direction: Direction) -> bool {
        let head = self.head();
        match direction {
            Direction::Up => head.row > 0,
            Direction::Down => head.row < self.rows - 1,
            Direction::Left => head.col > 0,
            Direction::Right => head.col < self.cols - 1,
        }
    }

    /// Moves the head one cell towards `direction`.
    ///
    /// Bounds are not checked here, callers have to ask [`Body::can_advance`] first.
    pub fn advance<G: Grid>(&mut self, direction: Direction, grid: &mut G) -> Outcome {
        let new_head = self.head().get_towards(direction);
        self.direction = direction;
        self.head = self.next_index(self.head);
        self.positions[self.head] = new_head;
        debug_assert!(self.head < self.capacity() && self.tail < self.capacity());

        match grid.content_at(new_head) {
            Cell::Food => {
                grid.set_content(new_head, Cell::SnakePiece);
                Outcome::Grew
            }
            Cell::SnakePiece => Outcome::CollidedWithSelf,
            Cell::Empty => {
                grid.set_content(new_head, Cell::SnakePiece);
                grid.set_content(self.positions[self.tail], Cell::Empty);
                self.tail = self.next_index(self.tail);
                Outcome::Moved
            }
        }
    }

    fn next_index(&self, index: usize) -> usize {
        (index + 1) % self.capacity()
    }
}
