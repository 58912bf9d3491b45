// everything that touches the terminal: raw mode, the stdin reader and the screen
// screen layout, 1-based terminal lines:
//   line 1           menu
//   line 2           top border
//   lines 3..3+rows  playable rows, two columns per cell
//   line 3+rows      bottom border
//   line 4+rows      status
use crate::grid::{Board, Cell, Grid};
use crate::snake::Coordinates;
use colored::Colorize;
use std::io::{self, Read, Write};
use std::os::unix::io::RawFd;
use std::sync::mpsc::{self, Receiver};
use std::thread;
use termios::{tcsetattr, Termios, ECHO, ICANON, TCSANOW};

const STDIN: RawFd = 0;
const MENU_LINE: i32 = 1;
const FIRST_ROW_LINE: i32 = 3;

/// Keeps stdin unbuffered and silent while alive.
pub struct RawMode {
    old_termios: Termios,
}

impl RawMode {
    pub fn enable() -> io::Result<Self> {
        let old_termios = Termios::from_fd(STDIN)?;
        let mut new_termios = old_termios;
        // no echo and no canonical mode, keys arrive as soon as they are pressed
        new_termios.c_lflag &= !(ICANON | ECHO);
        tcsetattr(STDIN, TCSANOW, &new_termios)?;
        let mut out = io::stdout();
        write!(out, "\x1b[?25l")?;
        out.flush()?;
        Ok(RawMode { old_termios })
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        let _ = tcsetattr(STDIN, TCSANOW, &self.old_termios);
        let mut out = io::stdout();
        let _ = write!(out, "\x1b[?25h");
        let _ = out.flush();
    }
}

/// Reads stdin one byte at a time on a background thread.
pub fn spawn_stdin_channel() -> Receiver<u8> {
    let (tx, rx) = mpsc::channel::<u8>();
    thread::spawn(move || {
        let mut reader = io::stdin();
        let mut buffer: [u8; 1] = [0; 1];
        while reader.read_exact(&mut buffer).is_ok() {
            if tx.send(buffer[0]).is_err() {
                break;
            }
        }
    });
    rx
}

/// A [`Grid`] that mirrors every write on the terminal.
///
/// Drawing is queued and only reaches the terminal on [`TerminalGrid::flush`].
pub struct TerminalGrid {
    board: Board,
    head: Option<Coordinates>,
    pending: String,
    out: Box<dyn Write>,
}

impl TerminalGrid {
    pub fn new(rows: i32, cols: i32, out: Box<dyn Write>) -> Self {
        TerminalGrid {
            board: Board::new(rows, cols),
            head: None,
            pending: String::new(),
            out,
        }
    }

    /// Clears the screen and draws the border and every cell.
    pub fn draw_frame(&mut self) {
        let (rows, cols) = self.board.dimensions();
        self.pending.push_str("\x1b[2J\x1b[1;1H");

        let bar = "▄▄".repeat(cols as usize);
        self.move_to(FIRST_ROW_LINE - 1, 1);
        self.pending.push_str(&format!("▗{bar}▖"));
        for row in 0..rows {
            self.move_to(FIRST_ROW_LINE + row, 1);
            self.pending.push('▐');
            self.move_to(FIRST_ROW_LINE + row, 2 + 2 * cols);
            self.pending.push('▌');
            for col in 0..cols {
                self.draw_cell(Coordinates::new(row, col));
            }
        }
        let bar = "▀▀".repeat(cols as usize);
        self.move_to(FIRST_ROW_LINE + rows, 1);
        self.pending.push_str(&format!("▝{bar}▘"));
    }

    /// Draws the head glyph at `head` and turns the previous head back into body.
    pub fn show_head(&mut self, head: Coordinates) {
        if let Some(previous) = self.head.replace(head) {
            self.draw_cell(previous);
        }
        self.draw_cell(head);
    }

    pub fn menu(&mut self, text: &str) {
        self.write_line(MENU_LINE, text);
    }

    pub fn status(&mut self, text: &str) {
        let (rows, _) = self.board.dimensions();
        self.write_line(FIRST_ROW_LINE + rows + 1, text);
    }

    /// Parks the cursor below the game, used before leaving.
    pub fn leave(&mut self) {
        let (rows, _) = self.board.dimensions();
        self.move_to(FIRST_ROW_LINE + rows + 2, 1);
        self.pending.push('\n');
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.out.write_all(self.pending.as_bytes())?;
        self.pending.clear();
        self.out.flush()
    }

    fn write_line(&mut self, line: i32, text: &str) {
        self.move_to(line, 1);
        self.pending.push_str("\x1b[2K");
        self.pending.push_str(text);
    }

    fn draw_cell(&mut self, at: Coordinates) {
        let glyph = match self.board.content_at(at) {
            Cell::Empty => "  ".normal(),
            Cell::SnakePiece if self.head == Some(at) => "Ӫ ".yellow(),
            Cell::SnakePiece => "⏺ ".green(),
            Cell::Food => "♦ ".red(),
        };
        self.move_to(FIRST_ROW_LINE + at.row, 2 + 2 * at.col);
        self.pending.push_str(&glyph.to_string());
    }

    fn move_to(&mut self, line: i32, column: i32) {
        self.pending.push_str(&format!("\x1b[{line};{column}H"));
    }
}

impl Grid for TerminalGrid {
    fn content_at(&self, at: Coordinates) -> Cell {
        self.board.content_at(at)
    }

    fn set_content(&mut self, at: Coordinates, cell: Cell) {
        self.board.set_content(at, cell);
        self.draw_cell(at);
    }

    fn dimensions(&self) -> (i32, i32) {
        self.board.dimensions()
    }
}
