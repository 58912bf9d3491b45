// the frame loop: one tick each time the delay from the speed controller runs out,
// keys pressed in between only decide where the next tick turns
use crate::config::Config;
use crate::error::{Error, Result};
use crate::game::{GameOver, GameState, Session, Tick};
use crate::input::{InputBuffer, Key};
use crate::speed::SpeedController;
use crate::term::TerminalGrid;
use log::{debug, info};
use rand::Rng;
use std::io::Write;
use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};

const IDLE_MENU: &str = "SNAKE   Enter: new game   Arrows/WASD: steer   Q: quit";
const PLAYING_MENU: &str = "SNAKE   Arrows/WASD: steer   Q: quit";

pub struct App<R> {
    session: Session<R>,
    grid: TerminalGrid,
    input: InputBuffer,
    keys: Receiver<u8>,
    best_score: u32,
}

impl<R: Rng> App<R> {
    pub fn new(
        config: &Config,
        speed: SpeedController,
        rng: R,
        keys: Receiver<u8>,
        out: Box<dyn Write>,
    ) -> Self {
        App {
            session: Session::new(config.rows, config.cols, speed, rng),
            grid: TerminalGrid::new(config.rows, config.cols, out),
            input: InputBuffer::new(),
            keys,
            best_score: 0,
        }
    }

    pub fn best_score(&self) -> u32 {
        self.best_score
    }

    pub fn run(&mut self) -> Result<()> {
        self.grid.draw_frame();
        loop {
            let keep_going = match self.session.state() {
                GameState::Idle => self.idle()?,
                GameState::Playing => self.play_frame()?,
                GameState::Over(reason) => self.game_over(reason)?,
            };
            self.grid.flush()?;
            if !keep_going {
                break;
            }
        }
        self.grid.leave();
        self.grid.flush()?;
        Ok(())
    }

    fn idle(&mut self) -> Result<bool> {
        self.grid.menu(IDLE_MENU);
        self.show_status();
        self.grid.flush()?;
        match self.wait_key()? {
            Key::Quit => Ok(false),
            Key::Confirm => {
                if self.session.start(&mut self.grid) == GameState::Playing {
                    self.grid.show_head(self.session.body().head());
                    self.grid.menu(PLAYING_MENU);
                    self.show_status();
                }
                Ok(true)
            }
            Key::Move(_) => Ok(true),
        }
    }

    fn play_frame(&mut self) -> Result<bool> {
        let deadline = Instant::now() + Duration::from_millis(self.session.timeout());
        let mut turn = None;
        loop {
            // one turn per tick, later keys wait in the buffer for the next frames
            while turn.is_none() {
                match self.input.next_key() {
                    Some(Key::Quit) => {
                        info!("quit during a game with score {}", self.session.score());
                        return Ok(false);
                    }
                    Some(Key::Move(direction)) => turn = Some(direction),
                    Some(Key::Confirm) => {}
                    None => break,
                }
            }
            let now = Instant::now();
            if now >= deadline {
                break;
            }
            match self.keys.recv_timeout(deadline - now) {
                Ok(byte) => self.input.push(byte),
                Err(RecvTimeoutError::Timeout) => break,
                Err(RecvTimeoutError::Disconnected) => return Err(Error::InputClosed),
            }
        }

        let tick = self.session.tick(&mut self.grid, turn);
        self.best_score = self.best_score.max(self.session.score());
        match tick {
            Tick::Moved => self.grid.show_head(self.session.body().head()),
            Tick::Grew { food } => {
                debug!("next food at {food:?}");
                self.grid.show_head(self.session.body().head());
                self.show_status();
            }
            // the last move may have eaten, e.g. the bite that fills the board
            Tick::Over(_) => {
                self.grid.show_head(self.session.body().head());
                self.show_status();
            }
            Tick::Ignored => {}
        }
        Ok(true)
    }

    fn game_over(&mut self, reason: GameOver) -> Result<bool> {
        let verdict = match reason {
            GameOver::BoardFull => "You won",
            _ => "Game over",
        };
        self.grid.menu(&format!(
            "{verdict}: {reason}. Score {}.   Enter: continue   Q: quit",
            self.session.score()
        ));
        self.grid.flush()?;
        loop {
            match self.wait_key()? {
                Key::Quit => return Ok(false),
                Key::Confirm => {
                    self.session.acknowledge();
                    return Ok(true);
                }
                // steering keys still arriving from the last game
                Key::Move(_) => {}
            }
        }
    }

    fn show_status(&mut self) {
        let body = self.session.body();
        let status = format!(
            "Score: {}   Best: {}   Length: {}/{}   Delay: {}ms",
            self.session.score(),
            self.best_score,
            body.len(),
            body.capacity(),
            self.session.timeout()
        );
        self.grid.status(&status);
    }

    fn wait_key(&mut self) -> Result<Key> {
        loop {
            if let Some(key) = self.input.next_key() {
                return Ok(key);
            }
            let byte = self.keys.recv().map_err(|_| Error::InputClosed)?;
            self.input.push(byte);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{Cell, Grid};
    use crate::motion::Reversal;
    use crate::snake::{Coordinates, Direction};
    use clap::Parser;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::io;
    use std::sync::mpsc::{self, Sender};

    fn app(args: &[&str]) -> (App<StdRng>, Sender<u8>) {
        let config = Config::try_parse_from(args).unwrap();
        let speed = config.speed_controller().unwrap();
        let (tx, rx) = mpsc::channel();
        let rng = StdRng::seed_from_u64(7);
        (App::new(&config, speed, rng, rx, Box::new(io::sink())), tx)
    }

    fn send(tx: &Sender<u8>, bytes: &[u8]) {
        for byte in bytes {
            tx.send(*byte).unwrap();
        }
    }

    #[test]
    fn quit_from_the_menu() {
        let (mut app, tx) = app(&["cursnake"]);
        send(&tx, b"xq");
        app.run().unwrap();
        assert_eq!(app.session.state(), GameState::Idle);
    }

    #[test]
    fn closed_input_is_an_error() {
        let (mut app, tx) = app(&["cursnake"]);
        send(&tx, b"\n");
        drop(tx);
        assert!(matches!(app.run(), Err(Error::InputClosed)));
    }

    fn tiny_fast_app() -> (App<StdRng>, Sender<u8>) {
        // a 3x3 grid always starts in the middle heading left
        app(&[
            "cursnake",
            "--rows",
            "3",
            "--cols",
            "3",
            "--min-delay-ms",
            "1",
            "--max-delay-ms",
            "2",
        ])
    }

    fn push(app: &mut App<StdRng>, bytes: &[u8]) {
        for byte in bytes {
            app.input.push(*byte);
        }
    }

    fn started(app: &mut App<StdRng>) {
        push(app, b"\n");
        assert!(app.idle().unwrap());
        assert_eq!(app.session.state(), GameState::Playing);
        assert_eq!(app.session.body().head(), Coordinates::new(1, 1));
        assert_eq!(app.session.body().direction(), Direction::Left);
    }

    #[test]
    fn reversal_ends_the_game() {
        let (mut app, _tx) = tiny_fast_app();
        started(&mut app);
        push(&mut app, b"d");
        assert!(app.play_frame().unwrap());
        let reversal = Reversal {
            current: Direction::Left,
            requested: Direction::Right,
        };
        assert_eq!(
            app.session.state(),
            GameState::Over(GameOver::Reversal(reversal))
        );
        assert_eq!(app.best_score(), 0);
    }

    #[test]
    fn quick_double_turn_spreads_over_two_ticks() {
        let (mut app, _tx) = tiny_fast_app();
        started(&mut app);
        push(&mut app, b"wd");

        assert!(app.play_frame().unwrap());
        assert_eq!(app.session.state(), GameState::Playing);
        assert_eq!(app.session.body().direction(), Direction::Up);
        assert_eq!(app.session.body().head(), Coordinates::new(0, 1));

        assert!(app.play_frame().unwrap());
        assert_eq!(app.session.state(), GameState::Playing);
        assert_eq!(app.session.body().direction(), Direction::Right);
        assert_eq!(app.session.body().head(), Coordinates::new(0, 2));
    }

    #[test]
    fn quit_before_a_turn_stops_at_once() {
        let (mut app, _tx) = tiny_fast_app();
        started(&mut app);
        push(&mut app, b"qw");
        assert!(!app.play_frame().unwrap());
        assert_eq!(app.session.body().head(), Coordinates::new(1, 1));
    }

    #[test]
    fn game_over_is_acknowledged_with_enter() {
        let (mut app, _tx) = tiny_fast_app();
        started(&mut app);
        push(&mut app, b"d");
        app.play_frame().unwrap();
        let GameState::Over(reason) = app.session.state() else {
            panic!("expected the game to be over");
        };

        // leftover steering keys are skipped
        push(&mut app, b"wa\n");
        assert!(app.game_over(reason).unwrap());
        assert_eq!(app.session.state(), GameState::Idle);
    }

    #[test]
    fn filling_the_board_counts_for_the_best_score() {
        let (mut app, _tx) = tiny_fast_app();
        app.session
            .begin(&mut app.grid, Coordinates::new(0, 0), Direction::Right);
        for row in 0..3 {
            for col in 0..3 {
                app.grid
                    .set_content(Coordinates::new(row, col), Cell::SnakePiece);
            }
        }
        app.grid.set_content(Coordinates::new(0, 1), Cell::Food);

        assert!(app.play_frame().unwrap());
        assert_eq!(app.session.state(), GameState::Over(GameOver::BoardFull));
        assert_eq!(app.session.score(), 1);
        assert_eq!(app.best_score(), 1);
        assert_eq!(app.session.body().head(), Coordinates::new(0, 1));
    }
}
