// raw bytes from stdin are turned into keys here, nothing else reaches the game
// arrow keys are 3 bytes long: 27 ('ESC'), 91 ('[') and one of A B C D
use crate::snake::Direction;
use circular_buffer::CircularBuffer;

const ESC: u8 = 27;
const BRACKET: u8 = 91;

type ByteBuffer = CircularBuffer<64, u8>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Move(Direction),
    Confirm,
    Quit,
}

#[derive(Debug)]
pub struct InputBuffer {
    bytes: ByteBuffer,
}

impl Default for InputBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl InputBuffer {
    pub fn new() -> Self {
        InputBuffer {
            bytes: ByteBuffer::new(),
        }
    }

    pub fn push(&mut self, byte: u8) {
        // if the buffer is full, ignore the input
        if self.bytes.is_full() {
            return;
        }
        self.bytes.push_back(byte);
    }

    /// Pops the next recognised key, leaving a half-read escape sequence in place.
    pub fn next_key(&mut self) -> Option<Key> {
        while let Some(&first) = self.bytes.front() {
            if first == ESC {
                match (self.bytes.get(1).copied(), self.bytes.get(2).copied()) {
                    (None, _) | (Some(BRACKET), None) => return None,
                    (Some(BRACKET), Some(code)) => {
                        for _ in 0..3 {
                            self.bytes.pop_front();
                        }
                        if let Some(direction) = arrow(code) {
                            return Some(Key::Move(direction));
                        }
                    }
                    // a lone escape press, drop it
                    _ => {
                        self.bytes.pop_front();
                    }
                }
                continue;
            }
            self.bytes.pop_front();
            if let Some(key) = plain(first) {
                return Some(key);
            }
        }
        None
    }
}

fn arrow(code: u8) -> Option<Direction> {
    match code {
        b'A' => Some(Direction::Up),
        b'B' => Some(Direction::Down),
        b'C' => Some(Direction::Right),
        b'D' => Some(Direction::Left),
        _ => None,
    }
}

fn plain(byte: u8) -> Option<Key> {
    match byte {
        b'w' | b'W' => Some(Key::Move(Direction::Up)),
        b's' | b'S' => Some(Key::Move(Direction::Down)),
        b'a' | b'A' => Some(Key::Move(Direction::Left)),
        b'd' | b'D' => Some(Key::Move(Direction::Right)),
        b'\n' | b'\r' | b' ' => Some(Key::Confirm),
        b'q' | b'Q' => Some(Key::Quit),
        _ => None,
    }
}
