//! Byte-level decoding of terminal key presses.
//!
//! | bytes            | event            |
//! |------------------|------------------|
//! | `' '`            | Confirm          |
//! | `'\n'` / `'\r'`  | Skip             |
//! | `'\r' '\n'`      | Skip (once)      |
//! | `ESC [ C`        | FineIncrement    |
//! | `ESC [ D`        | FineDecrement    |
//! | `ESC [ A`        | CoarseIncrement  |
//! | `ESC [ B`        | CoarseDecrement  |
//!
//! `ESC O x` (application cursor mode) is accepted like `ESC [ x`.
//! Anything else is dropped.
use dial_traits::KeyEvent;

const ESC: u8 = 0x1b;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum DecodeState {
    #[default]
    Ground,
    /// After `\r`: one immediately following `\n` belongs to the same Enter.
    CarriageReturn,
    Escape,
    Sequence,
}

/// Incremental decoder; escape sequences may arrive split across reads.
#[derive(Debug, Default)]
pub struct KeyDecoder {
    state: DecodeState,
}

impl KeyDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn feed(&mut self, byte: u8) -> Option<KeyEvent> {
        match self.state {
            DecodeState::Ground => self.ground(byte),
            DecodeState::CarriageReturn => {
                self.state = DecodeState::Ground;
                if byte == b'\n' {
                    None
                } else {
                    self.ground(byte)
                }
            }
            DecodeState::Escape => {
                self.state = match byte {
                    b'[' | b'O' => DecodeState::Sequence,
                    ESC => DecodeState::Escape,
                    _ => DecodeState::Ground,
                };
                None
            }
            DecodeState::Sequence => {
                self.state = DecodeState::Ground;
                match byte {
                    b'A' => Some(KeyEvent::CoarseIncrement),
                    b'B' => Some(KeyEvent::CoarseDecrement),
                    b'C' => Some(KeyEvent::FineIncrement),
                    b'D' => Some(KeyEvent::FineDecrement),
                    _ => None,
                }
            }
        }
    }

    fn ground(&mut self, byte: u8) -> Option<KeyEvent> {
        match byte {
            b' ' => Some(KeyEvent::Confirm),
            b'\n' => Some(KeyEvent::Skip),
            b'\r' => {
                self.state = DecodeState::CarriageReturn;
                Some(KeyEvent::Skip)
            }
            ESC => {
                self.state = DecodeState::Escape;
                None
            }
            _ => None,
        }
    }

    /// Decode a whole buffer, keeping partial sequences for the next call.
    pub fn feed_all(&mut self, bytes: &[u8]) -> Vec<KeyEvent> {
        bytes.iter().filter_map(|&b| self.feed(b)).collect()
    }
}
