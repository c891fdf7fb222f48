// Packet types, one enum per direction.
//
// The two directions share the flag-byte idea but not its meaning:
//
// | direction        | flag 0                  | flag N > 0               |
// |------------------|-------------------------|--------------------------|
// | server → client  | Game-Control update     | Message of N text bytes  |
// | client → server  | Start signal, no body   | 1 = Guess of one letter  |
//
// `ServerPacket` and `ClientPacket` are deliberately separate types so a
// flag byte is only ever interpreted against the direction it travelled.

use crate::error::ProtocolError;
use crate::types::{
    CONTROL_FLAG, GUESS_FLAG, MAX_INCORRECT, MAX_MESSAGE_LEN, MAX_WORD_LEN, START_FLAG,
};

/// Snapshot of a game sent after Start and after each non-final guess.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameControl {
    /// Display pattern: revealed letters or the placeholder, one byte per
    /// letter of the secret word.
    pub display: Vec<u8>,
    /// Distinct wrong letters guessed so far.
    pub wrong: Vec<u8>,
}

impl GameControl {
    pub fn word_len(&self) -> usize {
        self.display.len()
    }

    pub fn wrong_count(&self) -> usize {
        self.wrong.len()
    }
}

/// Packets sent by the server.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ServerPacket {
    /// Human-readable text, 1..=99 bytes.
    Message(String),
    /// Current display pattern and wrong letters.
    Control(GameControl),
}

/// Packets sent by the client.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClientPacket {
    /// Begin the game.
    Start,
    /// Guess one letter.
    Guess(u8),
}

impl ServerPacket {
    pub fn message(text: impl Into<String>) -> Self {
        Self::Message(text.into())
    }

    /// Encode into a single frame.
    pub fn encode(&self) -> Result<Vec<u8>, ProtocolError> {
        match self {
            Self::Message(text) => {
                let bytes = text.as_bytes();
                if bytes.is_empty() {
                    return Err(ProtocolError::EmptyMessage);
                }
                check_len("message length", bytes.len(), MAX_MESSAGE_LEN)?;
                let mut frame = Vec::with_capacity(1 + bytes.len());
                frame.push(bytes.len() as u8);
                frame.extend_from_slice(bytes);
                Ok(frame)
            }
            Self::Control(control) => {
                check_len("word length", control.word_len(), MAX_WORD_LEN)?;
                check_len("wrong count", control.wrong_count(), MAX_INCORRECT)?;
                let mut frame =
                    Vec::with_capacity(3 + control.word_len() + control.wrong_count());
                frame.push(CONTROL_FLAG);
                frame.push(control.word_len() as u8);
                frame.push(control.wrong_count() as u8);
                frame.extend_from_slice(&control.display);
                frame.extend_from_slice(&control.wrong);
                Ok(frame)
            }
        }
    }
}

impl ClientPacket {
    /// Encode into a single frame. Client frames are at most two bytes.
    pub fn encode(&self) -> Vec<u8> {
        match *self {
            Self::Start => vec![START_FLAG],
            Self::Guess(letter) => vec![GUESS_FLAG, letter],
        }
    }
}

pub(crate) fn check_len(field: &'static str, len: usize, max: usize) -> Result<(), ProtocolError> {
    if len > max {
        return Err(ProtocolError::FrameTooLarge { field, len, max });
    }
    Ok(())
}
