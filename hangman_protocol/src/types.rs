// Protocol constants and the slot identifier newtype.
//
// The limits here bound both the game rules (word length, wrong-guess cap)
// and the frame sizes the codec will accept: a Game-Control frame can never
// declare more than `MAX_WORD_LEN` pattern bytes or `MAX_INCORRECT` wrong
// letters, and a Message frame never more than `MAX_MESSAGE_LEN` bytes.

/// Shortest word the pool will accept.
pub const MIN_WORD_LEN: usize = 3;

/// Longest word the pool will accept.
pub const MAX_WORD_LEN: usize = 8;

/// Maximum number of words kept from the word list.
pub const MAX_WORDS: usize = 15;

/// Wrong guesses that end the game in a loss.
pub const MAX_INCORRECT: usize = 6;

/// Longest text a Message frame can carry. The flag byte doubles as the
/// length, and 0 is reserved for Game-Control frames.
pub const MAX_MESSAGE_LEN: usize = 99;

/// Default number of concurrent game sessions.
pub const MAX_CLIENTS: usize = 3;

/// Character shown for an unrevealed letter.
pub const PLACEHOLDER: u8 = b'_';

/// Server → client flag byte for a Game-Control frame.
pub const CONTROL_FLAG: u8 = 0;

/// Client → server flag byte for the Start signal.
pub const START_FLAG: u8 = 0;

/// Client → server flag byte for a Guess; also its payload length.
pub const GUESS_FLAG: u8 = 1;

/// Index of an admission slot in the server's fixed-size slot table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotId(pub usize);

impl std::fmt::Display for SlotId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
