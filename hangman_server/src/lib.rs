// hangman_server — turn-based hangman over a flag-byte TCP protocol.
//
// The server admits up to a fixed number of concurrent players. Each admitted
// connection gets its own thread, a secret word drawn from a shared pool, and
// plays one game: Start, then guesses until the word is revealed or six
// distinct wrong letters are reached, then three closing Messages and close.
//
// Module overview:
// - `words.rs`:    `WordPool`, the shared, read-mostly list of candidate
//                  words loaded from a plain-text file.
// - `session.rs`:  `GameSession`, per-connection game state and the guess
//                  rule. Pure; no I/O.
// - `slots.rs`:    `SlotPool`, the fixed-capacity admission table, and the
//                  RAII `SlotLease`.
// - `server.rs`:   TCP accept loop and session handler threads, plus
//                  `ServerConfig` and the `ServerHandle` returned by
//                  `start_server`.
// - `client.rs`:   Blocking `GameClient` and player-input helpers, used by
//                  the `hangman_client` binary and the integration tests.
// - `error.rs`:    `ServerError` (startup) and `SessionError` (per
//                  connection).
//
// Dependencies: `hangman_protocol` for framing, `hangman_prng` for word
// selection, `tracing` for logs. The binaries install the subscriber; the
// library only emits events.

pub mod client;
pub mod error;
pub mod server;
pub mod session;
pub mod slots;
pub mod words;

pub use error::{ServerError, SessionError};
pub use server::{ServerConfig, ServerHandle, start_server};
pub use session::{GameSession, Outcome, Phase};
pub use slots::{SlotLease, SlotPool};
pub use words::WordPool;
