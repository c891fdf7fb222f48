// hangman_protocol — wire protocol between the hangman server and its clients.
//
// A compact, self-delimiting binary framing: every frame starts with a single
// flag byte that decides how the rest is parsed. The crate is shared by the
// server and the client and depends on nothing but `std` and `thiserror`.
//
// Module overview:
// - `types.rs`:    Protocol limits (word length, wrong-guess cap, message
//                  length), flag-byte values, and `SlotId`.
// - `message.rs`:  `ServerPacket` and `ClientPacket`, one enum per direction,
//                  plus `GameControl` and pure `encode()` functions.
// - `framing.rs`:  Blocking read/write of whole frames over any
//                  `Read`/`Write` stream.
// - `error.rs`:    `ProtocolError`.
//
// The codec validates lengths only. Whether a guess is a letter, or whether a
// Start may arrive now, is decided by the layers above.

pub mod error;
pub mod framing;
pub mod message;
pub mod types;

pub use error::ProtocolError;
pub use framing::{read_client_packet, read_server_packet, write_client_packet, write_server_packet};
pub use message::{ClientPacket, GameControl, ServerPacket};
pub use types::SlotId;
