// Error types for the server and its session handlers.
//
// `ServerError` covers startup only; once the listener is running, nothing
// it does is fatal. `SessionError` is contained to one connection: the
// handler logs it, frees the slot, and exits.

use hangman_protocol::{ClientPacket, ProtocolError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("no valid words loaded; refusing to start")]
    EmptyWordPool,

    #[error("listener setup failed: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    #[error("word pool is empty")]
    NoWords,

    #[error("unexpected {packet:?} while {phase}")]
    UnexpectedPacket {
        packet: ClientPacket,
        phase: &'static str,
    },

    #[error("socket setup failed: {0}")]
    Io(#[from] std::io::Error),
}

impl SessionError {
    /// The peer went away; not worth more than an info line.
    pub fn is_disconnect(&self) -> bool {
        matches!(self, Self::Protocol(ProtocolError::ConnectionClosed))
    }
}
