// Codec errors.
//
// Every failure while reading a frame collapses into `ConnectionClosed`: the
// protocol has no partial-frame recovery, so a short read, EOF, or socket
// error mid-frame all mean the peer is gone. Length violations are reported
// separately so the caller can log what the peer tried to send.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProtocolError {
    /// The stream ended or failed before a full frame was read.
    #[error("connection closed")]
    ConnectionClosed,

    /// A declared length exceeds the protocol maximum for that field.
    #[error("{field} of {len} exceeds protocol maximum {max}")]
    FrameTooLarge {
        field: &'static str,
        len: usize,
        max: usize,
    },

    /// Message text must be at least one byte; flag 0 belongs to Game-Control.
    #[error("message text is empty")]
    EmptyMessage,

    /// A client frame started with a flag byte that has no meaning.
    #[error("unknown client flag byte {0}")]
    UnknownFlag(u8),

    /// Writing a frame failed.
    #[error("write failed: {0}")]
    Io(#[from] std::io::Error),
}
