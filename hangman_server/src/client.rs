// Blocking TCP client for the hangman server.
//
// The game is strictly turn-based: the client sends Start, then alternates
// between reading server frames and sending one Guess after each Game-Control
// update. There is never anything to read while the player is typing, so
// unlike a chat-style client this one needs no reader thread; `recv` simply
// blocks on the next frame.
//
// Used by the `hangman_client` binary and by the integration tests, which
// drive the server through exactly the same code path a player does.
//
// Input validation lives here too (`parse_guess`): a malformed guess is
// rejected locally and never reaches the wire.

use std::io::{self, BufReader, BufWriter};
use std::net::{Shutdown, TcpStream, ToSocketAddrs};
use std::time::Duration;

use hangman_protocol::framing::{read_server_packet, write_client_packet};
use hangman_protocol::message::{ClientPacket, GameControl, ServerPacket};
use hangman_protocol::ProtocolError;

/// TCP client for one game.
pub struct GameClient {
    reader: BufReader<TcpStream>,
    writer: BufWriter<TcpStream>,
}

impl GameClient {
    /// Connect to a server.
    pub fn connect(addr: impl ToSocketAddrs) -> io::Result<Self> {
        let stream = TcpStream::connect(addr)?;
        let reader = BufReader::new(stream.try_clone()?);
        Ok(Self {
            reader,
            writer: BufWriter::new(stream),
        })
    }

    /// Bound how long `recv` may block. Mainly for tests.
    pub fn set_read_timeout(&self, timeout: Option<Duration>) -> io::Result<()> {
        self.reader.get_ref().set_read_timeout(timeout)
    }

    /// Ask the server to begin the game.
    pub fn send_start(&mut self) -> Result<(), ProtocolError> {
        write_client_packet(&mut self.writer, ClientPacket::Start)
    }

    /// Send one guessed letter.
    pub fn send_guess(&mut self, letter: u8) -> Result<(), ProtocolError> {
        write_client_packet(&mut self.writer, ClientPacket::Guess(letter))
    }

    /// Block until the next server frame arrives.
    pub fn recv(&mut self) -> Result<ServerPacket, ProtocolError> {
        read_server_packet(&mut self.reader)
    }

    /// Close both directions of the connection.
    pub fn disconnect(&mut self) {
        let _ = self.writer.get_ref().shutdown(Shutdown::Both);
    }
}

/// Validate one line of player input as a guess.
///
/// Accepts exactly one ASCII letter, optionally followed by a line ending,
/// and returns it lowercased. Anything else is `None` and should be
/// re-prompted.
pub fn parse_guess(line: &str) -> Option<u8> {
    match line.trim_end_matches(['\r', '\n']).as_bytes() {
        [b] if b.is_ascii_alphabetic() => Some(b.to_ascii_lowercase()),
        _ => None,
    }
}

/// Format a Game-Control update for the terminal: the pattern with spaced
/// letters, then the incorrect guesses.
pub fn render_control(control: &GameControl) -> String {
    let pattern: Vec<String> = control
        .display
        .iter()
        .map(|&b| char::from(b).to_string())
        .collect();
    let wrong: Vec<String> = control
        .wrong
        .iter()
        .map(|&b| char::from(b).to_string())
        .collect();
    format!(
        ">>>{}\n>>>Incorrect Guesses: {}\n>>>",
        pattern.join(" "),
        wrong.join(" ")
    )
}
