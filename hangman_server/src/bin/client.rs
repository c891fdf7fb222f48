// CLI entry point for a hangman player.
//
// Connects, asks whether to start, then alternates between printing what the
// server sends and prompting for a letter after each Game-Control update.
// Exits when the server closes the connection (after "Game Over!" or an
// overloaded notice).
//
// Usage:
//   hangman_client <HOST> <PORT>

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use clap::Parser;
use hangman_protocol::{ProtocolError, ServerPacket};
use hangman_server::client::{GameClient, parse_guess, render_control};

#[derive(Parser)]
#[command(name = "hangman_client", about = "Play hangman against a server", version)]
struct Args {
    /// Server address
    host: String,

    /// Server port
    port: u16,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut client = GameClient::connect((args.host.as_str(), args.port))
        .with_context(|| format!("connection to {}:{} failed", args.host, args.port))?;

    let stdin = io::stdin();
    let mut input = stdin.lock();

    let Some(answer) = prompt(&mut input, ">>> Ready to start game? (y/n): ")? else {
        return Ok(());
    };
    if !answer.trim_start().to_ascii_lowercase().starts_with('y') {
        client.disconnect();
        return Ok(());
    }
    client.send_start().context("send start failed")?;

    loop {
        match client.recv() {
            Ok(ServerPacket::Message(text)) => println!(">>> {text}"),
            Ok(ServerPacket::Control(control)) => {
                println!("{}", render_control(&control));
                let Some(letter) = read_guess(&mut input)? else {
                    break;
                };
                client.send_guess(letter).context("send guess failed")?;
            }
            Err(ProtocolError::ConnectionClosed) => {
                println!("Server connection closed.");
                break;
            }
            Err(e) => return Err(e).context("bad frame from server"),
        }
    }

    client.disconnect();
    Ok(())
}

/// Print a prompt and read one line. `None` on end of input.
fn prompt(input: &mut impl BufRead, text: &str) -> Result<Option<String>> {
    print!("{text}");
    io::stdout().flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}

/// Prompt until the player enters a single letter. `None` on end of input.
fn read_guess(input: &mut impl BufRead) -> Result<Option<u8>> {
    loop {
        let Some(line) = prompt(input, ">>>Letter to guess: ")? else {
            return Ok(None);
        };
        match parse_guess(&line) {
            Some(letter) => return Ok(Some(letter)),
            None => println!(">>>Error! Please guess one letter."),
        }
    }
}
