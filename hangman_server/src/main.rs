// CLI entry point for the hangman server.
//
// Loads the word list, binds the listen port, and serves until killed.
// See `server.rs` for the threading model and `session.rs` for the rules.
//
// Usage:
//   hangman_server <PORT> [--words <PATH>] [--max-clients <N>] [--idle-timeout <SECS>]
//
// Log verbosity follows `RUST_LOG` (default `info`).

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use hangman_protocol::types::MAX_CLIENTS;
use hangman_server::{ServerConfig, WordPool, start_server};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "hangman_server", about = "Serve hangman games over TCP", version)]
struct Args {
    /// Port to listen on
    port: u16,

    /// Word list, one word per line
    #[arg(short, long, default_value = "hangman_words.txt")]
    words: PathBuf,

    /// Concurrent games before new connections are turned away
    #[arg(long, default_value_t = MAX_CLIENTS)]
    max_clients: usize,

    /// Drop a client after this many seconds without input (default: never)
    #[arg(long)]
    idle_timeout: Option<u64>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let args = Args::parse();
    let config = ServerConfig {
        port: args.port,
        word_list: args.words,
        max_clients: args.max_clients,
        idle_timeout: args.idle_timeout.map(Duration::from_secs),
        ..ServerConfig::default()
    };

    let words = WordPool::load(&config.word_list);
    let (handle, _addr) = start_server(&config, words).with_context(|| {
        format!(
            "failed to start hangman server with word list {}",
            config.word_list.display()
        )
    })?;

    handle.join();
    Ok(())
}
