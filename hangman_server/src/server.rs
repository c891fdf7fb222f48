// TCP listener and per-connection session handlers.
//
// Architecture: one accept thread plus one handler thread per admitted
// connection.
//
// - **Accept thread** (`accept_loop`): accepts connections one at a time and
//   asks the `SlotPool` for a slot. With none free it sends the overloaded
//   Message and closes the socket; no `GameSession` is created. Otherwise it
//   forks a `GameRng` for the session and spawns a handler thread, never
//   waiting on it.
// - **Handler threads** (`SessionHandler::run`): each owns its socket, its
//   `GameSession`, and its `SlotLease`. Reads are blocking and exact-length;
//   any failure ends that session only. The slot is freed when the lease
//   drops, after the socket is shut down.
//
// Shared state is limited to the `SlotPool` and the `WordPool`, each behind
// its own lock and each held only for an in-memory scan, never across I/O.
//
// The listener is non-blocking so the accept thread can notice `stop()`
// between polls. Accepted sockets are switched back to blocking.

use std::io::{BufReader, BufWriter};
use std::net::{Shutdown, SocketAddr, TcpListener, TcpStream};
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use hangman_prng::GameRng;
use hangman_protocol::framing::{read_client_packet, write_server_packet};
use hangman_protocol::message::{ClientPacket, ServerPacket};
use hangman_protocol::types::MAX_CLIENTS;
use tracing::{debug, error, info, warn};

use crate::error::{ServerError, SessionError};
use crate::session::{GameSession, Outcome};
use crate::slots::{SlotLease, SlotPool};
use crate::words::WordPool;

/// Sent to a connection turned away because every slot is held.
pub const OVERLOADED_MESSAGE: &str = "server-overloaded";

/// Sent when a session starts but the word pool has been emptied.
pub const NO_WORDS_MESSAGE: &str = "Server error: No words loaded. Closing connection.";

/// How long the accept thread sleeps when no connection is pending.
const ACCEPT_POLL: Duration = Duration::from_millis(20);

/// Configuration for starting a server.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub word_list: PathBuf,
    pub max_clients: usize,
    /// Read timeout for client sockets. `None` lets an idle client hold its
    /// slot indefinitely.
    pub idle_timeout: Option<Duration>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 0,
            word_list: PathBuf::from("hangman_words.txt"),
            max_clients: MAX_CLIENTS,
            idle_timeout: None,
        }
    }
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Handle returned by `start_server` to control the running server.
pub struct ServerHandle {
    keep_running: Arc<AtomicBool>,
    thread: Option<thread::JoinHandle<()>>,
    slots: SlotPool,
    words: WordPool,
}

impl ServerHandle {
    /// Stop accepting and wait for the accept thread to exit. Sessions
    /// already running are left to finish on their own.
    pub fn stop(mut self) {
        self.keep_running.store(false, Ordering::SeqCst);
        self.join_listener();
    }

    /// Block until the accept thread exits.
    pub fn join(mut self) {
        self.join_listener();
    }

    fn join_listener(&mut self) {
        if self.thread.take().is_some_and(|h| h.join().is_err()) {
            error!("accept thread panicked");
        }
    }

    /// Number of slots currently held by sessions.
    pub fn active_sessions(&self) -> usize {
        self.slots.occupied()
    }

    /// Re-read the word list. Sessions already running keep their secret.
    pub fn reload_words(&self) -> std::io::Result<usize> {
        self.words.reload()
    }
}

/// Bind the listener and start accepting on a background thread. Returns a
/// handle and the bound address (useful when port 0 lets the OS choose).
///
/// Refuses to start with an empty word pool.
pub fn start_server(
    config: &ServerConfig,
    words: WordPool,
) -> Result<(ServerHandle, SocketAddr), ServerError> {
    if words.is_empty() {
        return Err(ServerError::EmptyWordPool);
    }

    let bind_addr = config.bind_addr();
    let listener = TcpListener::bind(&bind_addr).map_err(|source| ServerError::Bind {
        addr: bind_addr.clone(),
        source,
    })?;
    let addr = listener.local_addr()?;
    listener.set_nonblocking(true)?;

    let slots = SlotPool::new(config.max_clients);
    let keep_running = Arc::new(AtomicBool::new(true));
    let acceptor = Acceptor {
        listener,
        slots: slots.clone(),
        words: words.clone(),
        idle_timeout: config.idle_timeout.filter(|d| !d.is_zero()),
        rng: GameRng::from_clock(),
        keep_running: keep_running.clone(),
    };

    let thread = thread::Builder::new()
        .name("hangman-accept".into())
        .spawn(move || acceptor.accept_loop())?;

    info!(%addr, capacity = slots.capacity(), "hangman server listening");
    Ok((
        ServerHandle {
            keep_running,
            thread: Some(thread),
            slots,
            words,
        },
        addr,
    ))
}

/// State owned by the accept thread.
struct Acceptor {
    listener: TcpListener,
    slots: SlotPool,
    words: WordPool,
    idle_timeout: Option<Duration>,
    rng: GameRng,
    keep_running: Arc<AtomicBool>,
}

impl Acceptor {
    fn accept_loop(mut self) {
        while self.keep_running.load(Ordering::SeqCst) {
            match self.listener.accept() {
                Ok((stream, peer)) => {
                    if let Err(e) = stream.set_nonblocking(false) {
                        warn!(%peer, "dropping connection: {e}");
                        continue;
                    }
                    self.admit(stream, peer);
                }
                Err(ref e) if e.kind() == std::io::ErrorKind::WouldBlock => {
                    thread::sleep(ACCEPT_POLL);
                }
                Err(e) => {
                    warn!("accept failed: {e}");
                    thread::sleep(ACCEPT_POLL);
                }
            }
        }
        info!("accept loop stopped");
    }

    /// Give the connection a slot and a handler thread, or turn it away.
    fn admit(&mut self, stream: TcpStream, peer: SocketAddr) {
        info!(%peer, "connection received");
        let Some(lease) = self.slots.acquire() else {
            warn!(%peer, "connection rejected: server overloaded");
            reject(stream);
            return;
        };

        let slot = lease.id();
        let handler = SessionHandler {
            stream,
            peer,
            lease,
            words: self.words.clone(),
            rng: self.rng.fork(),
            idle_timeout: self.idle_timeout,
        };
        // On spawn failure the closure is dropped, which closes the socket
        // and frees the slot.
        if let Err(e) = thread::Builder::new()
            .name(format!("hangman-slot-{slot}"))
            .spawn(move || handler.run())
        {
            error!(%peer, %slot, "failed to spawn session handler: {e}");
        }
    }
}

fn reject(mut stream: TcpStream) {
    if let Err(e) = write_server_packet(&mut stream, &ServerPacket::message(OVERLOADED_MESSAGE)) {
        debug!("could not deliver overloaded notice: {e}");
    }
    let _ = stream.shutdown(Shutdown::Both);
}

/// Everything one handler thread owns.
struct SessionHandler {
    stream: TcpStream,
    peer: SocketAddr,
    lease: SlotLease,
    words: WordPool,
    rng: GameRng,
    idle_timeout: Option<Duration>,
}

impl SessionHandler {
    fn run(mut self) {
        let slot = self.lease.id();
        info!(%slot, peer = %self.peer, "game handler started");

        match self.play() {
            Ok(outcome) => info!(%slot, ?outcome, "game finished"),
            Err(e) if e.is_disconnect() => info!(%slot, "client disconnected"),
            Err(e) => warn!(%slot, "session aborted: {e}"),
        }

        let _ = self.stream.shutdown(Shutdown::Both);
        drop(self.lease);
        info!(%slot, "connection closed, slot freed");
    }

    /// Drive one game from Start to the closing messages.
    fn play(&mut self) -> Result<Outcome, SessionError> {
        let slot = self.lease.id();
        self.stream.set_read_timeout(self.idle_timeout)?;
        let mut reader = BufReader::new(&self.stream);
        let mut writer = BufWriter::new(&self.stream);

        let Some(secret) = self.words.pick(&mut self.rng) else {
            write_server_packet(&mut writer, &ServerPacket::message(NO_WORDS_MESSAGE))?;
            return Err(SessionError::NoWords);
        };
        let mut game = GameSession::new(&secret, slot);
        debug!(slot = %game.slot(), secret = %secret, "secret chosen");
        game.await_start();

        match read_client_packet(&mut reader)? {
            ClientPacket::Start => {
                game.begin();
            }
            packet => {
                return Err(SessionError::UnexpectedPacket {
                    packet,
                    phase: "awaiting start",
                });
            }
        }
        write_server_packet(&mut writer, &ServerPacket::Control(game.control()))?;

        loop {
            let letter = match read_client_packet(&mut reader)? {
                ClientPacket::Guess(letter) => letter,
                packet => {
                    return Err(SessionError::UnexpectedPacket {
                        packet,
                        phase: "in progress",
                    });
                }
            };

            let outcome = game.guess(letter);
            debug!(
                %slot,
                guess = %char::from(letter),
                display = %String::from_utf8_lossy(game.display()),
                wrong = game.wrong_count(),
                "guess processed"
            );

            match outcome {
                Some(outcome) => {
                    for text in game.final_messages(outcome) {
                        write_server_packet(&mut writer, &ServerPacket::Message(text))?;
                    }
                    return Ok(outcome);
                }
                None => {
                    write_server_packet(&mut writer, &ServerPacket::Control(game.control()))?;
                }
            }
        }
    }
}
