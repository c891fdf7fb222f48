// Per-connection game state and the guess rule.
//
// `GameSession` is owned by exactly one handler thread for its whole life, so
// it carries no locking. It holds the secret word, the display pattern, and
// the set of wrong letters, and walks through
// `New → AwaitingStart → InProgress → Over`. The handler in `server.rs`
// drives the transitions from the packets it reads; this module never
// touches the network.
//
// Whether a session is live is not stored here. A slot is occupied in the
// `SlotPool` table exactly while its handler holds the `SlotLease`, and that
// flag is what admission reads.
//
// Invariants kept by construction:
// - `display.len() == secret.len()` at all times.
// - The wrong-guess count is `wrong.len()`, so it cannot drift from the set.
// - A letter appears in `wrong` at most once, and `wrong` never grows past
//   `MAX_INCORRECT`: the session is `Over` the moment it reaches the cap.

use hangman_protocol::types::{MAX_INCORRECT, PLACEHOLDER};
use hangman_protocol::{GameControl, SlotId};

/// How a finished game ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Win,
    Loss,
}

/// Lifecycle of a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Admitted; secret chosen, nothing sent yet.
    New,
    /// Waiting for the client's Start signal.
    AwaitingStart,
    /// Accepting guesses.
    InProgress,
    /// Terminal.
    Over(Outcome),
}

/// One game of hangman bound to an admission slot.
#[derive(Clone, Debug)]
pub struct GameSession {
    slot: SlotId,
    secret: String,
    display: Vec<u8>,
    wrong: Vec<u8>,
    phase: Phase,
}

impl GameSession {
    /// Start a session for `secret`, with every letter hidden.
    pub fn new(secret: &str, slot: SlotId) -> Self {
        Self {
            slot,
            secret: secret.to_string(),
            display: vec![PLACEHOLDER; secret.len()],
            wrong: Vec::with_capacity(MAX_INCORRECT),
            phase: Phase::New,
        }
    }

    pub fn slot(&self) -> SlotId {
        self.slot
    }

    pub fn secret(&self) -> &str {
        &self.secret
    }

    pub fn display(&self) -> &[u8] {
        &self.display
    }

    pub fn wrong_letters(&self) -> &[u8] {
        &self.wrong
    }

    pub fn wrong_count(&self) -> usize {
        self.wrong.len()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The session has been handed to its handler and is waiting for Start.
    pub fn await_start(&mut self) {
        if self.phase == Phase::New {
            self.phase = Phase::AwaitingStart;
        }
    }

    /// Accept the Start signal. Returns `false` if the session was not
    /// waiting for one.
    pub fn begin(&mut self) -> bool {
        match self.phase {
            Phase::New | Phase::AwaitingStart => {
                self.phase = Phase::InProgress;
                true
            }
            Phase::InProgress | Phase::Over(_) => false,
        }
    }

    /// Apply one guessed letter.
    ///
    /// Reveals every still-hidden position holding the letter. If none was
    /// revealed and the letter is not already a known miss, it is recorded as
    /// wrong; repeating a miss costs nothing. Returns the outcome once the
    /// game has ended. Outside `InProgress` the session is left untouched and
    /// the existing outcome, if any, is returned.
    pub fn guess(&mut self, letter: u8) -> Option<Outcome> {
        match self.phase {
            Phase::InProgress => {}
            Phase::Over(outcome) => return Some(outcome),
            Phase::New | Phase::AwaitingStart => return None,
        }

        let letter = letter.to_ascii_lowercase();
        let mut revealed = false;
        for (secret, shown) in self.secret.bytes().zip(self.display.iter_mut()) {
            if secret == letter && *shown == PLACEHOLDER {
                *shown = letter;
                revealed = true;
            }
        }

        if !revealed && !self.wrong.contains(&letter) {
            self.wrong.push(letter);
        }

        let outcome = if !self.display.contains(&PLACEHOLDER) {
            Some(Outcome::Win)
        } else if self.wrong.len() >= MAX_INCORRECT {
            Some(Outcome::Loss)
        } else {
            None
        };
        if let Some(outcome) = outcome {
            self.phase = Phase::Over(outcome);
        }
        outcome
    }

    /// Current state as a Game-Control payload.
    pub fn control(&self) -> GameControl {
        GameControl {
            display: self.display.clone(),
            wrong: self.wrong.clone(),
        }
    }

    /// The three closing messages, in the order they are sent.
    pub fn final_messages(&self, outcome: Outcome) -> [String; 3] {
        let verdict = match outcome {
            Outcome::Win => "You Win!",
            Outcome::Loss => "You Lose!",
        };
        [
            format!("The word was {}", self.secret()),
            verdict.to_string(),
            "Game Over!".to_string(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn started(secret: &str) -> GameSession {
        let mut game = GameSession::new(secret, SlotId(0));
        game.await_start();
        assert!(game.begin());
        game
    }

    #[test]
    fn fresh_session_is_all_placeholders() {
        for word in ["cat", "apple", "absolute"] {
            let game = GameSession::new(word, SlotId(1));
            assert_eq!(game.display(), vec![b'_'; word.len()].as_slice());
            assert_eq!(game.wrong_count(), 0);
            assert_eq!(game.phase(), Phase::New);
            assert_eq!(game.slot(), SlotId(1));
        }
    }

    #[test]
    fn phase_transitions() {
        let mut game = GameSession::new("cat", SlotId(0));
        game.await_start();
        assert_eq!(game.phase(), Phase::AwaitingStart);
        assert!(game.begin());
        assert_eq!(game.phase(), Phase::InProgress);
        assert!(!game.begin(), "second Start must be refused");
    }

    #[test]
    fn guess_before_start_is_ignored() {
        let mut game = GameSession::new("cat", SlotId(0));
        assert_eq!(game.guess(b'c'), None);
        assert_eq!(game.display(), b"___");
    }

    #[test]
    fn reveals_every_occurrence_at_once() {
        let mut game = started("banana");
        assert_eq!(game.guess(b'a'), None);
        assert_eq!(game.display(), b"_a_a_a");
        assert_eq!(game.guess(b'n'), None);
        assert_eq!(game.display(), b"_anana");
        assert_eq!(game.wrong_count(), 0);
    }

    #[test]
    fn guess_is_case_folded() {
        let mut game = started("dog");
        game.guess(b'D');
        assert_eq!(game.display(), b"d__");
        game.guess(b'Q');
        assert_eq!(game.wrong_letters(), b"q");
    }

    #[test]
    fn repeating_a_revealed_letter_counts_as_a_miss() {
        // Nothing new is revealed, so the letter lands in the wrong set once.
        let mut game = started("cat");
        game.guess(b'c');
        game.guess(b'c');
        game.guess(b'c');
        assert_eq!(game.display(), b"c__");
        assert_eq!(game.wrong_letters(), b"c");
    }

    #[test]
    fn repeated_wrong_guess_costs_nothing() {
        let mut game = started("cat");
        game.guess(b'z');
        game.guess(b'z');
        game.guess(b'z');
        assert_eq!(game.wrong_count(), 1);
        assert_eq!(game.wrong_letters(), b"z");
    }

    #[test]
    fn cat_scenario_wins() {
        let mut game = started("cat");
        assert_eq!(game.display(), b"___");

        assert_eq!(game.guess(b'a'), None);
        assert_eq!((game.display(), game.wrong_count()), (&b"_a_"[..], 0));

        assert_eq!(game.guess(b'z'), None);
        assert_eq!((game.display(), game.wrong_count()), (&b"_a_"[..], 1));
        assert_eq!(game.wrong_letters(), b"z");

        assert_eq!(game.guess(b'c'), None);
        assert_eq!((game.display(), game.wrong_count()), (&b"ca_"[..], 1));

        assert_eq!(game.guess(b't'), Some(Outcome::Win));
        assert_eq!((game.display(), game.wrong_count()), (&b"cat"[..], 1));
        assert_eq!(game.phase(), Phase::Over(Outcome::Win));

        assert_eq!(
            game.final_messages(Outcome::Win),
            ["The word was cat", "You Win!", "Game Over!"]
        );
    }

    #[test]
    fn dog_scenario_loses_on_sixth_miss() {
        let mut game = started("dog");
        for (i, letter) in b"abcef".iter().enumerate() {
            assert_eq!(game.guess(*letter), None);
            assert_eq!(game.wrong_count(), i + 1);
        }
        assert_eq!(game.guess(b'h'), Some(Outcome::Loss));
        assert_eq!(game.wrong_count(), MAX_INCORRECT);

        // Once over, nothing moves, not even a correct letter.
        assert_eq!(game.guess(b'd'), Some(Outcome::Loss));
        assert_eq!(game.display(), b"___");
        assert_eq!(game.wrong_count(), MAX_INCORRECT);

        assert_eq!(
            game.final_messages(Outcome::Loss),
            ["The word was dog", "You Lose!", "Game Over!"]
        );
    }

    #[test]
    fn win_only_when_no_placeholder_remains() {
        let mut game = started("eel");
        assert_eq!(game.guess(b'e'), None);
        assert!(game.display().contains(&b'_'));
        assert_eq!(game.guess(b'l'), Some(Outcome::Win));
        assert!(!game.display().contains(&b'_'));
    }

    #[test]
    fn control_mirrors_state() {
        let mut game = started("cat");
        game.guess(b'a');
        game.guess(b'x');
        let control = game.control();
        assert_eq!(control.display, b"_a_");
        assert_eq!(control.wrong, b"x");
        assert_eq!(control.word_len(), 3);
        assert_eq!(control.wrong_count(), 1);
    }
}
