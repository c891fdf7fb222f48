// Shared pool of candidate secret words.
//
// Loaded once at startup from a plain-text list, one word per line. Lines
// outside `MIN_WORD_LEN..=MAX_WORD_LEN`, or containing anything but ASCII
// letters, are dropped with a warning; blank lines are skipped quietly.
// Loading stops after `MAX_WORDS` accepted entries.
//
// `WordPool` is a cheap `Clone` handle around an `RwLock`. Sessions take the
// read lock only long enough to draw an index and clone the word. `reload`
// reads the source without holding the lock and swaps the new list in under
// the write lock, so no file I/O ever happens while the lock is held.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

use hangman_prng::GameRng;
use hangman_protocol::types::{MAX_WORD_LEN, MAX_WORDS, MIN_WORD_LEN};
use tracing::{error, info, warn};

#[derive(Clone, Debug, Default)]
pub struct WordPool {
    source: Option<PathBuf>,
    words: Arc<RwLock<Vec<String>>>,
}

impl WordPool {
    /// Build a pool directly from a list, applying the same filtering as a
    /// file load.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let lines = words.into_iter().map(|w| Ok::<_, io::Error>(w.as_ref().to_string()));
        Self {
            source: None,
            words: Arc::new(RwLock::new(filter_lines(lines))),
        }
    }

    /// Load from a word-list file. An unreadable file yields an empty pool
    /// rather than an error; the caller decides whether that is fatal.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let words = read_list(path).unwrap_or_else(|e| {
            error!(path = %path.display(), "failed to open word list: {e}");
            Vec::new()
        });
        info!(path = %path.display(), count = words.len(), "loaded word list");
        Self {
            source: Some(path.to_path_buf()),
            words: Arc::new(RwLock::new(words)),
        }
    }

    /// Re-read the file this pool was loaded from. Returns the new word
    /// count. If the file cannot be read the current list is kept. A file
    /// with no valid words does empty the pool, and new sessions are then
    /// turned away with the no-words message until a later reload.
    pub fn reload(&self) -> io::Result<usize> {
        let Some(path) = &self.source else {
            return Err(io::Error::new(
                io::ErrorKind::Unsupported,
                "word pool was not loaded from a file",
            ));
        };
        let words = read_list(path)?;
        let count = words.len();
        *self.words.write().unwrap_or_else(PoisonError::into_inner) = words;
        info!(path = %path.display(), count, "reloaded word list");
        Ok(count)
    }

    pub fn len(&self) -> usize {
        self.words.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copy of the current word list.
    pub fn words(&self) -> Vec<String> {
        self.words
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Pick a word uniformly at random, or `None` if the pool is empty.
    pub fn pick(&self, rng: &mut GameRng) -> Option<String> {
        let words = self.words.read().unwrap_or_else(PoisonError::into_inner);
        if words.is_empty() {
            return None;
        }
        Some(words[rng.range_usize(0, words.len())].clone())
    }
}

fn read_list(path: &Path) -> io::Result<Vec<String>> {
    let file = File::open(path)?;
    Ok(filter_lines(BufReader::new(file).lines()))
}

/// Keep valid words from a line source, up to `MAX_WORDS`. A read error ends
/// the list early.
pub fn load_from_reader<R: BufRead>(reader: R) -> Vec<String> {
    filter_lines(reader.lines())
}

fn filter_lines<I>(lines: I) -> Vec<String>
where
    I: IntoIterator<Item = io::Result<String>>,
{
    let mut words = Vec::with_capacity(MAX_WORDS);
    for line in lines {
        if words.len() >= MAX_WORDS {
            break;
        }
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                warn!("stopped reading word list: {e}");
                break;
            }
        };
        let word = line.trim_end_matches(['\r', '\n']);
        if word.is_empty() {
            continue;
        }
        if !(MIN_WORD_LEN..=MAX_WORD_LEN).contains(&word.len()) {
            warn!(word, len = word.len(), "word ignored: length out of range");
            continue;
        }
        if !word.bytes().all(|b| b.is_ascii_alphabetic()) {
            warn!(word, "word ignored: not all ASCII letters");
            continue;
        }
        words.push(word.to_ascii_lowercase());
    }
    words
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn keeps_words_within_length_bounds() {
        let list = "at\ncat\nabsolute\nabsolutes\nhorse\n";
        let words = load_from_reader(Cursor::new(list));
        assert_eq!(words, vec!["cat", "absolute", "horse"]);
    }

    #[test]
    fn strips_crlf_and_skips_blank_lines() {
        let words = load_from_reader(Cursor::new("dog\r\n\r\n\nfish\r\n"));
        assert_eq!(words, vec!["dog", "fish"]);
    }

    #[test]
    fn lowercases_and_drops_non_letters() {
        let words = load_from_reader(Cursor::new("Apple\nab1c\nca t\nPEAR\n"));
        assert_eq!(words, vec!["apple", "pear"]);
    }

    #[test]
    fn caps_at_max_words() {
        let list: String = (0..40).map(|_| "word\n").collect();
        let words = load_from_reader(Cursor::new(list));
        assert_eq!(words.len(), MAX_WORDS);
    }

    #[test]
    fn every_stored_word_respects_bounds() {
        let pool = WordPool::from_words(["no", "yes", "maybe", "definitely", "perhaps"]);
        for word in pool.words() {
            assert!((MIN_WORD_LEN..=MAX_WORD_LEN).contains(&word.len()));
        }
        assert_eq!(pool.len(), 3);
    }

    #[test]
    fn missing_file_yields_empty_pool() {
        let pool = WordPool::load("/nonexistent/hangman_words.txt");
        assert!(pool.is_empty());
        let mut rng = GameRng::new(1);
        assert_eq!(pool.pick(&mut rng), None);
    }

    #[test]
    fn pick_draws_from_pool() {
        let pool = WordPool::from_words(["cat", "dog", "owl"]);
        let mut rng = GameRng::new(42);
        let mut seen = std::collections::BTreeSet::new();
        for _ in 0..200 {
            let word = pool.pick(&mut rng).unwrap();
            assert!(["cat", "dog", "owl"].contains(&word.as_str()));
            seen.insert(word);
        }
        assert_eq!(seen.len(), 3);
    }

    #[test]
    fn reload_without_file_is_unsupported() {
        let pool = WordPool::from_words(["cat"]);
        let err = pool.reload().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::Unsupported);
        assert_eq!(pool.len(), 1);
    }

    #[test]
    fn reload_swaps_list_for_all_handles() {
        let path = std::env::temp_dir().join(format!(
            "hangman_words_reload_{}.txt",
            std::process::id()
        ));
        std::fs::write(&path, "cat\ndog\n").unwrap();
        let pool = WordPool::load(&path);
        let shared = pool.clone();
        assert_eq!(shared.len(), 2);

        std::fs::write(&path, "owl\n").unwrap();
        assert_eq!(pool.reload().unwrap(), 1);
        assert_eq!(shared.words(), vec!["owl"]);

        std::fs::remove_file(&path).unwrap();
        assert!(pool.reload().is_err());
        assert_eq!(shared.words(), vec!["owl"], "failed reload keeps old list");
    }
}
