//! Word list loading and secret-word selection.

use std::fs;
use std::path::PathBuf;

use rand::Rng;
use tracing::{debug, instrument, warn};

use crate::game::normalize_word;

/// Errors produced while loading the word list.
#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum WordsError {
    /// The word file was read but yielded no usable words.
    #[display("Word list at '{}' contains no words", path.display())]
    Empty {
        /// Path of the offending file.
        path: PathBuf,
    },
    /// The word file could not be read at all.
    #[display("Failed to read word list at '{}': {source}", path.display())]
    Unreadable {
        /// Path of the offending file.
        path: PathBuf,
        /// Underlying I/O failure.
        source: std::io::Error,
    },
}

/// A newline-separated word file on disk.
///
/// The file is re-read on every [`load`](Self::load), so words can be added
/// while the server is running and new sessions pick them up immediately.
#[derive(Debug, Clone)]
pub struct WordList {
    path: PathBuf,
}

impl WordList {
    /// Creates a word list backed by the file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Reads the backing file and returns its words, trimmed and uppercased.
    ///
    /// Blank lines and lines containing internal whitespace are skipped;
    /// secret words are always single tokens.
    ///
    /// # Errors
    ///
    /// Returns [`WordsError::Unreadable`] if the file cannot be read and
    /// [`WordsError::Empty`] if no usable words remain after filtering.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn load(&self) -> Result<Vec<String>, WordsError> {
        debug!("Loading word list");

        let raw = fs::read_to_string(&self.path).map_err(|e| WordsError::Unreadable {
            path: self.path.clone(),
            source: e,
        })?;

        let words: Vec<String> = raw
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.contains(char::is_whitespace))
            .map(normalize_word)
            .collect();

        if words.is_empty() {
            warn!("Word list yielded no usable words");
            return Err(WordsError::Empty {
                path: self.path.clone(),
            });
        }

        debug!(count = words.len(), "Word list loaded");
        Ok(words)
    }
}

/// Strategy for choosing the secret word of a new session.
///
/// Injected into the service so tests can fix the word deterministically.
pub trait WordPicker: std::fmt::Debug + Send + Sync {
    /// Picks one word from `words`. Callers guarantee `words` is non-empty.
    fn pick<'a>(&self, words: &'a [String]) -> &'a str;
}

/// Picks uniformly at random.
#[derive(Debug, Default, Clone, Copy)]
pub struct UniformPicker;

impl WordPicker for UniformPicker {
    fn pick<'a>(&self, words: &'a [String]) -> &'a str {
        let index = rand::thread_rng().gen_range(0..words.len());
        &words[index]
    }
}
