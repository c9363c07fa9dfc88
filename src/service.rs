//! Game session business logic layer.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};
use utoipa::ToSchema;

use crate::db::{DbError, NewGameSession};
use crate::game::{
    DeleteOutcome, GuessOutcome, STARTING_ATTEMPTS, SessionStatus, evaluate_guess, initial_mask,
    render_mask,
};
use crate::store::{GameStore, SessionFilter};
use crate::words::{UniformPicker, WordList, WordPicker, WordsError};

/// Errors produced by game operations.
///
/// Recoverable conditions (unknown session, finished game, absent user) are
/// outcome values, not errors; these variants cover genuinely failed
/// operations only.
#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum GameError {
    /// The word source could not supply a secret word.
    #[display("{_0}")]
    Words(WordsError),
    /// The storage layer failed.
    #[display("{_0}")]
    Db(DbError),
}

/// One row of the statistics report.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SessionReport {
    /// Session id.
    pub session_id: i32,
    /// The secret word.
    pub word: String,
    /// Mask rendered with spaces between positions, e.g. `"C A _"`.
    pub mask: String,
    /// Attempts remaining.
    pub attempts_left: i32,
    /// Session status.
    pub status: SessionStatus,
    /// Name of the owning user.
    pub user: String,
}

/// Service layer for running word-guessing games.
///
/// Wraps a [`GameStore`] with the game flow: user provisioning, word
/// selection, guess evaluation, and reporting.
#[derive(Debug, Clone)]
pub struct GameService<S> {
    store: S,
    words: WordList,
    picker: Arc<dyn WordPicker>,
}

impl<S: GameStore> GameService<S> {
    /// Creates a new game service with uniform random word selection.
    #[instrument(skip(store, words))]
    pub fn new(store: S, words: WordList) -> Self {
        info!("Creating GameService");
        Self {
            store,
            words,
            picker: Arc::new(UniformPicker),
        }
    }

    /// Replaces the word selection strategy. Tests use this to fix the word.
    pub fn with_picker(mut self, picker: Arc<dyn WordPicker>) -> Self {
        self.picker = picker;
        self
    }

    /// Returns the underlying store.
    #[instrument(skip(self))]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Starts a new game session for `user_name`, creating the user on first
    /// contact.
    ///
    /// The word list is read fresh so edits to the file apply from the next
    /// start onward. Returns the new session's id.
    ///
    /// # Errors
    ///
    /// Returns [`GameError`] if the word list is unusable or storage fails.
    #[instrument(skip(self))]
    pub fn start_game(&self, user_name: &str) -> Result<i32, GameError> {
        debug!(user = %user_name, "Starting game");

        let user = match self.store.get_user_by_name(user_name)? {
            Some(user) => {
                debug!(user_id = user.id(), "Existing user found");
                user
            }
            None => {
                info!(user = %user_name, "Creating new user");
                self.store.create_user(user_name.to_string())?
            }
        };

        let words = self.words.load()?;
        let word = self.picker.pick(&words).to_string();
        let mask = initial_mask(&word);

        let session = self.store.create_session(NewGameSession::new(
            *user.id(),
            word,
            mask,
            STARTING_ATTEMPTS,
            SessionStatus::InProgress.to_db_string().to_string(),
        ))?;

        info!(session_id = session.id(), user_id = user.id(), "Game started");
        Ok(*session.id())
    }

    /// Applies a single letter guess to a session.
    ///
    /// Unknown session ids and already-finished games are reported as
    /// outcomes, not errors. In-progress guesses are evaluated and persisted
    /// as one atomic write.
    ///
    /// # Errors
    ///
    /// Returns [`GameError`] if storage fails.
    #[instrument(skip(self))]
    pub fn guess_letter(&self, session_id: i32, letter: char) -> Result<GuessOutcome, GameError> {
        debug!(session_id = %session_id, letter = %letter, "Guessing letter");

        let Some(session) = self.store.get_session(session_id)? else {
            debug!(session_id = %session_id, "Session not found");
            return Ok(GuessOutcome::NotFound { session_id });
        };

        if session.parse_status()? != SessionStatus::InProgress {
            debug!(session_id = %session_id, status = %session.status(), "Game already finished");
            return Ok(GuessOutcome::AlreadyFinished);
        }

        let result = evaluate_guess(
            session.word(),
            session.mask(),
            *session.attempts_left(),
            letter,
        );

        self.store.apply_guess(session_id, &result)?;

        info!(
            session_id = %session_id,
            correct = result.correct,
            attempts_left = result.attempts_left,
            status = %result.status,
            "Guess applied"
        );
        Ok(GuessOutcome::Evaluated(result))
    }

    /// Reports sessions joined with their owners, ordered by session id.
    ///
    /// `status` filters case-insensitively on the status name; a value that
    /// names no status matches nothing. `user` filters by exact name.
    ///
    /// # Errors
    ///
    /// Returns [`GameError`] if storage fails or a stored status is invalid.
    #[instrument(skip(self))]
    pub fn statistics(
        &self,
        status: Option<&str>,
        user: Option<&str>,
    ) -> Result<Vec<SessionReport>, GameError> {
        debug!(status = ?status, user = ?user, "Building statistics report");

        let status_filter = match status {
            Some(raw) => match SessionStatus::parse_filter(raw) {
                Some(parsed) => Some(parsed),
                None => {
                    warn!(status = %raw, "Unknown status filter, nothing matches");
                    return Ok(Vec::new());
                }
            },
            None => None,
        };

        let filter = SessionFilter {
            status: status_filter,
            user_name: user.map(str::to_string),
        };

        let rows = self.store.list_sessions(&filter)?;
        let mut report = Vec::with_capacity(rows.len());
        for (session, owner) in rows {
            report.push(SessionReport {
                session_id: *session.id(),
                word: session.word().clone(),
                mask: render_mask(session.mask()),
                attempts_left: *session.attempts_left(),
                status: session.parse_status()?,
                user: owner.name().clone(),
            });
        }

        info!(count = report.len(), "Statistics report built");
        Ok(report)
    }

    /// Deletes a user together with all of their sessions.
    ///
    /// # Errors
    ///
    /// Returns [`GameError`] if storage fails.
    #[instrument(skip(self))]
    pub fn delete_user(&self, user_name: &str) -> Result<DeleteOutcome, GameError> {
        debug!(user = %user_name, "Deleting user");

        match self.store.delete_user(user_name)? {
            Some(sessions_removed) => {
                info!(user = %user_name, sessions_removed, "User deleted");
                Ok(DeleteOutcome::Deleted {
                    name: user_name.to_string(),
                    sessions_removed,
                })
            }
            None => {
                debug!(user = %user_name, "User not found");
                Ok(DeleteOutcome::NotFound {
                    name: user_name.to_string(),
                })
            }
        }
    }
}
