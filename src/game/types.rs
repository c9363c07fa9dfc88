//! Core domain types for the word-guessing game.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::rules;

/// Number of incorrect guesses a fresh session can absorb before it is lost.
pub const STARTING_ATTEMPTS: i32 = 6;

/// Placeholder character for a not-yet-revealed letter.
pub const MASK_PLACEHOLDER: char = '_';

/// Current status of a game session.
///
/// Transitions are one-directional: a session leaves `InProgress` for
/// `Won` or `Lost` and never changes again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionStatus {
    /// Letters remain hidden and attempts remain.
    InProgress,
    /// Every letter has been revealed.
    Won,
    /// Attempts ran out with letters still hidden.
    Lost,
}

impl SessionStatus {
    /// Converts the status to the string stored in the database.
    pub fn to_db_string(&self) -> &'static str {
        match self {
            Self::InProgress => "IN_PROGRESS",
            Self::Won => "WON",
            Self::Lost => "LOST",
        }
    }

    /// Parses the status from the string stored in the database.
    ///
    /// Returns `None` if the string is not a valid status value.
    pub fn from_db_string(s: &str) -> Option<Self> {
        match s {
            "IN_PROGRESS" => Some(Self::InProgress),
            "WON" => Some(Self::Won),
            "LOST" => Some(Self::Lost),
            _ => None,
        }
    }

    /// Parses a caller-supplied status filter, ignoring ASCII case.
    ///
    /// Returns `None` if the text matches no status value, in which case no
    /// stored session can match it either.
    pub fn parse_filter(s: &str) -> Option<Self> {
        if s.eq_ignore_ascii_case("IN_PROGRESS") {
            Some(Self::InProgress)
        } else if s.eq_ignore_ascii_case("WON") {
            Some(Self::Won)
        } else if s.eq_ignore_ascii_case("LOST") {
            Some(Self::Lost)
        } else {
            None
        }
    }
}

impl std::fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_db_string())
    }
}

/// Result of evaluating one letter guess against an in-progress session.
///
/// Carries the complete post-guess state so it can be persisted as a single
/// atomic write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuessResult {
    /// The letter as evaluated (uppercased).
    pub letter: char,
    /// Whether this guess revealed at least one new position.
    pub correct: bool,
    /// Mask after the guess, one character per letter of the word.
    pub mask: String,
    /// Attempts remaining after the guess.
    pub attempts_left: i32,
    /// Session status after the guess.
    pub status: SessionStatus,
}

impl std::fmt::Display for GuessResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let verdict = if self.correct { "Correct!" } else { "Wrong." };
        write!(
            f,
            "Letter: {} → {} Word: {} Attempts left: {}",
            self.letter,
            verdict,
            rules::render_mask(&self.mask),
            self.attempts_left
        )
    }
}

/// Outcome of a guess operation.
///
/// Recoverable conditions are values here, not errors: a missing session or a
/// finished game produces a descriptive message rather than a failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuessOutcome {
    /// No session exists with the requested id.
    NotFound {
        /// The id that was requested.
        session_id: i32,
    },
    /// The session has already concluded; nothing was mutated.
    AlreadyFinished,
    /// The guess was evaluated against an in-progress session.
    Evaluated(GuessResult),
}

impl std::fmt::Display for GuessOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound { session_id } => write!(f, "Session {} not found.", session_id),
            Self::AlreadyFinished => write!(f, "Game already finished."),
            Self::Evaluated(result) => result.fmt(f),
        }
    }
}

/// Outcome of a user deletion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// No user exists with the requested name.
    NotFound {
        /// The name that was requested.
        name: String,
    },
    /// The user and all owned sessions were removed.
    Deleted {
        /// The deleted user's name.
        name: String,
        /// How many sessions were removed along with the user.
        sessions_removed: usize,
    },
}

impl std::fmt::Display for DeleteOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound { name } => write!(f, "User '{}' not found.", name),
            Self::Deleted { name, .. } => write!(f, "User '{}' and their games deleted.", name),
        }
    }
}
