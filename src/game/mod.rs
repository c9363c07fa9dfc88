//! Game rules and domain types for the word-guessing session engine.

mod rules;
mod types;

pub use rules::{evaluate_guess, initial_mask, normalize_word, render_mask, status_for};
pub use types::{
    DeleteOutcome, GuessOutcome, GuessResult, MASK_PLACEHOLDER, STARTING_ATTEMPTS, SessionStatus,
};
