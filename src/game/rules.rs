//! Guess evaluation and mask rules.

use tracing::instrument;

use super::types::{GuessResult, MASK_PLACEHOLDER, SessionStatus};

/// Normalizes a candidate word: trims surrounding whitespace and uppercases.
pub fn normalize_word(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// Builds the initial mask for a word: one placeholder per character.
pub fn initial_mask(word: &str) -> String {
    word.chars().map(|_| MASK_PLACEHOLDER).collect()
}

/// Renders a compact mask for humans, one space between positions.
pub fn render_mask(mask: &str) -> String {
    let mut out = String::with_capacity(mask.len() * 2);
    for (i, c) in mask.chars().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        out.push(c);
    }
    out
}

/// Recomputes the session status from a mask and remaining attempts.
pub fn status_for(mask: &str, attempts_left: i32) -> SessionStatus {
    let hidden = mask.chars().any(|c| c == MASK_PLACEHOLDER);
    if !hidden {
        SessionStatus::Won
    } else if attempts_left > 0 {
        SessionStatus::InProgress
    } else {
        SessionStatus::Lost
    }
}

/// Evaluates a letter guess against an in-progress session.
///
/// Reveals every still-masked position whose word character matches the
/// uppercased letter. The guess counts as correct only if at least one new
/// position was revealed, so repeating an already-revealed letter is scored
/// as incorrect and costs an attempt. Incorrect guesses decrement
/// `attempts_left` by exactly one; the status is recomputed before returning,
/// so a decrement to zero lands in the same result as the flip to `Lost`.
///
/// Callers must only invoke this for sessions whose status is
/// [`SessionStatus::InProgress`].
#[instrument(skip(word, mask))]
pub fn evaluate_guess(word: &str, mask: &str, attempts_left: i32, letter: char) -> GuessResult {
    let letter = normalize_letter(letter);
    let mut correct = false;
    let next_mask: String = word
        .chars()
        .zip(mask.chars())
        .map(|(w, m)| {
            if m == MASK_PLACEHOLDER && w == letter {
                correct = true;
                w
            } else {
                m
            }
        })
        .collect();

    let attempts_left = if correct {
        attempts_left
    } else {
        attempts_left - 1
    };
    let status = status_for(&next_mask, attempts_left);

    GuessResult {
        letter,
        correct,
        mask: next_mask,
        attempts_left,
        status,
    }
}

/// Uppercases a guessed letter, taking the first character when uppercasing
/// expands to more than one.
fn normalize_letter(letter: char) -> char {
    letter.to_uppercase().next().unwrap_or(letter)
}
