//! Tests for the game service over an in-memory store.

mod common;

use std::io::Write;
use std::sync::Arc;

use common::{FixedPicker, MemoryStore};
use tempfile::NamedTempFile;

use word_guess::{
    DeleteOutcome, GameError, GameService, GameStore, GuessOutcome, SessionStatus, WordList,
};

/// Writes a word file, returning its handle (must stay in scope).
fn word_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(contents.as_bytes())
        .expect("Failed to write temp file");
    file
}

/// Service over a fresh in-memory store, fixed to always pick `word`.
fn setup_service(word: &'static str) -> (NamedTempFile, GameService<MemoryStore>) {
    let file = word_file(&format!("{word}\n"));
    let service = GameService::new(MemoryStore::default(), WordList::new(file.path()))
        .with_picker(Arc::new(FixedPicker(word)));
    (file, service)
}

#[test]
fn test_start_creates_user_and_session() {
    let (_words, service) = setup_service("CAT");

    let session_id = service.start_game("Alice").expect("Start failed");
    assert!(session_id > 0);

    let user = service
        .store()
        .get_user_by_name("Alice")
        .expect("Query failed");
    assert!(user.is_some(), "Start should create the user");

    let session = service
        .store()
        .get_session(session_id)
        .expect("Query failed")
        .expect("Session missing");
    assert_eq!(session.word(), "CAT");
    assert_eq!(session.mask(), "___");
    assert_eq!(*session.attempts_left(), 6);
    assert_eq!(session.status(), "IN_PROGRESS");
}

#[test]
fn test_start_reuses_existing_user() {
    let (_words, service) = setup_service("CAT");

    let first = service.start_game("Alice").expect("Start failed");
    let second = service.start_game("Alice").expect("Start failed");
    assert_ne!(first, second);

    let first_session = service
        .store()
        .get_session(first)
        .expect("Query failed")
        .expect("Session missing");
    let second_session = service
        .store()
        .get_session(second)
        .expect("Query failed")
        .expect("Session missing");
    assert_eq!(first_session.user_id(), second_session.user_id());
}

#[test]
fn test_guess_unknown_session_is_an_outcome() {
    let (_words, service) = setup_service("CAT");
    let outcome = service.guess_letter(999, 'A').expect("Guess failed");
    assert_eq!(outcome, GuessOutcome::NotFound { session_id: 999 });
}

#[test]
fn test_guessing_all_letters_wins() {
    let (_words, service) = setup_service("CAT");
    let id = service.start_game("Alice").expect("Start failed");

    for letter in ['C', 'A'] {
        let outcome = service.guess_letter(id, letter).expect("Guess failed");
        let GuessOutcome::Evaluated(result) = outcome else {
            panic!("Expected an evaluation");
        };
        assert!(result.correct);
        assert_eq!(result.status, SessionStatus::InProgress);
    }

    let outcome = service.guess_letter(id, 'T').expect("Guess failed");
    let GuessOutcome::Evaluated(result) = outcome else {
        panic!("Expected an evaluation");
    };
    assert_eq!(result.status, SessionStatus::Won);
    assert_eq!(result.mask, "CAT");
    assert_eq!(result.attempts_left, 6);
}

#[test]
fn test_guess_after_win_leaves_state_unchanged() {
    let (_words, service) = setup_service("CAT");
    let id = service.start_game("Alice").expect("Start failed");
    for letter in ['C', 'A', 'T'] {
        service.guess_letter(id, letter).expect("Guess failed");
    }

    let outcome = service.guess_letter(id, 'X').expect("Guess failed");
    assert_eq!(outcome, GuessOutcome::AlreadyFinished);

    let session = service
        .store()
        .get_session(id)
        .expect("Query failed")
        .expect("Session missing");
    assert_eq!(session.mask(), "CAT");
    assert_eq!(*session.attempts_left(), 6);
    assert_eq!(session.status(), "WON");
}

#[test]
fn test_six_wrong_guesses_lose_the_session() {
    let (_words, service) = setup_service("DOG");
    let id = service.start_game("Bob").expect("Start failed");

    for letter in ['X', 'Y', 'Z', 'W', 'V'] {
        service.guess_letter(id, letter).expect("Guess failed");
    }
    let outcome = service.guess_letter(id, 'U').expect("Guess failed");
    let GuessOutcome::Evaluated(result) = outcome else {
        panic!("Expected an evaluation");
    };
    assert_eq!(result.attempts_left, 0);
    assert_eq!(result.status, SessionStatus::Lost);

    assert_eq!(
        service.guess_letter(id, 'D').expect("Guess failed"),
        GuessOutcome::AlreadyFinished
    );
}

#[test]
fn test_statistics_reports_all_sessions_in_order() {
    let (_words, service) = setup_service("CAT");
    let first = service.start_game("Alice").expect("Start failed");
    let second = service.start_game("Bob").expect("Start failed");
    for letter in ['C', 'A', 'T'] {
        service.guess_letter(first, letter).expect("Guess failed");
    }

    let report = service.statistics(None, None).expect("Statistics failed");
    assert_eq!(report.len(), 2);
    assert_eq!(report[0].session_id, first);
    assert_eq!(report[0].word, "CAT");
    assert_eq!(report[0].mask, "C A T");
    assert_eq!(report[0].status, SessionStatus::Won);
    assert_eq!(report[0].user, "Alice");
    assert_eq!(report[1].session_id, second);
    assert_eq!(report[1].mask, "_ _ _");
    assert_eq!(report[1].status, SessionStatus::InProgress);
    assert_eq!(report[1].user, "Bob");
}

#[test]
fn test_statistics_filters_by_status_case_insensitively() {
    let (_words, service) = setup_service("CAT");
    let first = service.start_game("Alice").expect("Start failed");
    service.start_game("Bob").expect("Start failed");
    for letter in ['C', 'A', 'T'] {
        service.guess_letter(first, letter).expect("Guess failed");
    }

    for filter in ["won", "WON", "Won"] {
        let report = service
            .statistics(Some(filter), None)
            .expect("Statistics failed");
        assert_eq!(report.len(), 1, "filter '{filter}' should match the win");
        assert_eq!(report[0].user, "Alice");
    }
}

#[test]
fn test_statistics_unknown_status_matches_nothing() {
    let (_words, service) = setup_service("CAT");
    service.start_game("Alice").expect("Start failed");

    let report = service
        .statistics(Some("BANANA"), None)
        .expect("Statistics failed");
    assert!(report.is_empty());
}

#[test]
fn test_statistics_filters_by_user() {
    let (_words, service) = setup_service("CAT");
    service.start_game("Alice").expect("Start failed");
    service.start_game("Bob").expect("Start failed");

    let report = service
        .statistics(None, Some("Bob"))
        .expect("Statistics failed");
    assert_eq!(report.len(), 1);
    assert_eq!(report[0].user, "Bob");
}

#[test]
fn test_delete_user_reports_sessions_removed() {
    let (_words, service) = setup_service("CAT");
    service.start_game("Alice").expect("Start failed");
    service.start_game("Alice").expect("Start failed");

    let outcome = service.delete_user("Alice").expect("Delete failed");
    assert_eq!(
        outcome,
        DeleteOutcome::Deleted {
            name: "Alice".to_string(),
            sessions_removed: 2,
        }
    );

    let report = service
        .statistics(None, Some("Alice"))
        .expect("Statistics failed");
    assert!(report.is_empty(), "Deleted user should have no sessions");
}

#[test]
fn test_delete_unknown_user_is_an_outcome() {
    let (_words, service) = setup_service("CAT");
    let outcome = service.delete_user("Ghost").expect("Delete failed");
    assert_eq!(
        outcome,
        DeleteOutcome::NotFound {
            name: "Ghost".to_string(),
        }
    );
}

#[test]
fn test_start_with_empty_word_list_fails() {
    let file = word_file("\n   \n");
    let service = GameService::new(MemoryStore::default(), WordList::new(file.path()));

    let result = service.start_game("Alice");
    assert!(matches!(result, Err(GameError::Words(_))));
}

#[test]
fn test_fixed_picker_selects_from_multi_word_list() {
    let file = word_file("APPLE\nCAT\nDOG\n");
    let service = GameService::new(MemoryStore::default(), WordList::new(file.path()))
        .with_picker(Arc::new(FixedPicker("CAT")));

    let id = service.start_game("Alice").expect("Start failed");
    let session = service
        .store()
        .get_session(id)
        .expect("Query failed")
        .expect("Session missing");
    assert_eq!(session.word(), "CAT");
}
