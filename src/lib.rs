//! Word Guess library - a word-guessing game served over HTTP
//!
//! Players start a session against a secret word, guess letters one at a
//! time, and win by revealing the whole word before six wrong guesses run
//! out. Users, sessions, and results persist in SQLite.
//!
//! # Architecture
//!
//! - **Game**: pure guess-evaluation rules and outcome types
//! - **Service**: session engine combining rules, word selection, and storage
//! - **Db**: Diesel/SQLite repository behind the [`GameStore`] trait
//! - **Server**: axum HTTP API with Swagger UI documentation
//!
//! # Example
//!
//! ```no_run
//! use word_guess::{GameRepository, GameService, WordList, game_router};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let repository = GameRepository::new("word_guess.db".to_string())?;
//! repository.ensure_schema()?;
//!
//! let service = GameService::new(repository, WordList::new("words.txt"));
//! let app = game_router(service);
//!
//! let listener = tokio::net::TcpListener::bind(("127.0.0.1", 3000)).await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod cli;
mod db;
mod doc;
mod game;
mod server;
mod service;
mod store;
mod words;

// Crate-level exports - CLI
pub use cli::Cli;

// Crate-level exports - Database layer
pub use db::{DbError, GameRepository, GameSession, NewGameSession, NewUser, User};

// Crate-level exports - OpenAPI document
pub use doc::ApiDoc;

// Crate-level exports - Game rules and outcomes
pub use game::{
    DeleteOutcome, GuessOutcome, GuessResult, MASK_PLACEHOLDER, STARTING_ATTEMPTS, SessionStatus,
    evaluate_guess, initial_mask, normalize_word, render_mask, status_for,
};

// Crate-level exports - HTTP server
pub use server::game_router;

// Crate-level exports - Session engine
pub use service::{GameError, GameService, SessionReport};

// Crate-level exports - Storage capability
pub use store::{GameStore, SessionFilter};

// Crate-level exports - Word source
pub use words::{UniformPicker, WordList, WordPicker, WordsError};
