//! Database persistence layer for users and their game sessions.

mod error;
mod models;
mod repository;
mod schema; // Diesel generated schema - internal use only

pub use error::DbError;
pub use models::{GameSession, GuessWrite, NewGameSession, NewUser, User};
pub use repository::GameRepository;
