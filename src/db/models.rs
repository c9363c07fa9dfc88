//! Database models for users and game sessions.

use chrono::NaiveDateTime;
use derive_getters::Getters;
use derive_new::new;
use diesel::prelude::*;
use tracing::instrument;

use crate::db::{DbError, schema};
use crate::game::SessionStatus;

/// User database model.
///
/// Names are treated as unique by lookup logic (first match wins, id
/// ascending) but carry no storage-level uniqueness constraint.
#[derive(Debug, Clone, Queryable, Identifiable, Selectable, Getters, new)]
#[diesel(table_name = schema::users)]
pub struct User {
    id: i32,
    name: String,
    created_at: NaiveDateTime,
}

/// Insertable user model for lazy user creation.
#[derive(Debug, Clone, Insertable, new)]
#[diesel(table_name = schema::users)]
pub struct NewUser {
    name: String,
}

/// Game session database model.
#[derive(Debug, Clone, Queryable, Identifiable, Associations, Selectable, Getters, new)]
#[diesel(table_name = schema::game_sessions)]
#[diesel(belongs_to(User))]
pub struct GameSession {
    id: i32,
    user_id: i32,
    word: String,
    mask: String,
    attempts_left: i32,
    status: String,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

impl GameSession {
    /// Parses the stored status string into a [`SessionStatus`] enum.
    #[instrument(skip(self), fields(status = %self.status))]
    pub fn parse_status(&self) -> Result<SessionStatus, DbError> {
        SessionStatus::from_db_string(self.status())
            .ok_or_else(|| DbError::new(format!("Invalid status: '{}'", self.status)))
    }
}

/// Insertable session model for starting new games.
#[derive(Debug, Clone, Insertable, new, Getters)]
#[diesel(table_name = schema::game_sessions)]
pub struct NewGameSession {
    user_id: i32,
    word: String,
    mask: String,
    attempts_left: i32,
    status: String,
}

/// Atomic write applied after a guess: mask, attempts, and status move
/// together or not at all.
#[derive(Debug, Clone, AsChangeset, new)]
#[diesel(table_name = schema::game_sessions)]
pub struct GuessWrite {
    mask: String,
    attempts_left: i32,
    status: String,
    updated_at: NaiveDateTime,
}
