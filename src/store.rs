//! Persistence capability consumed by the session engine.

use crate::db::{DbError, GameSession, NewGameSession, User};
use crate::game::{GuessResult, SessionStatus};

/// Optional predicates for session queries.
#[derive(Debug, Clone, Default)]
pub struct SessionFilter {
    /// Keep only sessions with this status.
    pub status: Option<SessionStatus>,
    /// Keep only sessions owned by the user with this exact name.
    pub user_name: Option<String>,
}

/// Durable storage for users and their game sessions.
///
/// The service drives all persistence through this capability, so its
/// decision logic can run against an in-memory fake as well as the SQLite
/// repository.
pub trait GameStore {
    /// Looks up a user by exact name. First match wins, id ascending.
    fn get_user_by_name(&self, name: &str) -> Result<Option<User>, DbError>;

    /// Creates and persists a new user.
    fn create_user(&self, name: String) -> Result<User, DbError>;

    /// Persists a new session and returns it with its assigned id.
    fn create_session(&self, session: NewGameSession) -> Result<GameSession, DbError>;

    /// Looks up a session by id.
    fn get_session(&self, session_id: i32) -> Result<Option<GameSession>, DbError>;

    /// Applies a guess result to a session as one atomic write covering
    /// mask, attempts, and status together.
    fn apply_guess(&self, session_id: i32, result: &GuessResult) -> Result<GameSession, DbError>;

    /// Lists sessions with their owning users, ordered by session id
    /// ascending.
    fn list_sessions(&self, filter: &SessionFilter) -> Result<Vec<(GameSession, User)>, DbError>;

    /// Deletes the first user matching `name` together with all owned
    /// sessions as a single atomic unit. Returns the number of sessions
    /// removed, or `None` if no user matched.
    fn delete_user(&self, name: &str) -> Result<Option<usize>, DbError>;
}
