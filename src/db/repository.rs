//! Database repository for users and their word-guessing sessions.

use chrono::Utc;
use diesel::prelude::*;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::{debug, info, instrument};

use crate::db::{DbError, GameSession, GuessWrite, NewGameSession, NewUser, User, schema};
use crate::game::GuessResult;
use crate::store::{GameStore, SessionFilter};

/// Schema migrations compiled into the binary.
const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Database repository for user and session operations.
#[derive(Debug, Clone)]
pub struct GameRepository {
    db_path: String,
}

impl GameRepository {
    /// Creates a new repository connected to the database at the given path.
    ///
    /// Use `":memory:"` for an in-memory database (useful for tests).
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the path is invalid.
    #[instrument(skip(db_path), fields(db_path = %db_path))]
    pub fn new(db_path: String) -> Result<Self, DbError> {
        info!(path = %db_path, "Creating GameRepository");
        Ok(Self { db_path })
    }

    /// Establishes a database connection.
    #[instrument(skip(self))]
    fn connection(&self) -> Result<SqliteConnection, DbError> {
        debug!(path = %self.db_path, "Establishing connection");
        SqliteConnection::establish(&self.db_path)
            .map_err(|e| DbError::new(format!("Failed to connect to '{}': {}", self.db_path, e)))
    }

    /// Applies any pending schema migrations.
    ///
    /// Safe to call on every startup; already-applied migrations are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a migration fails to apply.
    #[instrument(skip(self))]
    pub fn ensure_schema(&self) -> Result<(), DbError> {
        debug!(path = %self.db_path, "Running pending migrations");
        let mut conn = self.connection()?;

        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| DbError::new(format!("Migration failed: {e}")))?;

        info!(count = applied.len(), "Schema migrations applied");
        Ok(())
    }

    /// Creates a new user row.
    ///
    /// Names are not unique at the storage level. Callers that want
    /// find-or-create semantics should look the name up first.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn create_user(&self, name: String) -> Result<User, DbError> {
        debug!(name = %name, "Creating user");
        let mut conn = self.connection()?;

        let new_user = NewUser::new(name);

        let user = diesel::insert_into(schema::users::table)
            .values(&new_user)
            .returning(User::as_returning())
            .get_result(&mut conn)?;

        info!(user_id = user.id(), name = %user.name(), "User created");
        Ok(user)
    }

    /// Gets a user by exact name. Returns `None` if not found.
    ///
    /// Duplicate names can exist; the row with the lowest id wins.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn get_user_by_name(&self, name: &str) -> Result<Option<User>, DbError> {
        debug!(name = %name, "Looking up user by name");
        let mut conn = self.connection()?;

        let user = schema::users::table
            .filter(schema::users::name.eq(name))
            .order(schema::users::id.asc())
            .first::<User>(&mut conn)
            .optional()?;

        if let Some(ref u) = user {
            debug!(user_id = u.id(), "User found");
        } else {
            debug!("User not found");
        }

        Ok(user)
    }

    /// Persists a new game session.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self, session), fields(user_id = session.user_id()))]
    pub fn create_session(&self, session: NewGameSession) -> Result<GameSession, DbError> {
        debug!("Creating game session");
        let mut conn = self.connection()?;

        let created = diesel::insert_into(schema::game_sessions::table)
            .values(&session)
            .returning(GameSession::as_returning())
            .get_result(&mut conn)?;

        info!(
            session_id = created.id(),
            user_id = created.user_id(),
            attempts_left = created.attempts_left(),
            "Game session created"
        );
        Ok(created)
    }

    /// Gets a session by id. Returns `None` if not found.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn get_session(&self, session_id: i32) -> Result<Option<GameSession>, DbError> {
        debug!(session_id = %session_id, "Looking up session");
        let mut conn = self.connection()?;

        let session = schema::game_sessions::table
            .find(session_id)
            .first::<GameSession>(&mut conn)
            .optional()?;

        if let Some(ref s) = session {
            debug!(session_id = s.id(), status = %s.status(), "Session found");
        } else {
            debug!("Session not found");
        }

        Ok(session)
    }

    /// Writes the outcome of a guess back to a session.
    ///
    /// Mask, remaining attempts, and status land in a single UPDATE so no
    /// reader ever observes a half-applied guess.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the session no longer exists or a database
    /// error occurs.
    #[instrument(skip(self, result), fields(letter = %result.letter, correct = result.correct))]
    pub fn apply_guess(
        &self,
        session_id: i32,
        result: &GuessResult,
    ) -> Result<GameSession, DbError> {
        debug!(session_id = %session_id, "Applying guess outcome");
        let mut conn = self.connection()?;

        let write = GuessWrite::new(
            result.mask.clone(),
            result.attempts_left,
            result.status.to_db_string().to_string(),
            Utc::now().naive_utc(),
        );

        let updated = diesel::update(schema::game_sessions::table.find(session_id))
            .set(&write)
            .returning(GameSession::as_returning())
            .get_result(&mut conn)?;

        info!(
            session_id = updated.id(),
            attempts_left = updated.attempts_left(),
            status = %updated.status(),
            "Guess outcome persisted"
        );
        Ok(updated)
    }

    /// Lists sessions joined with their owners, oldest session first.
    ///
    /// Filters combine conjunctively; a `None` field leaves that dimension
    /// unconstrained.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn list_sessions(
        &self,
        filter: &SessionFilter,
    ) -> Result<Vec<(GameSession, User)>, DbError> {
        debug!(?filter, "Listing sessions");
        let mut conn = self.connection()?;

        let mut query = schema::game_sessions::table
            .inner_join(schema::users::table)
            .select((GameSession::as_select(), User::as_select()))
            .order(schema::game_sessions::id.asc())
            .into_boxed();

        if let Some(status) = filter.status {
            query = query.filter(schema::game_sessions::status.eq(status.to_db_string()));
        }
        if let Some(ref name) = filter.user_name {
            query = query.filter(schema::users::name.eq(name.clone()));
        }

        let rows = query.load::<(GameSession, User)>(&mut conn)?;

        info!(count = rows.len(), "Sessions loaded");
        Ok(rows)
    }

    /// Deletes the first user matching `name` and all of their sessions in
    /// one transaction.
    ///
    /// Returns the number of sessions removed, or `None` if no user
    /// matched.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn delete_user(&self, name: &str) -> Result<Option<usize>, DbError> {
        debug!(name = %name, "Deleting user");
        let mut conn = self.connection()?;

        let outcome = conn.transaction::<Option<usize>, DbError, _>(|conn| {
            let user = schema::users::table
                .filter(schema::users::name.eq(name))
                .order(schema::users::id.asc())
                .first::<User>(conn)
                .optional()?;

            let Some(user) = user else {
                return Ok(None);
            };
            let user_id = *user.id();

            let sessions_removed = diesel::delete(
                schema::game_sessions::table.filter(schema::game_sessions::user_id.eq(user_id)),
            )
            .execute(conn)?;

            diesel::delete(schema::users::table.find(user_id)).execute(conn)?;

            Ok(Some(sessions_removed))
        })?;

        match outcome {
            Some(count) => info!(name = %name, sessions_removed = count, "User deleted"),
            None => debug!(name = %name, "User not found, nothing deleted"),
        }

        Ok(outcome)
    }
}

impl GameStore for GameRepository {
    fn get_user_by_name(&self, name: &str) -> Result<Option<User>, DbError> {
        Self::get_user_by_name(self, name)
    }

    fn create_user(&self, name: String) -> Result<User, DbError> {
        Self::create_user(self, name)
    }

    fn create_session(&self, session: NewGameSession) -> Result<GameSession, DbError> {
        Self::create_session(self, session)
    }

    fn get_session(&self, session_id: i32) -> Result<Option<GameSession>, DbError> {
        Self::get_session(self, session_id)
    }

    fn apply_guess(&self, session_id: i32, result: &GuessResult) -> Result<GameSession, DbError> {
        Self::apply_guess(self, session_id, result)
    }

    fn list_sessions(&self, filter: &SessionFilter) -> Result<Vec<(GameSession, User)>, DbError> {
        Self::list_sessions(self, filter)
    }

    fn delete_user(&self, name: &str) -> Result<Option<usize>, DbError> {
        Self::delete_user(self, name)
    }
}
