//! Shared test doubles: an in-memory store and a deterministic word picker.

use std::sync::Mutex;

use chrono::Utc;

use word_guess::{
    DbError, GameSession, GameStore, GuessResult, NewGameSession, SessionFilter, User, WordPicker,
};

/// In-memory [`GameStore`] for exercising the service without SQLite.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    users: Vec<User>,
    sessions: Vec<GameSession>,
    next_user_id: i32,
    next_session_id: i32,
}

impl GameStore for MemoryStore {
    fn get_user_by_name(&self, name: &str) -> Result<Option<User>, DbError> {
        let inner = self.inner.lock().expect("Store lock poisoned");
        Ok(inner.users.iter().find(|u| u.name() == name).cloned())
    }

    fn create_user(&self, name: String) -> Result<User, DbError> {
        let mut inner = self.inner.lock().expect("Store lock poisoned");
        inner.next_user_id += 1;
        let user = User::new(inner.next_user_id, name, Utc::now().naive_utc());
        inner.users.push(user.clone());
        Ok(user)
    }

    fn create_session(&self, session: NewGameSession) -> Result<GameSession, DbError> {
        let mut inner = self.inner.lock().expect("Store lock poisoned");
        inner.next_session_id += 1;
        let now = Utc::now().naive_utc();
        let row = GameSession::new(
            inner.next_session_id,
            *session.user_id(),
            session.word().clone(),
            session.mask().clone(),
            *session.attempts_left(),
            session.status().clone(),
            now,
            now,
        );
        inner.sessions.push(row.clone());
        Ok(row)
    }

    fn get_session(&self, session_id: i32) -> Result<Option<GameSession>, DbError> {
        let inner = self.inner.lock().expect("Store lock poisoned");
        Ok(inner
            .sessions
            .iter()
            .find(|s| *s.id() == session_id)
            .cloned())
    }

    fn apply_guess(&self, session_id: i32, result: &GuessResult) -> Result<GameSession, DbError> {
        let mut inner = self.inner.lock().expect("Store lock poisoned");
        let position = inner
            .sessions
            .iter()
            .position(|s| *s.id() == session_id)
            .ok_or_else(|| DbError::new(format!("Session {session_id} not found")))?;

        let old = &inner.sessions[position];
        let updated = GameSession::new(
            *old.id(),
            *old.user_id(),
            old.word().clone(),
            result.mask.clone(),
            result.attempts_left,
            result.status.to_db_string().to_string(),
            *old.created_at(),
            Utc::now().naive_utc(),
        );
        inner.sessions[position] = updated.clone();
        Ok(updated)
    }

    fn list_sessions(&self, filter: &SessionFilter) -> Result<Vec<(GameSession, User)>, DbError> {
        let inner = self.inner.lock().expect("Store lock poisoned");
        let mut rows = Vec::new();

        for session in &inner.sessions {
            if let Some(status) = filter.status {
                if session.status() != status.to_db_string() {
                    continue;
                }
            }
            let Some(owner) = inner.users.iter().find(|u| u.id() == session.user_id()) else {
                continue;
            };
            if let Some(ref name) = filter.user_name {
                if owner.name() != name {
                    continue;
                }
            }
            rows.push((session.clone(), owner.clone()));
        }

        Ok(rows)
    }

    fn delete_user(&self, name: &str) -> Result<Option<usize>, DbError> {
        let mut inner = self.inner.lock().expect("Store lock poisoned");
        let Some(user_id) = inner
            .users
            .iter()
            .find(|u| u.name() == name)
            .map(|u| *u.id())
        else {
            return Ok(None);
        };

        let before = inner.sessions.len();
        inner.sessions.retain(|s| *s.user_id() != user_id);
        let removed = before - inner.sessions.len();
        inner.users.retain(|u| *u.id() != user_id);
        Ok(Some(removed))
    }
}

/// Picker that always selects the given word when present, falling back to
/// the first entry.
#[derive(Debug)]
pub struct FixedPicker(pub &'static str);

impl WordPicker for FixedPicker {
    fn pick<'a>(&self, words: &'a [String]) -> &'a str {
        words
            .iter()
            .find(|w| w.as_str() == self.0)
            .map(String::as_str)
            .unwrap_or_else(|| words[0].as_str())
    }
}
