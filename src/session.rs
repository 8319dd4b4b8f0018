use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use uuid::Uuid;

/// Cookie carrying the session id
pub const SESSION_COOKIE: &str = "bookme_session";

/// Per-browser session state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Session {
    pub logged_in: bool,
}

/// Result of a login attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginOutcome {
    Success,
    MissingCredentials,
}

impl Session {
    /// Any non-empty username/password pair is accepted.
    ///
    /// This is a placeholder gate, not authentication: nothing is verified
    /// or stored.
    pub fn login(&mut self, username: &str, password: &str) -> LoginOutcome {
        if !username.is_empty() && !password.is_empty() {
            self.logged_in = true;
            LoginOutcome::Success
        } else {
            LoginOutcome::MissingCredentials
        }
    }
}

/// In-memory session store, lost on process exit
///
/// Only logged-in sessions are kept. A logged-out visitor costs nothing: it is
/// handed a fresh id on every request until a login is recorded under one.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: Mutex<HashMap<Uuid, Session>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<Uuid, Session>> {
        // Session values stay consistent even if a holder panicked
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Resolve a session id. Missing or unknown ids get a fresh id and a
    /// logged-out session, which is not stored; the returned flag is `true`
    /// for such new ids.
    pub fn resolve(&self, id: Option<Uuid>) -> (Uuid, Session, bool) {
        let known = id.and_then(|id| self.lock().get(&id).map(|session| (id, *session)));
        match known {
            Some((id, session)) => (id, session, false),
            None => (Uuid::new_v4(), Session::default(), true),
        }
    }

    /// Record a request's session state
    ///
    /// The logged-in flag is only ever raised: a stale logged-out copy written
    /// back by a concurrent request cannot undo a login.
    pub fn update(&self, id: Uuid, session: Session) {
        if !session.logged_in {
            return;
        }
        let mut sessions = self.lock();
        let stored = sessions.entry(id).or_default();
        if !stored.logged_in {
            tracing::debug!("Session {} logged in", id);
        }
        stored.logged_in = true;
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

/// Extract the session id from a `Cookie` header value
pub fn session_id_from_cookie(header: &str) -> Option<Uuid> {
    header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .and_then(|(_, value)| Uuid::parse_str(value.trim()).ok())
}

/// `Set-Cookie` value for a session id
pub fn session_cookie(id: Uuid) -> String {
    format!("{}={}; Path=/; HttpOnly; SameSite=Lax", SESSION_COOKIE, id)
}
