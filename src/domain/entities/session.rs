//! Per-browser session state.

/// Values stored for one browser session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionData {
    pub user_id: Option<i64>,
    pub visits: Option<i64>,
    pub last_visit: Option<String>,
}

/// A loaded session plus the bookkeeping needed to persist it.
///
/// `key` is the raw value of the session cookie and is `None` until the
/// session is saved for the first time. Rotating the key (on login and
/// logout) moves the old key to `stale_key` so the store can drop it.
#[derive(Debug, Clone, Default)]
pub struct Session {
    key: Option<String>,
    stale_key: Option<String>,
    data: SessionData,
    modified: bool,
}

impl Session {
    /// A fresh, unsaved session.
    pub fn new() -> Self {
        Self::default()
    }

    /// A session loaded from the store under `key`.
    pub fn existing(key: String, data: SessionData) -> Self {
        Self {
            key: Some(key),
            stale_key: None,
            data,
            modified: false,
        }
    }

    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    pub fn stale_key(&self) -> Option<&str> {
        self.stale_key.as_deref()
    }

    pub fn data(&self) -> &SessionData {
        &self.data
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    pub fn user_id(&self) -> Option<i64> {
        self.data.user_id
    }

    pub fn visits(&self) -> Option<i64> {
        self.data.visits
    }

    pub fn last_visit(&self) -> Option<&str> {
        self.data.last_visit.as_deref()
    }

    /// Stores the visit counter and timestamp.
    pub fn set_visit_state(&mut self, visits: i64, last_visit: String) {
        self.data.visits = Some(visits);
        self.data.last_visit = Some(last_visit);
        self.modified = true;
    }

    /// Binds the session to a user under a new key.
    pub fn login(&mut self, user_id: i64) {
        self.cycle_key();
        self.data.user_id = Some(user_id);
    }

    /// Drops all session values and the current key.
    pub fn flush(&mut self) {
        self.cycle_key();
        self.data = SessionData::default();
    }

    /// Records the key the session was persisted under.
    pub fn mark_saved(&mut self, key: String) {
        self.key = Some(key);
        self.stale_key = None;
        self.modified = false;
    }

    fn cycle_key(&mut self) {
        if let Some(old) = self.key.take() {
            self.stale_key = Some(old);
        }
        self.modified = true;
    }
}
