//! Interactive session state
//!
//! Holds the logged-in flag, the current username, and the tracker whose
//! report is open. Lives for one session and is cleared on logout.

use crate::core::{Error, Result};
use crate::dashboard::TrackerKind;
use crate::db::CredentialStore;
use std::time::Instant;

/// Ephemeral per-session state (not persisted)
pub struct Session {
    /// When the session started
    pub started_at: Instant,
    logged_in: bool,
    username: Option<String>,
    selected_tracker: Option<TrackerKind>,
}

impl Session {
    pub fn new() -> Self {
        Self {
            started_at: Instant::now(),
            logged_in: false,
            username: None,
            selected_tracker: None,
        }
    }

    /// Check credentials and log in on success.
    ///
    /// A failed attempt leaves the session logged out.
    pub fn login(&mut self, store: &CredentialStore, username: &str, password: &str) -> Result<bool> {
        if !store.verify_credentials(username, password)? {
            log::warn!("Incorrect Username/Password for '{}'", username);
            self.logout();
            return Ok(false);
        }

        self.logged_in = true;
        self.username = Some(username.to_string());
        self.selected_tracker = None;
        log::info!("User '{}' logged in", username);
        Ok(true)
    }

    /// Clear all session state
    pub fn logout(&mut self) {
        if let Some(username) = self.username.take() {
            log::info!("User '{}' logged out", username);
        }
        self.logged_in = false;
        self.selected_tracker = None;
    }

    pub fn is_logged_in(&self) -> bool {
        self.logged_in
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub fn selected_tracker(&self) -> Option<TrackerKind> {
        self.selected_tracker
    }

    /// Open the monthly report for `tracker`
    pub fn select_tracker(&mut self, tracker: TrackerKind) -> Result<()> {
        self.require_login()?;
        self.selected_tracker = Some(tracker);
        Ok(())
    }

    /// Close the open report, if any
    pub fn close_report(&mut self) -> Result<()> {
        self.require_login()?;
        self.selected_tracker = None;
        Ok(())
    }

    pub(crate) fn require_login(&self) -> Result<&str> {
        match (&self.username, self.logged_in) {
            (Some(username), true) => Ok(username.as_str()),
            _ => Err(Error::NotLoggedIn),
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with_alice() -> CredentialStore {
        let store = CredentialStore::open_in_memory().unwrap();
        store.create_account("alice", "secret").unwrap();
        store
    }

    #[test]
    fn test_login_success() {
        let store = store_with_alice();
        let mut session = Session::new();

        assert!(session.login(&store, "alice", "secret").unwrap());
        assert!(session.is_logged_in());
        assert_eq!(session.username(), Some("alice"));
    }

    #[test]
    fn test_login_failure_stays_logged_out() {
        let store = store_with_alice();
        let mut session = Session::new();

        assert!(!session.login(&store, "alice", "nope").unwrap());
        assert!(!session.is_logged_in());
        assert_eq!(session.username(), None);
    }

    #[test]
    fn test_tracker_selection_requires_login() {
        let mut session = Session::new();
        assert!(matches!(
            session.select_tracker(TrackerKind::Water),
            Err(Error::NotLoggedIn)
        ));
    }

    #[test]
    fn test_select_close_and_logout() {
        let store = store_with_alice();
        let mut session = Session::new();
        session.login(&store, "alice", "secret").unwrap();

        session.select_tracker(TrackerKind::Transport).unwrap();
        assert_eq!(session.selected_tracker(), Some(TrackerKind::Transport));

        session.close_report().unwrap();
        assert_eq!(session.selected_tracker(), None);

        session.select_tracker(TrackerKind::Water).unwrap();
        session.logout();
        assert!(!session.is_logged_in());
        assert_eq!(session.username(), None);
        assert_eq!(session.selected_tracker(), None);
    }
}
