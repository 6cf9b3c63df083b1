//! Credential store
//!
//! A single SQLite table of `(username, password)` pairs. Passwords are
//! kept as given and usernames are not unique.

use crate::core::Result;
use rusqlite::{params, Connection};
use std::path::Path;

/// Account database
pub struct CredentialStore {
    conn: Connection,
}

impl CredentialStore {
    /// Open (or create) the store at `path`
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;

        let store = Self { conn };
        store.init_schema()?;

        log::info!("Credential store opened at {}", path.display());
        Ok(store)
    }

    /// Open a store that lives only as long as this value
    pub fn open_in_memory() -> Result<Self> {
        let store = Self {
            conn: Connection::open_in_memory()?,
        };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> Result<()> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS users (username TEXT, password TEXT);",
        )?;
        Ok(())
    }

    /// Add an account. Duplicate usernames are accepted.
    pub fn create_account(&self, username: &str, password: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO users (username, password) VALUES (?1, ?2)",
            params![username, password],
        )?;

        log::info!("Created account for '{}'", username);
        Ok(())
    }

    /// True when some row matches both username and password
    pub fn verify_credentials(&self, username: &str, password: &str) -> Result<bool> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM users WHERE username = ?1 AND password = ?2",
            params![username, password],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    /// Number of stored accounts, duplicates included
    pub fn account_count(&self) -> Result<i64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_and_verify() {
        let store = CredentialStore::open_in_memory().unwrap();
        store.create_account("alice", "secret").unwrap();

        assert!(store.verify_credentials("alice", "secret").unwrap());
        assert!(!store.verify_credentials("alice", "wrong").unwrap());
        assert!(!store.verify_credentials("bob", "secret").unwrap());
    }

    #[test]
    fn test_empty_store_rejects_everything() {
        let store = CredentialStore::open_in_memory().unwrap();
        assert!(!store.verify_credentials("", "").unwrap());
        assert_eq!(store.account_count().unwrap(), 0);
    }

    #[test]
    fn test_duplicate_usernames_allowed() {
        let store = CredentialStore::open_in_memory().unwrap();
        store.create_account("alice", "one").unwrap();
        store.create_account("alice", "two").unwrap();

        assert_eq!(store.account_count().unwrap(), 2);
        assert!(store.verify_credentials("alice", "one").unwrap());
        assert!(store.verify_credentials("alice", "two").unwrap());
    }

    #[test]
    fn test_reopen_file_keeps_accounts() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data").join("users.db");

        {
            let store = CredentialStore::open(&path).unwrap();
            store.create_account("carol", "pw").unwrap();
        }

        let store = CredentialStore::open(&path).unwrap();
        assert!(store.verify_credentials("carol", "pw").unwrap());
    }
}
