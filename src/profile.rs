//! Profile store - per-user attribute records read from a JSON file
//!
//! The file is an object keyed by user identifier; each value is a flat object
//! of attribute name to scalar. The store is read fresh on every call and never
//! written back.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::error::{ProfileError, Result};
use crate::variables::VariableValue;

/// Default location of the profile store
pub const DEFAULT_PROFILE_PATH: &str = "user_data.json";

/// One user's attributes
pub type ProfileRecord = HashMap<String, VariableValue>;

/// All user records, keyed by user identifier
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileStore {
    users: HashMap<String, ProfileRecord>,
}

impl ProfileStore {
    /// Read and parse the store at `path`, reporting every failure
    pub fn read(path: impl AsRef<Path>) -> std::result::Result<Self, ProfileError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ProfileError::Missing(path.to_path_buf()));
        }

        let content = fs::read_to_string(path).map_err(|source| ProfileError::Unreadable {
            path: path.to_path_buf(),
            source,
        })?;

        let document: Value = serde_json::from_str(&content).map_err(|source| ProfileError::Malformed {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_json(document).ok_or_else(|| ProfileError::NotAnObject(path.to_path_buf()))
    }

    /// Read the store at `path` and return one user's record, if present
    pub fn read_record(path: impl AsRef<Path>, user: &str) -> Result<Option<ProfileRecord>> {
        let mut store = Self::read(path)?;
        Ok(store.users.remove(user))
    }

    /// Build a store from an already-parsed document
    ///
    /// Returns `None` when the top level is not an object. A user whose value is
    /// not an object gets an empty record.
    pub fn from_json(document: Value) -> Option<Self> {
        let Value::Object(entries) = document else {
            return None;
        };

        let users = entries
            .into_iter()
            .map(|(user, record)| {
                let record = match record {
                    Value::Object(fields) => fields
                        .into_iter()
                        .map(|(name, value)| (name, VariableValue::from(value)))
                        .collect(),
                    _ => ProfileRecord::new(),
                };
                (user, record)
            })
            .collect();

        Some(Self { users })
    }

    /// Look up one user's record
    pub fn record(&self, user: &str) -> Option<&ProfileRecord> {
        self.users.get(user)
    }

    /// Add or replace a user's record
    pub fn insert(&mut self, user: impl Into<String>, record: ProfileRecord) {
        self.users.insert(user.into(), record);
    }

    /// User identifiers in the store, sorted
    pub fn users(&self) -> Vec<&str> {
        let mut users: Vec<&str> = self.users.keys().map(String::as_str).collect();
        users.sort_unstable();
        users
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::VoiceVarsError;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    fn write_store(temp_dir: &TempDir, content: &str) -> std::path::PathBuf {
        let path = temp_dir.path().join("user_data.json");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_read_store() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_store(&temp_dir, r#"{"bob": {"policy_number": "P123", "excess_amt": 500}}"#);

        let store = ProfileStore::read(&path).unwrap();
        let record = store.record("bob").unwrap();
        assert_eq!(record.get("policy_number"), Some(&VariableValue::from("P123")));
        assert_eq!(record.get("excess_amt"), Some(&VariableValue::from(500)));
    }

    #[test]
    fn test_read_missing() {
        let temp_dir = TempDir::new().unwrap();
        let result = ProfileStore::read(temp_dir.path().join("absent.json"));
        assert!(matches!(result, Err(ProfileError::Missing(_))));
    }

    #[test]
    fn test_read_malformed() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_store(&temp_dir, "{not json");
        assert!(matches!(ProfileStore::read(&path), Err(ProfileError::Malformed { .. })));
    }

    #[test]
    fn test_read_directory_is_unreadable() {
        let temp_dir = TempDir::new().unwrap();
        let result = ProfileStore::read(temp_dir.path());
        assert!(matches!(result, Err(ProfileError::Unreadable { .. })));
    }

    #[test]
    fn test_read_top_level_array() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_store(&temp_dir, r#"[{"alice": {}}]"#);
        assert!(matches!(ProfileStore::read(&path), Err(ProfileError::NotAnObject(_))));
    }

    #[test]
    fn test_non_object_record_is_empty() {
        let store = ProfileStore::from_json(json!({"alice": "not a record", "bob": null})).unwrap();
        assert!(store.record("alice").unwrap().is_empty());
        assert!(store.record("bob").unwrap().is_empty());
    }

    #[test]
    fn test_users_sorted() {
        let store = ProfileStore::from_json(json!({"carol": {}, "alice": {}, "bob": {}})).unwrap();
        assert_eq!(store.users(), vec!["alice", "bob", "carol"]);
        assert_eq!(store.len(), 3);
        assert!(!store.is_empty());
    }

    #[test]
    fn test_insert_replaces_record() {
        let mut store = ProfileStore::default();
        assert!(store.is_empty());

        let mut record = ProfileRecord::new();
        record.insert("policy_number".to_string(), VariableValue::from("P1"));
        store.insert("dave", record);

        let mut replacement = ProfileRecord::new();
        replacement.insert("policy_number".to_string(), VariableValue::from("P2"));
        store.insert("dave", replacement);

        assert_eq!(
            store.record("dave").unwrap().get("policy_number"),
            Some(&VariableValue::from("P2"))
        );
    }

    #[test]
    fn test_read_record() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_store(&temp_dir, r#"{"bob": {"policy_number": "P123"}}"#);

        let record = ProfileStore::read_record(&path, "bob").unwrap().unwrap();
        assert_eq!(record.get("policy_number"), Some(&VariableValue::from("P123")));
        assert!(ProfileStore::read_record(&path, "carol").unwrap().is_none());
    }

    #[test]
    fn test_read_record_propagates_errors() {
        let temp_dir = TempDir::new().unwrap();
        let result = ProfileStore::read_record(temp_dir.path().join("absent.json"), "bob");
        assert!(matches!(result, Err(VoiceVarsError::Profile(ProfileError::Missing(_)))));
    }

    #[test]
    fn test_missing_user() {
        let store = ProfileStore::from_json(json!({"alice": {}})).unwrap();
        assert!(store.record("carol").is_none());
    }
}
