//! Variable Handler - Variable table plus template resolution
//!
//! A handler is built for one session: construct it, call
//! [`VariableHandler::load_and_resolve`] once, then drop it. It is not meant to
//! be shared between concurrent sessions.

use std::borrow::Cow;
use std::collections::HashMap;
use std::path::Path;

use regex::Captures;
use serde::{Deserialize, Serialize};

use super::extractor::PlaceholderExtractor;
use super::value::VariableValue;
use crate::error::ProfileError;
use crate::observer::{LogObserver, ResolveObserver};
use crate::profile::{DEFAULT_PROFILE_PATH, ProfileRecord, ProfileStore};

/// Variable that always holds the caller's user identifier
pub const DEFAULT_IDENTITY_VARIABLE: &str = "user_name";

/// Variables populated in [`VariableMode::Fixed`], paired with the profile field
/// each one is read from. `expiry_data` reads `expiry_date`; existing templates
/// reference the variable under that name.
pub const FIXED_FIELDS: [(&str, &str); 5] = [
    ("expiry_data", "expiry_date"),
    ("date_of_birth", "date_of_birth"),
    ("policy_number", "policy_number"),
    ("monthly_premium_amt", "monthly_premium_amt"),
    ("excess_amt", "excess_amt"),
];

/// Which profile fields are copied into the variable table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariableMode {
    /// Only the names the templates actually reference
    #[default]
    Dynamic,
    /// The fixed insurance field set, regardless of template content
    Fixed,
}

/// Holds the variable table and resolves templates against it
pub struct VariableHandler<O: ResolveObserver = LogObserver> {
    variables: HashMap<String, VariableValue>,
    identity_variable: String,
    mode: VariableMode,
    observer: O,
}

impl Default for VariableHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl VariableHandler {
    /// Create a handler that reports through the `log` facade
    pub fn new() -> Self {
        Self::with_observer(LogObserver)
    }
}

impl<O: ResolveObserver> VariableHandler<O> {
    /// Create a handler that reports to `observer`
    pub fn with_observer(observer: O) -> Self {
        Self {
            variables: HashMap::new(),
            identity_variable: DEFAULT_IDENTITY_VARIABLE.to_string(),
            mode: VariableMode::default(),
            observer,
        }
    }

    /// Name the variable that receives the user identifier
    pub fn with_identity_variable(mut self, name: impl Into<String>) -> Self {
        self.identity_variable = name.into();
        self
    }

    pub fn with_mode(mut self, mode: VariableMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn mode(&self) -> VariableMode {
        self.mode
    }

    pub fn identity_variable(&self) -> &str {
        &self.identity_variable
    }

    /// Insert or overwrite a variable
    pub fn set_variable(&mut self, name: impl Into<String>, value: impl Into<VariableValue>) {
        self.variables.insert(name.into(), value.into());
    }

    /// Look up a variable. An explicit `Null` reads the same as never set.
    pub fn get_variable(&self, name: &str) -> Option<&VariableValue> {
        self.variables.get(name).filter(|value| !value.is_null())
    }

    /// Every entry in the table, including explicit nulls, sorted by name
    pub fn variables(&self) -> Vec<(&str, &VariableValue)> {
        let mut entries: Vec<_> = self.variables.iter().map(|(k, v)| (k.as_str(), v)).collect();
        entries.sort_unstable_by_key(|(name, _)| *name);
        entries
    }

    /// Substitute placeholders in `text` with truthy variable values
    ///
    /// Unset or falsy variables leave the literal `{name}` in place. Substituted
    /// content is not scanned again.
    pub fn resolve_text(&self, text: &str) -> String {
        if text.is_empty() {
            return String::new();
        }

        let resolved = PlaceholderExtractor::pattern().replace_all(text, |caps: &Captures| {
            let name = caps.get(1).map_or("", |m| m.as_str());
            match self.get_variable(name) {
                Some(value) if value.is_truthy() => value.to_string(),
                _ => {
                    self.observer.unresolved(name);
                    caps[0].to_string()
                }
            }
        });

        match resolved {
            Cow::Borrowed(unchanged) => unchanged.to_string(),
            Cow::Owned(changed) => changed,
        }
    }

    /// Read the profile store, degrading to an empty store on any failure
    pub fn load_user_data(&self, path: impl AsRef<Path>) -> ProfileStore {
        let path = path.as_ref();
        match ProfileStore::read(path) {
            Ok(store) => store,
            Err(ProfileError::Missing(_)) => {
                self.observer.profile_missing(path);
                ProfileStore::default()
            }
            Err(e) => {
                self.observer.profile_malformed(path, &e);
                ProfileStore::default()
            }
        }
    }

    /// Load `user`'s profile and resolve both templates against it
    ///
    /// Returns `(first_message, system_prompt)`; an absent template resolves to
    /// the empty string. Never fails.
    pub fn load_and_resolve(
        &mut self,
        user: &str,
        first_message: Option<&str>,
        system_prompt: Option<&str>,
        profile_path: impl AsRef<Path>,
    ) -> (String, String) {
        let store = self.load_user_data(profile_path);
        let record = match store.record(user) {
            Some(record) => record.clone(),
            None => {
                self.observer.user_not_found(user);
                ProfileRecord::new()
            }
        };

        match self.mode {
            VariableMode::Dynamic => {
                let templates = first_message.into_iter().chain(system_prompt);
                for name in PlaceholderExtractor::extract_all(templates) {
                    let value = record.get(&name).cloned().unwrap_or_default();
                    self.set_variable(name, value);
                }
            }
            VariableMode::Fixed => {
                for (variable, field) in FIXED_FIELDS {
                    let value = record.get(field).cloned().unwrap_or_default();
                    self.set_variable(variable, value);
                }
            }
        }

        // Identity goes last so a template naming it never sees a profile null
        let identity = self.identity_variable.clone();
        self.set_variable(identity, user);

        let first = first_message.map(|t| self.resolve_text(t)).unwrap_or_default();
        let system = system_prompt.map(|t| self.resolve_text(t)).unwrap_or_default();
        (first, system)
    }

    /// [`load_and_resolve`](Self::load_and_resolve) against `user_data.json`
    /// in the working directory
    pub fn load_and_resolve_default(
        &mut self,
        user: &str,
        first_message: Option<&str>,
        system_prompt: Option<&str>,
    ) -> (String, String) {
        self.load_and_resolve(user, first_message, system_prompt, DEFAULT_PROFILE_PATH)
    }
}
