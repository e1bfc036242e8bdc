//! Session bootstrap - turn participant metadata into ready-to-speak prompts
//!
//! The voice-agent host hands over the participant that joined the call. Its
//! display name is the user identifier and two of its attributes carry the
//! greeting and the system prompt templates. Each call to
//! [`SessionBootstrap::prepare`] builds a fresh [`VariableHandler`], so one
//! bootstrap can serve many sessions without sharing a variable table.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::observer::{LogObserver, ResolveObserver};
use crate::profile::DEFAULT_PROFILE_PATH;
use crate::variables::{DEFAULT_IDENTITY_VARIABLE, VariableHandler, VariableMode};

/// Participant attribute holding the greeting template
pub const FIRST_MESSAGE_ATTRIBUTE: &str = "first message";

/// Participant attribute holding the system prompt template
pub const SYSTEM_PROMPT_ATTRIBUTE: &str = "system_prompt";

/// User identifier used when the participant has no name
pub const DEFAULT_USER: &str = "there";

/// Greeting used when the participant carries none
pub const DEFAULT_GREETING: &str = "Hello {user_name}";

/// Spoken when the user goes quiet mid-call
pub const DEFAULT_INACTIVITY_PROMPT: &str = "Hey, are you still there?";

/// The participant that joined the call, as reported by the host
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Participant {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub attributes: HashMap<String, String>,
}

impl Participant {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            attributes: HashMap::new(),
        }
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// The user identifier, or `fallback` when the name is missing or blank
    pub fn user<'a>(&'a self, fallback: &'a str) -> &'a str {
        match self.name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => fallback,
        }
    }

    pub fn first_message(&self) -> Option<&str> {
        self.attributes.get(FIRST_MESSAGE_ATTRIBUTE).map(String::as_str)
    }

    pub fn system_prompt(&self) -> Option<&str> {
        self.attributes.get(SYSTEM_PROMPT_ATTRIBUTE).map(String::as_str)
    }
}

/// How sessions are bootstrapped
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSettings {
    pub profile_path: PathBuf,
    pub identity_variable: String,
    pub mode: VariableMode,
    pub default_user: String,
    /// `None` leaves a participant without a greeting silent
    pub default_greeting: Option<String>,
    pub inactivity_prompt: String,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            profile_path: PathBuf::from(DEFAULT_PROFILE_PATH),
            identity_variable: DEFAULT_IDENTITY_VARIABLE.to_string(),
            mode: VariableMode::default(),
            default_user: DEFAULT_USER.to_string(),
            default_greeting: Some(DEFAULT_GREETING.to_string()),
            inactivity_prompt: DEFAULT_INACTIVITY_PROMPT.to_string(),
        }
    }
}

/// Everything the host needs to start speaking
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionPrompts {
    pub user: String,
    /// Handed to text-to-speech as the opening line
    pub greeting: String,
    /// Handed to the LLM as its instructions
    pub instructions: String,
    pub inactivity_prompt: String,
}

/// Prepares prompts for each new session
pub struct SessionBootstrap<O: ResolveObserver + Clone = LogObserver> {
    settings: SessionSettings,
    observer: O,
}

impl SessionBootstrap {
    pub fn new(settings: SessionSettings) -> Self {
        Self::with_observer(settings, LogObserver)
    }
}

impl<O: ResolveObserver + Clone> SessionBootstrap<O> {
    pub fn with_observer(settings: SessionSettings, observer: O) -> Self {
        Self { settings, observer }
    }

    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    /// Resolve the participant's templates against the profile store
    pub fn prepare(&self, participant: &Participant) -> SessionPrompts {
        let user = participant.user(&self.settings.default_user).to_string();
        let first_message = participant
            .first_message()
            .or(self.settings.default_greeting.as_deref());

        log::info!("Preparing session prompts for user '{}'", user);

        let mut handler = VariableHandler::with_observer(self.observer.clone())
            .with_identity_variable(self.settings.identity_variable.clone())
            .with_mode(self.settings.mode);
        let (greeting, instructions) = handler.load_and_resolve(
            &user,
            first_message,
            participant.system_prompt(),
            &self.settings.profile_path,
        );

        SessionPrompts {
            user,
            greeting,
            instructions,
            inactivity_prompt: self.settings.inactivity_prompt.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::NullObserver;
    use tempfile::TempDir;

    fn create_bootstrap(temp_dir: &TempDir, store: &str) -> SessionBootstrap<NullObserver> {
        let profile_path = temp_dir.path().join("user_data.json");
        fs::write(&profile_path, store).unwrap();
        let settings = SessionSettings {
            profile_path,
            ..Default::default()
        };
        SessionBootstrap::with_observer(settings, NullObserver)
    }

    #[test]
    fn test_participant_from_json() {
        let participant = Participant::from_json_str(
            r#"{"name": "bob", "attributes": {"first message": "Hi {user_name}", "system_prompt": "Be brief"}}"#,
        )
        .unwrap();
        assert_eq!(participant.name.as_deref(), Some("bob"));
        assert_eq!(participant.first_message(), Some("Hi {user_name}"));
        assert_eq!(participant.system_prompt(), Some("Be brief"));
    }

    #[test]
    fn test_participant_missing_fields() {
        let participant = Participant::from_json_str("{}").unwrap();
        assert!(participant.name.is_none());
        assert!(participant.attributes.is_empty());
    }

    #[test]
    fn test_participant_rejects_non_string_attributes() {
        assert!(Participant::from_json_str(r#"{"attributes": {"system_prompt": 5}}"#).is_err());
    }

    #[test]
    fn test_participant_user_fallback() {
        assert_eq!(Participant::default().user(DEFAULT_USER), "there");
        assert_eq!(Participant::new("  ").user(DEFAULT_USER), "there");
        assert_eq!(Participant::new("alice").user(DEFAULT_USER), "alice");
    }

    #[test]
    fn test_prepare_resolves_both_prompts() {
        let temp_dir = TempDir::new().unwrap();
        let bootstrap = create_bootstrap(&temp_dir, r#"{"bob": {"policy_number": "P123", "excess_amt": 500}}"#);
        let participant = Participant::new("bob")
            .with_attribute(FIRST_MESSAGE_ATTRIBUTE, "Hi {user_name}, about policy {policy_number}")
            .with_attribute(SYSTEM_PROMPT_ATTRIBUTE, "Excess is {excess_amt}");

        let prompts = bootstrap.prepare(&participant);
        assert_eq!(prompts.user, "bob");
        assert_eq!(prompts.greeting, "Hi bob, about policy P123");
        assert_eq!(prompts.instructions, "Excess is 500");
        assert_eq!(prompts.inactivity_prompt, DEFAULT_INACTIVITY_PROMPT);
    }

    #[test]
    fn test_prepare_default_greeting() {
        let temp_dir = TempDir::new().unwrap();
        let bootstrap = create_bootstrap(&temp_dir, "{}");

        let prompts = bootstrap.prepare(&Participant::default());
        assert_eq!(prompts.user, "there");
        assert_eq!(prompts.greeting, "Hello there");
        assert_eq!(prompts.instructions, "");
    }

    #[test]
    fn test_prepare_without_default_greeting() {
        let temp_dir = TempDir::new().unwrap();
        let mut bootstrap = create_bootstrap(&temp_dir, "{}");
        bootstrap.settings.default_greeting = None;

        let prompts = bootstrap.prepare(&Participant::new("alice"));
        assert_eq!(prompts.greeting, "");
    }

    #[test]
    fn test_prepare_is_independent_per_session() {
        let temp_dir = TempDir::new().unwrap();
        let bootstrap = create_bootstrap(&temp_dir, r#"{"bob": {"policy_number": "P123"}}"#);
        let template = "Policy {policy_number}";

        let bob = bootstrap.prepare(&Participant::new("bob").with_attribute(FIRST_MESSAGE_ATTRIBUTE, template));
        let carol = bootstrap.prepare(&Participant::new("carol").with_attribute(FIRST_MESSAGE_ATTRIBUTE, template));
        assert_eq!(bob.greeting, "Policy P123");
        assert_eq!(carol.greeting, "Policy {policy_number}");
    }

    #[test]
    fn test_participant_from_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        assert!(Participant::from_file(temp_dir.path().join("absent.json")).is_err());
    }
}
