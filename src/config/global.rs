//! Global configuration.
//!
//! Loaded from ~/.config/voicevars/voicevars.yml or .voicevars.yml

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use voicevars::session::{DEFAULT_GREETING, DEFAULT_INACTIVITY_PROMPT, DEFAULT_USER};
use voicevars::variables::DEFAULT_IDENTITY_VARIABLE;
use voicevars::{DEFAULT_PROFILE_PATH, SessionSettings, VariableMode};

/// Global configuration for voicevars.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GlobalConfig {
    /// Location of the per-user profile store.
    #[serde(rename = "profile-path")]
    pub profile_path: PathBuf,

    /// Variable that receives the user identifier.
    #[serde(rename = "identity-variable")]
    pub identity_variable: String,

    /// Which profile fields are loaded (dynamic or fixed).
    pub mode: VariableMode,

    /// Session bootstrap defaults.
    pub session: SessionConfig,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            profile_path: PathBuf::from(DEFAULT_PROFILE_PATH),
            identity_variable: DEFAULT_IDENTITY_VARIABLE.to_string(),
            mode: VariableMode::default(),
            session: SessionConfig::default(),
        }
    }
}

impl GlobalConfig {
    /// Load configuration with fallback chain.
    ///
    /// Search order:
    /// 1. Explicit path if provided
    /// 2. .voicevars.yml in current directory
    /// 3. ~/.config/voicevars/voicevars.yml
    /// 4. Defaults
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // Explicit path takes precedence
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        // Try project config
        let project_config = PathBuf::from(".voicevars.yml");
        if project_config.exists() {
            match Self::load_from_file(&project_config) {
                Ok(config) => {
                    log::info!("Loaded config from .voicevars.yml");
                    return Ok(config);
                }
                Err(e) => {
                    log::warn!("Failed to load .voicevars.yml: {}", e);
                }
            }
        }

        // Try user config
        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("voicevars").join("voicevars.yml");
            if user_config.exists() {
                match Self::load_from_file(&user_config) {
                    Ok(config) => {
                        log::info!("Loaded config from {}", user_config.display());
                        return Ok(config);
                    }
                    Err(e) => {
                        log::warn!("Failed to load {}: {}", user_config.display(), e);
                    }
                }
            }
        }

        log::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;
        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.identity_variable.trim().is_empty() {
            eyre::bail!("identity-variable must not be empty");
        }
        if self.profile_path.as_os_str().is_empty() {
            eyre::bail!("profile-path must not be empty");
        }
        Ok(())
    }

    /// Session settings, with the profile path optionally overridden.
    pub fn session_settings(&self, profile_override: Option<&Path>) -> SessionSettings {
        SessionSettings {
            profile_path: profile_override.map_or_else(|| self.profile_path.clone(), Path::to_path_buf),
            identity_variable: self.identity_variable.clone(),
            mode: self.mode,
            default_user: self.session.default_user.clone(),
            default_greeting: self.session.default_greeting.clone(),
            inactivity_prompt: self.session.inactivity_prompt.clone(),
        }
    }
}

/// Session bootstrap defaults.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SessionConfig {
    /// User identifier when the participant has no name.
    #[serde(rename = "default-user")]
    pub default_user: String,

    /// Greeting when the participant carries none; null disables it.
    #[serde(rename = "default-greeting")]
    pub default_greeting: Option<String>,

    /// Spoken when the user goes quiet.
    #[serde(rename = "inactivity-prompt")]
    pub inactivity_prompt: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            default_user: DEFAULT_USER.to_string(),
            default_greeting: Some(DEFAULT_GREETING.to_string()),
            inactivity_prompt: DEFAULT_INACTIVITY_PROMPT.to_string(),
        }
    }
}
