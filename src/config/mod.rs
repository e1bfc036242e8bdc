//! Configuration system for voicevars.
//!
//! One YAML file (.voicevars.yml or ~/.config/voicevars/voicevars.yml) sets the
//! profile store location, the identity variable, the variable mode and the
//! session defaults. The profile path can also come from `VOICEVARS_PROFILE`.

use eyre::Result;
use std::path::PathBuf;

pub use self::global::GlobalConfig;

mod global;

/// Config alias used by the binary.
pub type Config = GlobalConfig;

/// Load configuration from the standard search paths and validate it.
pub fn load_config(explicit_path: Option<&PathBuf>) -> Result<Config> {
    let config = GlobalConfig::load(explicit_path)?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_config_rejects_invalid() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("voicevars.yml");
        std::fs::write(&path, "identity-variable: \"\"\n").unwrap();
        assert!(load_config(Some(&path)).is_err());
    }
}
