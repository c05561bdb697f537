use serde::Deserialize;
use std::path::Path;

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct RingSettings {
    #[serde(default = "defaults::capacity")]
    pub capacity: usize,
    #[serde(default)]
    pub policy: PolicyKind,
    #[serde(default = "defaults::log_level")]
    pub log_level: String,
}

/// What a full ring does with one more element.
#[derive(Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PolicyKind {
    /// Evict the element at the far end.
    #[default]
    Overwrite,
    /// Reallocate to a larger capacity.
    Grow,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read '{path}'")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

mod defaults {
    pub fn capacity() -> usize {
        16
    }

    pub fn log_level() -> String {
        "info".into()
    }
}

impl Default for RingSettings {
    fn default() -> Self {
        Self {
            capacity: defaults::capacity(),
            policy: PolicyKind::default(),
            log_level: defaults::log_level(),
        }
    }
}

impl RingSettings {
    pub fn load(path: impl AsRef<Path> + ToString) -> Result<Self, ConfigError> {
        let toml_to_str = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.to_string(),
            source,
        })?;
        Self::from_toml_str(&toml_to_str)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let settings: RingSettings = toml::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Rejects settings that would build a ring unable to hold anything.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.capacity == 0 && self.policy == PolicyKind::Overwrite {
            return Err(ConfigError::Invalid(
                "capacity must be non-zero for the overwrite policy".into(),
            ));
        }
        Ok(())
    }
}
