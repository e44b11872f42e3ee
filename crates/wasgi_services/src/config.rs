//! Host configuration

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Namespace object installed on the guest global scope.
pub const DEFAULT_NAMESPACE: &str = "WebSG";

/// Guest function looked up on every tick.
pub const DEFAULT_UPDATE_HOOK: &str = "onupdate";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Script host settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    /// Global name of the host API namespace.
    pub namespace: String,
    /// Global name of the per-tick guest callback.
    pub update_hook: String,
    /// Also expose the logging module as the global `console`.
    pub console_global: bool,
    pub limits: RuntimeLimits,
}

/// Interpreter resource limits. `None` leaves the interpreter default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeLimits {
    /// Heap limit in bytes.
    pub memory_limit: Option<usize>,
    /// Native stack limit in bytes.
    pub max_stack_size: Option<usize>,
    /// Allocation volume in bytes that triggers a GC pass.
    pub gc_threshold: Option<usize>,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            update_hook: DEFAULT_UPDATE_HOOK.to_string(),
            console_global: true,
            limits: RuntimeLimits::default(),
        }
    }
}

impl HostConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: HostConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&json)?;
        tracing::debug!(path = %path.display(), "loaded host config");
        Ok(config)
    }

    /// Both global names must be plain identifiers the guest can reference.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_identifier("namespace", &self.namespace)?;
        check_identifier("update_hook", &self.update_hook)?;
        if self.limits.memory_limit == Some(0) {
            return Err(ConfigError::Invalid {
                field: "limits.memory_limit",
                reason: "must be greater than zero".into(),
            });
        }
        Ok(())
    }
}

fn check_identifier(field: &'static str, value: &str) -> Result<(), ConfigError> {
    let mut chars = value.chars();
    let valid = match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' || first == '$' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
        }
        _ => false,
    };

    if valid {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("'{value}' is not an identifier"),
        })
    }
}
