//! Runtime configuration.
//!
//! Defaults work out of the box; environment variables override them:
//!
//! | Variable                      | Default   |
//! |-------------------------------|-----------|
//! | `RECONCILE_CHANNEL_CAPACITY`  | `32`      |
//! | `RECONCILE_EXPORT_DIR`        | `export`  |

use std::path::PathBuf;
use thiserror::Error;

pub const CHANNEL_CAPACITY_VAR: &str = "RECONCILE_CHANNEL_CAPACITY";
pub const EXPORT_DIR_VAR: &str = "RECONCILE_EXPORT_DIR";

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("{var} must be a positive integer, got \"{value}\"")]
    InvalidCapacity { var: &'static str, value: String },

    #[error("{0} must not be empty")]
    Empty(&'static str),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SystemConfig {
    /// Request channel capacity of each actor. Senders wait when it is full.
    pub channel_capacity: usize,
    /// Directory CSV exports are written to.
    pub export_dir: PathBuf,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            channel_capacity: 32,
            export_dir: PathBuf::from("export"),
        }
    }
}

impl SystemConfig {
    /// Defaults overridden by the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each variable.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup(CHANNEL_CAPACITY_VAR) {
            config.channel_capacity = value
                .trim()
                .parse()
                .ok()
                .filter(|capacity: &usize| *capacity > 0)
                .ok_or(ConfigError::InvalidCapacity {
                    var: CHANNEL_CAPACITY_VAR,
                    value,
                })?;
        }

        if let Some(value) = lookup(EXPORT_DIR_VAR) {
            if value.trim().is_empty() {
                return Err(ConfigError::Empty(EXPORT_DIR_VAR));
            }
            config.export_dir = PathBuf::from(value);
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_overrides() {
        assert_eq!(
            SystemConfig::from_lookup(lookup(&[])).unwrap(),
            SystemConfig::default()
        );
    }

    #[test]
    fn test_overrides() {
        let config = SystemConfig::from_lookup(lookup(&[
            (CHANNEL_CAPACITY_VAR, " 8 "),
            (EXPORT_DIR_VAR, "/tmp/對帳"),
        ]))
        .unwrap();
        assert_eq!(config.channel_capacity, 8);
        assert_eq!(config.export_dir, PathBuf::from("/tmp/對帳"));
    }

    #[test]
    fn test_invalid_values() {
        for bad in ["0", "-3", "lots"] {
            assert_eq!(
                SystemConfig::from_lookup(lookup(&[(CHANNEL_CAPACITY_VAR, bad)])),
                Err(ConfigError::InvalidCapacity {
                    var: CHANNEL_CAPACITY_VAR,
                    value: bad.to_string(),
                })
            );
        }
        assert_eq!(
            SystemConfig::from_lookup(lookup(&[(EXPORT_DIR_VAR, "")])),
            Err(ConfigError::Empty(EXPORT_DIR_VAR))
        );
    }
}
