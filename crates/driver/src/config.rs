//! Host configuration from environment variables
//!
//! - `COLOR_TETRIS_SEED`: RNG seed (`u32`, default: derived from the clock)
//! - `COLOR_TETRIS_FLASH_MS`: flash half-cycle length in ms (default: 150)
//! - `COLOR_TETRIS_INSTANT_CLEAR`: `1`/`true` removes full rows without flashing
//! - `COLOR_TETRIS_LOG_PATH`: append a JSON-lines event log to this file

use std::time::{SystemTime, UNIX_EPOCH};

use thiserror::Error;

use crate::core::EngineConfig;
use crate::types::{FLASH_HALF_CYCLES, FLASH_INTERVAL_MS};

pub const ENV_SEED: &str = "COLOR_TETRIS_SEED";
pub const ENV_FLASH_MS: &str = "COLOR_TETRIS_FLASH_MS";
pub const ENV_INSTANT_CLEAR: &str = "COLOR_TETRIS_INSTANT_CLEAR";
pub const ENV_LOG_PATH: &str = "COLOR_TETRIS_LOG_PATH";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var}: expected an unsigned 32-bit integer, got {value:?}")]
    InvalidNumber { var: &'static str, value: String },
    #[error("{var}: must be greater than zero")]
    Zero { var: &'static str },
    #[error("{var}: expected 1/0/true/false, got {value:?}")]
    InvalidFlag { var: &'static str, value: String },
}

/// Host-side settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverConfig {
    pub seed: u32,
    pub flash_interval_ms: u32,
    pub instant_clear: bool,
    pub log_path: Option<String>,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            seed: clock_seed(),
            flash_interval_ms: FLASH_INTERVAL_MS,
            instant_clear: false,
            log_path: None,
        }
    }
}

impl DriverConfig {
    /// Create from process environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create from an arbitrary variable lookup (tests, embedding hosts)
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let seed = match get(ENV_SEED) {
            Some(v) => parse_u32(ENV_SEED, &v)?,
            None => clock_seed(),
        };

        let flash_interval_ms = match get(ENV_FLASH_MS) {
            Some(v) => match parse_u32(ENV_FLASH_MS, &v)? {
                0 => return Err(ConfigError::Zero { var: ENV_FLASH_MS }),
                ms => ms,
            },
            None => FLASH_INTERVAL_MS,
        };

        let instant_clear = match get(ENV_INSTANT_CLEAR) {
            Some(v) => parse_flag(ENV_INSTANT_CLEAR, &v)?,
            None => false,
        };

        Ok(Self {
            seed,
            flash_interval_ms,
            instant_clear,
            log_path: get(ENV_LOG_PATH),
        })
    }

    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            flash_half_cycles: if self.instant_clear {
                0
            } else {
                FLASH_HALF_CYCLES
            },
            flash_interval_ms: self.flash_interval_ms,
        }
    }
}

fn parse_u32(var: &'static str, value: &str) -> Result<u32, ConfigError> {
    value.parse().map_err(|_| ConfigError::InvalidNumber {
        var,
        value: value.to_string(),
    })
}

fn parse_flag(var: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.to_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" => Ok(false),
        _ => Err(ConfigError::InvalidFlag {
            var,
            value: value.to_string(),
        }),
    }
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ (d.as_secs() as u32))
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = DriverConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.flash_interval_ms, 150);
        assert!(!config.instant_clear);
        assert_eq!(config.log_path, None);
        assert_eq!(config.engine_config(), EngineConfig::default());
    }

    #[test]
    fn test_all_vars_parsed() {
        let config = DriverConfig::from_lookup(lookup(&[
            (ENV_SEED, "42"),
            (ENV_FLASH_MS, " 80 "),
            (ENV_INSTANT_CLEAR, "TRUE"),
            (ENV_LOG_PATH, "/tmp/events.jsonl"),
        ]))
        .unwrap();

        assert_eq!(config.seed, 42);
        assert_eq!(config.flash_interval_ms, 80);
        assert!(config.instant_clear);
        assert_eq!(config.log_path.as_deref(), Some("/tmp/events.jsonl"));
        assert_eq!(config.engine_config().flash_half_cycles, 0);
    }

    #[test]
    fn test_empty_log_path_disables_log() {
        let config = DriverConfig::from_lookup(lookup(&[(ENV_LOG_PATH, "  ")])).unwrap();
        assert_eq!(config.log_path, None);
    }

    #[test]
    fn test_invalid_values_are_errors() {
        assert_eq!(
            DriverConfig::from_lookup(lookup(&[(ENV_SEED, "abc")])),
            Err(ConfigError::InvalidNumber {
                var: ENV_SEED,
                value: "abc".to_string()
            })
        );
        assert_eq!(
            DriverConfig::from_lookup(lookup(&[(ENV_FLASH_MS, "0")])),
            Err(ConfigError::Zero { var: ENV_FLASH_MS })
        );
        assert!(matches!(
            DriverConfig::from_lookup(lookup(&[(ENV_INSTANT_CLEAR, "maybe")])),
            Err(ConfigError::InvalidFlag { .. })
        ));
    }

    #[test]
    fn test_error_messages_name_the_variable() {
        let err = ConfigError::Zero { var: ENV_FLASH_MS };
        assert_eq!(err.to_string(), "COLOR_TETRIS_FLASH_MS: must be greater than zero");
    }
}
