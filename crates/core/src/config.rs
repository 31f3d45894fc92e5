use crate::filter::EntryFilter;
use std::env;
use thiserror::Error;

const DEFAULT_LOG_EVENTS: bool = false;

pub const LOG_EVENTS_ENV: &str = "FSVISIT_LOG_EVENTS";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),

    #[error("Failed to parse {field}: {error}")]
    ParseError { field: String, error: String },
}

/// Settings fixed at visitor construction
#[derive(Debug, Clone)]
pub struct VisitorConfig {
    pub root_path: String,
    /// Required by `search`, ignored by `list_all`
    pub filter: Option<EntryFilter>,
    /// Emit an `[EVENT]` line for every notification
    pub log_events: bool,
}

impl VisitorConfig {
    pub fn new(root_path: impl Into<String>) -> Self {
        Self {
            root_path: root_path.into(),
            filter: None,
            log_events: DEFAULT_LOG_EVENTS,
        }
    }

    /// Reads `FSVISIT_LOG_EVENTS` (true/false, 1/0, yes/no, on/off) for the logging flag
    pub fn from_env(root_path: impl Into<String>) -> Result<Self, ConfigError> {
        let log_events = match env::var(LOG_EVENTS_ENV) {
            Ok(value) => parse_flag(&value).ok_or_else(|| ConfigError::ParseError {
                field: LOG_EVENTS_ENV.to_string(),
                error: format!(
                    "invalid value '{}', expected one of: true, false, 1, 0, yes, no, on, off",
                    value
                ),
            })?,
            Err(_) => DEFAULT_LOG_EVENTS,
        };

        Ok(Self {
            log_events,
            ..Self::new(root_path)
        })
    }

    pub fn with_filter(mut self, filter: EntryFilter) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn with_log_events(mut self, log_events: bool) -> Self {
        self.log_events = log_events;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.root_path.trim().is_empty() {
            return Err(ConfigError::ValidationFailed(
                "Target folder path must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    struct EnvGuard {
        key: String,
        old_value: Option<String>,
    }

    impl EnvGuard {
        fn set(key: &str, value: &str) -> Self {
            let old_value = env::var(key).ok();
            env::set_var(key, value);
            Self {
                key: key.to_string(),
                old_value,
            }
        }

        fn unset(key: &str) -> Self {
            let old_value = env::var(key).ok();
            env::remove_var(key);
            Self {
                key: key.to_string(),
                old_value,
            }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            match &self.old_value {
                Some(v) => env::set_var(&self.key, v),
                None => env::remove_var(&self.key),
            }
        }
    }

    #[test]
    fn test_new_defaults() {
        let config = VisitorConfig::new("/r");
        assert_eq!(config.root_path, "/r");
        assert!(config.filter.is_none());
        assert_eq!(config.log_events, DEFAULT_LOG_EVENTS);
    }

    #[test]
    fn test_builders() {
        let config = VisitorConfig::new("/r")
            .with_filter(EntryFilter::accept_all())
            .with_log_events(true);
        assert!(config.filter.is_some());
        assert!(config.log_events);
    }

    #[test]
    #[serial]
    fn test_from_env_default() {
        let _guard = EnvGuard::unset(LOG_EVENTS_ENV);
        let config = VisitorConfig::from_env("/r").unwrap();
        assert!(!config.log_events);
    }

    #[test]
    #[serial]
    fn test_from_env_enabled() {
        let _guard = EnvGuard::set(LOG_EVENTS_ENV, "TRUE");
        let config = VisitorConfig::from_env("/r").unwrap();
        assert!(config.log_events);
    }

    #[test]
    #[serial]
    fn test_from_env_numeric_and_word_flags() {
        for (value, expected) in [("1", true), ("yes", true), ("On", true), ("0", false), ("no", false)] {
            let _guard = EnvGuard::set(LOG_EVENTS_ENV, value);
            assert_eq!(VisitorConfig::from_env("/r").unwrap().log_events, expected, "{}", value);
        }
    }

    #[test]
    #[serial]
    fn test_from_env_invalid() {
        let _guard = EnvGuard::set(LOG_EVENTS_ENV, "sometimes");
        let err = VisitorConfig::from_env("/r").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
        assert!(err.to_string().contains(LOG_EVENTS_ENV));
    }

    #[test]
    fn test_validate_empty_root() {
        assert!(VisitorConfig::new("  ").validate().is_err());
        assert!(VisitorConfig::new("/r").validate().is_ok());
    }
}
