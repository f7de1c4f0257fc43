//! Environment variable parsing helpers

use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {var}: {value:?} ({reason})")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },

    #[error("validation error: {0}")]
    Validation(String),
}

/// Read an environment variable, falling back to a default when unset
/// or empty. A set-but-unparsable value is an error, not a fallback.
pub fn var_or<T: FromStr>(name: &'static str, default: T) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    match std::env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => {
            raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
                var: name,
                value: raw,
                reason: e.to_string(),
            })
        }
        _ => Ok(default),
    }
}

/// Read a comma-separated origin list, falling back to a default set
pub fn origins_or(name: &'static str, default: &[&str]) -> Vec<String> {
    match std::env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect(),
        _ => default.iter().map(|s| s.to_string()).collect(),
    }
}

/// Read an optional environment variable, treating empty as unset
pub fn var_opt(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_var_or_default_when_unset() {
        std::env::remove_var("RESCUEGRID_TEST_UNSET");
        let value: f64 = var_or("RESCUEGRID_TEST_UNSET", 1.5).unwrap();
        assert_eq!(value, 1.5);
    }

    #[test]
    fn test_var_or_parses_set_value() {
        std::env::set_var("RESCUEGRID_TEST_SET", "42");
        let value: u32 = var_or("RESCUEGRID_TEST_SET", 7).unwrap();
        assert_eq!(value, 42);
        std::env::remove_var("RESCUEGRID_TEST_SET");
    }

    #[test]
    fn test_var_or_rejects_garbage() {
        std::env::set_var("RESCUEGRID_TEST_BAD", "not-a-number");
        let result: Result<u32, _> = var_or("RESCUEGRID_TEST_BAD", 7);
        assert!(result.is_err());
        std::env::remove_var("RESCUEGRID_TEST_BAD");
    }

    #[test]
    fn test_origins_split_and_trim() {
        std::env::set_var("RESCUEGRID_TEST_ORIGINS", "http://a:3000, http://b:3000 ,");
        let origins = origins_or("RESCUEGRID_TEST_ORIGINS", &["http://default"]);
        assert_eq!(origins, vec!["http://a:3000", "http://b:3000"]);
        std::env::remove_var("RESCUEGRID_TEST_ORIGINS");
    }
}
