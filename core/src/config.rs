//! Connection settings for the shortening service.
//!
//! The proxy never reads the environment itself; hosts build a
//! `ShortenerConfig` from whatever configuration system they use.
//! `from_env` covers the common case of `API_BASE_URL` / `API_KEY`.

use crate::error::ConfigError;

pub const API_BASE_URL_VAR: &str = "API_BASE_URL";
pub const API_KEY_VAR: &str = "API_KEY";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortenerConfig {
    pub api_base_url: String,
    pub api_key: String,
}

impl ShortenerConfig {
    pub fn new(api_base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into(),
            api_key: api_key.into(),
        }
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_base_url = lookup(API_BASE_URL_VAR).ok_or(ConfigError::Missing(API_BASE_URL_VAR))?;
        let api_key = lookup(API_KEY_VAR).ok_or(ConfigError::Missing(API_KEY_VAR))?;
        Ok(Self { api_base_url, api_key })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn reads_both_variables() {
        let config =
            ShortenerConfig::from_lookup(lookup(&[("API_BASE_URL", "https://s.io"), ("API_KEY", "k")])).unwrap();
        assert_eq!(config, ShortenerConfig::new("https://s.io", "k"));
    }

    #[test]
    fn missing_base_url_is_reported() {
        let err = ShortenerConfig::from_lookup(lookup(&[("API_KEY", "k")])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("API_BASE_URL")));
    }

    #[test]
    fn missing_key_is_reported() {
        let err = ShortenerConfig::from_lookup(lookup(&[("API_BASE_URL", "https://s.io")])).unwrap_err();
        assert_eq!(err.to_string(), "environment variable API_KEY is not set");
    }
}
