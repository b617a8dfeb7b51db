//! Runtime configuration for the BONGO API client.
//!
//! Values come from the process environment (optionally seeded from a
//! `.env` file by the binary):
//!
//! | Variable        | Required | Default                  |
//! |-----------------|----------|--------------------------|
//! | `BONGO_API_KEY` | yes      |                          |
//! | `BONGO_API_URL` | no       | `https://api.ebongo.org` |

use anyhow::{Context, Result, bail};
use reqwest::Url;

pub const DEFAULT_BASE_URL: &str = "https://api.ebongo.org";
pub const API_KEY_VAR: &str = "BONGO_API_KEY";
pub const BASE_URL_VAR: &str = "BONGO_API_URL";

#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: Url,
    pub api_key: String,
}

impl Config {
    /// Loads the config from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Loads the config through `lookup`, which maps a variable name to its value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(API_KEY_VAR)
            .filter(|key| !key.trim().is_empty())
            .with_context(|| format!("{API_KEY_VAR} must be set"))?;

        let raw_url = lookup(BASE_URL_VAR).unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let base_url = Url::parse(&raw_url)
            .with_context(|| format!("{BASE_URL_VAR} is not a valid URL: '{raw_url}'"))?;
        if base_url.cannot_be_a_base() {
            bail!("{BASE_URL_VAR} must be a hierarchical URL, got '{raw_url}'");
        }

        Ok(Self { base_url, api_key })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults_base_url() {
        let config = Config::from_lookup(lookup_from(&[(API_KEY_VAR, "secret")])).unwrap();
        assert_eq!(config.api_key, "secret");
        assert_eq!(config.base_url.as_str(), "https://api.ebongo.org/");
    }

    #[test]
    fn test_custom_base_url() {
        let config = Config::from_lookup(lookup_from(&[
            (API_KEY_VAR, "secret"),
            (BASE_URL_VAR, "http://127.0.0.1:8080/v2"),
        ]))
        .unwrap();
        assert_eq!(config.base_url.as_str(), "http://127.0.0.1:8080/v2");
    }

    #[test]
    fn test_missing_api_key() {
        let err = Config::from_lookup(lookup_from(&[])).unwrap_err();
        assert!(err.to_string().contains(API_KEY_VAR));
    }

    #[test]
    fn test_blank_api_key() {
        assert!(Config::from_lookup(lookup_from(&[(API_KEY_VAR, "  ")])).is_err());
    }

    #[test]
    fn test_invalid_base_url() {
        let result = Config::from_lookup(lookup_from(&[
            (API_KEY_VAR, "secret"),
            (BASE_URL_VAR, "not a url"),
        ]));
        assert!(result.is_err());

        let result = Config::from_lookup(lookup_from(&[
            (API_KEY_VAR, "secret"),
            (BASE_URL_VAR, "mailto:someone@example.com"),
        ]));
        assert!(result.is_err());
    }
}
