//! # Configuration
//!
//! Settings are read from the process environment after loading an optional
//! `.env` file with `dotenvy`. Every variable has a default.
//!
//! | Variable | Default |
//! |----------|---------|
//! | `ADMIN_API_ORIGIN` | `http://localhost:5000` |
//! | `ADMIN_CHANNEL_BUFFER` | `32` |
//! | `ADMIN_SLIDESHOW_PERIOD_MS` | `3000` |
//! | `ADMIN_SLIDESHOW_IMAGES` | `images/image1.jpg` … `images/image5.jpg` (comma separated) |

use std::env;
use std::time::Duration;
use tracing::debug;
use url::Url;

pub const API_ORIGIN_VAR: &str = "ADMIN_API_ORIGIN";
pub const CHANNEL_BUFFER_VAR: &str = "ADMIN_CHANNEL_BUFFER";
pub const SLIDESHOW_PERIOD_VAR: &str = "ADMIN_SLIDESHOW_PERIOD_MS";
pub const SLIDESHOW_IMAGES_VAR: &str = "ADMIN_SLIDESHOW_IMAGES";

pub const DEFAULT_API_ORIGIN: &str = "http://localhost:5000";
pub const DEFAULT_CHANNEL_BUFFER: usize = 32;
pub const DEFAULT_SLIDESHOW_PERIOD: Duration = Duration::from_millis(3000);

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("{var} is not a valid URL: {value}")]
    InvalidOrigin { var: &'static str, value: String },

    #[error("{var} must be a positive integer, got {value:?}")]
    InvalidNumber { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConsoleConfig {
    pub api_origin: Url,
    pub channel_buffer: usize,
    pub slideshow_period: Duration,
    pub slideshow_images: Vec<String>,
}

impl ConsoleConfig {
    /// Loads `.env` if present, then reads the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Err(e) = dotenvy::dotenv() {
            debug!(error = %e, "No .env file loaded");
        }
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from any key lookup; unset keys take their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let origin = lookup(API_ORIGIN_VAR).unwrap_or_else(|| DEFAULT_API_ORIGIN.to_string());
        let api_origin = parse_origin(&origin)?;

        let channel_buffer = match lookup(CHANNEL_BUFFER_VAR) {
            Some(value) => positive(CHANNEL_BUFFER_VAR, &value)? as usize,
            None => DEFAULT_CHANNEL_BUFFER,
        };

        let slideshow_period = match lookup(SLIDESHOW_PERIOD_VAR) {
            Some(value) => Duration::from_millis(positive(SLIDESHOW_PERIOD_VAR, &value)?),
            None => DEFAULT_SLIDESHOW_PERIOD,
        };

        let slideshow_images = match lookup(SLIDESHOW_IMAGES_VAR) {
            Some(value) => value
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect(),
            None => default_images(),
        };

        Ok(Self {
            api_origin,
            channel_buffer,
            slideshow_period,
            slideshow_images,
        })
    }

    /// Default settings pointing at a different origin, e.g. a test server.
    pub fn with_origin(api_origin: Url) -> Self {
        Self {
            api_origin,
            channel_buffer: DEFAULT_CHANNEL_BUFFER,
            slideshow_period: DEFAULT_SLIDESHOW_PERIOD,
            slideshow_images: default_images(),
        }
    }
}

fn default_images() -> Vec<String> {
    (1..=5).map(|i| format!("images/image{}.jpg", i)).collect()
}

fn parse_origin(value: &str) -> Result<Url, ConfigError> {
    let invalid = || ConfigError::InvalidOrigin {
        var: API_ORIGIN_VAR,
        value: value.to_string(),
    };
    let url = Url::parse(value).map_err(|_| invalid())?;
    if url.cannot_be_a_base() {
        return Err(invalid());
    }
    Ok(url)
}

fn positive(var: &'static str, value: &str) -> Result<u64, ConfigError> {
    match value.trim().parse::<u64>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ConfigError::InvalidNumber {
            var,
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = ConsoleConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.api_origin.as_str(), "http://localhost:5000/");
        assert_eq!(config.channel_buffer, 32);
        assert_eq!(config.slideshow_period, Duration::from_secs(3));
        assert_eq!(config.slideshow_images.len(), 5);
        assert_eq!(config.slideshow_images[0], "images/image1.jpg");
    }

    #[test]
    fn values_are_read_from_the_lookup() {
        let config = ConsoleConfig::from_lookup(lookup(&[
            (API_ORIGIN_VAR, "https://inventory.example.com"),
            (CHANNEL_BUFFER_VAR, "8"),
            (SLIDESHOW_PERIOD_VAR, "500"),
            (SLIDESHOW_IMAGES_VAR, "a.jpg, b.jpg,,"),
        ]))
        .unwrap();
        assert_eq!(config.api_origin.host_str(), Some("inventory.example.com"));
        assert_eq!(config.channel_buffer, 8);
        assert_eq!(config.slideshow_period, Duration::from_millis(500));
        assert_eq!(config.slideshow_images, vec!["a.jpg", "b.jpg"]);
    }

    #[test]
    fn invalid_values_are_errors() {
        assert!(matches!(
            ConsoleConfig::from_lookup(lookup(&[(API_ORIGIN_VAR, "not a url")])),
            Err(ConfigError::InvalidOrigin { .. })
        ));
        assert!(matches!(
            ConsoleConfig::from_lookup(lookup(&[(CHANNEL_BUFFER_VAR, "0")])),
            Err(ConfigError::InvalidNumber { var: CHANNEL_BUFFER_VAR, .. })
        ));
        assert!(matches!(
            ConsoleConfig::from_lookup(lookup(&[(SLIDESHOW_PERIOD_VAR, "soon")])),
            Err(ConfigError::InvalidNumber { .. })
        ));
    }
}
