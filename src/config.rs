//! Configuration management for Span Annotator

use serde::Deserialize;
use std::env;

use crate::html::HighlightConfig;

/// Server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub session: SessionConfig,
    pub highlight: HighlightConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// Note used when a commit does not supply one
    pub default_note: String,
    pub max_sessions: usize,
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {name}: {value}")]
    InvalidValue { name: &'static str, value: String },
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 3000,
            },
            session: SessionConfig {
                default_note: "Sample annotation note".to_string(),
                max_sessions: 1024,
            },
            highlight: HighlightConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from `ANNOTATOR_*` environment variables
    ///
    /// Unset variables keep their defaults; set but unparsable ones are errors.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Config::default();

        if let Ok(host) = env::var("ANNOTATOR_HOST") {
            config.server.host = host;
        }
        config.server.port = parse_var("ANNOTATOR_PORT", config.server.port)?;

        if let Ok(note) = env::var("ANNOTATOR_DEFAULT_NOTE") {
            config.session.default_note = note;
        }
        config.session.max_sessions =
            parse_var("ANNOTATOR_MAX_SESSIONS", config.session.max_sessions)?;

        let highlight = &mut config.highlight;
        if let Ok(prefix) = env::var("ANNOTATOR_HIGHLIGHT_CLASS") {
            highlight.class_prefix = prefix;
        }
        highlight.base_opacity = parse_var("ANNOTATOR_BASE_OPACITY", highlight.base_opacity)?;
        highlight.opacity_step = parse_var("ANNOTATOR_OPACITY_STEP", highlight.opacity_step)?;
        highlight.max_opacity = parse_var("ANNOTATOR_MAX_OPACITY", highlight.max_opacity)?;

        Ok(config)
    }
}

fn parse_var<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { name, value }),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();

        assert_eq!(config.server.port, 3000);
        assert_eq!(config.session.default_note, "Sample annotation note");
        assert!((config.highlight.max_opacity - 1.0).abs() < f32::EPSILON);
    }

    // Variable names are unique to each test so parallel tests do not race
    #[test]
    fn test_parse_var_unset_uses_default() {
        assert_eq!(parse_var("ANNOTATOR_TEST_UNSET_PORT", 8080u16).unwrap(), 8080);
    }

    #[test]
    fn test_parse_var_set() {
        env::set_var("ANNOTATOR_TEST_SET_PORT", " 4000 ");
        assert_eq!(parse_var("ANNOTATOR_TEST_SET_PORT", 3000u16).unwrap(), 4000);
    }

    #[test]
    fn test_parse_var_invalid() {
        env::set_var("ANNOTATOR_TEST_BAD_PORT", "not-a-port");
        let err = parse_var("ANNOTATOR_TEST_BAD_PORT", 3000u16).unwrap_err();

        assert!(err.to_string().contains("ANNOTATOR_TEST_BAD_PORT"));
    }

    // Only test that calls `from_env`, so these variables are not shared
    #[test]
    fn test_from_env_reads_highlight_settings() {
        env::set_var("ANNOTATOR_HIGHLIGHT_CLASS", "note-mark");
        env::set_var("ANNOTATOR_OPACITY_STEP", "0.05");

        let config = Config::from_env().unwrap();

        assert_eq!(config.highlight.class_prefix, "note-mark");
        assert!((config.highlight.opacity_step - 0.05).abs() < 1e-6);
        assert!((config.highlight.base_opacity - 0.2).abs() < 1e-6);
    }
}
