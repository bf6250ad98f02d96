use serde::Deserialize;
use thiserror::Error;

use crate::track::{BatchPolicy, FootprintParams};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Service configuration. Every section is optional in the YAML file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub web: WebConfig,
    pub catalog: CatalogConfig,
    pub ground_track: GroundTrackSettings,
    pub footprint: FootprintParams,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WebConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> String {
    "0.0.0.0:8080".to_string()
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub base_url: String,
    pub search_timeout_secs: u64,
    pub fetch_timeout_secs: u64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: "https://celestrak.org".to_string(),
            search_timeout_secs: 15,
            fetch_timeout_secs: 10,
        }
    }
}

/// Defaults applied when a ground-track request leaves a field out.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct GroundTrackSettings {
    pub default_duration_secs: f64,
    pub default_step_secs: f64,
    pub batch_policy: BatchPolicy,
}

impl Default for GroundTrackSettings {
    fn default() -> Self {
        Self {
            default_duration_secs: 3600.0,
            default_step_secs: 60.0,
            batch_policy: BatchPolicy::PadWithLast,
        }
    }
}

impl Config {
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        // An empty document deserializes to null, not to an empty mapping.
        if content.trim().is_empty() {
            return Ok(Config::default());
        }
        let config: Config = serde_yaml::from_str(content)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config = Config::from_yaml("").unwrap();
        assert_eq!(config.web.bind, "0.0.0.0:8080");
        assert_eq!(config.catalog.base_url, "https://celestrak.org");
        assert_eq!(config.catalog.search_timeout_secs, 15);
        assert_eq!(config.catalog.fetch_timeout_secs, 10);
        assert_eq!(config.ground_track.default_step_secs, 60.0);
        assert_eq!(config.footprint, FootprintParams::default());
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = Config::from_yaml(
            r#"
web:
  bind: "127.0.0.1:9000"
ground_track:
  batch_policy: fail_on_mismatch
footprint:
  fov_deg: 45
"#,
        )
        .unwrap();

        assert_eq!(config.web.bind, "127.0.0.1:9000");
        assert_eq!(config.ground_track.batch_policy, BatchPolicy::FailOnMismatch);
        assert_eq!(config.ground_track.default_duration_secs, 3600.0);
        assert_eq!(config.footprint.fov_deg, 45.0);
        assert_eq!(config.footprint.polygon_points, 16);
    }

    #[test]
    fn unknown_policy_is_an_error() {
        assert!(matches!(
            Config::from_yaml("ground_track:\n  batch_policy: sometimes\n"),
            Err(ConfigError::Yaml(_))
        ));
    }
}
