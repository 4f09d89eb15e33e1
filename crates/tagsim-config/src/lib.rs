// SPDX-License-Identifier: GPL-3.0-or-later
use std::path::Path;

use anyhow::{bail, Result};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use tagsim_core::ComparisonWeights;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{name} must be within [0.0, 1.0], got {value}")]
    ThresholdOutOfRange { name: &'static str, value: f32 },

    #[error("weight for {tag} must be a non-negative number, got {weight}")]
    InvalidWeight { tag: String, weight: f32 },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    pub log_level: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Thresholds and weights used when matching files against candidates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchingConfig {
    /// Minimum similarity for a file to be attached to a candidate track.
    pub track_matching_threshold: f32,
    /// Minimum metadata comparison score for a file to count as matching a release track.
    pub file_lookup_threshold: f32,
    /// Tags left out of metadata comparison (`~length` skips track length).
    pub compare_ignore_tags: Vec<String>,
    pub weights: ComparisonWeights,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            track_matching_threshold: 0.4,
            file_lookup_threshold: 0.7,
            compare_ignore_tags: Vec::new(),
            weights: ComparisonWeights::default(),
        }
    }
}

impl MatchingConfig {
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        for (name, value) in [
            ("track_matching_threshold", self.track_matching_threshold),
            ("file_lookup_threshold", self.file_lookup_threshold),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::ThresholdOutOfRange { name, value });
            }
        }

        let weights = self
            .weights
            .tags
            .iter()
            .map(|entry| (entry.tag.as_str(), entry.weight))
            .chain(std::iter::once(("~length", self.weights.length)));
        for (tag, weight) in weights {
            if !weight.is_finite() || weight < 0.0 {
                return Err(ConfigError::InvalidWeight {
                    tag: tag.to_string(),
                    weight,
                });
            }
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    pub telemetry: TelemetryConfig,
    pub matching: MatchingConfig,
}

/// Load configuration from defaults, optional TOML file, and environment overrides (prefix: TAGSIM_).
pub fn load(config_path: Option<&Path>) -> Result<AppConfig> {
    let mut figment = Figment::from(Serialized::defaults(AppConfig::default()));

    if let Some(path) = config_path {
        if !path.is_file() {
            bail!("configuration file not found: {}", path.display());
        }
        figment = figment.merge(Toml::file(path));
    }

    figment = figment.merge(Env::prefixed("TAGSIM_").split("__"));

    let config: AppConfig = figment.extract()?;
    config.matching.validate()?;
    info!(target: "config", "configuration loaded");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;
    use std::fs;

    #[test]
    fn defaults_are_valid() {
        let config = AppConfig::default();
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(config.matching.track_matching_threshold, 0.4);
        assert_eq!(config.matching.weights.tags.len(), 7);
        assert!(config.matching.validate().is_ok());
    }

    #[test]
    fn toml_file_overrides_defaults() {
        let dir = tempfile::tempdir().expect("temp dir should be created");
        let path = dir.path().join("tagsim.toml");
        fs::write(
            &path,
            r#"
[telemetry]
log_level = "debug"

[matching]
track_matching_threshold = 0.55
compare_ignore_tags = ["~length", "totaldiscs"]
"#,
        )
        .expect("config file should be written");

        let config = load(Some(&path)).expect("config should load");
        assert_eq!(config.telemetry.log_level, "debug");
        assert_eq!(config.matching.track_matching_threshold, 0.55);
        assert_eq!(config.matching.file_lookup_threshold, 0.7);
        assert_eq!(config.matching.compare_ignore_tags, vec!["~length", "totaldiscs"]);
        assert_eq!(config.matching.weights, ComparisonWeights::default());
    }

    #[test]
    fn custom_weights_replace_table() {
        let dir = tempfile::tempdir().expect("temp dir should be created");
        let path = dir.path().join("tagsim.toml");
        fs::write(
            &path,
            r#"
[matching.weights]
length = 10.0
tags = [
    { tag = "title", weight = 13.0 },
    { tag = "artist", weight = 4.0 },
]
"#,
        )
        .expect("config file should be written");

        let config = load(Some(&path)).expect("config should load");
        assert_eq!(config.matching.weights.length, 10.0);
        assert_eq!(config.matching.weights.tags.len(), 2);
        assert_eq!(config.matching.weights.tags[0].tag, "title");
    }

    #[test]
    fn out_of_range_threshold_is_rejected() {
        let dir = tempfile::tempdir().expect("temp dir should be created");
        let path = dir.path().join("tagsim.toml");
        fs::write(&path, "[matching]\nfile_lookup_threshold = 1.5\n")
            .expect("config file should be written");

        let err = load(Some(&path)).expect_err("threshold above 1.0 should fail");
        assert!(err.to_string().contains("file_lookup_threshold"));
    }

    #[test]
    fn missing_config_file_is_an_error() {
        let dir = tempfile::tempdir().expect("temp dir should be created");
        let path = dir.path().join("typo.toml");

        let err = load(Some(&path)).expect_err("missing file should fail");
        assert!(err.to_string().contains("typo.toml"));
    }

    #[test]
    fn environment_overrides_defaults_and_file() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "tagsim.toml",
                r#"
[telemetry]
log_level = "warn"

[matching]
track_matching_threshold = 0.3
file_lookup_threshold = 0.8
"#,
            )?;
            jail.set_env("TAGSIM_MATCHING__TRACK_MATCHING_THRESHOLD", "0.55");
            jail.set_env("TAGSIM_TELEMETRY__LOG_LEVEL", "debug");

            let from_env = load(None).map_err(|err| err.to_string())?;
            assert_eq!(from_env.telemetry.log_level, "debug");
            assert_eq!(from_env.matching.track_matching_threshold, 0.55);
            assert_eq!(from_env.matching.file_lookup_threshold, 0.7);

            let layered = load(Some(Path::new("tagsim.toml"))).map_err(|err| err.to_string())?;
            assert_eq!(layered.telemetry.log_level, "debug");
            assert_eq!(layered.matching.track_matching_threshold, 0.55);
            assert_eq!(layered.matching.file_lookup_threshold, 0.8);
            Ok(())
        });
    }

    #[test]
    fn negative_weight_is_rejected() {
        let mut matching = MatchingConfig::default();
        matching.weights.tags[0].weight = -1.0;
        assert_eq!(
            matching.validate(),
            Err(ConfigError::InvalidWeight {
                tag: "title".to_string(),
                weight: -1.0
            })
        );

        let mut matching = MatchingConfig::default();
        matching.weights.length = f32::NAN;
        assert!(matches!(
            matching.validate(),
            Err(ConfigError::InvalidWeight { .. })
        ));
    }
}
