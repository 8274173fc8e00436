use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::core::{Ranker, TierBoundaries, DEFAULT_PLAUSIBLE_RATIO};
use crate::models::ReferencePoint;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub dataset: DatasetSettings,
    #[serde(default)]
    pub map: MapSettings,
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatasetSettings {
    #[serde(default = "default_dataset_path")]
    pub path: PathBuf,
}

impl Default for DatasetSettings {
    fn default() -> Self {
        Self {
            path: default_dataset_path(),
        }
    }
}

fn default_dataset_path() -> PathBuf { PathBuf::from("data/schools.json") }

/// Where the draggable reference marker starts
#[derive(Debug, Clone, Deserialize)]
pub struct MapSettings {
    #[serde(default = "default_initial_latitude")]
    pub initial_latitude: f64,
    #[serde(default = "default_initial_longitude")]
    pub initial_longitude: f64,
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            initial_latitude: default_initial_latitude(),
            initial_longitude: default_initial_longitude(),
        }
    }
}

fn default_initial_latitude() -> f64 { 51.0876 }
fn default_initial_longitude() -> f64 { 1.161034 }

/// Tier boundaries and plausibility cutoff, as distance/radius ratios
#[derive(Debug, Clone, Deserialize)]
pub struct MatchingSettings {
    #[serde(default = "default_great_below")]
    pub great_below: f64,
    #[serde(default = "default_okay_below")]
    pub okay_below: f64,
    #[serde(default = "default_warn_below")]
    pub warn_below: f64,
    #[serde(default = "default_plausible_ratio")]
    pub plausible_ratio: f64,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            great_below: default_great_below(),
            okay_below: default_okay_below(),
            warn_below: default_warn_below(),
            plausible_ratio: default_plausible_ratio(),
        }
    }
}

fn default_great_below() -> f64 { 0.33 }
fn default_okay_below() -> f64 { 0.9 }
fn default_warn_below() -> f64 { 1.2 }
fn default_plausible_ratio() -> f64 { DEFAULT_PLAUSIBLE_RATIO }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "compact".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with SCHOOL_FINDER)
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., SCHOOL_FINDER__MATCHING__PLAUSIBLE_RATIO -> matching.plausible_ratio
            .add_source(environment())
            .build()?;

        Self::finish(settings)
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(environment())
            .build()?;

        Self::finish(settings)
    }

    /// Parse configuration from TOML text, without environment overrides
    pub fn from_toml_str(toml: &str) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?;

        Self::finish(settings)
    }

    fn finish(settings: Config) -> Result<Self, ConfigError> {
        let settings: Self = settings.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject settings the ranking pipeline cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.tier_boundaries().is_valid() {
            return Err(ConfigError::Message(format!(
                "matching tier boundaries must be positive and increasing, got {} / {} / {}",
                self.matching.great_below, self.matching.okay_below, self.matching.warn_below
            )));
        }

        let cutoff = self.matching.plausible_ratio;
        if !cutoff.is_finite() || cutoff <= 0.0 {
            return Err(ConfigError::Message(format!(
                "matching.plausible_ratio must be a positive number, got {}",
                cutoff
            )));
        }

        if !self.initial_reference().coordinates().is_valid() {
            return Err(ConfigError::Message(format!(
                "initial reference point ({}, {}) is out of range",
                self.map.initial_latitude, self.map.initial_longitude
            )));
        }

        Ok(())
    }

    pub fn tier_boundaries(&self) -> TierBoundaries {
        TierBoundaries {
            great_below: self.matching.great_below,
            okay_below: self.matching.okay_below,
            warn_below: self.matching.warn_below,
        }
    }

    pub fn ranker(&self) -> Ranker {
        Ranker::new(self.tier_boundaries(), self.matching.plausible_ratio)
    }

    pub fn initial_reference(&self) -> ReferencePoint {
        ReferencePoint::new(self.map.initial_latitude, self.map.initial_longitude)
    }
}

fn environment() -> Environment {
    Environment::with_prefix("SCHOOL_FINDER")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}
