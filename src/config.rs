//! Daemon configuration (TOML).
//!
//! ```toml
//! [classifier]
//! swipe_threshold = 70.0
//!
//! [source]
//! seat = "seat0"
//!
//! [output]
//! format = "json"
//! ```
//!
//! Every section and key is optional; missing values fall back to the defaults.

use crate::classifier::{Thresholds, SWIPE_THRESHOLD};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub classifier: ClassifierConfig,
    pub source: SourceConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Minimum `|dx - dy|` (unaccelerated units) for a swipe to fire.
    pub swipe_threshold: f64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            swipe_threshold: SWIPE_THRESHOLD,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// udev seat to listen on.
    pub seat: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            seat: "seat0".to_string(),
        }
    }
}

/// How fired gestures are written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Structured log lines via `tracing`.
    #[default]
    Log,
    /// One JSON object per line on stdout.
    Json,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
}

impl Config {
    pub fn thresholds(&self) -> Thresholds {
        Thresholds {
            swipe: self.classifier.swipe_threshold,
        }
    }

    pub fn validate(&self) -> Result<()> {
        let t = self.classifier.swipe_threshold;
        if !t.is_finite() || t < 0.0 {
            return Err(Error::Config(format!(
                "swipe_threshold must be a finite, non-negative number, got {t}"
            )));
        }
        if self.source.seat.trim().is_empty() {
            return Err(Error::Config("seat must not be empty".to_string()));
        }
        Ok(())
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Load `path` if given, otherwise the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.classifier.swipe_threshold, 70.0);
        assert_eq!(config.source.seat, "seat0");
        assert_eq!(config.output.format, OutputFormat::Log);
        assert_eq!(config.thresholds(), Thresholds::default());
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let config = Config::from_toml("[output]\nformat = \"json\"\n").unwrap();
        assert_eq!(config.output.format, OutputFormat::Json);
        assert_eq!(config.classifier.swipe_threshold, 70.0);
    }

    #[test]
    fn rejects_negative_threshold() {
        let err = Config::from_toml("[classifier]\nswipe_threshold = -1.0\n").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn rejects_empty_seat() {
        assert!(Config::from_toml("[source]\nseat = \"  \"\n").is_err());
    }

    #[test]
    fn rejects_unknown_format() {
        assert!(Config::from_toml("[output]\nformat = \"xml\"\n").is_err());
    }

    #[test]
    fn serialization_sections() {
        let toml = Config::default().to_toml().unwrap();
        assert!(toml.contains("[classifier]"));
        assert!(toml.contains("[source]"));
        assert!(toml.contains("[output]"));
        assert_eq!(Config::from_toml(&toml).unwrap(), Config::default());
    }

    #[test]
    fn load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[classifier]\nswipe_threshold = 40.0").unwrap();
        let config = Config::load_or_default(Some(file.path())).unwrap();
        assert_eq!(config.thresholds().swipe, 40.0);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = Config::load("/nonexistent/multigest.toml").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
