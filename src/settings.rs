//! # Settings Module
//!
//! ## Purpose
//! Keeps the few knobs of the pipeline in one serializable place: how the Chemkin
//! parser reacts to a bad rate constant, which rate forms it refuses to read,
//! and how verbose the logger is.
//!
//! ## Configuration Format
//! ```json
//! {
//!   "rate_error_policy": "fail",
//!   "unsupported_rate_forms": ["PLOG", "CHEB"],
//!   "log_level": "info",
//!   "log_file": null
//! }
//! ```
//!
//! ## Usage Pattern
//! ```rust, ignore
//! use MechGraph::settings::MechGraphSettings;
//!
//! let settings = MechGraphSettings::load_or_default("mechgraph_config.json");
//! let parser = ChemkinParser::with_settings(&settings);
//! ```
use crate::errors::{MechGraphError, MechGraphResult};
use log::{LevelFilter, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const DEFAULT_CONFIG_FILE: &str = "mechgraph_config.json";

/// what the parser does with a reaction line whose rate tokens are not numbers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RateErrorPolicy {
    /// abort the whole parse with `MechGraphError::UnparsableRateConstant`
    #[default]
    Fail,
    /// drop the reaction (and the third-body lines it owns) and go on
    Skip,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MechGraphSettings {
    pub rate_error_policy: RateErrorPolicy,
    /// equations starting with one of these prefixes are dropped by the parser
    pub unsupported_rate_forms: Vec<String>,
    /// one of "off", "error", "warn", "info", "debug", "trace"
    pub log_level: String,
    /// if set, log records are also written to this file
    pub log_file: Option<String>,
}

impl Default for MechGraphSettings {
    fn default() -> Self {
        Self {
            rate_error_policy: RateErrorPolicy::Fail,
            unsupported_rate_forms: vec!["PLOG".to_string(), "CHEB".to_string()],
            log_level: "info".to_string(),
            log_file: None,
        }
    }
}

impl MechGraphSettings {
    pub fn new() -> Self {
        Self::default()
    }
    /// Reads settings from a JSON file.
    ///
    /// # Returns
    /// * `Ok(MechGraphSettings)` - parsed settings, missing fields take their defaults
    /// * `Err(MechGraphError)` - the file can't be read or is not valid JSON
    pub fn load(config_file: &str) -> MechGraphResult<Self> {
        let content = fs::read_to_string(config_file)?;
        let settings: MechGraphSettings = serde_json::from_str(&content)
            .map_err(|e| MechGraphError::InvalidSettings(e.to_string()))?;
        Ok(settings)
    }
    /// Reads settings from a JSON file; a missing or broken file gives the defaults.
    pub fn load_or_default(config_file: &str) -> Self {
        if !Path::new(config_file).exists() {
            return Self::default();
        }
        match Self::load(config_file) {
            Ok(settings) => settings,
            Err(e) => {
                warn!(
                    "failed to read settings from '{}': {}, using defaults",
                    config_file, e
                );
                Self::default()
            }
        }
    }

    pub fn save(&self, config_file: &str) -> MechGraphResult<()> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| MechGraphError::InvalidSettings(e.to_string()))?;
        fs::write(config_file, content)?;
        Ok(())
    }
    /// log level parsed from `log_level`, unknown strings fall back to `Info`
    pub fn level_filter(&self) -> LevelFilter {
        self.log_level.parse().unwrap_or(LevelFilter::Info)
    }
    /// true if the equation starts with one of the rate forms the parser can't read
    pub fn is_unsupported_form(&self, equation: &str) -> bool {
        self.unsupported_rate_forms
            .iter()
            .any(|form| equation.starts_with(form.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_settings() {
        let settings = MechGraphSettings::default();
        assert_eq!(settings.rate_error_policy, RateErrorPolicy::Fail);
        assert_eq!(settings.unsupported_rate_forms, vec!["PLOG", "CHEB"]);
        assert_eq!(settings.level_filter(), LevelFilter::Info);
        assert!(settings.log_file.is_none());
    }

    #[test]
    fn test_unsupported_forms() {
        let settings = MechGraphSettings::default();
        assert!(settings.is_unsupported_form("PLOG/"));
        assert!(settings.is_unsupported_form("CHEB/"));
        assert!(!settings.is_unsupported_form("H2+O2=>H2O"));
    }

    #[test]
    fn test_save_and_load() {
        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path().to_str().unwrap();
        let mut settings = MechGraphSettings::default();
        settings.rate_error_policy = RateErrorPolicy::Skip;
        settings.log_level = "debug".to_string();
        settings.save(path).unwrap();

        let loaded = MechGraphSettings::load(path).unwrap();
        assert_eq!(loaded, settings);
        assert_eq!(loaded.level_filter(), LevelFilter::Debug);
        settings.log_level = "WARN".to_string();
        assert_eq!(settings.level_filter(), LevelFilter::Warn);
        settings.log_level = "chatty".to_string();
        assert_eq!(settings.level_filter(), LevelFilter::Info);
    }

    #[test]
    fn test_partial_config_takes_defaults() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, r#"{{"rate_error_policy": "skip"}}"#).unwrap();
        let loaded = MechGraphSettings::load(temp_file.path().to_str().unwrap()).unwrap();
        assert_eq!(loaded.rate_error_policy, RateErrorPolicy::Skip);
        assert_eq!(loaded.unsupported_rate_forms, vec!["PLOG", "CHEB"]);
    }

    #[test]
    fn test_broken_config_falls_back() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "not json at all").unwrap();
        let path = temp_file.path().to_str().unwrap();
        assert!(matches!(
            MechGraphSettings::load(path),
            Err(MechGraphError::InvalidSettings(_))
        ));
        assert_eq!(
            MechGraphSettings::load_or_default(path),
            MechGraphSettings::default()
        );
        assert_eq!(
            MechGraphSettings::load_or_default("no_such_config_file.json"),
            MechGraphSettings::default()
        );
    }
}
