//! CLI defaults from environment.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;

/// Artifact written to the output sink.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Full plan report as pretty JSON
    #[default]
    Json,
    /// One row per segment
    Csv,
    /// Human-readable overview
    #[value(alias = "text")]
    Summary,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Summary => "summary",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Blur budget used when neither flags nor the mission file set one
    pub blur_px_budget: Option<f64>,
    pub output_format: OutputFormat,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            blur_px_budget: lookup("SURVEY_BLUR_PX")
                .and_then(|s| s.parse().ok())
                .filter(|v: &f64| v.is_finite() && *v > 0.0),
            output_format: lookup("SURVEY_OUTPUT_FORMAT")
                .and_then(|s| OutputFormat::from_str(s.trim(), true).ok())
                .unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_without_environment() {
        let config = Config::from_lookup(|_| None);
        assert_eq!(config.blur_px_budget, None);
        assert_eq!(config.output_format, OutputFormat::Json);
    }

    #[test]
    fn reads_environment_values() {
        let config = Config::from_lookup(lookup_from(&[
            ("SURVEY_BLUR_PX", "0.5"),
            ("SURVEY_OUTPUT_FORMAT", "CSV"),
        ]));
        assert_eq!(config.blur_px_budget, Some(0.5));
        assert_eq!(config.output_format, OutputFormat::Csv);
    }

    #[test]
    fn ignores_unusable_values() {
        let config = Config::from_lookup(lookup_from(&[
            ("SURVEY_BLUR_PX", "-2"),
            ("SURVEY_OUTPUT_FORMAT", "xml"),
        ]));
        assert_eq!(config.blur_px_budget, None);
        assert_eq!(config.output_format, OutputFormat::Json);
    }

    #[test]
    fn output_format_names_round_trip_through_clap() {
        for format in OutputFormat::value_variants() {
            assert_eq!(OutputFormat::from_str(format.as_str(), false), Ok(*format));
        }
        assert_eq!(
            OutputFormat::from_str("TEXT", true),
            Ok(OutputFormat::Summary)
        );
        let config = Config::from_lookup(lookup_from(&[("SURVEY_OUTPUT_FORMAT", "text")]));
        assert_eq!(config.output_format, OutputFormat::Summary);
    }
}
