//! Engine configuration - every tunable constant of the suggestion pipeline

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::exercises::Catalog;

/// Default bilateral-load keywords (barbell-style lifts logged per side)
pub const BILATERAL_KEYWORDS: &[&str] = &[
    "barbell",
    "deadlift",
    "bench press",
    "squat",
    "row",
    "clean",
    "press",
];

pub const BAR_WEIGHT: f64 = 45.0;
pub const WINDOW_DAYS: i64 = 7;
pub const FOCUS_COUNT: usize = 2;
/// 2.5% per session
pub const PROGRESSION_FACTOR: f64 = 1.025;
pub const REP_RANGE: &str = "8–12";

/// Configuration passed explicitly into each pipeline stage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Lowercase substrings that mark an exercise as bilateral-loaded
    pub bilateral_keywords: Vec<String>,
    pub bar_weight: f64,
    /// Recency lookback, in days before today
    pub window_days: i64,
    pub focus_count: usize,
    pub progression_factor: f64,
    pub rep_range: String,
    pub catalog: Catalog,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            bilateral_keywords: BILATERAL_KEYWORDS.iter().map(|k| k.to_string()).collect(),
            bar_weight: BAR_WEIGHT,
            window_days: WINDOW_DAYS,
            focus_count: FOCUS_COUNT,
            progression_factor: PROGRESSION_FACTOR,
            rep_range: REP_RANGE.to_string(),
            catalog: Catalog::default(),
        }
    }
}

impl EngineConfig {
    /// Parse a JSON config; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let mut config: EngineConfig =
            serde_json::from_str(json).context("Invalid engine config")?;
        config.normalize();
        Ok(config)
    }

    /// Load a JSON config file
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        Self::from_json(&json).with_context(|| format!("In config {}", path.display()))
    }

    /// Keywords are matched against lowercased names
    fn normalize(&mut self) {
        for keyword in &mut self.bilateral_keywords {
            *keyword = keyword.to_lowercase();
        }
        self.bilateral_keywords.retain(|k| !k.is_empty());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exercises::MuscleGroup;

    #[test]
    fn test_default_constants() {
        let config = EngineConfig::default();
        assert_eq!(config.bilateral_keywords.len(), 7);
        assert_eq!(config.bar_weight, 45.0);
        assert_eq!(config.window_days, 7);
        assert_eq!(config.focus_count, 2);
        assert_eq!(config.progression_factor, 1.025);
        assert_eq!(config.rep_range, "8–12");
        assert_eq!(config.catalog.len(), 8);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = EngineConfig::from_json(r#"{"focus_count": 3, "bar_weight": 20}"#).unwrap();
        assert_eq!(config.focus_count, 3);
        assert_eq!(config.bar_weight, 20.0);
        assert_eq!(config.window_days, 7);
        assert_eq!(config.catalog, Catalog::default());
    }

    #[test]
    fn test_json_keywords_lowercased() {
        let config = EngineConfig::from_json(r#"{"bilateral_keywords": ["EZ Bar", ""]}"#).unwrap();
        assert_eq!(config.bilateral_keywords, vec!["ez bar".to_string()]);
    }

    #[test]
    fn test_json_catalog_override() {
        let json = r#"{"catalog": [{"group": "Legs", "exercises": ["Hack Squat"]}]}"#;
        let config = EngineConfig::from_json(json).unwrap();
        assert_eq!(config.catalog.len(), 1);
        assert_eq!(config.catalog.exercises(MuscleGroup::Legs), &["Hack Squat".to_string()]);
    }

    #[test]
    fn test_invalid_json_is_error() {
        assert!(EngineConfig::from_json("{not json").is_err());
    }
}
