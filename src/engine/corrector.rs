//! Bilateral-load weight correction
//!
//! Barbell lifts are usually logged as the plates on one side. The total
//! lifted load is both sides plus the bar.

use serde::Serialize;

use crate::config::EngineConfig;
use crate::history::LogEntry;

/// A log entry with its total lifted load
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrectedEntry {
    #[serde(flatten)]
    pub entry: LogEntry,
    pub corrected_weight: f64,
}

/// Does the exercise name contain any bilateral keyword (case-insensitive)?
pub fn is_bilateral(exercise: &str, keywords: &[String]) -> bool {
    let name = exercise.to_lowercase();
    keywords.iter().any(|k| name.contains(k.as_str()))
}

/// Total load for one entry
pub fn correct_weight(entry: &LogEntry, config: &EngineConfig) -> f64 {
    if is_bilateral(&entry.exercise, &config.bilateral_keywords) {
        entry.weight * 2.0 + config.bar_weight
    } else {
        entry.weight
    }
}

/// Annotate every entry, preserving input order
pub fn correct_all(entries: &[LogEntry], config: &EngineConfig) -> Vec<CorrectedEntry> {
    entries
        .iter()
        .map(|entry| CorrectedEntry {
            corrected_weight: correct_weight(entry, config),
            entry: entry.clone(),
        })
        .collect()
}
