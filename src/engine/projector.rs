//! Progressive-overload targets per exercise

use std::fmt;

use serde::{Serialize, Serializer};

use super::corrector::CorrectedEntry;
use crate::config::EngineConfig;
use crate::exercises::MuscleGroup;

/// Shown instead of a number when an exercise has no history
pub const START_LIGHT: &str = "Start Light";

/// Target load for the next session
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SuggestedWeight {
    Target(f64),
    StartLight,
}

impl SuggestedWeight {
    pub fn target(&self) -> Option<f64> {
        match self {
            SuggestedWeight::Target(w) => Some(*w),
            SuggestedWeight::StartLight => None,
        }
    }
}

impl fmt::Display for SuggestedWeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SuggestedWeight::Target(w) => write!(f, "{:.1}", w),
            SuggestedWeight::StartLight => f.write_str(START_LIGHT),
        }
    }
}

/// A number, or the "Start Light" string
impl Serialize for SuggestedWeight {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            SuggestedWeight::Target(w) => serializer.serialize_f64(*w),
            SuggestedWeight::StartLight => serializer.serialize_str(START_LIGHT),
        }
    }
}

/// What to do for one exercise next session
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Suggestion {
    pub exercise: String,
    pub weight: SuggestedWeight,
    pub reps: String,
    pub alt: String,
}

/// Round to one decimal in a single step, on the exact stored value.
/// Exact binary ties go to even (133.25 -> 133.2); 55.35 is stored just
/// below the half and goes to 55.3.
pub fn round_to_tenth(value: f64) -> f64 {
    format!("{:.1}", value).parse().unwrap_or(value)
}

/// Most recent entry for an exercise, matched case-insensitively.
/// On equal dates the earliest row in input order wins.
pub fn latest_entry<'a>(entries: &'a [CorrectedEntry], exercise: &str) -> Option<&'a CorrectedEntry> {
    let wanted = exercise.to_lowercase();
    entries
        .iter()
        .filter(|e| e.entry.exercise.to_lowercase() == wanted)
        .fold(None, |best: Option<&CorrectedEntry>, e| match best {
            Some(b) if b.entry.date >= e.entry.date => Some(b),
            _ => Some(e),
        })
}

/// Next target for one exercise
pub fn project_weight(entries: &[CorrectedEntry], exercise: &str, config: &EngineConfig) -> SuggestedWeight {
    match latest_entry(entries, exercise) {
        Some(last) => SuggestedWeight::Target(round_to_tenth(
            last.corrected_weight * config.progression_factor,
        )),
        None => SuggestedWeight::StartLight,
    }
}

pub fn alternative_hint(group: MuscleGroup) -> String {
    format!(
        "Any basic {} movement if this isn’t available",
        group.name().to_lowercase()
    )
}

/// Suggestions for each catalog exercise of one group, in catalog order
pub fn project_group(entries: &[CorrectedEntry], group: MuscleGroup, config: &EngineConfig) -> Vec<Suggestion> {
    config
        .catalog
        .exercises(group)
        .iter()
        .map(|exercise| Suggestion {
            exercise: exercise.clone(),
            weight: project_weight(entries, exercise, config),
            reps: config.rep_range.clone(),
            alt: alternative_hint(group),
        })
        .collect()
}
