//! Suggestion engine - turns training history into the next session's plan
//!
//! Stages, each returning new data:
//! - weight correction for bilateral-loaded lifts
//! - recency ranking of muscle groups
//! - progressive-overload targets for the focus groups

pub mod corrector;
pub mod projector;
pub mod ranker;

pub use corrector::{CorrectedEntry, correct_all};
pub use projector::{SuggestedWeight, Suggestion};
pub use ranker::Ranking;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use crate::config::EngineConfig;
use crate::exercises::MuscleGroup;
use crate::history::LogEntry;

/// Suggestions for one focus group
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupPlan {
    pub group: MuscleGroup,
    pub exercises: Vec<Suggestion>,
}

/// Result of one run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkoutPlan {
    pub today: NaiveDate,
    /// Selected groups, most neglected first
    pub focus_groups: Vec<MuscleGroup>,
    /// One entry per focus group, same order
    pub suggestions: Vec<GroupPlan>,
}

impl WorkoutPlan {
    pub fn for_group(&self, group: MuscleGroup) -> Option<&[Suggestion]> {
        self.suggestions
            .iter()
            .find(|p| p.group == group)
            .map(|p| p.exercises.as_slice())
    }

    /// Plain-text report
    pub fn format_report(&self) -> String {
        let focus: Vec<_> = self.focus_groups.iter().map(|g| g.name()).collect();
        let mut lines = vec![format!("Suggested focus for tomorrow: {}", focus.join(", "))];

        for plan in &self.suggestions {
            lines.push(String::new());
            lines.push(format!("## {}", plan.group));
            for s in &plan.exercises {
                lines.push(format!("- {} | {} lbs | {} reps", s.exercise, s.weight, s.reps));
                lines.push(format!("  Alt: {}", s.alt));
            }
        }

        lines.join("\n")
    }
}

/// Run the whole pipeline over cleaned entries
pub fn suggest_workout(entries: &[LogEntry], today: NaiveDate, config: &EngineConfig) -> WorkoutPlan {
    let corrected = correct_all(entries, config);
    let ranking = Ranking::from_entries(&corrected, today, config);
    let focus_groups = ranking.select(config.focus_count);

    for r in ranking.order() {
        debug!(group = %r.group, last_trained = ?r.last_trained, "Group recency");
    }

    let suggestions = focus_groups
        .iter()
        .map(|&group| GroupPlan {
            group,
            exercises: projector::project_group(&corrected, group, config),
        })
        .collect();

    WorkoutPlan {
        today,
        focus_groups,
        suggestions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::History;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn load(csv: &str) -> History {
        History::from_reader(csv.as_bytes()).unwrap()
    }

    const LOG: &str = "Date,Exercise,Category,Weight (lbs),Reps\n\
        2024-01-01,Flat Barbell Bench Press,Chest,50,8\n\
        2024-01-09,Barbell Squats,Legs,100,5\n\
        2024-01-02,Pull-ups,Back,0,10\n\
        2024-01-05,Cable Fly,Chest,heavy,12\n\
        not-a-date,Dips,Triceps,200,8\n\
        2024-01-08,Barbell Curl,Biceps,27.5,10\n\
        2024-01-01,Barbell Curl,Biceps,25,10\n";

    #[test]
    fn test_end_to_end() {
        let config = EngineConfig::default();
        let history = load(LOG);
        let plan = suggest_workout(history.entries(), date(2024, 1, 10), &config);

        // Window 2024-01-03..=2024-01-10: Legs, Chest and Biceps trained.
        // Back (01-02) is outside, so Back and Triceps lead.
        assert_eq!(plan.focus_groups, vec![MuscleGroup::Back, MuscleGroup::Triceps]);
        assert_eq!(plan.suggestions.len(), 2);

        let back = plan.for_group(MuscleGroup::Back).unwrap();
        assert_eq!(back[0].exercise, "Pull-ups");
        assert_eq!(back[0].weight, SuggestedWeight::Target(0.0));
        assert_eq!(back[1].weight, SuggestedWeight::StartLight);

        // The bad-date Dips row never reaches projection
        let triceps = plan.for_group(MuscleGroup::Triceps).unwrap();
        assert_eq!(triceps[1].exercise, "Dips");
        assert_eq!(triceps[1].weight, SuggestedWeight::StartLight);
    }

    #[test]
    fn test_bad_date_row_does_not_rank() {
        let config = EngineConfig::default();
        let history = load(
            "Date,Exercise,Category,Weight,Reps\n\
             not-a-date,Flat Barbell Bench Press,Chest,50,8\n",
        );
        let plan = suggest_workout(history.entries(), date(2024, 1, 10), &config);
        assert_eq!(plan.focus_groups, vec![MuscleGroup::Chest, MuscleGroup::Back]);
        let chest = plan.for_group(MuscleGroup::Chest).unwrap();
        assert_eq!(chest[0].weight, SuggestedWeight::StartLight);
    }

    #[test]
    fn test_projection_uses_corrected_weight() {
        let config = EngineConfig {
            focus_count: 8,
            ..EngineConfig::default()
        };
        let history = load(LOG);
        let plan = suggest_workout(history.entries(), date(2024, 1, 10), &config);

        // 27.5 * 2 + 45 = 100, then +2.5%
        let biceps = plan.for_group(MuscleGroup::Biceps).unwrap();
        assert_eq!(biceps[0].weight, SuggestedWeight::Target(102.5));

        // 100 * 2 + 45 = 245 -> 251.125
        let legs = plan.for_group(MuscleGroup::Legs).unwrap();
        assert_eq!(legs[0].weight, SuggestedWeight::Target(251.1));
    }

    #[test]
    fn test_idempotent() {
        let config = EngineConfig::default();
        let history = load(LOG);
        let today = date(2024, 1, 10);
        let first = suggest_workout(history.entries(), today, &config);
        let second = suggest_workout(history.entries(), today, &config);
        assert_eq!(first, second);
    }

    #[test]
    fn test_every_suggestion_complete() {
        let config = EngineConfig::default();
        let plan = suggest_workout(&[], date(2024, 1, 10), &config);
        assert_eq!(plan.focus_groups.len(), 2);
        for group in &plan.suggestions {
            assert_eq!(group.exercises.len(), 3);
            for s in &group.exercises {
                assert!(!s.exercise.is_empty());
                assert!(!s.reps.is_empty());
                assert!(!s.alt.is_empty());
            }
        }
    }

    #[test]
    fn test_format_report() {
        let config = EngineConfig::default();
        let history = load(LOG);
        let plan = suggest_workout(history.entries(), date(2024, 1, 10), &config);
        let report = plan.format_report();

        assert!(report.starts_with("Suggested focus for tomorrow: Back, Triceps"));
        assert!(report.contains("## Back"));
        assert!(report.contains("- Pull-ups | 0.0 lbs | 8–12 reps"));
        assert!(report.contains("- Dips | Start Light lbs | 8–12 reps"));
        assert!(report.contains("  Alt: Any basic triceps movement if this isn’t available"));
    }

    #[test]
    fn test_plan_json_shape() {
        let config = EngineConfig::default();
        let plan = suggest_workout(&[], date(2024, 1, 10), &config);
        let json = serde_json::to_value(&plan).unwrap();

        assert_eq!(json["today"], "2024-01-10");
        assert_eq!(json["focus_groups"][0], "Chest");
        assert_eq!(json["suggestions"][0]["group"], "Chest");
        assert_eq!(json["suggestions"][0]["exercises"][0]["weight"], "Start Light");
        assert_eq!(json["suggestions"][0]["exercises"][0]["reps"], "8–12");
    }
}
