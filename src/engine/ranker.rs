//! Recency ranking of muscle groups for choosing the next session's focus

use std::collections::HashMap;

use chrono::{Duration, NaiveDate};

use super::corrector::CorrectedEntry;
use crate::config::EngineConfig;
use crate::exercises::MuscleGroup;

/// Most recent training of a group inside the window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupRecency {
    pub group: MuscleGroup,
    /// None = not trained in the window, sorts before any date
    pub last_trained: Option<NaiveDate>,
}

/// Catalog groups ordered from most neglected to most recently trained
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ranking {
    window_start: NaiveDate,
    order: Vec<GroupRecency>,
}

impl Ranking {
    /// Rank every catalog group by its last training date in
    /// `today - window_days ..= today`
    pub fn from_entries(entries: &[CorrectedEntry], today: NaiveDate, config: &EngineConfig) -> Self {
        let window_start = Duration::try_days(config.window_days)
            .and_then(|window| today.checked_sub_signed(window))
            .unwrap_or(NaiveDate::MIN);

        let mut last_trained: HashMap<MuscleGroup, NaiveDate> = HashMap::new();
        for corrected in entries {
            let date = corrected.entry.date;
            if date < window_start || date > today {
                continue;
            }
            // Unknown categories never take part in ranking
            let Some(group) = MuscleGroup::from_label(&corrected.entry.category) else {
                continue;
            };
            let last = last_trained.entry(group).or_insert(date);
            if *last < date {
                *last = date;
            }
        }

        let mut order: Vec<GroupRecency> = config
            .catalog
            .groups()
            .map(|group| GroupRecency {
                group,
                last_trained: last_trained.get(&group).copied(),
            })
            .collect();

        // Stable: equal dates keep catalog order
        order.sort_by_key(|r| r.last_trained);

        Self { window_start, order }
    }

    /// Full priority order
    pub fn order(&self) -> &[GroupRecency] {
        &self.order
    }

    /// Top `count` groups (fewer only if the catalog is smaller)
    pub fn select(&self, count: usize) -> Vec<MuscleGroup> {
        self.order.iter().take(count).map(|r| r.group).collect()
    }

    pub fn last_trained(&self, group: MuscleGroup) -> Option<NaiveDate> {
        self.order
            .iter()
            .find(|r| r.group == group)
            .and_then(|r| r.last_trained)
    }

    pub fn window_start(&self) -> NaiveDate {
        self.window_start
    }
}
