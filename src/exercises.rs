//! Exercise definitions - muscle groups and the exercise library

use std::fmt;

use serde::{Deserialize, Serialize};

/// Muscle groups a session can focus on
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MuscleGroup {
    Chest,
    Back,
    Legs,
    Biceps,
    Triceps,
    Shoulders,
    Abs,
    Cardio,
}

impl MuscleGroup {
    /// Label as it appears in the log's Category column
    pub fn name(&self) -> &'static str {
        match self {
            MuscleGroup::Chest => "Chest",
            MuscleGroup::Back => "Back",
            MuscleGroup::Legs => "Legs",
            MuscleGroup::Biceps => "Biceps",
            MuscleGroup::Triceps => "Triceps",
            MuscleGroup::Shoulders => "Shoulders",
            MuscleGroup::Abs => "Abs",
            MuscleGroup::Cardio => "Cardio",
        }
    }

    /// All muscle groups in declaration order
    pub fn all() -> &'static [MuscleGroup] {
        &[
            MuscleGroup::Chest,
            MuscleGroup::Back,
            MuscleGroup::Legs,
            MuscleGroup::Biceps,
            MuscleGroup::Triceps,
            MuscleGroup::Shoulders,
            MuscleGroup::Abs,
            MuscleGroup::Cardio,
        ]
    }

    /// Match a Category label. Exact name only, so "legs" is not Legs.
    pub fn from_label(label: &str) -> Option<MuscleGroup> {
        let label = label.trim();
        Self::all().iter().copied().find(|g| g.name() == label)
    }
}

impl fmt::Display for MuscleGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One catalog entry: a group and its canonical exercises
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupExercises {
    pub group: MuscleGroup,
    pub exercises: Vec<String>,
}

/// Exercise library. Entry order is the ranking tie-break order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<GroupExercises>", into = "Vec<GroupExercises>")]
pub struct Catalog {
    entries: Vec<GroupExercises>,
}

/// Default library per muscle group
pub const DEFAULT_LIBRARY: &[(MuscleGroup, &[&str])] = &[
    (MuscleGroup::Chest, &["Flat Barbell Bench Press", "Incline Dumbbell Press", "Cable Fly"]),
    (MuscleGroup::Back, &["Pull-ups", "Barbell Row", "Seated Cable Row"]),
    (MuscleGroup::Legs, &["Barbell Squats", "Leg Press", "Lunges"]),
    (MuscleGroup::Biceps, &["Barbell Curl", "Dumbbell Curl", "Cable Curl"]),
    (MuscleGroup::Triceps, &["Tricep Pushdown", "Dips", "Skullcrushers"]),
    (MuscleGroup::Shoulders, &["Overhead Press", "Lateral Raises", "Arnold Press"]),
    (MuscleGroup::Abs, &["Planks", "Cable Crunches", "Hanging Leg Raises"]),
    (MuscleGroup::Cardio, &["Treadmill", "Elliptical", "Jump Rope"]),
];

impl Catalog {
    /// Build a catalog. A group listed twice keeps its first position and
    /// its last exercise list.
    pub fn new(entries: Vec<GroupExercises>) -> Self {
        let mut deduped: Vec<GroupExercises> = Vec::with_capacity(entries.len());
        for entry in entries {
            match deduped.iter_mut().find(|e| e.group == entry.group) {
                Some(existing) => existing.exercises = entry.exercises,
                None => deduped.push(entry),
            }
        }
        Self { entries: deduped }
    }

    /// Groups in catalog order
    pub fn groups(&self) -> impl Iterator<Item = MuscleGroup> + '_ {
        self.entries.iter().map(|e| e.group)
    }

    /// Canonical exercises for a group (empty if the group is not listed)
    pub fn exercises(&self, group: MuscleGroup) -> &[String] {
        self.entries
            .iter()
            .find(|e| e.group == group)
            .map(|e| e.exercises.as_slice())
            .unwrap_or(&[])
    }

    pub fn entries(&self) -> &[GroupExercises] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<Vec<GroupExercises>> for Catalog {
    fn from(entries: Vec<GroupExercises>) -> Self {
        Self::new(entries)
    }
}

impl From<Catalog> for Vec<GroupExercises> {
    fn from(catalog: Catalog) -> Self {
        catalog.entries
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new(
            DEFAULT_LIBRARY
                .iter()
                .map(|(group, exercises)| GroupExercises {
                    group: *group,
                    exercises: exercises.iter().map(|s| s.to_string()).collect(),
                })
                .collect(),
        )
    }
}
