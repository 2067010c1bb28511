//! nextset - next-session workout suggestions from an exercise log
//!
//! Reads a FitNotes-style CSV, picks the most neglected muscle groups and
//! projects a progressive-overload target for each of their exercises.

pub mod config;
pub mod engine;
pub mod exercises;
pub mod history;
pub mod tui;

pub use config::EngineConfig;
pub use engine::{WorkoutPlan, suggest_workout};
pub use history::History;
