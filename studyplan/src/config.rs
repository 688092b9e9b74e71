//! Application configuration constants
//!
//! Central location for all configuration constants, storage keys,
//! and validation boundaries used throughout the application.

use serde::Serialize;
use std::path::PathBuf;

// ===== Challenge Limits =====

/// Minimum daily study time a challenge may request, in hours
pub const MIN_DAILY_TIME_HOURS: u32 = 1;

/// Maximum daily study time a challenge may request, in hours
pub const MAX_DAILY_TIME_HOURS: u32 = 12;

/// Minimum challenge length in days
pub const MIN_DURATION_DAYS: u32 = 1;

// ===== Task Generation =====

/// Probability that a mock-series day becomes a single full-length mock test
pub const MOCK_TEST_PROBABILITY: f64 = 0.3;

/// Slack allowed when summing the floored minutes of one topic's templates
/// against the daily budget.
pub const TIME_BUDGET_TOLERANCE_MINUTES: u32 = 1;

// ===== Storage =====

/// Storage key holding every challenge
pub const CHALLENGES_KEY: &str = "jee-challenges";

/// Storage key holding every daily task
pub const TASKS_KEY: &str = "jee-tasks";

/// Storage key holding user-added topics
pub const CUSTOM_TOPICS_KEY: &str = "jee-custom-topics";

/// Environment variable overriding the data directory
pub const DATA_DIR_ENV: &str = "STUDYPLAN_DATA_DIR";

/// Data directory used when `STUDYPLAN_DATA_DIR` is unset
pub const DEFAULT_DATA_DIR: &str = "data";

/// Default tracing directives when `RUST_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "studyplan=debug,info";

/// Resolve the data directory from the environment.
pub fn data_dir_from_env() -> PathBuf {
    std::env::var(DATA_DIR_ENV)
        .ok()
        .filter(|s| !s.trim().is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR))
}

// ===== Challenge Presets =====

/// A challenge archetype offered when creating a new challenge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChallengePreset {
    pub id: &'static str,
    pub name: &'static str,
    pub duration: u32,
    pub description: &'static str,
}

/// Preset challenges with their suggested names and lengths
pub const CHALLENGE_PRESETS: &[ChallengePreset] = &[
    ChallengePreset {
        id: "revision",
        name: "15 Days Revision Challenge",
        duration: 15,
        description: "Complete revision of selected topics",
    },
    ChallengePreset {
        id: "backlog",
        name: "20 Days Backlog Completion",
        duration: 20,
        description: "Clear your pending syllabus",
    },
    ChallengePreset {
        id: "dpp",
        name: "30 Days DPP Challenge",
        duration: 30,
        description: "Daily Practice Problems marathon",
    },
    ChallengePreset {
        id: "mock",
        name: "45 Days Mock Test Series",
        duration: 45,
        description: "Intensive mock test preparation",
    },
    ChallengePreset {
        id: "weak-areas",
        name: "14 Days Weak Areas Focus",
        duration: 14,
        description: "Target your weak subjects/topics",
    },
    ChallengePreset {
        id: "full-syllabus",
        name: "60 Days Complete Syllabus",
        duration: 60,
        description: "Cover entire JEE syllabus systematically",
    },
];

/// Look up a preset by its type id
pub fn preset(id: &str) -> Option<&'static ChallengePreset> {
    CHALLENGE_PRESETS.iter().find(|p| p.id == id)
}
