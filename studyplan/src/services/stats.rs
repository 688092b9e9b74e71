//! Dashboard statistics
//!
//! Aggregates over stored progress; nothing here recomputes streaks.

use crate::models::{Challenge, ChallengeStatus, DailyTask};
use chrono::NaiveDate;
use serde::Serialize;

/// Totals shown on the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeStats {
    pub total: u32,
    pub active: u32,
    pub completed: u32,
    pub paused: u32,
    /// Best current streak across challenges
    pub current_streak: u32,
    pub total_study_hours: u32,
    pub total_tasks_completed: u32,
}

impl ChallengeStats {
    pub fn from_challenges(challenges: &[Challenge]) -> Self {
        let count = |status: ChallengeStatus| {
            challenges.iter().filter(|c| c.status == status).count() as u32
        };

        Self {
            total: challenges.len() as u32,
            active: count(ChallengeStatus::Active),
            completed: count(ChallengeStatus::Completed),
            paused: count(ChallengeStatus::Paused),
            current_streak: challenges
                .iter()
                .map(|c| c.progress.current_streak)
                .max()
                .unwrap_or(0),
            total_study_hours: challenges
                .iter()
                .map(|c| c.progress.completed_days * c.daily_time_hours)
                .sum(),
            total_tasks_completed: challenges.iter().map(|c| c.progress.completed_tasks).sum(),
        }
    }
}

/// Workload and completion for a single day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DaySummary {
    pub date: NaiveDate,
    pub total_tasks: u32,
    pub completed_tasks: u32,
    pub total_minutes: u32,
    pub completed_minutes: u32,
}

impl DaySummary {
    /// Summarize the tasks dated `date`; tasks on other days are skipped.
    pub fn from_tasks(date: NaiveDate, tasks: &[DailyTask]) -> Self {
        let mut summary = Self {
            date,
            total_tasks: 0,
            completed_tasks: 0,
            total_minutes: 0,
            completed_minutes: 0,
        };

        for task in tasks.iter().filter(|t| t.date == date) {
            summary.total_tasks += 1;
            summary.total_minutes += task.time_allotted;
            if task.completed {
                summary.completed_tasks += 1;
                summary.completed_minutes += task.time_allotted;
            }
        }

        summary
    }
}
