//! Progress and streak calculation

use crate::models::{Challenge, DailyTask, Progress};
use chrono::NaiveDate;
use std::collections::HashSet;

/// Current and longest run of consecutive completed days
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Streaks {
    pub current: u32,
    pub longest: u32,
}

/// Walk `dates` in order and measure runs of days found in `completed`.
///
/// `current` is the run ending on the last walked date that is on or
/// before `today`; dates after `today` only feed `longest`.
pub fn compute_streaks<I>(dates: I, completed: &HashSet<NaiveDate>, today: NaiveDate) -> Streaks
where
    I: IntoIterator<Item = NaiveDate>,
{
    let mut run = 0;
    let mut streaks = Streaks::default();

    for date in dates {
        if completed.contains(&date) {
            run += 1;
            streaks.longest = streaks.longest.max(run);
        } else {
            run = 0;
        }

        if date <= today {
            streaks.current = run;
        }
    }

    streaks
}

/// Recompute a challenge's progress from the full task list.
///
/// Tasks belonging to other challenges are ignored. The stored longest
/// streak acts as a high-water mark and is never lowered.
pub fn recompute_progress(challenge: &Challenge, all_tasks: &[DailyTask], today: NaiveDate) -> Challenge {
    let challenge_tasks: Vec<&DailyTask> = all_tasks
        .iter()
        .filter(|task| task.challenge_id == challenge.id)
        .collect();

    let completed_tasks = challenge_tasks.iter().filter(|task| task.completed).count();
    let completed_dates: HashSet<NaiveDate> = challenge_tasks
        .iter()
        .filter(|task| task.completed)
        .map(|task| task.date)
        .collect();

    let streaks = compute_streaks(challenge.dates(), &completed_dates, today);

    let mut updated = challenge.clone();
    updated.progress = Progress {
        completed_days: completed_dates.len() as u32,
        total_days: challenge.duration,
        completed_tasks: completed_tasks as u32,
        total_tasks: challenge_tasks.len() as u32,
        current_streak: streaks.current,
        longest_streak: challenge.progress.longest_streak.max(streaks.longest),
    };

    updated
}
