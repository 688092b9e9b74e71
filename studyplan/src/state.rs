//! Application state and reducer
//!
//! `reduce` folds an event into the in-memory state. It never touches
//! storage; the service persists after reducing.

use crate::engine::recompute_progress;
use crate::models::{Challenge, ChallengeUpdate, DailyTask, TaskUpdate};
use chrono::{DateTime, NaiveDate, Utc};

/// Everything the UI renders from
#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    pub challenges: Vec<Challenge>,
    pub tasks: Vec<DailyTask>,
    pub loading: bool,
    pub error: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            challenges: Vec::new(),
            tasks: Vec::new(),
            loading: true,
            error: None,
        }
    }
}

impl AppState {
    pub fn challenge(&self, id: &str) -> Option<&Challenge> {
        self.challenges.iter().find(|c| c.id == id)
    }

    pub fn task(&self, id: &str) -> Option<&DailyTask> {
        self.tasks.iter().find(|t| t.id == id)
    }
}

/// State transitions
#[derive(Debug, Clone)]
pub enum Event {
    Loaded {
        challenges: Vec<Challenge>,
        tasks: Vec<DailyTask>,
    },
    LoadFailed(String),
    ChallengeAdded(Challenge),
    ChallengeUpdated {
        challenge_id: String,
        update: ChallengeUpdate,
    },
    ChallengeDeleted(String),
    TasksAdded(Vec<DailyTask>),
    TaskUpdated {
        task_id: String,
        update: TaskUpdate,
        now: DateTime<Utc>,
    },
    TaskDeleted(String),
    ProgressRefreshed {
        challenge_id: String,
        today: NaiveDate,
    },
}

/// Apply one event
pub fn reduce(mut state: AppState, event: Event) -> AppState {
    match event {
        Event::Loaded { challenges, tasks } => {
            state.challenges = challenges;
            state.tasks = tasks;
            state.loading = false;
            state.error = None;
        }
        Event::LoadFailed(error) => {
            state.loading = false;
            state.error = Some(error);
        }
        Event::ChallengeAdded(challenge) => {
            state.challenges.insert(0, challenge);
        }
        Event::ChallengeUpdated {
            challenge_id,
            update,
        } => {
            if let Some(challenge) = state.challenges.iter_mut().find(|c| c.id == challenge_id) {
                challenge.apply(&update);
            }
        }
        Event::ChallengeDeleted(challenge_id) => {
            state.challenges.retain(|c| c.id != challenge_id);
            state.tasks.retain(|t| t.challenge_id != challenge_id);
        }
        Event::TasksAdded(tasks) => {
            state.tasks.extend(tasks);
        }
        Event::TaskUpdated { task_id, update, now } => {
            if let Some(task) = state.tasks.iter_mut().find(|t| t.id == task_id) {
                task.apply(&update, now);
            }
        }
        Event::TaskDeleted(task_id) => {
            state.tasks.retain(|t| t.id != task_id);
        }
        Event::ProgressRefreshed {
            challenge_id,
            today,
        } => {
            let tasks = &state.tasks;
            if let Some(challenge) = state.challenges.iter_mut().find(|c| c.id == challenge_id) {
                *challenge = recompute_progress(challenge, tasks, today);
            }
        }
    }

    state
}
