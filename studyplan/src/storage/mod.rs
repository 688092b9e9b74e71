//! Storage module
//!
//! Key/value persistence for challenges, tasks and custom topics.
//! Every write follows a read-all, mutate, write-all cycle; there is no
//! isolation between concurrent writers and the last write wins.

pub mod json_store;
pub mod memory;

pub use json_store::JsonStore;
pub use memory::MemoryStore;

use crate::catalog::CustomTopics;
use crate::error::Result;
use crate::models::{Challenge, ChallengeUpdate, DailyTask, TaskUpdate};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Persistence for challenges, newest first
#[allow(async_fn_in_trait)]
pub trait ChallengeStore {
    /// Load every challenge. Unreadable data loads as empty.
    async fn all_challenges(&self) -> Vec<Challenge>;

    async fn save_challenges(&self, challenges: &[Challenge]) -> Result<()>;

    async fn get_challenge(&self, id: &str) -> Option<Challenge> {
        self.all_challenges().await.into_iter().find(|c| c.id == id)
    }

    async fn add_challenge(&self, challenge: Challenge) -> Result<()> {
        let mut challenges = self.all_challenges().await;
        challenges.insert(0, challenge);
        self.save_challenges(&challenges).await
    }

    /// Apply a partial update. Returns `None` when the id is unknown.
    async fn update_challenge(&self, id: &str, update: &ChallengeUpdate) -> Result<Option<Challenge>> {
        let mut challenges = self.all_challenges().await;
        let Some(challenge) = challenges.iter_mut().find(|c| c.id == id) else {
            return Ok(None);
        };
        challenge.apply(update);
        let updated = challenge.clone();
        self.save_challenges(&challenges).await?;
        Ok(Some(updated))
    }

    /// Overwrite a stored challenge with the same id. Returns false when absent.
    async fn replace_challenge(&self, challenge: &Challenge) -> Result<bool> {
        let mut challenges = self.all_challenges().await;
        let Some(slot) = challenges.iter_mut().find(|c| c.id == challenge.id) else {
            return Ok(false);
        };
        *slot = challenge.clone();
        self.save_challenges(&challenges).await?;
        Ok(true)
    }

    async fn remove_challenge(&self, id: &str) -> Result<bool> {
        let mut challenges = self.all_challenges().await;
        let before = challenges.len();
        challenges.retain(|c| c.id != id);
        let removed = challenges.len() != before;
        self.save_challenges(&challenges).await?;
        Ok(removed)
    }
}

/// Persistence for daily tasks
#[allow(async_fn_in_trait)]
pub trait TaskStore {
    /// Load every task. Unreadable data loads as empty.
    async fn all_tasks(&self) -> Vec<DailyTask>;

    async fn save_tasks(&self, tasks: &[DailyTask]) -> Result<()>;

    async fn tasks_for_date(&self, date: NaiveDate) -> Vec<DailyTask> {
        self.all_tasks()
            .await
            .into_iter()
            .filter(|t| t.date == date)
            .collect()
    }

    async fn tasks_for_challenge(&self, challenge_id: &str) -> Vec<DailyTask> {
        self.all_tasks()
            .await
            .into_iter()
            .filter(|t| t.challenge_id == challenge_id)
            .collect()
    }

    async fn add_task(&self, task: DailyTask) -> Result<()> {
        self.add_tasks(vec![task]).await
    }

    async fn add_tasks(&self, new_tasks: Vec<DailyTask>) -> Result<()> {
        let mut tasks = self.all_tasks().await;
        tasks.extend(new_tasks);
        self.save_tasks(&tasks).await
    }

    /// Apply a partial update. Returns `None` when the id is unknown.
    async fn update_task(
        &self,
        id: &str,
        update: &TaskUpdate,
        now: DateTime<Utc>,
    ) -> Result<Option<DailyTask>> {
        let mut tasks = self.all_tasks().await;
        let Some(task) = tasks.iter_mut().find(|t| t.id == id) else {
            return Ok(None);
        };
        task.apply(update, now);
        let updated = task.clone();
        self.save_tasks(&tasks).await?;
        Ok(Some(updated))
    }

    /// Remove one task, returning it when it existed.
    async fn remove_task(&self, id: &str) -> Result<Option<DailyTask>> {
        let mut tasks = self.all_tasks().await;
        let Some(index) = tasks.iter().position(|t| t.id == id) else {
            return Ok(None);
        };
        let removed = tasks.remove(index);
        self.save_tasks(&tasks).await?;
        Ok(Some(removed))
    }

    /// Remove every task owned by a challenge, returning how many went.
    async fn remove_tasks_for_challenge(&self, challenge_id: &str) -> Result<usize> {
        let mut tasks = self.all_tasks().await;
        let before = tasks.len();
        tasks.retain(|t| t.challenge_id != challenge_id);
        let removed = before - tasks.len();
        self.save_tasks(&tasks).await?;
        Ok(removed)
    }
}

/// Persistence for user-added topics
#[allow(async_fn_in_trait)]
pub trait TopicStore {
    async fn custom_topics(&self) -> CustomTopics;

    async fn save_custom_topics(&self, topics: &CustomTopics) -> Result<()>;
}

/// Full snapshot of persisted data for export and import
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataExport {
    #[serde(default)]
    pub challenges: Vec<Challenge>,
    #[serde(default)]
    pub tasks: Vec<DailyTask>,
    #[serde(default)]
    pub custom_topics: CustomTopics,
    pub export_date: DateTime<Utc>,
}
