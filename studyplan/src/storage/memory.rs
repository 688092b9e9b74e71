//! In-memory store
//!
//! Same semantics as [`super::JsonStore`] without touching disk.
//! Used in tests and for throwaway sessions.

use super::{ChallengeStore, TaskStore, TopicStore};
use crate::catalog::CustomTopics;
use crate::error::Result;
use crate::models::{Challenge, DailyTask};
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Default)]
struct Inner {
    challenges: Vec<Challenge>,
    tasks: Vec<DailyTask>,
    custom_topics: CustomTopics,
}

/// Shared in-memory store; clones see the same data
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ChallengeStore for MemoryStore {
    async fn all_challenges(&self) -> Vec<Challenge> {
        self.inner.lock().await.challenges.clone()
    }

    async fn save_challenges(&self, challenges: &[Challenge]) -> Result<()> {
        self.inner.lock().await.challenges = challenges.to_vec();
        Ok(())
    }
}

impl TaskStore for MemoryStore {
    async fn all_tasks(&self) -> Vec<DailyTask> {
        self.inner.lock().await.tasks.clone()
    }

    async fn save_tasks(&self, tasks: &[DailyTask]) -> Result<()> {
        self.inner.lock().await.tasks = tasks.to_vec();
        Ok(())
    }
}

impl TopicStore for MemoryStore {
    async fn custom_topics(&self) -> CustomTopics {
        self.inner.lock().await.custom_topics.clone()
    }

    async fn save_custom_topics(&self, topics: &CustomTopics) -> Result<()> {
        self.inner.lock().await.custom_topics = topics.clone();
        Ok(())
    }
}
