//! Directory-backed JSON key/value store
//!
//! Each storage key maps to one file under the root directory.
//!
//! Example: key "jee-tasks" is stored at "<root>/jee-tasks.json"

use super::{ChallengeStore, TaskStore, TopicStore};
use crate::catalog::CustomTopics;
use crate::config::{CHALLENGES_KEY, CUSTOM_TOPICS_KEY, TASKS_KEY};
use crate::error::Result;
use crate::models::{Challenge, DailyTask};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// JSON file store
#[derive(Clone)]
pub struct JsonStore {
    root: PathBuf,
}

impl JsonStore {
    /// Create a new store at the given root directory
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Initialize the store (create directory if needed)
    pub async fn initialize(&self) -> Result<()> {
        fs::create_dir_all(&self.root).await?;
        tracing::info!("JSON store initialized at: {:?}", self.root);
        Ok(())
    }

    /// Read a key, falling back to the default value when the file is
    /// missing or cannot be parsed.
    pub async fn read<T>(&self, key: &str) -> T
    where
        T: DeserializeOwned + Default,
    {
        let path = self.get_path(key);

        let content = match fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return T::default(),
            Err(e) => {
                tracing::error!("Failed to read {} from {:?}: {}", key, path, e);
                return T::default();
            }
        };

        match serde_json::from_str(&content) {
            Ok(value) => value,
            Err(e) => {
                tracing::error!("Failed to parse {} from {:?}: {}", key, path, e);
                T::default()
            }
        }
    }

    /// Write a key
    pub async fn write<T>(&self, key: &str, value: &T) -> Result<()>
    where
        T: Serialize + ?Sized,
    {
        let path = self.get_path(key);
        let content = serde_json::to_vec_pretty(value)?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        // Write to temp file first (atomic write)
        let temp_path = path.with_extension("json.tmp");
        let mut file = fs::File::create(&temp_path).await?;
        file.write_all(&content).await?;
        file.sync_all().await?;

        fs::rename(temp_path, &path).await?;

        tracing::debug!("Wrote {} ({} bytes)", key, content.len());

        Ok(())
    }

    /// Delete a key
    pub async fn remove(&self, key: &str) -> Result<()> {
        let path = self.get_path(key);

        if !path.exists() {
            return Ok(()); // Already deleted
        }

        fs::remove_file(&path).await?;

        tracing::debug!("Removed {}", key);

        Ok(())
    }

    /// Delete every key this application owns
    pub async fn clear_all(&self) -> Result<()> {
        for key in [CHALLENGES_KEY, TASKS_KEY, CUSTOM_TOPICS_KEY] {
            self.remove(key).await?;
        }
        tracing::info!("All study plan data cleared from {:?}", self.root);
        Ok(())
    }

    /// Get file path for a key
    fn get_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", key))
    }

    /// Get store root directory
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ChallengeStore for JsonStore {
    async fn all_challenges(&self) -> Vec<Challenge> {
        self.read(CHALLENGES_KEY).await
    }

    async fn save_challenges(&self, challenges: &[Challenge]) -> Result<()> {
        self.write(CHALLENGES_KEY, challenges).await
    }
}

impl TaskStore for JsonStore {
    async fn all_tasks(&self) -> Vec<DailyTask> {
        self.read(TASKS_KEY).await
    }

    async fn save_tasks(&self, tasks: &[DailyTask]) -> Result<()> {
        self.write(TASKS_KEY, tasks).await
    }
}

impl TopicStore for JsonStore {
    async fn custom_topics(&self) -> CustomTopics {
        self.read(CUSTOM_TOPICS_KEY).await
    }

    async fn save_custom_topics(&self, topics: &CustomTopics) -> Result<()> {
        self.write(CUSTOM_TOPICS_KEY, topics).await
    }
}
