//! Application state and initialization
//!
//! Opens the data directory and wires the services over one shared store.

use crate::error::{AppError, Result};
use crate::services::{ChallengeService, TopicsService};
use crate::storage::JsonStore;
use std::path::PathBuf;

/// Everything the entry point needs, built once on startup
#[derive(Clone)]
pub struct App {
    pub data_dir: PathBuf,
    pub challenges: ChallengeService<JsonStore>,
    pub topics: TopicsService<JsonStore>,
}

/// Application setup - called once on startup
pub async fn setup(data_dir: PathBuf) -> Result<App> {
    tracing::info!("Initializing application");
    tracing::info!("Data directory: {:?}", data_dir);

    if data_dir.is_file() {
        return Err(AppError::Generic(format!(
            "Data path is not a directory: {:?}",
            data_dir
        )));
    }

    let store = JsonStore::new(data_dir.clone());
    store.initialize().await?;

    let challenges = ChallengeService::new(store.clone());
    challenges.load().await?;

    tracing::info!("Application initialized successfully");

    Ok(App {
        data_dir,
        challenges,
        topics: TopicsService::new(store),
    })
}
