//! Topics service
//!
//! Manages user-added topics on top of the built-in syllabus.

use crate::catalog::{TopicCatalog, TopicMatch};
use crate::error::Result;
use crate::models::Subject;
use crate::storage::TopicStore;

/// Service for managing custom topics
#[derive(Clone)]
pub struct TopicsService<S> {
    store: S,
}

impl<S: TopicStore> TopicsService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Load the catalog with the current custom topics
    pub async fn catalog(&self) -> TopicCatalog {
        TopicCatalog::new(self.store.custom_topics().await)
    }

    /// Merged topic list for a subject
    pub async fn topics_for_subject(&self, subject: Subject) -> Vec<String> {
        self.catalog().await.topics_for_subject(subject)
    }

    pub async fn add_topic(&self, subject: Subject, topic: &str) -> Result<()> {
        let mut catalog = self.catalog().await;
        catalog.add_topic(subject, topic)?;
        self.store.save_custom_topics(catalog.custom_topics()).await?;
        tracing::info!("Added custom topic to {}: {}", subject, topic.trim());
        Ok(())
    }

    /// Bulk add, returning how many topics were new
    pub async fn add_topics(&self, subject: Subject, topics: &[String]) -> Result<usize> {
        let mut catalog = self.catalog().await;
        let added = catalog.add_topics(subject, topics);
        if added > 0 {
            self.store.save_custom_topics(catalog.custom_topics()).await?;
        }
        tracing::info!("Added {} custom topics to {}", added, subject);
        Ok(added)
    }

    pub async fn rename_topic(&self, subject: Subject, from: &str, to: &str) -> Result<()> {
        let mut catalog = self.catalog().await;
        catalog.rename_topic(subject, from, to)?;
        self.store.save_custom_topics(catalog.custom_topics()).await
    }

    /// Remove a custom topic. Returns false when it was not a custom topic.
    pub async fn remove_topic(&self, subject: Subject, topic: &str) -> Result<bool> {
        let mut catalog = self.catalog().await;
        let removed = catalog.remove_topic(subject, topic);
        if removed {
            self.store.save_custom_topics(catalog.custom_topics()).await?;
            tracing::info!("Removed custom topic from {}: {}", subject, topic);
        }
        Ok(removed)
    }

    pub async fn search(&self, query: &str, subject: Option<Subject>) -> Vec<TopicMatch> {
        self.catalog().await.search(query, subject)
    }
}
