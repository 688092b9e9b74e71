//! Error types for the study planner
//!
//! All errors use thiserror for structured error handling.
//! The pure scheduling and progress functions never return these; they
//! surface from the storage and service layers.

use crate::models::ChallengeStatus;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Challenge not found: {0}")]
    ChallengeNotFound(String),

    #[error("Task not found: {0}")]
    TaskNotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Cannot move challenge from {from} to {to}")]
    InvalidStatusTransition {
        from: ChallengeStatus,
        to: ChallengeStatus,
    },

    #[error("{0}")]
    Generic(String),
}

impl serde::Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
