//! Services module
//!
//! Business logic services that coordinate between the engine, the
//! in-memory state and the stores.

pub mod challenges;
pub mod stats;
pub mod topics;

pub use challenges::ChallengeService;
pub use stats::{ChallengeStats, DaySummary};
pub use topics::TopicsService;
