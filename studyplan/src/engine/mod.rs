//! Scheduling engine
//!
//! Pure functions that turn a challenge into dated tasks and derive
//! progress from those tasks. Nothing here touches storage.

pub mod generator;
pub mod progress;
pub mod recipes;

pub use generator::generate_tasks;
pub use progress::{compute_streaks, recompute_progress, Streaks};
pub use recipes::{templates_for, TaskTemplate};

use chrono::{Local, NaiveDate};

/// Today's date on the local calendar
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}
