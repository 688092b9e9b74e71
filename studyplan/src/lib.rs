//! Study challenge planner library
//!
//! Generates day-by-day study schedules for JEE preparation challenges
//! and tracks completion progress and streaks.

pub mod app;
pub mod catalog;
pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod services;
pub mod state;
pub mod storage;
