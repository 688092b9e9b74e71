// Study challenge planner
// Entry point: loads the data directory and prints today's plan

use anyhow::Context;
use serde_json::json;
use studyplan::config::{data_dir_from_env, CHALLENGE_PRESETS, DEFAULT_LOG_FILTER};
use studyplan::engine;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!("Starting studyplan");

    let data_dir = data_dir_from_env();
    let app = studyplan::app::setup(data_dir.clone())
        .await
        .with_context(|| format!("failed to open data directory {}", data_dir.display()))?;

    let today = engine::today();
    let stats = app.challenges.stats().await;
    let mut report = json!({
        "stats": stats,
        "today": app.challenges.day_summary(today).await,
        "tasks": app.challenges.tasks_for_date(today).await,
    });

    // Nothing planned yet: suggest where to start
    if stats.total == 0 {
        report["presets"] = json!(CHALLENGE_PRESETS);
    }

    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
