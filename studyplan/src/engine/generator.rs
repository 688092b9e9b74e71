//! Daily schedule generation
//!
//! Spreads a challenge's topics over its days and expands each selected
//! topic through the challenge type's recipe.

use super::recipes::{templates_for, TaskTemplate};
use crate::models::{Challenge, DailyTask, Subject};
use chrono::NaiveDate;
use rand::Rng;

/// Build the full task schedule for a challenge.
///
/// Topics are flattened in subject order, then day `d` takes every topic
/// whose index `i` satisfies `i % duration == d % topic_count`, falling back
/// to topic `d % topic_count` if nothing matches. The result is ordered by
/// day, then by template. Returns an empty schedule when no topics are
/// selected.
pub fn generate_tasks<R: Rng + ?Sized>(challenge: &Challenge, rng: &mut R) -> Vec<DailyTask> {
    let pool: Vec<(Subject, &str)> = challenge
        .subjects
        .iter()
        .flat_map(|&subject| {
            challenge
                .topics_for(subject)
                .iter()
                .map(move |topic| (subject, topic.as_str()))
        })
        .collect();

    if pool.is_empty() {
        tracing::warn!("No topics found for challenge: {}", challenge.id);
        return Vec::new();
    }

    let days = challenge.duration as usize;
    let topic_count = pool.len();
    let mut tasks = Vec::new();

    for (day_index, date) in challenge.start_date.iter_days().take(days).enumerate() {
        let slot = day_index % topic_count;

        let mut selected: Vec<(Subject, &str)> = pool
            .iter()
            .enumerate()
            .filter(|(index, _)| index % days == slot)
            .map(|(_, entry)| *entry)
            .collect();

        if selected.is_empty() {
            selected.push(pool[slot]);
        }

        // Counts across the whole day so two topics of one subject never
        // share an id.
        let mut template_index = 0;
        for (subject, topic) in selected {
            let templates = templates_for(
                &challenge.challenge_type,
                subject,
                topic,
                challenge.daily_time_hours,
                rng,
            );

            for template in templates {
                tasks.push(materialize(challenge, date, template_index, template));
                template_index += 1;
            }
        }
    }

    tracing::info!(
        "Generated {} tasks for challenge: {}",
        tasks.len(),
        challenge.name
    );

    tasks
}

fn materialize(
    challenge: &Challenge,
    date: NaiveDate,
    template_index: usize,
    template: TaskTemplate,
) -> DailyTask {
    DailyTask {
        id: format!(
            "{}-{}-{}-{}",
            challenge.id,
            date.format("%Y-%m-%d"),
            template.subject,
            template_index
        ),
        challenge_id: challenge.id.clone(),
        date,
        subject: template.subject,
        topic: template.topic,
        task_type: template.task_type,
        description: template.description,
        time_allotted: template.time_allotted,
        difficulty: template.difficulty,
        completed: false,
        completed_at: None,
        notes: None,
    }
}
