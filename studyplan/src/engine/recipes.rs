//! Per-type task recipes
//!
//! Each challenge type expands one (subject, topic) pairing into one to
//! three task templates. Minutes are floored percentages of the daily
//! budget, computed independently per template.

use crate::config::MOCK_TEST_PROBABILITY;
use crate::models::{ChallengeType, Difficulty, Subject, TaskType};
use rand::Rng;

/// A task before it is pinned to a date and challenge
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskTemplate {
    pub subject: Subject,
    pub topic: String,
    pub task_type: TaskType,
    pub description: String,
    pub time_allotted: u32,
    pub difficulty: Difficulty,
}

/// Expand a topic into templates for `challenge_type`.
///
/// Only the mock recipe draws from `rng`. Callers are expected to have
/// validated `daily_time_hours`; out-of-range values saturate instead of
/// overflowing.
pub fn templates_for<R: Rng + ?Sized>(
    challenge_type: &ChallengeType,
    subject: Subject,
    topic: &str,
    daily_time_hours: u32,
    rng: &mut R,
) -> Vec<TaskTemplate> {
    let total_minutes = u64::from(daily_time_hours.saturating_mul(60));
    let template = |task_type: TaskType, percent: u32, difficulty: Difficulty, description: String| {
        TaskTemplate {
            subject,
            topic: topic.to_string(),
            task_type,
            description,
            time_allotted: (total_minutes * u64::from(percent) / 100) as u32,
            difficulty,
        }
    };

    use Difficulty::*;
    use TaskType::*;

    match challenge_type {
        ChallengeType::Revision => vec![
            template(Theory, 40, Medium, format!("Review {} concepts and formulas", topic)),
            template(Practice, 60, Medium, format!("Solve practice problems on {}", topic)),
        ],
        ChallengeType::Dpp => vec![
            template(Dpp, 80, Hard, format!("Daily Practice Problems - {}", topic)),
            template(Revision, 20, Easy, format!("Quick revision of {} mistakes", topic)),
        ],
        ChallengeType::Backlog => vec![
            template(Theory, 50, Medium, format!("Complete {} chapter from scratch", topic)),
            template(Practice, 50, Hard, format!("Solve all {} exercises", topic)),
        ],
        ChallengeType::Mock => {
            if rng.gen_bool(MOCK_TEST_PROBABILITY) {
                vec![template(
                    MockTest,
                    100,
                    Hard,
                    format!("Full length mock test - {}", subject),
                )]
            } else {
                vec![
                    template(Revision, 40, Medium, format!("Strategic revision of {}", topic)),
                    template(Practice, 60, Hard, format!("Timed practice - {}", topic)),
                ]
            }
        }
        ChallengeType::WeakAreas => vec![
            template(
                VideoLecture,
                30,
                Easy,
                format!("Watch conceptual video on {} fundamentals", topic),
            ),
            template(
                Practice,
                70,
                Hard,
                format!("Intensive practice on {} problem areas", topic),
            ),
        ],
        ChallengeType::IntensivePractice => vec![
            template(
                SpeedDrill,
                60,
                Hard,
                format!("Speed solving drill - {} (time pressure)", topic),
            ),
            template(
                IntensivePractice,
                40,
                Hard,
                format!("High-intensity problem marathon - {}", topic),
            ),
        ],
        ChallengeType::ConceptMastery => vec![
            template(
                ConceptMapping,
                30,
                Medium,
                format!("Create concept map for {} connections", topic),
            ),
            template(
                ConceptMastery,
                40,
                Medium,
                format!("Deep conceptual study of {} principles", topic),
            ),
            template(
                Practice,
                30,
                Hard,
                format!("Apply {} concepts to challenging problems", topic),
            ),
        ],
        ChallengeType::ExamSimulation => vec![
            template(
                ExamSimulation,
                80,
                Hard,
                format!("JEE-style exam simulation - {} section", topic),
            ),
            template(Revision, 20, Medium, format!("Quick review of {} exam mistakes", topic)),
        ],
        ChallengeType::FormulaSprint => vec![
            template(
                FormulaPractice,
                60,
                Medium,
                format!("Formula derivation and memorization - {}", topic),
            ),
            template(SpeedDrill, 40, Easy, format!("Quick formula application - {}", topic)),
        ],
        ChallengeType::PreviousYears => vec![
            template(
                PreviousYear,
                70,
                Hard,
                format!("Solve JEE previous year questions - {}", topic),
            ),
            template(
                Revision,
                30,
                Medium,
                format!("Analyze {} question patterns and solutions", topic),
            ),
        ],
        ChallengeType::SpeedAccuracy => vec![
            template(SpeedDrill, 50, Medium, format!("Speed practice - {} (accuracy focus)", topic)),
            template(IntensivePractice, 50, Hard, format!("Timed problem solving - {}", topic)),
        ],
        ChallengeType::FullSyllabus | ChallengeType::Other(_) => vec![
            template(Theory, 40, Medium, format!("Study {} concepts thoroughly", topic)),
            template(Practice, 60, Medium, format!("Solve {} problems and examples", topic)),
        ],
    }
}
