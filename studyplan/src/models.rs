//! Domain models
//!
//! Rust structs representing persisted challenges and daily tasks.
//! All models use serde with camelCase field names so the stored JSON
//! matches the layout the frontend writes.

use crate::config::{MAX_DAILY_TIME_HOURS, MIN_DAILY_TIME_HOURS, MIN_DURATION_DAYS};
use crate::error::{AppError, Result};
use chrono::{DateTime, Days, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Exam subject
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Subject {
    Physics,
    Chemistry,
    Mathematics,
}

impl Subject {
    pub const ALL: [Subject; 3] = [Subject::Physics, Subject::Chemistry, Subject::Mathematics];

    pub fn as_str(&self) -> &'static str {
        match self {
            Subject::Physics => "Physics",
            Subject::Chemistry => "Chemistry",
            Subject::Mathematics => "Mathematics",
        }
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Challenge archetype. Unknown values are kept verbatim and scheduled
/// with the default recipe.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ChallengeType {
    Revision,
    Backlog,
    Dpp,
    Mock,
    WeakAreas,
    FullSyllabus,
    IntensivePractice,
    ConceptMastery,
    ExamSimulation,
    FormulaSprint,
    PreviousYears,
    SpeedAccuracy,
    Other(String),
}

impl ChallengeType {
    pub fn as_str(&self) -> &str {
        match self {
            ChallengeType::Revision => "revision",
            ChallengeType::Backlog => "backlog",
            ChallengeType::Dpp => "dpp",
            ChallengeType::Mock => "mock",
            ChallengeType::WeakAreas => "weak-areas",
            ChallengeType::FullSyllabus => "full-syllabus",
            ChallengeType::IntensivePractice => "intensive-practice",
            ChallengeType::ConceptMastery => "concept-mastery",
            ChallengeType::ExamSimulation => "exam-simulation",
            ChallengeType::FormulaSprint => "formula-sprint",
            ChallengeType::PreviousYears => "previous-years",
            ChallengeType::SpeedAccuracy => "speed-accuracy",
            ChallengeType::Other(s) => s,
        }
    }
}

impl From<String> for ChallengeType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "revision" => ChallengeType::Revision,
            "backlog" => ChallengeType::Backlog,
            "dpp" => ChallengeType::Dpp,
            "mock" => ChallengeType::Mock,
            "weak-areas" => ChallengeType::WeakAreas,
            "full-syllabus" => ChallengeType::FullSyllabus,
            "intensive-practice" => ChallengeType::IntensivePractice,
            "concept-mastery" => ChallengeType::ConceptMastery,
            "exam-simulation" => ChallengeType::ExamSimulation,
            "formula-sprint" => ChallengeType::FormulaSprint,
            "previous-years" => ChallengeType::PreviousYears,
            "speed-accuracy" => ChallengeType::SpeedAccuracy,
            _ => ChallengeType::Other(value),
        }
    }
}

impl From<&str> for ChallengeType {
    fn from(value: &str) -> Self {
        ChallengeType::from(value.to_string())
    }
}

impl From<ChallengeType> for String {
    fn from(value: ChallengeType) -> Self {
        match value {
            ChallengeType::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for ChallengeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle state of a challenge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChallengeStatus {
    #[default]
    Active,
    Paused,
    Completed,
    Archived,
}

impl ChallengeStatus {
    /// Whether a user action may move a challenge from `self` to `next`.
    ///
    /// active <-> paused, active -> completed, anything not archived ->
    /// archived, archived -> active. Staying put is always allowed.
    pub fn can_transition_to(self, next: ChallengeStatus) -> bool {
        use ChallengeStatus::*;

        if self == next {
            return true;
        }

        matches!(
            (self, next),
            (Active, Paused)
                | (Paused, Active)
                | (Active, Completed)
                | (Active, Archived)
                | (Paused, Archived)
                | (Completed, Archived)
                | (Archived, Active)
        )
    }
}

impl fmt::Display for ChallengeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ChallengeStatus::Active => "active",
            ChallengeStatus::Paused => "paused",
            ChallengeStatus::Completed => "completed",
            ChallengeStatus::Archived => "archived",
        };
        f.write_str(s)
    }
}

/// Kind of study work a task asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskType {
    Theory,
    Practice,
    Revision,
    MockTest,
    Dpp,
    ConceptMastery,
    IntensivePractice,
    ExamSimulation,
    FormulaPractice,
    PreviousYear,
    SpeedDrill,
    VideoLecture,
    ConceptMapping,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// Derived progress summary stored alongside a challenge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Progress {
    pub completed_days: u32,
    pub total_days: u32,
    pub completed_tasks: u32,
    pub total_tasks: u32,
    pub current_streak: u32,
    pub longest_streak: u32,
}

impl Progress {
    /// Fresh progress for a challenge of `total_days` days
    pub fn zeroed(total_days: u32) -> Self {
        Self {
            total_days,
            ..Self::default()
        }
    }

    /// Share of days with at least one completed task, 0-100
    pub fn day_completion_percent(&self) -> f64 {
        percent(self.completed_days, self.total_days)
    }

    /// Share of completed tasks, 0-100
    pub fn task_completion_percent(&self) -> f64 {
        percent(self.completed_tasks, self.total_tasks)
    }
}

fn percent(part: u32, whole: u32) -> f64 {
    if whole == 0 {
        0.0
    } else {
        f64::from(part) * 100.0 / f64::from(whole)
    }
}

/// A time-boxed study plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Challenge {
    pub id: String,
    #[serde(rename = "type")]
    pub challenge_type: ChallengeType,
    pub name: String,
    pub duration: u32,
    pub subjects: Vec<Subject>,
    pub topics: BTreeMap<Subject, Vec<String>>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub daily_time_hours: u32,
    pub status: ChallengeStatus,
    pub created_at: DateTime<Utc>,
    pub progress: Progress,
}

impl Challenge {
    /// Topics selected for `subject`, empty when none were chosen
    pub fn topics_for(&self, subject: Subject) -> &[String] {
        self.topics.get(&subject).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every calendar day from start to end, inclusive
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.start_date
            .iter_days()
            .take_while(move |date| *date <= self.end_date)
    }

    pub fn contains_date(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }

    /// Apply a partial update. Status transitions are checked by the caller.
    pub fn apply(&mut self, update: &ChallengeUpdate) {
        if let Some(name) = &update.name {
            self.name = name.clone();
        }
        if let Some(status) = update.status {
            self.status = status;
        }
        if let Some(hours) = update.daily_time_hours {
            self.daily_time_hours = hours;
        }
    }
}

/// Last day of a challenge starting on `start` and lasting `duration` days
pub fn end_date_for(start: NaiveDate, duration: u32) -> NaiveDate {
    let extra = u64::from(duration.saturating_sub(1));
    start.checked_add_days(Days::new(extra)).unwrap_or(NaiveDate::MAX)
}

/// One scheduled unit of study work
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyTask {
    pub id: String,
    pub challenge_id: String,
    pub date: NaiveDate,
    pub subject: Subject,
    pub topic: String,
    pub task_type: TaskType,
    pub description: String,
    /// Minutes
    pub time_allotted: u32,
    pub difficulty: Difficulty,
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl DailyTask {
    /// Apply a partial update, keeping `completed_at` in step with `completed`.
    pub fn apply(&mut self, update: &TaskUpdate, now: DateTime<Utc>) {
        if let Some(description) = &update.description {
            self.description = description.clone();
        }
        if let Some(minutes) = update.time_allotted {
            self.time_allotted = minutes;
        }
        if let Some(difficulty) = update.difficulty {
            self.difficulty = difficulty;
        }
        if let Some(notes) = &update.notes {
            // Blank notes clear the field
            self.notes = Some(notes.trim())
                .filter(|n| !n.is_empty())
                .map(str::to_string);
        }
        if let Some(date) = update.date {
            self.date = date;
        }
        match update.completed {
            Some(true) => {
                self.completed = true;
                if self.completed_at.is_none() {
                    self.completed_at = Some(now);
                }
            }
            Some(false) => {
                self.completed = false;
                self.completed_at = None;
            }
            None => {}
        }
    }
}

/// Create challenge request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewChallenge {
    #[serde(rename = "type")]
    pub challenge_type: ChallengeType,
    pub name: String,
    pub duration: u32,
    pub subjects: Vec<Subject>,
    pub topics: BTreeMap<Subject, Vec<String>>,
    pub start_date: NaiveDate,
    pub daily_time_hours: u32,
    #[serde(default)]
    pub status: ChallengeStatus,
}

impl NewChallenge {
    /// Reject requests the scheduler cannot sensibly plan.
    ///
    /// Empty subject or topic selections are accepted here; they produce an
    /// empty schedule.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(AppError::Validation("Challenge name is required".into()));
        }
        if self.duration < MIN_DURATION_DAYS {
            return Err(AppError::Validation(format!(
                "Duration must be at least {} day",
                MIN_DURATION_DAYS
            )));
        }
        validate_daily_hours(self.daily_time_hours)
    }
}

pub(crate) fn validate_daily_hours(hours: u32) -> Result<()> {
    if !(MIN_DAILY_TIME_HOURS..=MAX_DAILY_TIME_HOURS).contains(&hours) {
        return Err(AppError::Validation(format!(
            "Daily time must be between {} and {} hours, got {}",
            MIN_DAILY_TIME_HOURS, MAX_DAILY_TIME_HOURS, hours
        )));
    }
    Ok(())
}

/// Update challenge request
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeUpdate {
    pub name: Option<String>,
    pub status: Option<ChallengeStatus>,
    pub daily_time_hours: Option<u32>,
}

/// Manually added task
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    pub challenge_id: String,
    pub date: NaiveDate,
    pub subject: Subject,
    pub topic: String,
    pub task_type: TaskType,
    pub description: String,
    pub time_allotted: u32,
    pub difficulty: Difficulty,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Update task request
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskUpdate {
    pub completed: Option<bool>,
    pub description: Option<String>,
    pub time_allotted: Option<u32>,
    pub difficulty: Option<Difficulty>,
    /// An empty string removes existing notes
    pub notes: Option<String>,
    pub date: Option<NaiveDate>,
}

impl TaskUpdate {
    pub fn completed(completed: bool) -> Self {
        Self {
            completed: Some(completed),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn sample_task() -> DailyTask {
        DailyTask {
            id: "t1".into(),
            challenge_id: "c1".into(),
            date: date("2024-01-01"),
            subject: Subject::Physics,
            topic: "Vectors".into(),
            task_type: TaskType::MockTest,
            description: "Full length mock test - Physics".into(),
            time_allotted: 120,
            difficulty: Difficulty::Hard,
            completed: false,
            completed_at: None,
            notes: None,
        }
    }

    #[test]
    fn test_challenge_type_preserves_unknown_values() {
        let known: ChallengeType = serde_json::from_str("\"weak-areas\"").unwrap();
        assert_eq!(known, ChallengeType::WeakAreas);

        let unknown: ChallengeType = serde_json::from_str("\"night-owl\"").unwrap();
        assert_eq!(unknown, ChallengeType::Other("night-owl".into()));
        assert_eq!(serde_json::to_string(&unknown).unwrap(), "\"night-owl\"");
    }

    #[test]
    fn test_task_json_layout() {
        let json = serde_json::to_value(sample_task()).unwrap();

        assert_eq!(json["challengeId"], "c1");
        assert_eq!(json["date"], "2024-01-01");
        assert_eq!(json["taskType"], "mock-test");
        assert_eq!(json["difficulty"], "hard");
        assert!(json.get("completedAt").is_none());
        assert!(json.get("notes").is_none());
    }

    #[test]
    fn test_completion_stamps_and_clears_timestamp() {
        let mut task = sample_task();
        let first = Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap();
        let later = Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap();

        task.apply(&TaskUpdate::completed(true), first);
        assert!(task.completed);
        assert_eq!(task.completed_at, Some(first));

        // Re-completing keeps the original stamp
        task.apply(&TaskUpdate::completed(true), later);
        assert_eq!(task.completed_at, Some(first));

        task.apply(&TaskUpdate::completed(false), later);
        assert!(!task.completed);
        assert!(task.completed_at.is_none());
    }

    #[test]
    fn test_blank_notes_clear_existing_notes() {
        let mut task = sample_task();
        let now = Utc::now();
        let notes = |text: &str| TaskUpdate {
            notes: Some(text.to_string()),
            ..TaskUpdate::default()
        };

        task.apply(&notes(" redo Q4 "), now);
        assert_eq!(task.notes.as_deref(), Some("redo Q4"));

        // Leaving notes out keeps them
        task.apply(&TaskUpdate::completed(true), now);
        assert_eq!(task.notes.as_deref(), Some("redo Q4"));

        task.apply(&notes("   "), now);
        assert!(task.notes.is_none());
    }

    #[test]
    fn test_status_transitions() {
        use ChallengeStatus::*;

        assert!(Active.can_transition_to(Paused));
        assert!(Paused.can_transition_to(Active));
        assert!(Active.can_transition_to(Completed));
        assert!(Archived.can_transition_to(Active));
        assert!(Completed.can_transition_to(Archived));
        assert!(!Completed.can_transition_to(Active));
        assert!(!Paused.can_transition_to(Completed));
        assert!(!Archived.can_transition_to(Paused));
    }

    #[test]
    fn test_end_date_for_is_inclusive() {
        assert_eq!(end_date_for(date("2024-01-01"), 5), date("2024-01-05"));
        assert_eq!(end_date_for(date("2024-01-01"), 1), date("2024-01-01"));
        assert_eq!(end_date_for(date("2024-02-27"), 4), date("2024-03-01"));
    }

    #[test]
    fn test_new_challenge_validation() {
        let mut req = NewChallenge {
            challenge_type: ChallengeType::Revision,
            name: "Sprint".into(),
            duration: 15,
            subjects: vec![Subject::Physics],
            topics: BTreeMap::new(),
            start_date: date("2024-01-01"),
            daily_time_hours: 4,
            status: ChallengeStatus::Active,
        };
        assert!(req.validate().is_ok());

        req.daily_time_hours = 13;
        assert!(matches!(req.validate(), Err(AppError::Validation(_))));

        req.daily_time_hours = 4;
        req.duration = 0;
        assert!(matches!(req.validate(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_progress_percentages() {
        let progress = Progress {
            completed_days: 3,
            total_days: 12,
            completed_tasks: 0,
            total_tasks: 0,
            current_streak: 1,
            longest_streak: 2,
        };
        assert_eq!(progress.day_completion_percent(), 25.0);
        assert_eq!(progress.task_completion_percent(), 0.0);
    }
}
