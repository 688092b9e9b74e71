//! Challenges service
//!
//! Coordinates the scheduling engine, the in-memory state and the stores.
//! Every operation reduces the state first, persists the result, and only
//! then commits the new state; a failed write leaves the state untouched.
//! The one exception is a delete that removed the tasks but not the
//! challenge: the state drops those tasks to match the store.

use super::stats::{ChallengeStats, DaySummary};
use crate::engine::{self, generate_tasks};
use crate::error::{AppError, Result};
use crate::models::{
    end_date_for, validate_daily_hours, Challenge, ChallengeStatus, ChallengeUpdate, DailyTask,
    NewChallenge, NewTask, Progress, TaskUpdate,
};
use crate::state::{reduce, AppState, Event};
use crate::storage::{ChallengeStore, DataExport, TaskStore, TopicStore};
use chrono::{NaiveDate, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

/// Service for managing challenges and their tasks
#[derive(Clone)]
pub struct ChallengeService<S> {
    store: S,
    state: Arc<Mutex<AppState>>,
    rng: Arc<Mutex<StdRng>>,
    today: fn() -> NaiveDate,
}

impl<S> ChallengeService<S>
where
    S: ChallengeStore + TaskStore + TopicStore,
{
    pub fn new(store: S) -> Self {
        Self {
            store,
            state: Arc::new(Mutex::new(AppState::default())),
            rng: Arc::new(Mutex::new(StdRng::from_entropy())),
            today: engine::today,
        }
    }

    /// Replace the random source used by the mock recipe
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = Arc::new(Mutex::new(rng));
        self
    }

    /// Replace the calendar used for streaks
    pub fn with_today(mut self, today: fn() -> NaiveDate) -> Self {
        self.today = today;
        self
    }

    /// Snapshot of the current state
    pub async fn state(&self) -> AppState {
        self.state.lock().await.clone()
    }

    /// Load everything from the stores and bring stored progress up to date
    pub async fn load(&self) -> Result<()> {
        let challenges = self.store.all_challenges().await;
        let tasks = self.store.all_tasks().await;
        let today = (self.today)();

        let refreshed: Vec<Challenge> = challenges
            .iter()
            .map(|c| engine::recompute_progress(c, &tasks, today))
            .collect();

        let mut state = self.state.lock().await;

        if refreshed != challenges {
            if let Err(e) = self.store.save_challenges(&refreshed).await {
                tracing::error!("Failed to save refreshed progress: {}", e);
                *state = reduce(state.clone(), Event::LoadFailed(e.to_string()));
                return Err(e);
            }
        }

        tracing::info!(
            "Loaded {} challenges and {} tasks",
            refreshed.len(),
            tasks.len()
        );

        *state = reduce(
            state.clone(),
            Event::Loaded {
                challenges: refreshed,
                tasks,
            },
        );

        Ok(())
    }

    /// Create a challenge and generate its schedule
    pub async fn create_challenge(&self, req: NewChallenge) -> Result<Challenge> {
        req.validate()?;
        tracing::info!("Creating new challenge: {}", req.name);

        let mut challenge = Challenge {
            id: format!("challenge-{}", Uuid::new_v4()),
            challenge_type: req.challenge_type,
            name: req.name,
            duration: req.duration,
            subjects: req.subjects,
            topics: req.topics,
            start_date: req.start_date,
            end_date: end_date_for(req.start_date, req.duration),
            daily_time_hours: req.daily_time_hours,
            status: req.status,
            created_at: Utc::now(),
            progress: Progress::zeroed(req.duration),
        };

        let tasks = {
            let mut rng = self.rng.lock().await;
            generate_tasks(&challenge, &mut *rng)
        };
        challenge.progress.total_tasks = tasks.len() as u32;

        let mut state = self.state.lock().await;
        let next = reduce(
            reduce(state.clone(), Event::ChallengeAdded(challenge.clone())),
            Event::TasksAdded(tasks.clone()),
        );

        // Tasks go first so a stored challenge always has its schedule
        self.store.add_tasks(tasks).await?;
        if let Err(e) = self.store.add_challenge(challenge.clone()).await {
            if let Err(rollback) = self.store.remove_tasks_for_challenge(&challenge.id).await {
                tracing::error!(
                    "Failed to roll back tasks for challenge {}: {}",
                    challenge.id,
                    rollback
                );
            }
            return Err(e);
        }
        *state = next;

        tracing::info!(
            "Created challenge \"{}\" with {} tasks",
            challenge.name,
            challenge.progress.total_tasks
        );

        Ok(challenge)
    }

    /// Update a challenge and refresh its progress
    pub async fn update_challenge(&self, id: &str, update: ChallengeUpdate) -> Result<Challenge> {
        tracing::debug!("Updating challenge: {}", id);

        let mut state = self.state.lock().await;
        let current = state
            .challenge(id)
            .ok_or_else(|| AppError::ChallengeNotFound(id.to_string()))?;

        if let Some(next_status) = update.status {
            if !current.status.can_transition_to(next_status) {
                return Err(AppError::InvalidStatusTransition {
                    from: current.status,
                    to: next_status,
                });
            }
        }
        if let Some(hours) = update.daily_time_hours {
            validate_daily_hours(hours)?;
        }
        if matches!(&update.name, Some(name) if name.trim().is_empty()) {
            return Err(AppError::Validation("Challenge name is required".into()));
        }

        let next = self.refreshed(
            reduce(
                state.clone(),
                Event::ChallengeUpdated {
                    challenge_id: id.to_string(),
                    update,
                },
            ),
            id,
        );
        let updated = next
            .challenge(id)
            .cloned()
            .ok_or_else(|| AppError::ChallengeNotFound(id.to_string()))?;

        self.store.replace_challenge(&updated).await?;
        *state = next;

        tracing::debug!("Challenge updated successfully: {}", id);

        Ok(updated)
    }

    /// Convenience wrapper for status-only updates
    pub async fn set_status(&self, id: &str, status: ChallengeStatus) -> Result<Challenge> {
        self.update_challenge(
            id,
            ChallengeUpdate {
                status: Some(status),
                ..ChallengeUpdate::default()
            },
        )
        .await
    }

    /// Delete a challenge and every task it owns
    pub async fn delete_challenge(&self, id: &str) -> Result<()> {
        tracing::info!("Deleting challenge: {}", id);

        let mut state = self.state.lock().await;
        if state.challenge(id).is_none() {
            return Err(AppError::ChallengeNotFound(id.to_string()));
        }

        let next = reduce(state.clone(), Event::ChallengeDeleted(id.to_string()));

        // Tasks go first so a failed delete never leaves orphans; retrying
        // finishes the cascade.
        let removed = self.store.remove_tasks_for_challenge(id).await?;
        if let Err(e) = self.store.remove_challenge(id).await {
            let mut remaining = state.clone();
            remaining.tasks.retain(|t| t.challenge_id != id);
            *state = self.refreshed(remaining, id);
            return Err(e);
        }
        *state = next;

        tracing::info!("Challenge deleted with {} tasks: {}", removed, id);

        Ok(())
    }

    /// Add a task by hand to an existing challenge
    pub async fn add_task(&self, req: NewTask) -> Result<DailyTask> {
        let mut state = self.state.lock().await;
        let challenge = state
            .challenge(&req.challenge_id)
            .ok_or_else(|| AppError::ChallengeNotFound(req.challenge_id.clone()))?;

        check_task_date(challenge, req.date)?;
        check_minutes(req.time_allotted)?;

        let task = DailyTask {
            id: format!("task-{}", Uuid::new_v4()),
            challenge_id: req.challenge_id,
            date: req.date,
            subject: req.subject,
            topic: req.topic,
            task_type: req.task_type,
            description: req.description,
            time_allotted: req.time_allotted,
            difficulty: req.difficulty,
            completed: false,
            completed_at: None,
            notes: req.notes,
        };

        let next = self.refreshed(
            reduce(state.clone(), Event::TasksAdded(vec![task.clone()])),
            &task.challenge_id,
        );

        self.store.add_task(task.clone()).await?;
        self.persist_challenge(&next, &task.challenge_id).await?;
        *state = next;

        tracing::debug!("Added task {} to challenge {}", task.id, task.challenge_id);

        Ok(task)
    }

    /// Update a task and refresh its challenge's progress
    pub async fn update_task(&self, id: &str, update: TaskUpdate) -> Result<DailyTask> {
        let mut state = self.state.lock().await;
        let task = state
            .task(id)
            .ok_or_else(|| AppError::TaskNotFound(id.to_string()))?;
        let challenge_id = task.challenge_id.clone();

        if let (Some(date), Some(challenge)) = (update.date, state.challenge(&challenge_id)) {
            check_task_date(challenge, date)?;
        }
        if let Some(minutes) = update.time_allotted {
            check_minutes(minutes)?;
        }

        let now = Utc::now();
        let next = self.refreshed(
            reduce(
                state.clone(),
                Event::TaskUpdated {
                    task_id: id.to_string(),
                    update: update.clone(),
                    now,
                },
            ),
            &challenge_id,
        );

        self.store
            .update_task(id, &update, now)
            .await?
            .ok_or_else(|| AppError::TaskNotFound(id.to_string()))?;
        self.persist_challenge(&next, &challenge_id).await?;

        let updated = next
            .task(id)
            .cloned()
            .ok_or_else(|| AppError::TaskNotFound(id.to_string()))?;
        *state = next;

        Ok(updated)
    }

    /// Mark a task done or not done
    pub async fn set_task_completed(&self, id: &str, completed: bool) -> Result<DailyTask> {
        self.update_task(id, TaskUpdate::completed(completed)).await
    }

    /// Delete a task and refresh its challenge's progress
    pub async fn delete_task(&self, id: &str) -> Result<()> {
        let mut state = self.state.lock().await;
        let challenge_id = state
            .task(id)
            .map(|t| t.challenge_id.clone())
            .ok_or_else(|| AppError::TaskNotFound(id.to_string()))?;

        let next = self.refreshed(
            reduce(state.clone(), Event::TaskDeleted(id.to_string())),
            &challenge_id,
        );

        self.store.remove_task(id).await?;
        self.persist_challenge(&next, &challenge_id).await?;
        *state = next;

        tracing::debug!("Deleted task {} from challenge {}", id, challenge_id);

        Ok(())
    }

    /// Tasks due on `date`, hiding those of paused or missing challenges
    pub async fn tasks_for_date(&self, date: NaiveDate) -> Vec<DailyTask> {
        let state = self.state.lock().await;
        let status_by_id: HashMap<&str, ChallengeStatus> = state
            .challenges
            .iter()
            .map(|c| (c.id.as_str(), c.status))
            .collect();

        state
            .tasks
            .iter()
            .filter(|t| t.date == date)
            .filter(|t| {
                matches!(
                    status_by_id.get(t.challenge_id.as_str()),
                    Some(status) if *status != ChallengeStatus::Paused
                )
            })
            .cloned()
            .collect()
    }

    pub async fn tasks_for_challenge(&self, challenge_id: &str) -> Vec<DailyTask> {
        let state = self.state.lock().await;
        state
            .tasks
            .iter()
            .filter(|t| t.challenge_id == challenge_id)
            .cloned()
            .collect()
    }

    pub async fn stats(&self) -> ChallengeStats {
        ChallengeStats::from_challenges(&self.state.lock().await.challenges)
    }

    /// Workload summary for the tasks shown on `date`
    pub async fn day_summary(&self, date: NaiveDate) -> DaySummary {
        DaySummary::from_tasks(date, &self.tasks_for_date(date).await)
    }

    /// Snapshot everything in the stores
    pub async fn export_data(&self) -> DataExport {
        DataExport {
            challenges: self.store.all_challenges().await,
            tasks: self.store.all_tasks().await,
            custom_topics: self.store.custom_topics().await,
            export_date: Utc::now(),
        }
    }

    /// Replace stored data with a snapshot and reload
    pub async fn import_data(&self, data: DataExport) -> Result<()> {
        self.store.save_challenges(&data.challenges).await?;
        self.store.save_tasks(&data.tasks).await?;
        self.store.save_custom_topics(&data.custom_topics).await?;
        tracing::info!(
            "Imported {} challenges and {} tasks",
            data.challenges.len(),
            data.tasks.len()
        );
        self.load().await
    }

    fn refreshed(&self, state: AppState, challenge_id: &str) -> AppState {
        reduce(
            state,
            Event::ProgressRefreshed {
                challenge_id: challenge_id.to_string(),
                today: (self.today)(),
            },
        )
    }

    async fn persist_challenge(&self, state: &AppState, challenge_id: &str) -> Result<()> {
        if let Some(challenge) = state.challenge(challenge_id) {
            self.store.replace_challenge(challenge).await?;
        }
        Ok(())
    }
}

fn check_task_date(challenge: &Challenge, date: NaiveDate) -> Result<()> {
    if !challenge.contains_date(date) {
        return Err(AppError::Validation(format!(
            "Task date {} is outside challenge {} ({} to {})",
            date, challenge.id, challenge.start_date, challenge.end_date
        )));
    }
    Ok(())
}

fn check_minutes(minutes: u32) -> Result<()> {
    if minutes == 0 {
        return Err(AppError::Validation("Time allotted must be positive".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ChallengeType, Difficulty, Subject, TaskType};
    use crate::catalog::CustomTopics;
    use crate::storage::MemoryStore;
    use std::collections::BTreeMap;
    use std::sync::atomic::{AtomicBool, Ordering};

    /// Memory store whose writes can be switched to fail per key
    #[derive(Clone, Default)]
    struct FailingStore {
        inner: MemoryStore,
        fail_challenges: Arc<AtomicBool>,
        fail_tasks: Arc<AtomicBool>,
    }

    impl FailingStore {
        fn failure(what: &str) -> AppError {
            AppError::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                format!("{} write refused", what),
            ))
        }
    }

    impl ChallengeStore for FailingStore {
        async fn all_challenges(&self) -> Vec<Challenge> {
            self.inner.all_challenges().await
        }

        async fn save_challenges(&self, challenges: &[Challenge]) -> Result<()> {
            if self.fail_challenges.load(Ordering::SeqCst) {
                return Err(Self::failure("challenge"));
            }
            self.inner.save_challenges(challenges).await
        }
    }

    impl TaskStore for FailingStore {
        async fn all_tasks(&self) -> Vec<DailyTask> {
            self.inner.all_tasks().await
        }

        async fn save_tasks(&self, tasks: &[DailyTask]) -> Result<()> {
            if self.fail_tasks.load(Ordering::SeqCst) {
                return Err(Self::failure("task"));
            }
            self.inner.save_tasks(tasks).await
        }
    }

    impl TopicStore for FailingStore {
        async fn custom_topics(&self) -> CustomTopics {
            self.inner.custom_topics().await
        }

        async fn save_custom_topics(&self, topics: &CustomTopics) -> Result<()> {
            self.inner.save_custom_topics(topics).await
        }
    }

    async fn create_failing_service() -> (ChallengeService<FailingStore>, FailingStore) {
        let store = FailingStore::default();
        let service = ChallengeService::new(store.clone())
            .with_rng(StdRng::seed_from_u64(11))
            .with_today(third_day);
        service.load().await.unwrap();
        (service, store)
    }

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    fn third_day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 3).unwrap()
    }

    async fn create_test_service() -> (ChallengeService<MemoryStore>, MemoryStore) {
        let store = MemoryStore::new();
        let service = ChallengeService::new(store.clone())
            .with_rng(StdRng::seed_from_u64(11))
            .with_today(third_day);
        service.load().await.unwrap();
        (service, store)
    }

    fn revision_request() -> NewChallenge {
        NewChallenge {
            challenge_type: ChallengeType::Revision,
            name: "Mechanics sprint".into(),
            duration: 5,
            subjects: vec![Subject::Physics],
            topics: BTreeMap::from([(
                Subject::Physics,
                vec!["Vectors".to_string(), "Friction".to_string()],
            )]),
            start_date: start(),
            daily_time_hours: 3,
            status: ChallengeStatus::Active,
        }
    }

    #[tokio::test]
    async fn test_create_challenge_generates_tasks() {
        let (service, store) = create_test_service().await;

        let challenge = service.create_challenge(revision_request()).await.unwrap();

        assert!(challenge.id.starts_with("challenge-"));
        assert_eq!(challenge.end_date, NaiveDate::from_ymd_opt(2024, 1, 5).unwrap());
        assert_eq!(challenge.progress.total_tasks, 10);
        assert_eq!(challenge.progress.total_days, 5);
        assert_eq!(store.all_tasks().await.len(), 10);
        assert_eq!(service.tasks_for_challenge(&challenge.id).await.len(), 10);
    }

    #[tokio::test]
    async fn test_invalid_request_rejected() {
        let (service, store) = create_test_service().await;
        let mut req = revision_request();
        req.daily_time_hours = 0;

        assert!(matches!(
            service.create_challenge(req).await,
            Err(AppError::Validation(_))
        ));
        assert!(store.all_challenges().await.is_empty());
    }

    #[tokio::test]
    async fn test_completing_tasks_updates_progress() {
        let (service, store) = create_test_service().await;
        let challenge = service.create_challenge(revision_request()).await.unwrap();

        for day in [start(), start().succ_opt().unwrap(), third_day()] {
            let task = service.tasks_for_date(day).await.remove(0);
            let done = service.set_task_completed(&task.id, true).await.unwrap();
            assert!(done.completed_at.is_some());
        }

        let stored = store.get_challenge(&challenge.id).await.unwrap();
        assert_eq!(stored.progress.completed_tasks, 3);
        assert_eq!(stored.progress.completed_days, 3);
        assert_eq!(stored.progress.current_streak, 3);
        assert_eq!(stored.progress.longest_streak, 3);

        // Undoing today's work breaks the current streak but not the record
        let today_task = service.tasks_for_date(third_day()).await.remove(0);
        let undone = service.set_task_completed(&today_task.id, false).await.unwrap();
        assert!(undone.completed_at.is_none());

        let stored = store.get_challenge(&challenge.id).await.unwrap();
        assert_eq!(stored.progress.current_streak, 0);
        assert_eq!(stored.progress.longest_streak, 3);
    }

    #[tokio::test]
    async fn test_status_machine() {
        let (service, _store) = create_test_service().await;
        let challenge = service.create_challenge(revision_request()).await.unwrap();

        let paused = service.set_status(&challenge.id, ChallengeStatus::Paused).await.unwrap();
        assert_eq!(paused.status, ChallengeStatus::Paused);

        let err = service
            .set_status(&challenge.id, ChallengeStatus::Completed)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidStatusTransition { .. }));

        service.set_status(&challenge.id, ChallengeStatus::Active).await.unwrap();
        service.set_status(&challenge.id, ChallengeStatus::Completed).await.unwrap();
        service.set_status(&challenge.id, ChallengeStatus::Archived).await.unwrap();
        let revived = service.set_status(&challenge.id, ChallengeStatus::Active).await.unwrap();
        assert_eq!(revived.status, ChallengeStatus::Active);
    }

    #[tokio::test]
    async fn test_paused_challenges_hidden_from_today() {
        let (service, _store) = create_test_service().await;
        let challenge = service.create_challenge(revision_request()).await.unwrap();

        assert_eq!(service.tasks_for_date(third_day()).await.len(), 2);

        service.set_status(&challenge.id, ChallengeStatus::Paused).await.unwrap();
        assert!(service.tasks_for_date(third_day()).await.is_empty());
        assert_eq!(service.tasks_for_challenge(&challenge.id).await.len(), 10);
    }

    #[tokio::test]
    async fn test_add_and_delete_task() {
        let (service, store) = create_test_service().await;
        let challenge = service.create_challenge(revision_request()).await.unwrap();

        let extra = NewTask {
            challenge_id: challenge.id.clone(),
            date: third_day(),
            subject: Subject::Physics,
            topic: "Vectors".into(),
            task_type: TaskType::Revision,
            description: "Flashcards".into(),
            time_allotted: 15,
            difficulty: Difficulty::Easy,
            notes: Some("before bed".into()),
        };
        let task = service.add_task(extra.clone()).await.unwrap();
        assert!(task.id.starts_with("task-"));
        assert_eq!(
            store.get_challenge(&challenge.id).await.unwrap().progress.total_tasks,
            11
        );

        service.delete_task(&task.id).await.unwrap();
        assert_eq!(
            store.get_challenge(&challenge.id).await.unwrap().progress.total_tasks,
            10
        );

        let mut outside = extra;
        outside.date = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
        assert!(matches!(
            service.add_task(outside).await,
            Err(AppError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_delete_challenge_cascades() {
        let (service, store) = create_test_service().await;
        let keep = service.create_challenge(revision_request()).await.unwrap();
        let doomed = service.create_challenge(revision_request()).await.unwrap();

        service.delete_challenge(&doomed.id).await.unwrap();

        assert!(store.get_challenge(&doomed.id).await.is_none());
        assert!(store.tasks_for_challenge(&doomed.id).await.is_empty());
        assert_eq!(store.tasks_for_challenge(&keep.id).await.len(), 10);
        assert!(matches!(
            service.delete_challenge(&doomed.id).await,
            Err(AppError::ChallengeNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_empty_topics_create_empty_challenge() {
        let (service, _store) = create_test_service().await;
        let mut req = revision_request();
        req.subjects.clear();
        req.topics.clear();

        let challenge = service.create_challenge(req).await.unwrap();
        assert_eq!(challenge.progress, Progress::zeroed(5));
    }

    #[tokio::test]
    async fn test_load_refreshes_stale_progress() {
        let (service, store) = create_test_service().await;
        let challenge = service.create_challenge(revision_request()).await.unwrap();

        // Complete a task behind the service's back
        let first = store.tasks_for_date(start()).await.remove(0);
        store
            .update_task(&first.id, &TaskUpdate::completed(true), Utc::now())
            .await
            .unwrap();

        let reloaded = ChallengeService::new(store.clone()).with_today(third_day);
        reloaded.load().await.unwrap();

        let stored = store.get_challenge(&challenge.id).await.unwrap();
        assert_eq!(stored.progress.completed_tasks, 1);
        assert_eq!(stored.progress.longest_streak, 1);
        assert_eq!(reloaded.stats().await.total_tasks_completed, 1);
    }

    #[tokio::test]
    async fn test_export_import_round_trip() {
        let (service, _store) = create_test_service().await;
        service.create_challenge(revision_request()).await.unwrap();
        let snapshot = service.export_data().await;

        let (fresh, fresh_store) = create_test_service().await;
        fresh.import_data(snapshot.clone()).await.unwrap();

        assert_eq!(fresh_store.all_challenges().await, snapshot.challenges);
        assert_eq!(fresh_store.all_tasks().await, snapshot.tasks);
        assert_eq!(fresh.state().await.challenges.len(), 1);
    }

    #[tokio::test]
    async fn test_failed_task_write_stores_nothing() {
        let (service, store) = create_failing_service().await;
        store.fail_tasks.store(true, Ordering::SeqCst);

        assert!(service.create_challenge(revision_request()).await.is_err());

        assert!(store.all_challenges().await.is_empty());
        assert!(store.all_tasks().await.is_empty());
        assert!(service.state().await.challenges.is_empty());
    }

    #[tokio::test]
    async fn test_failed_challenge_write_rolls_back_tasks() {
        let (service, store) = create_failing_service().await;
        store.fail_challenges.store(true, Ordering::SeqCst);

        assert!(service.create_challenge(revision_request()).await.is_err());

        assert!(store.all_challenges().await.is_empty());
        assert!(store.all_tasks().await.is_empty());
        assert!(service.state().await.tasks.is_empty());
    }

    #[tokio::test]
    async fn test_failed_delete_leaves_no_orphans() {
        let (service, store) = create_failing_service().await;
        let challenge = service.create_challenge(revision_request()).await.unwrap();

        // Task write fails: nothing changes
        store.fail_tasks.store(true, Ordering::SeqCst);
        assert!(service.delete_challenge(&challenge.id).await.is_err());
        assert!(store.get_challenge(&challenge.id).await.is_some());
        assert_eq!(store.tasks_for_challenge(&challenge.id).await.len(), 10);
        assert!(service.state().await.challenge(&challenge.id).is_some());

        // Challenge write fails: tasks are gone, the challenge stays reachable
        store.fail_tasks.store(false, Ordering::SeqCst);
        store.fail_challenges.store(true, Ordering::SeqCst);
        assert!(service.delete_challenge(&challenge.id).await.is_err());
        assert!(store.all_tasks().await.is_empty());
        let state = service.state().await;
        assert!(state.tasks.is_empty());
        assert_eq!(state.challenge(&challenge.id).unwrap().progress.total_tasks, 0);

        // Retrying finishes the cascade
        store.fail_challenges.store(false, Ordering::SeqCst);
        service.delete_challenge(&challenge.id).await.unwrap();
        assert!(store.all_challenges().await.is_empty());
        assert!(service.state().await.challenges.is_empty());
    }
}
