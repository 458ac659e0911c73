//! Integration tests exercising the store end to end over an in-memory
//! database.

use crate::db::Database;
use crate::model::{
    Difficulty, NotificationSettingsUpdate, ReminderCadence, ReminderTime, TrickCategory,
    UserProfileUpdate,
};
use crate::notify::{NotificationRequest, NotificationScheduler, ReminderKind};
use crate::store::AppStore;
use crate::NoopScheduler;
use parking_lot::Mutex;
use std::sync::Arc;

async fn memory_store() -> AppStore {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
    let db = Database::open_memory().unwrap();
    AppStore::with_database(db, Arc::new(NoopScheduler))
        .await
        .unwrap()
}

async fn logged_in_store() -> AppStore {
    let store = memory_store().await;
    assert!(store.login("merlin@example.com", "secret123"));
    store
}

/// Records every scheduler call so tests can assert on the exact
/// cancel/schedule sequence.
#[derive(Default)]
struct RecordingScheduler {
    actions: Mutex<Vec<SchedulerAction>>,
}

enum SchedulerAction {
    CancelAll,
    Schedule(NotificationRequest),
}

impl RecordingScheduler {
    /// Requests scheduled after the most recent cancel-all.
    fn live_requests(&self) -> Vec<NotificationRequest> {
        let actions = self.actions.lock();
        let mut live = Vec::new();
        for action in actions.iter() {
            match action {
                SchedulerAction::CancelAll => live.clear(),
                SchedulerAction::Schedule(request) => live.push(request.clone()),
            }
        }
        live
    }

    fn cancel_count(&self) -> usize {
        self.actions
            .lock()
            .iter()
            .filter(|a| matches!(a, SchedulerAction::CancelAll))
            .count()
    }
}

impl NotificationScheduler for RecordingScheduler {
    fn cancel_all(&self) {
        self.actions.lock().push(SchedulerAction::CancelAll);
    }

    fn schedule(&self, request: &NotificationRequest) {
        self.actions
            .lock()
            .push(SchedulerAction::Schedule(request.clone()));
    }
}

#[tokio::test]
async fn test_fresh_store_has_full_catalog() {
    let store = memory_store().await;
    let tricks = store.tricks();
    assert_eq!(tricks.len(), 75);
    assert!(!store.is_authenticated());
    assert!(store.is_dark_mode());

    for category in TrickCategory::ALL {
        assert_eq!(tricks.iter().filter(|t| t.category == category).count(), 15);
    }
}

#[tokio::test]
async fn test_step_completion_recomputes_progress() {
    let store = memory_store().await;
    let trick = store.tricks()[0].clone();
    assert_eq!(trick.difficulty, Difficulty::Beginner);
    assert_eq!(trick.steps.len(), 5);

    for (i, step) in trick.steps.iter().enumerate() {
        store.update_step_completion(&trick.id, &step.id, true);
        let current = store.trick(&trick.id).unwrap();
        let expected = (i + 1) as f64 * 20.0;
        assert!((current.progress - expected).abs() < f64::EPSILON);
    }

    let completed = store.trick(&trick.id).unwrap();
    assert!(completed.is_complete());
    let completed_at = completed.completed_at;
    assert!(completed_at.is_some());

    // Unchecking a step drops progress but keeps the completion stamp.
    store.update_step_completion(&trick.id, &trick.steps[0].id, false);
    let reopened = store.trick(&trick.id).unwrap();
    assert!((reopened.progress - 80.0).abs() < f64::EPSILON);
    assert!(!reopened.is_complete());
    assert_eq!(reopened.completed_at, completed_at);
}

#[tokio::test]
async fn test_unknown_ids_are_silent_noops() {
    let store = memory_store().await;
    let before = store.tricks();

    store.update_step_completion("trick-999", "step-1", true);
    store.update_step_completion(&before[0].id, "step-999", true);
    store.toggle_favorite("trick-999");
    store.mark_viewed("trick-999");

    assert_eq!(store.tricks(), before);
}

#[tokio::test]
async fn test_login_builds_profile_from_email() {
    let store = memory_store().await;
    assert!(!store.login("a@b.com", "short"));
    assert!(!store.is_authenticated());
    assert!(store.user_profile().is_none());

    assert!(store.login("a@b.com", "longenough"));
    assert!(store.is_authenticated());
    let profile = store.user_profile().unwrap();
    assert_eq!(profile.username, "a");
    assert_eq!(profile.email, "a@b.com");
}

#[tokio::test]
async fn test_signup_requires_every_field() {
    let store = memory_store().await;
    assert!(!store.signup("merlin", "", "m@example.com", "secret123"));
    assert!(!store.is_authenticated());

    assert!(store.signup("merlin", "Merlin A.", "m@example.com", "secret123"));
    let profile = store.user_profile().unwrap();
    assert_eq!(profile.username, "merlin");
    assert_eq!(profile.real_name, "Merlin A.");
}

#[tokio::test]
async fn test_shuffle_catalog_order_preserves_every_trick() {
    let store = memory_store().await;
    let trick = store.tricks()[0].clone();
    store.toggle_favorite(&trick.id);
    store.update_step_completion(&trick.id, &trick.steps[0].id, true);

    let mut before = store.tricks();
    store.shuffle_catalog_order();
    let mut after = store.tricks();
    assert_eq!(after.len(), 75);

    // Only display order may change; every trick keeps its exact state.
    before.sort_by(|a, b| a.id.cmp(&b.id));
    after.sort_by(|a, b| a.id.cmp(&b.id));
    assert_eq!(before, after);
}

#[tokio::test]
async fn test_login_shuffle_preserves_catalog_contents() {
    let store = memory_store().await;
    let mut before: Vec<String> = store.tricks().iter().map(|t| t.id.clone()).collect();

    assert!(store.login("a@b.com", "longenough"));

    let mut after: Vec<String> = store.tricks().iter().map(|t| t.id.clone()).collect();
    assert_eq!(after.len(), 75);
    before.sort();
    after.sort();
    assert_eq!(before, after);
}

#[tokio::test]
async fn test_toggle_favorite_is_an_involution() {
    let store = memory_store().await;
    let original = store.tricks()[3].clone();

    // A single toggle flips the flag and nothing else.
    store.toggle_favorite(&original.id);
    let mut expected = original.clone();
    expected.is_favorite = true;
    assert_eq!(store.trick(&original.id).unwrap(), expected);
    assert_eq!(store.favorites().len(), 1);

    // A second toggle restores the trick exactly.
    store.toggle_favorite(&original.id);
    assert_eq!(store.trick(&original.id).unwrap(), original);
    assert!(store.favorites().is_empty());
}

#[tokio::test]
async fn test_recently_viewed_is_newest_first() {
    let store = memory_store().await;
    let ids: Vec<String> = store.tricks()[..3].iter().map(|t| t.id.clone()).collect();

    for id in &ids {
        store.mark_viewed(id);
        std::thread::sleep(std::time::Duration::from_millis(2));
    }

    let viewed = store.recently_viewed(2);
    assert_eq!(viewed.len(), 2);
    assert_eq!(viewed[0].id, ids[2]);
    assert_eq!(viewed[1].id, ids[1]);
}

#[tokio::test]
async fn test_user_progress_aggregates() {
    let store = memory_store().await;
    let tricks = store.tricks();

    // One fully completed beginner trick, one barely started.
    for step in &tricks[0].steps {
        store.update_step_completion(&tricks[0].id, &step.id, true);
    }
    store.update_step_completion(&tricks[1].id, &tricks[1].steps[0].id, true);

    let progress = store.user_progress();
    assert_eq!(progress.tricks_completed, 1);
    assert_eq!(progress.in_progress, 1);
    assert_eq!(progress.total_steps_learned, 6);
}

#[tokio::test]
async fn test_recently_completed_is_limited_and_ordered() {
    let store = memory_store().await;
    let tricks = store.tricks();

    for trick in &tricks[..7] {
        for step in &trick.steps {
            store.update_step_completion(&trick.id, &step.id, true);
        }
        std::thread::sleep(std::time::Duration::from_millis(2));
    }

    let recent = store.recently_completed(5);
    assert_eq!(recent.len(), 5);
    assert_eq!(recent[0].id, tricks[6].id);
    for pair in recent.windows(2) {
        assert!(pair[0].completed_at >= pair[1].completed_at);
    }

    assert_eq!(store.all_completed().len(), 7);
}

#[tokio::test]
async fn test_search_matches_title_and_category() {
    let store = memory_store().await;

    let by_title = store.search("french drop");
    assert!(by_title.iter().any(|t| t.title == "French Drop"));

    let by_category = store.search("coin");
    assert!(by_category.len() >= 15);
    assert!(by_category
        .iter()
        .any(|t| t.category == TrickCategory::CoinTricks));

    assert!(store.search("no such trick anywhere").is_empty());
}

#[tokio::test]
async fn test_state_survives_store_restart() {
    let db = Database::open_memory().unwrap();
    let store = AppStore::with_database(db.clone(), Arc::new(NoopScheduler))
        .await
        .unwrap();

    assert!(store.login("a@b.com", "longenough"));
    let id = store.tricks()[0].id.clone();
    store.toggle_favorite(&id);
    store.toggle_theme();
    store.flush().await.unwrap();

    let reopened = AppStore::with_database(db, Arc::new(NoopScheduler))
        .await
        .unwrap();
    assert!(reopened.is_authenticated());
    assert_eq!(reopened.user_profile().unwrap().username, "a");
    assert!(reopened.trick(&id).unwrap().is_favorite);
    assert!(!reopened.is_dark_mode());
}

#[tokio::test]
async fn test_update_profile_merges_only_present_fields() {
    let store = logged_in_store().await;

    store.update_profile(UserProfileUpdate {
        username: Some("houdini".to_string()),
        real_name: None,
        email: Some(String::new()),
        profile_picture: None,
    });

    let profile = store.user_profile().unwrap();
    assert_eq!(profile.username, "houdini");
    assert_eq!(profile.email, "merlin@example.com");
}

#[tokio::test]
async fn test_update_profile_is_noop_when_logged_out() {
    let store = memory_store().await;
    store.update_profile(UserProfileUpdate {
        username: Some("houdini".to_string()),
        ..Default::default()
    });
    assert!(store.user_profile().is_none());
}

#[tokio::test]
async fn test_reminder_time_slot_limits() {
    let store = logged_in_store().await;
    assert_eq!(store.notification_settings().reminder_times().len(), 1);

    for hour in 10..14 {
        assert!(store.add_reminder_time(ReminderTime::new(hour, 30).unwrap()));
    }
    assert_eq!(store.notification_settings().reminder_times().len(), 5);

    // Sixth slot and duplicates are rejected.
    assert!(!store.add_reminder_time(ReminderTime::new(20, 0).unwrap()));
    assert!(!store.add_reminder_time(ReminderTime::new(10, 30).unwrap()));

    for hour in 10..14 {
        assert!(store.remove_reminder_time(ReminderTime::new(hour, 30).unwrap()));
    }
    // The last remaining slot cannot be removed.
    assert!(!store.remove_reminder_time(ReminderTime::new(9, 0).unwrap()));
    assert_eq!(store.notification_settings().reminder_times().len(), 1);
}

#[tokio::test]
async fn test_notifications_follow_session_and_settings() {
    let scheduler = Arc::new(RecordingScheduler::default());
    let db = Database::open_memory().unwrap();
    let store = AppStore::with_database(db, scheduler.clone()).await.unwrap();

    // Not authenticated yet, nothing to schedule.
    assert!(scheduler.live_requests().is_empty());

    assert!(store.login("a@b.com", "longenough"));
    let trick = store.tricks()[0].clone();
    store.update_step_completion(&trick.id, &trick.steps[0].id, true);

    let live = scheduler.live_requests();
    assert_eq!(live.len(), 2);
    assert!(live.iter().any(|r| r.payload.kind == ReminderKind::Reminder
        && r.payload.trick_id == trick.id));
    assert!(live
        .iter()
        .any(|r| r.payload.kind == ReminderKind::TrickOfTheDay));

    // Disabling everything applies as a bare cancel-all.
    store.update_notification_settings(NotificationSettingsUpdate {
        daily_reminder_enabled: Some(false),
        trick_of_the_day_enabled: Some(false),
        cadence: None,
    });
    assert!(scheduler.live_requests().is_empty());
}

#[tokio::test]
async fn test_logout_clears_session_and_cancels() {
    let scheduler = Arc::new(RecordingScheduler::default());
    let db = Database::open_memory().unwrap();
    let store = AppStore::with_database(db, scheduler.clone()).await.unwrap();

    assert!(store.login("a@b.com", "longenough"));
    let trick = store.tricks()[0].clone();
    store.update_step_completion(&trick.id, &trick.steps[0].id, true);
    assert!(!scheduler.live_requests().is_empty());

    let cancels_before = scheduler.cancel_count();
    store.logout();

    assert!(!store.is_authenticated());
    assert!(store.user_profile().is_none());
    assert!(scheduler.cancel_count() > cancels_before);
    assert!(scheduler.live_requests().is_empty());

    // Progress is kept across logout.
    assert!(store.trick(&trick.id).unwrap().is_in_progress());
}

#[tokio::test]
async fn test_cadence_count_expands_to_slots() {
    let store = logged_in_store().await;
    let trick = store.tricks()[0].clone();
    store.update_step_completion(&trick.id, &trick.steps[0].id, true);

    store.update_notification_settings(NotificationSettingsUpdate {
        daily_reminder_enabled: None,
        trick_of_the_day_enabled: None,
        cadence: Some(ReminderCadence::Count(3)),
    });

    let times = store.notification_settings().reminder_times();
    assert_eq!(times.len(), 3);
    assert_eq!(times[0], ReminderTime::new(9, 0).unwrap());
}

#[tokio::test]
async fn test_random_incomplete_trick_never_yields_completed() {
    let store = memory_store().await;
    let tricks = store.tricks();
    let target = tricks[0].clone();
    for step in &target.steps {
        store.update_step_completion(&target.id, &step.id, true);
    }

    for _ in 0..20 {
        let pick = store.random_incomplete_trick().unwrap();
        assert_ne!(pick.id, target.id);
    }
}
