//! Central application state store.
//!
//! The store owns the full session state behind a single lock. Mutations
//! are synchronous and total: unknown ids are silent no-ops, login and
//! signup report failure through their return value, and nothing here
//! panics. Every effective mutation triggers a fire-and-forget save of the
//! complete snapshot; notification-relevant mutations also recompute and
//! re-apply the reminder schedule.

use crate::auth;
use crate::config::Config;
use crate::db::Database;
use crate::error::Result;
use crate::model::{
    NotificationSettings, NotificationSettingsUpdate, ReminderTime, SessionState, Trick,
    UserProfile, UserProfileUpdate, UserProgress,
};
use crate::notify::{self, NotificationScheduler};
use crate::storage::StateStorage;
use chrono::Utc;
use parking_lot::RwLock;
use rand::seq::SliceRandom;
use std::sync::Arc;

/// Shared application state store.
///
/// Cheap to clone; clones share the same underlying state.
#[derive(Clone)]
pub struct AppStore {
    state: Arc<RwLock<SessionState>>,
    storage: StateStorage,
    scheduler: Arc<dyn NotificationScheduler>,
}

impl AppStore {
    /// Open the store at the configured database path and load the
    /// persisted session. The store is only queryable once this returns.
    pub async fn open(config: &Config, scheduler: Arc<dyn NotificationScheduler>) -> Result<Self> {
        let db = Database::open(&config.storage.path)?;
        Self::with_database(db, scheduler).await
    }

    /// Open the store over an already opened database.
    pub async fn with_database(
        db: Database,
        scheduler: Arc<dyn NotificationScheduler>,
    ) -> Result<Self> {
        let storage = StateStorage::new(db);
        let state = storage.load().await?;
        let count = state.tricks.len();

        let store = Self {
            state: Arc::new(RwLock::new(state)),
            storage,
            scheduler,
        };

        tracing::info!(tricks = count, "Session state loaded");
        store.refresh_notifications();
        Ok(store)
    }

    // --- Mutations ---

    /// Set one step's completed flag and recompute the owning trick's
    /// progress. Unknown trick or step ids leave the state unchanged.
    pub fn update_step_completion(&self, trick_id: &str, step_id: &str, completed: bool) {
        let changed = {
            let mut state = self.state.write();
            state
                .tricks
                .iter_mut()
                .find(|t| t.id == trick_id)
                .is_some_and(|trick| trick.set_step_completed(step_id, completed))
        };

        if changed {
            self.persist();
            self.refresh_notifications();
        }
    }

    /// Flip a trick's favorite flag. No other field is affected.
    pub fn toggle_favorite(&self, trick_id: &str) {
        let changed = {
            let mut state = self.state.write();
            match state.tricks.iter_mut().find(|t| t.id == trick_id) {
                Some(trick) => {
                    trick.is_favorite = !trick.is_favorite;
                    true
                }
                None => false,
            }
        };

        if changed {
            self.persist();
        }
    }

    /// Stamp a trick's last-viewed time with the current time.
    pub fn mark_viewed(&self, trick_id: &str) {
        let changed = {
            let mut state = self.state.write();
            match state.tricks.iter_mut().find(|t| t.id == trick_id) {
                Some(trick) => {
                    trick.last_viewed_at = Some(Utc::now());
                    true
                }
                None => false,
            }
        };

        if changed {
            self.persist();
        }
    }

    /// Mock login. On success the session is authenticated, the profile is
    /// built from the email and the catalog order is reshuffled. On failure
    /// the state is unchanged and `false` is returned.
    pub fn login(&self, email: &str, password: &str) -> bool {
        if !auth::validate_login(email, password) {
            return false;
        }

        {
            let mut state = self.state.write();
            state.user_profile = Some(auth::profile_for_login(email));
            state.is_authenticated = true;
            Self::shuffle_tricks(&mut state);
        }

        tracing::info!("User logged in");
        self.persist();
        self.refresh_notifications();
        true
    }

    /// Mock signup; same session effects as [`login`](Self::login).
    pub fn signup(&self, username: &str, real_name: &str, email: &str, password: &str) -> bool {
        if !auth::validate_signup(username, real_name, email, password) {
            return false;
        }

        {
            let mut state = self.state.write();
            state.user_profile = Some(auth::profile_for_signup(username, real_name, email));
            state.is_authenticated = true;
            Self::shuffle_tricks(&mut state);
        }

        tracing::info!("User signed up");
        self.persist();
        self.refresh_notifications();
        true
    }

    /// Log out: clear the session and cancel all scheduled notifications.
    pub fn logout(&self) {
        {
            let mut state = self.state.write();
            state.is_authenticated = false;
            state.user_profile = None;
        }

        tracing::info!("User logged out");
        self.persist();
        // Recomputing while unauthenticated yields an empty schedule,
        // which applies as a plain cancel-all.
        self.refresh_notifications();
    }

    /// Reshuffle the catalog into a uniform random permutation.
    ///
    /// Login and signup go through the same shuffle; calling this directly
    /// only reorders the catalog and leaves every trick untouched.
    pub fn shuffle_catalog_order(&self) {
        {
            let mut state = self.state.write();
            Self::shuffle_tricks(&mut state);
        }
        self.persist();
    }

    /// Merge an update into the current profile. No-op when logged out.
    pub fn update_profile(&self, update: UserProfileUpdate) {
        let changed = {
            let mut state = self.state.write();
            match state.user_profile.as_mut() {
                Some(profile) => {
                    profile.apply(update);
                    true
                }
                None => false,
            }
        };

        if changed {
            self.persist();
        }
    }

    /// Flip the dark mode flag.
    pub fn toggle_theme(&self) {
        {
            let mut state = self.state.write();
            state.is_dark_mode = !state.is_dark_mode;
        }
        self.persist();
    }

    /// Merge an update into the notification settings.
    pub fn update_notification_settings(&self, update: NotificationSettingsUpdate) {
        {
            let mut state = self.state.write();
            update.apply_to(&mut state.notification_settings);
        }
        self.persist();
        self.refresh_notifications();
    }

    /// Add a daily reminder time. Returns false when the time is already
    /// present or the slot limit is reached.
    pub fn add_reminder_time(&self, time: ReminderTime) -> bool {
        let added = {
            let mut state = self.state.write();
            state.notification_settings.add_reminder_time(time)
        };

        if added {
            self.persist();
            self.refresh_notifications();
        }
        added
    }

    /// Remove a daily reminder time. Returns false when the time is not
    /// present or it is the last remaining slot.
    pub fn remove_reminder_time(&self, time: ReminderTime) -> bool {
        let removed = {
            let mut state = self.state.write();
            state.notification_settings.remove_reminder_time(time)
        };

        if removed {
            self.persist();
            self.refresh_notifications();
        }
        removed
    }

    /// Save the current snapshot and wait for it to land.
    pub async fn flush(&self) -> Result<()> {
        let (snapshot, ticket) = {
            let state = self.state.read();
            (state.clone(), self.storage.ticket())
        };
        self.storage.save(&snapshot, ticket).await
    }

    // --- Derived queries ---

    /// All tricks in current display order.
    pub fn tricks(&self) -> Vec<Trick> {
        self.state.read().tricks.clone()
    }

    /// Get a trick by ID.
    pub fn trick(&self, id: &str) -> Option<Trick> {
        self.state.read().tricks.iter().find(|t| t.id == id).cloned()
    }

    /// All favorited tricks.
    pub fn favorites(&self) -> Vec<Trick> {
        self.state
            .read()
            .tricks
            .iter()
            .filter(|t| t.is_favorite)
            .cloned()
            .collect()
    }

    /// Search tricks by title or category name.
    pub fn search(&self, query: &str) -> Vec<Trick> {
        let query = query.to_lowercase();
        self.state
            .read()
            .tricks
            .iter()
            .filter(|t| {
                t.title.to_lowercase().contains(&query)
                    || t.category.as_str().to_lowercase().contains(&query)
            })
            .cloned()
            .collect()
    }

    /// Aggregated practice statistics.
    pub fn user_progress(&self) -> UserProgress {
        let state = self.state.read();
        UserProgress {
            in_progress: state.tricks.iter().filter(|t| t.is_in_progress()).count(),
            total_steps_learned: state
                .tricks
                .iter()
                .map(|t| t.completed_step_count())
                .sum(),
            tricks_completed: state.tricks.iter().filter(|t| t.is_complete()).count(),
        }
    }

    /// Most recently completed tricks, newest first.
    pub fn recently_completed(&self, limit: usize) -> Vec<Trick> {
        let mut completed = self.completed_tricks();
        completed.truncate(limit);
        completed
    }

    /// Every completed trick, newest first.
    pub fn all_completed(&self) -> Vec<Trick> {
        self.completed_tricks()
    }

    /// Most recently viewed tricks, newest first.
    pub fn recently_viewed(&self, limit: usize) -> Vec<Trick> {
        let mut viewed: Vec<Trick> = self
            .state
            .read()
            .tricks
            .iter()
            .filter(|t| t.last_viewed_at.is_some())
            .cloned()
            .collect();
        viewed.sort_by(|a, b| b.last_viewed_at.cmp(&a.last_viewed_at));
        viewed.truncate(limit);
        viewed
    }

    /// A uniformly random trick among those not yet completed.
    pub fn random_incomplete_trick(&self) -> Option<Trick> {
        notify::random_incomplete(&self.state.read().tricks).cloned()
    }

    /// The in-progress trick touched longest ago; the daily reminder target.
    pub fn least_recently_touched_incomplete(&self) -> Option<Trick> {
        notify::least_recently_touched_incomplete(&self.state.read().tricks).cloned()
    }

    /// Current user profile, if logged in.
    pub fn user_profile(&self) -> Option<UserProfile> {
        self.state.read().user_profile.clone()
    }

    /// Whether a user is logged in.
    pub fn is_authenticated(&self) -> bool {
        self.state.read().is_authenticated
    }

    /// Current dark mode flag.
    pub fn is_dark_mode(&self) -> bool {
        self.state.read().is_dark_mode
    }

    /// Current notification settings.
    pub fn notification_settings(&self) -> NotificationSettings {
        self.state.read().notification_settings.clone()
    }

    // --- Internals ---

    /// Uniform random permutation of the catalog. Count and element set are
    /// unchanged; only display order moves.
    fn shuffle_tricks(state: &mut SessionState) {
        state.tricks.shuffle(&mut rand::rng());
    }

    fn completed_tricks(&self) -> Vec<Trick> {
        let mut completed: Vec<Trick> = self
            .state
            .read()
            .tricks
            .iter()
            .filter(|t| t.completed_at.is_some())
            .cloned()
            .collect();
        completed.sort_by(|a, b| b.completed_at.cmp(&a.completed_at));
        completed
    }

    /// Persist the full current snapshot, fire-and-forget.
    ///
    /// Save failures are logged and swallowed; the in-memory state stays
    /// the source of truth and the next save reconciles.
    fn persist(&self) {
        // The ticket is claimed while the state lock is held, so ticket
        // order always matches snapshot order and the gateway's stale-save
        // guard cannot be inverted by overlapping mutators.
        let (snapshot, ticket) = {
            let state = self.state.read();
            (state.clone(), self.storage.ticket())
        };
        let storage = self.storage.clone();

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    if let Err(e) = storage.save(&snapshot, ticket).await {
                        tracing::warn!(error = %e, "Failed to persist state snapshot");
                    }
                });
            }
            Err(_) => {
                if let Err(e) = storage.save_blocking(&snapshot, ticket) {
                    tracing::warn!(error = %e, "Failed to persist state snapshot");
                }
            }
        }
    }

    /// Recompute the notification schedule and hand it to the scheduler.
    fn refresh_notifications(&self) {
        let requests = notify::compute_schedule(&self.state.read());
        notify::apply_schedule(self.scheduler.as_ref(), &requests);
    }
}
