//! Persistence gateway between the session state and the key-value store.
//!
//! Each state field is stored as an independent JSON blob. Loading is
//! tolerant: a missing or unreadable catalog blob falls back to regenerating
//! the catalog, other blobs fall back to their defaults, and nothing here is
//! ever surfaced to the user. Timestamps are stored as ISO-8601 strings and
//! come back as typed `DateTime<Utc>` values through serde.

use crate::catalog;
use crate::db::{
    Database, KEY_IS_AUTHENTICATED, KEY_IS_DARK_MODE, KEY_NOTIFICATION_SETTINGS, KEY_TRICKS,
    KEY_USER_PROFILE,
};
use crate::error::{AppError, Result};
use crate::model::{NotificationSettings, SessionState, Trick, UserProfile};
use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Loads and saves the full session snapshot.
#[derive(Clone)]
pub struct StateStorage {
    db: Database,
    save_seq: Arc<AtomicU64>,
    last_saved: Arc<Mutex<u64>>,
}

impl StateStorage {
    /// Create a gateway over an open database.
    pub fn new(db: Database) -> Self {
        Self {
            db,
            save_seq: Arc::new(AtomicU64::new(0)),
            last_saved: Arc::new(Mutex::new(0)),
        }
    }

    /// Claim an ordering ticket for a snapshot about to be saved.
    ///
    /// Concurrent fire-and-forget saves may reach the database out of
    /// order. Tickets are claimed at snapshot time, so a stale snapshot
    /// whose write lands late is detected and dropped instead of
    /// overwriting a newer one.
    pub fn ticket(&self) -> u64 {
        self.save_seq.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Load the session state, falling back to defaults per blob.
    pub async fn load(&self) -> Result<SessionState> {
        let this = self.clone();
        tokio::task::spawn_blocking(move || this.load_blocking())
            .await
            .map_err(|e| AppError::Internal(format!("Load task failed: {}", e)))?
    }

    /// Save the full session snapshot under the given ordering ticket.
    pub async fn save(&self, state: &SessionState, ticket: u64) -> Result<()> {
        let this = self.clone();
        let state = state.clone();
        tokio::task::spawn_blocking(move || this.save_blocking(&state, ticket))
            .await
            .map_err(|e| AppError::Internal(format!("Save task failed: {}", e)))?
    }

    /// Blocking variant of [`load`](Self::load).
    pub fn load_blocking(&self) -> Result<SessionState> {
        let mut state = SessionState::default();

        state.tricks = match self.read_blob::<Vec<Trick>>(KEY_TRICKS) {
            Some(tricks) => tricks,
            None => {
                tracing::info!("No usable stored catalog, generating a fresh one");
                catalog::generate_all()
            }
        };

        state.user_profile = self
            .read_blob::<Option<UserProfile>>(KEY_USER_PROFILE)
            .flatten();

        if let Some(authenticated) = self.read_blob::<bool>(KEY_IS_AUTHENTICATED) {
            state.is_authenticated = authenticated;
        }
        if let Some(dark_mode) = self.read_blob::<bool>(KEY_IS_DARK_MODE) {
            state.is_dark_mode = dark_mode;
        }
        if let Some(settings) = self.read_blob::<NotificationSettings>(KEY_NOTIFICATION_SETTINGS) {
            state.notification_settings = settings;
        }

        // Blobs are independent; a stale auth flag without a profile must
        // not produce a half-logged-in session.
        state.enforce_auth_invariant();

        Ok(state)
    }

    /// Blocking variant of [`save`](Self::save).
    ///
    /// All blobs land in one transaction so a save is always a complete
    /// snapshot, never a partial delta.
    pub fn save_blocking(&self, state: &SessionState, ticket: u64) -> Result<()> {
        let mut last_saved = self.last_saved.lock();
        if ticket <= *last_saved {
            tracing::debug!(ticket, "Skipping stale snapshot save");
            return Ok(());
        }

        let entries = [
            (KEY_TRICKS, serde_json::to_string(&state.tricks)?),
            (KEY_USER_PROFILE, serde_json::to_string(&state.user_profile)?),
            (
                KEY_IS_AUTHENTICATED,
                serde_json::to_string(&state.is_authenticated)?,
            ),
            (KEY_IS_DARK_MODE, serde_json::to_string(&state.is_dark_mode)?),
            (
                KEY_NOTIFICATION_SETTINGS,
                serde_json::to_string(&state.notification_settings)?,
            ),
        ];

        self.db.put_many(&entries)?;
        *last_saved = ticket;
        Ok(())
    }

    /// Read and parse one blob; any failure logs and yields `None`.
    fn read_blob<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.db.get(key) {
            Ok(raw) => raw?,
            Err(e) => {
                tracing::warn!(key, error = %e, "Failed to read stored blob");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(key, error = %e, "Failed to parse stored blob");
                None
            }
        }
    }
}
