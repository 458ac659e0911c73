//! Notification scheduling policy.
//!
//! The policy is a pure recomputation: given the current session state it
//! describes the set of notifications that ought to exist. Actually talking
//! to the OS is the job of a [`NotificationScheduler`] implementation;
//! applying a schedule is always clear-then-set, never incremental.

use crate::model::{ReminderTime, SessionState, Trick};
use rand::RngExt;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

/// What a scheduled notification refers back to when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReminderKind {
    /// Daily practice reminder.
    Reminder,
    /// Random trick-of-the-day suggestion.
    TrickOfTheDay,
}

/// Payload attached to a scheduled notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationPayload {
    /// Trick the notification refers to.
    pub trick_id: String,
    /// Kind of notification.
    pub kind: ReminderKind,
}

/// One notification that ought to be scheduled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationRequest {
    /// Time of day to fire, repeating daily.
    pub time_of_day: ReminderTime,
    /// Notification title.
    pub title: String,
    /// Notification body.
    pub body: String,
    /// Payload for the presentation layer.
    pub payload: NotificationPayload,
}

/// External notification capability.
///
/// Best-effort by contract: implementations may drop everything on
/// platforms without local notifications.
pub trait NotificationScheduler: Send + Sync {
    /// Cancel every previously scheduled notification.
    fn cancel_all(&self);
    /// Schedule one notification.
    fn schedule(&self, request: &NotificationRequest);
}

/// Scheduler for platforms without a notification capability.
pub struct NoopScheduler;

impl NotificationScheduler for NoopScheduler {
    fn cancel_all(&self) {}

    fn schedule(&self, _request: &NotificationRequest) {}
}

/// Trick-of-the-day fires at a random time within this window.
const TRICK_OF_THE_DAY_HOURS: std::ops::Range<u8> = 10..20;

/// The in-progress trick whose detail view was opened longest ago.
///
/// Tricks never viewed count as oldest; remaining ties break by catalog
/// order, so the pick is deterministic.
pub fn least_recently_touched_incomplete(tricks: &[Trick]) -> Option<&Trick> {
    tricks
        .iter()
        .filter(|t| t.is_in_progress())
        .min_by_key(|t| t.last_viewed_at)
}

/// A uniformly random trick among those not yet completed.
pub fn random_incomplete(tricks: &[Trick]) -> Option<&Trick> {
    let incomplete: Vec<&Trick> = tricks.iter().filter(|t| !t.is_complete()).collect();
    incomplete.choose(&mut rand::rng()).copied()
}

/// Compute the set of notifications that ought to be scheduled.
///
/// Empty when not authenticated. The trick-of-the-day time is re-rolled on
/// every recomputation; that instability is intentional.
pub fn compute_schedule(state: &SessionState) -> Vec<NotificationRequest> {
    let mut requests = Vec::new();

    if !state.is_authenticated {
        return requests;
    }

    let settings = &state.notification_settings;

    if settings.daily_reminder_enabled
        && let Some(trick) = least_recently_touched_incomplete(&state.tricks)
    {
        for time_of_day in settings.reminder_times() {
            requests.push(NotificationRequest {
                time_of_day,
                title: "Time to practice!".to_string(),
                body: format!(
                    "Keep working on {}. You're {:.0}% of the way there.",
                    trick.title, trick.progress
                ),
                payload: NotificationPayload {
                    trick_id: trick.id.clone(),
                    kind: ReminderKind::Reminder,
                },
            });
        }
    }

    if settings.trick_of_the_day_enabled
        && let Some(trick) = random_incomplete(&state.tricks)
    {
        let mut rng = rand::rng();
        let time_of_day = ReminderTime::new(
            rng.random_range(TRICK_OF_THE_DAY_HOURS),
            rng.random_range(0..60),
        )
        .unwrap_or_else(|| ReminderTime::from_minutes(10 * 60));

        requests.push(NotificationRequest {
            time_of_day,
            title: "Trick of the Day".to_string(),
            body: format!("Why not learn {} today?", trick.title),
            payload: NotificationPayload {
                trick_id: trick.id.clone(),
                kind: ReminderKind::TrickOfTheDay,
            },
        });
    }

    requests
}

/// Apply a computed schedule: clear everything, then schedule the new set.
pub fn apply_schedule(scheduler: &dyn NotificationScheduler, requests: &[NotificationRequest]) {
    scheduler.cancel_all();
    for request in requests {
        scheduler.schedule(request);
    }
    tracing::debug!(scheduled = requests.len(), "Applied notification schedule");
}
