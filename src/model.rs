//! Domain models for tricks, profiles and notification settings.
//!
//! All persisted types serialize with camelCase field names so the stored
//! JSON blobs keep the shape the mobile client originally wrote.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Difficulty level of a trick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    /// Entry-level tricks.
    Beginner,
    /// Tricks requiring some sleight of hand.
    Intermediate,
    /// Tricks requiring serious practice.
    Advanced,
}

impl Difficulty {
    /// All difficulty levels in ascending order.
    pub const ALL: [Difficulty; 3] = [
        Difficulty::Beginner,
        Difficulty::Intermediate,
        Difficulty::Advanced,
    ];

    /// Number of generated practice steps for this difficulty.
    pub fn step_count(&self) -> usize {
        match self {
            Difficulty::Beginner => 5,
            Difficulty::Intermediate => 7,
            Difficulty::Advanced => 10,
        }
    }

    /// Display name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Beginner => "Beginner",
            Difficulty::Intermediate => "Intermediate",
            Difficulty::Advanced => "Advanced",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Category of a trick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrickCategory {
    /// Card magic.
    #[serde(rename = "Card Tricks")]
    CardTricks,
    /// Coin magic.
    #[serde(rename = "Coin Tricks")]
    CoinTricks,
    /// Mentalism effects.
    #[serde(rename = "Mind Reading")]
    MindReading,
    /// Close-up magic with everyday objects.
    #[serde(rename = "Close Up Magic")]
    CloseUpMagic,
    /// Larger illusions.
    #[serde(rename = "Illusions")]
    Illusions,
}

impl TrickCategory {
    /// All categories in catalog order.
    pub const ALL: [TrickCategory; 5] = [
        TrickCategory::CardTricks,
        TrickCategory::CoinTricks,
        TrickCategory::MindReading,
        TrickCategory::CloseUpMagic,
        TrickCategory::Illusions,
    ];

    /// Display name.
    pub fn as_str(&self) -> &'static str {
        match self {
            TrickCategory::CardTricks => "Card Tricks",
            TrickCategory::CoinTricks => "Coin Tricks",
            TrickCategory::MindReading => "Mind Reading",
            TrickCategory::CloseUpMagic => "Close Up Magic",
            TrickCategory::Illusions => "Illusions",
        }
    }
}

impl fmt::Display for TrickCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One atomic instruction within a trick's procedure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrickStep {
    /// Step ID, unique within the owning trick.
    pub id: String,
    /// 1-based step position.
    pub step_number: u32,
    /// Instruction text.
    pub instruction: String,
    /// Whether the user marked this step done.
    pub completed: bool,
}

/// One catalog entry representing a magic technique to learn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trick {
    /// Stable identifier, assigned sequentially at generation time.
    pub id: String,
    /// Trick name.
    pub title: String,
    /// Category.
    pub category: TrickCategory,
    /// Difficulty level.
    pub difficulty: Difficulty,
    /// Short teaser text.
    pub description: String,
    /// What the trick looks like to the audience.
    pub summary: String,
    /// How the trick works.
    pub method: String,
    /// Props required, display only.
    pub items_needed: Vec<String>,
    /// Estimated practice time in minutes, used only for sorting.
    pub estimated_time: u32,
    /// Ordered practice steps.
    pub steps: Vec<TrickStep>,
    /// User favorite flag, independent of progress.
    pub is_favorite: bool,
    /// Percentage of steps completed, 0-100.
    pub progress: f64,
    /// First time progress reached 100. Never cleared once set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    /// Last time the detail view for this trick was opened.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_viewed_at: Option<DateTime<Utc>>,
}

impl Trick {
    /// Number of steps marked done.
    pub fn completed_step_count(&self) -> usize {
        self.steps.iter().filter(|s| s.completed).count()
    }

    /// Whether every step is done.
    pub fn is_complete(&self) -> bool {
        self.progress == 100.0
    }

    /// Whether some but not all steps are done.
    pub fn is_in_progress(&self) -> bool {
        self.progress > 0.0 && self.progress < 100.0
    }

    /// Set one step's completed flag and recompute derived fields.
    ///
    /// Returns false when no step with `step_id` exists; the trick is then
    /// unchanged. Stamps `completed_at` only on the first transition to 100%.
    pub fn set_step_completed(&mut self, step_id: &str, completed: bool) -> bool {
        let Some(step) = self.steps.iter_mut().find(|s| s.id == step_id) else {
            return false;
        };
        step.completed = completed;

        let total = self.steps.len();
        self.progress = if total == 0 {
            0.0
        } else {
            (self.completed_step_count() as f64 / total as f64) * 100.0
        };

        if self.is_complete() && self.completed_at.is_none() {
            self.completed_at = Some(Utc::now());
        }
        true
    }
}

/// Symbolic profile picture identifier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProfileSymbol {
    /// Magic wand.
    #[default]
    Wand,
    /// Top hat.
    TopHat,
    /// Playing cards.
    Cards,
    /// Crystal ball.
    CrystalBall,
    /// Rabbit.
    Rabbit,
    /// Sparkles.
    Sparkles,
}

/// User profile, at most one per session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Profile ID.
    pub id: String,
    /// Username.
    pub username: String,
    /// Real name.
    pub real_name: String,
    /// Email address.
    pub email: String,
    /// Chosen profile symbol.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_picture: Option<ProfileSymbol>,
}

/// Partial profile update; `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct UserProfileUpdate {
    /// New username.
    pub username: Option<String>,
    /// New real name.
    pub real_name: Option<String>,
    /// New email address.
    pub email: Option<String>,
    /// New profile symbol.
    pub profile_picture: Option<ProfileSymbol>,
}

impl UserProfile {
    /// Merge an update into this profile. Empty strings are ignored.
    pub fn apply(&mut self, update: UserProfileUpdate) {
        if let Some(username) = update.username
            && !username.is_empty()
        {
            self.username = username;
        }
        if let Some(real_name) = update.real_name
            && !real_name.is_empty()
        {
            self.real_name = real_name;
        }
        if let Some(email) = update.email
            && !email.is_empty()
        {
            self.email = email;
        }
        if let Some(symbol) = update.profile_picture {
            self.profile_picture = Some(symbol);
        }
    }
}

/// Aggregated practice statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProgress {
    /// Tricks with some but not all steps done.
    pub in_progress: usize,
    /// Completed steps summed across all tricks.
    pub total_steps_learned: usize,
    /// Tricks at 100% progress.
    pub tricks_completed: usize,
}

/// A time of day for a reminder, minute precision.
///
/// Serializes as an `"HH:MM"` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ReminderTime {
    hour: u8,
    minute: u8,
}

impl ReminderTime {
    /// Create a time of day; returns `None` when out of range.
    pub fn new(hour: u8, minute: u8) -> Option<Self> {
        (hour < 24 && minute < 60).then_some(Self { hour, minute })
    }

    /// Hour component, 0-23.
    pub fn hour(&self) -> u8 {
        self.hour
    }

    /// Minute component, 0-59.
    pub fn minute(&self) -> u8 {
        self.minute
    }

    /// Minutes since midnight.
    pub fn minutes_from_midnight(&self) -> u16 {
        self.hour as u16 * 60 + self.minute as u16
    }

    /// Build from minutes since midnight, wrapping past 24h.
    pub fn from_minutes(minutes: u16) -> Self {
        let minutes = minutes % (24 * 60);
        Self {
            hour: (minutes / 60) as u8,
            minute: (minutes % 60) as u8,
        }
    }
}

impl fmt::Display for ReminderTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl FromStr for ReminderTime {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let (h, m) = s
            .split_once(':')
            .ok_or_else(|| format!("Invalid time of day: {}", s))?;
        let hour: u8 = h.parse().map_err(|_| format!("Invalid hour: {}", s))?;
        let minute: u8 = m.parse().map_err(|_| format!("Invalid minute: {}", s))?;
        Self::new(hour, minute).ok_or_else(|| format!("Time out of range: {}", s))
    }
}

impl Serialize for ReminderTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for ReminderTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Maximum number of daily reminder slots.
pub const MAX_REMINDER_TIMES: usize = 5;

/// Hour at which count-based reminder slots start.
const CADENCE_BASE_HOUR: u16 = 9;

/// Span in hours over which count-based slots are spread.
const CADENCE_SPAN_HOURS: u16 = 12;

/// Reminder cadence: either a reminders-per-day count or an explicit list
/// of times. The explicit list is canonical; a count is expanded to evenly
/// spaced slots starting at 09:00.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "value", rename_all = "camelCase")]
pub enum ReminderCadence {
    /// Number of evenly spaced reminders per day.
    Count(u8),
    /// Explicit sorted list of reminder times.
    ExplicitTimes(Vec<ReminderTime>),
}

impl ReminderCadence {
    fn default_times() -> Vec<ReminderTime> {
        vec![ReminderTime { hour: 9, minute: 0 }]
    }

    /// Resolve the cadence to a sorted list of times of day.
    pub fn resolve(&self) -> Vec<ReminderTime> {
        match self {
            ReminderCadence::Count(n) => {
                let n = (*n).clamp(1, MAX_REMINDER_TIMES as u8) as u16;
                let step = CADENCE_SPAN_HOURS * 60 / n;
                (0..n)
                    .map(|i| ReminderTime::from_minutes(CADENCE_BASE_HOUR * 60 + i * step))
                    .collect()
            }
            ReminderCadence::ExplicitTimes(times) => {
                let mut times = times.clone();
                times.sort();
                times.dedup();
                if times.is_empty() {
                    times = Self::default_times();
                }
                times.truncate(MAX_REMINDER_TIMES);
                times
            }
        }
    }
}

impl Default for ReminderCadence {
    fn default() -> Self {
        ReminderCadence::ExplicitTimes(Self::default_times())
    }
}

/// Global notification settings, persisted as one blob.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationSettings {
    /// Whether daily practice reminders are enabled.
    pub daily_reminder_enabled: bool,
    /// Whether the trick-of-the-day notification is enabled.
    pub trick_of_the_day_enabled: bool,
    /// Reminder cadence.
    #[serde(default)]
    pub cadence: ReminderCadence,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            daily_reminder_enabled: true,
            trick_of_the_day_enabled: true,
            cadence: ReminderCadence::default(),
        }
    }
}

impl NotificationSettings {
    /// Sorted reminder times resolved from the cadence.
    pub fn reminder_times(&self) -> Vec<ReminderTime> {
        self.cadence.resolve()
    }

    /// Add a reminder time.
    ///
    /// Converts a count cadence to an explicit list first. Returns false
    /// when the time is already present or the list is full.
    pub fn add_reminder_time(&mut self, time: ReminderTime) -> bool {
        let mut times = self.cadence.resolve();
        if times.contains(&time) || times.len() >= MAX_REMINDER_TIMES {
            return false;
        }
        times.push(time);
        times.sort();
        self.cadence = ReminderCadence::ExplicitTimes(times);
        true
    }

    /// Remove a reminder time.
    ///
    /// Returns false when the time is not present or it is the last one
    /// remaining; at least one reminder time is always kept.
    pub fn remove_reminder_time(&mut self, time: ReminderTime) -> bool {
        let mut times = self.cadence.resolve();
        if times.len() <= 1 || !times.contains(&time) {
            return false;
        }
        times.retain(|t| *t != time);
        self.cadence = ReminderCadence::ExplicitTimes(times);
        true
    }
}

/// Partial notification settings update; `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct NotificationSettingsUpdate {
    /// New daily reminder flag.
    pub daily_reminder_enabled: Option<bool>,
    /// New trick-of-the-day flag.
    pub trick_of_the_day_enabled: Option<bool>,
    /// New cadence.
    pub cadence: Option<ReminderCadence>,
}

impl NotificationSettingsUpdate {
    /// Merge this update into existing settings, normalizing the cadence.
    pub fn apply_to(self, settings: &mut NotificationSettings) {
        if let Some(enabled) = self.daily_reminder_enabled {
            settings.daily_reminder_enabled = enabled;
        }
        if let Some(enabled) = self.trick_of_the_day_enabled {
            settings.trick_of_the_day_enabled = enabled;
        }
        if let Some(cadence) = self.cadence {
            // Normalize through resolve so the stored list is sorted,
            // deduplicated and never empty.
            settings.cadence = ReminderCadence::ExplicitTimes(cadence.resolve());
        }
    }
}

/// The full in-memory application state for the current run.
#[derive(Debug, Clone)]
pub struct SessionState {
    /// The trick catalog, in display order.
    pub tricks: Vec<Trick>,
    /// Current user profile, if logged in.
    pub user_profile: Option<UserProfile>,
    /// Whether a user is logged in. True iff `user_profile` is present.
    pub is_authenticated: bool,
    /// Dark mode flag.
    pub is_dark_mode: bool,
    /// Notification settings.
    pub notification_settings: NotificationSettings,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            tricks: Vec::new(),
            user_profile: None,
            is_authenticated: false,
            // The app ships dark-first.
            is_dark_mode: true,
            notification_settings: NotificationSettings::default(),
        }
    }
}

impl SessionState {
    /// Restore the auth/profile consistency invariant after loading
    /// independently stored blobs.
    pub fn enforce_auth_invariant(&mut self) {
        if self.is_authenticated != self.user_profile.is_some() {
            self.is_authenticated = false;
            self.user_profile = None;
        }
    }
}
