mod schema;

pub use schema::Database;

use chrono::Utc;

/// Storage key for the trick catalog blob.
pub const KEY_TRICKS: &str = "tricks";
/// Storage key for the user profile blob.
pub const KEY_USER_PROFILE: &str = "userProfile";
/// Storage key for the authentication flag.
pub const KEY_IS_AUTHENTICATED: &str = "isAuthenticated";
/// Storage key for the dark mode flag.
pub const KEY_IS_DARK_MODE: &str = "isDarkMode";
/// Storage key for the notification settings blob.
pub const KEY_NOTIFICATION_SETTINGS: &str = "notificationSettings";

/// Timestamp helper.
pub fn now_timestamp() -> i64 {
    Utc::now().timestamp()
}
