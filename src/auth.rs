//! Mock authentication.
//!
//! There is no server and no credential store; login and signup only gate
//! the session behind trivial validation and build the local profile.

use crate::model::UserProfile;

/// Minimum accepted password length.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Fixed profile id; there is at most one local user.
const PROFILE_ID: &str = "user-1";

/// Default real name when logging in with just an email.
const DEFAULT_REAL_NAME: &str = "Magic User";

/// Validate login credentials.
pub fn validate_login(email: &str, password: &str) -> bool {
    !email.is_empty() && password.len() >= MIN_PASSWORD_LEN
}

/// Validate signup fields.
pub fn validate_signup(username: &str, real_name: &str, email: &str, password: &str) -> bool {
    !username.is_empty()
        && !real_name.is_empty()
        && !email.is_empty()
        && password.len() >= MIN_PASSWORD_LEN
}

/// Build the profile for a successful login.
///
/// The username is the local part of the email address.
pub fn profile_for_login(email: &str) -> UserProfile {
    let username = email.split('@').next().unwrap_or(email).to_string();
    UserProfile {
        id: PROFILE_ID.to_string(),
        username,
        real_name: DEFAULT_REAL_NAME.to_string(),
        email: email.to_string(),
        profile_picture: None,
    }
}

/// Build the profile for a successful signup.
pub fn profile_for_signup(username: &str, real_name: &str, email: &str) -> UserProfile {
    UserProfile {
        id: PROFILE_ID.to_string(),
        username: username.to_string(),
        real_name: real_name.to_string(),
        email: email.to_string(),
        profile_picture: None,
    }
}
