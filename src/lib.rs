//! trickdeck: Core state engine for a magic trick practice tracker.
//!
//! This crate implements everything behind the screens of a trick-learning
//! app: the generated trick catalog, the central application state with its
//! mutation and query surface, persistence of the full session snapshot to a
//! local key-value store, and the policy deciding which practice reminders
//! ought to be scheduled.
//!
//! # Features
//!
//! - Deterministic in-memory trick catalog (75 tricks across 5 categories)
//! - Per-step practice progress with first-completion timestamps
//! - Favorites, recently viewed and recently completed lists
//! - Mock login/signup session handling
//! - Crash-safe persistence: every save writes the complete snapshot
//! - Daily reminder and trick-of-the-day notification scheduling policy
//!
//! The crate has no UI and no network surface; presentation code consumes
//! [`AppStore`] directly.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// Mock authentication.
pub mod auth;
/// Trick catalog generation.
pub mod catalog;
/// Configuration.
pub mod config;
/// Key-value storage database.
pub mod db;
/// Error types.
pub mod error;
/// Domain models.
pub mod model;
/// Notification scheduling policy.
pub mod notify;
/// Persistence gateway.
pub mod storage;
/// Central application state store.
pub mod store;

#[cfg(test)]
mod tests;

pub use config::Config;
pub use db::Database;
pub use error::{AppError, Result};
pub use notify::{NoopScheduler, NotificationScheduler};
pub use store::AppStore;
