//! Data models for the Taskboard application

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Public view of an account
///
/// Built by the account store from the public columns only; the password
/// hash is never part of this shape.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PublicUser {
    pub id: i32,
    pub email: String,
    pub nick_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A task owned by a single account
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Task {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub user_id: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Whether the task belongs to the given account
    #[inline]
    pub fn is_owned_by(&self, user_id: i32) -> bool {
        self.user_id == user_id
    }
}
