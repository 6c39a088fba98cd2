use architecture::{AggregateRoot, UserInfo};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Staff account. Created at provisioning and never changed afterwards.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    /// Unique, matched exactly as stored.
    pub email: String,
    /// PHC string of a salted adaptive hash.
    pub password_hash: String,
    pub full_name: String,
    pub created_at: DateTime<Utc>,
}

impl AggregateRoot for User {}

impl User {
    pub fn summary(&self) -> UserSummary {
        UserSummary {
            id: self.id,
            email: self.email.clone(),
            full_name: self.full_name.clone(),
        }
    }

    pub fn user_info(&self) -> UserInfo {
        UserInfo {
            id: self.id,
            email: self.email.clone(),
            full_name: self.full_name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: Uuid,
    pub email: String,
    pub full_name: String,
}
