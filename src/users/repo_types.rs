use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::store::Entity;

pub const DEFAULT_ROLE: &str = "user";
pub const ADMIN_ROLE: &str = "admin";

/// User account. The password hash never leaves the process.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String, // argon2 PHC string
    pub role: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// Registration / update payload as sent by clients.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UserInput {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: Option<String>,
}

/// What the repository stores on create, password already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: Option<String>,
}

/// Changes applied on update. `None` keeps the current value.
#[derive(Debug, Clone)]
pub struct UserChanges {
    pub username: String,
    pub email: String,
    pub password_hash: Option<String>,
    pub role: Option<String>,
}

fn non_empty(role: Option<String>) -> Option<String> {
    role.filter(|r| !r.trim().is_empty())
}

impl User {
    pub fn new(id: Uuid, new: NewUser) -> Self {
        let now = OffsetDateTime::now_utc();
        Self {
            id,
            username: new.username,
            email: new.email,
            password_hash: new.password_hash,
            role: non_empty(new.role).unwrap_or_else(|| DEFAULT_ROLE.to_string()),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn updated(&self, changes: UserChanges) -> Self {
        Self {
            id: self.id,
            username: changes.username,
            email: changes.email,
            password_hash: changes
                .password_hash
                .unwrap_or_else(|| self.password_hash.clone()),
            role: non_empty(changes.role).unwrap_or_else(|| self.role.clone()),
            created_at: self.created_at,
            updated_at: OffsetDateTime::now_utc(),
        }
    }
}

impl Entity for User {
    const KIND: &'static str = "user";

    fn id(&self) -> Uuid {
        self.id
    }
    fn created_at(&self) -> OffsetDateTime {
        self.created_at
    }
}
