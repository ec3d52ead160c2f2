use std::collections::HashMap;

use tracing::warn;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::store::Collection;
use crate::users::repo_types::{NewUser, User, UserChanges};

pub trait UserRepo: Send + Sync {
    fn find_all(&self) -> Vec<User>;
    fn find_by_id(&self, id: Uuid) -> AppResult<User>;
    fn find_by_username(&self, username: &str) -> AppResult<User>;
    fn find_by_email(&self, email: &str) -> AppResult<User>;
    /// Fails with `Duplicate` if the username or email is taken.
    fn create(&self, new: NewUser) -> AppResult<User>;
    fn update(&self, id: Uuid, changes: UserChanges) -> AppResult<User>;
    fn delete(&self, id: Uuid) -> AppResult<()>;
}

#[derive(Default)]
pub struct InMemoryUserRepo {
    users: Collection<User>,
}

impl InMemoryUserRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Linear scan; runs under the collection's write lock.
fn ensure_unique(
    users: &HashMap<Uuid, User>,
    skip: Option<Uuid>,
    username: &str,
    email: &str,
) -> AppResult<()> {
    for user in users.values().filter(|u| Some(u.id) != skip) {
        if user.username == username {
            warn!(%username, "username already exists");
            return Err(AppError::Duplicate("username already exists".into()));
        }
        if user.email == email {
            warn!(%email, "email already exists");
            return Err(AppError::Duplicate("email already exists".into()));
        }
    }
    Ok(())
}

impl UserRepo for InMemoryUserRepo {
    fn find_all(&self) -> Vec<User> {
        self.users.all()
    }

    fn find_by_id(&self, id: Uuid) -> AppResult<User> {
        self.users.get(id)
    }

    fn find_by_username(&self, username: &str) -> AppResult<User> {
        self.users
            .find(|u| u.username == username)
            .ok_or(AppError::NotFound("user"))
    }

    fn find_by_email(&self, email: &str) -> AppResult<User> {
        self.users
            .find(|u| u.email == email)
            .ok_or(AppError::NotFound("user"))
    }

    fn create(&self, new: NewUser) -> AppResult<User> {
        self.users.try_insert_with(|id, existing| {
            ensure_unique(existing, None, &new.username, &new.email)?;
            Ok(User::new(id, new))
        })
    }

    fn update(&self, id: Uuid, changes: UserChanges) -> AppResult<User> {
        self.users.update_with(id, |original, existing| {
            ensure_unique(existing, Some(original.id), &changes.username, &changes.email)?;
            Ok(original.updated(changes))
        })
    }

    fn delete(&self, id: Uuid) -> AppResult<()> {
        self.users.remove(id).map(|_| ())
    }
}
