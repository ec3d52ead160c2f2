use std::sync::Arc;

use lazy_static::lazy_static;
use regex::Regex;
use tracing::{info, warn};
use uuid::Uuid;

use crate::auth::password::hash_password;
use crate::error::{AppError, AppResult};
use crate::users::repo::UserRepo;
use crate::users::repo_types::{NewUser, User, UserChanges, UserInput};

pub const MIN_PASSWORD_LEN: usize = 8;

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

/// Trims the username, lowercases the email and checks both.
fn normalize(input: &UserInput) -> AppResult<(String, String)> {
    let username = input.username.trim().to_string();
    let email = input.email.trim().to_lowercase();
    if username.is_empty() {
        return Err(AppError::Validation("Username is required".into()));
    }
    if !is_valid_email(&email) {
        warn!(%email, "invalid email");
        return Err(AppError::Validation("Invalid email".into()));
    }
    Ok((username, email))
}

fn check_password(password: &str) -> AppResult<()> {
    if password.len() < MIN_PASSWORD_LEN {
        return Err(AppError::Validation("Password too short".into()));
    }
    Ok(())
}

#[derive(Clone)]
pub struct UserService {
    repo: Arc<dyn UserRepo>,
}

impl UserService {
    pub fn new(repo: Arc<dyn UserRepo>) -> Self {
        Self { repo }
    }

    pub fn list(&self) -> Vec<User> {
        self.repo.find_all()
    }

    pub fn get(&self, id: Uuid) -> AppResult<User> {
        self.repo.find_by_id(id)
    }

    /// Hashes the password before taking the collection lock.
    pub fn create_user(&self, input: UserInput) -> AppResult<User> {
        let (username, email) = normalize(&input)?;
        check_password(&input.password)?;
        let password_hash = hash_password(&input.password)?;

        let user = self.repo.create(NewUser {
            username,
            email,
            password_hash,
            role: input.role,
        })?;
        info!(user_id = %user.id, username = %user.username, role = %user.role, "user created");
        Ok(user)
    }

    /// Empty password or role leaves the stored value as is.
    pub fn update_user(&self, id: Uuid, input: UserInput) -> AppResult<User> {
        let (username, email) = normalize(&input)?;
        let password_hash = if input.password.is_empty() {
            None
        } else {
            check_password(&input.password)?;
            Some(hash_password(&input.password)?)
        };

        let user = self.repo.update(
            id,
            UserChanges {
                username,
                email,
                password_hash,
                role: input.role,
            },
        )?;
        info!(user_id = %id, role = %user.role, "user updated");
        Ok(user)
    }

    pub fn delete_user(&self, id: Uuid) -> AppResult<()> {
        self.repo.delete(id)?;
        info!(user_id = %id, "user deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::password::verify_password;
    use crate::users::repo::InMemoryUserRepo;
    use crate::users::repo_types::{ADMIN_ROLE, DEFAULT_ROLE};

    fn service() -> UserService {
        UserService::new(Arc::new(InMemoryUserRepo::new()))
    }

    fn input(username: &str, email: &str, password: &str) -> UserInput {
        UserInput {
            username: username.into(),
            email: email.into(),
            password: password.into(),
            role: None,
        }
    }

    #[test]
    fn create_hashes_password_and_defaults_role() {
        let svc = service();
        let user = svc
            .create_user(input("testuser", " Test@Example.com ", "password123"))
            .unwrap();
        assert_eq!(user.username, "testuser");
        assert_eq!(user.email, "test@example.com");
        assert_eq!(user.role, DEFAULT_ROLE);
        assert_ne!(user.password_hash, "password123");
        assert!(verify_password("password123", &user.password_hash).unwrap());
    }

    #[test]
    fn duplicate_username_leaves_original_untouched() {
        let svc = service();
        let original = svc
            .create_user(input("testuser", "test@example.com", "password123"))
            .unwrap();
        let err = svc
            .create_user(input("testuser", "other@example.com", "differentpass"))
            .unwrap_err();
        assert!(matches!(err, AppError::Duplicate(_)));
        assert_eq!(svc.get(original.id).unwrap(), original);
        assert_eq!(svc.list().len(), 1);
    }

    #[test]
    fn rejects_invalid_input() {
        let svc = service();
        assert!(matches!(
            svc.create_user(input("", "a@b.co", "password123")),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            svc.create_user(input("x", "not-an-email", "password123")),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            svc.create_user(input("x", "a@b.co", "short")),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn update_changes_role_and_password_only_when_given() {
        let svc = service();
        let user = svc
            .create_user(input("cook", "cook@example.com", "password123"))
            .unwrap();

        let same_pw = svc
            .update_user(user.id, input("cook", "cook@example.com", ""))
            .unwrap();
        assert_eq!(same_pw.password_hash, user.password_hash);
        assert_eq!(same_pw.role, DEFAULT_ROLE);

        let mut promote = input("chef", "chef@example.com", "newpassword1");
        promote.role = Some(ADMIN_ROLE.into());
        let promoted = svc.update_user(user.id, promote).unwrap();
        assert_eq!(promoted.role, ADMIN_ROLE);
        assert_eq!(promoted.username, "chef");
        assert!(verify_password("newpassword1", &promoted.password_hash).unwrap());
        assert_eq!(promoted.created_at, user.created_at);
    }

    #[test]
    fn delete_then_get_is_not_found() {
        let svc = service();
        let user = svc
            .create_user(input("gone", "gone@example.com", "password123"))
            .unwrap();
        svc.delete_user(user.id).unwrap();
        assert!(matches!(svc.get(user.id), Err(AppError::NotFound("user"))));
    }

    #[test]
    fn email_validation() {
        assert!(is_valid_email("a@b.co"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a b@c.de"));
    }
}
