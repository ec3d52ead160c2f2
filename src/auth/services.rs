use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use crate::auth::{Claims, jwt::JwtKeys, password::verify_password};
use crate::error::{AppError, AppResult};
use crate::users::repo::UserRepo;

/// Credential checks and stateless bearer tokens.
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserRepo>,
    keys: JwtKeys,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserRepo>, keys: JwtKeys) -> Self {
        Self { users, keys }
    }

    /// Returns a signed token for the user. A name that matches no username
    /// but contains `@` is tried as the account email. Unknown account and
    /// wrong password fail the same way.
    pub fn authenticate(&self, username: &str, password: &str) -> AppResult<String> {
        let found = match self.users.find_by_username(username) {
            Err(AppError::NotFound(_)) if username.contains('@') => {
                self.users.find_by_email(&username.to_lowercase())
            }
            other => other,
        };
        let user = match found {
            Ok(u) => u,
            Err(AppError::NotFound(_)) => {
                warn!(%username, "login unknown username");
                return Err(AppError::InvalidCredentials);
            }
            Err(e) => return Err(e),
        };

        if !verify_password(password, &user.password_hash)? {
            warn!(%username, user_id = %user.id, "login invalid password");
            return Err(AppError::InvalidCredentials);
        }

        let token = self.keys.sign(user.id, &user.role)?;
        info!(user_id = %user.id, %username, "user logged in");
        Ok(token)
    }

    pub fn token_ttl(&self) -> Duration {
        self.keys.ttl()
    }

    pub fn validate_token(&self, token: &str) -> AppResult<Claims> {
        self.keys.verify(token).map_err(|e| {
            warn!(error = %e, "invalid or expired token");
            AppError::InvalidToken
        })
    }
}
