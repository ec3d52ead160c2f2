use std::sync::Arc;

use axum::extract::FromRef;
use tracing::info;

use crate::auth::{jwt::JwtKeys, services::AuthService};
use crate::config::AppConfig;
use crate::error::{AppError, AppResult};
use crate::ratings::{repo::InMemoryRatingRepo, services::RatingService};
use crate::recipes::{repo::InMemoryRecipeRepo, services::RecipeService};
use crate::search::services::SearchService;
use crate::users::{
    repo::{InMemoryUserRepo, UserRepo},
    repo_types::{UserInput, ADMIN_ROLE},
    services::UserService,
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub recipes: RecipeService,
    pub ratings: RatingService,
    pub search: SearchService,
    pub users: UserService,
    pub auth: AuthService,
}

impl FromRef<AppState> for AuthService {
    fn from_ref(state: &AppState) -> Self {
        state.auth.clone()
    }
}

impl AppState {
    /// Wires every service over fresh in-memory collections.
    pub fn new(config: AppConfig) -> Self {
        let config = Arc::new(config);

        let recipes = RecipeService::new(Arc::new(InMemoryRecipeRepo::new()));
        let ratings = RatingService::new(Arc::new(InMemoryRatingRepo::new()), recipes.clone());
        let search = SearchService::new(recipes.clone());

        let user_repo: Arc<dyn UserRepo> = Arc::new(InMemoryUserRepo::new());
        let users = UserService::new(user_repo.clone());
        let auth = AuthService::new(user_repo, JwtKeys::from(&config.jwt));

        Self {
            config,
            recipes,
            ratings,
            search,
            users,
            auth,
        }
    }

    pub fn init() -> anyhow::Result<Self> {
        let state = Self::new(AppConfig::from_env()?);
        state.seed_admin()?;
        Ok(state)
    }

    /// Creates the configured admin account, if any.
    pub fn seed_admin(&self) -> AppResult<()> {
        let Some(admin) = self.config.admin.clone() else {
            return Ok(());
        };
        match self.users.create_user(UserInput {
            username: admin.username,
            email: admin.email,
            password: admin.password,
            role: Some(ADMIN_ROLE.into()),
        }) {
            Ok(user) => {
                info!(user_id = %user.id, username = %user.username, "bootstrap admin created");
                Ok(())
            }
            Err(AppError::Duplicate(_)) => Ok(()),
            Err(e) => Err(e),
        }
    }

    #[cfg(test)]
    pub fn fake() -> Self {
        use crate::config::{BootstrapAdmin, JwtConfig};

        Self::new(AppConfig {
            host: "127.0.0.1".into(),
            port: 0,
            jwt: JwtConfig {
                secret: "test".into(),
                issuer: "test".into(),
                audience: "test".into(),
                ttl_minutes: 24 * 60,
            },
            admin: Some(BootstrapAdmin {
                username: "admin".into(),
                email: "admin@example.com".into(),
                password: "admin-password".into(),
            }),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_admin_is_idempotent() {
        let state = AppState::fake();
        state.seed_admin().unwrap();
        state.seed_admin().unwrap();
        let users = state.users.list();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].role, ADMIN_ROLE);
    }

    #[test]
    fn services_share_collections() {
        use crate::ratings::repo_types::RatingInput;

        let state = AppState::fake();
        let recipe = state.recipes.create(Default::default());
        assert_eq!(state.search.paginate(1, 10).len(), 1);

        let input = RatingInput {
            score: 4,
            comment: String::new(),
        };
        let rating = state
            .ratings
            .create_rating(recipe.id, uuid::Uuid::new_v4(), input)
            .unwrap();
        assert_eq!(rating.recipe_id, recipe.id);
    }
}
