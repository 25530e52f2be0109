//! User service.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use sea_orm::Set;
use serde::Deserialize;
use validator::Validate;
use yatube_common::{AppError, AppResult, IdGenerator};
use yatube_db::{entities::user, repositories::UserRepository};

/// User service for registration and authentication.
#[derive(Clone)]
pub struct UserService {
    user_repo: UserRepository,
    id_gen: IdGenerator,
}

/// Input for creating a new user.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserInput {
    #[validate(length(min = 1, max = 128))]
    pub username: String,

    #[validate(length(min = 8, max = 128))]
    pub password: String,

    #[validate(length(max = 256))]
    pub name: Option<String>,
}

impl UserService {
    /// Create a new user service.
    #[must_use]
    pub fn new(user_repo: UserRepository) -> Self {
        Self {
            user_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Register a new user.
    pub async fn create(&self, input: CreateUserInput) -> AppResult<user::Model> {
        input.validate()?;

        if self
            .user_repo
            .find_by_username(&input.username)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict(format!(
                "Username already taken: {}",
                input.username
            )));
        }

        let model = user::ActiveModel {
            id: Set(self.id_gen.generate()),
            username: Set(input.username.clone()),
            username_lower: Set(input.username.to_lowercase()),
            password_hash: Set(hash_password(&input.password)?),
            token: Set(Some(self.id_gen.generate_token())),
            name: Set(input.name),
            ..Default::default()
        };

        let user = self.user_repo.create(model).await?;
        tracing::info!(user_id = %user.id, username = %user.username, "Registered new user");
        Ok(user)
    }

    /// Authenticate with username and password.
    pub async fn authenticate(&self, username: &str, password: &str) -> AppResult<user::Model> {
        let user = self
            .user_repo
            .find_by_username(username)
            .await?
            .ok_or(AppError::Unauthorized)?;

        if !verify_password(password, &user.password_hash)? {
            return Err(AppError::Unauthorized);
        }

        Ok(user)
    }

    /// Authenticate with an access token.
    pub async fn authenticate_by_token(&self, token: &str) -> AppResult<user::Model> {
        self.user_repo
            .find_by_token(token)
            .await?
            .ok_or(AppError::Unauthorized)
    }

    /// Replace the user's access token, invalidating the old one.
    pub async fn regenerate_token(&self, user_id: &str) -> AppResult<String> {
        let user = self.user_repo.get_by_id(user_id).await?;
        let new_token = self.id_gen.generate_token();

        let mut model: user::ActiveModel = user.into();
        model.token = Set(Some(new_token.clone()));
        self.user_repo.update(model).await?;

        Ok(new_token)
    }

    /// Look up a user by username, erroring if unknown.
    pub async fn get_by_username(&self, username: &str) -> AppResult<user::Model> {
        self.user_repo.get_by_username(username).await
    }
}

/// Hash a password with argon2.
fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(format!("Password hashing failed: {e}")))
}

/// Verify a password against an argon2 hash.
fn verify_password(password: &str, hash: &str) -> AppResult<bool> {
    let parsed_hash =
        PasswordHash::new(hash).map_err(|e| AppError::Internal(format!("Invalid hash: {e}")))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    fn create_test_user(id: &str, username: &str) -> user::Model {
        user::Model {
            id: id.to_string(),
            username: username.to_string(),
            username_lower: username.to_lowercase(),
            password_hash: hash_password("correct horse").unwrap(),
            token: Some("test_token".to_string()),
            name: None,
            created_at: Utc::now().into(),
        }
    }

    #[test]
    fn test_hash_password_produces_argon2_hash() {
        let hash = hash_password("password123").unwrap();
        assert!(hash.starts_with("$argon2"));
    }

    #[test]
    fn test_verify_password_correct() {
        let hash = hash_password("password123").unwrap();
        assert!(verify_password("password123", &hash).unwrap());
    }

    #[test]
    fn test_verify_password_wrong() {
        let hash = hash_password("password123").unwrap();
        assert!(!verify_password("hunter2", &hash).unwrap());
    }

    #[tokio::test]
    async fn test_create_rejects_taken_username() {
        let existing = create_test_user("u1", "auth");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[existing.clone()]])
                .into_connection(),
        );

        let service = UserService::new(UserRepository::new(db));
        let result = service
            .create(CreateUserInput {
                username: "auth".to_string(),
                password: "password123".to_string(),
                name: None,
            })
            .await;

        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_create_rejects_short_password() {
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());

        let service = UserService::new(UserRepository::new(db));
        let result = service
            .create(CreateUserInput {
                username: "auth".to_string(),
                password: "short".to_string(),
                name: None,
            })
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_authenticate_wrong_password_is_unauthorized() {
        let user = create_test_user("u1", "auth");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[user.clone()]])
                .into_connection(),
        );

        let service = UserService::new(UserRepository::new(db));
        let result = service.authenticate("auth", "wrong password").await;

        assert!(matches!(result, Err(AppError::Unauthorized)));
    }

    #[tokio::test]
    async fn test_authenticate_by_token_unknown_is_unauthorized() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<user::Model>::new()])
                .into_connection(),
        );

        let service = UserService::new(UserRepository::new(db));
        let result = service.authenticate_by_token("bogus").await;

        assert!(matches!(result, Err(AppError::Unauthorized)));
    }
}
