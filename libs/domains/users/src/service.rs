//! User Service - registration, login and profile lookup

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::error::{UserError, UserResult};
use crate::models::{LoginRequest, RegisterRequest, User, UserResponse};
use crate::repository::UserRepository;

pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create a staff account with a freshly hashed password
    #[instrument(skip(self, input))]
    pub async fn register(&self, input: RegisterRequest) -> UserResult<User> {
        let new_user = input.normalize();
        new_user.validate()?;

        if self.repository.email_exists(new_user.email.clone()).await? {
            return Err(UserError::DuplicateEmail(new_user.email));
        }

        let password_hash = self.hash_password(&new_user.password)?;
        self.repository.create(User::new(new_user, password_hash)).await
    }

    /// Check an email/password pair. Malformed input, unknown emails and wrong
    /// passwords are indistinguishable to the caller.
    #[instrument(skip(self, input))]
    pub async fn login(&self, input: LoginRequest) -> UserResult<User> {
        let credentials = input.normalize();
        if credentials.validate().is_err() {
            tracing::info!("Login rejected: malformed credentials");
            return Err(UserError::InvalidCredentials);
        }

        let Some(user) = self.repository.find_by_email(credentials.email).await? else {
            return Err(UserError::InvalidCredentials);
        };

        if !self.verify_password(&credentials.password, &user.password_hash)? {
            tracing::info!(user_id = %user.id, "Login rejected: wrong password");
            return Err(UserError::InvalidCredentials);
        }

        tracing::info!(user_id = %user.id, "User logged in");
        Ok(user)
    }

    #[instrument(skip(self))]
    pub async fn profile(&self, id: Uuid) -> UserResult<UserResponse> {
        self.repository
            .get_by_id(id)
            .await?
            .map(UserResponse::from)
            .ok_or(UserError::NotFound(id))
    }

    fn hash_password(&self, password: &str) -> UserResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| UserError::PasswordHash(e.to_string()))
    }

    fn verify_password(&self, password: &str, hash: &str) -> UserResult<bool> {
        let parsed_hash =
            PasswordHash::new(hash).map_err(|e| UserError::PasswordHash(e.to_string()))?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }
}
