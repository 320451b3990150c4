//! User Service - Business logic layer

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use axum_helpers::collect_messages;
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::error::{UserError, UserResult};
use crate::models::{ChangePassword, RegisterUser, UpdateUser, User};
use crate::repository::UserRepository;

/// Lowercase and trim the address so lookups and the unique index agree
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

pub(crate) fn hash_password(password: &str) -> UserResult<String> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| UserError::PasswordHash(e.to_string()))
}

pub(crate) fn verify_password(password: &str, hash: &str) -> UserResult<bool> {
    let parsed_hash = PasswordHash::new(hash).map_err(|e| UserError::PasswordHash(e.to_string()))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// User service providing business logic operations
///
/// The service layer handles email normalization, validation, password
/// hashing, and orchestrates repository operations.
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> UserService<R> {
    /// Create a new UserService with the given repository
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Register a new user account
    #[instrument(skip(self, input))]
    pub async fn register(&self, mut input: RegisterUser) -> UserResult<User> {
        input.email = normalize_email(&input.email);
        input
            .validate()
            .map_err(|e| UserError::Validation(collect_messages(&e)))?;

        // Fast path; the unique index still catches concurrent registrations
        if self.repository.email_exists(&input.email).await? {
            return Err(UserError::EmailInUse);
        }

        let password_hash = hash_password(&input.password)?;
        let created = self.repository.create(User::new(input, password_hash)).await?;

        tracing::info!(user_id = %created.id, "User registered successfully");
        Ok(created)
    }

    /// Check a login attempt, returning the user on success
    ///
    /// Unknown emails and wrong passwords produce the same error so the
    /// response does not reveal which accounts exist.
    #[instrument(skip(self, email, password))]
    pub async fn verify_credentials(&self, email: &str, password: &str) -> UserResult<User> {
        let email = normalize_email(email);

        let user = self
            .repository
            .get_by_email(&email)
            .await?
            .ok_or(UserError::InvalidCredentials)?;

        if !verify_password(password, &user.password_hash)? {
            return Err(UserError::InvalidCredentials);
        }

        Ok(user)
    }

    /// Get a user by ID
    #[instrument(skip(self))]
    pub async fn get_user(&self, id: Uuid) -> UserResult<User> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id))
    }

    /// Update profile fields, validating the merged result
    #[instrument(skip(self, input))]
    pub async fn update_user(&self, id: Uuid, mut input: UpdateUser) -> UserResult<User> {
        if let Some(ref mut email) = input.email {
            *email = normalize_email(email);
        }

        let mut user = self.get_user(id).await?;
        let previous_email = user.email.clone();

        user.apply_update(input);
        user.validate()
            .map_err(|e| UserError::Validation(collect_messages(&e)))?;

        if user.email != previous_email && self.repository.email_exists(&user.email).await? {
            return Err(UserError::EmailInUse);
        }

        self.repository
            .update(user)
            .await?
            .ok_or(UserError::NotFound(id))
    }

    /// Change the password after verifying the current one
    #[instrument(skip(self, input))]
    pub async fn change_password(&self, id: Uuid, input: ChangePassword) -> UserResult<()> {
        input
            .validate()
            .map_err(|e| UserError::Validation(collect_messages(&e)))?;

        let mut user = self.get_user(id).await?;

        if !verify_password(&input.current_password, &user.password_hash)? {
            return Err(UserError::InvalidCredentials);
        }

        if input.new_password == input.current_password {
            return Err(UserError::Validation(vec![
                "New password must be different from the current password".to_string(),
            ]));
        }

        user.password_hash = hash_password(&input.new_password)?;
        user.updated_at = chrono::Utc::now();

        self.repository
            .update(user)
            .await?
            .ok_or(UserError::NotFound(id))?;

        tracing::info!(user_id = %id, "Password changed successfully");
        Ok(())
    }
}

impl<R: UserRepository> Clone for UserService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}
