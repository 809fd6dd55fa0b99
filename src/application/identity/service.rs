//! User management service — application-layer orchestration
//!
//! All user-related business logic lives here.
//! HTTP handlers should be thin wrappers that delegate to this service.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::{
    CredentialHasher, DomainError, DomainResult, LoginIdentifier, NewUser, StoreError,
    UniqueConstraint, User, UserChanges, UserRepositoryInterface,
};
use crate::shared::SharedClock;

pub const USERNAME_UNAVAILABLE: &str = "Username unavailable";
pub const EMAIL_ALREADY_REGISTERED: &str = "Email already registered";
pub const ERROR_REGISTERING_USER: &str = "Error registering user";

/// Registration payload with the plaintext password.
#[derive(Debug, Clone)]
pub struct RegisterUser {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Profile update payload. `password: None` keeps the current one.
#[derive(Debug, Clone)]
pub struct UpdateUser {
    pub username: String,
    pub email: String,
    pub password: Option<String>,
}

/// User service — stateless; every dependency is shared and immutable.
pub struct UserService {
    repo: Arc<dyn UserRepositoryInterface>,
    hasher: Arc<dyn CredentialHasher>,
    clock: SharedClock,
}

impl UserService {
    pub fn new(
        repo: Arc<dyn UserRepositoryInterface>,
        hasher: Arc<dyn CredentialHasher>,
        clock: SharedClock,
    ) -> Self {
        Self { repo, hasher, clock }
    }

    // ── Authentication ──────────────────────────────────────────

    /// Authenticate by username or email plus password.
    ///
    /// A missing identifier or password is rejected before anything is
    /// hashed or looked up.
    pub async fn login(
        &self,
        identifier: Option<LoginIdentifier>,
        password: Option<&str>,
    ) -> DomainResult<User> {
        let (Some(identifier), Some(password)) =
            (identifier, password.filter(|p| !p.is_empty()))
        else {
            debug!("Login rejected: identifier or password missing");
            return Err(DomainError::InvalidCredentials);
        };

        let password_hash = self.hasher.hash(password).map_err(|e| {
            warn!(error = %e, "Login rejected: password could not be hashed");
            DomainError::InvalidCredentials
        })?;

        match self
            .repo
            .find_by_credentials(&identifier, &password_hash)
            .await?
        {
            Some(user) => {
                info!(user_id = user.id, by = identifier.kind(), "User logged in");
                Ok(user)
            }
            None => {
                debug!(%identifier, "Login rejected: no matching credentials");
                Err(DomainError::InvalidCredentials)
            }
        }
    }

    // ── Registration ────────────────────────────────────────────

    pub async fn create(&self, request: RegisterUser) -> DomainResult<i64> {
        let password_hash = self.hash_password(&request.password)?;
        let now = self.clock.stamp();

        let user = NewUser {
            username: request.username,
            email: request.email,
            password_hash,
            created_at: now.clone(),
            edited_at: now,
        };

        let id = self
            .repo
            .create_user(user)
            .await
            .map_err(translate_conflict)?;

        info!(user_id = id, "New user registered");
        Ok(id)
    }

    // ── Queries ─────────────────────────────────────────────────

    pub async fn list(&self) -> DomainResult<Vec<User>> {
        Ok(self.repo.list_users().await?)
    }

    pub async fn get_by_id(&self, id: i64) -> DomainResult<Option<User>> {
        Ok(self.repo.get_user_by_id(id).await?)
    }

    // ── Commands (mutations) ────────────────────────────────────

    pub async fn update(&self, id: i64, request: UpdateUser) -> DomainResult<()> {
        let password_hash = request
            .password
            .as_deref()
            .map(|p| self.hash_password(p))
            .transpose()?;

        let changes = UserChanges {
            username: request.username,
            email: request.email,
            password_hash,
            edited_at: self.clock.stamp(),
        };

        self.repo
            .update_user(id, changes)
            .await
            .map_err(translate_conflict)?;

        info!(user_id = id, "User updated");
        Ok(())
    }

    /// Store errors are passed through as-is.
    pub async fn delete(&self, id: i64) -> DomainResult<()> {
        self.repo.delete_user(id).await?;
        info!(user_id = id, "User deleted");
        Ok(())
    }

    fn hash_password(&self, password: &str) -> DomainResult<String> {
        self.hasher
            .hash(password)
            .map_err(|e| DomainError::Crypto(e.to_string()))
    }
}

fn translate_conflict(err: StoreError) -> DomainError {
    let StoreError::UniqueViolation(violation) = err else {
        return err.into();
    };

    debug!(constraint = %violation.constraint, fields = ?violation.fields, "User write rejected");
    let message = match violation.constraint {
        UniqueConstraint::Username => USERNAME_UNAVAILABLE,
        UniqueConstraint::Email => EMAIL_ALREADY_REGISTERED,
        UniqueConstraint::CategoryName | UniqueConstraint::Unknown => ERROR_REGISTERING_USER,
    };
    DomainError::conflict(message)
}
