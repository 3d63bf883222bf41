use std::sync::Arc;

use crate::auth::password::{hash_password, verify_password};
use crate::error::AppError;
use crate::models::{NewUser, User, DEFAULT_ROLE};
use crate::store::CredentialStore;

/// Registration and login business logic over a credential store.
pub struct AuthService {
    users: Arc<dyn CredentialStore>,
}

impl AuthService {
    pub fn new(users: Arc<dyn CredentialStore>) -> Self {
        Self { users }
    }

    /// Creates a new account with the default role.
    ///
    /// The uniqueness check happens here, before hashing: a taken email
    /// fails with `AlreadyExists` and nothing is inserted. No token is
    /// issued on registration; login is a separate step.
    pub async fn register(&self, email: &str, password: &str) -> Result<User, AppError> {
        if self.users.find_by_email(email).await?.is_some() {
            return Err(AppError::AlreadyExists("Email already registered".into()));
        }

        let password_hash = hash_password(password)?;

        self.users
            .insert(NewUser {
                email: email.to_string(),
                password_hash,
                role: DEFAULT_ROLE.to_string(),
            })
            .await
    }

    /// Checks credentials and returns the account on success.
    ///
    /// An unknown email and a wrong password produce the same
    /// `InvalidCredentials` error so responses cannot be used to enumerate
    /// accounts.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, AppError> {
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        if !verify_password(password, &user.password_hash)? {
            return Err(AppError::InvalidCredentials);
        }

        Ok(user)
    }

    /// All registered accounts, for the admin-only listing.
    pub async fn list_users(&self) -> Result<Vec<User>, AppError> {
        self.users.list_all().await
    }
}
