use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// Role assigned to every self-registered account. Note the admin gate
/// checks for `"Admin"` (capitalized); an account only passes it after its
/// role has been changed out of band.
pub const DEFAULT_ROLE: &str = "user";

/// A registered account as stored and as returned by the admin listing.
/// The password hash never leaves the process: it is skipped on
/// serialization.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

/// The fields the caller supplies for a new account; id and created_at are
/// assigned by the store.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub role: String,
}
