use crate::error::AppError;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Lifetime of an issued session token. There is no revocation list, so a
/// token stays honored until this window closes.
const TOKEN_TTL_HOURS: i64 = 24;

/// The claims encoded within a session token: a fixed record, not a free
/// map. Tokens whose claim structure does not match are rejected on decode.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Email of the authenticated account.
    pub email: String,
    /// Role of the account at issuance time.
    pub role: String,
    /// Expiration timestamp (seconds since epoch).
    pub exp: usize,
}

impl Claims {
    /// Builds claims for a fresh session expiring 24 hours from now.
    pub fn new(email: String, role: String) -> Self {
        let exp = Utc::now()
            .checked_add_signed(Duration::hours(TOKEN_TTL_HOURS))
            .expect("valid timestamp")
            .timestamp() as usize;

        Self { email, role, exp }
    }
}

/// Signs and verifies session tokens with a symmetric key.
///
/// Constructed once at startup from configuration and shared through app
/// data; the key is never read from the environment at call sites and never
/// rotated at runtime.
#[derive(Clone)]
pub struct TokenAuthority {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl TokenAuthority {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// Produces a signed HS256 token carrying the given claims.
    pub fn issue(&self, claims: &Claims) -> Result<String, AppError> {
        encode(&Header::default(), claims, &self.encoding)
            .map_err(|e| AppError::Internal(format!("Failed to generate token: {}", e)))
    }

    /// Verifies signature, algorithm family, and expiry, and returns exactly
    /// the claims the token was issued with.
    pub fn validate(&self, token: &str) -> Result<Claims, AppError> {
        decode::<Claims>(token, &self.decoding, &Validation::new(Algorithm::HS256))
            .map(|data| data.claims)
            .map_err(AppError::from)
    }
}
