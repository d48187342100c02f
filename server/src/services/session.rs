//! Bearer-token sessions.
//!
//! ARCHITECTURE
//! ============
//! Login issues an opaque random token stored in `sessions` with an expiry.
//! Every authenticated request resolves the token back to its account; expired
//! rows never resolve and are swept when the same user signs in again.

use std::fmt::Write;

use rand::Rng;
use sqlx::PgPool;
use uuid::Uuid;

use crate::services::account::{ACCOUNT_COLUMNS, Account, row_to_account};

pub(crate) fn bytes_to_hex(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        let _ = write!(s, "{b:02x}");
    }
    s
}

/// Generate a cryptographically random 32-byte hex token.
#[must_use]
pub fn generate_token() -> String {
    let bytes: [u8; 32] = rand::rng().random();
    bytes_to_hex(&bytes)
}

/// Create a session for the given user that lives `ttl_days`, returning the token.
pub async fn create_session(pool: &PgPool, user_id: Uuid, ttl_days: i64) -> Result<String, sqlx::Error> {
    sqlx::query("DELETE FROM sessions WHERE user_id = $1 AND expires_at <= now()")
        .bind(user_id)
        .execute(pool)
        .await?;

    let token = generate_token();
    sqlx::query("INSERT INTO sessions (token, user_id, expires_at) VALUES ($1, $2, now() + make_interval(days => $3))")
        .bind(&token)
        .bind(user_id)
        .bind(i32::try_from(ttl_days).unwrap_or(i32::MAX))
        .execute(pool)
        .await?;
    Ok(token)
}

/// Validate a session token and return the associated account.
pub async fn validate_session(pool: &PgPool, token: &str) -> Result<Option<Account>, sqlx::Error> {
    let row = sqlx::query(&format!(
        "SELECT {ACCOUNT_COLUMNS}
         FROM users
         WHERE id = (SELECT user_id FROM sessions WHERE token = $1 AND expires_at > now())"
    ))
    .bind(token)
    .fetch_optional(pool)
    .await?;

    row.as_ref().map(row_to_account).transpose()
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
