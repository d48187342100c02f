//! Account service: registration, credential checks, password hashing.
//!
//! DESIGN
//! ======
//! Emails are normalized (trimmed, lowercased) before they are stored or
//! looked up, so uniqueness is case-insensitive. Passwords are stored as
//! `salt$digest`, both hex: a random 16-byte salt and an iterated SHA-256
//! digest over salt and password.

use rand::Rng;
use serde::Serialize;
use sha2::{Digest, Sha256};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::services::session::bytes_to_hex;

pub const MIN_PASSWORD_LEN: usize = 6;
const SALT_LEN: usize = 16;
const HASH_ROUNDS: u32 = 10_000;

/// Well-formed stored hash that no password produces. Checked against when the
/// email is unknown so both failure paths pay for a full digest.
const DUMMY_HASH: &str = "00000000000000000000000000000000$0000000000000000000000000000000000000000000000000000000000000000";

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    #[error("{0}")]
    Invalid(&'static str),
    #[error("email is already registered")]
    EmailTaken,
    #[error("invalid email or password")]
    BadCredentials,
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// A registered user as returned to clients. Never carries the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: String,
    pub email: String,
    /// Milliseconds since the Unix epoch.
    pub created_at: i64,
}

/// Registration input that has passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    pub name: String,
    pub email: String,
    pub password: String,
}

// =============================================================================
// VALIDATION
// =============================================================================

/// Trim and lowercase `email`; `None` unless it has the shape `local@domain`.
#[must_use]
pub fn normalize_email(email: &str) -> Option<String> {
    let normalized = email.trim().to_ascii_lowercase();
    let (local, domain) = normalized.split_once('@')?;
    if local.is_empty() || domain.is_empty() || domain.contains('@') || normalized.contains(char::is_whitespace) {
        return None;
    }
    Some(normalized)
}

/// Check registration input and normalize it.
///
/// `confirm_password`, when present, must equal `password`.
///
/// # Errors
///
/// Returns [`AccountError::Invalid`] naming the first failing rule.
pub fn validate_registration(
    name: &str,
    email: &str,
    password: &str,
    confirm_password: Option<&str>,
) -> Result<NewAccount, AccountError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AccountError::Invalid("name is required"));
    }
    let email = normalize_email(email).ok_or(AccountError::Invalid("a valid email is required"))?;
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AccountError::Invalid("password must be at least 6 characters"));
    }
    if confirm_password.is_some_and(|confirm| confirm != password) {
        return Err(AccountError::Invalid("passwords do not match"));
    }
    Ok(NewAccount { name: name.to_owned(), email, password: password.to_owned() })
}

// =============================================================================
// PASSWORD HASHING
// =============================================================================

fn digest(salt: &[u8], password: &str) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(salt);
    hasher.update(password.as_bytes());
    let mut out: [u8; 32] = hasher.finalize().into();
    for _ in 1..HASH_ROUNDS {
        let mut hasher = Sha256::new();
        hasher.update(out);
        hasher.update(salt);
        out = hasher.finalize().into();
    }
    out
}

fn hex_to_bytes(hex: &str) -> Option<Vec<u8>> {
    if hex.len() % 2 != 0 {
        return None;
    }
    (0..hex.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok())
        .collect()
}

/// Hash `password` with a fresh random salt.
#[must_use]
pub fn hash_password(password: &str) -> String {
    let salt: [u8; SALT_LEN] = rand::rng().random();
    format!("{}${}", bytes_to_hex(&salt), bytes_to_hex(&digest(&salt, password)))
}

/// Check `password` against a stored `salt$digest` hash.
///
/// Malformed stored hashes never verify. The digest comparison does not
/// short-circuit.
#[must_use]
pub fn verify_password(password: &str, stored: &str) -> bool {
    let Some((salt_hex, digest_hex)) = stored.split_once('$') else {
        return false;
    };
    let (Some(salt), Some(expected)) = (hex_to_bytes(salt_hex), hex_to_bytes(digest_hex)) else {
        return false;
    };
    let actual = digest(&salt, password);
    expected.len() == actual.len() && expected.iter().zip(actual.iter()).fold(0u8, |acc, (a, b)| acc | (a ^ b)) == 0
}

// =============================================================================
// PERSISTENCE
// =============================================================================

pub(crate) const ACCOUNT_COLUMNS: &str =
    "id, name, email, (extract(epoch FROM created_at) * 1000)::bigint AS created_at_ms";

pub(crate) fn row_to_account(row: &PgRow) -> Result<Account, sqlx::Error> {
    Ok(Account {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        email: row.try_get("email")?,
        created_at: row.try_get("created_at_ms")?,
    })
}

/// Create an account.
///
/// # Errors
///
/// Returns [`AccountError::EmailTaken`] if the email is already registered,
/// or a database error.
pub async fn register(pool: &PgPool, account: &NewAccount) -> Result<Account, AccountError> {
    let row = sqlx::query(&format!(
        "INSERT INTO users (id, name, email, password_hash)
         VALUES ($1, $2, $3, $4)
         ON CONFLICT (email) DO NOTHING
         RETURNING {ACCOUNT_COLUMNS}"
    ))
    .bind(Uuid::new_v4())
    .bind(&account.name)
    .bind(&account.email)
    .bind(hash_password(&account.password))
    .fetch_optional(pool)
    .await?;

    match row {
        Some(row) => Ok(row_to_account(&row)?),
        None => Err(AccountError::EmailTaken),
    }
}

/// Look up an account by email and check its password.
///
/// # Errors
///
/// Returns [`AccountError::BadCredentials`] for a malformed or unknown email
/// or a wrong password, or a database error.
pub async fn authenticate(pool: &PgPool, email: &str, password: &str) -> Result<Account, AccountError> {
    let email = normalize_email(email).ok_or(AccountError::BadCredentials)?;
    if password.is_empty() {
        return Err(AccountError::BadCredentials);
    }

    let row = sqlx::query(&format!("SELECT {ACCOUNT_COLUMNS}, password_hash FROM users WHERE email = $1"))
        .bind(&email)
        .fetch_optional(pool)
        .await?;
    let Some(row) = row else {
        let _ = std::hint::black_box(verify_password(password, DUMMY_HASH));
        return Err(AccountError::BadCredentials);
    };

    let stored: String = row.try_get("password_hash")?;
    if !verify_password(password, &stored) {
        return Err(AccountError::BadCredentials);
    }
    Ok(row_to_account(&row)?)
}

#[cfg(test)]
#[path = "account_test.rs"]
mod tests;
