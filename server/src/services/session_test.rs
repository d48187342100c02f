use super::*;

// =============================================================================
// bytes_to_hex
// =============================================================================

#[test]
fn bytes_to_hex_empty() {
    assert_eq!(bytes_to_hex(&[]), "");
}

#[test]
fn bytes_to_hex_leading_zero() {
    assert_eq!(bytes_to_hex(&[0x0a]), "0a");
}

#[test]
fn bytes_to_hex_multi_byte() {
    assert_eq!(bytes_to_hex(&[0xde, 0xad, 0xbe, 0xef]), "deadbeef");
}

// =============================================================================
// generate_token
// =============================================================================

#[test]
fn generate_token_is_64_hex_chars() {
    let token = generate_token();
    assert_eq!(token.len(), 64);
    assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
}

#[test]
fn generate_token_two_calls_differ() {
    assert_ne!(generate_token(), generate_token());
}

// =============================================================================
// Live database
// =============================================================================

#[cfg(feature = "live-db-tests")]
#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL/live Postgres"]
async fn session_resolves_until_expiry() {
    use crate::services::account::{self, validate_registration};
    use crate::state::test_helpers::integration_pool;

    let pool = integration_pool().await;
    let new = validate_registration("Sam", "sam@example.com", "secret1", None).unwrap();
    let acct = account::register(&pool, &new).await.unwrap();

    let token = create_session(&pool, acct.id, 30).await.unwrap();
    let resolved = validate_session(&pool, &token).await.unwrap();
    assert_eq!(resolved, Some(acct.clone()));

    sqlx::query("UPDATE sessions SET expires_at = now() - interval '1 minute' WHERE token = $1")
        .bind(&token)
        .execute(&pool)
        .await
        .unwrap();
    assert_eq!(validate_session(&pool, &token).await.unwrap(), None);
    assert_eq!(validate_session(&pool, "not-a-token").await.unwrap(), None);
}
