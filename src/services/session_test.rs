use super::*;
use crate::state::test_helpers;

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
// session lifecycle
// =============================================================================

#[tokio::test]
async fn create_then_validate_returns_session() {
    let state = test_helpers::test_app_state();
    let account = test_helpers::dummy_account();
    let (token, session) = create_session(&state, &account).await;

    let found = validate_session(&state, &token).await.unwrap();
    assert_eq!(found.user_id, account.id);
    assert_eq!(found.email, session.email);
    assert!(found.verified);
}

#[tokio::test]
async fn validate_unknown_token_is_none() {
    let state = test_helpers::test_app_state();
    assert!(validate_session(&state, "no-such-token").await.is_none());
}

#[tokio::test]
async fn delete_clears_session_unconditionally() {
    let state = test_helpers::test_app_state();
    let account = test_helpers::dummy_account();
    let (token, _) = create_session(&state, &account).await;

    delete_session(&state, &token).await;
    assert!(validate_session(&state, &token).await.is_none());

    // Deleting again (or deleting garbage) is a no-op.
    delete_session(&state, &token).await;
    delete_session(&state, "garbage").await;
}

#[tokio::test]
async fn sessions_are_independent() {
    let state = test_helpers::test_app_state();
    let account = test_helpers::dummy_account();
    let (t1, _) = create_session(&state, &account).await;
    let (t2, _) = create_session(&state, &account).await;
    assert_ne!(t1, t2);

    delete_session(&state, &t1).await;
    assert!(validate_session(&state, &t2).await.is_some());
}
