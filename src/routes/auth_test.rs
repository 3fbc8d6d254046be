use super::*;
use crate::state::test_helpers;

// =============================================================================
// env_bool — uses unique env var names to avoid races with parallel tests.
// =============================================================================

#[test]
fn env_bool_true_variants() {
    for (i, val) in ["1", "true", "yes", "on"].iter().enumerate() {
        let key = format!("__TEST_AB_TRUE_{i}__");
        unsafe { std::env::set_var(&key, val) };
        assert_eq!(env_bool(&key), Some(true), "expected true for {val:?}");
        unsafe { std::env::remove_var(&key) };
    }
}

#[test]
fn env_bool_false_variants() {
    for (i, val) in ["0", "false", "no", "off"].iter().enumerate() {
        let key = format!("__TEST_AB_FALSE_{i}__");
        unsafe { std::env::set_var(&key, val) };
        assert_eq!(env_bool(&key), Some(false), "expected false for {val:?}");
        unsafe { std::env::remove_var(&key) };
    }
}

#[test]
fn env_bool_invalid_returns_none() {
    let key = "__TEST_AB_INVALID_311__";
    unsafe { std::env::set_var(key, "maybe") };
    assert_eq!(env_bool(key), None);
    unsafe { std::env::remove_var(key) };
}

#[test]
fn env_bool_unset_returns_none() {
    assert_eq!(env_bool("__TEST_AB_SURELY_UNSET_312__"), None);
}

// =============================================================================
// auth_error_status
// =============================================================================

#[test]
fn missing_field_maps_to_unprocessable() {
    assert_eq!(auth_error_status(&AuthError::MissingField("email")), StatusCode::UNPROCESSABLE_ENTITY);
}

#[test]
fn password_mismatch_maps_to_unprocessable() {
    assert_eq!(auth_error_status(&AuthError::PasswordMismatch), StatusCode::UNPROCESSABLE_ENTITY);
}

#[test]
fn invalid_credentials_maps_to_unauthorized() {
    assert_eq!(auth_error_status(&AuthError::InvalidCredentials), StatusCode::UNAUTHORIZED);
}

#[test]
fn email_taken_maps_to_conflict() {
    assert_eq!(auth_error_status(&AuthError::EmailTaken), StatusCode::CONFLICT);
}

// =============================================================================
// handlers
// =============================================================================

#[tokio::test]
async fn login_handler_rejects_missing_fields() {
    let state = test_helpers::test_app_state();
    let body = LoginBody { email: String::new(), password: "pw".into() };
    let response = login(State(state), Json(body)).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn login_handler_sets_session_cookie() {
    let state = test_helpers::test_app_state();
    let account = test_helpers::dummy_account();
    state
        .accounts
        .write()
        .await
        .insert(account.email.clone(), account);

    let body = LoginBody { email: "priya@example.com".into(), password: "wavewatch".into() };
    let response = login(State(state.clone()), Json(body)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let set_cookie = response
        .headers()
        .get(axum::http::header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .unwrap();
    assert!(set_cookie.starts_with("session_token="));
    assert!(set_cookie.contains("HttpOnly"));
    assert_eq!(state.sessions.read().await.len(), 1);
}

#[tokio::test]
async fn register_handler_issues_token() {
    let state = test_helpers::test_app_state();
    let body = RegisterBody {
        email: "new@coast.in".into(),
        phone: "+91 98765 43210".into(),
        password: "pw".into(),
        confirm_password: "pw".into(),
    };
    let Json(value) = register(State(state), Json(body)).await.unwrap();
    assert!(value["registration_token"].as_str().is_some_and(|t| !t.is_empty()));
}

#[tokio::test]
async fn register_handler_mismatch_never_advances() {
    let state = test_helpers::test_app_state();
    let body = RegisterBody {
        email: "new@coast.in".into(),
        phone: "+91 98765 43210".into(),
        password: "pw1".into(),
        confirm_password: "pw2".into(),
    };
    let (status, _) = register(State(state.clone()), Json(body)).await.unwrap_err();
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(state.registrations.read().await.is_empty());
}

#[tokio::test]
async fn register_verify_creates_session() {
    let state = test_helpers::test_app_state();
    let token = crate::services::registration::register_step1(&state, "new@coast.in", "123", "pw", "pw")
        .await
        .unwrap();
    let body = RegisterVerifyBody {
        registration_token: token,
        name: "Ravi Kumar".into(),
        location: "Kochi".into(),
        government_id: "ABCDE1234F".into(),
        profession: None,
    };
    let response = register_verify(State(state.clone()), Json(body)).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(state.sessions.read().await.len(), 1);
}

#[tokio::test]
async fn logout_clears_session_unconditionally() {
    let state = test_helpers::test_app_state();
    let (token, user) = test_helpers::seed_session(&state).await;

    let auth = AuthUser { user, token: token.clone() };
    let response = logout(State(state.clone()), auth).await.into_response();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(state.sessions.read().await.is_empty());
}

#[tokio::test]
async fn me_returns_session_user() {
    let state = test_helpers::test_app_state();
    let (token, user) = test_helpers::seed_session(&state).await;
    let Json(me_user) = me(AuthUser { user: user.clone(), token }).await;
    assert_eq!(me_user.user_id, user.user_id);
    assert_eq!(me_user.email, "priya@example.com");
}
