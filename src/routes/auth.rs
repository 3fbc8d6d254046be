//! Auth routes — login, two-step registration, session management.

use axum::extract::{FromRef, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Deserialize;
use time::Duration;

use crate::routes::{ErrorResponse, error_body};
use crate::services::registration::{self, AuthError};
use crate::services::session;
use crate::state::{AppState, UserSession};

const COOKIE_NAME: &str = "session_token";

pub(crate) fn env_bool(key: &str) -> Option<bool> {
    std::env::var(key)
        .ok()
        .and_then(|raw| match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Some(true),
            "0" | "false" | "no" | "off" => Some(false),
            _ => None,
        })
}

pub(crate) fn cookie_secure() -> bool {
    env_bool("COOKIE_SECURE").unwrap_or(false)
}

fn session_cookie(token: String) -> Cookie<'static> {
    Cookie::build((COOKIE_NAME, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(cookie_secure())
        .build()
}

pub(crate) fn auth_error_status(err: &AuthError) -> StatusCode {
    match err {
        AuthError::MissingField(_) | AuthError::PasswordMismatch => StatusCode::UNPROCESSABLE_ENTITY,
        AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
        AuthError::EmailTaken => StatusCode::CONFLICT,
        AuthError::UnknownRegistration => StatusCode::BAD_REQUEST,
    }
}

// =============================================================================
// AUTH EXTRACTOR
// =============================================================================

/// Authenticated user extracted from the session cookie.
/// Use as a handler parameter to require authentication.
pub struct AuthUser {
    pub user: UserSession,
    pub token: String,
}

impl<S> axum::extract::FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut axum::http::request::Parts, state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let token = jar.get(COOKIE_NAME).map(Cookie::value).unwrap_or_default();
        if token.is_empty() {
            return Err(StatusCode::UNAUTHORIZED);
        }

        let app_state = AppState::from_ref(state);
        let user = session::validate_session(&app_state, token)
            .await
            .ok_or(StatusCode::UNAUTHORIZED)?;

        Ok(Self { user, token: token.to_owned() })
    }
}

// =============================================================================
// HANDLERS
// =============================================================================

#[derive(Deserialize)]
pub struct LoginBody {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// `POST /api/auth/login` — open a session, set the cookie.
pub async fn login(State(state): State<AppState>, Json(body): Json<LoginBody>) -> Response {
    match registration::login(&state, &body.email, &body.password).await {
        Ok((token, user)) => {
            let jar = CookieJar::new().add(session_cookie(token));
            (jar, Json(user)).into_response()
        }
        Err(e) => error_body(auth_error_status(&e), e).into_response(),
    }
}

#[derive(Deserialize)]
pub struct RegisterBody {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub confirm_password: String,
}

/// `POST /api/auth/register` — registration step 1 (credentials).
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterBody>,
) -> Result<Json<serde_json::Value>, ErrorResponse> {
    let token = registration::register_step1(&state, &body.email, &body.phone, &body.password, &body.confirm_password)
        .await
        .map_err(|e| error_body(auth_error_status(&e), e))?;
    Ok(Json(serde_json::json!({ "registration_token": token })))
}

#[derive(Deserialize)]
pub struct RegisterVerifyBody {
    #[serde(default)]
    pub registration_token: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub government_id: String,
    pub profession: Option<String>,
}

/// `POST /api/auth/register/verify` — registration step 2 (identity),
/// logs the new account in.
pub async fn register_verify(State(state): State<AppState>, Json(body): Json<RegisterVerifyBody>) -> Response {
    let result = registration::register_step2(
        &state,
        &body.registration_token,
        &body.name,
        &body.location,
        &body.government_id,
        body.profession.as_deref(),
    )
    .await;

    match result {
        Ok((token, user)) => {
            let jar = CookieJar::new().add(session_cookie(token));
            (StatusCode::CREATED, jar, Json(user)).into_response()
        }
        Err(e) => error_body(auth_error_status(&e), e).into_response(),
    }
}

/// `GET /api/auth/me` — return current user.
pub async fn me(auth: AuthUser) -> Json<UserSession> {
    Json(auth.user)
}

/// `POST /api/auth/logout` — delete session, clear cookie.
pub async fn logout(State(state): State<AppState>, auth: AuthUser) -> impl IntoResponse {
    session::delete_session(&state, &auth.token).await;

    let cookie = Cookie::build((COOKIE_NAME, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(cookie_secure())
        .max_age(Duration::ZERO);

    let jar = CookieJar::new().add(cookie);
    (jar, StatusCode::NO_CONTENT)
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
