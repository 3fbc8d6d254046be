//! Login and two-step registration.
//!
//! DESIGN
//! ======
//! Step 1 collects credentials (email, phone, password + confirmation)
//! and parks them behind a registration token; step 2 collects identity
//! details, consumes the token, and creates an unverified account that
//! is logged in immediately. Identity verification itself happens out
//! of band — the government ID is checked for presence and discarded,
//! never stored.

use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::services::session;
use crate::state::{AppState, PendingRegistration, Role, UserAccount, UserSession};

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("passwords do not match")]
    PasswordMismatch,
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("an account with this email already exists")]
    EmailTaken,
    #[error("registration expired or unknown")]
    UnknownRegistration,
}

/// SHA-256 hex digest of a password.
#[must_use]
pub fn hash_password(password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    hasher
        .finalize()
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect::<String>()
}

fn require<'a>(value: &'a str, field: &'static str) -> Result<&'a str, AuthError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(AuthError::MissingField(field))
    } else {
        Ok(trimmed)
    }
}

// =============================================================================
// LOGIN
// =============================================================================

/// Authenticate against the account store and open a session.
///
/// # Errors
///
/// `MissingField` for empty inputs, `InvalidCredentials` for an unknown
/// email or wrong password (indistinguishable on purpose).
pub async fn login(state: &AppState, email: &str, password: &str) -> Result<(String, UserSession), AuthError> {
    let email = require(email, "email")?.to_ascii_lowercase();
    let password = require(password, "password")?;

    let account = {
        let accounts = state.accounts.read().await;
        accounts
            .get(&email)
            .filter(|a| a.password_hash == hash_password(password))
            .cloned()
            .ok_or(AuthError::InvalidCredentials)?
    };

    Ok(session::create_session(state, &account).await)
}

// =============================================================================
// REGISTRATION
// =============================================================================

/// Step 1: credentials. All four fields are required and the password
/// must match its confirmation before a registration token is issued.
///
/// # Errors
///
/// `MissingField`, `PasswordMismatch`, or `EmailTaken`.
pub async fn register_step1(
    state: &AppState,
    email: &str,
    phone: &str,
    password: &str,
    confirm_password: &str,
) -> Result<String, AuthError> {
    let email = require(email, "email")?.to_ascii_lowercase();
    let phone = require(phone, "phone")?;
    let password = require(password, "password")?;
    let confirm_password = require(confirm_password, "confirm_password")?;
    if password != confirm_password {
        return Err(AuthError::PasswordMismatch);
    }
    if state.accounts.read().await.contains_key(&email) {
        return Err(AuthError::EmailTaken);
    }

    let token = session::generate_token();
    let pending = PendingRegistration {
        email,
        phone: phone.to_owned(),
        password_hash: hash_password(password),
    };
    state
        .registrations
        .write()
        .await
        .insert(token.clone(), pending);
    Ok(token)
}

/// Step 2: identity. Consumes the step-1 token, creates an unverified
/// account, and logs it in. Field validation happens before the token
/// is consumed, so a rejected step 2 can be retried with the same token.
/// Email uniqueness is re-checked here: step 1 can hand out tokens for
/// the same email concurrently, and an existing account must never be
/// overwritten.
///
/// # Errors
///
/// `MissingField`, `UnknownRegistration`, or `EmailTaken`.
pub async fn register_step2(
    state: &AppState,
    registration_token: &str,
    name: &str,
    location: &str,
    government_id: &str,
    profession: Option<&str>,
) -> Result<(String, UserSession), AuthError> {
    let name = require(name, "name")?;
    let location = require(location, "location")?;
    // Presence-checked only; handed to the out-of-band verifier, never stored.
    let _government_id = require(government_id, "government_id")?;

    let pending = state
        .registrations
        .write()
        .await
        .remove(registration_token)
        .ok_or(AuthError::UnknownRegistration)?;

    let account = UserAccount {
        id: Uuid::new_v4(),
        email: pending.email.clone(),
        password_hash: pending.password_hash,
        name: name.to_owned(),
        location: location.to_owned(),
        profession: profession
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_owned),
        verified: false,
        role: Role::Reporter,
    };
    {
        // Check-and-insert under one lock so a racing registration for
        // the same email cannot replace an existing account.
        let mut accounts = state.accounts.write().await;
        if accounts.contains_key(&account.email) {
            return Err(AuthError::EmailTaken);
        }
        accounts.insert(account.email.clone(), account.clone());
    }
    tracing::info!(email = %account.email, "account registered, pending verification");

    Ok(session::create_session(state, &account).await)
}

#[cfg(test)]
#[path = "registration_test.rs"]
mod tests;
