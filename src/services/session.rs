//! Session registry.
//!
//! Sessions are random hex tokens mapped to a snapshot of the user at
//! login time. They live in memory only: restarting the process logs
//! everyone out. Logout is unconditional — deleting an unknown token is
//! a no-op, never an error.

use std::fmt::Write;

use rand::Rng;

use crate::state::{AppState, UserAccount, UserSession};

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

/// Open a session for an account, returning the token and the session
/// view handed back to the client.
pub async fn create_session(state: &AppState, account: &UserAccount) -> (String, UserSession) {
    let token = generate_token();
    let session = UserSession {
        user_id: account.id,
        email: account.email.clone(),
        name: account.name.clone(),
        verified: account.verified,
        location: account.location.clone(),
    };
    state
        .sessions
        .write()
        .await
        .insert(token.clone(), session.clone());
    (token, session)
}

/// Resolve a token to its session, if one is live.
pub async fn validate_session(state: &AppState, token: &str) -> Option<UserSession> {
    state.sessions.read().await.get(token).cloned()
}

/// Delete a session by token.
pub async fn delete_session(state: &AppState, token: &str) {
    state.sessions.write().await.remove(token);
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
