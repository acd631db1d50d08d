//! The logged-in user's identity as the UI sees it.

use shared::AuthResponse;

/// Authentication lifecycle.
///
/// `Anonymous -> Authenticating -> Authenticated -> Anonymous` (logout).
/// A failed attempt falls back to the state it started from, so a failed
/// re-login keeps the current session. There is no refresh or expiry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthState {
    #[default]
    Anonymous,
    Authenticating,
    Authenticated,
}

/// Session fields, all empty while anonymous
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Session {
    pub user_id: Option<i64>,
    pub name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub token: String,
    pub is_logged_in: bool,
}

impl Session {
    pub fn from_auth(auth: AuthResponse) -> Self {
        Self {
            user_id: auth.id,
            name: auth.name,
            last_name: auth.last_name,
            email: auth.email,
            phone: auth.phone,
            token: auth.token,
            is_logged_in: true,
        }
    }

    /// "Juan Pérez"
    pub fn display_name(&self) -> String {
        format!("{} {}", self.name, self.last_name).trim().to_string()
    }
}
