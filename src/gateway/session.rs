use serde::{Deserialize, Serialize};

/// Authenticated session, passed explicitly to the gateway rather than
/// read from ambient storage.
///
/// Created at login, replaced by [`anonymous`](Self::anonymous) at logout
/// or expiry. The bearer token is attached to every request while
/// present.
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    token: Option<String>,
    username: Option<String>,
}

impl SessionContext {
    /// Session with no credentials (login itself runs unauthenticated).
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn authenticated(token: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            username: Some(username.into()),
        }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}

/// Login credentials.
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    #[serde(rename = "nomUtilisateur")]
    pub username: String,
    #[serde(rename = "motDePasse")]
    pub password: String,
}

/// Backend login response.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    #[serde(rename = "nomUtilisateur", default)]
    pub username: Option<String>,
}
