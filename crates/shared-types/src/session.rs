//! Authenticated identity types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of the signed-in user as reported by the identity provider
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub display_name: String,
    pub avatar_url: String,
}

/// How a user asks to authenticate
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    EmailPassword { email: String, password: String },
    /// Federated sign-in through a provider popup
    Popup,
}

impl Credentials {
    pub fn email_password(email: impl Into<String>, password: impl Into<String>) -> Self {
        Credentials::EmailPassword {
            email: email.into(),
            password: password.into(),
        }
    }
}

// Keep passwords out of logs.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Credentials::EmailPassword { email, .. } => f
                .debug_struct("EmailPassword")
                .field("email", email)
                .field("password", &"***")
                .finish(),
            Credentials::Popup => f.write_str("Popup"),
        }
    }
}

/// Position in the session state machine
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum SessionPhase {
    Anonymous,
    Authenticating,
    Authenticated,
}

impl SessionPhase {
    /// Whether the session may move from `self` to `to`
    pub fn can_transition_to(self, to: SessionPhase) -> bool {
        use SessionPhase::*;

        matches!(
            (self, to),
            (Anonymous, Authenticating)
                | (Authenticated, Authenticating)
                | (Authenticating, Authenticated)
                | (Authenticating, Anonymous)
                // Out-of-band assignment of a restored or dropped user
                | (Anonymous, Authenticated)
                | (Authenticated, Anonymous)
                | (Authenticated, Authenticated)
                | (Anonymous, Anonymous)
        )
    }
}
