//! Identity provider seam and the in-memory development provider

use async_trait::async_trait;
use dataviz_config::DevProviderConfig;
use dataviz_shared::User;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;

/// Failure reported by an identity provider. The message is shown to the
/// user as-is.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct AuthError {
    pub message: String,
}

impl AuthError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// External identity service the session store delegates to
///
/// Timeouts and retries belong to the implementation; the session store
/// issues each call exactly once.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<User, AuthError>;

    /// Federated sign-in through a popup window
    async fn sign_in_with_popup(&self) -> Result<User, AuthError>;

    async fn create_account(&self, email: &str, password: &str) -> Result<User, AuthError>;

    async fn sign_out(&self) -> Result<(), AuthError>;

    /// First session-change notification after startup: the user a
    /// previously issued token still identifies, if any
    async fn restore_session(&self) -> Result<Option<User>, AuthError>;
}

#[derive(Debug, Clone)]
struct DevAccount {
    password: String,
    user: User,
}

/// In-memory provider for development and demos
///
/// Accounts live in a map keyed by email. Popup sign-in always yields the
/// demo user. Every call waits `latency` before answering.
pub struct DevIdentityProvider {
    accounts: RwLock<HashMap<String, DevAccount>>,
    current: RwLock<Option<User>>,
    latency: Duration,
    auto_login: bool,
}

impl DevIdentityProvider {
    pub const DEMO_EMAIL: &'static str = "demo@example.com";
    pub const DEMO_PASSWORD: &'static str = "demo-password";
    const MIN_PASSWORD_LEN: usize = 6;

    pub fn new(config: &DevProviderConfig) -> Self {
        let provider = Self {
            accounts: RwLock::new(HashMap::new()),
            current: RwLock::new(None),
            latency: Duration::from_millis(config.latency_ms),
            auto_login: config.auto_login,
        };
        provider.accounts.write().insert(
            Self::DEMO_EMAIL.to_string(),
            DevAccount {
                password: Self::DEMO_PASSWORD.to_string(),
                user: Self::demo_user(),
            },
        );
        provider
    }

    pub fn demo_user() -> User {
        User {
            id: "mock-user-id".to_string(),
            email: Self::DEMO_EMAIL.to_string(),
            display_name: "Demo User".to_string(),
            avatar_url: String::new(),
        }
    }

    /// Register an extra account up front
    pub fn with_account(self, email: &str, password: &str, display_name: &str) -> Self {
        let user = User {
            id: uuid::Uuid::new_v4().to_string(),
            email: email.to_string(),
            display_name: display_name.to_string(),
            avatar_url: String::new(),
        };
        self.accounts.write().insert(
            email.to_string(),
            DevAccount {
                password: password.to_string(),
                user,
            },
        );
        self
    }

    /// User the provider currently considers signed in
    pub fn current_user(&self) -> Option<User> {
        self.current.read().clone()
    }

    async fn round_trip(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }

    fn establish(&self, user: User) -> User {
        *self.current.write() = Some(user.clone());
        user
    }
}

#[async_trait]
impl IdentityProvider for DevIdentityProvider {
    async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<User, AuthError> {
        self.round_trip().await;

        let account = self.accounts.read().get(email).cloned();
        match account {
            None => Err(AuthError::new("auth/user-not-found")),
            Some(account) if account.password != password => {
                Err(AuthError::new("auth/wrong-password"))
            }
            Some(account) => Ok(self.establish(account.user)),
        }
    }

    async fn sign_in_with_popup(&self) -> Result<User, AuthError> {
        self.round_trip().await;
        Ok(self.establish(Self::demo_user()))
    }

    async fn create_account(&self, email: &str, password: &str) -> Result<User, AuthError> {
        self.round_trip().await;

        if email.is_empty() || !email.contains('@') {
            return Err(AuthError::new("auth/invalid-email"));
        }
        if password.chars().count() < Self::MIN_PASSWORD_LEN {
            return Err(AuthError::new("auth/weak-password"));
        }

        let user = {
            let mut accounts = self.accounts.write();
            if accounts.contains_key(email) {
                return Err(AuthError::new("auth/email-already-in-use"));
            }

            let user = User {
                id: uuid::Uuid::new_v4().to_string(),
                email: email.to_string(),
                display_name: String::new(),
                avatar_url: String::new(),
            };
            accounts.insert(
                email.to_string(),
                DevAccount {
                    password: password.to_string(),
                    user: user.clone(),
                },
            );
            user
        };

        Ok(self.establish(user))
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        self.round_trip().await;
        *self.current.write() = None;
        Ok(())
    }

    async fn restore_session(&self) -> Result<Option<User>, AuthError> {
        self.round_trip().await;

        if self.auto_login {
            return Ok(Some(self.establish(Self::demo_user())));
        }
        Ok(self.current_user())
    }
}
