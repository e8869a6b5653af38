//! Session store: who is signed in, driven by an identity provider
//!
//! Phases move `Anonymous → Authenticating → Authenticated` on sign-in,
//! `Authenticated → Authenticating → Anonymous` on sign-out, and back to
//! `Anonymous` when authentication fails. Each async operation suspends once
//! on the provider and then issues exactly one terminal transition.

use crate::identity::{AuthError, IdentityProvider};
use dataviz_config::InFlightPolicy;
use dataviz_shared::{Credentials, DashboardError, DashboardResult, SessionPhase, SessionState, User};
use parking_lot::RwLock;
use std::sync::Arc;
use tokio::sync::broadcast;

const EVENT_CAPACITY: usize = 64;

/// Phase change broadcast to subscribers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionTransition {
    pub from: SessionPhase,
    pub to: SessionPhase,
}

#[derive(Debug, Clone, Copy)]
enum Operation {
    EmailSignIn,
    PopupSignIn,
    Register,
    SignOut,
    Restore,
}

impl Operation {
    /// Message used when the provider fails without saying why
    fn fallback_message(self) -> &'static str {
        match self {
            Operation::EmailSignIn => "Failed to login with email",
            Operation::PopupSignIn => "Failed to login with Google",
            Operation::Register => "Failed to register user",
            Operation::SignOut => "Failed to logout",
            Operation::Restore => "Failed to restore session",
        }
    }

    fn error_message(self, err: &AuthError) -> String {
        if err.message.is_empty() {
            self.fallback_message().to_string()
        } else {
            err.message.clone()
        }
    }
}

struct SessionInner {
    state: SessionState,
    /// Id of the newest authentication attempt
    attempt: u64,
    history: Vec<SessionPhase>,
}

/// Shared handle to the session state
///
/// Clones share the same state. The lock is never held across a provider
/// call.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<RwLock<SessionInner>>,
    provider: Arc<dyn IdentityProvider>,
    policy: InFlightPolicy,
    events: broadcast::Sender<SessionTransition>,
}

impl SessionStore {
    pub fn new(provider: Arc<dyn IdentityProvider>, policy: InFlightPolicy) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);

        Self {
            inner: Arc::new(RwLock::new(SessionInner {
                state: SessionState::default(),
                attempt: 0,
                history: vec![SessionPhase::Anonymous],
            })),
            provider,
            policy,
            events,
        }
    }

    /// Snapshot of the current session
    pub fn state(&self) -> SessionState {
        self.inner.read().state.clone()
    }

    pub fn phase(&self) -> SessionPhase {
        self.inner.read().state.phase
    }

    pub fn user(&self) -> Option<User> {
        self.inner.read().state.user.clone()
    }

    /// Phases entered so far, oldest first
    pub fn history(&self) -> Vec<SessionPhase> {
        self.inner.read().history.clone()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionTransition> {
        self.events.subscribe()
    }

    /// Sign in with the given credentials
    ///
    /// Provider failures end up in `SessionState::error`, not in the returned
    /// result; `Err` means the attempt never started.
    pub async fn sign_in(&self, credentials: Credentials) -> DashboardResult<SessionState> {
        match credentials {
            Credentials::EmailPassword { email, password } => {
                let attempt = self.begin(Operation::EmailSignIn, true)?;
                let outcome = self.provider.sign_in_with_password(&email, &password).await;
                Ok(self.settle_user(attempt, Operation::EmailSignIn, outcome))
            }
            Credentials::Popup => {
                let attempt = self.begin(Operation::PopupSignIn, true)?;
                let outcome = self.provider.sign_in_with_popup().await;
                Ok(self.settle_user(attempt, Operation::PopupSignIn, outcome))
            }
        }
    }

    /// Create an account and sign in as it
    pub async fn register(&self, email: &str, password: &str) -> DashboardResult<SessionState> {
        let attempt = self.begin(Operation::Register, true)?;
        let outcome = self.provider.create_account(email, password).await;
        Ok(self.settle_user(attempt, Operation::Register, outcome))
    }

    /// Sign out. The local session is cleared even when the provider call
    /// fails; the failure is kept in `error`.
    pub async fn sign_out(&self) -> DashboardResult<SessionState> {
        let attempt = self.begin(Operation::SignOut, false)?;
        let outcome = self.provider.sign_out().await;

        let mut inner = self.inner.write();
        if attempt != inner.attempt {
            log::debug!("[SessionStore] Discarding superseded sign-out #{}", attempt);
            return Ok(inner.state.clone());
        }

        inner.state.loading = false;
        inner.state.user = None;
        match outcome {
            Ok(()) => log::info!("[SessionStore] Signed out"),
            Err(err) => {
                log::warn!("[SessionStore] Sign-out failed upstream, cleared locally: {}", err);
                inner.state.error = Some(Operation::SignOut.error_message(&err));
            }
        }
        self.transition(&mut inner, SessionPhase::Anonymous);
        Ok(inner.state.clone())
    }

    /// Restore a session left over from an earlier run
    pub async fn restore(&self) -> DashboardResult<SessionState> {
        let attempt = self.begin(Operation::Restore, true)?;
        let outcome = self.provider.restore_session().await;

        let mut inner = self.inner.write();
        if attempt != inner.attempt {
            log::debug!("[SessionStore] Discarding superseded restore #{}", attempt);
            return Ok(inner.state.clone());
        }

        inner.state.loading = false;
        match outcome {
            Ok(Some(user)) => {
                log::info!("[SessionStore] Restored session for {}", user.email);
                inner.state.user = Some(user);
                self.transition(&mut inner, SessionPhase::Authenticated);
            }
            Ok(None) => {
                inner.state.user = None;
                self.transition(&mut inner, SessionPhase::Anonymous);
            }
            Err(err) => {
                log::warn!("[SessionStore] Session restore failed: {}", err);
                inner.state.user = None;
                inner.state.error = Some(Operation::Restore.error_message(&err));
                self.transition(&mut inner, SessionPhase::Anonymous);
            }
        }
        Ok(inner.state.clone())
    }

    /// Assign the user directly, e.g. from a token validated out of band
    ///
    /// Settles the session: an attempt still in flight is superseded and its
    /// completion discarded.
    pub fn set_user(&self, user: Option<User>) {
        let mut inner = self.inner.write();
        if inner.state.loading {
            log::debug!(
                "[SessionStore] set_user supersedes in-flight attempt #{}",
                inner.attempt
            );
        }
        inner.attempt += 1;
        inner.state.loading = false;

        let phase = if user.is_some() {
            SessionPhase::Authenticated
        } else {
            SessionPhase::Anonymous
        };
        inner.state.user = user;
        self.transition(&mut inner, phase);
    }

    pub fn clear_error(&self) {
        self.inner.write().state.error = None;
    }

    /// Enter `Authenticating` and hand out the attempt id
    fn begin(&self, operation: Operation, clear_error: bool) -> DashboardResult<u64> {
        let mut inner = self.inner.write();

        if inner.state.phase == SessionPhase::Authenticating && self.policy == InFlightPolicy::Reject {
            log::warn!("[SessionStore] Rejected {:?}: another request is in flight", operation);
            return Err(DashboardError::SessionInFlight);
        }

        inner.attempt += 1;
        inner.state.loading = true;
        if clear_error {
            inner.state.error = None;
        }
        self.transition(&mut inner, SessionPhase::Authenticating);

        log::debug!("[SessionStore] {:?} started as attempt #{}", operation, inner.attempt);
        Ok(inner.attempt)
    }

    /// Apply the outcome of a sign-in style call
    fn settle_user(
        &self,
        attempt: u64,
        operation: Operation,
        outcome: Result<User, AuthError>,
    ) -> SessionState {
        let mut inner = self.inner.write();
        if attempt != inner.attempt {
            log::debug!(
                "[SessionStore] Discarding superseded {:?} #{}",
                operation,
                attempt
            );
            return inner.state.clone();
        }

        inner.state.loading = false;
        match outcome {
            Ok(user) => {
                log::info!("[SessionStore] Signed in as {}", user.email);
                inner.state.user = Some(user);
                inner.state.error = None;
                self.transition(&mut inner, SessionPhase::Authenticated);
            }
            Err(err) => {
                log::warn!("[SessionStore] {:?} failed: {}", operation, err);
                inner.state.user = None;
                inner.state.error = Some(operation.error_message(&err));
                self.transition(&mut inner, SessionPhase::Anonymous);
            }
        }
        inner.state.clone()
    }

    fn transition(&self, inner: &mut SessionInner, to: SessionPhase) {
        let from = inner.state.phase;
        debug_assert!(
            from.can_transition_to(to) || from == to,
            "invalid session transition {from:?} -> {to:?}"
        );

        inner.state.phase = to;
        if from == to {
            return;
        }

        inner.history.push(to);
        log::info!("[SessionStore] {:?} -> {:?}", from, to);
        // No subscribers is fine
        let _ = self.events.send(SessionTransition { from, to });
    }
}
