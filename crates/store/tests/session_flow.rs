//! Session state machine driven through scripted identity providers

use async_trait::async_trait;
use dataviz_config::{DevProviderConfig, InFlightPolicy};
use dataviz_shared::{Credentials, DashboardError, SessionPhase, SessionState, User};
use dataviz_store::{AuthError, DevIdentityProvider, IdentityProvider, SessionStore, SessionTransition};
use futures::future::join_all;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::Notify;

fn user(email: &str) -> User {
    User {
        id: format!("uid-{email}"),
        email: email.to_string(),
        display_name: email.to_string(),
        avatar_url: String::new(),
    }
}

/// Provider whose calls park until the test releases them, answering from a
/// queue of scripted outcomes
#[derive(Default)]
struct GatedProvider {
    sign_in_results: Mutex<VecDeque<Result<User, AuthError>>>,
    sign_out_result: Mutex<Option<AuthError>>,
    entered: Notify,
    release: Notify,
}

impl GatedProvider {
    fn answering(results: Vec<Result<User, AuthError>>) -> Arc<Self> {
        Arc::new(Self {
            sign_in_results: Mutex::new(results.into()),
            ..Self::default()
        })
    }

    async fn gate(&self) {
        self.entered.notify_one();
        self.release.notified().await;
    }
}

#[async_trait]
impl IdentityProvider for GatedProvider {
    async fn sign_in_with_password(&self, _email: &str, _password: &str) -> Result<User, AuthError> {
        let result = self
            .sign_in_results
            .lock()
            .pop_front()
            .unwrap_or_else(|| Err(AuthError::new("no scripted answer")));
        self.gate().await;
        result
    }

    async fn sign_in_with_popup(&self) -> Result<User, AuthError> {
        self.sign_in_with_password("", "").await
    }

    async fn create_account(&self, email: &str, password: &str) -> Result<User, AuthError> {
        self.sign_in_with_password(email, password).await
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        self.gate().await;
        match self.sign_out_result.lock().take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    async fn restore_session(&self) -> Result<Option<User>, AuthError> {
        Ok(None)
    }
}

fn drain(rx: &mut tokio::sync::broadcast::Receiver<SessionTransition>) -> Vec<SessionPhase> {
    let mut phases = Vec::new();
    while let Ok(transition) = rx.try_recv() {
        phases.push(transition.to);
    }
    phases
}

#[tokio::test]
async fn test_valid_sign_in_passes_through_loading() {
    let provider = GatedProvider::answering(vec![Ok(user("ana@example.com"))]);
    let store = SessionStore::new(provider.clone(), InFlightPolicy::Reject);
    let mut events = store.subscribe();

    assert_eq!(store.state(), SessionState::default());

    let task = tokio::spawn({
        let store = store.clone();
        async move { store.sign_in(Credentials::email_password("ana@example.com", "pw")).await }
    });

    provider.entered.notified().await;
    let pending = store.state();
    assert!(pending.loading);
    assert_eq!(pending.phase, SessionPhase::Authenticating);
    assert!(pending.user.is_none());

    provider.release.notify_one();
    let done = task.await.unwrap().unwrap();

    assert!(!done.loading);
    assert_eq!(done.user, Some(user("ana@example.com")));
    assert!(done.error.is_none());
    assert_eq!(done, store.state());
    assert_eq!(
        drain(&mut events),
        vec![SessionPhase::Authenticating, SessionPhase::Authenticated]
    );
}

#[tokio::test]
async fn test_invalid_sign_in_ends_anonymous_with_error() {
    let provider = DevIdentityProvider::new(&DevProviderConfig {
        latency_ms: 0,
        auto_login: false,
    });
    let store = SessionStore::new(Arc::new(provider), InFlightPolicy::Reject);

    let state = store
        .sign_in(Credentials::email_password(DevIdentityProvider::DEMO_EMAIL, "wrong"))
        .await
        .unwrap();

    assert!(!state.loading);
    assert!(state.user.is_none());
    assert_eq!(state.phase, SessionPhase::Anonymous);
    assert_eq!(state.error.as_deref(), Some("auth/wrong-password"));
}

#[tokio::test]
async fn test_next_sign_in_clears_previous_error() {
    let provider = GatedProvider::answering(vec![
        Err(AuthError::new("auth/network-request-failed")),
        Ok(user("ana@example.com")),
    ]);
    provider.release.notify_one();
    let store = SessionStore::new(provider.clone(), InFlightPolicy::Reject);

    let failed = store.sign_in(Credentials::Popup).await.unwrap();
    assert_eq!(failed.error.as_deref(), Some("auth/network-request-failed"));

    provider.release.notify_one();
    let ok = store.sign_in(Credentials::Popup).await.unwrap();
    assert!(ok.error.is_none());
    assert!(ok.is_authenticated());
}

#[tokio::test]
async fn test_reject_policy_refuses_concurrent_sign_in() {
    let provider = GatedProvider::answering(vec![Ok(user("first@example.com"))]);
    let store = SessionStore::new(provider.clone(), InFlightPolicy::Reject);

    let first = tokio::spawn({
        let store = store.clone();
        async move { store.sign_in(Credentials::Popup).await }
    });
    provider.entered.notified().await;

    let second = store.sign_in(Credentials::Popup).await;
    assert_eq!(second, Err(DashboardError::SessionInFlight));
    assert!(store.state().loading);

    provider.release.notify_one();
    let done = first.await.unwrap().unwrap();
    assert_eq!(done.user, Some(user("first@example.com")));
}

#[tokio::test]
async fn test_latest_wins_discards_stale_completion() {
    let provider = GatedProvider::answering(vec![
        Ok(user("stale@example.com")),
        Ok(user("fresh@example.com")),
    ]);
    let store = SessionStore::new(provider.clone(), InFlightPolicy::LatestWins);

    let first = tokio::spawn({
        let store = store.clone();
        async move { store.sign_in(Credentials::Popup).await }
    });
    provider.entered.notified().await;

    let second = tokio::spawn({
        let store = store.clone();
        async move { store.sign_in(Credentials::Popup).await }
    });
    provider.entered.notified().await;

    // Release the stale attempt first; it must not settle the session
    provider.release.notify_one();
    first.await.unwrap().unwrap();
    assert!(store.state().loading);
    assert_eq!(store.phase(), SessionPhase::Authenticating);

    provider.release.notify_one();
    let done = second.await.unwrap().unwrap();
    assert_eq!(done.user, Some(user("fresh@example.com")));
    assert!(!done.loading);
}

#[tokio::test]
async fn test_sign_out_clears_user_even_when_provider_fails() {
    let provider = GatedProvider::answering(vec![Ok(user("ana@example.com"))]);
    provider.release.notify_one();
    let store = SessionStore::new(provider.clone(), InFlightPolicy::Reject);
    store.sign_in(Credentials::Popup).await.unwrap();
    assert!(store.state().is_authenticated());
    // Swallow the entry signal left by the sign-in
    provider.entered.notified().await;

    *provider.sign_out_result.lock() = Some(AuthError::new(""));
    let task = tokio::spawn({
        let store = store.clone();
        async move { store.sign_out().await }
    });

    provider.entered.notified().await;
    assert!(store.state().loading);
    assert_eq!(store.phase(), SessionPhase::Authenticating);

    provider.release.notify_one();
    let state = task.await.unwrap().unwrap();
    assert!(state.user.is_none());
    assert!(!state.loading);
    assert_eq!(state.phase, SessionPhase::Anonymous);
    assert_eq!(state.error.as_deref(), Some("Failed to logout"));
}

#[tokio::test]
async fn test_restore_with_auto_login() {
    let _ = env_logger::builder().is_test(true).try_init();

    let provider = DevIdentityProvider::new(&DevProviderConfig {
        latency_ms: 0,
        auto_login: true,
    });
    let store = SessionStore::new(Arc::new(provider), InFlightPolicy::Reject);

    let state = store.restore().await.unwrap();
    assert_eq!(state.user, Some(DevIdentityProvider::demo_user()));
    assert_eq!(
        store.history(),
        vec![
            SessionPhase::Anonymous,
            SessionPhase::Authenticating,
            SessionPhase::Authenticated,
        ]
    );
}

fn slow_store(policy: InFlightPolicy) -> SessionStore {
    let provider = DevIdentityProvider::new(&DevProviderConfig {
        latency_ms: 500,
        auto_login: false,
    });
    SessionStore::new(Arc::new(provider), policy)
}

#[tokio::test(start_paused = true)]
async fn test_concurrent_sign_ins_under_reject() {
    let store = slow_store(InFlightPolicy::Reject);

    let results = join_all((0..3).map(|_| store.sign_in(Credentials::Popup))).await;

    let accepted = results.iter().filter(|r| r.is_ok()).count();
    let rejected = results
        .iter()
        .filter(|r| **r == Err(DashboardError::SessionInFlight))
        .count();
    assert_eq!((accepted, rejected), (1, 2));
    assert!(store.state().is_authenticated());
}

#[tokio::test(start_paused = true)]
async fn test_concurrent_sign_ins_under_latest_wins() {
    let store = slow_store(InFlightPolicy::LatestWins);

    let results = join_all((0..3).map(|_| store.sign_in(Credentials::Popup))).await;

    assert!(results.iter().all(|r| r.is_ok()));
    let state = store.state();
    assert!(!state.loading);
    assert_eq!(state.user, Some(DevIdentityProvider::demo_user()));
    // One Authenticating entry for the whole burst
    assert_eq!(
        store.history(),
        vec![
            SessionPhase::Anonymous,
            SessionPhase::Authenticating,
            SessionPhase::Authenticated,
        ]
    );
}

#[tokio::test]
async fn test_set_user_settles_in_flight_sign_in() {
    let provider = GatedProvider::answering(vec![
        Ok(user("first@example.com")),
        Ok(user("second@example.com")),
    ]);
    let store = SessionStore::new(provider.clone(), InFlightPolicy::Reject);

    let first = tokio::spawn({
        let store = store.clone();
        async move { store.sign_in(Credentials::Popup).await }
    });
    provider.entered.notified().await;

    store.set_user(Some(user("restored@example.com")));
    let settled = store.state();
    assert_eq!(settled.phase, SessionPhase::Authenticated);
    assert!(!settled.loading);
    assert_eq!(settled.user, Some(user("restored@example.com")));

    // The superseded sign-in must not overwrite the assigned user
    provider.release.notify_one();
    first.await.unwrap().unwrap();
    assert_eq!(store.user(), Some(user("restored@example.com")));
    assert!(!store.state().loading);
    assert_eq!(
        store.history(),
        vec![
            SessionPhase::Anonymous,
            SessionPhase::Authenticating,
            SessionPhase::Authenticated,
        ]
    );

    // Nothing is in flight any more, so a fresh sign-in runs to completion
    provider.release.notify_one();
    let second = store.sign_in(Credentials::Popup).await.unwrap();
    assert_eq!(second.user, Some(user("second@example.com")));
    assert_eq!(second.phase, SessionPhase::Authenticated);
}

#[tokio::test]
async fn test_reject_still_guards_after_set_user_while_idle() {
    let provider = GatedProvider::answering(vec![Ok(user("ana@example.com"))]);
    let store = SessionStore::new(provider.clone(), InFlightPolicy::Reject);
    store.set_user(Some(user("restored@example.com")));

    let first = tokio::spawn({
        let store = store.clone();
        async move { store.sign_in(Credentials::Popup).await }
    });
    provider.entered.notified().await;

    assert_eq!(
        store.sign_in(Credentials::Popup).await,
        Err(DashboardError::SessionInFlight)
    );

    provider.release.notify_one();
    let done = first.await.unwrap().unwrap();
    assert_eq!(done.user, Some(user("ana@example.com")));
}
