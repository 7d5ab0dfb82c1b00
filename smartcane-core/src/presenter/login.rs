//! Login screen controller.

use std::sync::Arc;

use log::{info, warn};
use tokio::sync::watch;
use zeroize::Zeroizing;

use super::{EventSink, Route, UiEvents};
use crate::auth::{Credentials, IdentityProvider, Session};

/// Snapshot of the login screen for rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginViewState {
    /// Current content of the email field.
    pub email: String,
    /// Whether the password field has content. The password itself is
    /// never published.
    pub has_password: bool,
    /// Whether a provider request is in flight.
    pub busy: bool,
}

/// Controller for the login screen: login, sign-up, and password reset.
pub struct LoginPresenter {
    identity: Arc<dyn IdentityProvider>,
    email: String,
    password: Zeroizing<String>,
    busy: bool,
    state: watch::Sender<LoginViewState>,
    events: EventSink,
}

impl LoginPresenter {
    /// Creates a presenter and the receiver for its UI events.
    #[must_use]
    pub fn new(identity: Arc<dyn IdentityProvider>) -> (Self, UiEvents) {
        let (state, _) = watch::channel(LoginViewState::default());
        let (events, rx) = EventSink::channel();
        let presenter = Self {
            identity,
            email: String::new(),
            password: Zeroizing::new(String::new()),
            busy: false,
            state,
            events,
        };
        (presenter, rx)
    }

    /// Returns a receiver that observes every view-state change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<LoginViewState> {
        self.state.subscribe()
    }

    /// Returns the current view state.
    #[must_use]
    pub fn view_state(&self) -> LoginViewState {
        self.state.borrow().clone()
    }

    /// Replaces the content of the email field.
    pub fn set_email(&mut self, email: impl Into<String>) {
        self.email = email.into();
        self.publish();
    }

    /// Replaces the content of the password field.
    pub fn set_password(&mut self, password: impl Into<String>) {
        self.password = Zeroizing::new(password.into());
        self.publish();
    }

    /// Signs in with the entered credentials.
    ///
    /// On success shows a welcome notice and navigates to the home screen.
    pub async fn login(&mut self) -> Option<Session> {
        let credentials = self.credentials()?;
        let identity = Arc::clone(&self.identity);
        let result = {
            let _busy = BusyGuard::enter(self);
            identity.sign_in(&credentials).await
        };

        match result {
            Ok(session) => {
                info!("Logged in as {}", session.email);
                self.events
                    .notice("Login Success", format!("Welcome back, {}", session.email));
                self.events.navigate(Route::Home);
                Some(session)
            }
            Err(err) => {
                warn!("Login error: {err}");
                self.events.notice("Login Failed", err.message());
                None
            }
        }
    }

    /// Registers a new account with the entered credentials.
    ///
    /// On success shows a confirmation notice and navigates to the home
    /// screen.
    pub async fn sign_up(&mut self) -> Option<Session> {
        let credentials = self.credentials()?;
        let identity = Arc::clone(&self.identity);
        let result = {
            let _busy = BusyGuard::enter(self);
            identity.sign_up(&credentials).await
        };

        match result {
            Ok(session) => {
                info!("Registered as {}", session.email);
                self.events.notice(
                    "Registration Success",
                    format!("Account created for {}", session.email),
                );
                self.events.navigate(Route::Home);
                Some(session)
            }
            Err(err) => {
                warn!("Signup error: {err}");
                self.events.notice("Signup Failed", err.message());
                None
            }
        }
    }

    /// Sends a password reset email to the entered address.
    ///
    /// Returns whether the provider accepted the request.
    pub async fn forgot_password(&mut self) -> bool {
        if self.email.is_empty() {
            self.events
                .notice("Enter Email", "Please enter your email address first.");
            return false;
        }

        let identity = Arc::clone(&self.identity);
        let email = self.email.clone();
        let result = {
            let _busy = BusyGuard::enter(self);
            identity.send_password_reset(&email).await
        };

        match result {
            Ok(()) => {
                info!("Password reset email requested");
                self.events
                    .notice("Password Reset Email Sent", "Check your inbox.");
                true
            }
            Err(err) => {
                warn!("Password reset error: {err}");
                self.events.notice("Error", err.message());
                false
            }
        }
    }

    fn credentials(&self) -> Option<Credentials> {
        let credentials = Credentials::new(self.email.as_str(), self.password.as_str());
        if credentials.is_complete() {
            Some(credentials)
        } else {
            self.events
                .notice("Missing Fields", "Please enter both email and password.");
            None
        }
    }

    fn set_busy(&mut self, busy: bool) {
        self.busy = busy;
        self.publish();
    }

    fn publish(&self) {
        self.state.send_replace(LoginViewState {
            email: self.email.clone(),
            has_password: !self.password.is_empty(),
            busy: self.busy,
        });
    }
}

/// Keeps the presenter marked busy until dropped, including when the
/// request future is cancelled mid-await.
struct BusyGuard<'a>(&'a mut LoginPresenter);

impl<'a> BusyGuard<'a> {
    fn enter(presenter: &'a mut LoginPresenter) -> Self {
        presenter.set_busy(true);
        Self(presenter)
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.set_busy(false);
    }
}

impl std::fmt::Debug for LoginPresenter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginPresenter")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("busy", &self.busy)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{AuthError, AuthResult};
    use crate::presenter::{Notice, UiEvent};
    use crate::testing::{AuthCall, ScriptedIdentityProvider};

    fn presenter() -> (LoginPresenter, UiEvents, Arc<ScriptedIdentityProvider>) {
        let identity = Arc::new(ScriptedIdentityProvider::new());
        let provider: Arc<dyn IdentityProvider> = identity.clone();
        let (presenter, events) = LoginPresenter::new(provider);
        (presenter, events, identity)
    }

    fn next_notice(events: &mut UiEvents) -> Notice {
        match events.try_recv().unwrap() {
            UiEvent::Notice(notice) => notice,
            other => panic!("expected notice, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn login_without_password_shows_missing_fields() {
        let (mut presenter, mut events, identity) = presenter();
        presenter.set_email("user@example.com");

        assert!(presenter.login().await.is_none());

        let notice = next_notice(&mut events);
        assert_eq!(notice.title, "Missing Fields");
        assert_eq!(notice.message, "Please enter both email and password.");
        assert!(identity.calls().is_empty());
    }

    #[tokio::test]
    async fn login_success_welcomes_and_navigates_home() {
        let (mut presenter, mut events, identity) = presenter();
        presenter.set_email("user@example.com");
        presenter.set_password("pw");

        let session = presenter.login().await.unwrap();

        assert_eq!(session.email, "user@example.com");
        assert_eq!(
            next_notice(&mut events),
            Notice::new("Login Success", "Welcome back, user@example.com")
        );
        assert_eq!(events.try_recv().unwrap(), UiEvent::Navigate(Route::Home));
        assert_eq!(
            identity.calls(),
            vec![AuthCall::SignIn("user@example.com".to_string())]
        );
        assert!(!presenter.view_state().busy);
    }

    #[tokio::test]
    async fn login_failure_surfaces_provider_message() {
        let (mut presenter, mut events, identity) = presenter();
        identity.fail_next(AuthError::new("auth/wrong-password"));
        presenter.set_email("user@example.com");
        presenter.set_password("bad");

        assert!(presenter.login().await.is_none());

        assert_eq!(
            next_notice(&mut events),
            Notice::new("Login Failed", "auth/wrong-password")
        );
        assert!(events.try_recv().is_err());
    }

    #[tokio::test]
    async fn sign_up_success_confirms_and_navigates_home() {
        let (mut presenter, mut events, _identity) = presenter();
        presenter.set_email("new@example.com");
        presenter.set_password("pw");

        assert!(presenter.sign_up().await.is_some());

        assert_eq!(
            next_notice(&mut events),
            Notice::new("Registration Success", "Account created for new@example.com")
        );
        assert_eq!(events.try_recv().unwrap(), UiEvent::Navigate(Route::Home));
    }

    #[tokio::test]
    async fn sign_up_failure_surfaces_provider_message() {
        let (mut presenter, mut events, identity) = presenter();
        identity.fail_next(AuthError::new("auth/email-already-in-use"));
        presenter.set_email("new@example.com");
        presenter.set_password("pw");

        assert!(presenter.sign_up().await.is_none());
        assert_eq!(
            next_notice(&mut events),
            Notice::new("Signup Failed", "auth/email-already-in-use")
        );
    }

    #[tokio::test]
    async fn forgot_password_requires_email() {
        let (mut presenter, mut events, identity) = presenter();

        assert!(!presenter.forgot_password().await);
        assert_eq!(
            next_notice(&mut events),
            Notice::new("Enter Email", "Please enter your email address first.")
        );
        assert!(identity.calls().is_empty());
    }

    #[tokio::test]
    async fn forgot_password_success_and_failure() {
        let (mut presenter, mut events, identity) = presenter();
        presenter.set_email("user@example.com");

        assert!(presenter.forgot_password().await);
        assert_eq!(
            next_notice(&mut events),
            Notice::new("Password Reset Email Sent", "Check your inbox.")
        );

        identity.fail_next(AuthError::new("auth/user-not-found"));
        assert!(!presenter.forgot_password().await);
        assert_eq!(
            next_notice(&mut events),
            Notice::new("Error", "auth/user-not-found")
        );
    }

    /// Provider whose sign-in never completes.
    struct StalledIdentity;

    #[async_trait::async_trait]
    impl IdentityProvider for StalledIdentity {
        async fn sign_in(&self, _credentials: &Credentials) -> AuthResult<Session> {
            std::future::pending().await
        }

        async fn sign_up(&self, _credentials: &Credentials) -> AuthResult<Session> {
            std::future::pending().await
        }

        async fn send_password_reset(&self, _email: &str) -> AuthResult<()> {
            std::future::pending().await
        }

        async fn sign_out(&self) -> AuthResult<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn cancelled_login_clears_busy() {
        let (mut presenter, _events) = LoginPresenter::new(Arc::new(StalledIdentity));
        let rx = presenter.subscribe();
        presenter.set_email("user@example.com");
        presenter.set_password("pw");

        let cancelled =
            tokio::time::timeout(std::time::Duration::from_millis(20), presenter.login()).await;

        assert!(cancelled.is_err());
        assert!(!rx.borrow().busy);
        assert!(!presenter.view_state().busy);
    }

    #[tokio::test]
    async fn busy_is_published_while_request_in_flight() {
        let (mut presenter, _events) = LoginPresenter::new(Arc::new(StalledIdentity));
        let mut rx = presenter.subscribe();
        presenter.set_email("user@example.com");
        let _ = rx.borrow_and_update();

        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(20),
            presenter.forgot_password(),
        )
        .await;

        // Both transitions were published; the final value is idle again.
        assert!(rx.has_changed().unwrap());
        assert!(!rx.borrow_and_update().busy);
    }

    #[test]
    fn view_state_never_exposes_password() {
        let (mut presenter, _events, _identity) = presenter();
        let rx = presenter.subscribe();
        presenter.set_password("topsecret");

        let state = rx.borrow().clone();
        assert!(state.has_password);
        assert!(!format!("{state:?}").contains("topsecret"));
        assert!(!format!("{presenter:?}").contains("topsecret"));
    }
}
