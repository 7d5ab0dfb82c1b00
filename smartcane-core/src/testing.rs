//! Scripted collaborators for tests.
//!
//! # Warning
//!
//! These fakes accept any credentials and report positions and detections
//! fed by the test. They are only compiled for tests or with the `test-utils`
//! feature. DO NOT use them in production.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use tokio::sync::mpsc::UnboundedSender;

use crate::auth::{AuthError, AuthResult, Credentials, IdentityProvider, Session};
use crate::guidance::{
    Detection, Direction, GuidanceError, GuidanceLink, GuidanceResult, ObstacleDetector,
};
use crate::location::{
    LocationError, LocationResult, LocationSample, PermissionState, PositionSubscription,
    PositioningService, WatchConfig,
};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// A call recorded by [`ScriptedIdentityProvider`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthCall {
    /// `sign_in` with this email.
    SignIn(String),
    /// `sign_up` with this email.
    SignUp(String),
    /// `send_password_reset` with this email.
    PasswordReset(String),
    /// `sign_out`.
    SignOut,
}

/// Identity provider that succeeds unless a failure has been queued.
#[derive(Debug, Default)]
pub struct ScriptedIdentityProvider {
    failures: Mutex<VecDeque<AuthError>>,
    calls: Mutex<Vec<AuthCall>>,
}

impl ScriptedIdentityProvider {
    /// Creates a provider that accepts every request.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the next request fail with `error`.
    pub fn fail_next(&self, error: AuthError) {
        lock(&self.failures).push_back(error);
    }

    /// Returns every call received so far, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<AuthCall> {
        lock(&self.calls).clone()
    }

    fn record(&self, call: AuthCall) -> AuthResult<()> {
        lock(&self.calls).push(call);
        lock(&self.failures).pop_front().map_or(Ok(()), Err)
    }
}

#[async_trait]
impl IdentityProvider for ScriptedIdentityProvider {
    async fn sign_in(&self, credentials: &Credentials) -> AuthResult<Session> {
        self.record(AuthCall::SignIn(credentials.email().to_string()))?;
        Ok(Session::new(
            format!("uid-{}", credentials.email()),
            credentials.email(),
        ))
    }

    async fn sign_up(&self, credentials: &Credentials) -> AuthResult<Session> {
        self.record(AuthCall::SignUp(credentials.email().to_string()))?;
        Ok(Session::new(
            format!("uid-{}", credentials.email()),
            credentials.email(),
        ))
    }

    async fn send_password_reset(&self, email: &str) -> AuthResult<()> {
        self.record(AuthCall::PasswordReset(email.to_string()))
    }

    async fn sign_out(&self) -> AuthResult<()> {
        self.record(AuthCall::SignOut)
    }
}

/// Positioning service whose permission answer and fixes are scripted.
///
/// Updates pushed with [`push`](Self::push) are delivered through the
/// subscription opened by `watch_position`, like platform callbacks.
#[derive(Debug)]
pub struct ScriptedPositioningService {
    permission: PermissionState,
    initial: Mutex<LocationResult<LocationSample>>,
    watch_error: Mutex<Option<LocationError>>,
    watch_configs: Mutex<Vec<WatchConfig>>,
    sender: Mutex<Option<UnboundedSender<LocationSample>>>,
    releases: Arc<AtomicUsize>,
    permission_requests: AtomicUsize,
}

impl ScriptedPositioningService {
    /// Creates a service answering permission requests with `permission`
    /// and an initial fix in San Francisco.
    #[must_use]
    pub fn new(permission: PermissionState) -> Self {
        Self {
            permission,
            initial: Mutex::new(Ok(LocationSample::new(37.7749, -122.4194))),
            watch_error: Mutex::new(None),
            watch_configs: Mutex::new(Vec::new()),
            sender: Mutex::new(None),
            releases: Arc::new(AtomicUsize::new(0)),
            permission_requests: AtomicUsize::new(0),
        }
    }

    /// Sets the result of `current_position`.
    #[must_use]
    pub fn with_initial(self, initial: LocationResult<LocationSample>) -> Self {
        *lock(&self.initial) = initial;
        self
    }

    /// Makes `watch_position` fail with `error`.
    #[must_use]
    pub fn with_watch_error(self, error: LocationError) -> Self {
        *lock(&self.watch_error) = Some(error);
        self
    }

    /// Delivers a position callback. Returns `false` if no subscription is
    /// open or it has been released.
    pub fn push(&self, sample: LocationSample) -> bool {
        lock(&self.sender)
            .as_ref()
            .is_some_and(|tx| tx.send(sample).is_ok())
    }

    /// Returns how many times a subscription handle was released.
    #[must_use]
    pub fn release_count(&self) -> usize {
        self.releases.load(Ordering::SeqCst)
    }

    /// Returns how many times permission was requested.
    #[must_use]
    pub fn permission_requests(&self) -> usize {
        self.permission_requests.load(Ordering::SeqCst)
    }

    /// Returns the parameters of every `watch_position` call.
    #[must_use]
    pub fn watch_configs(&self) -> Vec<WatchConfig> {
        lock(&self.watch_configs).clone()
    }
}

#[async_trait]
impl PositioningService for ScriptedPositioningService {
    async fn request_foreground_permission(&self) -> LocationResult<PermissionState> {
        self.permission_requests.fetch_add(1, Ordering::SeqCst);
        Ok(self.permission)
    }

    async fn current_position(&self) -> LocationResult<LocationSample> {
        lock(&self.initial).clone()
    }

    async fn watch_position(&self, config: WatchConfig) -> LocationResult<PositionSubscription> {
        lock(&self.watch_configs).push(config);
        if let Some(err) = lock(&self.watch_error).clone() {
            return Err(err);
        }

        let releases = Arc::clone(&self.releases);
        let (tx, subscription) = PositionSubscription::channel(move || {
            releases.fetch_add(1, Ordering::SeqCst);
        });
        *lock(&self.sender) = Some(tx);
        Ok(subscription)
    }
}

/// Detector that replays queued frames, then reports the end of the
/// stream.
#[derive(Debug, Default)]
pub struct ScriptedDetector {
    frames: Mutex<VecDeque<GuidanceResult<Vec<Detection>>>>,
}

impl ScriptedDetector {
    /// Creates a detector with no frames.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a frame with these detections.
    pub fn push_frame(&self, detections: Vec<Detection>) {
        lock(&self.frames).push_back(Ok(detections));
    }

    /// Queues a detector failure.
    pub fn push_error(&self, error: GuidanceError) {
        lock(&self.frames).push_back(Err(error));
    }
}

#[async_trait]
impl ObstacleDetector for ScriptedDetector {
    async fn next_frame(&self) -> GuidanceResult<Option<Vec<Detection>>> {
        lock(&self.frames).pop_front().transpose()
    }
}

/// Guidance link that records every delivered direction.
#[derive(Debug, Default)]
pub struct RecordingGuidanceLink {
    sent: Mutex<Vec<Direction>>,
    failures: Mutex<VecDeque<GuidanceError>>,
}

impl RecordingGuidanceLink {
    /// Creates a link that accepts every message.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the next send fail with `error`.
    pub fn fail_next(&self, error: GuidanceError) {
        lock(&self.failures).push_back(error);
    }

    /// Returns the directions delivered so far, in order.
    #[must_use]
    pub fn sent(&self) -> Vec<Direction> {
        lock(&self.sent).clone()
    }
}

#[async_trait]
impl GuidanceLink for RecordingGuidanceLink {
    async fn send(&self, direction: Direction) -> GuidanceResult<()> {
        if let Some(err) = lock(&self.failures).pop_front() {
            return Err(err);
        }
        lock(&self.sent).push(direction);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn identity_provider_fails_once() {
        let provider = ScriptedIdentityProvider::new();
        provider.fail_next(AuthError::new("boom"));

        assert_eq!(provider.sign_out().await, Err(AuthError::new("boom")));
        assert_eq!(provider.sign_out().await, Ok(()));
        assert_eq!(provider.calls(), vec![AuthCall::SignOut, AuthCall::SignOut]);
    }

    #[tokio::test]
    async fn push_without_subscription_is_rejected() {
        let service = ScriptedPositioningService::new(PermissionState::Granted);
        assert!(!service.push(LocationSample::new(0.0, 0.0)));

        let _subscription = service.watch_position(WatchConfig::default()).await.unwrap();
        assert!(service.push(LocationSample::new(0.0, 0.0)));
    }

    #[tokio::test]
    async fn detector_replays_frames_then_ends() {
        let detector = ScriptedDetector::new();
        detector.push_frame(Vec::new());
        detector.push_error(GuidanceError::Detector("lost".to_string()));

        assert_eq!(detector.next_frame().await, Ok(Some(Vec::new())));
        assert!(detector.next_frame().await.is_err());
        assert_eq!(detector.next_frame().await, Ok(None));
    }
}
