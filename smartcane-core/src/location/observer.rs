//! Permission-gated live location observer.
//!
//! # State Machine
//!
//! ```text
//!            start()
//!   Idle ───────────────► PermissionRequested
//!                           │            │
//!                  refused  │            │ granted
//!                           ▼            ▼
//!                        Denied   initial fix + watch ──► Active ◄─┐
//!                                        │                  │      │ update
//!                                        │ platform error   └──────┘
//!                                        ▼                  │ teardown()
//!                                   Unavailable             ▼
//!                                                        Stopped
//! ```
//!
//! Nothing returns to `Idle`. Calling [`LocationObserver::start`] after it
//! has completed is a no-op, and a denial is never retried automatically.
//! A `start` whose future was dropped before completing leaves the observer
//! in `PermissionRequested`; the next `start` begins again from there.

use std::sync::Arc;

use log::{debug, info, warn};

use super::error::LocationError;
use super::service::{PositionSubscription, PositioningService};
use super::types::{LocationSample, PermissionState, WatchConfig};

/// Lifecycle state of a [`LocationObserver`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObserverState {
    /// Created, not yet started.
    Idle,
    /// Waiting for the permission result and initial fix.
    PermissionRequested,
    /// Receiving continuous updates.
    Active,
    /// Permission was refused.
    Denied,
    /// Permission was granted but the platform failed to deliver a fix or
    /// a subscription.
    Unavailable,
    /// The subscription was released by teardown.
    Stopped,
}

impl ObserverState {
    /// Returns whether the observer can make no further progress.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Denied | Self::Unavailable | Self::Stopped)
    }
}

/// Observes the device location for the lifetime of one screen.
///
/// The observer retains only the latest [`LocationSample`]. Its subscription
/// is released on [`teardown`](Self::teardown) or when the observer is
/// dropped, whichever comes first.
pub struct LocationObserver {
    service: Arc<dyn PositioningService>,
    config: WatchConfig,
    state: ObserverState,
    permission: PermissionState,
    sample: Option<LocationSample>,
    error: Option<LocationError>,
    subscription: Option<PositionSubscription>,
}

impl LocationObserver {
    /// Creates an idle observer using the given service and thresholds.
    #[must_use]
    pub fn new(service: Arc<dyn PositioningService>, config: WatchConfig) -> Self {
        Self {
            service,
            config,
            state: ObserverState::Idle,
            permission: PermissionState::Unknown,
            sample: None,
            error: None,
            subscription: None,
        }
    }

    /// Requests permission, fetches an initial fix, and subscribes.
    ///
    /// Only has an effect from [`ObserverState::Idle`], or from
    /// [`ObserverState::PermissionRequested`] left behind by a cancelled
    /// call. Failures are not returned; they are recorded in
    /// [`last_error`](Self::last_error) and reflected in
    /// [`state`](Self::state).
    pub async fn start(&mut self) {
        if !matches!(
            self.state,
            ObserverState::Idle | ObserverState::PermissionRequested
        ) {
            debug!("Location observer already started ({:?})", self.state);
            return;
        }

        let service = Arc::clone(&self.service);
        self.state = ObserverState::PermissionRequested;
        info!("Requesting foreground location permission");

        match service.request_foreground_permission().await {
            Ok(PermissionState::Granted) => self.permission = PermissionState::Granted,
            Ok(_) | Err(LocationError::PermissionDenied) => {
                self.deny();
                return;
            }
            Err(err) => {
                self.fail(err);
                return;
            }
        }

        match service.current_position().await {
            Ok(sample) if sample.is_valid() => self.sample = Some(sample),
            Ok(_) => {
                self.fail(LocationError::Unavailable(
                    "initial fix has invalid coordinates".to_string(),
                ));
                return;
            }
            Err(err) => {
                self.fail(err);
                return;
            }
        }

        match service.watch_position(self.config).await {
            Ok(subscription) => {
                self.subscription = Some(subscription);
                self.state = ObserverState::Active;
                info!(
                    "Location observer active (interval {} ms, displacement {} m)",
                    self.config.min_interval_ms, self.config.min_displacement_meters
                );
            }
            Err(err) => self.fail(err),
        }
    }

    /// Applies a subscription callback, replacing the current sample.
    ///
    /// Returns `false` and leaves the sample untouched if the observer is
    /// not active, has been torn down, or the sample is invalid.
    pub fn apply_update(&mut self, sample: LocationSample) -> bool {
        if !self.is_subscribed() {
            debug!("Ignoring position update while {:?}", self.state);
            return false;
        }
        if !sample.is_valid() {
            warn!("Dropping position update with invalid coordinates");
            return false;
        }
        self.sample = Some(sample);
        true
    }

    /// Waits for the next valid update from the subscription and applies it.
    ///
    /// Returns `None` if there is no live subscription or the stream ended.
    pub async fn next_update(&mut self) -> Option<LocationSample> {
        loop {
            let sample = self.subscription.as_mut()?.recv().await?;
            if self.apply_update(sample) {
                return Some(sample);
            }
        }
    }

    /// Applies every update already delivered, returning how many were kept.
    pub fn drain_updates(&mut self) -> usize {
        let mut applied = 0;
        loop {
            let Some(sample) = self
                .subscription
                .as_mut()
                .and_then(PositionSubscription::try_recv)
            else {
                break;
            };
            if self.apply_update(sample) {
                applied += 1;
            }
        }
        applied
    }

    /// Releases the subscription. Safe to call more than once.
    ///
    /// An active observer moves to [`ObserverState::Stopped`]; the last
    /// sample stays readable.
    pub fn teardown(&mut self) {
        if let Some(mut subscription) = self.subscription.take() {
            subscription.release();
            info!("Location observer torn down");
        }
        if self.state == ObserverState::Active {
            self.state = ObserverState::Stopped;
        }
    }

    /// Returns the latest sample, `None` until the first successful fetch.
    #[must_use]
    pub const fn current_sample(&self) -> Option<&LocationSample> {
        self.sample.as_ref()
    }

    /// Returns the error that stopped the observer, if any.
    #[must_use]
    pub const fn last_error(&self) -> Option<&LocationError> {
        self.error.as_ref()
    }

    /// Returns the current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> ObserverState {
        self.state
    }

    /// Returns the permission observed so far.
    #[must_use]
    pub const fn permission(&self) -> PermissionState {
        self.permission
    }

    /// Returns whether updates are currently being delivered.
    #[must_use]
    pub fn is_subscribed(&self) -> bool {
        self.state == ObserverState::Active
            && self
                .subscription
                .as_ref()
                .is_some_and(PositionSubscription::is_active)
    }

    fn deny(&mut self) {
        warn!("Location permission denied");
        self.permission = PermissionState::Denied;
        self.state = ObserverState::Denied;
        self.error = Some(LocationError::PermissionDenied);
    }

    fn fail(&mut self, err: LocationError) {
        warn!("Location unavailable: {err}");
        self.state = ObserverState::Unavailable;
        self.error = Some(err);
    }
}

impl std::fmt::Debug for LocationObserver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocationObserver")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("permission", &self.permission)
            .field("sample", &self.sample)
            .field("error", &self.error)
            .field("subscription", &self.subscription)
            .finish_non_exhaustive()
    }
}
