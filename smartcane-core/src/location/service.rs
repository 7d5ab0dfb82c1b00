//! Positioning service collaborator and subscription guard.
//!
//! Raw GPS access lives on the platform side. The core talks to it through
//! [`PositioningService`] and receives continuous updates through a
//! [`PositionSubscription`], which owns the platform's unsubscribe handle
//! and invokes it exactly once.

use async_trait::async_trait;
use log::debug;
use tokio::sync::mpsc;

use super::error::LocationResult;
use super::types::{LocationSample, PermissionState, WatchConfig};

/// Platform positioning service.
///
/// The platform guarantees that the permission result is delivered before
/// any position callback.
#[async_trait]
pub trait PositioningService: Send + Sync {
    /// Asks the user for foreground location permission.
    async fn request_foreground_permission(&self) -> LocationResult<PermissionState>;

    /// Fetches a single fix.
    async fn current_position(&self) -> LocationResult<LocationSample>;

    /// Opens a continuous subscription with the given thresholds.
    async fn watch_position(&self, config: WatchConfig) -> LocationResult<PositionSubscription>;
}

/// Token that stops delivery of position callbacks when removed.
///
/// `remove` consumes the handle, so it can run at most once. Any
/// `FnOnce() + Send` closure is a valid handle.
pub trait SubscriptionHandle: Send {
    /// Releases the platform subscription.
    fn remove(self: Box<Self>);
}

impl<F> SubscriptionHandle for F
where
    F: FnOnce() + Send,
{
    fn remove(self: Box<Self>) {
        (*self)();
    }
}

/// An active stream of position updates.
///
/// Dropping the subscription releases the platform handle. Releasing it
/// explicitly with [`release`](Self::release) and then dropping does not
/// release twice.
pub struct PositionSubscription {
    updates: mpsc::UnboundedReceiver<LocationSample>,
    handle: Option<Box<dyn SubscriptionHandle>>,
}

impl PositionSubscription {
    /// Creates a subscription and the sender the platform callback feeds.
    ///
    /// # Examples
    ///
    /// ```
    /// use smartcane_core::location::{LocationSample, PositionSubscription};
    ///
    /// let (tx, mut subscription) = PositionSubscription::channel(|| {});
    /// tx.send(LocationSample::new(1.0, 2.0)).unwrap();
    /// assert_eq!(subscription.try_recv().unwrap().latitude, 1.0);
    /// ```
    #[must_use]
    pub fn channel(
        handle: impl SubscriptionHandle + 'static,
    ) -> (mpsc::UnboundedSender<LocationSample>, Self) {
        let (tx, rx) = mpsc::unbounded_channel();
        let subscription = Self {
            updates: rx,
            handle: Some(Box::new(handle)),
        };
        (tx, subscription)
    }

    /// Waits for the next update.
    ///
    /// Returns `None` once the subscription has been released or the
    /// platform side has hung up.
    pub async fn recv(&mut self) -> Option<LocationSample> {
        if self.handle.is_none() {
            return None;
        }
        self.updates.recv().await
    }

    /// Returns the next already-delivered update without waiting.
    pub fn try_recv(&mut self) -> Option<LocationSample> {
        if self.handle.is_none() {
            return None;
        }
        self.updates.try_recv().ok()
    }

    /// Returns whether the platform handle is still held.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.handle.is_some()
    }

    /// Releases the platform handle and stops accepting updates.
    pub fn release(&mut self) {
        if let Some(handle) = self.handle.take() {
            self.updates.close();
            handle.remove();
            debug!("Position subscription released");
        }
    }
}

impl Drop for PositionSubscription {
    fn drop(&mut self) {
        self.release();
    }
}

impl std::fmt::Debug for PositionSubscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PositionSubscription")
            .field("active", &self.is_active())
            .finish_non_exhaustive()
    }
}
