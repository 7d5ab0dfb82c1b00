//! Live location for the home screen.
//!
//! Provides a permission-gated observer over the platform positioning
//! service:
//! - One permission request per observer, never retried after a denial
//! - An immediate fix, then a continuous subscription (high accuracy,
//!   5 s or 5 m, whichever comes first)
//! - Only the most recent sample is kept
//! - The subscription is released exactly once on teardown
//!
//! # Example Usage
//!
//! ```ignore
//! use std::sync::Arc;
//! use smartcane_core::location::{LocationObserver, WatchConfig};
//!
//! let mut observer = LocationObserver::new(Arc::new(platform_service), WatchConfig::default());
//! observer.start().await;
//!
//! while let Some(sample) = observer.next_update().await {
//!     println!("{}, {}", sample.latitude, sample.longitude);
//! }
//! ```

mod error;
mod observer;
mod service;
pub mod types;

pub use error::{LocationError, LocationResult, PERMISSION_DENIED_MESSAGE};
pub use observer::{LocationObserver, ObserverState};
pub use service::{PositionSubscription, PositioningService, SubscriptionHandle};
pub use types::{
    AccuracyTier, LocationSample, LocationSettings, MapRegion, PermissionState, WatchConfig,
};
