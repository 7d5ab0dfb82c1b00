//! Integration tests for the permission-gated location observer.
//!
//! These tests drive the observer through the scripted positioning service,
//! which delivers updates the same way a platform callback would.

// Samples are copied, never computed, so exact float comparison is intended.
#![allow(clippy::float_cmp)]

use std::sync::Arc;

use smartcane_core::location::{
    AccuracyTier, LocationError, LocationObserver, LocationSample, ObserverState,
    PermissionState, PositioningService, WatchConfig, PERMISSION_DENIED_MESSAGE,
};
use smartcane_core::testing::ScriptedPositioningService;

fn observer_for(
    service: &Arc<ScriptedPositioningService>,
    config: WatchConfig,
) -> LocationObserver {
    let service: Arc<dyn PositioningService> = service.clone();
    LocationObserver::new(service, config)
}

#[tokio::test]
async fn denied_permission_never_produces_a_sample() {
    let service = Arc::new(ScriptedPositioningService::new(PermissionState::Denied));
    let mut observer = observer_for(&service, WatchConfig::default());

    observer.start().await;
    observer.start().await;

    assert_eq!(observer.state(), ObserverState::Denied);
    assert_eq!(observer.permission(), PermissionState::Denied);
    assert_eq!(service.permission_requests(), 1);
    assert!(service.watch_configs().is_empty());

    let err = observer.last_error().unwrap();
    assert_eq!(err, &LocationError::PermissionDenied);
    assert_eq!(err.to_string(), PERMISSION_DENIED_MESSAGE);

    assert!(!service.push(LocationSample::new(1.0, 1.0)));
    assert!(!observer.apply_update(LocationSample::new(1.0, 1.0)));
    assert_eq!(observer.drain_updates(), 0);
    assert!(observer.current_sample().is_none());
}

#[tokio::test]
async fn granted_permission_tracks_only_the_latest_sample() {
    let service = Arc::new(ScriptedPositioningService::new(PermissionState::Granted));
    let mut observer = observer_for(&service, WatchConfig::default());
    assert!(observer.current_sample().is_none());

    observer.start().await;

    let initial = *observer.current_sample().unwrap();
    assert_eq!(initial.latitude, 37.7749);
    assert_eq!(initial.longitude, -122.4194);

    let path = [(37.7750, -122.4195), (37.7751, -122.4196), (37.7752, -122.4197)];
    for (lat, lon) in path {
        assert!(service.push(LocationSample::new(lat, lon)));
        let sample = observer.next_update().await.unwrap();
        assert_eq!(sample.latitude, lat);
        assert_eq!(observer.current_sample().unwrap().latitude, lat);
        assert_eq!(observer.current_sample().unwrap().longitude, lon);
    }
}

#[tokio::test]
async fn subscription_uses_high_accuracy_five_seconds_five_meters() {
    let service = Arc::new(ScriptedPositioningService::new(PermissionState::Granted));
    let mut observer = observer_for(&service, WatchConfig::default());

    observer.start().await;

    let configs = service.watch_configs();
    assert_eq!(configs.len(), 1);
    assert_eq!(configs[0].accuracy, AccuracyTier::High);
    assert_eq!(configs[0].min_interval_ms, 5_000);
    assert_eq!(configs[0].min_displacement_meters, 5.0);
}

#[tokio::test]
async fn custom_watch_config_is_forwarded() {
    let service = Arc::new(ScriptedPositioningService::new(PermissionState::Granted));
    let config = WatchConfig {
        accuracy: AccuracyTier::Balanced,
        min_interval_ms: 10_000,
        min_displacement_meters: 25.0,
    };
    let mut observer = observer_for(&service, config);

    observer.start().await;

    assert_eq!(service.watch_configs(), vec![config]);
}

#[tokio::test]
async fn teardown_stops_delivery_and_releases_once() {
    let service = Arc::new(ScriptedPositioningService::new(PermissionState::Granted));
    let mut observer = observer_for(&service, WatchConfig::default());
    observer.start().await;

    service.push(LocationSample::new(1.0, 2.0));
    observer.teardown();

    assert_eq!(service.release_count(), 1);
    assert_eq!(observer.drain_updates(), 0);
    assert_eq!(observer.current_sample().unwrap().latitude, 37.7749);

    drop(observer);
    assert_eq!(service.release_count(), 1);
}

#[tokio::test]
async fn observer_dropped_before_start_releases_nothing() {
    let service = Arc::new(ScriptedPositioningService::new(PermissionState::Granted));
    let observer = observer_for(&service, WatchConfig::default());

    drop(observer);

    assert_eq!(service.release_count(), 0);
    assert_eq!(service.permission_requests(), 0);
}
