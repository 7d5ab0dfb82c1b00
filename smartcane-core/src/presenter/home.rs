//! Home screen controller: emergency contacts, sign-out, and live location.

use std::sync::Arc;

use log::{info, warn};
use tokio::sync::watch;

use super::{EventSink, Route, UiEvents};
use crate::auth::IdentityProvider;
use crate::contacts::{Contact, ContactError, ContactList};
use crate::location::{
    LocationObserver, LocationSample, MapRegion, ObserverState, PositioningService,
};
use crate::SmartCaneConfig;

/// What the map area of the home screen should show.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum LocationView {
    /// No fix yet and no error; show a spinner.
    #[default]
    Loading,
    /// A map centered on the latest fix with a single marker.
    Map(MapRegion),
    /// Live updates stopped with an error after a fix was obtained; show
    /// the last known position together with the message.
    Stale {
        /// Region around the last fix.
        region: MapRegion,
        /// Why updates stopped.
        message: String,
    },
    /// Location could not be obtained; show the message.
    Error(String),
}

/// Snapshot of the home screen for rendering.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HomeViewState {
    /// Current content of the contact name field.
    pub contact_name: String,
    /// Current content of the contact phone field.
    pub contact_phone: String,
    /// Contacts in insertion order.
    pub contacts: Vec<Contact>,
    /// Map area content.
    pub location: LocationView,
}

/// Controller for the home screen.
///
/// Dropping the presenter releases the location subscription.
pub struct HomePresenter {
    identity: Arc<dyn IdentityProvider>,
    contacts: ContactList,
    observer: LocationObserver,
    map_delta: f64,
    contact_name: String,
    contact_phone: String,
    state: watch::Sender<HomeViewState>,
    events: EventSink,
}

impl HomePresenter {
    /// Creates a presenter and the receiver for its UI events.
    #[must_use]
    pub fn new(
        identity: Arc<dyn IdentityProvider>,
        positioning: Arc<dyn PositioningService>,
        config: &SmartCaneConfig,
    ) -> (Self, UiEvents) {
        let (state, _) = watch::channel(HomeViewState::default());
        let (events, rx) = EventSink::channel();
        let presenter = Self {
            identity,
            contacts: ContactList::with_settings(config.contacts),
            observer: LocationObserver::new(positioning, config.location.watch_config()),
            map_delta: config.location.map_delta,
            contact_name: String::new(),
            contact_phone: String::new(),
            state,
            events,
        };
        (presenter, rx)
    }

    /// Returns a receiver that observes every view-state change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<HomeViewState> {
        self.state.subscribe()
    }

    /// Returns the current view state.
    #[must_use]
    pub fn view_state(&self) -> HomeViewState {
        self.state.borrow().clone()
    }

    /// Returns the contact list.
    #[must_use]
    pub const fn contacts(&self) -> &ContactList {
        &self.contacts
    }

    /// Returns the location observer.
    #[must_use]
    pub const fn observer(&self) -> &LocationObserver {
        &self.observer
    }

    /// Replaces the content of the contact name field.
    pub fn set_contact_name(&mut self, name: impl Into<String>) {
        self.contact_name = name.into();
        self.publish();
    }

    /// Replaces the content of the contact phone field.
    pub fn set_contact_phone(&mut self, phone: impl Into<String>) {
        self.contact_phone = phone.into();
        self.publish();
    }

    /// Adds a contact from the input fields and clears them on success.
    pub fn add_contact(&mut self) -> Option<Contact> {
        match self
            .contacts
            .add_contact(&self.contact_name, &self.contact_phone)
        {
            Ok(contact) => {
                self.clear_inputs();
                self.publish();
                Some(contact)
            }
            Err(ContactError::Validation(_)) => {
                self.events.notice(
                    "Missing Fields",
                    "Please enter both a name and a phone number.",
                );
                None
            }
            Err(err @ ContactError::Full(_)) => {
                self.events.notice("Contact List Full", err.to_string());
                None
            }
            Err(err @ ContactError::EmptyList) => {
                warn!("Unexpected contact error: {err}");
                self.events.notice("Error", err.to_string());
                None
            }
        }
    }

    /// Removes the most recently added contact and clears the input fields.
    pub fn remove_contact(&mut self) -> Option<Contact> {
        match self.contacts.remove_last() {
            Ok(contact) => {
                self.events
                    .notice("Contact Removed", "The last contact has been removed.");
                self.clear_inputs();
                self.publish();
                Some(contact)
            }
            Err(_) => {
                self.events.notice("No Contacts", "No contact to remove.");
                None
            }
        }
    }

    /// Signs out and navigates back to the login screen.
    ///
    /// Returns whether the provider accepted the request.
    pub async fn sign_out(&mut self) -> bool {
        match self.identity.sign_out().await {
            Ok(()) => {
                info!("User signed out");
                self.events.navigate(Route::Login);
                true
            }
            Err(err) => {
                warn!("Sign out error: {err}");
                self.events.notice("Error", err.message());
                false
            }
        }
    }

    /// Starts the location observer. A no-op once started.
    pub async fn start_location(&mut self) {
        self.observer.start().await;
        self.publish();
    }

    /// Waits for the next location update and republishes the map.
    ///
    /// Returns `false` once no more updates will arrive.
    pub async fn next_location_update(&mut self) -> bool {
        let updated = self.observer.next_update().await.is_some();
        if updated {
            self.publish();
        }
        updated
    }

    /// Applies a position callback delivered outside the subscription
    /// stream.
    pub fn on_location_update(&mut self, sample: LocationSample) -> bool {
        let applied = self.observer.apply_update(sample);
        if applied {
            self.publish();
        }
        applied
    }

    /// Applies every update already delivered, returning how many were kept.
    pub fn drain_location_updates(&mut self) -> usize {
        let applied = self.observer.drain_updates();
        if applied > 0 {
            self.publish();
        }
        applied
    }

    /// Releases the location subscription when the screen goes away.
    pub fn teardown(&mut self) {
        self.observer.teardown();
    }

    fn clear_inputs(&mut self) {
        self.contact_name.clear();
        self.contact_phone.clear();
    }

    fn location_view(&self) -> LocationView {
        let error = match self.observer.state() {
            ObserverState::Denied | ObserverState::Unavailable => self.observer.last_error(),
            _ => None,
        };
        match (self.observer.current_sample(), error) {
            (Some(sample), Some(err)) => LocationView::Stale {
                region: MapRegion::around(sample, self.map_delta),
                message: err.to_string(),
            },
            (Some(sample), None) => LocationView::Map(MapRegion::around(sample, self.map_delta)),
            (None, Some(err)) => LocationView::Error(err.to_string()),
            (None, None) => LocationView::Loading,
        }
    }

    fn publish(&self) {
        self.state.send_replace(HomeViewState {
            contact_name: self.contact_name.clone(),
            contact_phone: self.contact_phone.clone(),
            contacts: self.contacts.list().to_vec(),
            location: self.location_view(),
        });
    }
}

impl std::fmt::Debug for HomePresenter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HomePresenter")
            .field("contacts", &self.contacts.len())
            .field("observer", &self.observer.state())
            .finish_non_exhaustive()
    }
}
