//! Screen controllers for the login and home screens.
//!
//! Each presenter owns the mutable state of its screen as plain fields and
//! publishes two kinds of output for the view layer:
//!
//! - **View state**: a full snapshot sent through a `tokio::sync::watch`
//!   channel after every change. Views render the latest snapshot.
//! - **UI events**: one-shot [`UiEvent`]s (modal notices and navigation
//!   requests) sent through an unbounded `tokio::sync::mpsc` channel.
//!
//! # Architecture
//!
//! ```text
//! SmartCaneCore (constructed once at start)
//!     ├── LoginPresenter ── IdentityProvider
//!     └── HomePresenter
//!             ├── ContactList
//!             ├── LocationObserver ── PositioningService
//!             └── IdentityProvider (sign-out)
//! ```

mod home;
mod login;

use log::debug;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

pub use home::{HomePresenter, HomeViewState, LocationView};
pub use login::{LoginPresenter, LoginViewState};

/// Screens the view layer can navigate between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Route {
    /// Email/password login screen.
    Login,
    /// Emergency contacts and live location.
    Home,
}

/// A modal alert with a title and a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    /// Alert title.
    pub title: String,
    /// Alert body.
    pub message: String,
}

impl Notice {
    /// Creates a notice.
    #[must_use]
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }
}

/// One-shot output from a presenter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// Show a modal alert.
    Notice(Notice),
    /// Replace the current screen.
    Navigate(Route),
}

/// Receiving end of a presenter's UI events.
pub type UiEvents = mpsc::UnboundedReceiver<UiEvent>;

/// Sending side shared by the presenters.
#[derive(Debug, Clone)]
struct EventSink {
    tx: mpsc::UnboundedSender<UiEvent>,
}

impl EventSink {
    fn channel() -> (Self, UiEvents) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    fn notice(&self, title: &str, message: impl Into<String>) {
        self.emit(UiEvent::Notice(Notice::new(title, message)));
    }

    fn navigate(&self, route: Route) {
        self.emit(UiEvent::Navigate(route));
    }

    fn emit(&self, event: UiEvent) {
        if self.tx.send(event).is_err() {
            debug!("UI event dropped, no view attached");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notice_new() {
        let notice = Notice::new("Title", "Body");
        assert_eq!(notice.title, "Title");
        assert_eq!(notice.message, "Body");
    }

    #[test]
    fn event_sink_delivers_in_order() {
        let (sink, mut events) = EventSink::channel();
        sink.notice("A", "first");
        sink.navigate(Route::Home);

        assert_eq!(
            events.try_recv().unwrap(),
            UiEvent::Notice(Notice::new("A", "first"))
        );
        assert_eq!(events.try_recv().unwrap(), UiEvent::Navigate(Route::Home));
        assert!(events.try_recv().is_err());
    }

    #[test]
    fn event_sink_tolerates_dropped_receiver() {
        let (sink, events) = EventSink::channel();
        drop(events);
        sink.navigate(Route::Login);
    }
}
