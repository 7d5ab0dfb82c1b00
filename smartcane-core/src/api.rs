//! Application entry point.

use std::sync::Arc;

use crate::auth::IdentityProvider;
use crate::config::{ConfigError, SmartCaneConfig};
use crate::guidance::{GuidanceLink, GuidanceLoop, ObstacleDetector};
use crate::location::PositioningService;
use crate::presenter::{HomePresenter, LoginPresenter, UiEvents};

/// Core interface for the Smart Cane app.
///
/// Constructed once at application start with the configuration and the
/// platform collaborators, then used to create a presenter for each screen
/// as the user navigates. The identity provider is shared by every
/// presenter instead of living in a global.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use smartcane_core::location::PermissionState;
/// use smartcane_core::testing::{ScriptedIdentityProvider, ScriptedPositioningService};
/// use smartcane_core::{SmartCaneConfig, SmartCaneCore};
///
/// let core = SmartCaneCore::new(
///     SmartCaneConfig::default(),
///     Arc::new(ScriptedIdentityProvider::new()),
///     Arc::new(ScriptedPositioningService::new(PermissionState::Granted)),
/// )
/// .unwrap();
/// let (login, _events) = core.login_presenter();
/// assert!(login.view_state().email.is_empty());
/// ```
#[derive(Clone)]
pub struct SmartCaneCore {
    config: SmartCaneConfig,
    identity: Arc<dyn IdentityProvider>,
    positioning: Arc<dyn PositioningService>,
}

impl SmartCaneCore {
    /// Creates the core after validating the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if a configuration value is out of
    /// range.
    pub fn new(
        config: SmartCaneConfig,
        identity: Arc<dyn IdentityProvider>,
        positioning: Arc<dyn PositioningService>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        log::info!("Smart Cane core initialized");
        Ok(Self {
            config,
            identity,
            positioning,
        })
    }

    /// Returns the active configuration.
    #[must_use]
    pub const fn config(&self) -> &SmartCaneConfig {
        &self.config
    }

    /// Returns the shared identity provider.
    #[must_use]
    pub fn identity(&self) -> Arc<dyn IdentityProvider> {
        Arc::clone(&self.identity)
    }

    /// Creates a controller for the login screen.
    #[must_use]
    pub fn login_presenter(&self) -> (LoginPresenter, UiEvents) {
        LoginPresenter::new(self.identity())
    }

    /// Creates a controller for the home screen.
    ///
    /// Each home screen gets its own contact list and location observer.
    #[must_use]
    pub fn home_presenter(&self) -> (HomePresenter, UiEvents) {
        HomePresenter::new(
            self.identity(),
            Arc::clone(&self.positioning),
            &self.config,
        )
    }

    /// Creates the obstacle guidance loop for the cane's detector and its
    /// link to the phone.
    #[must_use]
    pub fn guidance_loop(
        &self,
        detector: Arc<dyn ObstacleDetector>,
        link: Arc<dyn GuidanceLink>,
    ) -> GuidanceLoop {
        GuidanceLoop::new(detector, link, self.config.guidance)
    }
}

impl std::fmt::Debug for SmartCaneCore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmartCaneCore")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
