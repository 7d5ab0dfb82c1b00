//! Smart Cane Core Library
//!
//! Core functionality for the Smart Cane companion app: emergency
//! contacts, live location, obstacle guidance for the cane, and the
//! login/home screen controllers that sit between the view layer and the
//! platform collaborators.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![deny(unsafe_code)]

mod api;
pub mod auth;
mod config;
pub mod contacts;
pub mod guidance;
pub mod location;
pub mod presenter;
#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

pub use api::SmartCaneCore;
pub use config::{ConfigError, SmartCaneConfig};
