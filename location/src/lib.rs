//! Single-shot "best current location" access.
//!
//! This crate answers "where is the device right now?" over a host
//! platform's callback-driven location subsystem. The platform itself is
//! out of scope and injected through two collaborator traits: a
//! [`PermissionGate`] and a [`LocationService`]. The crate owns only the
//! fetch policy: serve a cached fix while one is fresh enough, otherwise
//! race a one-shot live request against a deadline.
//!
//! # Usage
//!
//! ```ignore
//! use std::time::Duration;
//! use pinpoint_location::{FixRequest, LocationManager};
//!
//! let manager = LocationManager::new(gate, service, 29);
//! let request = FixRequest {
//!     timeout: Duration::from_secs(5),
//!     maximum_age: Duration::from_secs(60),
//!     high_accuracy: true,
//! };
//! match manager.current_location(&request).await {
//!     Ok(fix) => println!("{}, {}", fix.latitude, fix.longitude),
//!     Err(err) => eprintln!("no fix: {err}"),
//! }
//! ```
//!
//! Dropping the future returned by a fetch cancels it; any live-update
//! listener it registered is deregistered on the way out.

#![warn(missing_docs)]

mod fetch;

use std::sync::Arc;
use std::time::Duration;

pub use fetch::LocationManager;
pub use pinpoint_permission::{
    Permission, PermissionDecision, PermissionGate, required_permissions,
};

/// A geographic fix with coordinates and metadata.
///
/// Produced by the platform service; never mutated here.
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    /// Latitude in degrees (-90 to 90).
    pub latitude: f64,
    /// Longitude in degrees (-180 to 180).
    pub longitude: f64,
    /// Altitude in meters above sea level, if available.
    pub altitude: Option<f64>,
    /// Horizontal accuracy in meters, if available.
    pub horizontal_accuracy: Option<f64>,
    /// Vertical accuracy in meters, if available.
    pub vertical_accuracy: Option<f64>,
    /// Source that produced the fix.
    pub provider: Provider,
    /// Timestamp as Unix epoch milliseconds.
    pub timestamp: u64,
}

/// Source of a fix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provider {
    /// Satellite positioning.
    Gps,
    /// Cell tower / Wi-Fi positioning.
    Network,
    /// Any other platform-specific source.
    Other,
}

/// Accuracy preference for a live request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Accuracy {
    /// Precise fix, typically satellite-backed.
    Fine,
    /// Approximate fix, cheaper to produce.
    Coarse,
}

/// Selector handed to the platform when requesting a live update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Criteria {
    /// Requested fix accuracy.
    pub accuracy: Accuracy,
}

/// Everything one fetch needs to know; created per call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixRequest {
    /// Upper bound on waiting for a live fix.
    pub timeout: Duration,
    /// Oldest cached fix still worth returning.
    pub maximum_age: Duration,
    /// Ask the platform for a fine rather than a coarse fix.
    pub high_accuracy: bool,
}

/// Terminal failure of a fetch; success is the `Ok` arm of the result.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FixError {
    /// Required permissions were refused; carries the refused subset.
    #[error("location permission denied")]
    PermissionDenied(Vec<Permission>),
    /// No fix arrived within the time budget.
    #[error("no fix within the time budget")]
    Timeout,
    /// The platform answered the live request without a usable fix.
    #[error("live update completed without a fix")]
    NoFix,
}

/// Identifies one live-update registration with a [`LocationService`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UpdateHandle(pub u64);

/// Receives the at-most-once callback of a live update.
///
/// `None` means the platform finished the wait without producing a usable
/// fix.
pub trait UpdateListener: Send + Sync {
    /// Deliver the result of the live request.
    fn on_location(&self, location: Option<Location>);
}

/// The host platform's location subsystem, as consumed by this crate.
pub trait LocationService: Send + Sync {
    /// Last cached fix from `provider`, if the platform holds one.
    fn last_known(&self, provider: Provider) -> Option<Location>;

    /// Register a one-shot listener for a fresh fix matching `criteria`.
    fn request_single_update(
        &self,
        criteria: Criteria,
        listener: Arc<dyn UpdateListener>,
    ) -> UpdateHandle;

    /// Drop the registration behind `handle`. Invoked exactly once per
    /// registration, before the fetch result is surfaced.
    fn cancel_update(&self, handle: UpdateHandle);
}
