//! # Pinpoint
//!
//! Single-shot "best current location" access over a host platform's
//! callback-driven location subsystem.
//!
//! The platform itself (permission prompts, provider bindings, lifecycle
//! wiring) stays outside this kit: applications inject it through two small
//! collaborator traits and get back one asynchronous operation that answers
//! "where is the device right now?" from the freshest cached fix, or from a
//! live request bounded by a time budget.
//!
//! ## Features
//!
//! - `permission`: capability identifiers, the version-tier permission
//!   derivation, and the permission gate contract.
//! - `location`: the location accessor and the platform service contract.
//!   Implies `permission`.
//!
//! Use the `full` feature to enable everything.
//!
//! ## Example
//!
//! ```toml
//! [dependencies]
//! pinpoint = { version = "0.1", features = ["location"] }
//! ```
//!
//! ```ignore
//! use std::time::Duration;
//! use pinpoint::location::{FixRequest, LocationManager};
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

#[cfg(feature = "location")]
pub use pinpoint_location as location;

#[cfg(feature = "permission")]
pub use pinpoint_permission as permission;
