//! Location capability identifiers and the permission gate contract.
//!
//! This crate models the host platform's permission subsystem as one
//! asynchronous collaborator trait, plus the pure derivation of which
//! capabilities a location fetch needs on a given platform version.
//! Prompting the user and talking to the platform are the gate
//! implementor's business, not this crate's.

#![warn(missing_docs)]

use futures::future::BoxFuture;

/// Capability identifiers a location fetch may require.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Permission {
    /// Approximate (cell/Wi-Fi derived) location access.
    CoarseLocation,
    /// Precise (satellite derived) location access.
    FineLocation,
    /// Running a foreground service while fetching.
    ForegroundService,
    /// Activity recognition, required alongside location on newer platforms.
    ActivityRecognition,
}

impl Permission {
    /// Stable identifier, suitable for logs and host-platform manifests.
    #[must_use]
    pub const fn identifier(self) -> &'static str {
        match self {
            Self::CoarseLocation => "coarse-location",
            Self::FineLocation => "fine-location",
            Self::ForegroundService => "foreground-service",
            Self::ActivityRecognition => "activity-recognition",
        }
    }
}

impl std::fmt::Display for Permission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.identifier())
    }
}

/// Outcome of a permission check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PermissionDecision {
    /// Every requested capability is granted.
    Granted,
    /// At least one capability was refused; carries the refused subset.
    Denied(Vec<Permission>),
}

impl PermissionDecision {
    /// Returns `true` for [`PermissionDecision::Granted`].
    #[must_use]
    pub const fn is_granted(&self) -> bool {
        matches!(self, Self::Granted)
    }
}

/// Asynchronous notify-once permission check, implemented by host-platform
/// glue or by test fakes.
///
/// Implementations may prompt the user; the returned future resolves exactly
/// once, when the platform reports its decision.
pub trait PermissionGate: Send + Sync {
    /// Check (and, where the platform requires it, request) the given set.
    fn check(&self, required: Vec<Permission>) -> BoxFuture<'static, PermissionDecision>;
}

/// Version tiers and the capability each adds on top of everything below it.
const VERSION_TIERS: &[(u32, Permission)] = &[
    (29, Permission::ActivityRecognition),
    (28, Permission::ForegroundService),
];

/// Capabilities every platform version needs.
const BASE_PERMISSIONS: &[Permission] = &[Permission::CoarseLocation, Permission::FineLocation];

/// Derives the capability set a location fetch requires on `api_level`.
///
/// Tiers accumulate downward: a version reaching a tier also carries every
/// lower tier's additions and the base set. Highest-tier additions come
/// first in the returned set, the base set last.
#[must_use]
pub fn required_permissions(api_level: u32) -> Vec<Permission> {
    let mut required = Vec::with_capacity(VERSION_TIERS.len() + BASE_PERMISSIONS.len());
    for &(tier, added) in VERSION_TIERS {
        if api_level >= tier {
            required.push(added);
        }
    }
    required.extend_from_slice(BASE_PERMISSIONS);
    required
}
