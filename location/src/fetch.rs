//! The fetch policy: cached fixes first, then a bounded live request.

use std::fmt;
use std::sync::{Arc, Mutex};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use futures::channel::oneshot;
use futures::future::{self, Either};
use futures_timer::Delay;
use log::warn;
use pinpoint_permission::{Permission, PermissionDecision, PermissionGate, required_permissions};

use crate::{
    Accuracy, Criteria, FixError, FixRequest, Location, LocationService, Provider, UpdateHandle,
    UpdateListener,
};

/// Single-shot "best current location" accessor.
///
/// Construct one per process over the two platform collaborators and pass it
/// around explicitly. The required permission set is derived once from
/// `api_level` at construction and read-only afterwards, so a manager is
/// safe to share across tasks.
pub struct LocationManager {
    gate: Arc<dyn PermissionGate>,
    service: Arc<dyn LocationService>,
    required: Vec<Permission>,
}

impl fmt::Debug for LocationManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocationManager")
            .field("required", &self.required)
            .finish()
    }
}

impl LocationManager {
    /// Creates a manager over the given collaborators for `api_level`.
    #[must_use]
    pub fn new(
        gate: Arc<dyn PermissionGate>,
        service: Arc<dyn LocationService>,
        api_level: u32,
    ) -> Self {
        Self {
            gate,
            service,
            required: required_permissions(api_level),
        }
    }

    /// The permission set every fetch through this manager asks the gate for.
    #[must_use]
    pub fn required_permissions(&self) -> &[Permission] {
        &self.required
    }

    /// Fetches the best current location after checking permissions.
    ///
    /// Resolves with a cached fix when one is younger than
    /// `request.maximum_age`, otherwise waits at most `request.timeout` for
    /// a live one. A single attempt per call; callers retry by calling
    /// again.
    ///
    /// # Errors
    ///
    /// [`FixError::PermissionDenied`] when the gate refuses (no provider
    /// query happens in that case), [`FixError::Timeout`] when the budget
    /// elapses, [`FixError::NoFix`] when the platform answers the live
    /// request without a usable fix.
    pub async fn current_location(&self, request: &FixRequest) -> Result<Location, FixError> {
        match self.gate.check(self.required.clone()).await {
            PermissionDecision::Granted => self.current_location_unchecked(request).await,
            PermissionDecision::Denied(denied) => Err(FixError::PermissionDenied(denied)),
        }
    }

    /// Fetches the best current location without consulting the gate.
    ///
    /// Use this if permission status has already been verified.
    ///
    /// # Errors
    ///
    /// [`FixError::Timeout`] or [`FixError::NoFix`], as for
    /// [`Self::current_location`].
    pub async fn current_location_unchecked(
        &self,
        request: &FixRequest,
    ) -> Result<Location, FixError> {
        let min_acceptable = now_epoch_millis().saturating_sub(millis(request.maximum_age));

        for provider in [Provider::Gps, Provider::Network] {
            if let Some(cached) = self
                .service
                .last_known(provider)
                .filter(|cached| cached.timestamp >= min_acceptable)
            {
                return Ok(cached);
            }
        }

        let criteria = Criteria {
            accuracy: if request.high_accuracy {
                Accuracy::Fine
            } else {
                Accuracy::Coarse
            },
        };

        let (listener, delivered) = ChannelListener::new();
        let handle = self
            .service
            .request_single_update(criteria, Arc::new(listener));
        let registration = Registration::new(Arc::clone(&self.service), handle);

        match future::select(delivered, Delay::new(request.timeout)).await {
            Either::Left((fired, _)) => {
                registration.cancel();
                match fired {
                    Ok(Some(location)) => Ok(location),
                    // A dropped sender means the platform discarded the
                    // listener without firing; no fix is coming.
                    Ok(None) | Err(oneshot::Canceled) => Err(FixError::NoFix),
                }
            }
            Either::Right(((), _)) => {
                registration.cancel();
                Err(FixError::Timeout)
            }
        }
    }
}

/// Bridges the platform's at-most-once callback into a oneshot future.
struct ChannelListener {
    sender: Mutex<Option<oneshot::Sender<Option<Location>>>>,
}

impl ChannelListener {
    fn new() -> (Self, oneshot::Receiver<Option<Location>>) {
        let (sender, receiver) = oneshot::channel();
        (
            Self {
                sender: Mutex::new(Some(sender)),
            },
            receiver,
        )
    }
}

impl fmt::Debug for ChannelListener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChannelListener").finish()
    }
}

impl UpdateListener for ChannelListener {
    fn on_location(&self, location: Option<Location>) {
        let Some(sender) = self.sender.lock().expect("listener mutex poisoned").take() else {
            warn!("ignoring duplicate single-update callback");
            return;
        };

        if sender.send(location).is_err() {
            warn!("discarding single-update fix, request already resolved");
        }
    }
}

/// Keeps a live-update registration deregistered exactly once on every exit
/// path, including the fetch future being dropped mid-wait.
struct Registration {
    service: Arc<dyn LocationService>,
    handle: Option<UpdateHandle>,
}

impl Registration {
    fn new(service: Arc<dyn LocationService>, handle: UpdateHandle) -> Self {
        Self {
            service,
            handle: Some(handle),
        }
    }

    fn cancel(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(handle) = self.handle.take() {
            self.service.cancel_update(handle);
        }
    }
}

impl Drop for Registration {
    fn drop(&mut self) {
        self.release();
    }
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

fn now_epoch_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(millis)
        .unwrap_or(0)
}
