//! Demo binary for pinpoint-location.
//!
//! Drives the fetch policy against simulated collaborators: an
//! always-granting gate and a platform service with a cached network fix
//! plus a live fix that arrives from a background thread after a delay.
//!
//! Run with: cargo run -p pinpoint-location-demo

use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use futures::FutureExt;
use futures::future::BoxFuture;
use pinpoint_location::{
    Criteria, FixError, FixRequest, Location, LocationManager, LocationService, Permission,
    PermissionDecision, PermissionGate, Provider, UpdateHandle, UpdateListener,
};

struct AlwaysGrant;

impl PermissionGate for AlwaysGrant {
    fn check(&self, _required: Vec<Permission>) -> BoxFuture<'static, PermissionDecision> {
        async { PermissionDecision::Granted }.boxed()
    }
}

struct SimulatedService {
    cached_network: Mutex<Option<Location>>,
    fix_delay: Duration,
}

impl LocationService for SimulatedService {
    fn last_known(&self, provider: Provider) -> Option<Location> {
        match provider {
            Provider::Network => self.cached_network.lock().expect("cache poisoned").clone(),
            Provider::Gps | Provider::Other => None,
        }
    }

    fn request_single_update(
        &self,
        criteria: Criteria,
        listener: Arc<dyn UpdateListener>,
    ) -> UpdateHandle {
        println!("  (live request registered, accuracy {:?})", criteria.accuracy);
        let delay = self.fix_delay;
        thread::spawn(move || {
            thread::sleep(delay);
            listener.on_location(Some(sample_fix(Provider::Gps, epoch_millis())));
        });
        UpdateHandle(1)
    }

    fn cancel_update(&self, _handle: UpdateHandle) {
        println!("  (listener deregistered)");
    }
}

fn epoch_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX))
        .unwrap_or(0)
}

fn sample_fix(provider: Provider, timestamp: u64) -> Location {
    Location {
        latitude: 47.6062,
        longitude: -122.3321,
        altitude: Some(56.0),
        horizontal_accuracy: Some(15.0),
        vertical_accuracy: None,
        provider,
        timestamp,
    }
}

fn report(outcome: &Result<Location, FixError>) {
    match outcome {
        Ok(fix) => println!(
            "✓ {:.4}°, {:.4}° via {:?} (t={})",
            fix.latitude, fix.longitude, fix.provider, fix.timestamp
        ),
        Err(err) => println!("✗ {err}"),
    }
}

#[tokio::main]
async fn main() {
    println!("=== Pinpoint location demo ===\n");

    let service = Arc::new(SimulatedService {
        cached_network: Mutex::new(Some(sample_fix(Provider::Network, epoch_millis() - 30_000))),
        fix_delay: Duration::from_millis(300),
    });
    let manager = LocationManager::new(Arc::new(AlwaysGrant), service, 29);

    println!("Required permissions: {:?}\n", manager.required_permissions());

    println!("Fetch 1: cached network fix is fresh enough");
    let outcome = manager
        .current_location(&FixRequest {
            timeout: Duration::from_secs(2),
            maximum_age: Duration::from_secs(60),
            high_accuracy: false,
        })
        .await;
    report(&outcome);

    println!("\nFetch 2: cache too old, waits for the live fix");
    let outcome = manager
        .current_location(&FixRequest {
            timeout: Duration::from_secs(2),
            maximum_age: Duration::from_millis(10),
            high_accuracy: true,
        })
        .await;
    report(&outcome);

    println!("\nFetch 3: tight budget, times out before the live fix");
    let outcome = manager
        .current_location(&FixRequest {
            timeout: Duration::from_millis(50),
            maximum_age: Duration::from_millis(10),
            high_accuracy: true,
        })
        .await;
    report(&outcome);
}
