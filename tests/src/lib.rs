#[cfg(test)]
mod disconnect;
#[cfg(test)]
mod join_requests;
#[cfg(test)]
mod presence_updates;

use env_logger::Env;
use mock_backend::{ManualClock, MockBackend, MockHandle};
use social_presence::{Config, PresenceSession};
use std::sync::Arc;
use std::time::Duration;

/// Connects a session to a fresh mock backend, driven by a manual clock.
pub fn start_session() -> (PresenceSession, MockHandle, Arc<ManualClock>) {
    let _ = env_logger::Builder::from_env(Env::default().default_filter_or("trace"))
        .is_test(true)
        .try_init();

    let (backend, handle) = MockBackend::new();
    let clock = Arc::new(ManualClock::default());
    let session = PresenceSession::new(Config::default(), Box::new(backend), clock.clone())
        .expect("Mock backend refused to connect");

    (session, handle, clock)
}

/// Long enough for the next tick to flush a pending update.
pub const PAST_UPDATE_INTERVAL: Duration = Duration::from_secs(11);
