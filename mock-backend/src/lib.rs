//! Scripted stand-in for a social network, used to test the presence plugin without a running client.

mod manual_clock;
mod mock_backend;

pub use manual_clock::ManualClock;
pub use mock_backend::{BackendCall, MockBackend, MockHandle};
