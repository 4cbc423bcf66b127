use social_presence::Clock;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// A clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    origin: Instant,
    unix_origin: i64,
    elapsed: Mutex<Duration>,
}

impl ManualClock {
    pub fn new(unix_origin: i64) -> Self {
        Self {
            origin: Instant::now(),
            unix_origin,
            elapsed: Mutex::new(Duration::ZERO),
        }
    }

    pub fn advance(&self, by: Duration) {
        let mut elapsed = self.elapsed.lock().expect("Clock lock poisoned");
        *elapsed += by;
    }

    fn elapsed(&self) -> Duration {
        *self.elapsed.lock().expect("Clock lock poisoned")
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new(1_700_000_000)
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.origin + self.elapsed()
    }

    fn unix_time(&self) -> i64 {
        self.unix_origin + self.elapsed().as_secs() as i64
    }
}
