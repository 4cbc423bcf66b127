use std::time::{Instant, SystemTime, UNIX_EPOCH};

/// Source of time for the update scheduler and the join request table.
///
/// [now][Clock::now] drives every interval check, [unix_time][Clock::unix_time] only stamps
/// the session start shown by the social network.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;

    /// Seconds since the Unix epoch.
    fn unix_time(&self) -> i64;
}

/// The wall clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn unix_time(&self) -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_secs() as i64)
            .unwrap_or_default()
    }
}
