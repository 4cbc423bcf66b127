use env_logger::Env;

/// Environment variable holding the log filter, e.g. `social_presence=trace`.
pub const LOG_FILTER_ENV: &str = "SOCIAL_PRESENCE_LOG";

/// Installs the logger for hosts that load the library dynamically. Does nothing if a logger already exists.
pub fn init() {
    let _ = env_logger::Builder::from_env(Env::new().filter_or(LOG_FILTER_ENV, "info")).try_init();
}
