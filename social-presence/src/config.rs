use log::{info, warn};
use serde::Deserialize;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::time::Duration;
use std::{env, fs};

/// Environment variable pointing at an optional JSON configuration file.
pub const CONFIG_PATH_ENV: &str = "SOCIAL_PRESENCE_CONFIG";

const DEFAULT_APPLICATION_ID: &str = "603602960886530062";
const DEFAULT_LARGE_IMAGE_KEY: &str = "openttd_512";
const DEFAULT_UPDATE_INTERVAL_SECS: u64 = 10;
const DEFAULT_JOIN_REQUEST_TIMEOUT_SECS: u64 = 10 * 60;

/// Runtime settings of the plugin. Every field is optional in the JSON file.
#[derive(Debug, Clone, PartialEq, Deserialize, uniffi::Record)]
#[serde(default)]
pub struct Config {
    /// Application identifier registered with the social network.
    pub application_id: String,
    /// Asset key of the large image shown next to the presence.
    pub large_image_key: String,
    /// Minimum spacing between two presence pushes.
    pub update_interval_secs: u64,
    /// Age after which an unanswered join request is dropped.
    pub join_request_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            application_id: DEFAULT_APPLICATION_ID.to_string(),
            large_image_key: DEFAULT_LARGE_IMAGE_KEY.to_string(),
            update_interval_secs: DEFAULT_UPDATE_INTERVAL_SECS,
            join_request_timeout_secs: DEFAULT_JOIN_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl Config {
    /// Loads the file named by [CONFIG_PATH_ENV], falling back to the defaults when the variable is unset or the
    /// file can't be used.
    pub fn load() -> Self {
        let Some(path) = env::var_os(CONFIG_PATH_ENV).map(PathBuf::from) else {
            return Self::default();
        };

        match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str::<Config>(&contents) {
                Ok(config) => {
                    info!("Loaded configuration from {}", path.display());
                    config
                }

                Err(error) => {
                    warn!(
                        "Could not parse {}, falling back to defaults: {error}",
                        path.display()
                    );
                    Self::default()
                }
            },

            Err(error) if error.kind() == ErrorKind::NotFound => {
                info!("{} not found, using defaults", path.display());
                Self::default()
            }

            Err(error) => {
                warn!(
                    "Could not read {}, falling back to defaults: {error}",
                    path.display()
                );
                Self::default()
            }
        }
    }

    pub fn update_interval(&self) -> Duration {
        Duration::from_secs(self.update_interval_secs)
    }

    pub fn join_request_timeout(&self) -> Duration {
        Duration::from_secs(self.join_request_timeout_secs)
    }
}
