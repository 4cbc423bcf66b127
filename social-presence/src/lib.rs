//! Rich presence for game hosts. Tells a social network what the player is doing and lets friends ask to join,
//! currently through a locally running Discord client.
//!
//! Hosts written in C load the library dynamically and call `SocialInit`, see [exports::c_api]. From Rust, build a
//! [PresenceSession] and tick it regularly:
//! ```no_run
//! use social_presence::{Config, PresenceSession, SystemClock};
//! use social_presence::discord::backend::DiscordBackend;
//! use std::sync::Arc;
//!
//! let config = Config::default();
//! let backend = DiscordBackend::new(config.application_id.clone());
//! let mut session = PresenceSession::new(config, Box::new(backend), Arc::new(SystemClock)).unwrap();
//!
//! session.enter_multiplayer("Alice's Server", "cookie123");
//! loop {
//!     for event in session.tick() {
//!         // Show join requests, connect to accepted games...
//!     }
//!     std::thread::sleep(std::time::Duration::from_millis(100));
//! }
//! ```
//! # Bindings
//! Bindings for Kotlin and Swift can be generated with
//! [UniFFI](https://mozilla.github.io/uniffi-rs/latest/tutorial/foreign_language_bindings.html#multi-crate-workspaces),
//! they expose [SocialPlugin] and the [HostHandler] trait.

pub mod backend;
pub mod clock;
pub mod config;
pub mod discord;
pub mod enums;
pub mod errors;
pub mod exports;
pub mod host_handler;
pub mod join_requests;
pub mod logging;
pub mod models;
pub mod session;

uniffi::setup_scaffolding!();

pub use backend::PresenceBackend;
pub use clock::{Clock, SystemClock};
pub use config::Config;
pub use enums::activity_kind::ActivityKind;
pub use enums::host_event::HostEvent;
pub use enums::inbound_event::InboundEvent;
pub use enums::join_reply::JoinReply;
pub use errors::backend_error::BackendError;
pub use errors::sdk_error::SdkError;
pub use exports::plugin::SocialPlugin;
pub use host_handler::HostHandler;
pub use join_requests::{JOIN_REQUEST_CAPACITY, JoinRequestTable};
pub use models::join_token::JoinToken;
pub use models::presence::Presence;
pub use session::PresenceSession;
