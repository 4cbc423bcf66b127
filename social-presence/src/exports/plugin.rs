use crate::clock::SystemClock;
use crate::config::Config;
use crate::discord::backend::DiscordBackend;
use crate::enums::join_reply::JoinReply;
use crate::errors::sdk_error::SdkError;
use crate::exports::c_api::SOCIAL_PLUGIN_API_VERSION;
use crate::host_handler::HostHandler;
use crate::models::join_token::JoinToken;
use crate::session::PresenceSession;
use log::error;
use std::sync::{Arc, Mutex};

/// The plugin as seen from the foreign language bindings. Wraps a [PresenceSession] and delivers its events to a
/// [HostHandler].
#[derive(uniffi::Object)]
pub struct SocialPlugin {
    session: Mutex<PresenceSession>,
    handler: Arc<dyn HostHandler>,
}

#[uniffi::export]
impl SocialPlugin {
    /// Connects to Discord. Fails if `api_version` isn't the one this library implements.
    #[uniffi::constructor]
    pub fn new(
        api_version: i32,
        config: Config,
        handler: Arc<dyn HostHandler>,
    ) -> Result<Self, SdkError> {
        if api_version != SOCIAL_PLUGIN_API_VERSION {
            return Err(SdkError::VersionMismatch);
        }

        let backend = DiscordBackend::new(config.application_id.clone());
        let session = PresenceSession::new(config, Box::new(backend), Arc::new(SystemClock))?;
        Ok(Self::with_session(session, handler))
    }

    /// Expires join requests, pushes the presence if due and delivers inbound notifications to the handler.
    pub fn tick(&self) {
        let events = self.with(|session| session.tick()).unwrap_or_default();
        for event in events {
            self.handler.handle(event);
        }
    }

    pub fn enter_singleplayer(&self) {
        self.with(|session| session.enter_singleplayer());
    }

    pub fn enter_multiplayer(&self, server_name: String, join_secret: String) {
        self.with(|session| session.enter_multiplayer(&server_name, &join_secret));
    }

    pub fn enter_company(&self, company_name: String, company_id: i32) {
        self.with(|session| session.enter_company(&company_name, company_id));
    }

    pub fn enter_spectate(&self) {
        self.with(|session| session.enter_spectate());
    }

    pub fn exit_gameplay(&self) {
        self.with(|session| session.exit_gameplay());
    }

    /// Answers a join request. Returns false if the request was already answered or has expired.
    pub fn respond_join_request(&self, token: JoinToken, response: JoinReply) -> bool {
        self.with(|session| session.respond_join_request(token, response))
            .unwrap_or(false)
    }

    pub fn is_connected(&self) -> bool {
        self.with(|session| session.is_connected()).unwrap_or(false)
    }

    /// Disconnects. Every other method becomes a no-op.
    pub fn shutdown(&self) {
        self.with(|session| session.shutdown());
    }
}

impl SocialPlugin {
    /// Wraps an already connected session, e.g. one using a different backend.
    pub fn with_session(session: PresenceSession, handler: Arc<dyn HostHandler>) -> Self {
        Self {
            session: Mutex::new(session),
            handler,
        }
    }

    fn with<T>(&self, f: impl FnOnce(&mut PresenceSession) -> T) -> Option<T> {
        match self.session.lock() {
            Ok(mut session) => Some(f(&mut session)),
            Err(error) => {
                error!("{error}");
                None
            }
        }
    }
}

