use crate::backend::PresenceBackend;
use crate::clock::Clock;
use crate::config::Config;
use crate::enums::host_event::HostEvent;
use crate::enums::inbound_event::InboundEvent;
use crate::enums::join_reply::JoinReply;
use crate::errors::backend_error::BackendError;
use crate::errors::sdk_error::SdkError;
use crate::join_requests::JoinRequestTable;
use crate::models::join_token::JoinToken;
use crate::models::presence::Presence;
use log::{debug, info, trace, warn};
use std::sync::Arc;
use std::time::Instant;

/// Everything one connection to a social network needs: the backend, the desired presence and the pending
/// join requests. All entry points are no-ops once the connection is gone.
///
/// Lifecycle calls only change the presence and mark it dirty, the presence is pushed by [tick][PresenceSession::tick]
/// at most once per [update interval][Config::update_interval].
pub struct PresenceSession {
    config: Config,
    backend: Option<Box<dyn PresenceBackend>>,
    clock: Arc<dyn Clock>,
    presence: Presence,
    join_requests: JoinRequestTable,
    needs_update: bool,
    last_update_at: Instant,
    pending_events: Vec<HostEvent>,
}

impl PresenceSession {
    /// Connects the backend and returns a new session.
    pub fn new(
        config: Config,
        mut backend: Box<dyn PresenceBackend>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, SdkError> {
        if let Err(error) = backend.connect() {
            warn!("Could not connect to {}: {error}", backend.name());
            return Err(error.into());
        }

        info!("Connected to {}", backend.name());
        Ok(Self {
            presence: Presence::new(config.large_image_key.clone()),
            last_update_at: clock.now(),
            config,
            backend: Some(backend),
            clock,
            join_requests: JoinRequestTable::new(),
            needs_update: false,
            pending_events: Vec::new(),
        })
    }

    pub fn is_connected(&self) -> bool {
        self.backend.is_some()
    }

    /// The presence that will be pushed on the next flush.
    pub fn presence(&self) -> &Presence {
        &self.presence
    }

    pub fn needs_update(&self) -> bool {
        self.needs_update
    }

    pub fn pending_join_requests(&self) -> usize {
        self.join_requests.len()
    }

    pub fn enter_singleplayer(&mut self) {
        if !self.is_connected() {
            return;
        }

        debug!("Entering singleplayer");
        self.presence.enter_singleplayer(self.clock.unix_time());
        self.needs_update = true;
    }

    pub fn enter_multiplayer(&mut self, server_name: &str, join_secret: &str) {
        if !self.is_connected() {
            return;
        }

        debug!("Entering multiplayer on {server_name}");
        self.presence
            .enter_multiplayer(server_name, join_secret, self.clock.unix_time());
        self.needs_update = true;
    }

    /// `company_id` isn't shown anywhere yet.
    pub fn enter_company(&mut self, company_name: &str, company_id: i32) {
        if !self.is_connected() {
            return;
        }

        if self.presence.enter_company(company_name) {
            debug!("Entering company {company_id}: {company_name}");
            self.needs_update = true;
        }
    }

    pub fn enter_spectate(&mut self) {
        if !self.is_connected() {
            return;
        }

        if self.presence.enter_spectate() {
            debug!("Spectating");
            self.needs_update = true;
        }
    }

    pub fn exit_gameplay(&mut self) {
        if !self.is_connected() {
            return;
        }

        debug!("Exiting gameplay");
        self.presence.exit_gameplay();
        self.needs_update = true;
    }

    /// Answers a pending join request. Returns false without doing anything if the token was already answered
    /// or has expired.
    pub fn respond_join_request(&mut self, token: JoinToken, reply: JoinReply) -> bool {
        let Some(backend) = self.backend.as_mut() else {
            return false;
        };

        let Some(request) = self.join_requests.take(token) else {
            trace!("Ignoring response to stale join request {token:?}");
            return false;
        };

        debug!("Replying {reply:?} to join request from {}", request.remote_user_id);
        if let Err(error) = backend.reply(&request.remote_user_id, reply) {
            self.tear_down(error);
        }

        true
    }

    /// Runs one scheduler step: expires old join requests, flushes the presence if due, then pumps the backend.
    /// Returns the notifications for the host in the order they happened.
    pub fn tick(&mut self) -> Vec<HostEvent> {
        if !self.is_connected() {
            return Vec::new();
        }

        let now = self.clock.now();
        self.expire_join_requests(now);

        if let Err(error) = self.flush_presence(now) {
            self.tear_down(error);
            return std::mem::take(&mut self.pending_events);
        }

        if let Err(error) = self.pump() {
            self.tear_down(error);
        }

        std::mem::take(&mut self.pending_events)
    }

    /// Releases the connection and drops pending join requests without answering them.
    pub fn shutdown(&mut self) {
        let Some(mut backend) = self.backend.take() else {
            return;
        };

        let dropped = self.join_requests.clear();
        info!(
            "Disconnecting from {}, dropping {dropped} pending join requests",
            backend.name()
        );
        backend.disconnect();
        self.needs_update = false;
    }

    fn tear_down(&mut self, error: BackendError) {
        warn!("Presence backend failed, shutting down: {error}");
        self.shutdown();
    }

    fn expire_join_requests(&mut self, now: Instant) {
        let timeout = self.config.join_request_timeout();
        for token in self.join_requests.expire(now, timeout) {
            debug!("Join request {token:?} timed out");
            self.pending_events
                .push(HostEvent::JoinRequestCancelled { token });
        }
    }

    fn flush_presence(&mut self, now: Instant) -> Result<(), BackendError> {
        if !self.needs_update
            || now.saturating_duration_since(self.last_update_at) <= self.config.update_interval()
        {
            return Ok(());
        }

        let Some(backend) = self.backend.as_mut() else {
            return Ok(());
        };

        self.last_update_at = now;
        self.needs_update = false;

        if self.presence.in_game {
            trace!("Pushing presence {:?}", self.presence);
            backend.update_presence(&self.presence)
        } else {
            trace!("Clearing presence");
            backend.clear_presence()
        }
    }

    /// A failed auto-decline still lets the rest of the batch through, so an accepted invite that arrived with it
    /// reaches the host before the teardown. Join requests after the failure are dropped.
    fn pump(&mut self) -> Result<(), BackendError> {
        let Some(backend) = self.backend.as_mut() else {
            return Ok(());
        };

        let mut result = Ok(());
        for event in backend.pump()? {
            match event {
                InboundEvent::JoinRequest {
                    remote_user_id,
                    display_name,
                } => {
                    if result.is_err() {
                        debug!("Dropping join request from {display_name}, the connection failed");
                        continue;
                    }

                    result = self.admit_join_request(remote_user_id, display_name);
                }

                InboundEvent::JoinAccepted { join_secret } => {
                    debug!("Joining game from an accepted invite");
                    self.pending_events
                        .push(HostEvent::JoinRequestedGame { join_secret });
                }
            }
        }

        result
    }

    fn admit_join_request(
        &mut self,
        remote_user_id: String,
        display_name: String,
    ) -> Result<(), BackendError> {
        let now = self.clock.now();
        match self.join_requests.admit(remote_user_id.clone(), now) {
            Some(token) => {
                debug!("Join request {token:?} from {display_name}");
                self.pending_events.push(HostEvent::JoinRequest {
                    token,
                    display_name,
                });
                Ok(())
            }

            None => {
                debug!("Too many pending join requests, ignoring {display_name}");
                match self.backend.as_mut() {
                    Some(backend) => backend.reply(&remote_user_id, JoinReply::Ignore),
                    None => Ok(()),
                }
            }
        }
    }
}

impl Drop for PresenceSession {
    fn drop(&mut self) {
        self.shutdown();
    }
}
