use crate::enums::inbound_event::InboundEvent;
use crate::enums::join_reply::JoinReply;
use crate::errors::backend_error::BackendError;
use crate::models::presence::Presence;

/// A social network the presence is published to. [PresenceSession][crate::session::PresenceSession] holds
/// one and calls it only from the host's thread.
///
/// Backends do their network I/O elsewhere and queue whatever arrives until the next [pump][PresenceBackend::pump].
pub trait PresenceBackend: Send {
    /// Returns the name of this backend, for logging.
    fn name(&self) -> &'static str;

    fn connect(&mut self) -> Result<(), BackendError>;

    fn update_presence(&mut self, presence: &Presence) -> Result<(), BackendError>;

    fn clear_presence(&mut self) -> Result<(), BackendError>;

    /// Answers a join request from the given remote user.
    fn reply(&mut self, remote_user_id: &str, reply: JoinReply) -> Result<(), BackendError>;

    /// Drains the inbound notifications queued since the last call. An error means the connection is gone.
    fn pump(&mut self) -> Result<Vec<InboundEvent>, BackendError>;

    /// Releases the connection. Nothing else is called afterwards.
    fn disconnect(&mut self);
}
