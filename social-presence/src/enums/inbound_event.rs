/// Notifications a backend queues up for the next pump.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundEvent {
    /// A remote user asked to join the local user's session.
    JoinRequest {
        remote_user_id: String,
        display_name: String,
    },

    /// The local user is joining someone else's session.
    JoinAccepted { join_secret: String },
}
