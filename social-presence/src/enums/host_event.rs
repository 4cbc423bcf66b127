use crate::models::join_token::JoinToken;

/// Notifications for the host, produced while ticking.
#[derive(Debug, Clone, PartialEq, Eq, uniffi::Enum)]
pub enum HostEvent {
    /// A user wants to join. Answer it with the token.
    JoinRequest {
        token: JoinToken,
        display_name: String,
    },

    /// The join request timed out and its token is no longer valid.
    JoinRequestCancelled { token: JoinToken },

    /// The local user accepted an invite or had their join request accepted. Connect with the secret.
    JoinRequestedGame { join_secret: String },
}
