use crate::enums::activity_kind::ActivityKind;
use crate::enums::join_reply::JoinReply;
use crate::models::presence::Presence;
use discord_rich_presence::activity::{
    Activity, ActivityType, Assets, Party, Secrets, Timestamps,
};
use serde_json::{Value, json};
use sha1_smol::Sha1;

pub(crate) const ACTIVITY_JOIN: &str = "ACTIVITY_JOIN";
pub(crate) const ACTIVITY_JOIN_REQUEST: &str = "ACTIVITY_JOIN_REQUEST";

pub(crate) fn subscribe(event: &str, nonce: u32) -> Value {
    json!({
        "cmd": "SUBSCRIBE",
        "evt": event,
        "args": {},
        "nonce": nonce.to_string()
    })
}

/// Discord has no separate ignore, it's a rejection the requester isn't told about.
pub(crate) fn join_reply(remote_user_id: &str, reply: JoinReply, nonce: u32) -> Value {
    let cmd = match reply {
        JoinReply::Accept => "SEND_ACTIVITY_JOIN_INVITE",
        JoinReply::Reject | JoinReply::Ignore => "CLOSE_ACTIVITY_REQUEST",
    };

    json!({
        "cmd": cmd,
        "args": { "user_id": remote_user_id },
        "nonce": nonce.to_string()
    })
}

/// Discord refuses empty strings, so empty fields are left out.
pub(crate) fn activity(presence: &Presence) -> Activity<'_> {
    let activity_type = match presence.kind {
        ActivityKind::Playing => ActivityType::Playing,
        ActivityKind::Watching => ActivityType::Watching,
    };

    let mut activity = Activity::new()
        .activity_type(activity_type)
        .assets(Assets::new().large_image(presence.large_image_key.as_str()));

    if !presence.details.is_empty() {
        activity = activity.details(presence.details.as_str());
    }

    if let Some(state) = presence.state.as_deref().filter(|state| !state.is_empty()) {
        activity = activity.state(state);
    }

    if let Some(start) = presence.start_timestamp {
        activity = activity.timestamps(Timestamps::new().start(start * 1000));
    }

    // A join secret is only offered for a party
    if !presence.join_secret.is_empty() {
        activity = activity
            .party(Party::new().id(party_id(&presence.join_secret)))
            .secrets(Secrets::new().join(presence.join_secret.as_str()));
    }

    activity
}

/// The party id is public, so it's a digest of the secret rather than the secret itself.
fn party_id(join_secret: &str) -> String {
    Sha1::from(join_secret).digest().to_string()
}
