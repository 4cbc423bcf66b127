use crate::discord::commands::{ACTIVITY_JOIN, ACTIVITY_JOIN_REQUEST};
use crate::enums::inbound_event::InboundEvent;
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
struct Frame {
    cmd: Option<String>,
    evt: Option<String>,
    #[serde(default)]
    data: Value,
}

#[derive(Debug, Deserialize)]
struct User {
    id: String,
    username: String,
    #[serde(default)]
    global_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct JoinRequestData {
    user: User,
}

#[derive(Debug, Deserialize)]
struct JoinData {
    secret: String,
}

#[derive(Debug, Deserialize)]
struct ErrorData {
    #[serde(default)]
    code: i64,
    #[serde(default)]
    message: String,
}

/// Turns a DISPATCH frame we subscribed to into an inbound event. Everything else is `None`.
pub(crate) fn into_inbound_event(payload: &Value) -> Option<InboundEvent> {
    let frame = Frame::deserialize(payload).ok()?;
    if frame.cmd.as_deref() != Some("DISPATCH") {
        return None;
    }

    match frame.evt.as_deref()? {
        ACTIVITY_JOIN_REQUEST => {
            let data = JoinRequestData::deserialize(frame.data).ok()?;
            let display_name = data
                .user
                .global_name
                .filter(|name| !name.is_empty())
                .unwrap_or(data.user.username);

            Some(InboundEvent::JoinRequest {
                remote_user_id: data.user.id,
                display_name,
            })
        }

        ACTIVITY_JOIN => {
            let data = JoinData::deserialize(frame.data).ok()?;
            Some(InboundEvent::JoinAccepted {
                join_secret: data.secret,
            })
        }

        _ => None,
    }
}

/// The error Discord answered a command with, if any.
pub(crate) fn into_error(payload: &Value) -> Option<String> {
    let frame = Frame::deserialize(payload).ok()?;
    if frame.evt.as_deref() != Some("ERROR") {
        return None;
    }

    let error = ErrorData::deserialize(frame.data).ok()?;
    Some(format!("{} ({})", error.message, error.code))
}
