pub mod activity_kind;
pub mod host_event;
pub mod inbound_event;
pub mod join_reply;
