//! Publishes the presence to a locally running Discord client over its IPC socket.

pub mod backend;
mod commands;
mod event_matcher;

/// Regular JSON frame.
pub(crate) const OP_FRAME: u8 = 1;
pub(crate) const OP_CLOSE: u8 = 2;
pub(crate) const OP_PING: u8 = 3;
pub(crate) const OP_PONG: u8 = 4;
