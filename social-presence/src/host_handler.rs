use crate::enums::host_event::HostEvent;

/// Receives the notifications produced while ticking. Implemented by the host, either in Rust or through
/// the foreign language bindings.
///
/// Handlers run on the thread that called `tick` and may call back into the plugin.
#[uniffi::export(with_foreign)]
pub trait HostHandler: Send + Sync {
    fn handle(&self, event: HostEvent);
}
