/// Errors a presence backend might report.
#[derive(Debug, uniffi::Error, thiserror::Error)]
pub enum BackendError {
    #[error("The social network client is not running")]
    NotRunning,
    #[error("Could not create runtime")]
    CouldNotCreateRuntime,
    #[error("Lost connection to the social network client")]
    Disconnected,
    #[error("Error transmitting data")]
    TransmittingError,
    #[error("Error receiving data")]
    ReceivingError,
}
