use crate::errors::backend_error::BackendError;

/// General errors the library might return.
#[derive(Debug, uniffi::Error, thiserror::Error)]
pub enum SdkError {
    #[error("The host speaks a different plugin API version")]
    VersionMismatch,
    #[error("The plugin is already initialized")]
    AlreadyInitialized,
    #[error("Could not connect to the social network client")]
    CouldNotConnect,
    #[error("Could not create runtime")]
    CouldNotCreateRuntime,
    #[error("Lost connection to the social network client")]
    Disconnected,
}

impl From<BackendError> for SdkError {
    fn from(error: BackendError) -> Self {
        match error {
            BackendError::NotRunning => SdkError::CouldNotConnect,
            BackendError::CouldNotCreateRuntime => SdkError::CouldNotCreateRuntime,
            BackendError::Disconnected
            | BackendError::TransmittingError
            | BackendError::ReceivingError => SdkError::Disconnected,
        }
    }
}
