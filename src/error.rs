//! Error types

use thiserror::Error;

/// Reasons a user action is refused or cannot be applied
#[derive(Debug, Error)]
pub enum BookingError {
    #[error("Please select a travel option before confirming.")]
    MissingTravelSelection,

    #[error("Please complete the registration form first.")]
    RegistrationRequired,

    #[error("Please choose a destination first.")]
    CityRequired,

    #[error("Registration is incomplete: {0} is required")]
    IncompleteRegistration(&'static str),

    #[error("Failed to lock booking state: {0}")]
    StateLock(String),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl BookingError {
    /// Whether the error is a refusal the user can correct, as opposed to an
    /// internal failure
    pub fn is_user_facing(&self) -> bool {
        !matches!(self, BookingError::StateLock(_) | BookingError::Storage(_))
    }
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage I/O failed for key {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize {key}: {source}")]
    Serialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to lock storage: {0}")]
    Lock(String),
}
