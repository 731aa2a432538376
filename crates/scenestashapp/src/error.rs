use thiserror::Error;

/// A failed API call, reduced to the one message worth showing a user.
///
/// Transport details are gone by the time this is built; see
/// [`crate::client::format_error`] for how the message is chosen.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ApiError {
    message: String,
}

impl ApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

#[derive(Error, Debug)]
pub enum SceneError {
    #[error("{0}")]
    Api(#[from] ApiError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Config error: {0}")]
    Config(String),

    /// A request rejected before anything was sent or stored.
    #[error("{0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, SceneError>;
