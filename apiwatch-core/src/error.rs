use thiserror::Error;

/// Unified error type for apiwatch.
#[derive(Error, Debug)]
pub enum WatchError {
    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Connect failed: {0}")]
    ConnectFailed(String),

    #[error("Connection closed: {0}")]
    ConnectionClosed(String),

    #[error("Auth failed: {0}")]
    AuthFailed(String),

    #[error("Command failed: {0}")]
    CommandFailed(String),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Internal: {0}")]
    Internal(String),
}

impl WatchError {
    /// True when the engine keeps processing after this error: a bad
    /// frame or failed command never takes down the session.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            WatchError::Decode(_) | WatchError::CommandFailed(_) | WatchError::AuthFailed(_)
        )
    }
}
