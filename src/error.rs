use thiserror::Error;

#[derive(Error, Debug)]
pub enum CleanupError {
    #[error("{0} must be set")]
    MissingConfig(&'static str),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to connect to {store}: {source}")]
    Connection {
        store: &'static str,
        #[source]
        source: anyhow::Error,
    },

    #[error("MongoDB error: {0}")]
    Mongo(#[from] mongodb::error::Error),

    #[error("Redis error: {0}")]
    Redis(redis::RedisError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to write report: {0}")]
    Report(#[from] serde_json::Error),
}

impl CleanupError {
    pub fn is_connection(&self) -> bool {
        matches!(self, CleanupError::Connection { .. })
    }
}

impl From<redis::RedisError> for CleanupError {
    fn from(err: redis::RedisError) -> Self {
        // Lost or refused connections are reported apart from command errors
        if err.is_connection_refusal() || err.is_connection_dropped() || err.is_timeout() {
            CleanupError::Connection {
                store: "Redis",
                source: err.into(),
            }
        } else {
            CleanupError::Redis(err)
        }
    }
}

pub type CleanupResult<T> = Result<T, CleanupError>;
