use redis::aio::ConnectionManager;
use std::time::Duration;
use validator::Validate;

use crate::config::{flag_enabled, optional_var};
use crate::error::{CleanupError, CleanupResult};

pub const DEFAULT_KEY_PATTERN: &str = "inventory:event:processed:*";
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Validate)]
pub struct RedisConfig {
    /// `redis://host:port/db`; the logical database index rides in the path.
    #[validate(length(min = 1, message = "REDIS_URI cannot be empty"))]
    pub uri: String,
    #[validate(length(min = 1, message = "Key pattern cannot be empty"))]
    pub pattern: String,
    pub assume_yes: bool,
}

impl RedisConfig {
    pub fn from_env() -> CleanupResult<Self> {
        Self::from_vars(
            optional_var("REDIS_URI"),
            optional_var("PURGE_KEY_PATTERN"),
            optional_var("PURGE_ASSUME_YES"),
        )
    }

    pub fn from_vars(
        uri: Option<String>,
        pattern: Option<String>,
        assume_yes: Option<String>,
    ) -> CleanupResult<Self> {
        let uri = uri.ok_or(CleanupError::MissingConfig("REDIS_URI"))?;

        let config = Self {
            uri,
            pattern: pattern
                .map(|p| p.trim().to_string())
                .unwrap_or_else(|| DEFAULT_KEY_PATTERN.to_string()),
            assume_yes: flag_enabled(assume_yes.as_deref()),
        };
        config
            .validate()
            .map_err(|e| CleanupError::InvalidConfig(e.to_string()))?;

        Ok(config)
    }
}

pub async fn connect(config: &RedisConfig) -> CleanupResult<ConnectionManager> {
    let client = redis::Client::open(config.uri.as_str())
        .map_err(|e| CleanupError::InvalidConfig(e.to_string()))?;

    let mut manager = tokio::time::timeout(CONNECT_TIMEOUT, ConnectionManager::new(client))
        .await
        .map_err(|elapsed| CleanupError::Connection {
            store: "Redis",
            source: elapsed.into(),
        })?
        .map_err(ping_error)?;

    let _: String = redis::cmd("PING")
        .query_async(&mut manager)
        .await
        .map_err(ping_error)?;

    tracing::info!(host = %client_host(&config.uri), "connected to Redis");
    Ok(manager)
}

// Any failure before the store answered PING counts as a connection failure.
fn ping_error(err: redis::RedisError) -> CleanupError {
    CleanupError::Connection {
        store: "Redis",
        source: err.into(),
    }
}

fn client_host(uri: &str) -> &str {
    let rest = uri.split_once("://").map_or(uri, |(_, r)| r);
    rest.rsplit_once('@').map_or(rest, |(_, host)| host)
}
