use bson::doc;
use mongodb::{error::ErrorKind, options::ClientOptions, Client};
use std::time::Duration;
use validator::Validate;

use crate::config::optional_var;
use crate::error::{CleanupError, CleanupResult};

pub const DEFAULT_DATABASES: [&str; 5] = ["inventory", "order", "payment", "product", "auth"];
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

const APP_NAME: &str = "store-sweeper";

#[derive(Debug, Clone, Validate)]
pub struct DatabaseConfig {
    #[validate(length(min = 1, message = "MONGODB_URI cannot be empty"))]
    pub uri: String,
    #[validate(length(min = 1, message = "At least one database must be targeted"))]
    pub databases: Vec<String>,
    pub timeout: Duration,
}

impl DatabaseConfig {
    pub fn from_env() -> CleanupResult<Self> {
        Self::from_vars(optional_var("MONGODB_URI"), optional_var("WIPE_DATABASES"))
    }

    pub fn from_vars(uri: Option<String>, databases: Option<String>) -> CleanupResult<Self> {
        let uri = uri.ok_or(CleanupError::MissingConfig("MONGODB_URI"))?;

        let databases = match databases {
            Some(list) => list
                .split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(String::from)
                .collect(),
            None => DEFAULT_DATABASES.iter().map(|name| name.to_string()).collect(),
        };

        let config = Self {
            uri,
            databases,
            timeout: CONNECT_TIMEOUT,
        };
        config
            .validate()
            .map_err(|e| CleanupError::InvalidConfig(e.to_string()))?;

        Ok(config)
    }

    pub fn redacted_host(&self) -> String {
        let rest = self.uri.split_once("://").map_or(self.uri.as_str(), |(_, r)| r);
        let rest = rest.rsplit_once('@').map_or(rest, |(_, host)| host);
        rest.split(['/', '?']).next().unwrap_or_default().to_string()
    }
}

/// Builds a client and checks the deployment answers within the configured
/// timeout. Nothing destructive happens before this returns.
pub async fn connect(config: &DatabaseConfig) -> CleanupResult<Client> {
    let mut options = ClientOptions::parse(&config.uri).await.map_err(|e| {
        if matches!(*e.kind, ErrorKind::InvalidArgument { .. }) {
            CleanupError::InvalidConfig(e.to_string())
        } else {
            connection_error(e)
        }
    })?;
    options.server_selection_timeout = Some(config.timeout);
    options.connect_timeout = Some(config.timeout);
    options.app_name = Some(APP_NAME.to_string());

    let client = Client::with_options(options).map_err(connection_error)?;

    client
        .database("admin")
        .run_command(doc! { "ping": 1 })
        .await
        .map_err(connection_error)?;

    tracing::info!(host = %config.redacted_host(), "connected to MongoDB");
    Ok(client)
}

fn connection_error(err: mongodb::error::Error) -> CleanupError {
    CleanupError::Connection {
        store: "MongoDB",
        source: err.into(),
    }
}
