//! MongoDB client construction
//!
//! The driver's `Client` owns its own connection pool and is cheap to clone,
//! so it is built once at startup and shared through the repositories.

use std::time::Duration;

use mongodb::bson::doc;
use mongodb::options::ClientOptions;
use mongodb::{Client, Database};
use tracing::info;

use tracker_common::MongoConfig;
use tracker_core::{DomainError, RepoResult};

use crate::repositories::map_db_error;

/// Build the client and select the configured database
///
/// Connecting is lazy in the driver; the first operation (or [`ping`]) is
/// what actually reaches the server.
pub async fn connect(config: &MongoConfig, app_name: &str) -> RepoResult<Database> {
    let mut options = ClientOptions::parse(&config.uri)
        .await
        .map_err(map_db_error)?;

    options.app_name = Some(app_name.to_string());
    options.server_selection_timeout =
        Some(Duration::from_secs(config.server_selection_timeout_secs));

    let client = Client::with_options(options).map_err(map_db_error)?;
    info!(database = %config.database, "MongoDB client created");

    Ok(client.database(&config.database))
}

/// Round-trip a `ping` command to check the server is reachable
pub async fn ping(database: &Database) -> RepoResult<()> {
    database
        .run_command(doc! { "ping": 1 })
        .await
        .map(|_| ())
        .map_err(|e| DomainError::DatabaseError(format!("ping failed: {e}")))
}
