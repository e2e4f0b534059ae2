use anyhow::{Context, Result};
use redis::aio::ConnectionManager;

// Shared Redis handle for the token store.
// ConnectionManager multiplexes one connection and is cheap to clone, so a
// single instance is built at startup and cloned into the services.
pub async fn connect_redis(redis_url: &str) -> Result<ConnectionManager> {
    let client = redis::Client::open(redis_url).context("Invalid Redis URL")?;

    let manager = client
        .get_connection_manager()
        .await
        .context("Failed to connect to Redis")?;

    Ok(manager)
}
