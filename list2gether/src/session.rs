//! Client construction with a choice of credential storage.
//!
//! Applications create one [`ApiClient`] at startup and share it. Credentials live either
//! in memory (lost on exit) or in a JSON file that survives restarts.

use list2gether_client::{ApiClient, ClientConfig, ClientResult};
use list2gether_core::{
    AuthEvents, CredentialStore, JsonFileStore, KeyValueStore, MemoryStore, Preferences,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// Environment variable naming the credential file used by [`from_env`].
pub const CREDENTIALS_PATH_ENV: &str = "LIST2GETHER_CREDENTIALS_PATH";

/// A client whose credentials are kept in memory.
pub fn in_memory(config: ClientConfig) -> ClientResult<ApiClient> {
    with_store(config, Arc::new(MemoryStore::new()))
}

/// A client whose credentials are kept in a JSON file at `path`.
pub fn persistent(config: ClientConfig, path: impl Into<PathBuf>) -> ClientResult<ApiClient> {
    let store = JsonFileStore::open(path)?;
    info!(path = %store.path().display(), "Using credential file");
    with_store(config, Arc::new(store))
}

/// A client configured from the environment.
///
/// Reads the base URL and timeout through [`ClientConfig::from_env`]. Credentials go to
/// the file named by `LIST2GETHER_CREDENTIALS_PATH`, or stay in memory when it is unset.
pub fn from_env() -> ClientResult<ApiClient> {
    let config = ClientConfig::from_env();
    match std::env::var(CREDENTIALS_PATH_ENV) {
        Ok(path) if !path.trim().is_empty() => persistent(config, path.trim()),
        _ => in_memory(config),
    }
}

/// A client over any key-value store.
pub fn with_store(config: ClientConfig, store: Arc<dyn KeyValueStore>) -> ClientResult<ApiClient> {
    let credentials = CredentialStore::new(store, AuthEvents::new());
    ApiClient::new(config, credentials)
}

/// UI preferences stored alongside the client's credentials.
pub fn preferences(client: &ApiClient) -> Preferences {
    Preferences::new(client.credentials().store().clone())
}
