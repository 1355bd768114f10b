use super::record::Airport;
use async_trait::async_trait;
use std::path::PathBuf;
use strum_macros::Display;

/// Read-only boundary to the persistent airport catalog.
///
/// Every failure mode of a store is recoverable: the directory answers any
/// error (or an empty catalog) with the built-in fallback set, so
/// implementations should report problems honestly instead of papering over
/// them.
#[async_trait]
pub trait AirportStore: Send + Sync {
    /// Loads the full catalog. An empty `Vec` is a valid result and is
    /// treated like an unavailable store by the caller.
    async fn load_catalog(&self) -> Result<Vec<Airport>, StoreError>;
}

#[derive(Debug, Display)]
pub enum StoreError {
    #[strum(to_string = "catalog unreadable: {0}")]
    Unreadable(std::io::Error),
    #[strum(to_string = "catalog malformed: {0}")]
    Malformed(serde_json::Error),
}

impl std::error::Error for StoreError {}

impl From<std::io::Error> for StoreError {
    fn from(value: std::io::Error) -> Self { StoreError::Unreadable(value) }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self { StoreError::Malformed(value) }
}

/// Catalog store backed by a JSON file (an array of airport records).
///
/// Stands in for the database of the full deployment; the file is the same
/// shape the seed data uses. Duplicated records are passed through as-is,
/// the directory layer is responsible for any de-duplication it needs.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: PathBuf) -> Self { Self { path } }
}

#[async_trait]
impl AirportStore for JsonFileStore {
    async fn load_catalog(&self) -> Result<Vec<Airport>, StoreError> {
        let path = self.path.clone();
        let raw = tokio::task::spawn_blocking(move || std::fs::read_to_string(path))
            .await
            .map_err(|e| StoreError::Unreadable(std::io::Error::other(e)))??;
        Ok(serde_json::from_str(&raw)?)
    }
}
