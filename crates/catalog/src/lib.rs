//! Device catalog providers.
//!
//! Provides the `CatalogSource` trait and its file-cache and HTTP
//! implementations. The scoring engine only ever sees the records; where
//! they came from is decided here.

use std::future::Future;
use std::path::PathBuf;
use std::time::Duration;

use specrank_model::SmartPrixRecord;
use thiserror::Error;

/// Errors from catalog operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Connection failed: {0}")]
    Connection(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Parse error: {0}")]
    ParseError(String),
}

/// Trait for catalog sources (file cache, HTTP, etc.)
pub trait CatalogSource {
    /// Load every record the source holds.
    fn load(&self) -> impl Future<Output = Result<Vec<SmartPrixRecord>, CatalogError>> + Send;

    /// Check the source is reachable.
    fn health_check(&self) -> impl Future<Output = Result<(), CatalogError>> + Send;

    /// Get the source name for logging.
    fn name(&self) -> &'static str;
}

/// Parse a catalog document.
///
/// Accepts a top-level array of records or an object with a `products`
/// array. Records that fail to deserialize are skipped.
pub fn parse_catalog(document: serde_json::Value) -> Result<Vec<SmartPrixRecord>, CatalogError> {
    let items = match document {
        serde_json::Value::Array(items) => items,
        serde_json::Value::Object(mut map) => match map.remove("products") {
            Some(serde_json::Value::Array(items)) => items,
            _ => {
                return Err(CatalogError::ParseError(
                    "Missing products array".to_string(),
                ))
            }
        },
        _ => {
            return Err(CatalogError::ParseError(
                "Catalog must be an array or an object".to_string(),
            ))
        }
    };

    let total = items.len();
    let records: Vec<SmartPrixRecord> = items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match serde_json::from_value(item) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!(index, error = %e, "Skipping malformed catalog record");
                None
            }
        })
        .collect();

    tracing::debug!(total, loaded = records.len(), "Parsed catalog");

    Ok(records)
}

/// File-backed catalog configuration.
#[derive(Debug, Clone)]
pub struct FileCatalogConfig {
    /// Path to the JSON cache file
    pub path: PathBuf,
}

impl Default for FileCatalogConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("data/devices.json"),
        }
    }
}

/// Catalog read from a JSON cache file.
#[derive(Debug, Clone)]
pub struct FileCatalog {
    config: FileCatalogConfig,
}

impl FileCatalog {
    pub fn new(config: FileCatalogConfig) -> Self {
        Self { config }
    }

    pub fn path(&self) -> &PathBuf {
        &self.config.path
    }

    async fn read(&self) -> Result<String, CatalogError> {
        tokio::fs::read_to_string(&self.config.path)
            .await
            .map_err(|source| CatalogError::Io {
                path: self.config.path.clone(),
                source,
            })
    }
}

impl CatalogSource for FileCatalog {
    async fn load(&self) -> Result<Vec<SmartPrixRecord>, CatalogError> {
        tracing::debug!(path = %self.config.path.display(), "Reading catalog file");

        let text = self.read().await?;
        let document: serde_json::Value =
            serde_json::from_str(&text).map_err(|e| CatalogError::ParseError(e.to_string()))?;

        parse_catalog(document)
    }

    async fn health_check(&self) -> Result<(), CatalogError> {
        tokio::fs::metadata(&self.config.path)
            .await
            .map(|_| ())
            .map_err(|source| CatalogError::Io {
                path: self.config.path.clone(),
                source,
            })
    }

    fn name(&self) -> &'static str {
        "file"
    }
}

/// HTTP catalog configuration.
#[derive(Debug, Clone)]
pub struct HttpCatalogConfig {
    /// URL returning the catalog document
    pub url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for HttpCatalogConfig {
    fn default() -> Self {
        Self {
            url: "http://127.0.0.1:8080/devices.json".to_string(),
            timeout_secs: 30,
        }
    }
}

/// Catalog fetched as a JSON document over HTTP.
pub struct HttpCatalog {
    config: HttpCatalogConfig,
    client: reqwest::Client,
}

impl HttpCatalog {
    pub fn new(config: HttpCatalogConfig) -> Result<Self, CatalogError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| CatalogError::Connection(e.to_string()))?;

        Ok(Self { config, client })
    }

    pub fn url(&self) -> &str {
        &self.config.url
    }

    async fn get(&self) -> Result<reqwest::Response, CatalogError> {
        self.client
            .get(&self.config.url)
            .send()
            .await
            .map_err(|e| CatalogError::Connection(e.to_string()))
    }
}

impl CatalogSource for HttpCatalog {
    async fn load(&self) -> Result<Vec<SmartPrixRecord>, CatalogError> {
        tracing::debug!(url = %self.config.url, "Fetching catalog");

        let response = self.get().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(CatalogError::RequestFailed(format!(
                "HTTP {}: {}",
                status, body
            )));
        }

        let document: serde_json::Value = response
            .json()
            .await
            .map_err(|e| CatalogError::ParseError(e.to_string()))?;

        parse_catalog(document)
    }

    async fn health_check(&self) -> Result<(), CatalogError> {
        let response = self.get().await?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(CatalogError::RequestFailed(format!(
                "HTTP {}",
                response.status()
            )))
        }
    }

    fn name(&self) -> &'static str {
        "http"
    }
}

/// A catalog chosen from a location string.
pub enum Catalog {
    File(FileCatalog),
    Http(HttpCatalog),
}

impl Catalog {
    /// `http://` and `https://` locations are fetched, anything else is a path.
    pub fn from_location(location: &str) -> Result<Self, CatalogError> {
        if location.starts_with("http://") || location.starts_with("https://") {
            let config = HttpCatalogConfig {
                url: location.to_string(),
                ..Default::default()
            };
            Ok(Self::Http(HttpCatalog::new(config)?))
        } else {
            Ok(Self::File(FileCatalog::new(FileCatalogConfig {
                path: PathBuf::from(location),
            })))
        }
    }
}

impl CatalogSource for Catalog {
    async fn load(&self) -> Result<Vec<SmartPrixRecord>, CatalogError> {
        match self {
            Self::File(source) => source.load().await,
            Self::Http(source) => source.load().await,
        }
    }

    async fn health_check(&self) -> Result<(), CatalogError> {
        match self {
            Self::File(source) => source.health_check().await,
            Self::Http(source) => source.health_check().await,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Self::File(source) => source.name(),
            Self::Http(source) => source.name(),
        }
    }
}
