use reqwest::StatusCode;

/// Catalog failure taxonomy. Everything here is locally recoverable: a
/// configuration error aborts the operation, transport and protocol errors
/// leave local state unchanged and permit retry, and malformed payloads
/// degrade to empty data at the call site.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("catalog API key not configured (set TMDB_API_KEY or run `flicklog config set-key`)")]
    MissingApiKey,

    #[error("catalog request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("catalog returned HTTP {0}")]
    Status(StatusCode),

    #[error("catalog error: {0}")]
    Api(String),

    #[error("malformed catalog response: {0}")]
    Malformed(String),
}

impl CatalogError {
    /// Configuration errors are not worth retrying until the user acts.
    pub fn is_configuration(&self) -> bool {
        matches!(self, CatalogError::MissingApiKey)
    }
}
