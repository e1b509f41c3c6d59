mod http;

pub use http::{HttpLookupService, parse_lookup_result, parse_translation};

use yomu_types::{LookupRequest, LookupResult};

/// Remote recognition and translation provider
#[async_trait::async_trait]
pub trait LookupService: Send + Sync {
    /// Recognize the text around the focus point of an encoded region
    async fn recognize(&self, request: &LookupRequest) -> Result<LookupResult, ServiceError>;

    /// Translation of the most recently recognized text
    async fn fetch_translation(&self) -> Result<String, ServiceError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("HTTP {0}")]
    Status(u16),

    #[error("Malformed response: {0}")]
    Malformed(String),

    #[error("Server address is not configured")]
    NotConfigured,
}
