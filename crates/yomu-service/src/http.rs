use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use yomu_config::network::NetworkConfig;
use yomu_types::{LookupRequest, LookupResult};

use crate::{LookupService, ServiceError};

/// Client for the `/ocr` and `/get_translation` endpoints
#[derive(Clone)]
pub struct HttpLookupService {
    client: reqwest::Client,
    config: NetworkConfig,
}

impl HttpLookupService {
    pub fn new(config: NetworkConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    fn ensure_configured(&self) -> Result<(), ServiceError> {
        if self.config.is_configured() {
            Ok(())
        } else {
            Err(ServiceError::NotConfigured)
        }
    }
}

#[async_trait]
impl LookupService for HttpLookupService {
    async fn recognize(&self, request: &LookupRequest) -> Result<LookupResult, ServiceError> {
        self.ensure_configured()?;

        let response = self
            .client
            .post(self.config.ocr_url())
            .timeout(Duration::from_secs(self.config.timeout_seconds))
            .json(request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ServiceError::Status(response.status().as_u16()));
        }

        let body = response.text().await?;
        parse_lookup_result(&body)
    }

    async fn fetch_translation(&self) -> Result<String, ServiceError> {
        self.ensure_configured()?;

        let response = self
            .client
            .get(self.config.translation_url())
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ServiceError::Status(response.status().as_u16()));
        }

        let body = response.text().await?;
        parse_translation(&body)
    }
}

pub fn parse_lookup_result(body: &str) -> Result<LookupResult, ServiceError> {
    serde_json::from_str(body).map_err(|e| ServiceError::Malformed(e.to_string()))
}

#[derive(Deserialize)]
struct TranslationResponse {
    #[serde(default)]
    translation: Option<String>,
}

/// A missing or null `translation` reads as empty; only bad JSON is an error
pub fn parse_translation(body: &str) -> Result<String, ServiceError> {
    let response: TranslationResponse =
        serde_json::from_str(body).map_err(|e| ServiceError::Malformed(e.to_string()))?;
    Ok(response.translation.unwrap_or_default())
}
