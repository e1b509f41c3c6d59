use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::template::CardTemplate;

#[derive(Debug, thiserror::Error)]
pub enum AnkiError {
    #[error("Failed to reach AnkiConnect: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("AnkiConnect error: {0}")]
    Api(String),

    #[error("AnkiConnect returned null result")]
    EmptyResult,
}

impl AnkiError {
    /// Connection refused or timed out, Anki is most likely not running
    pub fn is_unavailable(&self) -> bool {
        matches!(self, AnkiError::Transport(e) if e.is_connect() || e.is_timeout())
    }

    pub fn is_permission(&self) -> bool {
        matches!(self, AnkiError::Api(msg) if msg.to_lowercase().contains("permission"))
    }

    pub fn is_duplicate(&self) -> bool {
        matches!(self, AnkiError::Api(msg) if msg.to_lowercase().contains("duplicate"))
    }
}

#[derive(Clone)]
pub struct AnkiConnectClient {
    base_url: String,
    client: reqwest::Client,
}

impl AnkiConnectClient {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    /// `true` once the user has allowed this client in Anki
    pub async fn request_permission(&self) -> Result<bool, AnkiError> {
        let response: AnkiResponse<PermissionResult> =
            self.invoke("requestPermission", json!({})).await?;
        Ok(response.into_result()?.permission == "granted")
    }

    pub async fn deck_names(&self) -> Result<Vec<String>, AnkiError> {
        let response: AnkiResponse<Vec<String>> = self.invoke("deckNames", json!({})).await?;
        response.into_result()
    }

    pub async fn create_deck(&self, deck: &str) -> Result<u64, AnkiError> {
        let response: AnkiResponse<u64> =
            self.invoke("createDeck", json!({ "deck": deck })).await?;
        response.into_result()
    }

    /// Get list of model (note type) names
    pub async fn model_names(&self) -> Result<Vec<String>, AnkiError> {
        let response: AnkiResponse<Vec<String>> = self.invoke("modelNames", json!({})).await?;
        response.into_result()
    }

    pub async fn create_model(&self, model: &str, template: &CardTemplate) -> Result<(), AnkiError> {
        let params = json!({
            "modelName": model,
            "inOrderFields": template.fields,
            "css": template.css,
            "cardTemplates": [{
                "Name": template.card_name,
                "Front": template.front,
                "Back": template.back
            }]
        });

        let response: AnkiResponse<serde_json::Value> = self.invoke("createModel", params).await?;
        response.into_result().map(|_| ())
    }

    pub async fn find_notes(&self, query: &str) -> Result<Vec<u64>, AnkiError> {
        let response: AnkiResponse<Vec<u64>> =
            self.invoke("findNotes", json!({ "query": query })).await?;
        response.into_result()
    }

    /// Fields are given in the model's field order
    pub async fn add_note(
        &self,
        deck: &str,
        model: &str,
        template: &CardTemplate,
        values: &[String],
    ) -> Result<u64, AnkiError> {
        let fields: serde_json::Map<String, serde_json::Value> = template
            .fields
            .iter()
            .cloned()
            .zip(values.iter().map(|v| json!(v)))
            .collect();

        let params = json!({
            "note": {
                "deckName": deck,
                "modelName": model,
                "fields": fields,
                "options": { "allowDuplicate": false },
                "tags": ["yomu"]
            }
        });

        let response: AnkiResponse<u64> = self.invoke("addNote", params).await?;
        response.into_result()
    }

    /// Invoke an AnkiConnect API action
    async fn invoke<T>(
        &self,
        action: &str,
        params: serde_json::Value,
    ) -> Result<AnkiResponse<T>, AnkiError>
    where
        T: for<'de> Deserialize<'de>,
    {
        let request = AnkiRequest {
            action: action.to_string(),
            version: 6,
            params,
        };
        tracing::debug!("AnkiConnect action: {}", action);

        let response = self
            .client
            .post(&self.base_url)
            .json(&request)
            .send()
            .await?;

        Ok(response.json::<AnkiResponse<T>>().await?)
    }
}

#[derive(Serialize)]
struct AnkiRequest {
    action: String,
    version: u32,
    params: serde_json::Value,
}

#[derive(Deserialize)]
struct AnkiResponse<T> {
    result: Option<T>,
    error: Option<String>,
}

impl<T> AnkiResponse<T> {
    fn into_result(self) -> Result<T, AnkiError> {
        if let Some(error) = self.error {
            return Err(AnkiError::Api(error));
        }

        self.result.ok_or(AnkiError::EmptyResult)
    }
}

#[derive(Deserialize)]
struct PermissionResult {
    permission: String,
}
