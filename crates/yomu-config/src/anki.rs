use std::env;

use serde::{Deserialize, Serialize};

fn default_enabled() -> bool {
    true
}

fn default_url() -> String {
    "http://localhost:8765".to_string()
}

fn default_deck() -> String {
    "Yomu".to_string()
}

fn default_model() -> String {
    "Yomu_Dict_v1".to_string()
}

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(default)]
pub struct AnkiConfig {
    /// Enable Anki integration
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// AnkiConnect URL
    #[serde(default = "default_url")]
    pub url: String,
    /// Created on first export when missing
    #[serde(default = "default_deck")]
    pub deck: String,
    /// Note type, created on first export when missing
    #[serde(default = "default_model")]
    pub model: String,
}

impl Default for AnkiConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            url: default_url(),
            deck: default_deck(),
            model: default_model(),
        }
    }
}

impl AnkiConfig {
    pub fn apply_env(&mut self) {
        if let Ok(url) = env::var("ANKI_CONNECT_URL") {
            self.url = url;
        }
    }
}
