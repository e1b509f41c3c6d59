use std::env;

use serde::{Deserialize, Serialize};

fn default_timeout_seconds() -> u64 {
    30
}

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(default)]
pub struct NetworkConfig {
    /// Base URL of the recognition server, e.g. `http://192.168.1.2:8000`
    #[serde(default)]
    pub server_url: String,
    /// Applies to the recognition call only
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            server_url: String::new(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

impl NetworkConfig {
    pub fn apply_env(&mut self) {
        if let Ok(url) = env::var("YOMU_SERVER_URL") {
            self.server_url = url;
        }

        if let Some(timeout) = env::var("YOMU_TIMEOUT_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            self.timeout_seconds = timeout;
        }
    }

    pub fn is_configured(&self) -> bool {
        !self.server_url.trim().is_empty()
    }

    pub fn ocr_url(&self) -> String {
        format!("{}/ocr", self.server_url.trim_end_matches('/'))
    }

    pub fn translation_url(&self) -> String {
        format!("{}/get_translation", self.server_url.trim_end_matches('/'))
    }
}
