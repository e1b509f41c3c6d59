use std::env;

use serde::{Deserialize, Serialize};

use self::anki::AnkiConfig;
use self::dictionary::{WebDictionary, default_dictionaries};
use self::gesture::GestureConfig;
use self::lookup::LookupConfig;
use self::network::NetworkConfig;
use self::panel::PanelConfig;

pub mod anki;
pub mod dictionary;
pub mod gesture;
pub mod lookup;
pub mod network;
pub mod panel;

fn default_channel_capacity() -> usize {
    256
}

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(default)]
pub struct Config {
    pub network: NetworkConfig,
    pub lookup: LookupConfig,
    pub gesture: GestureConfig,
    pub panel: PanelConfig,
    pub anki: AnkiConfig,
    #[serde(default = "default_dictionaries")]
    pub dictionaries: Vec<WebDictionary>,

    /// Capacity of the host and worker channels
    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            network: NetworkConfig::default(),
            lookup: LookupConfig::default(),
            gesture: GestureConfig::default(),
            panel: PanelConfig::default(),
            anki: AnkiConfig::default(),
            dictionaries: default_dictionaries(),
            channel_capacity: default_channel_capacity(),
        }
    }
}

impl Config {
    /// Defaults overridden by the environment
    pub fn new() -> Self {
        let mut config = Self::default();
        config.apply_env();
        config
    }

    pub fn apply_env(&mut self) {
        self.network.apply_env();
        self.anki.apply_env();

        if let Some(cooldown) = env::var("YOMU_COOLDOWN_MS")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            self.lookup.cooldown_ms = cooldown;
        }

        if let Some(capacity) = env::var("YOMU_CHANNEL_CAPACITY")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            self.channel_capacity = capacity;
        }
    }
}
