use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use yomu_config::Config;

/// Profile picked up from the working directory when no path is given
const DEFAULT_PROFILE: &str = "yomu.json";

/// Read a JSON profile; fields it leaves out keep their defaults
pub fn load_profile(path: &Path) -> anyhow::Result<Config> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("Failed to read profile {}", path.display()))?;
    let config = serde_json::from_str(&data)
        .with_context(|| format!("Invalid profile {}", path.display()))?;
    Ok(config)
}

/// Profile (explicit, `yomu.json`, or defaults) with environment overrides on top
pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let mut config = match path {
        Some(path) => {
            tracing::info!("Loading profile {}", path.display());
            load_profile(path)?
        }
        None => {
            let fallback = PathBuf::from(DEFAULT_PROFILE);
            if fallback.exists() {
                tracing::info!("Loading profile {}", fallback.display());
                load_profile(&fallback)?
            } else {
                tracing::info!("No profile found, using defaults");
                Config::default()
            }
        }
    };

    config.apply_env();
    Ok(config)
}
