use serde::{Deserialize, Serialize};

/// Focus point sent for loop selections
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum LoopFocus {
    /// Center of the selected box
    #[default]
    Center,
    /// Always `(0, 0)`, matches older servers
    Origin,
}

fn default_cooldown_ms() -> u64 {
    3000
}

fn default_crop_fraction() -> f32 {
    0.8
}

fn default_jpeg_quality() -> u8 {
    80
}

fn default_title_marker() -> String {
    " - Suwayomi".to_string()
}

fn default_location_marker() -> String {
    "chapter".to_string()
}

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(default)]
pub struct LookupConfig {
    /// Minimum time between two submissions
    #[serde(default = "default_cooldown_ms")]
    pub cooldown_ms: u64,
    /// Tap crop side as a fraction of the shorter screen side
    #[serde(default = "default_crop_fraction")]
    pub crop_fraction: f32,
    #[serde(default = "default_jpeg_quality")]
    pub jpeg_quality: u8,
    /// Content titles end with this marker; the part before it names the context
    #[serde(default = "default_title_marker")]
    pub title_marker: String,
    /// URLs containing this marker are reading locations
    #[serde(default = "default_location_marker")]
    pub location_marker: String,
    #[serde(default)]
    pub loop_focus: LoopFocus,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            cooldown_ms: default_cooldown_ms(),
            crop_fraction: default_crop_fraction(),
            jpeg_quality: default_jpeg_quality(),
            title_marker: default_title_marker(),
            location_marker: default_location_marker(),
            loop_focus: LoopFocus::default(),
        }
    }
}
