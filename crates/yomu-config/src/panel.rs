use serde::{Deserialize, Serialize};

fn default_safe_zone_divisor() -> u32 {
    8
}

fn default_translation_pending() -> String {
    "Translating...".to_string()
}

fn default_translation_failed() -> String {
    "Translation failed to load".to_string()
}

fn default_char_width_px() -> u32 {
    36
}

fn default_line_height_px() -> u32 {
    52
}

fn default_padding_px() -> u32 {
    48
}

fn default_chip_height_px() -> u32 {
    96
}

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(default)]
pub struct PanelConfig {
    /// Safe zone around the anchor is `min(width, height) / divisor`
    #[serde(default = "default_safe_zone_divisor")]
    pub safe_zone_divisor: u32,
    #[serde(default = "default_translation_pending")]
    pub translation_pending: String,
    #[serde(default = "default_translation_failed")]
    pub translation_failed: String,
    // Text metrics used to pre-measure the panel
    #[serde(default = "default_char_width_px")]
    pub char_width_px: u32,
    #[serde(default = "default_line_height_px")]
    pub line_height_px: u32,
    #[serde(default = "default_padding_px")]
    pub padding_px: u32,
    #[serde(default = "default_chip_height_px")]
    pub chip_height_px: u32,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            safe_zone_divisor: default_safe_zone_divisor(),
            translation_pending: default_translation_pending(),
            translation_failed: default_translation_failed(),
            char_width_px: default_char_width_px(),
            line_height_px: default_line_height_px(),
            padding_px: default_padding_px(),
            chip_height_px: default_chip_height_px(),
        }
    }
}
