use serde::{Deserialize, Serialize};

fn default_tap_threshold_px() -> f32 {
    20.0
}

fn default_page_swipe_threshold_px() -> f32 {
    150.0
}

fn default_toggle_fraction() -> f32 {
    0.6
}

fn default_dominance() -> f32 {
    1.5
}

fn default_min_loop_box_dp() -> f32 {
    10.0
}

fn default_loop_min_points() -> usize {
    10
}

fn default_loop_close_dp() -> f32 {
    40.0
}

fn default_loop_min_length_dp() -> f32 {
    100.0
}

fn default_loop_length_ratio() -> f32 {
    2.0
}

/// Thresholds of the gesture classifier. `_dp` values are scaled by display density.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct GestureConfig {
    #[serde(default = "default_tap_threshold_px")]
    pub tap_threshold_px: f32,
    #[serde(default = "default_page_swipe_threshold_px")]
    pub page_swipe_threshold_px: f32,
    /// Vertical travel, as a fraction of screen height, that toggles lookup mode
    #[serde(default = "default_toggle_fraction")]
    pub toggle_fraction: f32,
    /// How much the dominant axis must exceed the other for a swipe
    #[serde(default = "default_dominance")]
    pub dominance: f32,
    #[serde(default = "default_min_loop_box_dp")]
    pub min_loop_box_dp: f32,
    #[serde(default = "default_loop_min_points")]
    pub loop_min_points: usize,
    #[serde(default = "default_loop_close_dp")]
    pub loop_close_dp: f32,
    #[serde(default = "default_loop_min_length_dp")]
    pub loop_min_length_dp: f32,
    #[serde(default = "default_loop_length_ratio")]
    pub loop_length_ratio: f32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            tap_threshold_px: default_tap_threshold_px(),
            page_swipe_threshold_px: default_page_swipe_threshold_px(),
            toggle_fraction: default_toggle_fraction(),
            dominance: default_dominance(),
            min_loop_box_dp: default_min_loop_box_dp(),
            loop_min_points: default_loop_min_points(),
            loop_close_dp: default_loop_close_dp(),
            loop_min_length_dp: default_loop_min_length_dp(),
            loop_length_ratio: default_loop_length_ratio(),
        }
    }
}
