use yomu_config::gesture::GestureConfig;
use yomu_types::TouchPoint;

/// Axis-aligned box in screen space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl BoundingBox {
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    pub fn center_y(&self) -> f32 {
        (self.top + self.bottom) / 2.0
    }

    /// Strictly larger than `min` on both axes
    pub fn exceeds(&self, min: f32) -> bool {
        self.width() > min && self.height() > min
    }
}

/// Sum of distances between consecutive points
pub fn path_length(points: &[TouchPoint]) -> f32 {
    points.windows(2).map(|w| w[0].distance_to(&w[1])).sum()
}

/// A path that ends near its start after travelling far reads as a closed loop.
///
/// Any convoluted path passes, the shape itself is never checked.
pub fn is_closed_loop(points: &[TouchPoint], density: f32) -> bool {
    is_closed_loop_with(points, density, &GestureConfig::default())
}

pub fn is_closed_loop_with(points: &[TouchPoint], density: f32, config: &GestureConfig) -> bool {
    if points.len() < config.loop_min_points {
        return false;
    }
    let (Some(first), Some(last)) = (points.first(), points.last()) else {
        return false;
    };

    let gap = first.distance_to(last);
    let length = path_length(points);

    gap < config.loop_close_dp * density
        && length > config.loop_min_length_dp * density
        && length > gap * config.loop_length_ratio
}

pub fn bounding_box(points: &[TouchPoint]) -> Option<BoundingBox> {
    let first = points.first()?;
    let init = BoundingBox {
        left: first.x,
        top: first.y,
        right: first.x,
        bottom: first.y,
    };

    Some(points.iter().fold(init, |b, p| BoundingBox {
        left: b.left.min(p.x),
        top: b.top.min(p.y),
        right: b.right.max(p.x),
        bottom: b.bottom.max(p.y),
    }))
}
