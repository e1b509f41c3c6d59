use yomu_types::{PanelPlacement, TouchPoint};

/// Margin kept clear around the anchor
pub fn safe_zone(screen_width: i32, screen_height: i32, divisor: u32) -> i32 {
    screen_width.min(screen_height) / divisor.max(1) as i32
}

/// Place a panel so it never covers the band around `anchor_y`.
///
/// Tries above the anchor, then below; when neither fits the panel takes the
/// larger side of the screen and is clipped to it.
pub fn place_panel(
    anchor_y: i32,
    panel_width: i32,
    panel_height: i32,
    screen_width: i32,
    screen_height: i32,
    divisor: u32,
) -> PanelPlacement {
    let safe = safe_zone(screen_width, screen_height, divisor);
    let width = panel_width.clamp(0, screen_width.max(0));
    let x = (screen_width - width) / 2;

    let (y, height) = if anchor_y - safe - panel_height > 0 {
        (anchor_y - safe - panel_height, panel_height)
    } else if anchor_y + safe + panel_height < screen_height {
        (anchor_y + safe, panel_height)
    } else if anchor_y > screen_height / 2 {
        (0, (anchor_y - safe).max(0))
    } else {
        (anchor_y + safe, (screen_height - (anchor_y + safe)).max(0))
    };

    PanelPlacement {
        x,
        y,
        width,
        height,
    }
}

/// Free drag of an open panel, driven by raw screen coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelDrag {
    origin_x: i32,
    origin_y: i32,
    touch: TouchPoint,
}

impl PanelDrag {
    pub fn begin(placement: &PanelPlacement, touch: TouchPoint) -> Self {
        Self {
            origin_x: placement.x,
            origin_y: placement.y,
            touch,
        }
    }

    /// No clamping, the panel may leave the screen
    pub fn update(&self, placement: &mut PanelPlacement, touch: TouchPoint) {
        placement.x = (self.origin_x as f32 + (touch.x - self.touch.x)) as i32;
        placement.y = (self.origin_y as f32 + (touch.y - self.touch.y)) as i32;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const W: i32 = 1000;
    const H: i32 = 2000;

    fn place(anchor_y: i32, panel_height: i32) -> PanelPlacement {
        place_panel(anchor_y, 600, panel_height, W, H, 8)
    }

    #[test]
    fn test_safe_zone() {
        assert_eq!(safe_zone(1000, 2000, 8), 125);
        assert_eq!(safe_zone(2000, 1000, 8), 125);
        assert_eq!(safe_zone(1000, 2000, 0), 1000);
    }

    #[test]
    fn test_above_anchor_touches_safe_zone() {
        let p = place(1500, 400);
        assert_eq!(p.y + p.height, 1500 - 125);
        assert_eq!(p.height, 400);
        assert_eq!(p.x, 200);
        assert_eq!(p.width, 600);
    }

    #[test]
    fn test_below_anchor_when_above_does_not_fit() {
        let p = place(300, 400);
        assert_eq!(p.y, 425);
        assert_eq!(p.height, 400);
    }

    #[test]
    fn test_exact_fit_above_is_rejected() {
        // anchor - safe - height == 0 is not "> 0"
        let p = place(525, 400);
        assert_eq!(p.y, 650);
    }

    #[test]
    fn test_clipped_in_upper_half() {
        let p = place(0, 1950);
        assert_eq!(p.y, 125);
        assert_eq!(p.height, H - 125);
    }

    #[test]
    fn test_clipped_in_lower_half() {
        let p = place(1200, 1950);
        assert_eq!(p.y, 0);
        assert_eq!(p.height, 1075);
    }

    #[test]
    fn test_anchor_below_screen_never_negative() {
        let p = place(-500, 1950);
        assert!(p.height >= 0);
        let p = place(H + 400, 3000);
        assert_eq!(p.y, 0);
        assert!(p.height >= 0);
    }

    #[test]
    fn test_wide_panel_is_capped_to_screen() {
        let p = place_panel(1500, 1400, 300, W, H, 8);
        assert_eq!(p.width, W);
        assert_eq!(p.x, 0);
    }

    #[test]
    fn test_drag_moves_by_delta_without_clamping() {
        let mut p = place(1500, 400);
        let drag = PanelDrag::begin(&p, TouchPoint::new(500.0, 1000.0));

        drag.update(&mut p, TouchPoint::new(530.0, 960.0));
        assert_eq!((p.x, p.y), (230, 935));

        drag.update(&mut p, TouchPoint::new(-900.0, 3000.0));
        assert_eq!((p.x, p.y), (-1200, 2975));
    }
}
