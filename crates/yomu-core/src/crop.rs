use yomu_config::lookup::LoopFocus;
use yomu_types::{FocusPoint, Region, TouchPoint};

use crate::error::CoreError;
use crate::geometry::BoundingBox;

/// Where to cut a snapshot and what to tell the recognizer about it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropPlan {
    pub region: Region,
    pub focus: FocusPoint,
    /// Absolute screen Y the result panel must keep clear
    pub anchor_y: i32,
}

/// Side of the square cut around a tap
pub fn tap_crop_size(screen_width: u32, screen_height: u32, fraction: f32) -> u32 {
    ((screen_width.min(screen_height) as f32 * fraction) as u32).max(1)
}

/// Square of `crop_size` centered on the tap, shifted back inside the surface
pub fn plan_tap(
    tap: TouchPoint,
    crop_size: u32,
    surface_width: u32,
    surface_height: u32,
) -> Result<CropPlan, CoreError> {
    check_surface(surface_width, surface_height)?;

    let width = crop_size.clamp(1, surface_width);
    let height = crop_size.clamp(1, surface_height);
    let x = tap.x as i64;
    let y = tap.y as i64;
    let half = (crop_size / 2) as i64;

    let left = (x - half).clamp(0, (surface_width - width) as i64);
    let top = (y - half).clamp(0, (surface_height - height) as i64);

    Ok(CropPlan {
        region: Region {
            left: left as u32,
            top: top as u32,
            width,
            height,
        },
        // Taps off the surface still focus inside the region
        focus: FocusPoint {
            x: (x - left).clamp(0, width as i64 - 1) as i32,
            y: (y - top).clamp(0, height as i64 - 1) as i32,
        },
        anchor_y: y as i32,
    })
}

/// Exact box of a loop selection, clamped to the surface and at least 1x1
pub fn plan_loop(
    rect: &BoundingBox,
    surface_width: u32,
    surface_height: u32,
    focus: LoopFocus,
) -> Result<CropPlan, CoreError> {
    check_surface(surface_width, surface_height)?;
    if ![rect.left, rect.top, rect.right, rect.bottom]
        .iter()
        .all(|v| v.is_finite())
    {
        return Err(CoreError::InvalidBox);
    }

    let (w, h) = (surface_width as i64, surface_height as i64);
    let left = (rect.left as i64).clamp(0, w - 1);
    let top = (rect.top as i64).clamp(0, h - 1);
    let right = (rect.right as i64).clamp(left + 1, w);
    let bottom = (rect.bottom as i64).clamp(top + 1, h);

    let region = Region {
        left: left as u32,
        top: top as u32,
        width: (right - left) as u32,
        height: (bottom - top) as u32,
    };
    let focus = match focus {
        LoopFocus::Center => FocusPoint {
            x: (region.width / 2) as i32,
            y: (region.height / 2) as i32,
        },
        LoopFocus::Origin => FocusPoint::default(),
    };

    Ok(CropPlan {
        region,
        focus,
        anchor_y: ((top + bottom) / 2) as i32,
    })
}

fn check_surface(width: u32, height: u32) -> Result<(), CoreError> {
    if width == 0 || height == 0 {
        return Err(CoreError::EmptySurface { width, height });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tap(x: f32, y: f32) -> CropPlan {
        plan_tap(TouchPoint::new(x, y), 480, 1000, 1000).unwrap()
    }

    fn region(left: u32, top: u32, width: u32, height: u32) -> Region {
        Region {
            left,
            top,
            width,
            height,
        }
    }

    #[test]
    fn test_crop_size_uses_shorter_side() {
        assert_eq!(tap_crop_size(600, 1000, 0.8), 480);
        assert_eq!(tap_crop_size(1000, 600, 0.8), 480);
        assert_eq!(tap_crop_size(1, 1, 0.5), 1);
    }

    #[test]
    fn test_tap_in_corners() {
        let plan = tap(100.0, 100.0);
        assert_eq!(plan.region, region(0, 0, 480, 480));
        assert_eq!(plan.focus, FocusPoint { x: 100, y: 100 });
        assert_eq!(plan.anchor_y, 100);

        let plan = tap(950.0, 30.0);
        assert_eq!(plan.region, region(520, 0, 480, 480));
        assert_eq!(plan.focus, FocusPoint { x: 430, y: 30 });

        let plan = tap(20.0, 990.0);
        assert_eq!(plan.region, region(0, 520, 480, 480));
        assert_eq!(plan.focus, FocusPoint { x: 20, y: 470 });

        let plan = tap(999.0, 999.0);
        assert_eq!(plan.region, region(520, 520, 480, 480));
        assert_eq!(plan.focus, FocusPoint { x: 479, y: 479 });
    }

    #[test]
    fn test_tap_in_middle_is_centered() {
        let plan = tap(500.0, 600.0);
        assert_eq!(plan.region, region(260, 360, 480, 480));
        assert_eq!(plan.focus, FocusPoint { x: 240, y: 240 });
        assert_eq!(plan.anchor_y, 600);
    }

    #[test]
    fn test_tap_crop_larger_than_surface() {
        let plan = plan_tap(TouchPoint::new(50.0, 20.0), 480, 300, 200).unwrap();
        assert_eq!(plan.region, region(0, 0, 300, 200));
        assert_eq!(plan.focus, FocusPoint { x: 50, y: 20 });
    }

    #[test]
    fn test_tap_outside_surface_stays_inside() {
        let plan = plan_tap(TouchPoint::new(-40.0, 5000.0), 480, 1000, 1000).unwrap();
        assert_eq!(plan.region, region(0, 520, 480, 480));
        assert_eq!(plan.focus, FocusPoint { x: 0, y: 479 });
    }

    #[test]
    fn test_loop_box_is_clamped() {
        let rect = BoundingBox {
            left: -20.0,
            top: 100.0,
            right: 300.0,
            bottom: 1400.0,
        };
        let plan = plan_loop(&rect, 1000, 1000, LoopFocus::Center).unwrap();
        assert_eq!(plan.region, region(0, 100, 300, 900));
        assert_eq!(plan.focus, FocusPoint { x: 150, y: 450 });
        assert_eq!(plan.anchor_y, 550);

        let plan = plan_loop(&rect, 1000, 1000, LoopFocus::Origin).unwrap();
        assert_eq!(plan.focus, FocusPoint { x: 0, y: 0 });
    }

    #[test]
    fn test_degenerate_loop_box_keeps_one_pixel() {
        let rect = BoundingBox {
            left: 1200.0,
            top: 1200.0,
            right: 1100.0,
            bottom: 1300.0,
        };
        let plan = plan_loop(&rect, 1000, 800, LoopFocus::Center).unwrap();
        assert_eq!(plan.region, region(999, 799, 1, 1));
    }

    #[test]
    fn test_regions_never_leave_surface() {
        let (w, h) = (640u32, 360u32);
        for x in (-100..800).step_by(37) {
            for y in (-100..500).step_by(29) {
                let plan = plan_tap(TouchPoint::new(x as f32, y as f32), 288, w, h).unwrap();
                let r = plan.region;
                assert!(r.width > 0 && r.height > 0);
                assert!(r.right() <= w && r.bottom() <= h, "{r:?}");
                let focus = plan.focus;
                assert!((0..r.width as i32).contains(&focus.x), "{focus:?}");
                assert!((0..r.height as i32).contains(&focus.y), "{focus:?}");

                let rect = BoundingBox {
                    left: x as f32,
                    top: y as f32,
                    right: x as f32 + 150.0,
                    bottom: y as f32 + 90.0,
                };
                let r = plan_loop(&rect, w, h, LoopFocus::Center).unwrap().region;
                assert!(r.width > 0 && r.height > 0);
                assert!(r.right() <= w && r.bottom() <= h, "{r:?}");
            }
        }
    }

    #[test]
    fn test_empty_surface_is_rejected() {
        assert_eq!(
            plan_tap(TouchPoint::new(1.0, 1.0), 10, 0, 100),
            Err(CoreError::EmptySurface {
                width: 0,
                height: 100
            })
        );
        let rect = BoundingBox {
            left: f32::NAN,
            top: 0.0,
            right: 1.0,
            bottom: 1.0,
        };
        assert_eq!(
            plan_loop(&rect, 10, 10, LoopFocus::Center),
            Err(CoreError::InvalidBox)
        );
    }
}
