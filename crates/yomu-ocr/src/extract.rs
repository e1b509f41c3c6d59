use anyhow::{Context, Result};
use base64::{Engine as _, engine::general_purpose};
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ExtendedColorType, ImageEncoder, RgbaImage, imageops};
use yomu_config::lookup::{LookupConfig, LoopFocus};
use yomu_core::crop::{CropPlan, plan_loop, plan_tap, tap_crop_size};
use yomu_core::geometry::BoundingBox;
use yomu_types::{FocusPoint, Region, TouchPoint, Viewport};

/// Encoded region ready to be sent for recognition
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedRegion {
    pub image_base64: String,
    pub region: Region,
    pub focus: FocusPoint,
    /// Absolute screen Y kept clear by the result panel
    pub anchor_y: i32,
}

#[derive(Debug, Clone)]
pub struct RegionExtractor {
    crop_fraction: f32,
    jpeg_quality: u8,
    loop_focus: LoopFocus,
}

impl RegionExtractor {
    pub fn new(config: &LookupConfig) -> Self {
        Self {
            crop_fraction: config.crop_fraction,
            jpeg_quality: config.jpeg_quality,
            loop_focus: config.loop_focus,
        }
    }

    /// Square around the tap, sized from the shorter screen side
    pub fn extract_tap(
        &self,
        snapshot: &RgbaImage,
        tap: TouchPoint,
        screen: Viewport,
    ) -> Result<ExtractedRegion> {
        let crop_size = tap_crop_size(screen.width, screen.height, self.crop_fraction);
        let plan = plan_tap(tap, crop_size, snapshot.width(), snapshot.height())?;
        self.encode(snapshot, plan)
    }

    pub fn extract_loop(&self, snapshot: &RgbaImage, rect: &BoundingBox) -> Result<ExtractedRegion> {
        let plan = plan_loop(rect, snapshot.width(), snapshot.height(), self.loop_focus)?;
        self.encode(snapshot, plan)
    }

    fn encode(&self, snapshot: &RgbaImage, plan: CropPlan) -> Result<ExtractedRegion> {
        let cropped = crop_region(snapshot, plan.region);
        let jpeg = encode_jpeg(&cropped, self.jpeg_quality)?;
        tracing::debug!(
            region = ?plan.region,
            focus = ?plan.focus,
            bytes = jpeg.len(),
            "Region extracted"
        );

        Ok(ExtractedRegion {
            image_base64: general_purpose::STANDARD.encode(jpeg),
            region: plan.region,
            focus: plan.focus,
            anchor_y: plan.anchor_y,
        })
    }
}

/// Sub-copy of the snapshot; the region must already lie inside it
pub fn crop_region(snapshot: &RgbaImage, region: Region) -> RgbaImage {
    imageops::crop_imm(snapshot, region.left, region.top, region.width, region.height).to_image()
}

pub fn encode_jpeg(image: &RgbaImage, quality: u8) -> Result<Vec<u8>> {
    // JPEG has no alpha channel
    let rgb = DynamicImage::ImageRgba8(image.clone()).to_rgb8();
    let mut buffer = Vec::new();
    JpegEncoder::new_with_quality(&mut buffer, quality.clamp(1, 100))
        .write_image(rgb.as_raw(), rgb.width(), rgb.height(), ExtendedColorType::Rgb8)
        .context("Failed to encode JPEG")?;
    Ok(buffer)
}
