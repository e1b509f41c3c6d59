mod capture;
mod extract;

pub use capture::{PageRenderer, StillPage};
pub use extract::{ExtractedRegion, RegionExtractor, crop_region, encode_jpeg};
pub use image::RgbaImage;
