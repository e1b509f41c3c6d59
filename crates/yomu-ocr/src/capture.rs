use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use image::RgbaImage;

/// Source of the pixels currently shown to the reader
pub trait PageRenderer: Send + Sync {
    /// Full-surface snapshot of the current frame
    fn snapshot(&self) -> Result<RgbaImage>;
}

/// Page backed by an image file, re-read on every snapshot
#[derive(Debug, Clone)]
pub struct StillPage {
    path: PathBuf,
}

impl StillPage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PageRenderer for StillPage {
    fn snapshot(&self) -> Result<RgbaImage> {
        let image = image::open(&self.path)
            .with_context(|| format!("Failed to read page image {}", self.path.display()))?;
        Ok(image.to_rgba8())
    }
}
