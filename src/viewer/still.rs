use std::path::{Path, PathBuf};

use image::RgbImage;

use crate::display::{DisplaySurface, KeyCode};
use crate::error::{Result, ViewerError};

/// Pixel reported by [`StillImage::info`], as (row, column)
const SAMPLE_AT: (u32, u32) = (100, 50);

/// An image loaded once from disk and held for the lifetime of the viewer.
pub struct StillImage {
    path: PathBuf,
    image: RgbImage,
    channels: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageInfo {
    pub width: u32,
    pub height: u32,
    /// Channel count of the file as decoded, before conversion to RGB
    pub channels: u8,
    /// RGB value at row 100, column 50 when the image is large enough
    pub sample: Option<[u8; 3]>,
}

impl StillImage {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    pub fn info(&self) -> ImageInfo {
        let (width, height) = self.image.dimensions();
        let (row, col) = SAMPLE_AT;
        let sample = (row < height && col < width).then(|| self.image.get_pixel(col, row).0);

        ImageInfo {
            width,
            height,
            channels: self.channels,
            sample,
        }
    }
}

pub fn load_still(path: impl AsRef<Path>) -> Result<StillImage> {
    let path = path.as_ref();
    tracing::debug!("Loading {}", path.display());

    let decoded = image::open(path).map_err(|source| ViewerError::ImageLoad {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(StillImage {
        path: path.to_path_buf(),
        channels: decoded.color().channel_count(),
        image: decoded.to_rgb8(),
    })
}

/// Render `still` once, then block until a key is pressed and close the surface.
pub fn show_still<D>(still: &StillImage, display: &mut D) -> Result<Option<KeyCode>>
where
    D: DisplaySurface,
{
    let shown = display.show(still.image());
    let key = shown.and_then(|()| display.wait_any_key());
    display.close();
    key
}

/// Load the image at `path` and show it; nothing is rendered if loading fails.
pub fn view_still<D>(path: impl AsRef<Path>, display: &mut D) -> Result<Option<KeyCode>>
where
    D: DisplaySurface,
{
    let still = load_still(path)?;

    let info = still.info();
    tracing::info!(
        "Loaded {}: {}x{}, {} channels",
        still.path().display(),
        info.width,
        info.height,
        info.channels
    );
    if let Some([r, g, b]) = info.sample {
        tracing::info!(
            "Pixel at ({}, {}): R={} G={} B={}",
            SAMPLE_AT.0,
            SAMPLE_AT.1,
            r,
            g,
            b
        );
    }

    show_still(&still, display)
}
