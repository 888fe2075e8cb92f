use std::path::PathBuf;

use thiserror::Error;

pub type Result<T, E = ViewerError> = core::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum ViewerError {
    #[error("source unavailable: {0}")]
    SourceUnavailable(String),
    #[error("capture session is closed")]
    SessionClosed,
    #[error("capture error: {0}")]
    Capture(String),
    #[error("failed to load image {}: {source}", .path.display())]
    ImageLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("display error: {0}")]
    Display(String),
    #[error("invalid source descriptor: {0}")]
    InvalidSource(String),
    #[error("invalid quit key {0:?}: expected a single character or \"esc\"")]
    InvalidQuitKey(String),
    #[cfg(feature = "gstreamer")]
    #[error("opencv error: {0}")]
    OpenCv(#[from] opencv::Error),
}

impl From<nokhwa::NokhwaError> for ViewerError {
    fn from(err: nokhwa::NokhwaError) -> Self {
        ViewerError::Capture(err.to_string())
    }
}

impl From<minifb::Error> for ViewerError {
    fn from(err: minifb::Error) -> Self {
        ViewerError::Display(err.to_string())
    }
}
