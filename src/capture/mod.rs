mod webcam;
#[cfg(feature = "gstreamer")]
mod pipeline;

pub use webcam::WebcamCapture;
#[cfg(feature = "gstreamer")]
pub use pipeline::PipelineCapture;

use std::fmt;
use std::str::FromStr;

use image::RgbImage;

use crate::error::{Result, ViewerError};

/// Jetson CSI camera: NVMM capture at 1920x1080@60, converted to BGR for appsink.
pub const DEFAULT_CSI_PIPELINE: &str = "nvarguscamerasrc ! \
    video/x-raw(memory:NVMM), width=1920, height=1080, framerate=60/1 ! \
    nvvidconv ! video/x-raw, format=BGRx ! \
    videoconvert ! video/x-raw, format=BGR ! appsink";

/// Trait for camera capture sources
pub trait FrameSource {
    /// Fetch the next frame.
    ///
    /// `Ok(None)` marks the end of the stream.
    fn read_frame(&mut self) -> Result<Option<RgbImage>>;

    /// Resolution of captured frames, if the backend reports one
    fn resolution(&self) -> Option<(u32, u32)>;

    /// Stop the stream and free the device
    fn release(&mut self) -> Result<()>;
}

/// Where the live viewer takes its frames from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceDescriptor {
    /// Camera index opened through the platform capture backend
    Device(u32),
    /// GStreamer launch string terminated by an `appsink`
    Pipeline(String),
}

impl SourceDescriptor {
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ViewerError::InvalidSource("empty descriptor".into()));
        }

        if trimmed.bytes().all(|b| b.is_ascii_digit()) {
            let index = trimmed
                .parse::<u32>()
                .map_err(|e| ViewerError::InvalidSource(format!("{trimmed}: {e}")))?;
            return Ok(SourceDescriptor::Device(index));
        }

        Ok(SourceDescriptor::Pipeline(trimmed.to_string()))
    }
}

impl Default for SourceDescriptor {
    fn default() -> Self {
        SourceDescriptor::Pipeline(DEFAULT_CSI_PIPELINE.to_string())
    }
}

impl FromStr for SourceDescriptor {
    type Err = ViewerError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for SourceDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceDescriptor::Device(index) => write!(f, "device {index}"),
            SourceDescriptor::Pipeline(pipeline) => write!(f, "pipeline \"{pipeline}\""),
        }
    }
}

/// Open handle to a frame source.
///
/// A session is either open (holding a source) or closed. Releasing moves it
/// to closed; the backend's `release` runs at most once, either through
/// [`CaptureSession::release`] or when the session is dropped.
pub struct CaptureSession {
    source: Option<Box<dyn FrameSource>>,
}

impl CaptureSession {
    /// Open `descriptor`, logging the outcome.
    ///
    /// Failure to open is not an error here: the returned session simply
    /// reports `is_opened() == false`.
    pub fn open(descriptor: &SourceDescriptor) -> Self {
        tracing::info!("Opening {}", descriptor);

        let session = match open_source(descriptor) {
            Ok(source) => Self::from_source(source),
            Err(e) => {
                tracing::error!("Failed to open {}: {}", descriptor, e);
                Self::closed()
            }
        };

        tracing::info!("Opened: {}", session.is_opened());
        session
    }

    pub fn from_source(source: Box<dyn FrameSource>) -> Self {
        Self {
            source: Some(source),
        }
    }

    pub fn closed() -> Self {
        Self { source: None }
    }

    pub fn is_opened(&self) -> bool {
        self.source.is_some()
    }

    pub fn resolution(&self) -> Option<(u32, u32)> {
        self.source.as_ref().and_then(|source| source.resolution())
    }

    /// Fetch the next frame; a closed session is never passed to the backend.
    pub fn read(&mut self) -> Result<Option<RgbImage>> {
        match self.source.as_mut() {
            Some(source) => source.read_frame(),
            None => Err(ViewerError::SessionClosed),
        }
    }

    /// Release the underlying source. Calling this on a closed session is a no-op.
    pub fn release(&mut self) -> Result<()> {
        match self.source.take() {
            Some(mut source) => {
                tracing::debug!("Releasing capture source");
                source.release()
            }
            None => Ok(()),
        }
    }
}

impl Drop for CaptureSession {
    fn drop(&mut self) {
        if let Err(e) = self.release() {
            tracing::warn!("Failed to release capture source: {}", e);
        }
    }
}

fn open_source(descriptor: &SourceDescriptor) -> Result<Box<dyn FrameSource>> {
    match descriptor {
        SourceDescriptor::Device(index) => Ok(Box::new(WebcamCapture::new(*index)?)),
        #[cfg(feature = "gstreamer")]
        SourceDescriptor::Pipeline(pipeline) => Ok(Box::new(PipelineCapture::open(pipeline)?)),
        #[cfg(not(feature = "gstreamer"))]
        SourceDescriptor::Pipeline(_) => Err(ViewerError::SourceUnavailable(
            "pipeline sources need the `gstreamer` feature".into(),
        )),
    }
}
