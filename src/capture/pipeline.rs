use super::FrameSource;
use crate::error::{Result, ViewerError};
use image::RgbImage;
use opencv::core::Mat;
use opencv::{imgproc, prelude::*, videoio};

/// Frame source backed by a GStreamer pipeline ending in `appsink`.
///
/// OpenCV hands frames over as BGR; they are converted to RGB before they
/// leave this module.
pub struct PipelineCapture {
    capture: videoio::VideoCapture,
    bgr: Mat,
    rgb: Mat,
}

impl PipelineCapture {
    pub fn open(pipeline: &str) -> Result<Self> {
        tracing::debug!("GStreamer pipeline: {}", pipeline);

        let capture = videoio::VideoCapture::from_file(pipeline, videoio::CAP_GSTREAMER)?;
        if !capture.is_opened()? {
            return Err(ViewerError::SourceUnavailable(
                "GStreamer pipeline did not start".into(),
            ));
        }

        Ok(Self {
            capture,
            bgr: Mat::default(),
            rgb: Mat::default(),
        })
    }
}

impl FrameSource for PipelineCapture {
    fn read_frame(&mut self) -> Result<Option<RgbImage>> {
        if !self.capture.read(&mut self.bgr)? || self.bgr.empty() {
            return Ok(None);
        }

        imgproc::cvt_color(&self.bgr, &mut self.rgb, imgproc::COLOR_BGR2RGB, 0)?;

        let width = self.rgb.cols() as u32;
        let height = self.rgb.rows() as u32;
        let data = self.rgb.data_bytes()?.to_vec();

        RgbImage::from_raw(width, height, data)
            .map(Some)
            .ok_or_else(|| ViewerError::Capture(format!("short frame buffer for {width}x{height}")))
    }

    fn resolution(&self) -> Option<(u32, u32)> {
        let width = self.capture.get(videoio::CAP_PROP_FRAME_WIDTH).ok()?;
        let height = self.capture.get(videoio::CAP_PROP_FRAME_HEIGHT).ok()?;
        if width <= 0.0 || height <= 0.0 {
            return None;
        }
        Some((width as u32, height as u32))
    }

    fn release(&mut self) -> Result<()> {
        self.capture.release()?;
        tracing::info!("Pipeline released");
        Ok(())
    }
}
