use super::FrameSource;
use crate::error::Result;
use image::RgbImage;
use nokhwa::pixel_format::RgbFormat;
use nokhwa::utils::{CameraIndex, RequestedFormat, RequestedFormatType};
use nokhwa::Camera;

pub struct WebcamCapture {
    camera: Camera,
}

impl WebcamCapture {
    pub fn new(device_index: u32) -> Result<Self> {
        tracing::info!("Initializing webcam {}", device_index);

        let index = CameraIndex::Index(device_index);
        let requested =
            RequestedFormat::new::<RgbFormat>(RequestedFormatType::AbsoluteHighestResolution);

        let mut camera = Camera::new(index, requested)?;
        camera.open_stream()?;

        let resolution = camera.resolution();
        tracing::info!(
            "Webcam streaming at {}x{}",
            resolution.width(),
            resolution.height()
        );

        Ok(Self { camera })
    }
}

impl FrameSource for WebcamCapture {
    fn read_frame(&mut self) -> Result<Option<RgbImage>> {
        if !self.camera.is_stream_open() {
            return Ok(None);
        }

        let frame = self.camera.frame()?;
        let decoded = frame.decode_image::<RgbFormat>()?;

        Ok(Some(decoded))
    }

    fn resolution(&self) -> Option<(u32, u32)> {
        let resolution = self.camera.resolution();
        Some((resolution.width(), resolution.height()))
    }

    fn release(&mut self) -> Result<()> {
        if self.camera.is_stream_open() {
            self.camera.stop_stream()?;
        }
        tracing::info!("Webcam released");
        Ok(())
    }
}
