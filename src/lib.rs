//! Live camera and still image viewers.
//!
//! Both viewers are synchronous and single-threaded: a capture session is
//! polled for frames which are rendered to a window until the stream ends or
//! the quit key is pressed, and a still image is rendered once and held until
//! any key is pressed.

pub mod capture;
pub mod display;
pub mod error;
pub mod logging;
pub mod viewer;

pub use capture::{CaptureSession, FrameSource, SourceDescriptor, DEFAULT_CSI_PIPELINE};
pub use display::{DisplaySurface, KeyCode, QuitKey, WindowDisplay, WindowSettings};
pub use error::{Result, ViewerError};
pub use viewer::live::{run_live, LiveOptions, LiveSummary, StopReason};
pub use viewer::still::{load_still, show_still, view_still, ImageInfo, StillImage};
