mod window;

pub use window::{rgb_to_argb, WindowDisplay, WindowSettings};

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use image::RgbImage;

use crate::error::{Result, ViewerError};

/// A key press as seen by the viewers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCode {
    Char(char),
    Escape,
    Other,
}

/// Trait for on-screen render targets
pub trait DisplaySurface {
    /// Render a frame, replacing whatever was shown before
    fn show(&mut self, frame: &RgbImage) -> Result<()>;

    /// Pump window events for at most `wait` and return the first key pressed
    fn poll_key(&mut self, wait: Duration) -> Result<Option<KeyCode>>;

    /// Block until any key is pressed.
    ///
    /// Returns `None` if the surface was closed by the user first.
    fn wait_any_key(&mut self) -> Result<Option<KeyCode>>;

    /// `false` once the user has closed the surface
    fn is_open(&self) -> bool;

    fn close(&mut self);
}

/// Key that ends the live capture loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuitKey(KeyCode);

impl QuitKey {
    pub fn new(key: KeyCode) -> Self {
        Self(key)
    }

    pub fn matches(&self, key: KeyCode) -> bool {
        self.0 == key
    }
}

impl Default for QuitKey {
    fn default() -> Self {
        Self(KeyCode::Char('q'))
    }
}

impl FromStr for QuitKey {
    type Err = ViewerError;

    fn from_str(s: &str) -> Result<Self> {
        if s.eq_ignore_ascii_case("esc") || s.eq_ignore_ascii_case("escape") {
            return Ok(Self(KeyCode::Escape));
        }

        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if !c.is_control() => Ok(Self(KeyCode::Char(c.to_ascii_lowercase()))),
            _ => Err(ViewerError::InvalidQuitKey(s.to_string())),
        }
    }
}

impl fmt::Display for QuitKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            KeyCode::Char(c) => write!(f, "{c}"),
            KeyCode::Escape => f.write_str("esc"),
            KeyCode::Other => f.write_str("<other>"),
        }
    }
}
