use super::{DisplaySurface, KeyCode};
use crate::error::Result;
use image::RgbImage;
use minifb::{Key, KeyRepeat, Window, WindowOptions};
use std::time::{Duration, Instant};

/// Event pump interval while blocking on a key press
const IDLE_PUMP: Duration = Duration::from_millis(16);

#[derive(Debug, Clone, Copy, Default)]
pub struct WindowSettings {
    pub resizable: bool,
    /// Borderless plus topmost is the closest minifb gets to fullscreen
    pub borderless: bool,
    pub topmost: bool,
}

impl WindowSettings {
    fn options(&self) -> WindowOptions {
        WindowOptions {
            resize: self.resizable,
            borderless: self.borderless,
            topmost: self.topmost,
            ..WindowOptions::default()
        }
    }
}

/// A labelled minifb window.
///
/// The window is created on the first [`DisplaySurface::show`] call so that
/// it opens at the size of the first frame.
pub struct WindowDisplay {
    label: String,
    settings: WindowSettings,
    window: Option<Window>,
    buffer: Vec<u32>,
}

impl WindowDisplay {
    pub fn new(label: impl Into<String>, settings: WindowSettings) -> Self {
        Self {
            label: label.into(),
            settings,
            window: None,
            buffer: Vec::new(),
        }
    }

    fn pressed_key(window: &Window) -> Option<KeyCode> {
        window
            .get_keys_pressed(KeyRepeat::No)
            .first()
            .map(|key| map_key(*key))
    }
}

impl DisplaySurface for WindowDisplay {
    fn show(&mut self, frame: &RgbImage) -> Result<()> {
        let (width, height) = frame.dimensions();
        let (width, height) = (width as usize, height as usize);

        rgb_to_argb_into(frame.as_raw(), width, height, &mut self.buffer);
        let window = ensure_window(&mut self.window, &self.label, self.settings, width, height)?;
        window.update_with_buffer(&self.buffer, width, height)?;
        Ok(())
    }

    fn poll_key(&mut self, wait: Duration) -> Result<Option<KeyCode>> {
        let Some(window) = self.window.as_mut() else {
            return Ok(None);
        };

        let deadline = Instant::now() + wait;
        loop {
            if !window.is_open() {
                return Ok(None);
            }
            if let Some(key) = Self::pressed_key(window) {
                return Ok(Some(key));
            }

            let now = Instant::now();
            if now >= deadline {
                return Ok(None);
            }
            std::thread::sleep((deadline - now).min(Duration::from_millis(1)));
            window.update();
        }
    }

    fn wait_any_key(&mut self) -> Result<Option<KeyCode>> {
        let Some(window) = self.window.as_mut() else {
            return Ok(None);
        };

        while window.is_open() {
            if let Some(key) = Self::pressed_key(window) {
                return Ok(Some(key));
            }
            std::thread::sleep(IDLE_PUMP);
            window.update();
        }

        Ok(None)
    }

    fn is_open(&self) -> bool {
        self.window.as_ref().map_or(true, Window::is_open)
    }

    fn close(&mut self) {
        if self.window.take().is_some() {
            tracing::debug!("Closed window \"{}\"", self.label);
        }
    }
}

fn ensure_window<'a>(
    slot: &'a mut Option<Window>,
    label: &str,
    settings: WindowSettings,
    width: usize,
    height: usize,
) -> Result<&'a mut Window> {
    let window = match slot.take() {
        Some(window) => window,
        None => {
            tracing::debug!("Opening window \"{}\" at {}x{}", label, width, height);
            Window::new(label, width, height, settings.options())?
        }
    };
    Ok(slot.insert(window))
}

fn map_key(key: Key) -> KeyCode {
    let c = match key {
        Key::Escape => return KeyCode::Escape,
        Key::Space => ' ',
        Key::Enter => '\r',
        Key::Key0 => '0',
        Key::Key1 => '1',
        Key::Key2 => '2',
        Key::Key3 => '3',
        Key::Key4 => '4',
        Key::Key5 => '5',
        Key::Key6 => '6',
        Key::Key7 => '7',
        Key::Key8 => '8',
        Key::Key9 => '9',
        Key::A => 'a',
        Key::B => 'b',
        Key::C => 'c',
        Key::D => 'd',
        Key::E => 'e',
        Key::F => 'f',
        Key::G => 'g',
        Key::H => 'h',
        Key::I => 'i',
        Key::J => 'j',
        Key::K => 'k',
        Key::L => 'l',
        Key::M => 'm',
        Key::N => 'n',
        Key::O => 'o',
        Key::P => 'p',
        Key::Q => 'q',
        Key::R => 'r',
        Key::S => 's',
        Key::T => 't',
        Key::U => 'u',
        Key::V => 'v',
        Key::W => 'w',
        Key::X => 'x',
        Key::Y => 'y',
        Key::Z => 'z',
        _ => return KeyCode::Other,
    };
    KeyCode::Char(c)
}

/// Convert HWC RGB buffer to packed ARGB u32 for minifb
pub fn rgb_to_argb(buf: &[u8], width: usize, height: usize) -> Vec<u32> {
    let mut argb = Vec::with_capacity(width * height);
    rgb_to_argb_into(buf, width, height, &mut argb);
    argb
}

fn rgb_to_argb_into(buf: &[u8], width: usize, height: usize, argb: &mut Vec<u32>) {
    debug_assert!(
        buf.len() >= width * height * 3,
        "RGB buffer too small: expected {} bytes, got {}",
        width * height * 3,
        buf.len()
    );
    argb.clear();
    argb.extend(
        buf.chunks_exact(3)
            .take(width * height)
            .map(|px| ((px[0] as u32) << 16) | ((px[1] as u32) << 8) | px[2] as u32),
    );
}
