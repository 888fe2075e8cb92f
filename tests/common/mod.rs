#![allow(dead_code)]

use std::cell::Cell;
use std::collections::VecDeque;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;

use camview::{DisplaySurface, FrameSource, KeyCode, Result, ViewerError};
use image::{Rgb, RgbImage};

pub fn frame(width: u32, height: u32) -> RgbImage {
    RgbImage::from_pixel(width, height, Rgb([10, 20, 30]))
}

/// One scripted response of [`ScriptedSource::read_frame`]
pub enum Step {
    Frame,
    End,
    Fail,
}

#[derive(Clone, Default)]
pub struct SourceCounters {
    pub reads: Rc<Cell<usize>>,
    pub releases: Rc<Cell<usize>>,
}

/// Frame source that replays a fixed script and counts calls.
pub struct ScriptedSource {
    steps: VecDeque<Step>,
    counters: SourceCounters,
}

impl ScriptedSource {
    pub fn new(steps: impl IntoIterator<Item = Step>) -> (Self, SourceCounters) {
        let counters = SourceCounters::default();
        let source = Self {
            steps: steps.into_iter().collect(),
            counters: counters.clone(),
        };
        (source, counters)
    }

    /// Endless stream of frames
    pub fn endless() -> (Self, SourceCounters) {
        Self::new(std::iter::repeat_with(|| Step::Frame).take(10_000))
    }
}

impl FrameSource for ScriptedSource {
    fn read_frame(&mut self) -> Result<Option<RgbImage>> {
        self.counters.reads.set(self.counters.reads.get() + 1);
        match self.steps.pop_front() {
            Some(Step::Frame) => Ok(Some(frame(4, 3))),
            Some(Step::Fail) => Err(ViewerError::Capture("device unplugged".into())),
            Some(Step::End) | None => Ok(None),
        }
    }

    fn resolution(&self) -> Option<(u32, u32)> {
        Some((4, 3))
    }

    fn release(&mut self) -> Result<()> {
        self.counters.releases.set(self.counters.releases.get() + 1);
        Ok(())
    }
}

/// Display that records calls and replays scripted key presses.
#[derive(Default)]
pub struct RecordingDisplay {
    pub shows: usize,
    pub polls: usize,
    pub waits: usize,
    pub closes: usize,
    /// Every trait call in order: "show", "poll", "wait" or "close"
    pub calls: Vec<&'static str>,
    /// Returned by successive `poll_key` calls; `None` once exhausted
    pub keys: VecDeque<Option<KeyCode>>,
    /// Key returned by `wait_any_key`
    pub dismiss_with: Option<KeyCode>,
    /// Close the surface after this many renders
    pub close_after: Option<usize>,
    pub fail_show: bool,
    pub last_frame_size: Option<(u32, u32)>,
}

impl RecordingDisplay {
    pub fn with_keys(keys: impl IntoIterator<Item = Option<KeyCode>>) -> Self {
        Self {
            keys: keys.into_iter().collect(),
            ..Self::default()
        }
    }
}

impl DisplaySurface for RecordingDisplay {
    fn show(&mut self, frame: &RgbImage) -> Result<()> {
        if self.fail_show {
            return Err(ViewerError::Display("no display server".into()));
        }
        self.calls.push("show");
        self.shows += 1;
        self.last_frame_size = Some(frame.dimensions());
        Ok(())
    }

    fn poll_key(&mut self, _wait: Duration) -> Result<Option<KeyCode>> {
        self.calls.push("poll");
        self.polls += 1;
        Ok(self.keys.pop_front().flatten())
    }

    fn wait_any_key(&mut self) -> Result<Option<KeyCode>> {
        self.calls.push("wait");
        self.waits += 1;
        Ok(self.dismiss_with)
    }

    fn is_open(&self) -> bool {
        self.closes == 0 && self.close_after.map_or(true, |n| self.shows < n)
    }

    fn close(&mut self) {
        self.calls.push("close");
        self.closes += 1;
    }
}

/// Path in the system temp dir unique to this test process
pub fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("camview-{}-{}", std::process::id(), name))
}
