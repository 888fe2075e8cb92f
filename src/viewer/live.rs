use std::fmt;
use std::time::{Duration, Instant};

use crate::capture::CaptureSession;
use crate::display::{DisplaySurface, QuitKey};
use crate::error::Result;

#[derive(Debug, Clone)]
pub struct LiveOptions {
    pub quit_key: QuitKey,
    /// How long each iteration waits for a key press after rendering
    pub key_wait: Duration,
    /// Log timing stats every N frames; 0 disables them
    pub stats_interval: u64,
}

impl Default for LiveOptions {
    fn default() -> Self {
        Self {
            quit_key: QuitKey::default(),
            key_wait: Duration::from_millis(1),
            stats_interval: 30,
        }
    }
}

/// Why the capture loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The session was not open, the loop body never ran
    NeverOpened,
    StreamEnded,
    ReadFailed,
    QuitKey,
    WindowClosed,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            StopReason::NeverOpened => "source never opened",
            StopReason::StreamEnded => "end of stream",
            StopReason::ReadFailed => "frame read failed",
            StopReason::QuitKey => "quit key pressed",
            StopReason::WindowClosed => "window closed",
        };
        f.write_str(reason)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LiveSummary {
    pub frames: u64,
    pub reason: StopReason,
}

#[derive(Default)]
struct LoopStats {
    frames: u64,
    total_read_time: Duration,
    total_render_time: Duration,
}

impl LoopStats {
    fn log(&self) {
        let avg_read_ms = self.total_read_time.as_secs_f64() * 1000.0 / self.frames as f64;
        let avg_render_ms = self.total_render_time.as_secs_f64() * 1000.0 / self.frames as f64;
        let total_ms = avg_read_ms + avg_render_ms;
        let actual_fps = if total_ms > 0.0 { 1000.0 / total_ms } else { 0.0 };

        tracing::info!(
            "Frame {}: read={:.1}ms, render={:.1}ms, total={:.1}ms, fps={:.1}",
            self.frames,
            avg_read_ms,
            avg_render_ms,
            total_ms,
            actual_fps
        );
    }
}

/// Run the live capture loop until the stream ends, a read fails, the quit
/// key is pressed or the window is closed.
///
/// The session is released exactly once and the display is closed on every
/// return path, including errors raised by the display.
pub fn run_live<D>(
    mut session: CaptureSession,
    display: &mut D,
    options: &LiveOptions,
) -> Result<LiveSummary>
where
    D: DisplaySurface,
{
    let outcome = capture_loop(&mut session, display, options);

    let released = session.release();
    display.close();

    let summary = outcome?;
    released?;

    tracing::info!("Stopped after {} frames: {}", summary.frames, summary.reason);
    Ok(summary)
}

fn capture_loop<D>(
    session: &mut CaptureSession,
    display: &mut D,
    options: &LiveOptions,
) -> Result<LiveSummary>
where
    D: DisplaySurface,
{
    let mut stats = LoopStats::default();

    if !session.is_opened() {
        return Ok(LiveSummary {
            frames: 0,
            reason: StopReason::NeverOpened,
        });
    }

    tracing::info!("Starting capture loop, press '{}' to stop", options.quit_key);

    let reason = loop {
        let read_start = Instant::now();
        let frame = match session.read() {
            Ok(Some(frame)) => frame,
            Ok(None) => break StopReason::StreamEnded,
            Err(e) => {
                tracing::warn!("Frame read failed: {}", e);
                break StopReason::ReadFailed;
            }
        };
        stats.total_read_time += read_start.elapsed();

        let render_start = Instant::now();
        display.show(&frame)?;
        stats.total_render_time += render_start.elapsed();
        stats.frames += 1;

        if options.stats_interval > 0 && stats.frames % options.stats_interval == 0 {
            stats.log();
        }

        if let Some(key) = display.poll_key(options.key_wait)? {
            tracing::debug!("Key pressed: {:?}", key);
            if options.quit_key.matches(key) {
                break StopReason::QuitKey;
            }
        }

        if !display.is_open() {
            break StopReason::WindowClosed;
        }
    };

    Ok(LiveSummary {
        frames: stats.frames,
        reason,
    })
}
