use anyhow::{Context, Result};
use camview::{
    logging, run_live, CaptureSession, LiveOptions, QuitKey, SourceDescriptor, StopReason,
    WindowDisplay, WindowSettings, DEFAULT_CSI_PIPELINE,
};
use clap::Parser;
use std::process::ExitCode;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(author, version, about = "Live camera viewer", long_about = None)]
struct Args {
    /// Camera index, or a GStreamer pipeline ending in appsink
    #[arg(short, long, default_value = DEFAULT_CSI_PIPELINE)]
    source: SourceDescriptor,

    /// Window label
    #[arg(short, long, default_value = "CSI Camera")]
    window: String,

    /// Key that stops the viewer: a single character or "esc"
    #[arg(short, long, default_value = "q")]
    quit_key: QuitKey,

    /// Milliseconds to wait for a key press after each frame
    #[arg(long, default_value_t = 1)]
    key_wait_ms: u64,

    /// Log timing stats every N frames (0 disables)
    #[arg(long, default_value_t = 30)]
    stats_interval: u64,

    /// Borderless window
    #[arg(long)]
    borderless: bool,

    /// Keep the window above all others
    #[arg(long)]
    topmost: bool,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();
    logging::init_logging(args.debug);

    tracing::info!("csi-view {}", env!("CARGO_PKG_VERSION"));

    let session = CaptureSession::open(&args.source);
    if let Some((width, height)) = session.resolution() {
        tracing::info!("Capture: {}x{}", width, height);
    }
    let mut display = WindowDisplay::new(
        args.window,
        WindowSettings {
            resizable: true,
            borderless: args.borderless,
            topmost: args.topmost,
        },
    );
    let options = LiveOptions {
        quit_key: args.quit_key,
        key_wait: Duration::from_millis(args.key_wait_ms),
        stats_interval: args.stats_interval,
    };

    let summary =
        run_live(session, &mut display, &options).context("Live capture viewer failed")?;

    if summary.reason == StopReason::NeverOpened {
        tracing::error!("Camera not opened");
        return Ok(ExitCode::FAILURE);
    }

    Ok(ExitCode::SUCCESS)
}
