use anyhow::Result;
use camview::{logging, view_still, ViewerError, WindowDisplay, WindowSettings};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(author, version, about = "Show an image until a key is pressed", long_about = None)]
struct Args {
    /// Image file to show
    #[arg(default_value = "test_img.jpg")]
    path: PathBuf,

    /// Window label
    #[arg(short, long, default_value = "Output")]
    window: String,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();
    logging::init_logging(args.debug);

    tracing::info!("image-view {}", env!("CARGO_PKG_VERSION"));

    let mut display = WindowDisplay::new(args.window, WindowSettings::default());

    match view_still(&args.path, &mut display) {
        Ok(key) => {
            tracing::debug!("Dismissed with {:?}", key);
            Ok(ExitCode::SUCCESS)
        }
        Err(e @ ViewerError::ImageLoad { .. }) => {
            tracing::error!("Image not loaded: {}", e);
            Ok(ExitCode::FAILURE)
        }
        Err(e) => Err(e.into()),
    }
}
