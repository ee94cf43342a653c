//! Render the cover headlessly and save one frame as a PNG

use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};

use bevy::log::info;
use clap::Parser;
use rust_universe_cover_lib::{
    config::CoverSettings, error::CoverError, tauri_bridge::encoding::to_rgba_image,
    BridgeHandles, CoverInput, CoverRenderer,
};

#[derive(Parser, Debug)]
#[command(version, about = "Render the Rust Universe cover to a PNG")]
struct Args {
    /// Container width in pixels
    #[arg(long, default_value_t = rust_universe_cover_lib::config::DEFAULT_WIDTH)]
    width: u32,

    /// Container height in pixels
    #[arg(long, default_value_t = rust_universe_cover_lib::config::DEFAULT_HEIGHT)]
    height: u32,

    /// Cover texture, relative to the assets directory
    #[arg(long, default_value = rust_universe_cover_lib::config::assets::COVER_TEXTURE)]
    texture: String,

    /// Frames to publish before capturing
    #[arg(long, default_value_t = 30)]
    frames: u32,

    /// Click the cover once so the capture shows the end of a flip
    #[arg(long)]
    flip: bool,

    /// Seconds to wait for the frames before giving up
    #[arg(long, default_value_t = 30)]
    timeout: u64,

    /// Output image
    #[arg(short, long, default_value = "cover.png")]
    output: PathBuf,
}

fn main() -> Result<(), CoverError> {
    let args = Args::parse();
    let settings = CoverSettings {
        width: args.width,
        height: args.height,
        texture: args.texture,
    };

    let bridge = BridgeHandles::default();
    let renderer = CoverRenderer::start(settings.clone(), bridge.clone()).ok_or(
        CoverError::EmptyContainer {
            width: settings.width,
            height: settings.height,
        },
    )?;

    // Published frames start after the pre-roll, so one second of output
    // covers a whole flip
    let mut frames = args.frames;
    if args.flip {
        bridge.input.push(CoverInput::Click)?;
        frames = frames.max(rust_universe_cover_lib::config::TARGET_FPS as u32);
    }

    let deadline = Instant::now() + Duration::from_secs(args.timeout);
    while bridge.stats.snapshot()?.frame_count < frames {
        if Instant::now() >= deadline || !renderer.is_running() {
            renderer.stop()?;
            return Err(CoverError::Timeout(frames));
        }
        thread::sleep(Duration::from_millis(50));
    }

    let frame = bridge.frames.latest()?.ok_or(CoverError::NoFrame)?;
    renderer.stop()?;

    to_rgba_image(&frame)?.save(&args.output)?;
    info!("Saved {}x{} cover to {:?}", frame.width, frame.height, args.output);
    Ok(())
}
