//! Polybounce entry point
//!
//! Headless native driver:
//! `polybounce [CONFIG.json] [FRAMES] [segment|plane] [first_hit|all_edges]`.
//! The last two override the contact test and resolution from the config.
//! Runs at a fixed 60 Hz frame rate and prints the final snapshot as JSON.

use polybounce::platform::{FixedClock, FrameLimit, LogRenderer};
use polybounce::sim::SimState;
use polybounce::{ContactTest, Error, Resolution, Runner, Settings};

const DEFAULT_FRAMES: u64 = 600;
const FRAME_HZ: f32 = 60.0;

fn main() {
    env_logger::init();
    log::info!("Polybounce (native) starting...");

    if let Err(e) = run() {
        log::error!("{e}");
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn run() -> polybounce::Result<()> {
    let mut args = std::env::args().skip(1);

    let mut settings = match args.next() {
        Some(path) => Settings::load(&path).unwrap_or_else(|e| {
            log::warn!("Could not load settings from {path}: {e}; using defaults");
            Settings::default()
        }),
        None => Settings::default(),
    };

    let frames = match args.next() {
        Some(s) => s
            .parse::<u64>()
            .ok()
            .filter(|n| *n > 0)
            .ok_or_else(|| {
                Error::InvalidParam(format!("frame count must be a positive integer, got {s}"))
            })?,
        None => DEFAULT_FRAMES,
    };

    if let Some(s) = args.next() {
        settings.contact_test = ContactTest::from_str(&s)
            .ok_or_else(|| Error::InvalidParam(format!("unknown contact test: {s}")))?;
    }
    if let Some(s) = args.next() {
        settings.resolution = Resolution::from_str(&s)
            .ok_or_else(|| Error::InvalidParam(format!("unknown resolution: {s}")))?;
    }

    let state = SimState::new(&settings)?;
    let mut runner = Runner::new(state);

    let summary = runner.run(
        &mut FixedClock::new(FRAME_HZ),
        &mut FrameLimit::new(frames),
        &mut LogRenderer::new(FRAME_HZ as u64),
    );

    println!("{}", serde_json::to_string_pretty(&runner.state.snapshot())?);
    log::info!(
        "Done: {} frames, {} ticks, {} bounces",
        summary.frames,
        summary.ticks,
        summary.bounces
    );
    Ok(())
}
