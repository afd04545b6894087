//! Hand gesture control application: replays recorded hand landmarks through
//! the gesture controller and drives a pointer surface and a camera.

use anyhow::{Context, Result};
use clap::Parser;
use hand_gesture_control::{
    app::HandControlApp,
    command::RecordingCamera,
    config::{Config, EXAMPLE_CONFIG},
    cursor_control::X11Surface,
    pointer::{HeadlessSurface, RenderSurface},
    source::ReplaySource,
};
use log::{info, warn};

/// Logical size of the headless surface
const HEADLESS_WIDTH: f64 = 1280.0;
const HEADLESS_HEIGHT: f64 = 720.0;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Recorded landmark session to replay (YAML)
    #[arg(short, long, required_unless_present = "print_config")]
    replay: Option<String>,

    /// Path to configuration file (YAML format)
    #[arg(short = 'C', long)]
    config: Option<String>,

    /// Disable selfie-mode mirroring
    #[arg(long)]
    no_mirror: bool,

    /// Drive the real X11 pointer instead of a logging surface
    #[arg(long)]
    x11: bool,

    /// Control loop rate
    #[arg(long)]
    fps: Option<u32>,

    /// Enable debug output
    #[arg(short, long)]
    debug: bool,

    /// Print an example configuration and exit
    #[arg(long)]
    print_config: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.print_config {
        print!("{EXAMPLE_CONFIG}");
        return Ok(());
    }

    if args.debug {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("debug"));
    } else {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    }

    info!("Hand Gesture Control");

    let mut config = if let Some(config_path) = &args.config {
        info!("Loading configuration from: {}", config_path);
        match Config::from_file(config_path) {
            Ok(cfg) => cfg,
            Err(e) => {
                warn!("Failed to load config file: {}. Using defaults.", e);
                Config::default()
            }
        }
    } else {
        Config::default()
    };

    if args.no_mirror {
        config.input.mirror = false;
    }
    if let Some(fps) = args.fps {
        config.runtime.target_fps = fps;
    }
    config.validate().context("Invalid configuration")?;

    if !config.input.enabled {
        info!("Hand input disabled in configuration, nothing to do");
        return Ok(());
    }

    let replay = args.replay.context("No landmark session given")?;
    let source = ReplaySource::from_file(replay);

    if args.x11 {
        let surface = X11Surface::new().context("Failed to open X11 pointer surface")?;
        run(config, source, surface)
    } else {
        run(config, source, HeadlessSurface::new(HEADLESS_WIDTH, HEADLESS_HEIGHT))
    }
}

fn run<R: RenderSurface>(config: Config, source: ReplaySource, surface: R) -> Result<()> {
    let mut app = HandControlApp::start(config, source, surface, RecordingCamera::default())?;
    let stats = app.run()?;

    let camera = app.camera();
    info!(
        "Session finished: {} frames, {} pointer events, {} camera commands",
        stats.frames_processed, stats.pointer_events, stats.camera_commands
    );
    info!(
        "Camera: zoom {:+.4}, pan ({:+.4}, {:+.4}), yaw {:+.4}, pitch {:+.4}",
        camera.zoom, camera.pan.0, camera.pan.1, camera.yaw, camera.pitch
    );

    Ok(())
}
