//! Main application module: the per-frame control loop.
//!
//! The loop is single threaded and runs once per display refresh. Each tick
//! takes the next available video frame, skips it if its timestamp was
//! already processed, runs detection once, and routes the controller's
//! commands to the render surface and the camera.

use crate::{
    arbiter::ControlMode,
    command::{CameraControl, ControlCommand},
    config::Config,
    controller::GestureController,
    error::Result,
    landmarks::LandmarkFrame,
    pointer::{PointerBridge, RenderSurface},
    source::LandmarkSource,
};
use log::{debug, error, info, warn};
use std::time::{Duration, Instant};

/// Lifecycle of the control loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    /// Not running, resources released
    Disabled,
    /// Ticking
    Running,
    /// Acquisition failed; inert until disabled and enabled again
    Failed,
}

/// What a single tick did
#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    /// Loop is not running
    Inactive,
    /// Render surface unavailable this frame
    NoSurface,
    /// Producer has no frame yet
    NoFrame,
    /// Same video timestamp as the last processed frame
    Duplicate,
    /// Detection failed for this frame; state held
    DetectFailed,
    /// Frame processed
    Processed {
        mode: ControlMode,
        commands: Vec<ControlCommand>,
    },
}

/// Loop counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoopStats {
    pub frames_processed: u64,
    pub frames_duplicate: u64,
    pub frames_skipped: u64,
    pub pointer_events: u64,
    pub camera_commands: u64,
}

/// Hand gesture control application
pub struct HandControlApp<S: LandmarkSource, R: RenderSurface, C: CameraControl> {
    config: Config,
    source: S,
    surface: R,
    camera: C,
    controller: GestureController,
    bridge: PointerBridge,
    state: LoopState,
    last_video_time: Option<f64>,
    stats: LoopStats,
}

impl<S: LandmarkSource, R: RenderSurface, C: CameraControl> HandControlApp<S, R, C> {
    /// Build an inert loop. Nothing is acquired until [`Self::enable`].
    pub fn new(config: Config, source: S, surface: R, camera: C) -> Result<Self> {
        info!("Initializing hand gesture control");
        let controller = GestureController::new(&config)?;
        let bridge = PointerBridge::new(config.input.pointer_id);

        Ok(Self {
            config,
            source,
            surface,
            camera,
            controller,
            bridge,
            state: LoopState::Disabled,
            last_video_time: None,
            stats: LoopStats::default(),
        })
    }

    /// Build the loop and switch it to the configured `input.enabled` state
    ///
    /// # Errors
    ///
    /// Returns the construction error, or the acquisition error when the
    /// configuration asks for an enabled loop and the source cannot open
    pub fn start(config: Config, source: S, surface: R, camera: C) -> Result<Self> {
        let enabled = config.input.enabled;
        let mut app = Self::new(config, source, surface, camera)?;
        app.set_enabled(enabled)?;
        Ok(app)
    }

    #[must_use]
    pub const fn state(&self) -> LoopState {
        self.state
    }

    #[must_use]
    pub const fn stats(&self) -> LoopStats {
        self.stats
    }

    #[must_use]
    pub const fn controller(&self) -> &GestureController {
        &self.controller
    }

    #[must_use]
    pub const fn source(&self) -> &S {
        &self.source
    }

    #[must_use]
    pub const fn surface(&self) -> &R {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut R {
        &mut self.surface
    }

    #[must_use]
    pub const fn camera(&self) -> &C {
        &self.camera
    }

    /// Turn the loop on or off
    pub fn set_enabled(&mut self, enabled: bool) -> Result<()> {
        if enabled {
            self.enable()
        } else {
            self.disable();
            Ok(())
        }
    }

    /// Acquire the landmark source and start ticking. An acquisition failure
    /// is logged once and returned; the loop stays inert.
    pub fn enable(&mut self) -> Result<()> {
        match self.state {
            LoopState::Running => return Ok(()),
            LoopState::Failed => self.disable(),
            LoopState::Disabled => {}
        }

        self.controller.reset();
        self.last_video_time = None;

        if let Err(e) = self.source.open() {
            error!("Hand input init failed: {}", e);
            self.state = LoopState::Failed;
            return Err(e);
        }

        info!("Hand gesture control enabled");
        self.state = LoopState::Running;
        Ok(())
    }

    /// Stop ticking, release any held pointer, release the source and reset
    /// every piece of gesture state. Safe to call repeatedly.
    pub fn disable(&mut self) {
        if self.state == LoopState::Disabled {
            return;
        }

        for cmd in self.controller.release() {
            self.dispatch(&cmd);
        }
        self.source.close();
        self.controller.reset();
        self.last_video_time = None;

        let was_running = self.state == LoopState::Running;
        self.state = LoopState::Disabled;
        if was_running {
            info!(
                "Hand gesture control disabled: {} frames processed, {} duplicates, {} skipped, {} pointer events, {} camera commands",
                self.stats.frames_processed,
                self.stats.frames_duplicate,
                self.stats.frames_skipped,
                self.stats.pointer_events,
                self.stats.camera_commands
            );
        }
    }

    /// Run one display-refresh cycle
    pub fn tick(&mut self, now_ms: f64) -> TickOutcome {
        if self.state != LoopState::Running {
            return TickOutcome::Inactive;
        }

        if self.surface.client_rect().is_none() {
            self.stats.frames_skipped += 1;
            return TickOutcome::NoSurface;
        }

        let Some(video) = self.source.next_frame() else {
            return TickOutcome::NoFrame;
        };

        if self.last_video_time == Some(video.timestamp_ms) {
            self.stats.frames_duplicate += 1;
            return TickOutcome::Duplicate;
        }
        self.last_video_time = Some(video.timestamp_ms);

        let landmarks = match self.source.detect(&video, now_ms) {
            Ok(Some(frame)) => frame,
            Ok(None) => LandmarkFrame::empty(video.timestamp_ms),
            Err(e) => {
                warn!("Landmark detection failed for frame {}: {}", video.index, e);
                self.stats.frames_skipped += 1;
                return TickOutcome::DetectFailed;
            }
        };

        let commands = self.controller.update(&landmarks, now_ms);
        for cmd in &commands {
            self.dispatch(cmd);
        }

        self.stats.frames_processed += 1;
        let mode = self.controller.mode();
        debug!(
            "Frame {} t={:.1}ms mode={} commands={}",
            video.index,
            video.timestamp_ms,
            mode,
            commands.len()
        );

        TickOutcome::Processed { mode, commands }
    }

    /// Drive [`Self::tick`] at the configured rate until the source runs out
    /// or the loop is disabled. Tears the loop down on return. A stopped loop
    /// whose configuration has `input.enabled` off is left stopped.
    pub fn run(&mut self) -> Result<LoopStats> {
        if self.state != LoopState::Running {
            if !self.config.input.enabled {
                info!("Hand input disabled in configuration, not running");
                return Ok(self.stats);
            }
            self.enable()?;
        }

        let fps = self.config.runtime.target_fps.max(1);
        let frame_interval = Duration::from_secs_f64(1.0 / f64::from(fps));
        let start_time = Instant::now();
        info!("Entering control loop at {} fps", fps);

        while self.state == LoopState::Running && !self.source.is_exhausted() {
            let frame_start = Instant::now();
            self.tick(start_time.elapsed().as_secs_f64() * 1000.0);

            if let Some(remaining) = frame_interval.checked_sub(frame_start.elapsed()) {
                std::thread::sleep(remaining);
            }
        }

        let stats = self.stats;
        self.disable();
        Ok(stats)
    }

    fn dispatch(&mut self, cmd: &ControlCommand) {
        match cmd {
            ControlCommand::Pointer(event) => {
                if self.bridge.deliver(&mut self.surface, event) {
                    self.stats.pointer_events += 1;
                }
            }
            camera_cmd => {
                camera_cmd.apply_to(&mut self.camera);
                self.stats.camera_commands += 1;
            }
        }
    }
}

impl<S: LandmarkSource, R: RenderSurface, C: CameraControl> Drop for HandControlApp<S, R, C> {
    fn drop(&mut self) {
        self.disable();
    }
}
