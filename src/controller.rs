//! Per-frame gesture controller.
//!
//! Owns every piece of state that survives between frames: gesture flags,
//! committed mode and its cooldown, mode anchors, cursor smoothing and the
//! synthetic button. One call to [`GestureController::update`] runs the whole
//! pipeline for a frame and returns the commands it produced.

use crate::{
    arbiter::{requested_mode, ControlMode, ModeArbiter, Transition},
    command::{ControlCommand, PointerEvent},
    config::Config,
    features::{extract, HandFeatures},
    gesture::{GestureDebouncer, GestureFlags},
    landmarks::{assign_hands, LandmarkFrame},
    mapper::ControlMapper,
    pointer::PointerEmulator,
    Result,
};
use log::debug;

/// Gesture classification and mode arbitration state machine
pub struct GestureController {
    mirror: bool,
    debouncer: GestureDebouncer,
    arbiter: ModeArbiter,
    mapper: ControlMapper,
    pointer: PointerEmulator,
}

impl GestureController {
    /// Build a controller from a validated configuration
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when the configuration is invalid, or
    /// `InvalidInput` for an unknown cursor filter
    pub fn new(config: &Config) -> Result<Self> {
        config.validate()?;
        let cursor_filter = config.create_filter()?;
        debug!("Cursor filter: {}", cursor_filter.name());

        Ok(Self {
            mirror: config.input.mirror,
            debouncer: GestureDebouncer::new(&config.gesture),
            arbiter: ModeArbiter::new(config.control.cooldown_ms),
            mapper: ControlMapper::new(config.control.clone(), cursor_filter),
            pointer: PointerEmulator::new(),
        })
    }

    #[must_use]
    pub const fn mode(&self) -> ControlMode {
        self.arbiter.mode()
    }

    #[must_use]
    pub const fn flags(&self) -> GestureFlags {
        self.debouncer.flags()
    }

    /// Smoothed cursor position
    #[must_use]
    pub fn cursor(&self) -> (f64, f64) {
        self.mapper.cursor()
    }

    #[must_use]
    pub const fn pointer_down(&self) -> bool {
        self.pointer.is_down()
    }

    /// Anchors, for inspection
    #[must_use]
    pub const fn mapper(&self) -> &ControlMapper {
        &self.mapper
    }

    /// Run one frame through the pipeline
    pub fn update(&mut self, frame: &LandmarkFrame, now_ms: f64) -> Vec<ControlCommand> {
        let hands = assign_hands(frame, self.mirror);
        if hands.is_empty() {
            return self.on_hands_lost(now_ms);
        }

        let left = hands.left.map(|h| extract(h, self.mirror));
        let right = hands.right.map(|h| extract(h, self.mirror));

        self.mapper.track_cursor(right.as_ref());
        let flags = self.debouncer.update(left.as_ref(), right.as_ref());

        let mut commands = Vec::new();
        if let Some(transition) = self.arbiter.request(requested_mode(&flags), now_ms) {
            self.on_exit(transition, &mut commands);
        }

        self.drive_pointer(right.is_some(), &mut commands);

        if let Some(cmd) = self.camera_delta(&flags, left.as_ref(), right.as_ref()) {
            commands.push(cmd);
        }

        commands
    }

    /// Release an outstanding pointer-down at the current cursor
    pub fn release(&mut self) -> Vec<ControlCommand> {
        let (x, y) = self.mapper.cursor();
        Self::pointer_commands(self.pointer.release(x, y))
    }

    /// Back to the initial state. Emits nothing; call [`Self::release`] first
    /// if a pointer-down may be outstanding.
    pub fn reset(&mut self) {
        self.debouncer.reset();
        self.arbiter.reset();
        self.mapper.reset();
        self.pointer.reset();
    }

    fn on_hands_lost(&mut self, now_ms: f64) -> Vec<ControlCommand> {
        self.debouncer.reset();

        let mut commands = Vec::new();
        if let Some(transition) = self.arbiter.request(ControlMode::Idle, now_ms) {
            self.on_exit(transition, &mut commands);
        }
        commands.extend(self.release());
        self.mapper.clear_anchors();
        commands
    }

    /// Side effects of leaving a mode
    fn on_exit(&mut self, transition: Transition, commands: &mut Vec<ControlCommand>) {
        self.mapper.clear_anchor(transition.from);
        if transition.from == ControlMode::Drag && self.pointer.is_down() {
            debug!("Leaving DRAG with button held, releasing");
            commands.extend(self.release());
        }
    }

    fn drive_pointer(&mut self, right_present: bool, commands: &mut Vec<ControlCommand>) {
        let (x, y) = self.mapper.cursor();
        let events = match (self.arbiter.mode(), right_present) {
            (ControlMode::Drag, true) => self.pointer.drive(x, y, true),
            (ControlMode::Hover, true) => self.pointer.drive(x, y, false),
            _ => self.pointer.release(x, y),
        };
        commands.extend(Self::pointer_commands(events));
    }

    fn camera_delta(
        &mut self,
        flags: &GestureFlags,
        left: Option<&HandFeatures>,
        right: Option<&HandFeatures>,
    ) -> Option<ControlCommand> {
        let mode = self.arbiter.mode();
        self.mapper.map(mode, flags, left, right)
    }

    fn pointer_commands(events: Vec<PointerEvent>) -> Vec<ControlCommand> {
        events.into_iter().map(ControlCommand::Pointer).collect()
    }
}
