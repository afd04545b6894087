//! Mode arbitration: gesture flags in, exactly one control mode out.
//!
//! Selection is split in two. [`requested_mode`] is a pure priority table over
//! the current flags. [`ModeArbiter`] commits a request only when the cooldown
//! since the last accepted transition has elapsed; requests inside the window
//! are dropped, not queued.

use crate::gesture::GestureFlags;
use log::{debug, info};
use std::fmt;

/// Active control mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ControlMode {
    /// No right hand, nothing to do
    #[default]
    Idle,
    /// Right hand moves the cursor
    Hover,
    /// Right pinch holds the pointer button
    Drag,
    /// Both hands pinched, distance between them zooms
    Zoom,
    /// Left open palm translates the camera
    Pan,
    /// Right fist orbits the camera
    Rotate,
}

impl ControlMode {
    /// Every mode, in priority order followed by the fallbacks
    pub const ALL: [Self; 6] = [Self::Zoom, Self::Drag, Self::Rotate, Self::Pan, Self::Hover, Self::Idle];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "IDLE",
            Self::Hover => "HOVER",
            Self::Drag => "DRAG",
            Self::Zoom => "ZOOM",
            Self::Pan => "PAN",
            Self::Rotate => "ROTATE",
        }
    }
}

impl fmt::Display for ControlMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Candidate predicates evaluated from one flag snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Predicates {
    pub both_pinch: bool,
    pub drag: bool,
    pub rotate: bool,
    pub pan: bool,
}

impl Predicates {
    #[must_use]
    pub fn from_flags(flags: &GestureFlags) -> Self {
        let both_pinch = flags.left_pinched && flags.right_pinched;
        let drag = flags.right_pinched && !flags.left_pinched;
        let rotate = flags.right_fist;
        let pan = flags.left_open_palm && !both_pinch && !drag && !rotate;
        Self { both_pinch, drag, rotate, pan }
    }
}

/// Priority table: ZOOM > DRAG > ROTATE > PAN > HOVER > IDLE
#[must_use]
pub fn select_mode(predicates: Predicates, right_present: bool) -> ControlMode {
    if predicates.both_pinch {
        ControlMode::Zoom
    } else if predicates.drag {
        ControlMode::Drag
    } else if predicates.rotate {
        ControlMode::Rotate
    } else if predicates.pan {
        ControlMode::Pan
    } else if right_present {
        ControlMode::Hover
    } else {
        ControlMode::Idle
    }
}

/// Mode the flags ask for, ignoring timing
#[must_use]
pub fn requested_mode(flags: &GestureFlags) -> ControlMode {
    select_mode(Predicates::from_flags(flags), flags.right_present)
}

/// An accepted mode change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: ControlMode,
    pub to: ControlMode,
}

/// Cooldown-gated holder of the committed mode
#[derive(Debug, Clone)]
pub struct ModeArbiter {
    mode: ControlMode,
    cooldown_ms: f64,
    last_change_ms: Option<f64>,
}

impl ModeArbiter {
    #[must_use]
    pub const fn new(cooldown_ms: f64) -> Self {
        Self {
            mode: ControlMode::Idle,
            cooldown_ms,
            last_change_ms: None,
        }
    }

    #[must_use]
    pub const fn mode(&self) -> ControlMode {
        self.mode
    }

    /// Whether a transition at `now_ms` would still be inside the cooldown window
    #[must_use]
    pub fn in_cooldown(&self, now_ms: f64) -> bool {
        self.last_change_ms
            .is_some_and(|last| now_ms - last < self.cooldown_ms)
    }

    /// Ask for `requested`. Returns the transition when it is accepted.
    pub fn request(&mut self, requested: ControlMode, now_ms: f64) -> Option<Transition> {
        if requested == self.mode {
            return None;
        }
        if self.in_cooldown(now_ms) {
            debug!(
                "Dropping {} -> {} request inside cooldown",
                self.mode, requested
            );
            return None;
        }

        let transition = Transition {
            from: self.mode,
            to: requested,
        };
        info!("Mode {} -> {}", transition.from, transition.to);
        self.mode = requested;
        self.last_change_ms = Some(now_ms);
        Some(transition)
    }

    /// Back to IDLE with no cooldown pending
    pub fn reset(&mut self) {
        self.mode = ControlMode::Idle;
        self.last_change_ms = None;
    }
}
