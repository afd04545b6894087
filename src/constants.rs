//! Constants used throughout the application

/// Number of landmarks per tracked hand
pub const NUM_HAND_LANDMARKS: usize = 21;

/// Maximum number of hands per frame
pub const MAX_HANDS: usize = 2;

/// Default pinch hysteresis band (normalized image units)
pub const DEFAULT_PINCH_ON: f64 = 0.04;
pub const DEFAULT_PINCH_OFF: f64 = 0.06;

/// Default open-palm hysteresis band (spread score, higher is more open)
pub const DEFAULT_OPEN_ON: f64 = 1.70;
pub const DEFAULT_OPEN_OFF: f64 = 1.55;

/// Default fist hysteresis band (spread score, lower is more closed)
pub const DEFAULT_FIST_ON: f64 = 1.12;
pub const DEFAULT_FIST_OFF: f64 = 1.25;

/// Lower bound for palm size so spread scores never divide by zero
pub const PALM_SIZE_FLOOR: f64 = 1e-6;

/// Minimum time between accepted mode transitions
pub const DEFAULT_MODE_COOLDOWN_MS: f64 = 220.0;

/// Cursor low-pass smoothing factor, higher is snappier
pub const DEFAULT_CURSOR_ALPHA: f64 = 0.28;

/// Positional deadzone for pan and rotate
pub const DEFAULT_MOVE_DEADZONE: f64 = 0.0025;

/// Distance deadzone for zoom
pub const DEFAULT_ZOOM_DEADZONE: f64 = 0.0018;

/// Default sensitivities
pub const DEFAULT_ZOOM_SENSITIVITY: f64 = 2.2;
pub const DEFAULT_PAN_SENSITIVITY: f64 = 1.15;
pub const DEFAULT_ROT_SENSITIVITY: f64 = 2.4;

/// Per-axis rotate gains applied on top of the rotate sensitivity
pub const DEFAULT_YAW_GAIN: f64 = 2.0;
pub const DEFAULT_PITCH_GAIN: f64 = 1.6;

/// Stable identifier carried by every synthetic pointer event
pub const SYNTHETIC_POINTER_ID: u32 = 1;

/// Pressure reported while the synthetic button is held
pub const PRESSED_PRESSURE: f64 = 0.5;

/// Cursor starting position (center of the surface)
pub const CURSOR_HOME: (f64, f64) = (0.5, 0.5);

/// Default frames per second for the replay loop
pub const DEFAULT_FPS: u32 = 30;
