//! Configuration management for the hand gesture controller

use crate::{
    constants::{
        DEFAULT_CURSOR_ALPHA, DEFAULT_FIST_OFF, DEFAULT_FIST_ON, DEFAULT_FPS, DEFAULT_MODE_COOLDOWN_MS,
        DEFAULT_MOVE_DEADZONE, DEFAULT_OPEN_OFF, DEFAULT_OPEN_ON, DEFAULT_PAN_SENSITIVITY, DEFAULT_PINCH_OFF,
        DEFAULT_PINCH_ON, DEFAULT_PITCH_GAIN, DEFAULT_ROT_SENSITIVITY, DEFAULT_YAW_GAIN, DEFAULT_ZOOM_DEADZONE,
        DEFAULT_ZOOM_SENSITIVITY, SYNTHETIC_POINTER_ID,
    },
    gesture::Hysteresis,
    Error, Result,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Input handling
    pub input: InputConfig,

    /// Gesture hysteresis thresholds
    pub gesture: GestureConfig,

    /// Continuous control mapping
    pub control: ControlConfig,

    /// Cursor smoothing
    pub cursor: CursorConfig,

    /// Loop timing
    pub runtime: RuntimeConfig,
}

/// Input configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Selfie-mode horizontal flip
    pub mirror: bool,

    /// Start the control loop enabled
    pub enabled: bool,

    /// Identifier carried by synthetic pointer events
    pub pointer_id: u32,
}

/// Hysteresis bands for each gesture
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    /// Pinch turns on below this thumb-index distance
    pub pinch_on: f64,

    /// Pinch turns off above this distance
    pub pinch_off: f64,

    /// Open palm turns on above this spread score (left hand)
    pub open_on: f64,

    /// Open palm turns off below this spread score
    pub open_off: f64,

    /// Fist turns on below this spread score (right hand)
    pub fist_on: f64,

    /// Fist turns off above this spread score
    pub fist_off: f64,
}

/// Mode arbitration and delta mapping parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlConfig {
    /// Minimum time between accepted mode changes
    pub cooldown_ms: f64,

    /// Pan/rotate deadzone per axis
    pub move_deadzone: f64,

    /// Zoom deadzone on the inter-pinch distance change
    pub zoom_deadzone: f64,

    /// Zoom speed
    pub zoom_sensitivity: f64,

    /// Pan speed
    pub pan_sensitivity: f64,

    /// Rotate speed
    pub rot_sensitivity: f64,

    /// Extra gain on yaw
    pub yaw_gain: f64,

    /// Extra gain on pitch
    pub pitch_gain: f64,
}

/// Cursor smoothing configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CursorConfig {
    /// Filter applied to the right index fingertip
    pub filter: String,

    /// Exponential smoothing factor
    pub alpha: f64,
}

/// Loop timing configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Target refresh rate of the control loop
    pub target_fps: u32,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            mirror: true,
            enabled: true,
            pointer_id: SYNTHETIC_POINTER_ID,
        }
    }
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            pinch_on: DEFAULT_PINCH_ON,
            pinch_off: DEFAULT_PINCH_OFF,
            open_on: DEFAULT_OPEN_ON,
            open_off: DEFAULT_OPEN_OFF,
            fist_on: DEFAULT_FIST_ON,
            fist_off: DEFAULT_FIST_OFF,
        }
    }
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            cooldown_ms: DEFAULT_MODE_COOLDOWN_MS,
            move_deadzone: DEFAULT_MOVE_DEADZONE,
            zoom_deadzone: DEFAULT_ZOOM_DEADZONE,
            zoom_sensitivity: DEFAULT_ZOOM_SENSITIVITY,
            pan_sensitivity: DEFAULT_PAN_SENSITIVITY,
            rot_sensitivity: DEFAULT_ROT_SENSITIVITY,
            yaw_gain: DEFAULT_YAW_GAIN,
            pitch_gain: DEFAULT_PITCH_GAIN,
        }
    }
}

impl Default for CursorConfig {
    fn default() -> Self {
        Self {
            filter: "exponential".to_string(),
            alpha: DEFAULT_CURSOR_ALPHA,
        }
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self { target_fps: DEFAULT_FPS }
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::IoError(e.to_string()))?;

        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML text
    pub fn from_yaml(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|e| Error::ConfigError(format!("Failed to parse config: {}", e)))
    }

    /// Save configuration to a YAML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_yaml::to_string(self)
            .map_err(|e| Error::ConfigError(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content).map_err(|e| Error::IoError(e.to_string()))?;

        Ok(())
    }

    /// Create the cursor filter from configuration
    pub fn create_filter(&self) -> Result<Box<dyn crate::filters::CursorFilter>> {
        use crate::filters::{create_filter, exponential::ExponentialFilter};

        match self.cursor.filter.as_str() {
            "exponential" => Ok(Box::new(ExponentialFilter::new(self.cursor.alpha)?)),
            name => create_filter(name),
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let g = &self.gesture;
        let bands = [
            ("Pinch", Hysteresis::below(g.pinch_on, g.pinch_off)),
            ("Open palm", Hysteresis::above(g.open_on, g.open_off)),
            ("Fist", Hysteresis::below(g.fist_on, g.fist_off)),
        ];
        for (name, band) in bands {
            if !band.on.is_finite() || !band.off.is_finite() {
                return Err(Error::ConfigError(format!("{name} thresholds must be finite")));
            }
            if !band.is_well_formed() {
                return Err(Error::ConfigError(format!(
                    "{name} thresholds are inverted (on {}, off {})",
                    band.on, band.off
                )));
            }
        }

        let c = &self.control;
        if c.cooldown_ms.is_nan() || c.cooldown_ms <= 0.0 {
            return Err(Error::ConfigError("Mode cooldown must be greater than 0".to_string()));
        }
        if [c.move_deadzone, c.zoom_deadzone].iter().any(|d| d.is_nan() || *d < 0.0) {
            return Err(Error::ConfigError("Deadzones must not be negative".to_string()));
        }
        let gains = [
            c.zoom_sensitivity,
            c.pan_sensitivity,
            c.rot_sensitivity,
            c.yaw_gain,
            c.pitch_gain,
        ];
        if gains.iter().any(|v| !v.is_finite()) {
            return Err(Error::ConfigError("Sensitivities must be finite".to_string()));
        }

        if !(self.cursor.alpha > 0.0 && self.cursor.alpha <= 1.0) {
            return Err(Error::ConfigError(
                "Cursor alpha must be in (0.0, 1.0]".to_string(),
            ));
        }

        if self.runtime.target_fps == 0 {
            return Err(Error::ConfigError("Target FPS must be greater than 0".to_string()));
        }

        Ok(())
    }
}

/// Example configuration file content
pub const EXAMPLE_CONFIG: &str = r#"# Hand Gesture Control Configuration

# Input handling
input:
  mirror: true        # selfie camera, flip x
  enabled: true
  pointer_id: 1

# Hysteresis bands (normalized image units / spread score)
gesture:
  pinch_on: 0.04
  pinch_off: 0.06
  open_on: 1.70
  open_off: 1.55
  fist_on: 1.12
  fist_off: 1.25

# Mode arbitration and camera deltas
control:
  cooldown_ms: 220.0
  move_deadzone: 0.0025
  zoom_deadzone: 0.0018
  zoom_sensitivity: 2.2
  pan_sensitivity: 1.15
  rot_sensitivity: 2.4
  yaw_gain: 2.0
  pitch_gain: 1.6

# Cursor smoothing (exponential or none)
cursor:
  filter: "exponential"
  alpha: 0.28

# Loop timing
runtime:
  target_fps: 30
"#;
