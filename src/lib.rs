//! Hand gesture control library for two-handed manipulation of a 3D view.
//!
//! This library turns per-frame hand landmarks into:
//! - synthetic pointer events (hover and drag with the right hand)
//! - relative camera commands (zoom, pan and rotate)
//!
//! The per-frame pipeline consists of:
//! 1. Hand assignment and feature extraction (pinch, palm center, spread)
//! 2. Hysteresis debouncing of the pinch, open palm and fist gestures
//! 3. Priority mode arbitration with a cooldown between mode changes
//! 4. Anchored delta mapping and cursor smoothing
//!
//! # Examples
//!
//! ## Basic Usage
//!
//! ```no_run
//! use hand_gesture_control::{
//!     config::Config,
//!     controller::GestureController,
//!     landmarks::{Hand, HandLabel, Landmark, LandmarkFrame},
//! };
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut controller = GestureController::new(&Config::default())?;
//!
//! // One right hand, all 21 landmarks in normalized image coordinates
//! let hand = Hand::new(HandLabel::Right, vec![Landmark::new(0.5, 0.5); 21])?;
//! let frame = LandmarkFrame::new(0.0, vec![hand]);
//!
//! for command in controller.update(&frame, 0.0) {
//!     println!("{command:?}");
//! }
//! println!("Mode: {}", controller.mode());
//! # Ok(())
//! # }
//! ```
//!
//! ## Running the Control Loop
//!
//! ```no_run
//! use hand_gesture_control::{
//!     app::HandControlApp,
//!     command::RecordingCamera,
//!     config::Config,
//!     pointer::HeadlessSurface,
//!     source::ReplaySource,
//! };
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut app = HandControlApp::new(
//!     Config::default(),
//!     ReplaySource::from_file("session.yaml"),
//!     HeadlessSurface::new(1280.0, 720.0),
//!     RecordingCamera::default(),
//! )?;
//!
//! let stats = app.run()?;
//! println!("Processed {} frames", stats.frames_processed);
//! println!("Camera zoom: {:.3}", app.camera().zoom);
//! # Ok(())
//! # }
//! ```

/// Hand landmark model and hand assignment
pub mod landmarks;

/// Per-hand geometric features
pub mod features;

/// Hysteresis gesture flags
pub mod gesture;

/// Control mode priority and cooldown
pub mod arbiter;

/// Cursor smoothing filters
pub mod filters;

/// Anchored camera delta mapping
pub mod mapper;

/// Commands produced by the controller
pub mod command;

/// Synthetic pointer emulation and delivery
pub mod pointer;

/// Per-frame gesture controller
pub mod controller;

/// Landmark sources
pub mod source;

/// Main application module
pub mod app;

/// Cursor control module for X11 systems
pub mod cursor_control;

/// Utility functions
pub mod utils;

/// Error types and result handling
pub mod error;

/// Constants used throughout the application
pub mod constants;

/// Configuration management
pub mod config;

pub use error::{Error, Result};
