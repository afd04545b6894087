//! Landmark sources.
//!
//! A source owns video capture and the landmark model. The control loop asks
//! it for the next available video frame and runs detection at most once per
//! distinct frame timestamp.

use crate::{landmarks::LandmarkFrame, Error, Result};
use log::{debug, info};
use std::path::{Path, PathBuf};

/// Handle to an available video frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VideoFrame {
    /// Producer-side frame index
    pub index: usize,
    /// Presentation time of the frame
    pub timestamp_ms: f64,
}

/// Supplier of hand landmarks
pub trait LandmarkSource {
    /// Acquire capture and model resources
    fn open(&mut self) -> Result<()>;

    /// Latest available video frame, `None` when nothing is ready yet. May
    /// return the same frame again if the producer has not advanced.
    fn next_frame(&mut self) -> Option<VideoFrame>;

    /// Run landmark detection on `frame`
    fn detect(&mut self, frame: &VideoFrame, timestamp_ms: f64) -> Result<Option<LandmarkFrame>>;

    /// Finite sources report when they have nothing left
    fn is_exhausted(&self) -> bool {
        false
    }

    /// Release capture and model resources
    fn close(&mut self);
}

/// Load a recorded session (YAML sequence of frames)
pub fn load_session<P: AsRef<Path>>(path: P) -> Result<Vec<LandmarkFrame>> {
    let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
        Error::Acquisition(format!("Cannot read session {}: {e}", path.as_ref().display()))
    })?;
    serde_yaml::from_str(&content)
        .map_err(|e| Error::Acquisition(format!("Malformed session {}: {e}", path.as_ref().display())))
}

/// Write a recorded session
pub fn save_session<P: AsRef<Path>>(path: P, frames: &[LandmarkFrame]) -> Result<()> {
    let content = serde_yaml::to_string(frames)
        .map_err(|e| Error::InvalidInput(format!("Failed to serialize session: {e}")))?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Replays recorded landmark frames in place of a camera and model
#[derive(Debug, Clone, Default)]
pub struct ReplaySource {
    path: Option<PathBuf>,
    frames: Vec<LandmarkFrame>,
    next: usize,
    open: bool,
    detections: usize,
}

impl ReplaySource {
    /// Source that loads `path` when opened
    #[must_use]
    pub fn from_file<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            path: Some(path.into()),
            ..Self::default()
        }
    }

    /// Source over frames already in memory
    #[must_use]
    pub fn from_frames(frames: Vec<LandmarkFrame>) -> Self {
        Self {
            frames,
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open
    }

    /// Number of `detect` calls served
    #[must_use]
    pub const fn detections(&self) -> usize {
        self.detections
    }
}

impl LandmarkSource for ReplaySource {
    fn open(&mut self) -> Result<()> {
        if let Some(path) = &self.path {
            self.frames = load_session(path)?;
            info!("Loaded {} recorded frames from {}", self.frames.len(), path.display());
        }
        self.next = 0;
        self.open = true;
        Ok(())
    }

    fn next_frame(&mut self) -> Option<VideoFrame> {
        if !self.open {
            return None;
        }
        let frame = self.frames.get(self.next)?;
        let video = VideoFrame {
            index: self.next,
            timestamp_ms: frame.timestamp_ms,
        };
        self.next += 1;
        Some(video)
    }

    fn detect(&mut self, frame: &VideoFrame, _timestamp_ms: f64) -> Result<Option<LandmarkFrame>> {
        if !self.open {
            return Err(Error::Acquisition("Replay source is not open".to_string()));
        }
        self.detections += 1;
        Ok(self.frames.get(frame.index).cloned())
    }

    fn is_exhausted(&self) -> bool {
        self.open && self.next >= self.frames.len()
    }

    fn close(&mut self) {
        if self.open {
            debug!("Closing replay source after {} detections", self.detections);
        }
        self.open = false;
    }
}
