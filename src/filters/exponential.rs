use super::CursorFilter;
use crate::{constants::CURSOR_HOME, Error, Result};

/// Exponential smoothing filter, `s += (raw - s) * alpha`.
///
/// Starts from a home position rather than the first sample, so the cursor
/// eases in from the center when a hand first appears.
pub struct ExponentialFilter {
    alpha: f64,
    home: (f64, f64),
    x: f64,
    y: f64,
}

impl ExponentialFilter {
    /// Create a filter starting at the surface center
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if alpha is outside (0, 1]
    pub fn new(alpha: f64) -> Result<Self> {
        Self::with_home(alpha, CURSOR_HOME)
    }

    /// Create a filter starting at `home`
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if alpha is outside (0, 1]
    pub fn with_home(alpha: f64, home: (f64, f64)) -> Result<Self> {
        if !(alpha > 0.0 && alpha <= 1.0) {
            return Err(Error::InvalidInput(format!("Alpha must be in (0, 1], got {alpha}")));
        }
        Ok(Self {
            alpha,
            home,
            x: home.0,
            y: home.1,
        })
    }
}

impl CursorFilter for ExponentialFilter {
    fn apply(&mut self, x: f64, y: f64) -> (f64, f64) {
        self.x += (x - self.x) * self.alpha;
        self.y += (y - self.y) * self.alpha;
        (self.x, self.y)
    }

    fn current(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    fn reset(&mut self) {
        (self.x, self.y) = self.home;
    }

    fn name(&self) -> &str {
        "ExponentialFilter"
    }
}
