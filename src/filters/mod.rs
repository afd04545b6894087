//! Cursor smoothing filters.
//!
//! The right index fingertip is noisy frame to frame; a low-pass filter sits
//! between it and the synthetic pointer so the cursor does not shake.

/// Exponential filter for responsive smoothing
pub mod exponential;

use crate::{
    constants::{CURSOR_HOME, DEFAULT_CURSOR_ALPHA},
    Error, Result,
};

/// Trait for all cursor filters
pub trait CursorFilter: Send + Sync {
    /// Feed a raw position, get the filtered one
    fn apply(&mut self, x: f64, y: f64) -> (f64, f64);

    /// Last filtered position
    fn current(&self) -> (f64, f64);

    /// Reset filter state
    fn reset(&mut self);

    /// Get filter name
    fn name(&self) -> &str;
}

/// No-op filter that passes through values unchanged
pub struct NoFilter {
    last: (f64, f64),
    home: (f64, f64),
}

impl NoFilter {
    #[must_use]
    pub const fn new(home: (f64, f64)) -> Self {
        Self { last: home, home }
    }
}

impl CursorFilter for NoFilter {
    fn apply(&mut self, x: f64, y: f64) -> (f64, f64) {
        self.last = (x, y);
        self.last
    }

    fn current(&self) -> (f64, f64) {
        self.last
    }

    fn reset(&mut self) {
        self.last = self.home;
    }

    fn name(&self) -> &str {
        "NoFilter"
    }
}

/// Create a cursor filter by type name.
///
/// Accepts `none`, `exponential` and `exponential:<alpha>`.
pub fn create_filter(filter_type: &str) -> Result<Box<dyn CursorFilter>> {
    let spec = filter_type.to_lowercase();
    let mut parts = spec.splitn(2, ':');
    let name = parts.next().unwrap_or_default();
    let param = parts.next();

    match (name, param) {
        ("none" | "nofilter", None) => Ok(Box::new(NoFilter::new(CURSOR_HOME))),
        ("exponential", None) => Ok(Box::new(exponential::ExponentialFilter::new(DEFAULT_CURSOR_ALPHA)?)),
        ("exponential", Some(alpha)) => {
            let alpha: f64 = alpha
                .parse()
                .map_err(|_| Error::InvalidInput(format!("Invalid alpha value: {alpha}")))?;
            Ok(Box::new(exponential::ExponentialFilter::new(alpha)?))
        }
        _ => Err(Error::InvalidInput(format!("Unknown filter type: {filter_type}"))),
    }
}
