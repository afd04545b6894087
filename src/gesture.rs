//! Hysteresis debouncing of continuous hand features into gesture flags.
//!
//! Each flag has its own rising and falling threshold. Between the two the
//! flag keeps its previous value, which stops chatter when a feature hovers
//! near a single cut-off. A hand that disappears drops all of its flags at once.

use crate::{config::GestureConfig, features::HandFeatures};
use log::debug;

/// Which side of the band turns a flag on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sense {
    /// On when the value falls below `on` (pinch, fist)
    Below,
    /// On when the value rises above `on` (open palm)
    Above,
}

/// Two-threshold switch
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hysteresis {
    pub on: f64,
    pub off: f64,
    pub sense: Sense,
}

impl Hysteresis {
    #[must_use]
    pub const fn below(on: f64, off: f64) -> Self {
        Self { on, off, sense: Sense::Below }
    }

    #[must_use]
    pub const fn above(on: f64, off: f64) -> Self {
        Self { on, off, sense: Sense::Above }
    }

    /// Next flag state given the previous one and the current measurement
    #[must_use]
    pub fn update(&self, prev: bool, value: f64) -> bool {
        match (self.sense, prev) {
            (Sense::Below, false) => value < self.on,
            (Sense::Below, true) => value <= self.off,
            (Sense::Above, false) => value > self.on,
            (Sense::Above, true) => value >= self.off,
        }
    }

    /// True when the band is ordered so the flag cannot oscillate
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        match self.sense {
            Sense::Below => self.on <= self.off,
            Sense::Above => self.on >= self.off,
        }
    }
}

/// Debounced gesture state for both hands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GestureFlags {
    pub left_present: bool,
    pub right_present: bool,
    pub left_pinched: bool,
    pub right_pinched: bool,
    /// Left hand only
    pub left_open_palm: bool,
    /// Right hand only
    pub right_fist: bool,
}

/// Per-hand gesture debouncer
#[derive(Debug, Clone)]
pub struct GestureDebouncer {
    pinch: Hysteresis,
    open_palm: Hysteresis,
    fist: Hysteresis,
    flags: GestureFlags,
}

impl GestureDebouncer {
    #[must_use]
    pub fn new(config: &GestureConfig) -> Self {
        Self {
            pinch: Hysteresis::below(config.pinch_on, config.pinch_off),
            open_palm: Hysteresis::above(config.open_on, config.open_off),
            fist: Hysteresis::below(config.fist_on, config.fist_off),
            flags: GestureFlags::default(),
        }
    }

    /// Current flags
    #[must_use]
    pub const fn flags(&self) -> GestureFlags {
        self.flags
    }

    /// Advance every flag by one frame. Absent hands force their flags false.
    pub fn update(
        &mut self,
        left: Option<&HandFeatures>,
        right: Option<&HandFeatures>,
    ) -> GestureFlags {
        let prev = self.flags;
        let mut next = GestureFlags {
            left_present: left.is_some(),
            right_present: right.is_some(),
            ..GestureFlags::default()
        };

        if let Some(f) = left {
            next.left_pinched = self.pinch.update(prev.left_pinched, f.pinch_distance);
            next.left_open_palm = self.open_palm.update(prev.left_open_palm, f.spread_score);
        }
        if let Some(f) = right {
            next.right_pinched = self.pinch.update(prev.right_pinched, f.pinch_distance);
            next.right_fist = self.fist.update(prev.right_fist, f.spread_score);
        }

        if next != prev {
            debug!("Gesture flags changed: {:?}", next);
        }
        self.flags = next;
        next
    }

    /// Drop every flag
    pub fn reset(&mut self) {
        self.flags = GestureFlags::default();
    }
}
