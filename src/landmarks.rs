//! Hand landmark frames as delivered by the landmark source.
//!
//! A frame holds up to two hands, each with 21 normalized 2D points in the
//! usual anatomical order. Malformed hands are dropped here so later stages
//! can assume well-formed input.

use crate::{
    constants::{MAX_HANDS, NUM_HAND_LANDMARKS},
    features::palm_center,
    Error, Result,
};
use log::debug;
use nalgebra::Point2;
use serde::{Deserialize, Serialize};

pub const WRIST: usize = 0;
pub const THUMB_TIP: usize = 4;
pub const INDEX_MCP: usize = 5;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_MCP: usize = 9;
pub const MIDDLE_TIP: usize = 12;
pub const RING_TIP: usize = 16;
pub const PINKY_MCP: usize = 17;
pub const PINKY_TIP: usize = 20;

/// Fingertips used for the spread score (thumb excluded)
pub const SPREAD_TIPS: [usize; 4] = [INDEX_TIP, MIDDLE_TIP, RING_TIP, PINKY_TIP];

/// Points averaged for a robust palm center
pub const PALM_POINTS: [usize; 4] = [WRIST, INDEX_MCP, MIDDLE_MCP, PINKY_MCP];

/// Handedness reported by the detector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HandLabel {
    Left,
    Right,
    #[default]
    Unknown,
}

/// A single normalized landmark
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f64,
    pub y: f64,
}

impl Landmark {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn to_point(self) -> Point2<f64> {
        Point2::new(self.x, self.y)
    }

    fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// One detected hand
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hand {
    #[serde(default)]
    pub label: HandLabel,
    pub landmarks: Vec<Landmark>,
}

impl Hand {
    /// Create a hand, rejecting malformed landmark sets
    ///
    /// # Errors
    ///
    /// Returns `LandmarkError` if the hand does not have exactly 21 finite points
    pub fn new(label: HandLabel, landmarks: Vec<Landmark>) -> Result<Self> {
        let hand = Self { label, landmarks };
        hand.validate()?;
        Ok(hand)
    }

    /// Check point count and finiteness
    ///
    /// # Errors
    ///
    /// Returns `LandmarkError` describing the first problem found
    pub fn validate(&self) -> Result<()> {
        if self.landmarks.len() != NUM_HAND_LANDMARKS {
            return Err(Error::LandmarkError(format!(
                "Expected {NUM_HAND_LANDMARKS} landmarks, got {}",
                self.landmarks.len()
            )));
        }
        if let Some(i) = self.landmarks.iter().position(|lm| !lm.is_finite()) {
            return Err(Error::LandmarkError(format!("Non-finite landmark at index {i}")));
        }
        Ok(())
    }

    /// Landmark at `index` as a point. Callers pass anatomical indices only.
    #[must_use]
    pub fn point(&self, index: usize) -> Point2<f64> {
        self.landmarks[index].to_point()
    }
}

/// Landmarks for one video frame
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LandmarkFrame {
    pub timestamp_ms: f64,
    #[serde(default)]
    pub hands: Vec<Hand>,
}

impl LandmarkFrame {
    #[must_use]
    pub fn new(timestamp_ms: f64, hands: Vec<Hand>) -> Self {
        Self { timestamp_ms, hands }
    }

    /// Frame with no hands
    #[must_use]
    pub fn empty(timestamp_ms: f64) -> Self {
        Self::new(timestamp_ms, Vec::new())
    }

    /// Hands that passed validation, capped at two
    pub fn valid_hands(&self) -> impl Iterator<Item = &Hand> {
        self.hands
            .iter()
            .filter(|hand| match hand.validate() {
                Ok(()) => true,
                Err(e) => {
                    debug!("Dropping hand at t={:.1}ms: {}", self.timestamp_ms, e);
                    false
                }
            })
            .take(MAX_HANDS)
    }
}

/// Hands resolved to the left and right control roles
#[derive(Debug, Clone, Copy, Default)]
pub struct AssignedHands<'a> {
    pub left: Option<&'a Hand>,
    pub right: Option<&'a Hand>,
}

impl AssignedHands<'_> {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

/// Resolve which hand drives which role.
///
/// Labelled hands win their slot. Remaining slots are filled from unlabelled
/// (or surplus) hands ordered by mirror-corrected palm x, leftmost to LEFT and
/// rightmost to RIGHT. A lone unlabelled hand becomes the right hand.
#[must_use]
pub fn assign_hands(frame: &LandmarkFrame, mirror: bool) -> AssignedHands<'_> {
    let mut assigned = AssignedHands::default();
    let mut spare: Vec<&Hand> = Vec::new();

    for hand in frame.valid_hands() {
        match hand.label {
            HandLabel::Left if assigned.left.is_none() => assigned.left = Some(hand),
            HandLabel::Right if assigned.right.is_none() => assigned.right = Some(hand),
            _ => spare.push(hand),
        }
    }

    if spare.is_empty() {
        return assigned;
    }

    let mut ordered: Vec<(f64, &Hand)> = spare
        .into_iter()
        .map(|hand| (palm_center(hand, mirror).x, hand))
        .collect();
    ordered.sort_by(|a, b| a.0.total_cmp(&b.0));

    match (assigned.left.is_none(), assigned.right.is_none()) {
        (true, true) if ordered.len() == 1 => assigned.right = Some(ordered[0].1),
        (true, true) => {
            assigned.left = ordered.first().map(|(_, h)| *h);
            assigned.right = ordered.last().map(|(_, h)| *h);
        }
        (true, false) => assigned.left = ordered.first().map(|(_, h)| *h),
        (false, true) => assigned.right = ordered.last().map(|(_, h)| *h),
        (false, false) => {}
    }

    assigned
}
