//! Helper functions and utilities for tests
#![allow(dead_code)]

use hand_gesture_control::{
    command::{ControlCommand, PointerKind},
    config::Config,
    landmarks::{Hand, HandLabel, Landmark, LandmarkFrame},
};

/// Wrist to middle knuckle distance of every synthetic hand
pub const PALM: f64 = 0.1;

/// Spread score of a relaxed hand: neither open palm nor fist
pub const RELAXED: f64 = 1.4;
pub const OPEN: f64 = 1.9;
pub const FIST: f64 = 0.9;

/// Thumb-index gap of a clearly open pinch
pub const APART: f64 = 0.1;
pub const PINCHED: f64 = 0.02;

/// Build a hand whose palm center sits at `palm`, with the given spread score
/// and thumb-index distance. Fingers point up the image; the thumb tip sits to
/// the right of the index tip.
pub fn hand(label: HandLabel, palm: (f64, f64), spread: f64, pinch: f64) -> Hand {
    let (cx, cy) = palm;
    let wrist = (cx, cy + 0.75 * PALM);
    let knuckle_y = cy - 0.25 * PALM;

    let mut points = vec![Landmark::new(wrist.0, wrist.1); 21];
    points[5] = Landmark::new(cx - 0.03, knuckle_y);
    points[9] = Landmark::new(cx, knuckle_y);
    points[17] = Landmark::new(cx + 0.03, knuckle_y);

    let tip_y = wrist.1 - spread * PALM;
    for tip in [8, 12, 16, 20] {
        points[tip] = Landmark::new(cx, tip_y);
    }
    points[4] = Landmark::new(cx + pinch, tip_y);

    Hand::new(label, points).expect("synthetic hand is well formed")
}

pub fn right(palm: (f64, f64), spread: f64, pinch: f64) -> Hand {
    hand(HandLabel::Right, palm, spread, pinch)
}

pub fn left(palm: (f64, f64), spread: f64, pinch: f64) -> Hand {
    hand(HandLabel::Left, palm, spread, pinch)
}

pub fn frame(t: f64, hands: Vec<Hand>) -> LandmarkFrame {
    LandmarkFrame::new(t, hands)
}

/// Default configuration without selfie mirroring, so x deltas keep their sign
pub fn unmirrored() -> Config {
    let mut config = Config::default();
    config.input.mirror = false;
    config
}

pub fn pointer_kinds(commands: &[ControlCommand]) -> Vec<PointerKind> {
    commands
        .iter()
        .filter_map(|cmd| match cmd {
            ControlCommand::Pointer(event) => Some(event.kind),
            _ => None,
        })
        .collect()
}

pub fn zoom_deltas(commands: &[ControlCommand]) -> Vec<f64> {
    commands
        .iter()
        .filter_map(|cmd| match cmd {
            ControlCommand::ZoomBy(d) => Some(*d),
            _ => None,
        })
        .collect()
}

pub fn count_kind(kinds: &[PointerKind], kind: PointerKind) -> usize {
    kinds.iter().filter(|k| **k == kind).count()
}
