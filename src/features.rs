//! Per-hand scalar features derived from raw landmarks.
//!
//! Everything here is a pure function of a single hand. The horizontal mirror
//! correction is applied to every position a consumer sees, so screen-space
//! left and right match a front-facing camera when `mirror` is on.

use crate::{
    constants::PALM_SIZE_FLOOR,
    landmarks::{Hand, INDEX_TIP, MIDDLE_MCP, PALM_POINTS, SPREAD_TIPS, THUMB_TIP, WRIST},
};
use nalgebra::{distance, Point2};

/// Features of one hand for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandFeatures {
    /// Thumb tip to index tip distance
    pub pinch_distance: f64,
    /// Midpoint between thumb tip and index tip
    pub pinch_point: Point2<f64>,
    /// Mean of wrist and the index, middle and pinky knuckles
    pub palm_center: Point2<f64>,
    /// Wrist to middle knuckle distance, never below the floor
    pub palm_size: f64,
    /// Mean wrist-to-fingertip distance over palm size
    pub spread_score: f64,
    /// Index fingertip, used to drive the cursor
    pub index_tip: Point2<f64>,
}

/// Flip x for selfie-view cameras
#[inline]
#[must_use]
pub fn mirror_x(x: f64, mirror: bool) -> f64 {
    if mirror {
        1.0 - x
    } else {
        x
    }
}

/// Landmark `index` with mirror correction applied
#[must_use]
pub fn corrected_point(hand: &Hand, index: usize, mirror: bool) -> Point2<f64> {
    let p = hand.point(index);
    Point2::new(mirror_x(p.x, mirror), p.y)
}

/// Mirror-corrected palm center
#[must_use]
pub fn palm_center(hand: &Hand, mirror: bool) -> Point2<f64> {
    let n = PALM_POINTS.len() as f64;
    let (sx, sy) = PALM_POINTS
        .iter()
        .map(|&i| hand.point(i))
        .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
    Point2::new(mirror_x(sx / n, mirror), sy / n)
}

/// Palm size clamped to a strictly positive floor
#[must_use]
pub fn palm_size(hand: &Hand) -> f64 {
    distance(&hand.point(WRIST), &hand.point(MIDDLE_MCP)).max(PALM_SIZE_FLOOR)
}

/// Average fingertip reach normalized by palm size. Open hands score high,
/// fists score low.
#[must_use]
pub fn spread_score(hand: &Hand) -> f64 {
    let wrist = hand.point(WRIST);
    let total: f64 = SPREAD_TIPS.iter().map(|&i| distance(&wrist, &hand.point(i))).sum();
    (total / SPREAD_TIPS.len() as f64) / palm_size(hand)
}

/// Extract all features for a hand
#[must_use]
pub fn extract(hand: &Hand, mirror: bool) -> HandFeatures {
    let thumb = corrected_point(hand, THUMB_TIP, mirror);
    let index = corrected_point(hand, INDEX_TIP, mirror);

    HandFeatures {
        pinch_distance: distance(&thumb, &index),
        pinch_point: nalgebra::center(&thumb, &index),
        palm_center: palm_center(hand, mirror),
        palm_size: palm_size(hand),
        spread_score: spread_score(hand),
        index_tip: index,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        constants::NUM_HAND_LANDMARKS,
        landmarks::{HandLabel, Landmark, INDEX_MCP, PINKY_MCP},
    };

    fn hand_with(points: &[(usize, f64, f64)]) -> Hand {
        let mut landmarks = vec![Landmark::new(0.5, 0.5); NUM_HAND_LANDMARKS];
        for &(i, x, y) in points {
            landmarks[i] = Landmark::new(x, y);
        }
        Hand::new(HandLabel::Right, landmarks).unwrap()
    }

    #[test]
    fn test_pinch_distance() {
        let hand = hand_with(&[(THUMB_TIP, 0.40, 0.50), (INDEX_TIP, 0.43, 0.54)]);
        let f = extract(&hand, false);
        assert!((f.pinch_distance - 0.05).abs() < 1e-12);

        // Mirroring does not change distances
        let mirrored = extract(&hand, true);
        assert!((mirrored.pinch_distance - f.pinch_distance).abs() < 1e-12);
    }

    #[test]
    fn test_mirror_applies_to_positions() {
        let hand = hand_with(&[(THUMB_TIP, 0.2, 0.4), (INDEX_TIP, 0.4, 0.4)]);
        let plain = extract(&hand, false);
        let mirrored = extract(&hand, true);

        assert!((plain.pinch_point.x - 0.3).abs() < 1e-12);
        assert!((mirrored.pinch_point.x - 0.7).abs() < 1e-12);
        assert!((mirrored.index_tip.x - 0.6).abs() < 1e-12);
        assert_eq!(mirrored.pinch_point.y, plain.pinch_point.y);
    }

    #[test]
    fn test_palm_center_averages_four_points() {
        let hand = hand_with(&[
            (WRIST, 0.0, 0.0),
            (INDEX_MCP, 0.4, 0.0),
            (MIDDLE_MCP, 0.4, 0.4),
            (PINKY_MCP, 0.0, 0.4),
        ]);
        let c = palm_center(&hand, false);
        assert!((c.x - 0.2).abs() < 1e-12);
        assert!((c.y - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_degenerate_palm_is_floored() {
        // Every point identical: zero palm size, zero reach
        let hand = hand_with(&[]);
        let f = extract(&hand, true);
        assert_eq!(f.palm_size, PALM_SIZE_FLOOR);
        assert!(f.spread_score.is_finite());
        assert_eq!(f.spread_score, 0.0);
    }

    #[test]
    fn test_spread_score() {
        // Palm size 0.1, every fingertip 0.2 from the wrist
        let hand = hand_with(&[
            (WRIST, 0.5, 0.8),
            (MIDDLE_MCP, 0.5, 0.7),
            (8, 0.5, 0.6),
            (12, 0.5, 0.6),
            (16, 0.5, 0.6),
            (20, 0.5, 0.6),
        ]);
        assert!((spread_score(&hand) - 2.0).abs() < 1e-9);
    }
}
