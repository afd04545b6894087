//! Continuous control mapping: anchored frame-to-frame deltas.
//!
//! Each camera mode keeps an anchor (previous inter-pinch distance or previous
//! palm center). Every frame the delta against the anchor is computed, the
//! anchor moves to the current value, and a command is emitted only when the
//! delta leaves the deadzone. Deltas are never accumulated here.

use crate::{
    arbiter::ControlMode,
    command::ControlCommand,
    config::ControlConfig,
    features::HandFeatures,
    filters::CursorFilter,
    gesture::GestureFlags,
};
use log::debug;
use nalgebra::{distance, Point2};

/// Per-mode anchors and cursor smoothing
pub struct ControlMapper {
    params: ControlConfig,
    cursor_filter: Box<dyn CursorFilter>,
    zoom_anchor: Option<f64>,
    pan_anchor: Option<Point2<f64>>,
    rotate_anchor: Option<Point2<f64>>,
}

impl ControlMapper {
    #[must_use]
    pub fn new(params: ControlConfig, cursor_filter: Box<dyn CursorFilter>) -> Self {
        Self {
            params,
            cursor_filter,
            zoom_anchor: None,
            pan_anchor: None,
            rotate_anchor: None,
        }
    }

    /// Smoothed cursor position
    #[must_use]
    pub fn cursor(&self) -> (f64, f64) {
        self.cursor_filter.current()
    }

    /// Feed the right index fingertip into the cursor filter. Runs every frame
    /// the right hand is visible, whatever the mode, so entering DRAG does not
    /// make the cursor jump.
    pub fn track_cursor(&mut self, right: Option<&HandFeatures>) -> (f64, f64) {
        match right {
            Some(f) => self.cursor_filter.apply(f.index_tip.x, f.index_tip.y),
            None => self.cursor_filter.current(),
        }
    }

    #[must_use]
    pub const fn zoom_anchor(&self) -> Option<f64> {
        self.zoom_anchor
    }

    #[must_use]
    pub const fn pan_anchor(&self) -> Option<Point2<f64>> {
        self.pan_anchor
    }

    #[must_use]
    pub const fn rotate_anchor(&self) -> Option<Point2<f64>> {
        self.rotate_anchor
    }

    /// Drop the anchor owned by `mode`
    pub fn clear_anchor(&mut self, mode: ControlMode) {
        match mode {
            ControlMode::Zoom => self.zoom_anchor = None,
            ControlMode::Pan => self.pan_anchor = None,
            ControlMode::Rotate => self.rotate_anchor = None,
            ControlMode::Idle | ControlMode::Hover | ControlMode::Drag => {}
        }
    }

    /// Drop every anchor
    pub fn clear_anchors(&mut self) {
        self.zoom_anchor = None;
        self.pan_anchor = None;
        self.rotate_anchor = None;
    }

    /// Anchors plus cursor back to the initial state
    pub fn reset(&mut self) {
        self.clear_anchors();
        self.cursor_filter.reset();
    }

    /// Camera delta for the committed mode, if any.
    ///
    /// ZOOM only measures frames where both hands are pinched; on any other
    /// frame the committed mode may still be ZOOM (cooldown) but the anchor is
    /// left untouched.
    pub fn map(
        &mut self,
        mode: ControlMode,
        flags: &GestureFlags,
        left: Option<&HandFeatures>,
        right: Option<&HandFeatures>,
    ) -> Option<ControlCommand> {
        let both_pinched = flags.left_pinched && flags.right_pinched;
        match (mode, left, right) {
            (ControlMode::Zoom, Some(l), Some(r)) if both_pinched => {
                self.zoom(distance(&l.pinch_point, &r.pinch_point))
            }
            (ControlMode::Pan, Some(l), _) => self.pan(l.palm_center),
            (ControlMode::Rotate, _, Some(r)) => self.rotate(r.palm_center),
            _ => None,
        }
    }

    fn zoom(&mut self, current: f64) -> Option<ControlCommand> {
        let Some(anchor) = self.zoom_anchor.replace(current) else {
            debug!("Zoom anchored at {:.4}", current);
            return None;
        };

        // Hands apart is positive, zoom in
        let diff = current - anchor;
        (diff.abs() > self.params.zoom_deadzone).then(|| ControlCommand::ZoomBy(diff * self.params.zoom_sensitivity))
    }

    fn pan(&mut self, current: Point2<f64>) -> Option<ControlCommand> {
        let (dx, dy) = Self::step(&mut self.pan_anchor, current, self.params.move_deadzone)?;
        let s = self.params.pan_sensitivity;
        Some(ControlCommand::PanBy { dx: dx * s, dy: dy * s })
    }

    fn rotate(&mut self, current: Point2<f64>) -> Option<ControlCommand> {
        let (dx, dy) = Self::step(&mut self.rotate_anchor, current, self.params.move_deadzone)?;
        let s = self.params.rot_sensitivity;
        Some(ControlCommand::RotateBy {
            d_yaw: -dx * s * self.params.yaw_gain,
            d_pitch: -dy * s * self.params.pitch_gain,
        })
    }

    /// Move a positional anchor and return the displacement when it clears the deadzone
    fn step(anchor: &mut Option<Point2<f64>>, current: Point2<f64>, deadzone: f64) -> Option<(f64, f64)> {
        let prev = anchor.replace(current)?;
        let delta = current - prev;
        (delta.x.abs() > deadzone || delta.y.abs() > deadzone).then_some((delta.x, delta.y))
    }
}
