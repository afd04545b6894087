//! Commands produced by the controller each frame.
//!
//! Camera deltas are relative; the receiver owns integration and clamping.
//! Pointer events carry normalized coordinates and are turned into surface
//! events by [`crate::pointer::PointerBridge`].

use log::debug;

/// Phase of a synthetic pointer event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerKind {
    Move,
    Down,
    Up,
}

impl PointerKind {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Move => "pointermove",
            Self::Down => "pointerdown",
            Self::Up => "pointerup",
        }
    }
}

/// Normalized synthetic pointer event
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub x: f64,
    pub y: f64,
    /// Button held after this event
    pub pressed: bool,
}

/// One emitted control command
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlCommand {
    Pointer(PointerEvent),
    /// Positive zooms in
    ZoomBy(f64),
    PanBy { dx: f64, dy: f64 },
    RotateBy { d_yaw: f64, d_pitch: f64 },
}

impl ControlCommand {
    /// Forward a camera delta to `camera`. Pointer commands are ignored.
    pub fn apply_to(&self, camera: &mut dyn CameraControl) {
        match *self {
            Self::Pointer(_) => {}
            Self::ZoomBy(delta) => camera.zoom_by(delta),
            Self::PanBy { dx, dy } => camera.pan_by(dx, dy),
            Self::RotateBy { d_yaw, d_pitch } => camera.rotate_by(d_yaw, d_pitch),
        }
    }
}

/// Camera receiving relative deltas.
///
/// Every method defaults to a no-op so partial receivers only implement what
/// they support.
pub trait CameraControl {
    fn zoom_by(&mut self, _delta: f64) {}

    fn pan_by(&mut self, _dx: f64, _dy: f64) {}

    fn rotate_by(&mut self, _d_yaw: f64, _d_pitch: f64) {}
}

/// Camera that integrates and logs every delta it receives
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordingCamera {
    pub zoom: f64,
    pub pan: (f64, f64),
    pub yaw: f64,
    pub pitch: f64,
    pub calls: usize,
}

impl CameraControl for RecordingCamera {
    fn zoom_by(&mut self, delta: f64) {
        debug!("zoomBy({:.4})", delta);
        self.zoom += delta;
        self.calls += 1;
    }

    fn pan_by(&mut self, dx: f64, dy: f64) {
        debug!("panBy({:.4}, {:.4})", dx, dy);
        self.pan.0 += dx;
        self.pan.1 += dy;
        self.calls += 1;
    }

    fn rotate_by(&mut self, d_yaw: f64, d_pitch: f64) {
        debug!("rotateBy({:.4}, {:.4})", d_yaw, d_pitch);
        self.yaw += d_yaw;
        self.pitch += d_pitch;
        self.calls += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ZoomOnly(f64);

    impl CameraControl for ZoomOnly {
        fn zoom_by(&mut self, delta: f64) {
            self.0 += delta;
        }
    }

    #[test]
    fn test_partial_camera_ignores_unsupported() {
        let mut camera = ZoomOnly(0.0);
        ControlCommand::PanBy { dx: 1.0, dy: 1.0 }.apply_to(&mut camera);
        ControlCommand::RotateBy { d_yaw: 1.0, d_pitch: 1.0 }.apply_to(&mut camera);
        ControlCommand::ZoomBy(0.25).apply_to(&mut camera);
        assert_eq!(camera.0, 0.25);
    }

    #[test]
    fn test_recording_camera_integrates() {
        let mut camera = RecordingCamera::default();
        for cmd in [
            ControlCommand::ZoomBy(0.1),
            ControlCommand::ZoomBy(0.2),
            ControlCommand::PanBy { dx: 0.5, dy: -0.5 },
            ControlCommand::RotateBy { d_yaw: 1.0, d_pitch: 2.0 },
        ] {
            cmd.apply_to(&mut camera);
        }
        assert!((camera.zoom - 0.3).abs() < 1e-12);
        assert_eq!(camera.pan, (0.5, -0.5));
        assert_eq!((camera.yaw, camera.pitch), (1.0, 2.0));
        assert_eq!(camera.calls, 4);
    }

    #[test]
    fn test_pointer_is_not_camera() {
        let cmd = ControlCommand::Pointer(PointerEvent {
            kind: PointerKind::Move,
            x: 0.5,
            y: 0.5,
            pressed: false,
        });
        let mut camera = RecordingCamera::default();
        cmd.apply_to(&mut camera);
        assert_eq!(camera.calls, 0);
        assert_eq!(PointerKind::Down.as_str(), "pointerdown");
    }
}
