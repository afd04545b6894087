//! Pointer emulation: turns cursor position plus desired button state into a
//! synthetic move/down/up stream, and delivers it to a render surface.
//!
//! Pointer capture is only touched after asking the surface whether it
//! supports capture and whether the pointer is currently captured, so a
//! release without a matching capture never reaches the platform.

use crate::{
    command::{PointerEvent, PointerKind},
    constants::PRESSED_PRESSURE,
    Result,
};
use log::debug;

/// Button edge tracker for the synthetic pointer
#[derive(Debug, Clone, Default)]
pub struct PointerEmulator {
    down: bool,
}

impl PointerEmulator {
    #[must_use]
    pub const fn new() -> Self {
        Self { down: false }
    }

    /// Whether a pointer-down is outstanding
    #[must_use]
    pub const fn is_down(&self) -> bool {
        self.down
    }

    /// Always a move; then a down on the false->true edge or an up on the
    /// true->false edge.
    pub fn drive(&mut self, x: f64, y: f64, want_down: bool) -> Vec<PointerEvent> {
        let mut events = vec![PointerEvent {
            kind: PointerKind::Move,
            x,
            y,
            pressed: self.down,
        }];

        if want_down && !self.down {
            self.down = true;
            events.push(PointerEvent {
                kind: PointerKind::Down,
                x,
                y,
                pressed: true,
            });
        } else if !want_down && self.down {
            self.down = false;
            events.push(PointerEvent {
                kind: PointerKind::Up,
                x,
                y,
                pressed: false,
            });
        }

        events
    }

    /// Release an outstanding pointer-down at `(x, y)`. Empty when nothing is held.
    pub fn release(&mut self, x: f64, y: f64) -> Vec<PointerEvent> {
        if self.down {
            self.drive(x, y, false)
        } else {
            Vec::new()
        }
    }

    /// Forget the button state without emitting anything
    pub fn reset(&mut self) {
        self.down = false;
    }
}

/// Client-space rectangle of the render surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClientRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl ClientRect {
    #[must_use]
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, width, height }
    }

    /// Map normalized coordinates into client coordinates
    #[must_use]
    pub fn to_client(&self, nx: f64, ny: f64) -> (f64, f64) {
        (self.left + nx * self.width, self.top + ny * self.height)
    }
}

/// Platform-level pointer event as delivered to a surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfacePointerEvent {
    pub kind: PointerKind,
    pub pointer_id: u32,
    pub client_x: f64,
    pub client_y: f64,
    /// Button mask, 1 while the primary button is held
    pub buttons: u8,
    /// Button that changed, -1 for none
    pub button: i8,
    pub pressure: f64,
    pub is_primary: bool,
}

/// Rendering surface that receives synthetic pointer events
pub trait RenderSurface {
    /// Current client rectangle, `None` while the surface is unavailable
    fn client_rect(&self) -> Option<ClientRect>;

    /// Deliver one event
    fn dispatch(&mut self, event: &SurfacePointerEvent) -> Result<()>;

    fn supports_capture(&self) -> bool {
        false
    }

    fn has_capture(&self, _pointer_id: u32) -> bool {
        false
    }

    fn set_capture(&mut self, _pointer_id: u32) -> Result<()> {
        Ok(())
    }

    fn release_capture(&mut self, _pointer_id: u32) -> Result<()> {
        Ok(())
    }
}

/// Delivers normalized pointer events to whatever surface is current
#[derive(Debug, Clone)]
pub struct PointerBridge {
    pointer_id: u32,
}

impl PointerBridge {
    #[must_use]
    pub const fn new(pointer_id: u32) -> Self {
        Self { pointer_id }
    }

    #[must_use]
    pub const fn pointer_id(&self) -> u32 {
        self.pointer_id
    }

    /// Build the surface event for `event` inside `rect`
    #[must_use]
    pub fn to_surface_event(&self, event: &PointerEvent, rect: &ClientRect) -> SurfacePointerEvent {
        let (client_x, client_y) = rect.to_client(event.x, event.y);
        SurfacePointerEvent {
            kind: event.kind,
            pointer_id: self.pointer_id,
            client_x,
            client_y,
            buttons: u8::from(event.pressed),
            button: if event.pressed { 0 } else { -1 },
            pressure: if event.pressed { PRESSED_PRESSURE } else { 0.0 },
            is_primary: true,
        }
    }

    /// Deliver `event`. Returns false when the surface was unavailable or
    /// rejected it; both are transient and only logged.
    pub fn deliver(&self, surface: &mut dyn RenderSurface, event: &PointerEvent) -> bool {
        let Some(rect) = surface.client_rect() else {
            debug!("Render surface unavailable, dropping {}", event.kind.as_str());
            return false;
        };

        let surface_event = self.to_surface_event(event, &rect);
        if let Err(e) = surface.dispatch(&surface_event) {
            debug!("Surface rejected {}: {}", event.kind.as_str(), e);
            return false;
        }

        match event.kind {
            PointerKind::Down => self.acquire_capture(surface),
            PointerKind::Up => self.release_capture(surface),
            PointerKind::Move => {}
        }
        true
    }

    fn acquire_capture(&self, surface: &mut dyn RenderSurface) {
        if !surface.supports_capture() || surface.has_capture(self.pointer_id) {
            return;
        }
        if let Err(e) = surface.set_capture(self.pointer_id) {
            debug!("Pointer capture failed: {}", e);
        }
    }

    fn release_capture(&self, surface: &mut dyn RenderSurface) {
        if !surface.supports_capture() || !surface.has_capture(self.pointer_id) {
            return;
        }
        if let Err(e) = surface.release_capture(self.pointer_id) {
            debug!("Pointer capture release failed: {}", e);
        }
    }
}

/// In-memory surface for headless runs and tests
#[derive(Debug, Clone)]
pub struct HeadlessSurface {
    rect: ClientRect,
    present: bool,
    captured: Option<u32>,
    pub events: Vec<SurfacePointerEvent>,
}

impl HeadlessSurface {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            rect: ClientRect::new(0.0, 0.0, width, height),
            present: true,
            captured: None,
            events: Vec::new(),
        }
    }

    /// Simulate the surface appearing or going away
    pub fn set_present(&mut self, present: bool) {
        self.present = present;
    }

    #[must_use]
    pub const fn captured(&self) -> Option<u32> {
        self.captured
    }
}

impl RenderSurface for HeadlessSurface {
    fn client_rect(&self) -> Option<ClientRect> {
        self.present.then_some(self.rect)
    }

    fn dispatch(&mut self, event: &SurfacePointerEvent) -> Result<()> {
        debug!(
            "{} id={} ({:.1}, {:.1}) buttons={}",
            event.kind.as_str(),
            event.pointer_id,
            event.client_x,
            event.client_y,
            event.buttons
        );
        self.events.push(*event);
        Ok(())
    }

    fn supports_capture(&self) -> bool {
        true
    }

    fn has_capture(&self, pointer_id: u32) -> bool {
        self.captured == Some(pointer_id)
    }

    fn set_capture(&mut self, pointer_id: u32) -> Result<()> {
        self.captured = Some(pointer_id);
        Ok(())
    }

    fn release_capture(&mut self, pointer_id: u32) -> Result<()> {
        if self.captured == Some(pointer_id) {
            self.captured = None;
        }
        Ok(())
    }
}
