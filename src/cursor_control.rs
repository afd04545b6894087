//! X11 render surface backend.
//!
//! Drives the real desktop pointer: moves warp the pointer on the root window
//! and button transitions are injected through the XTEST extension as
//! button-1 press/release.

use crate::{
    command::PointerKind,
    error::{AppError, Result},
    pointer::{ClientRect, RenderSurface, SurfacePointerEvent},
    utils::safe_cast::f64_to_i16_clamp,
};
use log::{debug, info};
use x11rb::{
    connection::Connection,
    protocol::{
        xproto::{ConnectionExt as _, Screen, BUTTON_PRESS_EVENT, BUTTON_RELEASE_EVENT},
        xtest::ConnectionExt as _,
    },
    rust_connection::RustConnection,
};

/// Primary mouse button
const BUTTON_LEFT: u8 = 1;

/// Synthetic pointer surface over the X11 root window
pub struct X11Surface {
    connection: RustConnection,
    screen: Screen,
    screen_width: u16,
    screen_height: u16,
}

impl X11Surface {
    /// Connect to the default display
    pub fn new() -> Result<Self> {
        info!("Initializing X11 pointer surface");

        let (connection, screen_num) = RustConnection::connect(None)
            .map_err(|e| AppError::CursorControl(format!("Failed to connect to X11: {e}")))?;

        let screen = connection
            .setup()
            .roots
            .get(screen_num)
            .ok_or_else(|| AppError::CursorControl("Failed to get screen".to_string()))?
            .clone();

        let screen_width = screen.width_in_pixels;
        let screen_height = screen.height_in_pixels;

        info!(
            "Connected to X11 display, screen: {}x{}",
            screen_width, screen_height
        );

        Ok(Self {
            connection,
            screen,
            screen_width,
            screen_height,
        })
    }

    /// Get screen dimensions
    pub const fn get_screen_size(&self) -> (u16, u16) {
        (self.screen_width, self.screen_height)
    }

    /// Warp the pointer to an absolute root position
    pub fn set_position(&self, x: i16, y: i16) -> Result<()> {
        let max_x = i16::try_from(self.screen_width.saturating_sub(1)).unwrap_or(i16::MAX);
        let max_y = i16::try_from(self.screen_height.saturating_sub(1)).unwrap_or(i16::MAX);
        let x = x.clamp(0, max_x);
        let y = y.clamp(0, max_y);

        self.connection
            .warp_pointer(x11rb::NONE, self.screen.root, 0, 0, 0, 0, x, y)
            .map_err(|e| AppError::CursorControl(format!("Failed to warp pointer: {e}")))?;

        Ok(())
    }

    /// Press or release the primary button at `(x, y)`
    fn send_button(&self, pressed: bool, x: i16, y: i16) -> Result<()> {
        let event_type = if pressed { BUTTON_PRESS_EVENT } else { BUTTON_RELEASE_EVENT };
        debug!("XTEST button {} {}", BUTTON_LEFT, if pressed { "press" } else { "release" });

        self.connection
            .xtest_fake_input(event_type, BUTTON_LEFT, x11rb::CURRENT_TIME, self.screen.root, x, y, 0)
            .map_err(|e| AppError::CursorControl(format!("Failed to inject button event: {e}")))?;

        Ok(())
    }
}

impl RenderSurface for X11Surface {
    fn client_rect(&self) -> Option<ClientRect> {
        Some(ClientRect::new(
            0.0,
            0.0,
            f64::from(self.screen_width),
            f64::from(self.screen_height),
        ))
    }

    fn dispatch(&mut self, event: &SurfacePointerEvent) -> Result<()> {
        let x = f64_to_i16_clamp(event.client_x);
        let y = f64_to_i16_clamp(event.client_y);

        self.set_position(x, y)?;
        match event.kind {
            PointerKind::Move => {}
            PointerKind::Down => self.send_button(true, x, y)?,
            PointerKind::Up => self.send_button(false, x, y)?,
        }

        self.connection
            .flush()
            .map_err(|e| AppError::CursorControl(format!("Failed to flush connection: {e}")))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[ignore] // Requires X11 display
    fn test_x11_client_rect_matches_screen() {
        if let Ok(surface) = X11Surface::new() {
            let (w, h) = surface.get_screen_size();
            assert!(w > 0 && h > 0);
            let rect = surface.client_rect().unwrap();
            assert_eq!(rect.width, f64::from(w));
            assert_eq!(rect.height, f64::from(h));
        }
    }
}
