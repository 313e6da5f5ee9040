//! Window-event translation for the viewer.
//!
//! Turns raw winit events into the few things the ecosystem host cares
//! about: the pointer target, the viewport size, palette selection and
//! close requests. Pointer moves go straight into the shared
//! [`PointerTarget`]; everything else is reported back as an
//! [`InputAction`] for the window loop to apply.

use glam::Vec2;
use winit::event::{ElementState, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use crate::pointer::{PointerTarget, Viewport};
use crate::theme::Theme;

/// Something the window loop must act on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    /// The viewport changed size; reconfigure the surface and projection.
    Resized(Viewport),
    /// Switch palette.
    SelectTheme(Theme),
    /// Stop the simulation and close.
    Close,
}

/// Input state for one window.
#[derive(Debug)]
pub struct InputState {
    viewport: Viewport,
    target: PointerTarget,
    cursor: Vec2,
}

impl InputState {
    /// Track input for a window of the given size, writing pointer moves
    /// into `target`.
    pub fn new(viewport: Viewport, target: PointerTarget) -> Self {
        Self {
            viewport,
            target,
            cursor: Vec2::ZERO,
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Last cursor position in pixels.
    pub fn cursor(&self) -> Vec2 {
        self.cursor
    }

    /// Process a winit window event.
    pub fn handle_event(&mut self, event: &WindowEvent) -> Option<InputAction> {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor_moved(Vec2::new(position.x as f32, position.y as f32));
                None
            }
            WindowEvent::Resized(size) => Some(self.resized(size.width, size.height)),
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state != ElementState::Pressed || event.repeat {
                    return None;
                }
                match event.physical_key {
                    PhysicalKey::Code(KeyCode::Escape) => Some(InputAction::Close),
                    PhysicalKey::Code(code) => theme_for_key(code).map(InputAction::SelectTheme),
                    _ => None,
                }
            }
            WindowEvent::CloseRequested => Some(InputAction::Close),
            _ => None,
        }
    }

    /// Record a cursor move in pixels and publish the normalized target.
    pub fn cursor_moved(&mut self, pixel: Vec2) {
        self.cursor = pixel;
        self.target.set(self.viewport.to_ndc(pixel));
    }

    /// Record a new viewport size. Particle state is untouched.
    pub fn resized(&mut self, width: u32, height: u32) -> InputAction {
        self.viewport = Viewport::new(width, height);
        InputAction::Resized(self.viewport)
    }
}

/// Number keys 1-5 pick a palette.
pub fn theme_for_key(code: KeyCode) -> Option<Theme> {
    let slot = match code {
        KeyCode::Digit1 | KeyCode::Numpad1 => 0,
        KeyCode::Digit2 | KeyCode::Numpad2 => 1,
        KeyCode::Digit3 | KeyCode::Numpad3 => 2,
        KeyCode::Digit4 | KeyCode::Numpad4 => 3,
        KeyCode::Digit5 | KeyCode::Numpad5 => 4,
        _ => return None,
    };
    Theme::from_index(slot)
}
