//! winit host for the ecosystem.
//!
//! [`App`] owns the [`Driver`] and the [`Renderer`]. Every redraw runs one
//! tick, uploads the frame and draws it. Closing the window (or pressing
//! Escape) cancels the driver, tears the simulation down and releases the
//! GPU buffers before the event loop exits.

use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use crate::driver::{CancelToken, Driver};
use crate::ecosystem::Ecosystem;
use crate::error::SimulationError;
use crate::gpu::Renderer;
use crate::input::{InputAction, InputState};
use crate::pointer::Viewport;
use crate::theme::Theme;

/// Open a window and run `ecosystem` until the window closes.
pub fn run(ecosystem: Ecosystem) -> Result<(), SimulationError> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(ecosystem);
    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

struct App {
    window: Option<Arc<Window>>,
    renderer: Option<Renderer>,
    driver: Driver,
    cancel: CancelToken,
    input: InputState,
    theme: Theme,
    error: Option<SimulationError>,
}

impl App {
    fn new(ecosystem: Ecosystem) -> Self {
        let theme = ecosystem.config().theme;
        let driver = Driver::new(ecosystem);
        let input = InputState::new(Viewport::new(1280, 720), driver.pointer_target());
        Self {
            window: None,
            renderer: None,
            cancel: driver.cancel_token(),
            driver,
            input,
            theme,
            error: None,
        }
    }

    fn shutdown(&mut self, event_loop: &ActiveEventLoop) {
        self.cancel.cancel();
        self.driver.shutdown();
        if let Some(renderer) = &mut self.renderer {
            renderer.release();
        }
        event_loop.exit();
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(renderer) = &mut self.renderer else {
            return;
        };
        if renderer.is_released() {
            return;
        }

        let ticked = match self.driver.frame() {
            Ok(Some(frame)) => {
                renderer.upload(&frame);
                Ok(())
            }
            Ok(None) => return,
            Err(e) => Err(e),
        };
        if let Err(e) = ticked {
            log::error!("tick failed: {}", e);
            self.error = Some(e);
            self.shutdown(event_loop);
            return;
        }

        match renderer.render(self.driver.clock().elapsed()) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("surface lost, reconfiguring");
                renderer.reconfigure();
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("GPU out of memory");
                self.shutdown(event_loop);
            }
            Err(e) => log::warn!("render error: {:?}", e),
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attrs = Window::default_attributes()
            .with_title("Interactive Ecosystem")
            .with_inner_size(LogicalSize::new(1280, 720));

        let window = match event_loop.create_window(window_attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                self.error = Some(e.into());
                event_loop.exit();
                return;
            }
        };

        let size = window.inner_size();
        self.input.resized(size.width, size.height);

        let particle_count = self.driver.ecosystem().particles().len();
        match pollster::block_on(Renderer::new(window.clone(), particle_count, self.theme)) {
            Ok(renderer) => self.renderer = Some(renderer),
            Err(e) => {
                log::error!("GPU initialization failed: {}", e);
                self.error = Some(e.into());
                self.shutdown(event_loop);
                return;
            }
        }
        self.window = Some(window);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        if let WindowEvent::RedrawRequested = event {
            self.redraw(event_loop);
            return;
        }

        match self.input.handle_event(&event) {
            Some(InputAction::Close) => self.shutdown(event_loop),
            Some(InputAction::Resized(viewport)) => {
                if let Some(renderer) = &mut self.renderer {
                    renderer.resize(viewport);
                }
            }
            Some(InputAction::SelectTheme(theme)) => {
                log::info!("theme: {}", theme.name());
                self.theme = theme;
                if let Some(renderer) = &mut self.renderer {
                    renderer.set_theme(theme);
                }
            }
            None => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if self.cancel.is_cancelled() {
            return;
        }
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}
