//! Window management via winit.
//!
//! Implements [`winit::application::ApplicationHandler`] to drive the loop:
//! window creation, keyboard forwarding into the input table, and one
//! [`Context::tick`] per `RedrawRequested`, followed by the render hook and
//! a request for the next frame.

use std::sync::Arc;
use std::time::Instant;

use winit::application::ApplicationHandler;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::ActiveEventLoop;
use winit::keyboard::PhysicalKey;
use winit::window::{Window, WindowId};

use crate::context::Context;

/// The application state that winit drives.
pub(crate) struct WinitApp {
    ctx: Context,
    setup_systems: Vec<Box<dyn FnMut(&mut Context)>>,
    render: Option<Box<dyn FnMut(&Context)>>,
    window: Option<Arc<Window>>,
    started: bool,
    title: String,
}

impl WinitApp {
    pub fn new(
        ctx: Context,
        setup_systems: Vec<Box<dyn FnMut(&mut Context)>>,
        render: Option<Box<dyn FnMut(&Context)>>,
        title: String,
    ) -> Self {
        Self {
            ctx,
            setup_systems,
            render,
            window: None,
            started: false,
            title,
        }
    }
}

impl ApplicationHandler for WinitApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            let attrs = Window::default_attributes()
                .with_title(&self.title)
                .with_inner_size(winit::dpi::LogicalSize::new(1280.0, 720.0));
            let window = Arc::new(
                event_loop
                    .create_window(attrs)
                    .expect("Failed to create window"),
            );

            let size = window.inner_size();
            self.ctx.camera.resize(
                size.width as f32,
                size.height as f32,
                self.ctx.settings.pixels_per_meter,
            );

            self.window = Some(window);
        }

        // Run setup systems once.
        if !self.started {
            self.started = true;
            for system in self.setup_systems.iter_mut() {
                system(&mut self.ctx);
            }
            if let Some(window) = &self.window {
                window.request_redraw();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                log::info!("Window close requested, exiting.");
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                self.ctx.camera.resize(
                    size.width as f32,
                    size.height as f32,
                    self.ctx.settings.pixels_per_meter,
                );
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(key_code) = event.physical_key {
                    match event.state {
                        ElementState::Pressed => self.ctx.input.press(key_code),
                        ElementState::Released => self.ctx.input.release(key_code),
                    }
                }
            }

            WindowEvent::RedrawRequested => {
                // The scale can change between frames; keep the camera's
                // world-unit extent in sync before updates read it.
                if let Some(window) = &self.window {
                    let size = window.inner_size();
                    self.ctx.camera.resize(
                        size.width as f32,
                        size.height as f32,
                        self.ctx.settings.pixels_per_meter,
                    );
                }

                self.ctx.tick(Instant::now());

                if self.ctx.exit_requested() {
                    log::info!("Exit requested, leaving the event loop.");
                    event_loop.exit();
                    return;
                }

                if let Some(render) = self.render.as_mut() {
                    render(&self.ctx);
                }

                // Schedule the next frame.
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }

            _ => {}
        }
    }
}
