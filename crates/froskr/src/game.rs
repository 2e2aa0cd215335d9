//! Game builder — the entry point for a froskr application.
//!
//! Configure settings and setup systems, then call [`run`](Game::run) to
//! hand control to the event loop. Entity behavior itself is registered on
//! the world as per-type update callbacks, so most games need exactly one
//! setup system.
//!
//! # Example
//!
//! ```ignore
//! use froskr::prelude::*;
//!
//! fn main() {
//!     Game::new("my game")
//!         .setup(|ctx| {
//!             let wall = ctx.register_type(EntityTypeDef::new('#').bbox(BBox::sized(1.0, 1.0)));
//!             ctx.build_map(&["####", "#  #", "####"]);
//!         })
//!         .run();
//! }
//! ```

use crate::context::Context;
use crate::settings::Settings;

/// Builder for a froskr game: window title, settings, setup systems, and
/// the render hook.
pub struct Game {
    title: String,
    ctx: Context,
    setup_systems: Vec<Box<dyn FnMut(&mut Context)>>,
    render: Option<Box<dyn FnMut(&Context)>>,
}

impl Game {
    /// A new game with the given window title and default settings.
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            ctx: Context::new(),
            setup_systems: Vec::new(),
            render: None,
        }
    }

    /// Replace the default settings.
    pub fn settings(mut self, settings: Settings) -> Self {
        self.ctx.settings = settings;
        self
    }

    /// Register a setup system, run once before the first frame. Register
    /// entity types and build the map here.
    pub fn setup(mut self, system: impl FnMut(&mut Context) + 'static) -> Self {
        self.setup_systems.push(Box::new(system));
        self
    }

    /// The renderer boundary: called once per frame after all updates, with
    /// a shared borrow — rendering reads positions and bboxes and can never
    /// mutate entity state.
    pub fn render(mut self, render: impl FnMut(&Context) + 'static) -> Self {
        self.render = Some(Box::new(render));
        self
    }

    /// Start the event loop. Returns when the window is closed or a
    /// callback calls [`Context::request_exit`].
    pub fn run(self) {
        let event_loop = winit::event_loop::EventLoop::new().expect("Failed to create event loop");

        let mut app =
            crate::window::WinitApp::new(self.ctx, self.setup_systems, self.render, self.title);

        event_loop.run_app(&mut app).expect("Event loop error");
    }
}
