//! Engine settings and the world-unit camera.
//!
//! Both are plain mutable state on the [`Context`](crate::context::Context):
//! change a field at any time and it takes effect on the next frame.

use serde::{Deserialize, Serialize};

/// Process-wide tuning knobs.
///
/// `gravity` is a convention for update callbacks to read — the core never
/// applies it on its own.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Settings {
    /// Render scale: how many pixels one world unit covers.
    pub pixels_per_meter: f32,
    /// Grid spacing used by map construction.
    pub tile_size: f32,
    /// Multiplier applied to the frame delta before clamping.
    pub time_speed: f32,
    /// Downward acceleration in world units per second squared.
    pub gravity: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            pixels_per_meter: 16.0,
            tile_size: 1.0,
            time_speed: 1.0,
            gravity: 20.0,
        }
    }
}

/// The view rectangle in world units, centered on `(x, y)`.
///
/// `width`/`height` are recomputed from the window size and
/// `pixels_per_meter` every frame; `x`/`y` belong to game code (a player
/// update callback typically re-centers them each frame).
#[derive(Debug, Clone, Copy, Default)]
pub struct Camera {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Camera {
    /// Refresh the view extent from the window size in pixels.
    pub(crate) fn resize(&mut self, window_width: f32, window_height: f32, pixels_per_meter: f32) {
        self.width = window_width / pixels_per_meter;
        self.height = window_height / pixels_per_meter;
    }
}
