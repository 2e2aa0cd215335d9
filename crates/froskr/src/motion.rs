//! # Motion Resolver — Swept Movement Against Obstacles
//!
//! [`Context::move_and_resolve`] moves an entity by its velocity over the
//! frame delta, stopping it flush against any obstacle it would enter. The
//! sweep is axis-separated, horizontal first, which is what produces
//! wall-sliding: a diagonal move into a wall keeps its vertical component.
//!
//! The collision is resolved at the *destination* before any movement is
//! committed, so entities never interpenetrate an obstacle and then get
//! pushed back out.

use glam::Vec2;

use crate::context::Context;
use crate::entity::{Entity, EntityTypeId};

/// The obstacles hit during one [`move_and_resolve`](Context::move_and_resolve)
/// call, one per axis. Either may be `None`. Callers react to these — play a
/// landing sound, damage the block overhead, kill on wall touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contacts {
    pub horizontal: Option<Entity>,
    pub vertical: Option<Entity>,
}

impl Context {
    /// Move `entity` by its velocity over this frame's delta, resolving
    /// collisions against entities of the `obstacles` types.
    ///
    /// Two-phase, per axis:
    ///
    /// 1. **Horizontal** — probe at `(vx·Δt, 0)`. On a hit, snap the
    ///    entity's leading edge flush to the obstacle (which side depends
    ///    on the sign of `vx`) and zero `vx`.
    /// 2. **Vertical** — probe at `(vx·Δt, vy·Δt)` with the *post-phase-1*
    ///    `vx` (zeroed if phase 1 hit). On a hit while falling (`vy > 0`),
    ///    land: snap to rest on the obstacle's top and zero `vy`. On a hit
    ///    while rising, bounce: snap just below the obstacle's bottom and
    ///    invert-and-halve `vy`.
    ///
    /// Whatever velocity remains is then applied unconditionally — zero
    /// after a stop or landing, the damped rebound after a ceiling hit.
    ///
    /// Which types count as obstacles is entirely the caller's choice;
    /// narrower or wider sets make enemies solid or coins pass-through.
    pub fn move_and_resolve(&mut self, entity: Entity, obstacles: &[EntityTypeId]) -> Contacts {
        let dt = self.time.delta_secs();

        // Horizontal phase.
        let vx = self.world.entity(entity).velocity.x;
        let horizontal = self
            .world
            .find_collision(entity, obstacles, Vec2::new(vx * dt, 0.0));
        if let Some(wall) = horizontal {
            let wall_data = self.world.entity(wall);
            let (wall_x, wall_bbox) = (wall_data.position.x, wall_data.bbox);

            let data = self.world.entity_mut(entity);
            if data.velocity.x > 0.0 {
                // Moving right: entity's right edge against the obstacle's left.
                data.position.x = wall_x + wall_bbox.left - data.bbox.left - data.bbox.width;
            } else {
                // Moving left: entity's left edge against the obstacle's right.
                data.position.x = wall_x + wall_bbox.left + wall_bbox.width - data.bbox.left;
            }
            data.velocity.x = 0.0;
        }

        // Vertical phase. The horizontal component of the probe uses the
        // already-resolved vx, so a stopped entity probes straight up/down.
        let velocity = self.world.entity(entity).velocity;
        let vertical = self.world.find_collision(entity, obstacles, velocity * dt);
        if let Some(wall) = vertical {
            let wall_data = self.world.entity(wall);
            let (wall_y, wall_bbox) = (wall_data.position.y, wall_data.bbox);

            let data = self.world.entity_mut(entity);
            if data.velocity.y > 0.0 {
                // Falling: land on top of the obstacle.
                data.position.y = wall_y + wall_bbox.top - data.bbox.top - data.bbox.height;
                data.velocity.y = 0.0;
            } else {
                // Rising: bounce off the obstacle's underside, damped.
                data.position.y = wall_y + wall_bbox.top + wall_bbox.height - data.bbox.top;
                data.velocity.y *= -0.5;
            }
        }

        // Commit the residual motion.
        let data = self.world.entity_mut(entity);
        let velocity = data.velocity;
        data.position += velocity * dt;

        Contacts {
            horizontal,
            vertical,
        }
    }
}
