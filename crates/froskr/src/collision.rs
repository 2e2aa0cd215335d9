//! # Collision Engine — AABB Queries over the Registry
//!
//! Pure `&self` queries: nothing here mutates entity state. Two call shapes
//! are supported:
//!
//! - [`World::find_collision`] filters the **unified** entity registry by a
//!   set of types — the general form, for callbacks that collide against
//!   several categories at once.
//! - [`World::find_collision_with`] scans a single type's dedicated
//!   collision list, skipping everything else in the world.
//!
//! Both return the **first** overlapping entity in registry slot order (no
//! distance sorting) and `None` on a miss, which is an expected outcome,
//! not an error.

use glam::Vec2;

use crate::entity::{Entity, EntityTypeId};
use crate::world::World;

/// Guard band for the overlap test. Boxes closer than this to merely
/// touching are treated as separate, so entities resting flush against a
/// tile don't report collisions out of floating-point noise.
pub const COLLISION_EPS: f32 = 1e-6;

impl World {
    /// First live entity of any type in `types` whose box overlaps
    /// `entity`'s box displaced by `offset`. The entity itself is skipped.
    ///
    /// `offset` is how callers probe a move before committing it: pass
    /// `velocity * dt` to test the would-be destination.
    ///
    /// # Panics
    ///
    /// Panics if `entity` is stale — querying from a despawned entity is a
    /// lifecycle bug.
    pub fn find_collision(
        &self,
        entity: Entity,
        types: &[EntityTypeId],
        offset: Vec2,
    ) -> Option<Entity> {
        let data = self.entity(entity);
        let probe = data.bbox.aabb(data.position, offset);

        for (other, other_data) in self.entities() {
            if other == entity || !types.contains(&other_data.type_id()) {
                continue;
            }
            let other_box = other_data.bbox.aabb(other_data.position, Vec2::ZERO);
            if probe.overlaps(&other_box, COLLISION_EPS) {
                return Some(other);
            }
        }
        None
    }

    /// Single-type variant: scans only `ty`'s collision list.
    ///
    /// Same overlap test and tie-break as [`find_collision`](Self::find_collision),
    /// but the scan never touches entities of other types.
    pub fn find_collision_with(
        &self,
        entity: Entity,
        ty: EntityTypeId,
        offset: Vec2,
    ) -> Option<Entity> {
        let data = self.entity(entity);
        let probe = data.bbox.aabb(data.position, offset);

        for (_, &other) in self.collision_list(ty).iter() {
            if other == entity {
                continue;
            }
            let other_data = self.entity(other);
            let other_box = other_data.bbox.aabb(other_data.position, Vec2::ZERO);
            if probe.overlaps(&other_box, COLLISION_EPS) {
                return Some(other);
            }
        }
        None
    }
}
