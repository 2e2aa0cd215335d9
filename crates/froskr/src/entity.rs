//! Entity handles, bounding boxes, and the entity record.
//!
//! An [`Entity`] is a lightweight generational handle; the actual mutable
//! state lives in an [`EntityData`] record owned by the
//! [`World`](crate::world::World). The record carries position, velocity,
//! a bounding box relative to the position, and an optional per-type state
//! payload built from the type's template at spawn.

use std::any::Any;
use std::fmt;

use glam::Vec2;

use crate::registry::Slot;

// ── Geometry ─────────────────────────────────────────────────────────────

/// An axis-aligned bounding box as offsets from an entity's position.
///
/// `left`/`top` shift the box relative to the position; `width`/`height`
/// give its extent. The world-space box is computed with [`BBox::aabb`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BBox {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl BBox {
    /// A zero-sized box. Entities with it never collide with anything.
    pub const ZERO: Self = Self {
        left: 0.0,
        top: 0.0,
        width: 0.0,
        height: 0.0,
    };

    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// A box anchored at the position (no offset).
    pub fn sized(width: f32, height: f32) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    /// The world-space box for an entity at `position`, displaced by
    /// `offset` (used to probe a move before committing it).
    pub fn aabb(&self, position: Vec2, offset: Vec2) -> Aabb {
        let min = position + offset + Vec2::new(self.left, self.top);
        Aabb {
            min,
            max: min + Vec2::new(self.width, self.height),
        }
    }
}

impl Default for BBox {
    fn default() -> Self {
        Self::ZERO
    }
}

/// A world-space axis-aligned box, min/max corners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    /// Overlap test with an epsilon guard: boxes that exactly touch (or are
    /// within `eps` of touching) do **not** overlap, so adjacent tiles never
    /// report phantom collisions from floating-point drift.
    pub fn overlaps(&self, other: &Aabb, eps: f32) -> bool {
        self.min.x < other.max.x - eps
            && self.max.x > other.min.x + eps
            && self.min.y < other.max.y - eps
            && self.max.y > other.min.y + eps
    }
}

// ── Handles ──────────────────────────────────────────────────────────────

/// A handle to a live entity in the [`World`](crate::world::World).
///
/// Wraps the entity's slot in the global registry. Valid from spawn until
/// despawn; afterwards the generation tag makes the handle permanently
/// stale (lookups return `None`, despawning again panics).
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Entity(pub(crate) Slot);

impl Entity {
    /// The underlying registry slot.
    pub fn slot(self) -> Slot {
        self.0
    }
}

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Entity({}v{})", self.0.index, self.0.generation)
    }
}

/// Handle to a registered entity type. Obtained from
/// [`World::register_type`](crate::world::World::register_type) and passed
/// to spawn and collision-filter APIs.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct EntityTypeId(pub(crate) u32);

impl EntityTypeId {
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

// ── Record ───────────────────────────────────────────────────────────────

/// The mutable per-entity record.
///
/// `position`, `velocity`, `bbox`, and `initialized` are plain public state
/// for update callbacks to read and write. The per-type extra state (built
/// by the type's state factory at spawn) is accessed through
/// [`state`](Self::state)/[`state_mut`](Self::state_mut).
pub struct EntityData {
    /// Position in world units.
    pub position: Vec2,
    /// Velocity in world units per second.
    pub velocity: Vec2,
    /// Collision box, relative to `position`.
    pub bbox: BBox,
    /// Cleared at spawn. Update callbacks that need one-time per-entity
    /// setup check and set this on their first run.
    pub initialized: bool,
    pub(crate) type_id: EntityTypeId,
    /// This entity's slot in the global registry. Stamped at spawn.
    pub(crate) slot: Slot,
    /// This entity's slot in its type's collision list. Stamped at spawn.
    pub(crate) collision_slot: Slot,
    state: Option<Box<dyn Any>>,
}

impl EntityData {
    pub(crate) fn new(
        type_id: EntityTypeId,
        bbox: BBox,
        velocity: Vec2,
        state: Option<Box<dyn Any>>,
    ) -> Self {
        Self {
            position: Vec2::ZERO,
            velocity,
            bbox,
            initialized: false,
            type_id,
            slot: Slot::INVALID,
            collision_slot: Slot::INVALID,
            state,
        }
    }

    /// The type this entity was spawned as.
    pub fn type_id(&self) -> EntityTypeId {
        self.type_id
    }

    /// This entity's own handle.
    pub fn id(&self) -> Entity {
        Entity(self.slot)
    }

    /// Typed view of the per-type state payload. `None` if the type has no
    /// state template or `T` is not its state type.
    pub fn state<T: 'static>(&self) -> Option<&T> {
        self.state.as_deref().and_then(|s| s.downcast_ref::<T>())
    }

    /// Mutable typed view of the per-type state payload.
    pub fn state_mut<T: 'static>(&mut self) -> Option<&mut T> {
        self.state.as_deref_mut().and_then(|s| s.downcast_mut::<T>())
    }
}
