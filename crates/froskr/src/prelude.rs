//! Convenience re-exports — `use froskr::prelude::*` for the common items.
//!
//! Types only — all functionality is discoverable through methods on types,
//! not free functions.

pub use crate::collision::COLLISION_EPS;
pub use crate::context::Context;
pub use crate::entity::{Aabb, BBox, Entity, EntityData, EntityTypeId};
pub use crate::game::Game;
pub use crate::input::{Input, KeyCode};
pub use crate::level::Level;
pub use crate::motion::Contacts;
pub use crate::registry::{Slot, SlotArena};
pub use crate::settings::{Camera, Settings};
pub use crate::time::FrameClock;
pub use crate::world::{EntityTypeDef, UpdateFn, World};

pub use glam::Vec2;
