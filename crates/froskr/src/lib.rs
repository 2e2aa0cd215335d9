//! # Froskr — Minimal 2D Platformer Engine Core
//!
//! A small real-time engine built around four pieces: a slotted entity
//! registry with stable handles, per-type collision lists, AABB collision
//! queries, and a swept move-and-resolve step for platformer physics.
//! A clamped frame clock drives per-type update callbacks once per live
//! entity per frame.
//!
//! Start with `use froskr::prelude::*`, register entity types on a
//! [`Game`](game::Game), build a map from ASCII rows, and run.

pub mod collision;
pub mod context;
pub mod entity;
pub mod game;
pub mod input;
pub mod level;
pub mod motion;
pub mod prelude;
pub mod registry;
pub mod settings;
pub mod time;
pub(crate) mod window;
pub mod world;
