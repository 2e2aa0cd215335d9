//! Context — the engine state passed to every update callback.
//!
//! [`Context`] bundles the entity [`World`], the frame clock, the input
//! table, settings, and the camera. There are no ambient globals: callbacks
//! get everything through the `&mut Context` they receive, and the loop
//! driver owns the one instance.
//!
//! [`Context::tick`] is one full frame, independent of any windowing host,
//! so the whole engine can be driven headless in tests.

use std::time::Instant;

use glam::Vec2;

use crate::entity::{Entity, EntityTypeId};
use crate::input::{Input, KeyCode};
use crate::settings::{Camera, Settings};
use crate::time::FrameClock;
use crate::world::{EntityTypeDef, World};

/// Everything an update callback can reach: world, clock, input, settings,
/// camera, and the exit flag.
pub struct Context {
    pub world: World,
    pub time: FrameClock,
    pub input: Input<KeyCode>,
    pub settings: Settings,
    pub camera: Camera,
    exit_requested: bool,
}

impl Context {
    pub fn new() -> Self {
        Self {
            world: World::new(),
            time: FrameClock::new(Instant::now()),
            input: Input::new(),
            settings: Settings::default(),
            camera: Camera::default(),
            exit_requested: false,
        }
    }

    // ── Convenience delegates ────────────────────────────────────────

    /// Register an entity type. See [`World::register_type`].
    pub fn register_type(&mut self, def: EntityTypeDef) -> EntityTypeId {
        self.world.register_type(def)
    }

    /// Spawn an entity at the origin. See [`World::spawn`].
    pub fn spawn(&mut self, type_id: EntityTypeId) -> Entity {
        self.world.spawn(type_id)
    }

    /// Spawn an entity at a position. See [`World::spawn_at`].
    pub fn spawn_at(&mut self, type_id: EntityTypeId, position: Vec2) -> Entity {
        self.world.spawn_at(type_id, position)
    }

    /// Despawn an entity. See [`World::despawn`].
    pub fn despawn(&mut self, entity: Entity) {
        self.world.despawn(entity)
    }

    /// Build entities from ASCII map rows, spaced by the current
    /// `settings.tile_size`. See [`World::build_map`].
    pub fn build_map(&mut self, rows: &[&str]) {
        let tile_size = self.settings.tile_size;
        self.world.build_map(rows, tile_size);
    }

    // ── Shutdown hook ────────────────────────────────────────────────

    /// Ask the loop driver to exit after the current frame.
    pub fn request_exit(&mut self) {
        self.exit_requested = true;
    }

    pub fn exit_requested(&self) -> bool {
        self.exit_requested
    }

    // ── Frame dispatch ───────────────────────────────────────────────

    /// Run one frame:
    ///
    /// 1. advance the clock (time-scaled, clamped);
    /// 2. invoke each live entity's type update callback, in registry slot
    ///    order;
    /// 3. clear the per-frame input edges.
    ///
    /// The dispatch walks raw registry positions and revalidates each one,
    /// so a callback that despawns an entity later in the order prevents
    /// its update this frame, and an entity spawned into an appended slot
    /// *is* updated this frame — mutation during iteration is visible to
    /// the steps after it, matching the in-place tombstone storage.
    pub fn tick(&mut self, now: Instant) {
        self.time.advance(now, self.settings.time_speed);

        // Snapshot the callback table: cheap Rc clones, and the borrow on
        // the world ends before any callback runs. Types registered by a
        // callback mid-frame start updating next frame.
        let updates = self.world.update_fns();

        let mut raw = 0;
        while raw < self.world.slot_count() {
            if let Some((entity, type_id)) = self.world.entity_at(raw) {
                if let Some(update) = updates.get(type_id.index()).and_then(|u| u.as_deref()) {
                    update(self, entity);
                }
            }
            raw += 1;
        }

        self.input.clear_frame();
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::BBox;
    use std::time::Duration;

    #[derive(Default)]
    struct Ticks(u32);

    #[test]
    fn tick_updates_every_live_entity_once() {
        let mut ctx = Context::new();
        let ty = ctx.register_type(EntityTypeDef::new('e').state(Ticks::default).update(
            |ctx, e| {
                ctx.world.entity_mut(e).state_mut::<Ticks>().unwrap().0 += 1;
            },
        ));
        let a = ctx.spawn(ty);
        let b = ctx.spawn(ty);

        ctx.tick(Instant::now());
        ctx.tick(Instant::now());

        assert_eq!(ctx.world.entity(a).state::<Ticks>().unwrap().0, 2);
        assert_eq!(ctx.world.entity(b).state::<Ticks>().unwrap().0, 2);
    }

    #[test]
    fn static_types_are_skipped() {
        let mut ctx = Context::new();
        let wall = ctx.register_type(EntityTypeDef::new('#').bbox(BBox::sized(1.0, 1.0)));
        ctx.spawn(wall);
        ctx.tick(Instant::now()); // no callback, no panic
        assert_eq!(ctx.world.entity_count(), 1);
    }

    #[test]
    fn callback_can_despawn_its_own_entity() {
        let mut ctx = Context::new();
        let ty = ctx.register_type(
            EntityTypeDef::new('x').update(|ctx, e| {
                ctx.despawn(e);
            }),
        );
        ctx.spawn(ty);
        ctx.spawn(ty);

        ctx.tick(Instant::now());
        assert_eq!(ctx.world.entity_count(), 0);
    }

    #[test]
    fn entity_spawned_mid_frame_updates_in_the_same_frame() {
        // 's' spawns one 'c' on its first update; 'c' marks itself
        // initialized when updated. The 'c' lands in an appended slot, so
        // the same tick's dispatch reaches it.
        let mut ctx = Context::new();
        let child = ctx.register_type(EntityTypeDef::new('c').update(|ctx, e| {
            ctx.world.entity_mut(e).initialized = true;
        }));
        let spawner = ctx.register_type(EntityTypeDef::new('s').update(move |ctx, e| {
            if !ctx.world.entity(e).initialized {
                ctx.world.entity_mut(e).initialized = true;
                ctx.spawn(child);
            }
        }));
        ctx.spawn(spawner);

        ctx.tick(Instant::now());

        let spawned: Vec<Entity> = ctx.world.entities_of(child).collect();
        assert_eq!(spawned.len(), 1);
        assert!(ctx.world.entity(spawned[0]).initialized);
    }

    #[test]
    fn input_edges_cleared_after_updates_ran() {
        // The callback sees the edge during the tick; after the tick only
        // the held state remains.
        let mut ctx = Context::new();
        let ty = ctx.register_type(EntityTypeDef::new('p').update(|ctx, e| {
            if ctx.input.went_down(KeyCode::Space) {
                ctx.world.entity_mut(e).initialized = true;
            }
        }));
        let p = ctx.spawn(ty);

        ctx.input.press(KeyCode::Space);
        ctx.tick(Instant::now());

        assert!(ctx.world.entity(p).initialized); // edge was visible in-frame
        assert!(!ctx.input.went_down(KeyCode::Space)); // cleared afterwards
        assert!(ctx.input.is_down(KeyCode::Space)); // held state persists
    }

    #[test]
    fn tick_advances_the_clock_before_dispatch() {
        let mut ctx = Context::new();
        let start = Instant::now();
        ctx.time = FrameClock::new(start);

        ctx.tick(start + Duration::from_millis(20));
        assert!(ctx.time.delta_secs() > 0.0);
        assert!((ctx.time.total_secs() - 0.02).abs() < 1e-3);
    }
}
