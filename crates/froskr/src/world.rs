//! # World — Entity Store and Type Registry
//!
//! The [`World`] owns every entity record plus the table of registered
//! entity types. Each type bundles a map symbol, an optional per-frame
//! update callback, a template (bbox, velocity, state factory), and its own
//! collision list — a second [`SlotArena`] holding just the entities of
//! that type, so single-type collision queries never scan the whole world.
//!
//! ## Lifecycle
//!
//! [`spawn`](World::spawn) inserts the record into the global registry and
//! the type's collision list, stamping both slots onto the record.
//! [`despawn`](World::despawn) tombstones both in O(1). Nothing is ever
//! created or destroyed behind the caller's back; all transitions come from
//! update callbacks or map construction.
//!
//! ## Accessors
//!
//! [`entity`](World::entity)/[`entity_mut`](World::entity_mut) panic on a
//! stale handle with a message naming the handle — the right default inside
//! update callbacks, where a dead entity is a lifecycle bug. The
//! [`get`](World::get)/[`get_mut`](World::get_mut) variants return `Option`
//! for callers that want to probe.

use std::any::Any;
use std::collections::HashMap;
use std::rc::Rc;

use glam::Vec2;

use crate::context::Context;
use crate::entity::{BBox, Entity, EntityData, EntityTypeId};
use crate::registry::SlotArena;

/// A per-type update callback, invoked once per live entity per frame.
///
/// Resolved once at registration; closures may capture the `EntityTypeId`s
/// they collide against.
pub type UpdateFn = Rc<dyn Fn(&mut Context, Entity)>;

type StateFactory = Box<dyn Fn() -> Box<dyn Any>>;

// ── Type definition ──────────────────────────────────────────────────────

/// Builder for registering an entity type.
///
/// # Example
///
/// ```ignore
/// let wall = world.register_type(EntityTypeDef::new('#').bbox(BBox::sized(1.0, 1.0)));
/// let player = world.register_type(
///     EntityTypeDef::new('@')
///         .bbox(BBox::new(0.1, 0.0, 0.8, 1.0))
///         .state(PlayerState::default)
///         .update(move |ctx, e| {
///             // read input, apply gravity, ctx.move_and_resolve(e, &[wall])
///         }),
/// );
/// ```
pub struct EntityTypeDef {
    symbol: char,
    update: Option<UpdateFn>,
    bbox: BBox,
    velocity: Vec2,
    state: Option<StateFactory>,
}

impl EntityTypeDef {
    /// A new type identified by `symbol`, the character used for this type
    /// in ASCII map rows. Static by default: no update callback, zero bbox.
    pub fn new(symbol: char) -> Self {
        Self {
            symbol,
            update: None,
            bbox: BBox::ZERO,
            velocity: Vec2::ZERO,
            state: None,
        }
    }

    /// Per-frame update callback for entities of this type.
    pub fn update(mut self, f: impl Fn(&mut Context, Entity) + 'static) -> Self {
        self.update = Some(Rc::new(f));
        self
    }

    /// Template collision box, copied onto each spawned entity.
    pub fn bbox(mut self, bbox: BBox) -> Self {
        self.bbox = bbox;
        self
    }

    /// Template velocity, copied onto each spawned entity.
    pub fn velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    /// Per-type state template. The factory runs once per spawn, so every
    /// entity gets its own deep copy of the default state.
    pub fn state<T: 'static>(mut self, factory: impl Fn() -> T + 'static) -> Self {
        self.state = Some(Box::new(move || Box::new(factory())));
        self
    }
}

struct EntityType {
    symbol: char,
    update: Option<UpdateFn>,
    bbox: BBox,
    velocity: Vec2,
    state: Option<StateFactory>,
    /// Entities of this type, in their own arena for single-type queries.
    collision: SlotArena<Entity>,
}

// ── World ────────────────────────────────────────────────────────────────

/// The entity store: registered types plus the global entity registry.
pub struct World {
    types: Vec<EntityType>,
    symbols: HashMap<char, EntityTypeId>,
    entities: SlotArena<EntityData>,
}

impl World {
    pub fn new() -> Self {
        Self {
            types: Vec::new(),
            symbols: HashMap::new(),
            entities: SlotArena::new(),
        }
    }

    // ── Types ────────────────────────────────────────────────────────

    /// Register an entity type. One-time, at startup.
    ///
    /// # Panics
    ///
    /// Panics if the map symbol is already registered — duplicate
    /// registrations are a configuration error, not a silent overwrite.
    pub fn register_type(&mut self, def: EntityTypeDef) -> EntityTypeId {
        if self.symbols.contains_key(&def.symbol) {
            panic!("Map symbol '{}' is already registered", def.symbol);
        }
        let id = EntityTypeId(self.types.len() as u32);
        self.symbols.insert(def.symbol, id);
        self.types.push(EntityType {
            symbol: def.symbol,
            update: def.update,
            bbox: def.bbox,
            velocity: def.velocity,
            state: def.state,
            collision: SlotArena::new(),
        });
        id
    }

    /// Look up a type by its map symbol.
    pub fn type_by_symbol(&self, symbol: char) -> Option<EntityTypeId> {
        self.symbols.get(&symbol).copied()
    }

    /// The map symbol of a registered type.
    pub fn symbol_of(&self, type_id: EntityTypeId) -> char {
        self.ty(type_id).symbol
    }

    /// Number of registered types.
    pub fn type_count(&self) -> usize {
        self.types.len()
    }

    fn ty(&self, type_id: EntityTypeId) -> &EntityType {
        self.types.get(type_id.index()).unwrap_or_else(|| {
            panic!(
                "Unknown entity type {:?} (was it registered on this World?)",
                type_id
            )
        })
    }

    /// Snapshot of the per-type update callbacks, indexed by type.
    pub(crate) fn update_fns(&self) -> Vec<Option<UpdateFn>> {
        self.types.iter().map(|t| t.update.clone()).collect()
    }

    // ── Spawn / Despawn ──────────────────────────────────────────────

    /// Spawn an entity of the given type at the origin.
    ///
    /// The record starts with zeroed position, the template's bbox and
    /// velocity, and a fresh copy of the template state. Both registry
    /// slots are stamped onto the record before this returns.
    ///
    /// # Panics
    ///
    /// Panics if `type_id` was not registered on this `World`.
    pub fn spawn(&mut self, type_id: EntityTypeId) -> Entity {
        let ty = self.ty(type_id);
        let data = EntityData::new(
            type_id,
            ty.bbox,
            ty.velocity,
            ty.state.as_ref().map(|factory| factory()),
        );

        let slot = self.entities.insert(data);
        let entity = Entity(slot);
        self.entities.get_mut(slot).unwrap().slot = slot;

        let collision_slot = self.types[type_id.index()].collision.insert(entity);
        self.entities.get_mut(slot).unwrap().collision_slot = collision_slot;

        entity
    }

    /// Spawn at a position.
    pub fn spawn_at(&mut self, type_id: EntityTypeId, position: Vec2) -> Entity {
        let entity = self.spawn(type_id);
        self.entities.get_mut(entity.0).unwrap().position = position;
        entity
    }

    /// Despawn an entity, tombstoning its slot in the global registry and
    /// in its type's collision list. The handle is permanently invalid
    /// afterwards.
    ///
    /// # Panics
    ///
    /// Panics if the entity was already despawned (stale handle) — a
    /// lifecycle bug worth surfacing at the call site.
    pub fn despawn(&mut self, entity: Entity) {
        let data = self.entities.remove(entity.0);
        self.types[data.type_id.index()]
            .collision
            .remove(data.collision_slot);
    }

    // ── Access ───────────────────────────────────────────────────────

    /// The record for a live entity.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn entity(&self, entity: Entity) -> &EntityData {
        self.entities
            .get(entity.0)
            .unwrap_or_else(|| panic!("{:?} is not alive", entity))
    }

    /// Mutable record for a live entity.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn entity_mut(&mut self, entity: Entity) -> &mut EntityData {
        self.entities
            .get_mut(entity.0)
            .unwrap_or_else(|| panic!("{:?} is not alive", entity))
    }

    /// Probing accessor: `None` if the handle is stale.
    pub fn get(&self, entity: Entity) -> Option<&EntityData> {
        self.entities.get(entity.0)
    }

    /// Probing mutable accessor: `None` if the handle is stale.
    pub fn get_mut(&mut self, entity: Entity) -> Option<&mut EntityData> {
        self.entities.get_mut(entity.0)
    }

    /// Whether the handle refers to a live entity.
    pub fn is_alive(&self, entity: Entity) -> bool {
        self.entities.contains(entity.0)
    }

    /// Number of live entities.
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Live entities of one type, via its collision list.
    pub fn entities_of(&self, type_id: EntityTypeId) -> impl Iterator<Item = Entity> + '_ {
        self.ty(type_id).collision.iter().map(|(_, &e)| e)
    }

    /// Number of live entities of one type.
    pub fn count_of(&self, type_id: EntityTypeId) -> usize {
        self.ty(type_id).collision.len()
    }

    /// All live entities with their records, in registry slot order.
    ///
    /// This is the renderer's per-frame view: positions and bboxes, read
    /// only.
    pub fn entities(&self) -> impl Iterator<Item = (Entity, &EntityData)> {
        self.entities.iter().map(|(slot, data)| (Entity(slot), data))
    }

    pub(crate) fn slot_count(&self) -> usize {
        self.entities.slot_count()
    }

    /// Revalidate a raw registry position for the dispatch loop.
    pub(crate) fn entity_at(&self, raw: usize) -> Option<(Entity, EntityTypeId)> {
        let slot = self.entities.slot_at(raw)?;
        let data = self.entities.get(slot)?;
        Some((Entity(slot), data.type_id))
    }

    pub(crate) fn collision_list(&self, type_id: EntityTypeId) -> &SlotArena<Entity> {
        &self.ty(type_id).collision
    }

    // ── Map construction ─────────────────────────────────────────────

    /// Build entities from ASCII map rows: each character matching a
    /// registered symbol spawns that type at `(column, row) * tile_size`.
    /// Unrecognized characters are silently skipped.
    pub fn build_map(&mut self, rows: &[&str], tile_size: f32) {
        let before = self.entity_count();
        for (y, row) in rows.iter().enumerate() {
            for (x, symbol) in row.chars().enumerate() {
                if let Some(type_id) = self.type_by_symbol(symbol) {
                    self.spawn_at(
                        type_id,
                        Vec2::new(x as f32 * tile_size, y as f32 * tile_size),
                    );
                }
            }
        }
        log::info!(
            "Built map: {} entities from {} rows",
            self.entity_count() - before,
            rows.len()
        );
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Hitpoints(u32);

    fn solid(symbol: char) -> EntityTypeDef {
        EntityTypeDef::new(symbol).bbox(BBox::sized(1.0, 1.0))
    }

    #[test]
    fn spawn_applies_template() {
        let mut world = World::new();
        let ty = world.register_type(
            EntityTypeDef::new('e')
                .bbox(BBox::new(0.1, 0.2, 0.8, 0.9))
                .velocity(Vec2::new(2.0, 0.0))
                .state(|| Hitpoints(3)),
        );

        let e = world.spawn(ty);
        let data = world.entity(e);
        assert_eq!(data.position, Vec2::ZERO);
        assert_eq!(data.velocity, Vec2::new(2.0, 0.0));
        assert_eq!(data.bbox, BBox::new(0.1, 0.2, 0.8, 0.9));
        assert!(!data.initialized);
        assert_eq!(data.state::<Hitpoints>(), Some(&Hitpoints(3)));
        assert_eq!(data.id(), e);
        assert_eq!(data.type_id(), ty);
    }

    #[test]
    fn template_state_is_copied_per_instance() {
        let mut world = World::new();
        let ty = world.register_type(EntityTypeDef::new('e').state(|| Hitpoints(3)));

        let a = world.spawn(ty);
        let b = world.spawn(ty);
        world.entity_mut(a).state_mut::<Hitpoints>().unwrap().0 = 1;

        // b's state is its own copy, untouched by a's mutation.
        assert_eq!(world.entity(b).state::<Hitpoints>(), Some(&Hitpoints(3)));
        assert_eq!(world.entity(a).state::<Hitpoints>(), Some(&Hitpoints(1)));
    }

    #[test]
    #[should_panic(expected = "already registered")]
    fn duplicate_symbol_rejected() {
        let mut world = World::new();
        world.register_type(EntityTypeDef::new('#'));
        world.register_type(EntityTypeDef::new('#'));
    }

    #[test]
    fn despawn_clears_both_registries() {
        let mut world = World::new();
        let ty = world.register_type(solid('#'));
        let a = world.spawn(ty);
        let b = world.spawn(ty);
        assert_eq!(world.entity_count(), 2);
        assert_eq!(world.count_of(ty), 2);

        world.despawn(a);
        assert_eq!(world.entity_count(), 1);
        assert_eq!(world.count_of(ty), 1);
        assert!(!world.is_alive(a));
        assert!(world.is_alive(b));
        assert!(world.get(a).is_none());
    }

    #[test]
    #[should_panic(expected = "not alive")]
    fn stale_handle_access_panics() {
        let mut world = World::new();
        let ty = world.register_type(solid('#'));
        let a = world.spawn(ty);
        world.despawn(a);
        world.entity(a);
    }

    #[test]
    #[should_panic]
    fn double_despawn_panics() {
        let mut world = World::new();
        let ty = world.register_type(solid('#'));
        let a = world.spawn(ty);
        world.despawn(a);
        world.despawn(a);
    }

    #[test]
    fn despawned_slot_is_reused_with_new_generation() {
        let mut world = World::new();
        let ty = world.register_type(solid('#'));
        let a = world.spawn(ty);
        world.despawn(a);

        let b = world.spawn(ty);
        assert_eq!(b.slot().index(), a.slot().index()); // slot reused
        assert_ne!(a, b); // but the old handle stays dead
        assert!(!world.is_alive(a));
        assert!(world.is_alive(b));
    }

    #[test]
    fn build_map_spawns_perimeter() {
        let mut world = World::new();
        let wall = world.register_type(solid('#'));
        world.build_map(&["####", "#  #", "####"], 2.0);

        // 4 + 2 + 4 perimeter cells; interior spaces are skipped.
        assert_eq!(world.entity_count(), 10);
        assert_eq!(world.count_of(wall), 10);

        let positions: Vec<Vec2> = world.entities().map(|(_, d)| d.position).collect();
        assert!(positions.contains(&Vec2::new(0.0, 0.0)));
        assert!(positions.contains(&Vec2::new(6.0, 0.0))); // column 3 * tile 2.0
        assert!(positions.contains(&Vec2::new(0.0, 4.0))); // row 2 * tile 2.0
        assert!(positions.contains(&Vec2::new(6.0, 4.0)));
        assert!(!positions.contains(&Vec2::new(2.0, 2.0))); // interior gap
    }

    #[test]
    fn build_map_skips_unregistered_symbols() {
        let mut world = World::new();
        world.register_type(solid('#'));
        world.build_map(&["#?#", "x x"], 1.0);
        assert_eq!(world.entity_count(), 2);
    }

    #[test]
    fn entities_of_tracks_only_that_type() {
        let mut world = World::new();
        let wall = world.register_type(solid('#'));
        let coin = world.register_type(EntityTypeDef::new('o').bbox(BBox::sized(0.5, 0.5)));

        world.spawn(wall);
        let c = world.spawn(coin);
        world.spawn(wall);

        let coins: Vec<Entity> = world.entities_of(coin).collect();
        assert_eq!(coins, vec![c]);
        assert_eq!(world.count_of(wall), 2);
    }
}
