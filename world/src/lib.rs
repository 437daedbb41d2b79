#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Lantern Crawl.
//!
//! The world owns every actor together with five spatial layers: one per
//! renderable category (floor, block, item, life) plus a collision layer that
//! indexes every movement-blocking actor. An actor always sits in its
//! category layer and, when it blocks movement, in the collision layer at the
//! same cell. The compound operations below validate both memberships before
//! touching either, so no failure leaves the pair inconsistent.

use std::collections::BTreeMap;

use lantern_crawl_core::{ActorBlueprint, ActorId, Category, Command, Event, LayerKind, Position};
use tracing::debug;

mod actor;
mod error;
mod layer;
mod rules;

pub use actor::{Actor, Inventory};
pub use error::{LayerError, WorldError};
pub use layer::CellLayer;

/// Represents the authoritative Lantern Crawl world state.
#[derive(Debug)]
pub struct World {
    width: u32,
    height: u32,
    actors: BTreeMap<ActorId, Actor>,
    floor: CellLayer,
    block: CellLayer,
    item: CellLayer,
    life: CellLayer,
    collision: CellLayer,
    hero: Option<ActorId>,
    next_actor_id: u32,
}

impl World {
    /// Creates an empty world covering `width` x `height` cells.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            actors: BTreeMap::new(),
            floor: CellLayer::new(LayerKind::Floor, width, height),
            block: CellLayer::new(LayerKind::Block, width, height),
            item: CellLayer::new(LayerKind::Item, width, height),
            life: CellLayer::new(LayerKind::Life, width, height),
            collision: CellLayer::new(LayerKind::Collision, width, height),
            hero: None,
            next_actor_id: 0,
        }
    }

    /// Creates a world and admits every blueprint in order.
    ///
    /// Identifiers are allocated sequentially, so the same blueprint list
    /// always produces the same world.
    pub fn populate<I>(width: u32, height: u32, blueprints: I) -> Result<Self, WorldError>
    where
        I: IntoIterator<Item = ActorBlueprint>,
    {
        let mut world = Self::new(width, height);
        for blueprint in blueprints {
            let _ = world.spawn(blueprint)?;
        }
        Ok(world)
    }

    /// Admits a new actor into its category layer and, when it blocks
    /// movement, the collision layer.
    pub fn spawn(&mut self, blueprint: ActorBlueprint) -> Result<ActorId, WorldError> {
        if blueprint.category == Category::Hero {
            if let Some(existing) = self.hero {
                return Err(WorldError::DuplicateHero { existing });
            }
        }

        let kind = blueprint.category.layer();
        let position = blueprint.position;
        self.layer(kind).ensure_vacant(position)?;
        if blueprint.blocks_movement {
            self.collision.ensure_vacant(position)?;
        }

        let id = ActorId::new(self.next_actor_id);
        self.next_actor_id = self.next_actor_id.saturating_add(1);

        self.layer_mut(kind).add_actor(id, position)?;
        if blueprint.blocks_movement {
            self.collision.add_actor(id, position)?;
        }
        if blueprint.category == Category::Hero {
            self.hero = Some(id);
        }

        debug!(actor = id.get(), category = ?blueprint.category, ?position, "spawned actor");
        let _ = self
            .actors
            .insert(id, Actor::from_blueprint(id, blueprint));
        Ok(id)
    }

    /// Moves an actor to `destination` in every layer it belongs to.
    pub fn relocate(&mut self, actor: ActorId, destination: Position) -> Result<(), WorldError> {
        let (kind, origin, blocks) = self.membership(actor)?;
        let layer = self.layer(kind);
        layer.ensure_registered(actor, origin)?;
        layer.ensure_vacant(destination)?;
        if blocks {
            self.collision.ensure_registered(actor, origin)?;
            self.collision.ensure_vacant(destination)?;
        }

        self.layer_mut(kind).move_actor(actor, origin, destination)?;
        if blocks {
            self.collision.move_actor(actor, origin, destination)?;
        }
        if let Some(record) = self.actors.get_mut(&actor) {
            record.set_position(destination);
        }
        Ok(())
    }

    /// Removes an actor from every layer and the registry, returning its final state.
    pub fn despawn(&mut self, actor: ActorId) -> Result<Actor, WorldError> {
        let (kind, position, blocks) = self.membership(actor)?;
        self.layer(kind).ensure_registered(actor, position)?;
        if blocks {
            self.collision.ensure_registered(actor, position)?;
        }

        self.layer_mut(kind).remove_actor(actor, position)?;
        if blocks {
            self.collision.remove_actor(actor, position)?;
        }
        if self.hero == Some(actor) {
            self.hero = None;
        }

        debug!(actor = actor.get(), ?position, "despawned actor");
        self.actors
            .remove(&actor)
            .ok_or(WorldError::UnknownActor(actor))
    }

    /// Reports whether the cell lies inside the grid.
    #[must_use]
    pub fn contains(&self, position: Position) -> bool {
        let inside_columns = u32::try_from(position.x()).map_or(false, |x| x < self.width);
        let inside_rows = u32::try_from(position.y()).map_or(false, |y| y < self.height);
        inside_columns && inside_rows
    }

    /// Provides read-only access to one of the world's layers.
    #[must_use]
    pub fn layer(&self, kind: LayerKind) -> &CellLayer {
        match kind {
            LayerKind::Floor => &self.floor,
            LayerKind::Block => &self.block,
            LayerKind::Item => &self.item,
            LayerKind::Life => &self.life,
            LayerKind::Collision => &self.collision,
        }
    }

    fn layer_mut(&mut self, kind: LayerKind) -> &mut CellLayer {
        match kind {
            LayerKind::Floor => &mut self.floor,
            LayerKind::Block => &mut self.block,
            LayerKind::Item => &mut self.item,
            LayerKind::Life => &mut self.life,
            LayerKind::Collision => &mut self.collision,
        }
    }

    fn membership(&self, actor: ActorId) -> Result<(LayerKind, Position, bool), WorldError> {
        let record = self
            .actors
            .get(&actor)
            .ok_or(WorldError::UnknownActor(actor))?;
        Ok((
            record.category().layer(),
            record.position(),
            record.blocks_movement(),
        ))
    }

    fn actor_mut(&mut self, actor: ActorId) -> Option<&mut Actor> {
        self.actors.get_mut(&actor)
    }
}

/// Applies the provided command to the world, mutating state deterministically.
///
/// Commands naming actors that are no longer alive are skipped. An `Err` means
/// a layer precondition was violated; the failing operation left every layer
/// untouched.
pub fn apply(
    world: &mut World,
    command: Command,
    out_events: &mut Vec<Event>,
) -> Result<(), WorldError> {
    match command {
        Command::HeroWait => {
            if world.hero.is_some() {
                out_events.push(Event::HeroWaited);
            }
            Ok(())
        }
        Command::MoveHero { direction } => rules::move_hero(world, direction, out_events),
        Command::StepNpc { npc, direction } => rules::step_npc(world, npc, direction, out_events),
        Command::ApplyIllumination { illumination } => {
            for actor in world.actors.values_mut() {
                if actor.in_render_bounds() {
                    actor.fade();
                }
            }
            for (id, tint) in illumination.iter() {
                if let Some(actor) = world.actor_mut(id) {
                    actor.illuminate(tint);
                }
            }
            debug!(lit = illumination.len(), "applied illumination");
            Ok(())
        }
        Command::UpdateRenderBounds { region } => {
            for actor in world.actors.values_mut() {
                let in_bounds = region.map_or(true, |region| region.contains(actor.position()));
                actor.set_in_render_bounds(in_bounds);
            }
            Ok(())
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use lantern_crawl_core::{
        ActorId, ActorSnapshot, ActorView, Category, HeroSnapshot, LayerKind, LightOccupant,
        LightSource, NpcSnapshot, Position,
    };

    use super::{Actor, CellLayer, World};

    /// Width and height of the grid in cells.
    #[must_use]
    pub fn dimensions(world: &World) -> (u32, u32) {
        (world.width, world.height)
    }

    /// Provides read-only access to a single actor.
    #[must_use]
    pub fn actor(world: &World, actor: ActorId) -> Option<&Actor> {
        world.actors.get(&actor)
    }

    /// Iterates every living actor in identifier order.
    pub fn actors(world: &World) -> impl Iterator<Item = &Actor> {
        world.actors.values()
    }

    /// Provides read-only access to one of the world's layers.
    #[must_use]
    pub fn layer(world: &World, kind: LayerKind) -> &CellLayer {
        world.layer(kind)
    }

    /// Identifier of the hero while it is alive.
    #[must_use]
    pub fn hero_id(world: &World) -> Option<ActorId> {
        world.hero
    }

    /// Cell occupied by the hero while it is alive.
    #[must_use]
    pub fn hero_position(world: &World) -> Option<Position> {
        world
            .hero
            .and_then(|hero| world.actors.get(&hero))
            .map(Actor::position)
    }

    /// Captures the hero statistics shown by the HUD.
    #[must_use]
    pub fn hero(world: &World) -> Option<HeroSnapshot> {
        let hero = world.hero.and_then(|hero| world.actors.get(&hero))?;
        Some(HeroSnapshot {
            id: hero.id(),
            position: hero.position(),
            hitpoints: hero.hitpoints(),
            damage: hero.damage(),
            gold: hero.gold(),
            items: hero.inventory().items().to_vec(),
        })
    }

    /// Captures the presentation state of every actor.
    #[must_use]
    pub fn actor_view(world: &World) -> ActorView {
        let snapshots = world
            .actors
            .values()
            .map(|actor| ActorSnapshot {
                id: actor.id(),
                name: actor.name().to_owned(),
                category: actor.category(),
                position: actor.position(),
                visible: actor.visible(),
                revealed: actor.revealed(),
                tint: actor.tint(),
            })
            .collect();
        ActorView::from_snapshots(snapshots)
    }

    /// Non-player characters registered in the life layer, in row-major cell order.
    #[must_use]
    pub fn npcs(world: &World) -> Vec<NpcSnapshot> {
        world
            .life
            .actors()
            .filter_map(|id| world.actors.get(&id))
            .filter(|actor| actor.category() == Category::Npc)
            .map(|actor| NpcSnapshot {
                id: actor.id(),
                position: actor.position(),
            })
            .collect()
    }

    /// Every actor emitting light, in identifier order.
    ///
    /// A source is eligible to shine when it is the hero, has been revealed,
    /// or always casts light.
    #[must_use]
    pub fn light_sources(world: &World) -> Vec<LightSource> {
        world
            .actors
            .values()
            .filter(|actor| actor.light_range() > 0)
            .map(|actor| LightSource {
                id: actor.id(),
                position: actor.position(),
                range: actor.light_range(),
                eligible: actor.category() == Category::Hero
                    || actor.revealed()
                    || actor.light_always_visible(),
            })
            .collect()
    }

    /// Collects the actors occupying the cell across the renderable layers.
    ///
    /// `out` is cleared first; the collision layer is an index and never
    /// contributes.
    pub fn light_occupants(world: &World, position: Position, out: &mut Vec<LightOccupant>) {
        out.clear();
        for kind in LayerKind::RENDERABLE {
            let occupant = world
                .layer(kind)
                .actor_at(position)
                .and_then(|id| world.actors.get(&id));
            if let Some(actor) = occupant {
                out.push(LightOccupant {
                    id: actor.id(),
                    blocks_light: actor.blocks_light(),
                });
            }
        }
    }
}
