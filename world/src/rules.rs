//! Resolution of hero and non-player actions against the grid.

use lantern_crawl_core::{ActorId, Category, Direction, Event, Position};
use tracing::{debug, info};

use crate::{World, WorldError};

/// Resolves a single hero step.
///
/// The destination is inspected layer by layer with strict precedence: block,
/// then life, then item. Exactly one outcome fires per attempt.
pub(crate) fn move_hero(
    world: &mut World,
    direction: Direction,
    out_events: &mut Vec<Event>,
) -> Result<(), WorldError> {
    let Some(hero) = world.hero else {
        return Ok(());
    };
    let origin = world.membership(hero)?.1;
    let destination = origin.offset(direction);

    if let Some(blocker) = world.block.actor_at(destination) {
        return bump_block(world, hero, blocker, destination, out_events);
    }

    if let Some(occupant) = world.life.actor_at(destination) {
        return strike_npc(world, hero, occupant, out_events);
    }

    if !world.contains(destination) {
        out_events.push(Event::HeroBlocked {
            destination,
            obstacle: None,
        });
        return Ok(());
    }

    if let Some(item) = world.item.actor_at(destination) {
        let collected = world.despawn(item)?;
        let amount = collected.gold();
        if let Some(record) = world.actor_mut(hero) {
            record.inventory_mut().add_gold(amount);
        }
        out_events.push(Event::GoldCollected { item, amount });
    }

    world.relocate(hero, destination)?;
    out_events.push(Event::ActorMoved {
        actor: hero,
        from: origin,
        to: destination,
    });
    Ok(())
}

fn bump_block(
    world: &mut World,
    hero: ActorId,
    blocker: ActorId,
    destination: Position,
    out_events: &mut Vec<Event>,
) -> Result<(), WorldError> {
    let (category, door_open, chest_open) = match world.actors.get(&blocker) {
        Some(actor) => (
            actor.category(),
            actor.is_door_open(),
            actor.is_chest_open(),
        ),
        None => return Err(WorldError::UnknownActor(blocker)),
    };

    match category {
        Category::Wall => out_events.push(Event::HeroBlocked {
            destination,
            obstacle: Some(Category::Wall),
        }),
        Category::Door if !door_open => {
            if let Some(door) = world.actor_mut(blocker) {
                door.open_door();
            }
            let _ = world.despawn(blocker)?;
            debug!(door = blocker.get(), ?destination, "door opened");
            out_events.push(Event::DoorOpened {
                door: blocker,
                cell: destination,
            });
        }
        Category::Chest if !chest_open => {
            let item = world.actor_mut(blocker).and_then(|chest| chest.open_chest());
            if let (Some(found), Some(record)) = (item.clone(), world.actor_mut(hero)) {
                record.inventory_mut().add_item(found);
            }
            out_events.push(Event::ChestOpened {
                chest: blocker,
                item,
            });
        }
        other => out_events.push(Event::HeroBlocked {
            destination,
            obstacle: Some(other),
        }),
    }
    Ok(())
}

fn strike_npc(
    world: &mut World,
    hero: ActorId,
    target: ActorId,
    out_events: &mut Vec<Event>,
) -> Result<(), WorldError> {
    let damage = world.actors.get(&hero).map_or(0, |actor| actor.damage());
    let Some(npc) = world.actor_mut(target) else {
        return Err(WorldError::UnknownActor(target));
    };
    if npc.category() != Category::Npc {
        return Ok(());
    }

    npc.inflict_damage(damage);
    let npc_name = npc.name().to_owned();
    let remaining = npc.hitpoints();
    let slain = npc.is_dead();
    out_events.push(Event::HeroAttacked {
        npc: target,
        npc_name: npc_name.clone(),
        damage,
        remaining,
    });

    if slain {
        let _ = world.despawn(target)?;
        debug!(npc = target.get(), "npc slain");
        out_events.push(Event::NpcSlain {
            npc: target,
            npc_name,
        });
    }
    Ok(())
}

/// Resolves a single non-player step toward the hero.
///
/// Characters that have left the world are skipped. Blocks and other
/// characters hold the mover in place; the hero is attacked instead of entered.
pub(crate) fn step_npc(
    world: &mut World,
    npc: ActorId,
    direction: Direction,
    out_events: &mut Vec<Event>,
) -> Result<(), WorldError> {
    let Some(actor) = world.actors.get(&npc) else {
        return Ok(());
    };
    if actor.category() != Category::Npc {
        return Ok(());
    }
    let origin = actor.position();
    let destination = origin.offset(direction);

    if world.block.actor_at(destination).is_some() {
        return Ok(());
    }

    if let Some(occupant) = world.life.actor_at(destination) {
        if Some(occupant) == world.hero {
            strike_hero(world, npc, occupant, out_events)?;
        }
        return Ok(());
    }

    if !world.contains(destination) {
        return Ok(());
    }

    world.relocate(npc, destination)?;
    out_events.push(Event::ActorMoved {
        actor: npc,
        from: origin,
        to: destination,
    });
    Ok(())
}

fn strike_hero(
    world: &mut World,
    npc: ActorId,
    hero: ActorId,
    out_events: &mut Vec<Event>,
) -> Result<(), WorldError> {
    let (npc_name, damage) = match world.actors.get(&npc) {
        Some(actor) => (actor.name().to_owned(), actor.damage()),
        None => return Err(WorldError::UnknownActor(npc)),
    };
    let Some(record) = world.actor_mut(hero) else {
        return Err(WorldError::UnknownActor(hero));
    };

    record.inflict_damage(damage);
    let remaining = record.hitpoints();
    let defeated = record.is_dead();
    out_events.push(Event::NpcAttacked {
        npc,
        npc_name: npc_name.clone(),
        damage,
        remaining,
    });

    if defeated {
        let _ = world.despawn(hero)?;
        info!(npc = npc.get(), "hero defeated");
        out_events.push(Event::HeroDefeated { npc, npc_name });
    }
    Ok(())
}
