#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Turn resolver that sequences a full round of play.
//!
//! A round runs the hero's intent, relights the world, lets every
//! non-player character act in row-major order and relights once more. The
//! current [`TurnPhase`] is passed in and returned explicitly; intents that
//! arrive while the resolver is not awaiting input are dropped.

use lantern_crawl_core::{Command, Event, Intent, TurnPhase};
use lantern_crawl_system_lighting::Lighting;
use lantern_crawl_system_pursuit::Pursuit;
use lantern_crawl_world::{apply, query, World, WorldError};
use tracing::{debug, info, warn};

/// Failure raised while resolving a turn.
#[derive(Debug, thiserror::Error)]
pub enum TurnError {
    /// The world rejected a command because a layer precondition was violated.
    #[error("world rejected a turn command")]
    World(#[from] WorldError),
}

/// Drives the hero and non-player phases of every turn.
#[derive(Debug, Default)]
pub struct TurnResolver {
    lighting: Lighting,
    pursuit: Pursuit,
    commands: Vec<Command>,
    scratch: Vec<Event>,
}

impl TurnResolver {
    /// Creates a resolver that lights the world with the provided system.
    #[must_use]
    pub fn new(lighting: Lighting) -> Self {
        Self {
            lighting,
            pursuit: Pursuit::new(),
            commands: Vec::new(),
            scratch: Vec::new(),
        }
    }

    /// Lights a freshly loaded world and hands control to the player.
    pub fn begin(
        &mut self,
        world: &mut World,
        out_events: &mut Vec<Event>,
    ) -> Result<TurnPhase, TurnError> {
        self.refresh_lighting(world)?;
        let phase = if query::hero_id(world).is_some() {
            TurnPhase::AwaitingPlayerInput
        } else {
            TurnPhase::Defeated
        };
        out_events.push(Event::PhaseChanged { phase });
        Ok(phase)
    }

    /// Resolves a full turn for the submitted intent and returns the next phase.
    ///
    /// Events are appended to `out_events` in the order they happened,
    /// interleaved with [`Event::PhaseChanged`] markers.
    pub fn submit(
        &mut self,
        world: &mut World,
        phase: TurnPhase,
        intent: Intent,
        out_events: &mut Vec<Event>,
    ) -> Result<TurnPhase, TurnError> {
        if !phase.accepts_input() {
            warn!(?phase, ?intent, "dropped intent outside the player's turn");
            return Ok(phase);
        }

        out_events.push(Event::PhaseChanged {
            phase: TurnPhase::ResolvingPlayerAction,
        });
        debug!(?intent, "resolving player action");
        apply(world, intent.into_command(), out_events)?;
        self.refresh_lighting(world)?;

        out_events.push(Event::PhaseChanged {
            phase: TurnPhase::ResolvingNpcPhase,
        });
        let defeated = self.resolve_npc_phase(world, out_events)?;
        self.refresh_lighting(world)?;

        let next = if defeated || query::hero_id(world).is_none() {
            info!("hero defeated, turn loop halted");
            TurnPhase::Defeated
        } else {
            TurnPhase::AwaitingPlayerInput
        };
        out_events.push(Event::PhaseChanged { phase: next });
        Ok(next)
    }

    /// Recomputes illumination for the whole world and applies it.
    pub fn refresh_lighting(&mut self, world: &mut World) -> Result<(), TurnError> {
        let sources = query::light_sources(world);
        let snapshot: &World = world;
        self.commands.clear();
        self.lighting.handle(
            &sources,
            |position, out| query::light_occupants(snapshot, position, out),
            &mut self.commands,
        );

        self.scratch.clear();
        for command in self.commands.drain(..) {
            apply(world, command, &mut self.scratch)?;
        }
        Ok(())
    }

    fn resolve_npc_phase(
        &mut self,
        world: &mut World,
        out_events: &mut Vec<Event>,
    ) -> Result<bool, TurnError> {
        let hero = query::hero_position(world);
        let npcs = query::npcs(world);
        self.commands.clear();
        self.pursuit.handle(hero, &npcs, &mut self.commands);
        debug!(npcs = npcs.len(), "resolving npc phase");

        for command in self.commands.drain(..) {
            let first = out_events.len();
            apply(world, command, out_events)?;
            let hero_fell = out_events[first..]
                .iter()
                .any(|event| matches!(event, Event::HeroDefeated { .. }));
            if hero_fell {
                return Ok(true);
            }
        }
        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use lantern_crawl_core::{ActorBlueprint, Category, Direction, Position};

    use super::*;

    fn hero_world() -> World {
        let mut world = World::new(5, 5);
        let mut hero = ActorBlueprint::new("Hero", Category::Hero, Position::new(2, 2));
        hero.blocks_movement = true;
        hero.hitpoints = 25;
        hero.light_range = 4;
        let _ = world.spawn(hero).expect("vacant");
        world
    }

    #[test]
    fn intents_outside_the_player_turn_are_dropped() {
        let mut world = hero_world();
        let mut resolver = TurnResolver::default();
        let mut events = Vec::new();

        for phase in [
            TurnPhase::ResolvingPlayerAction,
            TurnPhase::ResolvingNpcPhase,
            TurnPhase::Defeated,
        ] {
            let next = resolver
                .submit(&mut world, phase, Intent::Move(Direction::East), &mut events)
                .expect("dropping never fails");
            assert_eq!(next, phase);
        }

        assert!(events.is_empty());
        assert_eq!(query::hero_position(&world), Some(Position::new(2, 2)));
    }

    #[test]
    fn turn_announces_each_phase_in_order() {
        let mut world = hero_world();
        let mut resolver = TurnResolver::default();
        let mut events = Vec::new();

        let phase = resolver.begin(&mut world, &mut events).expect("lit");
        events.clear();
        let next = resolver
            .submit(&mut world, phase, Intent::Wait, &mut events)
            .expect("turn resolves");

        assert_eq!(next, TurnPhase::AwaitingPlayerInput);
        assert_eq!(
            events,
            vec![
                Event::PhaseChanged {
                    phase: TurnPhase::ResolvingPlayerAction,
                },
                Event::HeroWaited,
                Event::PhaseChanged {
                    phase: TurnPhase::ResolvingNpcPhase,
                },
                Event::PhaseChanged {
                    phase: TurnPhase::AwaitingPlayerInput,
                },
            ]
        );
    }

    #[test]
    fn world_without_hero_starts_defeated() {
        let mut world = World::new(3, 3);
        let mut resolver = TurnResolver::default();
        let mut events = Vec::new();

        let phase = resolver.begin(&mut world, &mut events).expect("lit");

        assert_eq!(phase, TurnPhase::Defeated);
    }
}
