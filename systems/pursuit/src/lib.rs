#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that moves every non-player character one step toward the hero.

use lantern_crawl_core::{Command, Direction, NpcSnapshot, Position};

/// Greedy chase planner; holds no state between turns.
#[derive(Debug, Default)]
pub struct Pursuit;

impl Pursuit {
    /// Creates a new pursuit system.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Emits one step command per character, in the order provided.
    ///
    /// Nothing is emitted once the hero has left the world, and characters
    /// already sharing the hero's cell stay put.
    pub fn handle(&self, hero: Option<Position>, npcs: &[NpcSnapshot], out: &mut Vec<Command>) {
        let Some(hero) = hero else {
            return;
        };

        for npc in npcs {
            if let Some(direction) = approach_direction(npc.position, hero) {
                out.push(Command::StepNpc {
                    npc: npc.id,
                    direction,
                });
            }
        }
    }
}

/// Picks the cardinal step that closes the larger gap between two cells.
///
/// Ties favour the horizontal axis. Returns `None` when the cells coincide.
#[must_use]
pub fn approach_direction(from: Position, to: Position) -> Option<Direction> {
    let dx = to.x() - from.x();
    let dy = to.y() - from.y();

    if dx == 0 && dy == 0 {
        return None;
    }

    if dx.abs() >= dy.abs() {
        Some(if dx > 0 {
            Direction::East
        } else {
            Direction::West
        })
    } else {
        Some(if dy > 0 {
            Direction::South
        } else {
            Direction::North
        })
    }
}
