#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that narrates world events as combat log lines.

use std::collections::VecDeque;

use lantern_crawl_core::{Category, Event};

/// Number of lines retained when no explicit capacity is requested.
pub const DEFAULT_CAPACITY: usize = 100;

/// Bounded history of the messages shown in the HUD.
#[derive(Clone, Debug)]
pub struct CombatLog {
    capacity: usize,
    lines: VecDeque<String>,
}

impl CombatLog {
    /// Creates a log retaining [`DEFAULT_CAPACITY`] lines.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates a log retaining at most `capacity` lines; older lines are discarded first.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            lines: VecDeque::with_capacity(capacity),
        }
    }

    /// Appends a line for every narrated event, in event order.
    pub fn handle(&mut self, events: &[Event]) {
        for event in events {
            if let Some(line) = narrate(event) {
                self.push(line);
            }
        }
    }

    /// Retained lines, oldest first.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    /// Most recent `count` lines, oldest first.
    pub fn recent(&self, count: usize) -> impl Iterator<Item = &str> {
        self.lines
            .iter()
            .skip(self.lines.len().saturating_sub(count))
            .map(String::as_str)
    }

    /// Number of retained lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Reports whether nothing has been logged.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    fn push(&mut self, line: String) {
        if self.capacity == 0 {
            return;
        }
        while self.lines.len() >= self.capacity {
            let _ = self.lines.pop_front();
        }
        self.lines.push_back(line);
    }
}

impl Default for CombatLog {
    fn default() -> Self {
        Self::new()
    }
}

/// Renders the message shown for an event, if the event is narrated at all.
///
/// Bumping an already opened chest or door is silent, as are movement and
/// phase changes.
#[must_use]
pub fn narrate(event: &Event) -> Option<String> {
    let line = match event {
        Event::HeroWaited => "You waited.".to_owned(),
        Event::HeroBlocked {
            obstacle: None | Some(Category::Wall),
            ..
        } => "You cannot move there.".to_owned(),
        Event::DoorOpened { .. } => "You opened the door.".to_owned(),
        Event::ChestOpened {
            item: Some(item), ..
        } => format!("You opened a chest...  found {item}!"),
        Event::ChestOpened { item: None, .. } => "You opened a chest...  it was empty.".to_owned(),
        Event::HeroAttacked {
            npc_name, damage, ..
        } => format!("You attacked {npc_name} for {damage} damage."),
        Event::NpcSlain { npc_name, .. } => format!("You killed {npc_name}!"),
        Event::GoldCollected { amount, .. } => format!("You picked up {amount} gold!"),
        Event::NpcAttacked {
            npc_name, damage, ..
        } => format!("{npc_name} attacked you for {damage} damage."),
        Event::HeroDefeated { npc_name, .. } => format!("{npc_name} killed you!"),
        Event::HeroBlocked { .. } | Event::ActorMoved { .. } | Event::PhaseChanged { .. } => {
            return None
        }
    };
    Some(line)
}

#[cfg(test)]
mod tests {
    use lantern_crawl_core::{ActorId, Position, TurnPhase};

    use super::*;

    fn blocked(obstacle: Option<Category>) -> Event {
        Event::HeroBlocked {
            destination: Position::new(1, 1),
            obstacle,
        }
    }

    #[test]
    fn melee_exchange_reads_naturally() {
        let mut log = CombatLog::new();
        let npc = ActorId::new(3);
        log.handle(&[
            Event::HeroAttacked {
                npc,
                npc_name: "Monster".to_owned(),
                damage: 3,
                remaining: -1,
            },
            Event::NpcSlain {
                npc,
                npc_name: "Monster".to_owned(),
            },
            Event::NpcAttacked {
                npc: ActorId::new(4),
                npc_name: "Monster".to_owned(),
                damage: 2,
                remaining: 0,
            },
            Event::HeroDefeated {
                npc: ActorId::new(4),
                npc_name: "Monster".to_owned(),
            },
        ]);

        assert_eq!(
            log.lines().collect::<Vec<_>>(),
            vec![
                "You attacked Monster for 3 damage.",
                "You killed Monster!",
                "Monster attacked you for 2 damage.",
                "Monster killed you!",
            ]
        );
    }

    #[test]
    fn only_walls_and_edges_report_blocked_moves() {
        assert_eq!(
            narrate(&blocked(Some(Category::Wall))).as_deref(),
            Some("You cannot move there.")
        );
        assert_eq!(
            narrate(&blocked(None)).as_deref(),
            Some("You cannot move there.")
        );
        assert_eq!(narrate(&blocked(Some(Category::Chest))), None);
    }

    #[test]
    fn interactions_are_narrated() {
        assert_eq!(narrate(&Event::HeroWaited).as_deref(), Some("You waited."));
        assert_eq!(
            narrate(&Event::ChestOpened {
                chest: ActorId::new(1),
                item: Some("Silver Key".to_owned()),
            })
            .as_deref(),
            Some("You opened a chest...  found Silver Key!")
        );
        assert_eq!(
            narrate(&Event::GoldCollected {
                item: ActorId::new(2),
                amount: 5,
            })
            .as_deref(),
            Some("You picked up 5 gold!")
        );
        assert_eq!(
            narrate(&Event::PhaseChanged {
                phase: TurnPhase::ResolvingNpcPhase,
            }),
            None
        );
    }

    #[test]
    fn history_is_bounded() {
        let mut log = CombatLog::with_capacity(2);
        log.handle(&[Event::HeroWaited, blocked(None), Event::HeroWaited]);

        assert_eq!(log.len(), 2);
        assert_eq!(
            log.lines().collect::<Vec<_>>(),
            vec!["You cannot move there.", "You waited."]
        );
        assert_eq!(log.recent(1).collect::<Vec<_>>(), vec!["You waited."]);
    }
}
