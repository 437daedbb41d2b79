//! Stock actor kinds and the blueprints they expand into.

use lantern_crawl_core::{ActorBlueprint, Category, Position};

use crate::GameConfig;

/// Kind of actor a map tile can produce.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Archetype {
    /// The player-controlled hero.
    Hero,
    /// A hostile monster hidden under fog.
    Monster,
    /// Solid masonry.
    Wall,
    /// A closed door that opens when bumped.
    Door,
    /// A wall-mounted torch casting a small light.
    Torch,
    /// Walkable ground.
    Floor,
    /// A pile of gold.
    Gold,
    /// A chest holding a single item.
    Chest,
}

impl Archetype {
    /// Maps an ASCII map symbol onto an archetype.
    ///
    /// A space denotes bare floor.
    #[must_use]
    pub const fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            'p' => Some(Self::Hero),
            'e' => Some(Self::Monster),
            '#' => Some(Self::Wall),
            'd' => Some(Self::Door),
            't' => Some(Self::Torch),
            ' ' => Some(Self::Floor),
            'g' => Some(Self::Gold),
            'c' => Some(Self::Chest),
            _ => None,
        }
    }

    /// Symbol representing the archetype in ASCII maps.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Hero => 'p',
            Self::Monster => 'e',
            Self::Wall => '#',
            Self::Door => 'd',
            Self::Torch => 't',
            Self::Floor => ' ',
            Self::Gold => 'g',
            Self::Chest => 'c',
        }
    }

    /// Builds the blueprint of an actor of this archetype standing at `position`.
    #[must_use]
    pub fn blueprint(self, position: Position, config: &GameConfig) -> ActorBlueprint {
        match self {
            Self::Hero => {
                let mut hero = ActorBlueprint::new("Hero", Category::Hero, position);
                hero.blocks_movement = true;
                hero.hitpoints = config.hero.hitpoints;
                hero.damage = config.hero.damage;
                hero.light_range = config.hero.light_range;
                hero
            }
            Self::Monster => {
                let mut monster = ActorBlueprint::new("Monster", Category::Npc, position);
                monster.blocks_movement = true;
                monster.hitpoints = config.monster.hitpoints;
                monster.damage = config.monster.damage;
                monster.hidden_under_fog = true;
                monster
            }
            Self::Wall => {
                let mut wall = ActorBlueprint::new("Wall", Category::Wall, position);
                wall.blocks_movement = true;
                wall.blocks_light = true;
                wall
            }
            Self::Door => {
                let mut door = ActorBlueprint::new("Door", Category::Door, position);
                door.blocks_movement = true;
                door.blocks_light = true;
                door
            }
            // Torches are wall fixtures: solid, but transparent to their own light.
            Self::Torch => {
                let mut torch = ActorBlueprint::new("Torch", Category::Wall, position);
                torch.blocks_movement = true;
                torch.light_range = config.torch.light_range;
                torch.light_always_visible = config.torch.always_visible;
                torch
            }
            Self::Floor => ActorBlueprint::new("Floor", Category::Floor, position),
            Self::Gold => {
                let mut gold = ActorBlueprint::new("Gold", Category::Item, position);
                gold.gold = config.gold.amount;
                gold
            }
            Self::Chest => {
                let mut chest = ActorBlueprint::new("Chest", Category::Chest, position);
                chest.blocks_movement = true;
                chest.contents = Some(config.chest.item.clone());
                chest
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Archetype; 8] = [
        Archetype::Hero,
        Archetype::Monster,
        Archetype::Wall,
        Archetype::Door,
        Archetype::Torch,
        Archetype::Floor,
        Archetype::Gold,
        Archetype::Chest,
    ];

    #[test]
    fn symbols_map_back_to_their_archetype() {
        for archetype in ALL {
            assert_eq!(Archetype::from_symbol(archetype.symbol()), Some(archetype));
        }
        assert_eq!(Archetype::from_symbol('x'), None);
    }

    #[test]
    fn stock_statistics_are_applied() {
        let config = GameConfig::default();
        let origin = Position::new(0, 0);

        let hero = Archetype::Hero.blueprint(origin, &config);
        assert_eq!((hero.hitpoints, hero.damage, hero.light_range), (25, 3, 10));
        assert!(hero.blocks_movement);
        assert!(!hero.blocks_light);

        let monster = Archetype::Monster.blueprint(origin, &config);
        assert_eq!((monster.hitpoints, monster.damage), (5, 2));
        assert!(monster.hidden_under_fog);

        let torch = Archetype::Torch.blueprint(origin, &config);
        assert_eq!(torch.category, Category::Wall);
        assert_eq!(torch.light_range, 3);
        assert!(torch.blocks_movement);
        assert!(!torch.blocks_light);

        let gold = Archetype::Gold.blueprint(origin, &config);
        assert_eq!(gold.gold, 5);
        assert!(!gold.blocks_movement);

        let chest = Archetype::Chest.blueprint(origin, &config);
        assert!(chest.blocks_movement);
        assert!(!chest.blocks_light);
        assert_eq!(chest.contents.as_deref(), Some("Trinket"));
    }
}
