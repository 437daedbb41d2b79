#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Lantern Crawl engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters translate player input into
//! [`Intent`] values, the turn resolver turns intents into [`Command`] values,
//! the world executes those commands via its `apply` entry point, and then
//! broadcasts [`Event`] values that systems and adapters react to
//! deterministically. Systems consume event streams, query immutable snapshots,
//! and respond exclusively with new command batches.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub mod geometry;

/// Intents a player may submit while the world awaits input.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Intent {
    /// Spend the turn without acting.
    Wait,
    /// Attempt to move one cell in the provided direction.
    Move(Direction),
}

impl Intent {
    /// Translates the intent into the world command that resolves it.
    #[must_use]
    pub const fn into_command(self) -> Command {
        match self {
            Self::Wait => Command::HeroWait,
            Self::Move(direction) => Command::MoveHero { direction },
        }
    }
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// The hero spends the turn waiting.
    HeroWait,
    /// The hero attempts a single step, resolving whatever occupies the destination.
    MoveHero {
        /// Direction of travel for the attempted step.
        direction: Direction,
    },
    /// A non-player character attempts a single step toward the hero.
    StepNpc {
        /// Identifier of the character attempting to move.
        npc: ActorId,
        /// Direction of travel for the attempted step.
        direction: Direction,
    },
    /// Replaces the visibility state of every actor with a freshly computed illumination.
    ApplyIllumination {
        /// Brightest tint each lit actor received during the lighting pass.
        illumination: Illumination,
    },
    /// Declares which cells currently fall inside the presentation viewport.
    UpdateRenderBounds {
        /// Visible region, or `None` when every cell is considered in bounds.
        region: Option<Region>,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// The hero waited instead of acting.
    HeroWaited,
    /// The hero could not enter the destination cell.
    HeroBlocked {
        /// Cell the hero attempted to enter.
        destination: Position,
        /// Category of the obstacle, or `None` when the cell lies outside the grid.
        obstacle: Option<Category>,
    },
    /// The hero opened a door, clearing it from the grid.
    DoorOpened {
        /// Identifier of the door that was opened.
        door: ActorId,
        /// Cell the door occupied.
        cell: Position,
    },
    /// The hero opened a chest.
    ChestOpened {
        /// Identifier of the chest that was opened.
        chest: ActorId,
        /// Name of the item moved into the hero's inventory, if the chest held one.
        item: Option<String>,
    },
    /// The hero struck a non-player character.
    HeroAttacked {
        /// Identifier of the character that was struck.
        npc: ActorId,
        /// Display name of the character that was struck.
        npc_name: String,
        /// Damage dealt by the blow.
        damage: i32,
        /// Hitpoints the character retains after the blow.
        remaining: i32,
    },
    /// A non-player character died from the hero's attack and left the world.
    NpcSlain {
        /// Identifier of the character that died.
        npc: ActorId,
        /// Display name of the character that died.
        npc_name: String,
    },
    /// The hero collected gold and the item left the world.
    GoldCollected {
        /// Identifier of the collected item.
        item: ActorId,
        /// Amount of gold added to the hero's purse.
        amount: u32,
    },
    /// An actor moved between two adjacent cells.
    ActorMoved {
        /// Identifier of the actor that moved.
        actor: ActorId,
        /// Cell the actor occupied before moving.
        from: Position,
        /// Cell the actor occupies after moving.
        to: Position,
    },
    /// A non-player character struck the hero.
    NpcAttacked {
        /// Identifier of the attacking character.
        npc: ActorId,
        /// Display name of the attacking character.
        npc_name: String,
        /// Damage dealt by the blow.
        damage: i32,
        /// Hitpoints the hero retains after the blow.
        remaining: i32,
    },
    /// The hero died and left the world.
    HeroDefeated {
        /// Identifier of the character that landed the final blow.
        npc: ActorId,
        /// Display name of the character that landed the final blow.
        npc_name: String,
    },
    /// The turn state machine entered a new phase.
    PhaseChanged {
        /// Phase that became active.
        phase: TurnPhase,
    },
}

/// States of the turn protocol.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnPhase {
    /// The world waits for the next player intent.
    AwaitingPlayerInput,
    /// The player's intent is being resolved against the world.
    ResolvingPlayerAction,
    /// Every non-player character is taking its single action.
    ResolvingNpcPhase,
    /// The hero has died; the run is over and intents are ignored.
    Defeated,
}

impl TurnPhase {
    /// Reports whether a player intent submitted now would be resolved.
    #[must_use]
    pub const fn accepts_input(self) -> bool {
        matches!(self, Self::AwaitingPlayerInput)
    }

    /// Reports whether the run has ended.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Defeated)
    }
}

/// Cardinal movement directions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    North,
    /// Movement toward increasing column indices.
    East,
    /// Movement toward increasing row indices.
    South,
    /// Movement toward decreasing column indices.
    West,
}

impl Direction {
    /// Column and row delta applied by a single step in this direction.
    #[must_use]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Self::North => (0, -1),
            Self::East => (1, 0),
            Self::South => (0, 1),
            Self::West => (-1, 0),
        }
    }
}

/// Unique identifier assigned to an actor by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ActorId(u32);

impl ActorId {
    /// Creates a new actor identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Location of a single grid cell expressed as column and row coordinates.
///
/// Coordinates are signed so that geometry may step past the grid edges;
/// lookups outside the grid simply report no occupant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    x: i32,
    y: i32,
}

impl Position {
    /// Creates a new grid position.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Column of the position.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Row of the position.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Returns the adjacent position one step away in the provided direction.
    #[must_use]
    pub const fn offset(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self::new(self.x + dx, self.y + dy)
    }

    /// Computes the Euclidean distance between two positions.
    #[must_use]
    pub fn distance(self, other: Position) -> f64 {
        let dx = f64::from(other.x - self.x);
        let dy = f64::from(other.y - self.y);
        dx.hypot(dy)
    }

    /// Computes the Manhattan distance between two positions.
    #[must_use]
    pub fn manhattan_distance(self, other: Position) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

/// Axis-aligned rectangle of cells, used to describe the presentation viewport.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Region {
    origin: Position,
    width: u32,
    height: u32,
}

impl Region {
    /// Constructs a region from its upper-left cell and dimensions.
    #[must_use]
    pub const fn new(origin: Position, width: u32, height: u32) -> Self {
        Self {
            origin,
            width,
            height,
        }
    }

    /// Upper-left cell that anchors the region.
    #[must_use]
    pub const fn origin(&self) -> Position {
        self.origin
    }

    /// Reports whether the position falls inside the region.
    #[must_use]
    pub fn contains(&self, position: Position) -> bool {
        let dx = i64::from(position.x()) - i64::from(self.origin.x());
        let dy = i64::from(position.y()) - i64::from(self.origin.y());
        dx >= 0 && dy >= 0 && dx < i64::from(self.width) && dy < i64::from(self.height)
    }
}

/// Fixed type of an actor, determining which layer stores it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// The player character.
    Hero,
    /// A non-player character.
    Npc,
    /// Walkable ground.
    Floor,
    /// Impassable wall segment, including wall-mounted torches.
    Wall,
    /// Door that opens when the hero bumps into it.
    Door,
    /// Chest that yields its contents when the hero bumps into it.
    Chest,
    /// Collectable item lying on the floor.
    Item,
}

impl Category {
    /// Layer that stores actors of this category.
    #[must_use]
    pub const fn layer(self) -> LayerKind {
        match self {
            Self::Hero | Self::Npc => LayerKind::Life,
            Self::Floor => LayerKind::Floor,
            Self::Wall | Self::Door | Self::Chest => LayerKind::Block,
            Self::Item => LayerKind::Item,
        }
    }
}

/// Identity of one of the world's spatial layers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LayerKind {
    /// Ground tiles.
    Floor,
    /// Walls, doors and chests.
    Block,
    /// Collectable items.
    Item,
    /// Hero and non-player characters.
    Life,
    /// Index of every movement-blocking actor regardless of category.
    Collision,
}

impl LayerKind {
    /// Category layers that hold renderable actors, bottom to top.
    pub const RENDERABLE: [LayerKind; 4] = [Self::Floor, Self::Block, Self::Item, Self::Life];
}

/// Brightness applied to an actor, ordered from darkest to brightest.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum LightTint {
    /// Never seen.
    #[default]
    Shroud,
    /// Seen before but not currently lit.
    Fog,
    /// Lit at the far edge of a light source's range.
    Visible6,
    /// Lit between 90% and 95% of a light source's range.
    Visible5,
    /// Lit between 85% and 90% of a light source's range.
    Visible4,
    /// Lit between 80% and 85% of a light source's range.
    Visible3,
    /// Lit between 75% and 80% of a light source's range.
    Visible2,
    /// Lit within 75% of a light source's range.
    Visible1,
}

impl LightTint {
    /// Maps a distance-to-range ratio onto one of the six lit tiers.
    ///
    /// A ratio sitting exactly on a tier boundary takes the brighter tier.
    #[must_use]
    pub fn for_distance_ratio(ratio: f64) -> Self {
        if ratio <= 0.75 {
            Self::Visible1
        } else if ratio <= 0.80 {
            Self::Visible2
        } else if ratio <= 0.85 {
            Self::Visible3
        } else if ratio <= 0.90 {
            Self::Visible4
        } else if ratio <= 0.95 {
            Self::Visible5
        } else {
            Self::Visible6
        }
    }

    /// Reports whether the tint comes from an active light source.
    #[must_use]
    pub const fn is_lit(self) -> bool {
        !matches!(self, Self::Shroud | Self::Fog)
    }
}

/// Result of a lighting pass: the brightest tint each lit actor received.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Illumination {
    tints: BTreeMap<ActorId, LightTint>,
}

impl Illumination {
    /// Creates an empty illumination.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Merges a tint for the actor, keeping the brighter of the stored and provided tints.
    pub fn brighten(&mut self, actor: ActorId, tint: LightTint) {
        let entry = self.tints.entry(actor).or_insert(tint);
        if *entry < tint {
            *entry = tint;
        }
    }

    /// Brightest tint recorded for the actor, if it was lit at all.
    #[must_use]
    pub fn tint_for(&self, actor: ActorId) -> Option<LightTint> {
        self.tints.get(&actor).copied()
    }

    /// Reports whether the actor was lit.
    #[must_use]
    pub fn contains(&self, actor: ActorId) -> bool {
        self.tints.contains_key(&actor)
    }

    /// Iterates lit actors in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = (ActorId, LightTint)> + '_ {
        self.tints.iter().map(|(actor, tint)| (*actor, *tint))
    }

    /// Number of lit actors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tints.len()
    }

    /// Reports whether no actor was lit.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tints.is_empty()
    }
}

/// Full description of an actor before the world admits it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorBlueprint {
    /// Display name used in the combat log.
    pub name: String,
    /// Fixed category of the actor.
    pub category: Category,
    /// Cell the actor occupies.
    pub position: Position,
    /// Whether the actor obstructs movement and joins the collision layer.
    pub blocks_movement: bool,
    /// Whether the actor stops light rays past its cell.
    pub blocks_light: bool,
    /// Starting hitpoints; zero for inanimate actors.
    pub hitpoints: i32,
    /// Melee damage dealt per blow; zero for inanimate actors.
    pub damage: i32,
    /// Radius of emitted light in cells; zero when the actor is not a light source.
    pub light_range: u32,
    /// Whether the light is cast even before the source has been revealed.
    pub light_always_visible: bool,
    /// Whether the actor disappears once it leaves the light, even after being revealed.
    pub hidden_under_fog: bool,
    /// Gold carried (items) or held in the purse (hero).
    pub gold: u32,
    /// Item stored inside a chest.
    pub contents: Option<String>,
}

impl ActorBlueprint {
    /// Creates an inert blueprint with every flag cleared.
    #[must_use]
    pub fn new(name: impl Into<String>, category: Category, position: Position) -> Self {
        Self {
            name: name.into(),
            category,
            position,
            blocks_movement: false,
            blocks_light: false,
            hitpoints: 0,
            damage: 0,
            light_range: 0,
            light_always_visible: false,
            hidden_under_fog: false,
            gold: 0,
            contents: None,
        }
    }
}

/// Immutable representation of a single actor's presentation state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorSnapshot {
    /// Identifier assigned to the actor.
    pub id: ActorId,
    /// Display name of the actor.
    pub name: String,
    /// Fixed category of the actor.
    pub category: Category,
    /// Cell currently occupied by the actor.
    pub position: Position,
    /// Whether the actor should be drawn this turn.
    pub visible: bool,
    /// Whether the actor has ever been lit.
    pub revealed: bool,
    /// Brightness applied when drawing the actor.
    pub tint: LightTint,
}

/// Read-only snapshot describing every actor in the world.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ActorView {
    snapshots: Vec<ActorSnapshot>,
}

impl ActorView {
    /// Creates a new actor view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<ActorSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured snapshots in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = &ActorSnapshot> {
        self.snapshots.iter()
    }

    /// Looks up the snapshot captured for the provided actor.
    #[must_use]
    pub fn get(&self, actor: ActorId) -> Option<&ActorSnapshot> {
        self.snapshots
            .binary_search_by_key(&actor, |snapshot| snapshot.id)
            .ok()
            .map(|index| &self.snapshots[index])
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<ActorSnapshot> {
        self.snapshots
    }
}

/// Hero statistics exposed to the HUD.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeroSnapshot {
    /// Identifier assigned to the hero.
    pub id: ActorId,
    /// Cell currently occupied by the hero.
    pub position: Position,
    /// Remaining hitpoints.
    pub hitpoints: i32,
    /// Melee damage dealt per blow.
    pub damage: i32,
    /// Gold carried in the purse.
    pub gold: u32,
    /// Names of the items found in chests, in pickup order.
    pub items: Vec<String>,
}

/// Position of a non-player character at the start of the NPC phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NpcSnapshot {
    /// Identifier assigned to the character.
    pub id: ActorId,
    /// Cell occupied by the character.
    pub position: Position,
}

/// Light source considered by the lighting pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LightSource {
    /// Identifier of the emitting actor.
    pub id: ActorId,
    /// Cell the light radiates from.
    pub position: Position,
    /// Radius of the light measured in cells.
    pub range: u32,
    /// Whether the source may cast light before any other source reveals it.
    pub eligible: bool,
}

/// Actor occupying a cell that a light ray passes through.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LightOccupant {
    /// Identifier of the occupying actor.
    pub id: ActorId,
    /// Whether the actor stops the ray past its cell.
    pub blocks_light: bool,
}

#[cfg(test)]
mod tests {
    use super::{
        ActorId, ActorSnapshot, Category, Direction, Illumination, LayerKind, LightTint, Position,
        Region,
    };

    #[test]
    fn offset_follows_screen_axes() {
        let origin = Position::new(5, 5);
        assert_eq!(origin.offset(Direction::North), Position::new(5, 4));
        assert_eq!(origin.offset(Direction::South), Position::new(5, 6));
        assert_eq!(origin.offset(Direction::East), Position::new(6, 5));
        assert_eq!(origin.offset(Direction::West), Position::new(4, 5));
    }

    #[test]
    fn distance_is_euclidean() {
        let origin = Position::new(1, 1);
        let destination = Position::new(4, 5);
        assert!((origin.distance(destination) - 5.0).abs() < f64::EPSILON);
        assert_eq!(origin.manhattan_distance(destination), 7);
    }

    #[test]
    fn every_category_maps_to_a_renderable_layer() {
        let categories = [
            Category::Hero,
            Category::Npc,
            Category::Floor,
            Category::Wall,
            Category::Door,
            Category::Chest,
            Category::Item,
        ];
        for category in categories {
            let layer = category.layer();
            assert!(LayerKind::RENDERABLE.contains(&layer));
            assert_ne!(layer, LayerKind::Collision);
        }
        assert_eq!(Category::Door.layer(), LayerKind::Block);
        assert_eq!(Category::Npc.layer(), LayerKind::Life);
    }

    #[test]
    fn tiers_take_brighter_level_on_boundaries() {
        assert_eq!(LightTint::for_distance_ratio(0.0), LightTint::Visible1);
        assert_eq!(LightTint::for_distance_ratio(0.75), LightTint::Visible1);
        assert_eq!(LightTint::for_distance_ratio(0.76), LightTint::Visible2);
        assert_eq!(LightTint::for_distance_ratio(0.8), LightTint::Visible2);
        assert_eq!(LightTint::for_distance_ratio(0.9), LightTint::Visible4);
        assert_eq!(LightTint::for_distance_ratio(0.95), LightTint::Visible5);
        assert_eq!(LightTint::for_distance_ratio(1.0), LightTint::Visible6);
    }

    #[test]
    fn tints_are_ordered_by_brightness() {
        assert!(LightTint::Shroud < LightTint::Fog);
        assert!(LightTint::Fog < LightTint::Visible6);
        assert!(LightTint::Visible6 < LightTint::Visible1);
        assert!(!LightTint::Fog.is_lit());
        assert!(LightTint::Visible6.is_lit());
    }

    #[test]
    fn illumination_keeps_brightest_tint_in_any_order() {
        let actor = ActorId::new(3);
        let mut forward = Illumination::new();
        forward.brighten(actor, LightTint::Visible4);
        forward.brighten(actor, LightTint::Visible1);

        let mut backward = Illumination::new();
        backward.brighten(actor, LightTint::Visible1);
        backward.brighten(actor, LightTint::Visible4);

        assert_eq!(forward, backward);
        assert_eq!(forward.tint_for(actor), Some(LightTint::Visible1));
    }

    #[test]
    fn region_contains_only_inner_cells() {
        let region = Region::new(Position::new(2, 3), 4, 2);
        assert!(region.contains(Position::new(2, 3)));
        assert!(region.contains(Position::new(5, 4)));
        assert!(!region.contains(Position::new(6, 4)));
        assert!(!region.contains(Position::new(1, 3)));
        assert!(!region.contains(Position::new(2, 5)));
    }

    #[test]
    fn actor_snapshot_round_trips_through_bincode() {
        let snapshot = ActorSnapshot {
            id: ActorId::new(9),
            name: "Monster".to_owned(),
            category: Category::Npc,
            position: Position::new(-1, 7),
            visible: true,
            revealed: true,
            tint: LightTint::Visible3,
        };
        let bytes = bincode::serialize(&snapshot).expect("serialize");
        let restored: ActorSnapshot = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(restored, snapshot);
    }
}
