//! Mutable record describing one occupant of the world.

use lantern_crawl_core::{ActorBlueprint, ActorId, Category, LightTint, Position};

/// Belongings carried by the hero.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Inventory {
    gold: u32,
    items: Vec<String>,
}

impl Inventory {
    /// Gold carried in the purse.
    #[must_use]
    pub const fn gold(&self) -> u32 {
        self.gold
    }

    /// Names of the items carried, in pickup order.
    #[must_use]
    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub(crate) fn add_gold(&mut self, amount: u32) {
        self.gold = self.gold.saturating_add(amount);
    }

    pub(crate) fn add_item(&mut self, item: String) {
        self.items.push(item);
    }
}

/// Authoritative state of a single actor.
///
/// The category is fixed at creation. Layer membership and position are kept
/// in step by the world; collaborators only ever see shared references.
#[derive(Clone, Debug)]
pub struct Actor {
    id: ActorId,
    name: String,
    category: Category,
    position: Position,
    blocks_movement: bool,
    blocks_light: bool,
    hitpoints: i32,
    damage: i32,
    light_range: u32,
    light_always_visible: bool,
    hidden_under_fog: bool,
    revealed: bool,
    visible: bool,
    tint: LightTint,
    in_render_bounds: bool,
    door_open: bool,
    chest_open: bool,
    contents: Option<String>,
    inventory: Inventory,
}

impl Actor {
    pub(crate) fn from_blueprint(id: ActorId, blueprint: ActorBlueprint) -> Self {
        Self {
            id,
            name: blueprint.name,
            category: blueprint.category,
            position: blueprint.position,
            blocks_movement: blueprint.blocks_movement,
            blocks_light: blueprint.blocks_light,
            hitpoints: blueprint.hitpoints,
            damage: blueprint.damage,
            light_range: blueprint.light_range,
            light_always_visible: blueprint.light_always_visible,
            hidden_under_fog: blueprint.hidden_under_fog,
            revealed: false,
            visible: !blueprint.hidden_under_fog,
            tint: LightTint::Shroud,
            in_render_bounds: true,
            door_open: false,
            chest_open: false,
            contents: blueprint.contents,
            inventory: Inventory {
                gold: blueprint.gold,
                items: Vec::new(),
            },
        }
    }

    /// Identifier assigned by the world.
    #[must_use]
    pub const fn id(&self) -> ActorId {
        self.id
    }

    /// Display name of the actor.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fixed category of the actor.
    #[must_use]
    pub const fn category(&self) -> Category {
        self.category
    }

    /// Cell currently occupied by the actor.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Whether the actor obstructs movement.
    #[must_use]
    pub const fn blocks_movement(&self) -> bool {
        self.blocks_movement
    }

    /// Whether the actor stops light rays past its cell.
    #[must_use]
    pub const fn blocks_light(&self) -> bool {
        self.blocks_light
    }

    /// Remaining hitpoints.
    #[must_use]
    pub const fn hitpoints(&self) -> i32 {
        self.hitpoints
    }

    /// Melee damage dealt per blow.
    #[must_use]
    pub const fn damage(&self) -> i32 {
        self.damage
    }

    /// Radius of emitted light; zero when the actor is not a light source.
    #[must_use]
    pub const fn light_range(&self) -> u32 {
        self.light_range
    }

    /// Whether the light is cast before the source has been revealed.
    #[must_use]
    pub const fn light_always_visible(&self) -> bool {
        self.light_always_visible
    }

    /// Whether the actor vanishes once it leaves the light.
    #[must_use]
    pub const fn hidden_under_fog(&self) -> bool {
        self.hidden_under_fog
    }

    /// Whether the actor has ever been lit.
    #[must_use]
    pub const fn revealed(&self) -> bool {
        self.revealed
    }

    /// Whether the actor should be drawn this turn.
    #[must_use]
    pub const fn visible(&self) -> bool {
        self.visible
    }

    /// Brightness applied when drawing the actor.
    #[must_use]
    pub const fn tint(&self) -> LightTint {
        self.tint
    }

    /// Whether the actor lies inside the presentation viewport.
    #[must_use]
    pub const fn in_render_bounds(&self) -> bool {
        self.in_render_bounds
    }

    /// Whether a door has been opened.
    #[must_use]
    pub const fn is_door_open(&self) -> bool {
        self.door_open
    }

    /// Whether a chest has been opened.
    #[must_use]
    pub const fn is_chest_open(&self) -> bool {
        self.chest_open
    }

    /// Gold carried by the actor (purse for the hero, pile size for items).
    #[must_use]
    pub const fn gold(&self) -> u32 {
        self.inventory.gold()
    }

    /// Belongings carried by the actor.
    #[must_use]
    pub const fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    /// Reports whether the actor's hitpoints have run out.
    #[must_use]
    pub const fn is_dead(&self) -> bool {
        self.hitpoints <= 0
    }

    pub(crate) fn set_position(&mut self, position: Position) {
        self.position = position;
    }

    pub(crate) fn inflict_damage(&mut self, amount: i32) {
        self.hitpoints = self.hitpoints.saturating_sub(amount);
    }

    pub(crate) fn open_door(&mut self) {
        self.door_open = true;
    }

    pub(crate) fn open_chest(&mut self) -> Option<String> {
        self.chest_open = true;
        self.contents.take()
    }

    pub(crate) fn inventory_mut(&mut self) -> &mut Inventory {
        &mut self.inventory
    }

    pub(crate) fn set_in_render_bounds(&mut self, in_bounds: bool) {
        self.in_render_bounds = in_bounds;
    }

    pub(crate) fn fade(&mut self) {
        self.visible = !self.hidden_under_fog;
        self.tint = if self.revealed {
            LightTint::Fog
        } else {
            LightTint::Shroud
        };
    }

    pub(crate) fn illuminate(&mut self, tint: LightTint) {
        self.visible = true;
        self.revealed = true;
        if self.tint < tint {
            self.tint = tint;
        }
    }
}
