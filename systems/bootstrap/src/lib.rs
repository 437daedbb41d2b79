#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Bootstrap system that turns ASCII maps and configuration into a playable world.

mod archetype;
mod config;
mod map;

pub use archetype::Archetype;
pub use config::{
    ChestConfig, ConfigError, GameConfig, GoldConfig, HeroConfig, LightingConfig, MonsterConfig,
    TorchConfig,
};
pub use map::{parse_map, MapBlueprint, MapError, DEFAULT_MAP};

use lantern_crawl_world::{World, WorldError};
use tracing::info;

/// Failure raised while building a world from a map.
#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
    /// The map text was malformed.
    #[error("invalid map")]
    Map(#[from] MapError),
    /// The expanded map violated a layer invariant.
    #[error("map could not be placed into the world")]
    World(#[from] WorldError),
}

/// Builds worlds using a fixed configuration.
#[derive(Debug, Default)]
pub struct Bootstrap {
    config: GameConfig,
}

impl Bootstrap {
    /// Creates a bootstrap system using the provided configuration.
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        Self { config }
    }

    /// Configuration applied to every archetype.
    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Expands an ASCII map without placing it.
    pub fn blueprint(&self, source: &str) -> Result<MapBlueprint, MapError> {
        parse_map(source, &self.config)
    }

    /// Expands an ASCII map and populates a fresh world with it.
    pub fn build_world(&self, source: &str) -> Result<World, BootstrapError> {
        let (width, height, actors) = self.blueprint(source)?.into_parts();
        let count = actors.len();
        let world = World::populate(width, height, actors)?;
        info!(width, height, actors = count, "loaded map");
        Ok(world)
    }

    /// Populates a world with [`DEFAULT_MAP`].
    pub fn default_world(&self) -> Result<World, BootstrapError> {
        self.build_world(DEFAULT_MAP)
    }
}
