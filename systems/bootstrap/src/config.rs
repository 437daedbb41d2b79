//! Tunable archetype statistics loaded from TOML.

use std::{fs, io, path::{Path, PathBuf}};

use serde::{Deserialize, Serialize};

/// Failure raised while loading a [`GameConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config at {}", .path.display())]
    Read {
        /// Location of the unreadable file.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// The configuration contents were not valid TOML for the expected shape.
    #[error("failed to parse config toml")]
    Parse(#[from] toml::de::Error),
}

/// Every tunable value of a game session.
///
/// Missing tables and keys fall back to the stock values, so an empty
/// document yields [`GameConfig::default`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    /// Statistics of the player-controlled hero.
    pub hero: HeroConfig,
    /// Statistics of the monsters roaming the dungeon.
    pub monster: MonsterConfig,
    /// Light cast by wall-mounted torches.
    pub torch: TorchConfig,
    /// Size of the gold piles.
    pub gold: GoldConfig,
    /// Contents of the chests.
    pub chest: ChestConfig,
    /// Parameters of the lighting pass.
    pub lighting: LightingConfig,
}

impl GameConfig {
    /// Parses a configuration from TOML text.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Reads and parses the configuration file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }
}

/// Statistics of the hero.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HeroConfig {
    /// Starting hitpoints.
    pub hitpoints: i32,
    /// Damage dealt per blow.
    pub damage: i32,
    /// Radius of the hero's own light.
    pub light_range: u32,
}

impl Default for HeroConfig {
    fn default() -> Self {
        Self {
            hitpoints: 25,
            damage: 3,
            light_range: 10,
        }
    }
}

/// Statistics of a monster.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MonsterConfig {
    /// Starting hitpoints.
    pub hitpoints: i32,
    /// Damage dealt per blow.
    pub damage: i32,
}

impl Default for MonsterConfig {
    fn default() -> Self {
        Self {
            hitpoints: 5,
            damage: 2,
        }
    }
}

/// Light cast by a torch.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TorchConfig {
    /// Radius of the torch light.
    pub light_range: u32,
    /// Whether the torch shines before anyone has seen it.
    pub always_visible: bool,
}

impl Default for TorchConfig {
    fn default() -> Self {
        Self {
            light_range: 3,
            always_visible: false,
        }
    }
}

/// Size of a gold pile.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GoldConfig {
    /// Gold added to the purse when the pile is collected.
    pub amount: u32,
}

impl Default for GoldConfig {
    fn default() -> Self {
        Self { amount: 5 }
    }
}

/// Contents of a chest.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChestConfig {
    /// Name of the item every chest holds.
    pub item: String,
}

impl Default for ChestConfig {
    fn default() -> Self {
        Self {
            item: "Trinket".to_owned(),
        }
    }
}

/// Parameters of the lighting pass.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LightingConfig {
    /// Width of the band of target cells rays are cast towards.
    pub annulus_thickness: u32,
}

impl Default for LightingConfig {
    fn default() -> Self {
        Self {
            annulus_thickness: 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_stock_values() {
        let config = GameConfig::from_toml_str("").expect("empty config parses");
        assert_eq!(config, GameConfig::default());
        assert_eq!(config.hero.hitpoints, 25);
        assert_eq!(config.lighting.annulus_thickness, 3);
    }

    #[test]
    fn partial_tables_keep_remaining_defaults() {
        let config = GameConfig::from_toml_str(
            r#"
                [hero]
                damage = 7

                [chest]
                item = "Silver Key"
            "#,
        )
        .expect("config parses");

        assert_eq!(config.hero.damage, 7);
        assert_eq!(config.hero.hitpoints, 25);
        assert_eq!(config.hero.light_range, 10);
        assert_eq!(config.chest.item, "Silver Key");
        assert_eq!(config.monster, MonsterConfig::default());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let error = GameConfig::from_toml_str("[hero]\nmana = 4\n").expect_err("unknown key");
        assert!(matches!(error, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_reports_its_path() {
        let error = GameConfig::load("/definitely/not/here.toml").expect_err("missing file");
        match error {
            ConfigError::Read { path, .. } => {
                assert_eq!(path, PathBuf::from("/definitely/not/here.toml"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
