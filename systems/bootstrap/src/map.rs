//! ASCII tile maps.

use lantern_crawl_core::{ActorBlueprint, Position};

use crate::{Archetype, GameConfig};

/// Stock 60 x 30 dungeon used when no map file is supplied.
pub const DEFAULT_MAP: &str = concat!(
    "############################################################\n",
    "#               #        #   #                             #\n",
    "#   p      e    #        #   #                             #\n",
    "#               #            d                             #\n",
    "#      #        #    c       #                             #\n",
    "#      #        #            #                             #\n",
    "# #  # #        #        # e #       t         t           #\n",
    "# #    #        #        #   #                             #\n",
    "# #    #        #    ######d##                             #\n",
    "#      #   t    d      c     #                             #\n",
    "#      #        d            #                             #\n",
    "#      ##########         ####                             #\n",
    "#      ##########     g      #                             #\n",
    "#          d         ggg     d                             #\n",
    "# e    ##########     g      d                             #\n",
    "#      ##########            #                             #\n",
    "#      ###############       #                             #\n",
    "#                            #                             #\n",
    "#   c   #    #      #        #                             #\n",
    "#                            #                             #\n",
    "#########d########  e        #                             #\n",
    "######### ########           #                             #\n",
    "#  ggggg  ########      t    #                             #\n",
    "# ################          ##                             #\n",
    "# ##############           ###                             #\n",
    "# #############           ####                             #\n",
    "# gg  ########    c     ######                             #\n",
    "#####d########        ########                             #\n",
    "#  e                 #########                             #\n",
    "############################################################\n",
);

/// Failure raised while reading an ASCII map.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MapError {
    /// The map contained no tiles.
    #[error("map contains no tiles")]
    Empty,
    /// A row's width differed from the first row's.
    #[error("row {row} is {found} tiles wide, expected {expected}")]
    RaggedRow {
        /// Zero-based index of the offending row.
        row: usize,
        /// Width of the first row.
        expected: usize,
        /// Width of the offending row.
        found: usize,
    },
    /// A tile used a symbol with no archetype.
    #[error("unknown tile symbol {symbol:?} at {position:?}")]
    UnknownSymbol {
        /// Offending symbol.
        symbol: char,
        /// Cell holding the symbol.
        position: Position,
    },
    /// The map did not place exactly one hero.
    #[error("map must place exactly one hero, found {found}")]
    HeroCount {
        /// Number of hero tiles encountered.
        found: usize,
    },
    /// The map is too large to address.
    #[error("map dimensions exceed the addressable grid")]
    TooLarge,
}

/// Fully expanded map ready to populate a world.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MapBlueprint {
    width: u32,
    height: u32,
    actors: Vec<ActorBlueprint>,
}

impl MapBlueprint {
    /// Width of the map in cells.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height of the map in cells.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Actor blueprints in spawn order.
    #[must_use]
    pub fn actors(&self) -> &[ActorBlueprint] {
        &self.actors
    }

    /// Consumes the map, yielding its dimensions and actor blueprints.
    #[must_use]
    pub fn into_parts(self) -> (u32, u32, Vec<ActorBlueprint>) {
        (self.width, self.height, self.actors)
    }
}

/// Expands an ASCII map into actor blueprints.
///
/// Tiles are read row by row; every tile yields its archetype (if any) followed
/// by the floor beneath it. Trailing blank lines are ignored.
pub fn parse_map(source: &str, config: &GameConfig) -> Result<MapBlueprint, MapError> {
    let mut rows: Vec<&str> = source.lines().collect();
    while rows.last().is_some_and(|row| row.is_empty()) {
        let _ = rows.pop();
    }

    let expected = rows.first().map_or(0, |row| row.chars().count());
    if expected == 0 {
        return Err(MapError::Empty);
    }

    let width = u32::try_from(expected).map_err(|_| MapError::TooLarge)?;
    let height = u32::try_from(rows.len()).map_err(|_| MapError::TooLarge)?;
    let _ = i32::try_from(width.max(height)).map_err(|_| MapError::TooLarge)?;

    let mut actors = Vec::with_capacity(expected * rows.len() * 2);
    let mut heroes = 0;
    for (index, row) in rows.iter().enumerate() {
        let found = row.chars().count();
        if found != expected {
            return Err(MapError::RaggedRow {
                row: index,
                expected,
                found,
            });
        }

        let y = i32::try_from(index).map_err(|_| MapError::TooLarge)?;
        for (x, symbol) in (0_i32..).zip(row.chars()) {
            let position = Position::new(x, y);
            let archetype = Archetype::from_symbol(symbol)
                .ok_or(MapError::UnknownSymbol { symbol, position })?;
            if archetype == Archetype::Hero {
                heroes += 1;
            }
            if archetype != Archetype::Floor {
                actors.push(archetype.blueprint(position, config));
            }
            actors.push(Archetype::Floor.blueprint(position, config));
        }
    }

    if heroes != 1 {
        return Err(MapError::HeroCount { found: heroes });
    }

    Ok(MapBlueprint {
        width,
        height,
        actors,
    })
}
