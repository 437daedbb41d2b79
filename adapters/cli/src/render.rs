//! Plain-text frames for terminal output.

use std::fmt::Write as _;

use lantern_crawl_core::{ActorSnapshot, Category, LayerKind, LightTint, TurnPhase};
use lantern_crawl_world::{query, World};

/// Renders the grid followed by a one-line HUD.
///
/// Only actors that are visible and have been seen at least once are drawn;
/// where several share a cell the creature wins over items, items over blocks
/// and blocks over the floor.
pub(crate) fn frame(world: &World, phase: TurnPhase) -> String {
    let (width, height) = query::dimensions(world);
    let columns = usize::try_from(width).unwrap_or(0);
    let rows = usize::try_from(height).unwrap_or(0);
    let mut cells: Vec<Option<(u8, char)>> = vec![None; columns * rows];

    for snapshot in query::actor_view(world).iter() {
        if !snapshot.visible || snapshot.tint == LightTint::Shroud {
            continue;
        }
        let (Ok(x), Ok(y)) = (
            usize::try_from(snapshot.position.x()),
            usize::try_from(snapshot.position.y()),
        ) else {
            continue;
        };
        if x >= columns || y >= rows {
            continue;
        }

        let rank = draw_rank(snapshot.category.layer());
        let cell = &mut cells[y * columns + x];
        if cell.map_or(true, |(existing, _)| existing <= rank) {
            *cell = Some((rank, glyph(snapshot)));
        }
    }

    let mut output = String::with_capacity((columns + 1) * rows + 64);
    for row in cells.chunks(columns.max(1)) {
        output.extend(row.iter().map(|cell| cell.map_or(' ', |(_, symbol)| symbol)));
        output.push('\n');
    }

    match query::hero(world) {
        Some(hero) => {
            let _ = write!(
                output,
                "HP {}  DMG {}  GOLD {}",
                hero.hitpoints, hero.damage, hero.gold
            );
            if !hero.items.is_empty() {
                let _ = write!(output, "  ITEMS {}", hero.items.join(", "));
            }
        }
        None => output.push_str("The hero has fallen."),
    }
    let _ = writeln!(output, "  [{phase:?}]");
    output
}

const fn draw_rank(layer: LayerKind) -> u8 {
    match layer {
        LayerKind::Floor | LayerKind::Collision => 0,
        LayerKind::Block => 1,
        LayerKind::Item => 2,
        LayerKind::Life => 3,
    }
}

fn glyph(snapshot: &ActorSnapshot) -> char {
    match snapshot.category {
        Category::Hero => '@',
        Category::Npc => 'e',
        Category::Wall if snapshot.name == "Torch" => 't',
        Category::Wall => '#',
        Category::Door => 'd',
        Category::Chest => 'c',
        Category::Item => 'g',
        Category::Floor => '.',
    }
}
