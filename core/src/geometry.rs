//! Integer grid geometry used by the lighting pass.

use crate::Position;

/// Cells crossed by the straight line between two positions.
///
/// Uses Bresenham's algorithm. Both endpoints are included and the cells are
/// ordered from `from` outward, so callers can walk a ray and stop at the first
/// obstruction.
#[must_use]
pub fn line(from: Position, to: Position) -> Vec<Position> {
    let dx = (to.x() - from.x()).abs();
    let dy = -(to.y() - from.y()).abs();
    let step_x = if from.x() < to.x() { 1 } else { -1 };
    let step_y = if from.y() < to.y() { 1 } else { -1 };

    let length = usize::try_from(dx.max(-dy)).unwrap_or(0);
    let mut points = Vec::with_capacity(length + 1);
    let mut error = dx + dy;
    let (mut x, mut y) = (from.x(), from.y());

    loop {
        points.push(Position::new(x, y));
        if x == to.x() && y == to.y() {
            break;
        }

        let doubled = 2 * error;
        if doubled >= dy {
            error += dy;
            x += step_x;
        }
        if doubled <= dx {
            error += dx;
            y += step_y;
        }
    }

    points
}

/// Cells forming a ring of the given thickness whose outer edge is `radius`.
///
/// A cell belongs to the ring when its squared distance `d2` from `center`
/// satisfies `inner^2 < d2 <= radius^2` with `inner = radius - thickness`
/// (saturating at zero). Cells are produced in row-major order. A zero radius
/// yields an empty ring.
#[must_use]
pub fn annulus(center: Position, radius: u32, thickness: u32) -> Vec<Position> {
    if radius == 0 {
        return Vec::new();
    }

    let outer = i64::from(radius);
    let inner = i64::from(radius.saturating_sub(thickness));
    let outer_squared = outer * outer;
    let inner_squared = inner * inner;
    let reach = i32::try_from(radius).unwrap_or(i32::MAX);

    let mut points = Vec::new();
    for dy in -reach..=reach {
        for dx in -reach..=reach {
            let squared = i64::from(dx).pow(2) + i64::from(dy).pow(2);
            if squared > inner_squared && squared <= outer_squared {
                points.push(Position::new(
                    center.x().saturating_add(dx),
                    center.y().saturating_add(dy),
                ));
            }
        }
    }

    points
}
