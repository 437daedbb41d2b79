#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that casts light from every eligible source and reports the
//! brightest tint each actor receives.
//!
//! Each source traces Bresenham rays from its own cell to every cell of an
//! annulus hugging its range. Every occupant on a ray is lit with a tint
//! derived from its distance to the source; a ray stops after the first cell
//! holding a light-blocking occupant, so walls light up but hide whatever lies
//! behind them. Overlapping light blends by keeping the brightest tint.

use lantern_crawl_core::{
    geometry, Command, Illumination, LightOccupant, LightSource, LightTint, Position,
};
use tracing::debug;

/// Width of the outer band of target cells rays are cast towards.
pub const DEFAULT_ANNULUS_THICKNESS: u32 = 3;

/// Lighting system that reuses scratch buffers between passes.
#[derive(Debug)]
pub struct Lighting {
    annulus_thickness: u32,
    occupants: Vec<LightOccupant>,
    cast: Vec<bool>,
}

impl Lighting {
    /// Creates a lighting system using the default annulus thickness.
    #[must_use]
    pub fn new() -> Self {
        Self::with_annulus_thickness(DEFAULT_ANNULUS_THICKNESS)
    }

    /// Creates a lighting system casting rays towards a band `thickness` cells wide.
    #[must_use]
    pub fn with_annulus_thickness(thickness: u32) -> Self {
        Self {
            annulus_thickness: thickness,
            occupants: Vec::new(),
            cast: Vec::new(),
        }
    }

    /// Width of the annulus rays are cast towards.
    #[must_use]
    pub const fn annulus_thickness(&self) -> u32 {
        self.annulus_thickness
    }

    /// Computes the illumination for a whole pass and queues it for the world.
    pub fn handle<F>(&mut self, sources: &[LightSource], occupants_at: F, out: &mut Vec<Command>)
    where
        F: FnMut(Position, &mut Vec<LightOccupant>),
    {
        let illumination = self.illuminate(sources, occupants_at);
        out.push(Command::ApplyIllumination { illumination });
    }

    /// Computes the brightest tint every reachable actor receives.
    ///
    /// `occupants_at` fills the buffer with the actors standing in a cell
    /// across the renderable layers. Sources that are not yet eligible start
    /// shining once any of their rays reach them, so the result does not
    /// depend on the order of `sources`.
    pub fn illuminate<F>(&mut self, sources: &[LightSource], mut occupants_at: F) -> Illumination
    where
        F: FnMut(Position, &mut Vec<LightOccupant>),
    {
        let mut illumination = Illumination::new();
        self.cast.clear();
        self.cast.resize(sources.len(), false);

        loop {
            let mut progressed = false;
            for (index, source) in sources.iter().enumerate() {
                if self.cast[index] || source.range == 0 {
                    continue;
                }
                if !source.eligible && !illumination.contains(source.id) {
                    continue;
                }

                self.cast[index] = true;
                progressed = true;
                self.cast_source(source, &mut occupants_at, &mut illumination);
            }
            if !progressed {
                break;
            }
        }

        debug!(
            sources = sources.len(),
            lit = illumination.len(),
            "computed illumination"
        );
        illumination
    }

    fn cast_source<F>(
        &mut self,
        source: &LightSource,
        occupants_at: &mut F,
        illumination: &mut Illumination,
    ) where
        F: FnMut(Position, &mut Vec<LightOccupant>),
    {
        let range = f64::from(source.range);
        for target in geometry::annulus(source.position, source.range, self.annulus_thickness) {
            for cell in geometry::line(source.position, target) {
                let tint = LightTint::for_distance_ratio(source.position.distance(cell) / range);
                occupants_at(cell, &mut self.occupants);

                let mut obstructed = false;
                for occupant in &self.occupants {
                    illumination.brighten(occupant.id, tint);
                    obstructed |= occupant.blocks_light;
                }
                if obstructed {
                    break;
                }
            }
        }
    }
}

impl Default for Lighting {
    fn default() -> Self {
        Self::new()
    }
}
