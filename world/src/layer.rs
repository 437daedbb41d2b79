//! Single-occupancy spatial index backing each world layer.

use lantern_crawl_core::{ActorId, LayerKind, Position};

use crate::LayerError;

/// Dense grid mapping each cell to at most one actor.
///
/// The layer never overwrites an occupant: every mutation validates its
/// preconditions first and reports a [`LayerError`] without touching the grid
/// when they do not hold. Keeping several layers consistent with each other is
/// the world's job, not the layer's.
#[derive(Clone, Debug)]
pub struct CellLayer {
    kind: LayerKind,
    width: u32,
    height: u32,
    cells: Vec<Option<ActorId>>,
    population: usize,
}

impl CellLayer {
    /// Creates an empty layer covering `width` x `height` cells.
    #[must_use]
    pub fn new(kind: LayerKind, width: u32, height: u32) -> Self {
        let capacity_u64 = u64::from(width) * u64::from(height);
        let capacity = usize::try_from(capacity_u64).unwrap_or(0);
        Self {
            kind,
            width,
            height,
            cells: vec![None; capacity],
            population: 0,
        }
    }

    /// Identity of the layer.
    #[must_use]
    pub const fn kind(&self) -> LayerKind {
        self.kind
    }

    /// Width and height of the layer in cells.
    #[must_use]
    pub const fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Number of actors currently registered.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.population
    }

    /// Reports whether no actor is registered.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.population == 0
    }

    /// Returns the actor occupying the cell, if any.
    ///
    /// Cells outside the layer report no occupant.
    #[must_use]
    pub fn actor_at(&self, position: Position) -> Option<ActorId> {
        self.index(position)
            .and_then(|index| self.cells.get(index).copied().flatten())
    }

    /// Registers the actor at an empty cell.
    pub fn add_actor(&mut self, actor: ActorId, position: Position) -> Result<(), LayerError> {
        let index = self.vacant_index(position)?;
        self.cells[index] = Some(actor);
        self.population += 1;
        Ok(())
    }

    /// Moves a registered actor from `from` to the empty cell `to`.
    pub fn move_actor(
        &mut self,
        actor: ActorId,
        from: Position,
        to: Position,
    ) -> Result<(), LayerError> {
        let origin = self.registered_index(actor, from)?;
        let destination = self.vacant_index(to)?;
        self.cells[origin] = None;
        self.cells[destination] = Some(actor);
        Ok(())
    }

    /// Clears the cell holding the actor.
    pub fn remove_actor(&mut self, actor: ActorId, position: Position) -> Result<(), LayerError> {
        let index = self.registered_index(actor, position)?;
        self.cells[index] = None;
        self.population -= 1;
        Ok(())
    }

    /// Iterates every registered actor in row-major cell order.
    pub fn actors(&self) -> impl Iterator<Item = ActorId> + '_ {
        self.cells.iter().filter_map(|cell| *cell)
    }

    /// Verifies that `add_actor` at the cell would succeed.
    pub fn ensure_vacant(&self, position: Position) -> Result<(), LayerError> {
        self.vacant_index(position).map(|_| ())
    }

    /// Verifies that the actor is registered at the cell.
    pub fn ensure_registered(&self, actor: ActorId, position: Position) -> Result<(), LayerError> {
        self.registered_index(actor, position).map(|_| ())
    }

    fn vacant_index(&self, position: Position) -> Result<usize, LayerError> {
        let index = self.index(position).ok_or(LayerError::OutOfBounds {
            layer: self.kind,
            position,
        })?;
        match self.cells[index] {
            None => Ok(index),
            Some(occupant) => Err(LayerError::Occupied {
                layer: self.kind,
                position,
                occupant,
            }),
        }
    }

    fn registered_index(&self, actor: ActorId, position: Position) -> Result<usize, LayerError> {
        let not_registered = LayerError::NotRegistered {
            layer: self.kind,
            actor,
            position,
        };
        let index = self.index(position).ok_or(not_registered.clone())?;
        if self.cells[index] == Some(actor) {
            Ok(index)
        } else {
            Err(not_registered)
        }
    }

    fn index(&self, position: Position) -> Option<usize> {
        let column = u32::try_from(position.x()).ok()?;
        let row = u32::try_from(position.y()).ok()?;
        if column < self.width && row < self.height {
            let row = usize::try_from(row).ok()?;
            let column = usize::try_from(column).ok()?;
            let width = usize::try_from(self.width).ok()?;
            Some(row * width + column)
        } else {
            None
        }
    }
}
