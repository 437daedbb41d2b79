//! Precondition violations reported by the world and its layers.

use lantern_crawl_core::{ActorId, LayerKind, Position};
use thiserror::Error;

/// Misuse of a single [`CellLayer`](crate::CellLayer).
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LayerError {
    /// The cell lies outside the layer.
    #[error("{position:?} lies outside the {layer:?} layer")]
    OutOfBounds {
        /// Layer that rejected the request.
        layer: LayerKind,
        /// Offending cell.
        position: Position,
    },
    /// The cell already holds an actor.
    #[error("{position:?} in the {layer:?} layer is already occupied by {occupant:?}")]
    Occupied {
        /// Layer that rejected the request.
        layer: LayerKind,
        /// Offending cell.
        position: Position,
        /// Actor currently registered at the cell.
        occupant: ActorId,
    },
    /// The actor is not registered at the cell.
    #[error("{actor:?} is not registered at {position:?} in the {layer:?} layer")]
    NotRegistered {
        /// Layer that rejected the request.
        layer: LayerKind,
        /// Actor named by the request.
        actor: ActorId,
        /// Cell named by the request.
        position: Position,
    },
}

/// Misuse of the [`World`](crate::World).
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum WorldError {
    /// A layer precondition did not hold; no layer was modified.
    #[error(transparent)]
    Layer(#[from] LayerError),
    /// The actor is not alive in the world.
    #[error("{0:?} is not present in the world")]
    UnknownActor(ActorId),
    /// A second hero was offered while one is already alive.
    #[error("a hero ({existing:?}) is already present in the world")]
    DuplicateHero {
        /// Hero that is already alive.
        existing: ActorId,
    },
}
