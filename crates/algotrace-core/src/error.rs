//! Core error types for algotrace-core.
//!
//! Uses `thiserror` for structured, matchable error variants covering the
//! failure modes of the data model: malformed grid layouts, out-of-grid
//! coordinates, unknown algorithm names and traces whose step sequence does
//! not hold together.

use thiserror::Error;

use crate::grid::Cell;

/// Core errors produced by the algotrace-core crate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// A grid layout could not be parsed or violates its shape rules.
    #[error("malformed grid: {reason}")]
    MalformedGrid { reason: String },

    /// A coordinate lies outside the grid.
    #[error("cell {cell} is outside a {width}x{height} grid")]
    OutOfBounds {
        cell: Cell,
        width: usize,
        height: usize,
    },

    /// The algorithm name does not match any supported kind.
    #[error("unknown algorithm: '{name}'")]
    UnknownAlgorithm { name: String },

    /// A step's sequence index does not match its position in the trace.
    #[error("broken step sequence: expected index {expected}, found {found}")]
    BrokenSequence { expected: usize, found: usize },

    /// A solution refers to a step that is missing or is not a solution step.
    #[error("solution {solution} points at step {step}, which is not a solutionFound step")]
    DanglingSolution { solution: usize, step: usize },

    /// Solutions are not listed in the order their steps were recorded.
    #[error("solution {solution} at step {step} does not follow the previous solution")]
    UnorderedSolutions { solution: usize, step: usize },
}
