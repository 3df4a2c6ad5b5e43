//! Recorded execution events.
//!
//! A [`Step`] is one atomic event emitted while an instrumented algorithm
//! runs. The [`Payload`] carries whatever a renderer needs to draw that
//! moment: the call stack, the partial board, the compared characters.

use serde::{Deserialize, Serialize};

use crate::grid::Cell;

/// The kind of event a step records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StepKind {
    /// Entry into a recursive frame.
    Call,
    /// Exit from a recursive frame.
    Return,
    /// A candidate was committed (queen placed, cell added to the path).
    Place,
    /// A committed candidate was undone.
    Remove,
    /// A candidate was inspected.
    Compare,
    /// A candidate or a whole branch was rejected.
    Backtrack,
    /// A terminal success state was reached.
    SolutionFound,
}

/// Algorithm-specific data attached to a step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Payload {
    None,
    /// Call-stack snapshot after a call or before a return, innermost frame
    /// last. `value` is set on returns that produce one.
    Frame {
        stack: Vec<String>,
        value: Option<String>,
    },
    /// Queen column for each placed row, in row order.
    Board { queens: Vec<usize> },
    /// Two characters being compared, with their positions in the input.
    Compare {
        left: char,
        right: char,
        left_index: usize,
        right_index: usize,
    },
    /// A path through a grid, start first.
    Path { cells: Vec<Cell> },
    Text { value: String },
    Number { value: u64 },
}

/// One event in a trace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    /// Position of this step in its trace; equals its index.
    pub sequence_index: usize,
    pub kind: StepKind,
    /// Board or grid cell the step is about, when there is one.
    pub position: Option<Cell>,
    /// Recursion depth of the emitting frame; the root frame is 0.
    pub depth: usize,
    pub payload: Payload,
}
