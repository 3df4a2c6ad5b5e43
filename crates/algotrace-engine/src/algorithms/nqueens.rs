//! N-Queens by row-wise backtracking.
//!
//! Row `r` tries columns `0..n` in order; a queen is placed when no earlier
//! queen shares its column or a diagonal. Every complete board is recorded,
//! so the trace holds all solutions in discovery order.

use algotrace_core::{AlgorithmKind, Cell, InstanceId, Payload, StepKind};

use super::{input_id, SteppableAlgorithm};
use crate::error::RecordError;
use crate::recorder::Tracer;

#[derive(Debug, Clone)]
pub struct NQueens {
    size: usize,
}

impl NQueens {
    pub fn new(size: usize) -> Result<Self, RecordError> {
        if size == 0 {
            return Err(RecordError::InvalidInput {
                algorithm: AlgorithmKind::NqueensPlacer,
                reason: "board size must be at least 1".into(),
            });
        }
        Ok(NQueens { size })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    fn place(&self, tracer: &mut Tracer, row: usize, queens: &mut Vec<usize>) -> Result<(), RecordError> {
        tracer.enter(format!("place_queen(row={row})"), None)?;

        if row == self.size {
            tracer.solution(None, board(queens))?;
            tracer.leave(None, None)?;
            return Ok(());
        }

        for col in 0..self.size {
            let cell = Cell::new(row, col);
            tracer.emit(StepKind::Compare, Some(cell), board(queens))?;
            if !is_safe(queens, row, col) {
                tracer.emit(StepKind::Backtrack, Some(cell), board(queens))?;
                continue;
            }
            queens.push(col);
            tracer.emit(StepKind::Place, Some(cell), board(queens))?;
            self.place(tracer, row + 1, queens)?;
            queens.pop();
            tracer.emit(StepKind::Remove, Some(cell), board(queens))?;
        }

        tracer.leave(None, None)
    }
}

fn board(queens: &[usize]) -> Payload {
    Payload::Board {
        queens: queens.to_vec(),
    }
}

/// `queens[r]` is the column of the queen in row `r`, for every row above `row`.
fn is_safe(queens: &[usize], row: usize, col: usize) -> bool {
    queens.iter().enumerate().all(|(r, &c)| {
        c != col && row - r != col.abs_diff(c)
    })
}

impl SteppableAlgorithm for NQueens {
    fn kind(&self) -> AlgorithmKind {
        AlgorithmKind::NqueensPlacer
    }

    fn instance_id(&self) -> InstanceId {
        input_id(self.kind(), &self.size.to_string())
    }

    fn run(&self, tracer: &mut Tracer) -> Result<(), RecordError> {
        // Grows one row at a time; the depth and step limits bound it, not `size`.
        let mut queens = Vec::new();
        self.place(tracer, 0, &mut queens)
    }
}
