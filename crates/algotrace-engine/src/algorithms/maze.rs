//! Depth-first backtracking maze solver.
//!
//! Classic "walk until stuck, then back up" search from the start cell. A
//! cell is visited at most once, so the search is linear in the grid size.
//! Neighbours are tried in the grid's fixed order (up, right, down, left).
//! The first path that reaches the exit is the single solution.

use algotrace_core::{AlgorithmKind, Cell, GridInstance, InstanceId, Payload, StepKind};

use super::SteppableAlgorithm;
use crate::error::RecordError;
use crate::recorder::Tracer;

#[derive(Debug, Clone)]
pub struct MazeSolver {
    grid: GridInstance,
}

/// Mutable search state threaded through the recursion.
struct Search {
    path: Vec<Cell>,
    visited: Vec<bool>,
}

impl MazeSolver {
    pub fn new(grid: GridInstance) -> Self {
        MazeSolver { grid }
    }

    pub fn grid(&self) -> &GridInstance {
        &self.grid
    }

    fn solve(&self, tracer: &mut Tracer, cell: Cell, search: &mut Search) -> Result<bool, RecordError> {
        tracer.enter(format!("solve({}, {})", cell.row, cell.col), Some(cell))?;

        let idx = self.grid.index_of(cell).map_err(|e| RecordError::InvalidInput {
            algorithm: AlgorithmKind::MazeBacktrackingSolver,
            reason: e.to_string(),
        })?;
        search.visited[idx] = true;
        search.path.push(cell);
        tracer.emit(StepKind::Place, Some(cell), path_payload(&search.path))?;

        if cell == self.grid.exit() {
            tracer.solution(Some(cell), path_payload(&search.path))?;
            tracer.leave(Some(cell), Some("true".into()))?;
            return Ok(true);
        }

        for next in self.grid.neighbors(cell) {
            tracer.emit(StepKind::Compare, Some(next), Payload::None)?;
            let open = !self.grid.is_blocked(next);
            let fresh = self.grid.index_of(next).is_ok_and(|i| !search.visited[i]);
            if !(open && fresh) {
                tracer.emit(StepKind::Backtrack, Some(next), Payload::None)?;
                continue;
            }
            if self.solve(tracer, next, search)? {
                tracer.leave(Some(cell), Some("true".into()))?;
                return Ok(true);
            }
        }

        // Dead end: undo this cell and report failure upward.
        search.path.pop();
        tracer.emit(StepKind::Remove, Some(cell), path_payload(&search.path))?;
        tracer.emit(StepKind::Backtrack, Some(cell), Payload::None)?;
        tracer.leave(Some(cell), Some("false".into()))?;
        Ok(false)
    }
}

fn path_payload(path: &[Cell]) -> Payload {
    Payload::Path {
        cells: path.to_vec(),
    }
}

impl SteppableAlgorithm for MazeSolver {
    fn kind(&self) -> AlgorithmKind {
        AlgorithmKind::MazeBacktrackingSolver
    }

    fn instance_id(&self) -> InstanceId {
        self.grid.id()
    }

    fn run(&self, tracer: &mut Tracer) -> Result<(), RecordError> {
        let mut search = Search {
            path: Vec::new(),
            visited: vec![false; self.grid.width() * self.grid.height()],
        };
        self.solve(tracer, self.grid.start(), &mut search)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oracle;
    use crate::recorder::{Recorder, RecorderConfig};

    fn record(layout: &str) -> algotrace_core::Trace {
        let grid = GridInstance::from_ascii(layout).unwrap();
        Recorder::new(RecorderConfig::default())
            .record(&MazeSolver::new(grid))
            .unwrap()
    }

    fn solution_path(trace: &algotrace_core::Trace) -> Vec<Cell> {
        match &trace.solutions()[0].state {
            Payload::Path { cells } => cells.clone(),
            other => panic!("expected path payload, got {other:?}"),
        }
    }

    #[test]
    fn straight_corridor() {
        let trace = record("S..E");
        assert_eq!(trace.solutions().len(), 1);
        assert_eq!(
            solution_path(&trace),
            vec![Cell::new(0, 0), Cell::new(0, 1), Cell::new(0, 2), Cell::new(0, 3)]
        );
        assert_eq!(trace.steps()[0].kind, StepKind::Call);
        assert_eq!(trace.steps().last().unwrap().kind, StepKind::Return);
    }

    #[test]
    fn dead_end_is_backtracked() {
        // Going right first leads into a dead end at (0, 2).
        let trace = record("S..\n.##\n..E");
        let path = solution_path(&trace);
        assert_eq!(path.first(), Some(&Cell::new(0, 0)));
        assert_eq!(path.last(), Some(&Cell::new(2, 2)));
        assert!(!path.contains(&Cell::new(0, 2)));

        let removed: Vec<Cell> = trace
            .steps_of(StepKind::Remove)
            .filter_map(|s| s.position)
            .collect();
        assert_eq!(removed, vec![Cell::new(0, 2), Cell::new(0, 1)]);
    }

    #[test]
    fn path_is_connected_and_open() {
        let layout = "S.#...\n..#.#.\n#...#.\n..#...\n.#..#E";
        let grid = GridInstance::from_ascii(layout).unwrap();
        assert!(oracle::is_solvable(&grid));
        let trace = record(layout);
        let path = solution_path(&trace);
        for pair in path.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            assert_eq!(a.row.abs_diff(b.row) + a.col.abs_diff(b.col), 1);
            assert!(!grid.is_blocked(b));
        }
    }

    #[test]
    fn unreachable_exit_records_no_solution() {
        let trace = record("S#E");
        assert!(trace.solutions().is_empty());
        assert_eq!(trace.steps().last().unwrap().kind, StepKind::Return);
        match &trace.steps().last().unwrap().payload {
            Payload::Frame { value, .. } => assert_eq!(value.as_deref(), Some("false")),
            other => panic!("expected frame payload, got {other:?}"),
        }
    }

    #[test]
    fn calls_and_returns_balance() {
        let trace = record("S..\n.#.\n..E");
        let calls = trace.steps_of(StepKind::Call).count();
        let returns = trace.steps_of(StepKind::Return).count();
        assert_eq!(calls, returns);
    }
}
