//! Breadth-first reachability over a grid instance.
//!
//! The oracle decides whether an instance is playable: the exit and every
//! treasure must be reachable from the start through 4-adjacent open cells.
//! All searches use an explicit queue, so grid size is bounded by memory,
//! not by the call stack.

use std::collections::VecDeque;

use indexmap::IndexSet;

use algotrace_core::{Cell, GridInstance};

/// Every open cell reachable from the start, in BFS discovery order.
pub fn reachable_set(grid: &GridInstance) -> IndexSet<Cell> {
    reachable_from(grid, grid.start())
}

/// Every open cell reachable from `origin`, in BFS discovery order. Empty
/// when `origin` is a wall or outside the grid.
pub fn reachable_from(grid: &GridInstance, origin: Cell) -> IndexSet<Cell> {
    let mut seen = IndexSet::new();
    if grid.is_blocked(origin) {
        return seen;
    }

    let mut queue = VecDeque::new();
    seen.insert(origin);
    queue.push_back(origin);

    while let Some(cell) = queue.pop_front() {
        for next in grid.neighbors(cell) {
            if !grid.is_blocked(next) && seen.insert(next) {
                queue.push_back(next);
            }
        }
    }
    seen
}

/// True iff the exit and all targets are reachable from the start.
pub fn is_solvable(grid: &GridInstance) -> bool {
    let reachable = reachable_set(grid);
    reachable.contains(&grid.exit()) && grid.targets().iter().all(|t| reachable.contains(t))
}

/// Targets that cannot be reached from the start, in target order.
pub fn unreachable_targets(grid: &GridInstance) -> Vec<Cell> {
    let reachable = reachable_set(grid);
    grid.targets()
        .iter()
        .copied()
        .filter(|t| !reachable.contains(t))
        .collect()
}

/// A shortest 4-connected path from `from` to `to`, both ends included.
pub fn shortest_path(grid: &GridInstance, from: Cell, to: Cell) -> Option<Vec<Cell>> {
    if grid.is_blocked(from) || grid.is_blocked(to) {
        return None;
    }

    let area = grid.width() * grid.height();
    let mut parent: Vec<Option<Cell>> = vec![None; area];
    let mut visited = vec![false; area];
    let mut queue = VecDeque::new();

    visited[grid.index_of(from).ok()?] = true;
    queue.push_back(from);

    while let Some(cell) = queue.pop_front() {
        if cell == to {
            let mut path = vec![cell];
            let mut cursor = cell;
            while let Some(prev) = parent[grid.index_of(cursor).ok()?] {
                path.push(prev);
                cursor = prev;
            }
            path.reverse();
            return Some(path);
        }
        for next in grid.neighbors(cell) {
            if grid.is_blocked(next) {
                continue;
            }
            let idx = grid.index_of(next).ok()?;
            if !visited[idx] {
                visited[idx] = true;
                parent[idx] = Some(cell);
                queue.push_back(next);
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(layout: &str) -> GridInstance {
        GridInstance::from_ascii(layout).unwrap()
    }

    #[test]
    fn open_3x3_reaches_everything() {
        let g = grid("S..\n...\n..E");
        let reachable = reachable_set(&g);
        assert_eq!(reachable.len(), 9);
        assert_eq!(reachable.first(), Some(&Cell::new(0, 0)));
        assert!(is_solvable(&g));
    }

    #[test]
    fn wall_cuts_off_exit() {
        let g = grid("S#.\n##.\n..E");
        assert_eq!(reachable_set(&g).len(), 1);
        assert!(!is_solvable(&g));
    }

    #[test]
    fn unreachable_treasure_makes_unsolvable() {
        let g = grid("S..#$\n...##\n....E");
        assert!(reachable_set(&g).contains(&g.exit()));
        assert!(!is_solvable(&g));
        assert_eq!(unreachable_targets(&g), vec![Cell::new(0, 4)]);
    }

    #[test]
    fn treasures_reachable_is_solvable() {
        let g = grid("S.$\n.#.\n$.E");
        assert!(is_solvable(&g));
        assert!(unreachable_targets(&g).is_empty());
    }

    #[test]
    fn diagonal_gap_is_not_a_path() {
        let g = grid("S#\n#E");
        assert!(!is_solvable(&g));
    }

    #[test]
    fn reachable_from_wall_is_empty() {
        let g = grid("S#\n.E");
        assert!(reachable_from(&g, Cell::new(0, 1)).is_empty());
    }

    #[test]
    fn shortest_path_goes_around_walls() {
        let g = grid("S#.\n.#.\n..E");
        let path = shortest_path(&g, g.start(), g.exit()).unwrap();
        assert_eq!(
            path,
            vec![
                Cell::new(0, 0),
                Cell::new(1, 0),
                Cell::new(2, 0),
                Cell::new(2, 1),
                Cell::new(2, 2)
            ]
        );
    }

    #[test]
    fn shortest_path_to_self() {
        let g = grid("S.E");
        assert_eq!(shortest_path(&g, g.start(), g.start()), Some(vec![g.start()]));
    }

    #[test]
    fn shortest_path_none_when_cut_off() {
        let g = grid("S#E");
        assert_eq!(shortest_path(&g, g.start(), g.exit()), None);
    }

    #[test]
    fn large_open_grid_does_not_overflow_stack() {
        let width = 400;
        let height = 400;
        let g = GridInstance::new(
            width,
            height,
            vec![false; width * height],
            Cell::new(0, 0),
            Cell::new(height - 1, width - 1),
            [],
        )
        .unwrap();
        assert_eq!(reachable_set(&g).len(), width * height);
        assert!(is_solvable(&g));
    }
}
