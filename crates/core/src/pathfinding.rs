//! Shortest-path search over the toroidal grid.
//! Knight-occupied cells are never entered, whoever is asking for the route.

use std::cmp::{Ordering, Reverse};
use std::collections::{BTreeMap, BinaryHeap};

use crate::grid::Grid;
use crate::types::{EntityKind, Pos};

#[derive(Clone, Copy, Debug)]
struct OpenNode {
    f: f64,
    seq: u64,
    pos: Pos,
}

impl PartialEq for OpenNode {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OpenNode {}

impl PartialOrd for OpenNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OpenNode {
    // Equal f-scores pop in insertion order.
    fn cmp(&self, other: &Self) -> Ordering {
        self.f.total_cmp(&other.f).then(self.seq.cmp(&other.seq))
    }
}

/// A* from `start` to `goal` with unit step cost and a wrapped Euclidean heuristic.
/// Returns the cells after `start` up to and including `goal`, or an empty path
/// when the goal cannot be reached.
pub fn astar_path(grid: &Grid, start: Pos, goal: Pos) -> Vec<Pos> {
    let start = grid.wrap(start.x, start.y);
    let goal = grid.wrap(goal.x, goal.y);
    if start == goal {
        return Vec::new();
    }

    let mut open_set = BinaryHeap::new();
    let mut g_score: BTreeMap<Pos, u32> = BTreeMap::new();
    let mut came_from: BTreeMap<Pos, Pos> = BTreeMap::new();
    let mut seq = 0_u64;

    g_score.insert(start, 0);
    open_set.push(Reverse(OpenNode { f: grid.distance(start, goal), seq, pos: start }));

    while let Some(Reverse(current)) = open_set.pop() {
        if current.pos == goal {
            return reconstruct_path(&came_from, start, goal);
        }
        let Some(&cur_g) = g_score.get(&current.pos) else {
            continue;
        };
        for (next, kind) in grid.get_adjacent(current.pos) {
            if kind == EntityKind::Knight {
                continue;
            }
            let tentative = cur_g + 1;
            if tentative < g_score.get(&next).copied().unwrap_or(u32::MAX) {
                came_from.insert(next, current.pos);
                g_score.insert(next, tentative);
                seq += 1;
                let f = f64::from(tentative) + grid.distance(next, goal);
                open_set.push(Reverse(OpenNode { f, seq, pos: next }));
            }
        }
    }
    Vec::new()
}

fn reconstruct_path(came_from: &BTreeMap<Pos, Pos>, start: Pos, goal: Pos) -> Vec<Pos> {
    let mut path = vec![goal];
    let mut current = goal;
    while let Some(&previous) = came_from.get(&current) {
        if previous == start {
            break;
        }
        path.push(previous);
        current = previous;
    }
    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_grid_path_has_one_cell_per_step() {
        let grid = Grid::new(10);
        let path = astar_path(&grid, Pos::new(0, 0), Pos::new(3, 0));
        assert_eq!(path, vec![Pos::new(1, 0), Pos::new(2, 0), Pos::new(3, 0)]);
    }

    #[test]
    fn path_takes_the_short_way_across_the_seam() {
        let grid = Grid::new(10);
        let path = astar_path(&grid, Pos::new(0, 0), Pos::new(8, 0));
        assert_eq!(path, vec![Pos::new(9, 0), Pos::new(8, 0)]);
    }

    #[test]
    fn goal_boxed_in_by_knights_is_unreachable() {
        let mut grid = Grid::new(10);
        let goal = Pos::new(5, 5);
        for (pos, _) in grid.get_adjacent(goal) {
            grid.add_entity(pos.x, pos.y, EntityKind::Knight);
        }
        assert!(astar_path(&grid, Pos::new(0, 0), goal).is_empty());
    }

    #[test]
    fn knights_are_routed_around() {
        let mut grid = Grid::new(10);
        grid.add_entity(1, 0, EntityKind::Knight);
        let path = astar_path(&grid, Pos::new(0, 0), Pos::new(2, 0));
        assert_eq!(path.len(), 4);
        assert_eq!(path.last(), Some(&Pos::new(2, 0)));
        assert!(!path.contains(&Pos::new(1, 0)));
        for pair in path.windows(2) {
            assert_eq!(grid.distance(pair[0], pair[1]), 1.0);
        }
    }

    #[test]
    fn start_equal_to_goal_needs_no_steps() {
        let grid = Grid::new(5);
        assert!(astar_path(&grid, Pos::new(2, 2), Pos::new(2, 2)).is_empty());
    }

    #[test]
    fn other_occupants_do_not_block_routes() {
        let mut grid = Grid::new(10);
        grid.add_entity(1, 0, EntityKind::Hunter);
        grid.add_entity(2, 0, EntityKind::Treasure);
        let path = astar_path(&grid, Pos::new(0, 0), Pos::new(3, 0));
        assert_eq!(path, vec![Pos::new(1, 0), Pos::new(2, 0), Pos::new(3, 0)]);
    }
}
