//! Shortest-path search over 4-connected cells.

use std::{
    cmp::Reverse,
    collections::{BinaryHeap, HashMap},
};

use maze_crawl_core::CellCoord;

/// Computes the shortest path from `from` to `to` using A* with a Manhattan
/// heuristic and uniform step cost.
///
/// The returned sequence starts with `from` and ends with `to`. Only cells for
/// which `is_passable` holds are entered; `from` itself is never tested. When
/// both ends coincide the path holds that single cell, and when `to` cannot be
/// reached the path is empty.
///
/// The predicate is the only view of the grid, so nothing is cached between
/// calls.
pub fn shortest_path<F>(from: CellCoord, to: CellCoord, mut is_passable: F) -> Vec<CellCoord>
where
    F: FnMut(CellCoord) -> bool,
{
    if from == to {
        return vec![from];
    }

    let mut open = BinaryHeap::new();
    let mut came_from: HashMap<CellCoord, CellCoord> = HashMap::new();
    let mut best_cost: HashMap<CellCoord, u32> = HashMap::new();

    let _ = best_cost.insert(from, 0);
    open.push(OpenNode {
        estimate: from.manhattan_distance(to),
        cost: 0,
        cell: from,
    });

    while let Some(node) = open.pop() {
        if node.cell == to {
            return reconstruct(&came_from, from, to);
        }

        if best_cost
            .get(&node.cell)
            .is_some_and(|&known| known < node.cost)
        {
            continue;
        }

        let next_cost = node.cost.saturating_add(1);
        for neighbor in node.cell.neighbors() {
            if best_cost
                .get(&neighbor)
                .is_some_and(|&known| known <= next_cost)
            {
                continue;
            }

            if !is_passable(neighbor) {
                continue;
            }

            let _ = best_cost.insert(neighbor, next_cost);
            let _ = came_from.insert(neighbor, node.cell);
            open.push(OpenNode {
                estimate: next_cost.saturating_add(neighbor.manhattan_distance(to)),
                cost: next_cost,
                cell: neighbor,
            });
        }
    }

    Vec::new()
}

fn reconstruct(
    came_from: &HashMap<CellCoord, CellCoord>,
    from: CellCoord,
    to: CellCoord,
) -> Vec<CellCoord> {
    let mut path = vec![to];
    let mut cursor = to;
    while cursor != from {
        let Some(&previous) = came_from.get(&cursor) else {
            return Vec::new();
        };
        path.push(previous);
        cursor = previous;
    }
    path.reverse();
    path
}

/// Entry in the open set, ordered so that the max-heap yields the lowest
/// estimate first, then the deepest node, then the smallest coordinate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct OpenNode {
    estimate: u32,
    cost: u32,
    cell: CellCoord,
}

impl Ord for OpenNode {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (Reverse(self.estimate), self.cost, Reverse(self.cell)).cmp(&(
            Reverse(other.estimate),
            other.cost,
            Reverse(other.cell),
        ))
    }
}

impl PartialOrd for OpenNode {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}
