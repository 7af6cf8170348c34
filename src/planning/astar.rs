//! A* search over the explored-state graph.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};

use crate::core::{Cell, Heading, State};
use crate::error::{AnveshakError, Result};
use crate::graph::{NodeId, StateGraph};

/// A node in the A* open set
#[derive(Clone, Debug)]
struct SearchNode {
    id: NodeId,
    g_cost: usize, // Edges from start
    f_cost: usize, // g_cost + heuristic
    seq: usize,    // Insertion order, for deterministic ties
}

impl Eq for SearchNode {}

impl PartialEq for SearchNode {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.seq == other.seq
    }
}

impl Ord for SearchNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap behavior
        other
            .f_cost
            .cmp(&self.f_cost)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for SearchNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Manhattan distance between the cells; headings are ignored.
///
/// Every edge costs one and changes the row or column by at most one, so
/// this never overestimates.
#[inline]
fn heuristic(from: State, to: State) -> usize {
    from.cell.manhattan_distance(&to.cell)
}

/// Shortest sequence of states from `from` to `to`, both ends included.
pub fn shortest_path(graph: &StateGraph, from: State, to: State) -> Result<Vec<State>> {
    let start = graph
        .node_id(from)
        .ok_or(AnveshakError::UnknownState(from))?;
    let goal = graph.node_id(to).ok_or(AnveshakError::UnknownState(to))?;

    let mut open_set = BinaryHeap::new();
    let mut closed_set = HashSet::new();
    let mut came_from: HashMap<NodeId, NodeId> = HashMap::new();
    let mut g_scores: HashMap<NodeId, usize> = HashMap::new();
    let mut seq = 0;

    open_set.push(SearchNode {
        id: start,
        g_cost: 0,
        f_cost: heuristic(from, to),
        seq,
    });
    g_scores.insert(start, 0);

    while let Some(current) = open_set.pop() {
        if current.id == goal {
            let path = reconstruct_path(graph, &came_from, goal);
            tracing::trace!(
                "[AStar] {} -> {}: {} states, {} expanded",
                from,
                to,
                path.len(),
                closed_set.len()
            );
            return Ok(path);
        }

        if !closed_set.insert(current.id) {
            continue;
        }

        for edge in graph.successors(current.id) {
            if closed_set.contains(&edge.to) {
                continue;
            }
            let tentative_g = current.g_cost + 1;
            let known_g = g_scores.get(&edge.to).copied().unwrap_or(usize::MAX);
            if tentative_g < known_g {
                came_from.insert(edge.to, current.id);
                g_scores.insert(edge.to, tentative_g);
                seq += 1;
                open_set.push(SearchNode {
                    id: edge.to,
                    g_cost: tentative_g,
                    f_cost: tentative_g + heuristic(graph.state(edge.to), to),
                    seq,
                });
            }
        }
    }

    tracing::debug!(
        "[AStar] FAILED: no path {} -> {} after expanding {} nodes",
        from,
        to,
        closed_set.len()
    );
    Err(AnveshakError::NoPath { from, to })
}

/// Shortest path to `origin` in any heading.
///
/// Headings are tried in clockwise order from East; the first of several
/// equally short paths wins.
pub fn path_home(graph: &StateGraph, from: State, origin: Cell) -> Result<Vec<State>> {
    let mut best: Option<Vec<State>> = None;
    let mut last_err = None;

    for heading in Heading::ALL {
        let target = State::new(origin, heading);
        match shortest_path(graph, from, target) {
            Ok(path) => {
                if best.as_ref().is_none_or(|b| path.len() < b.len()) {
                    best = Some(path);
                }
            }
            Err(e) => last_err = Some(e),
        }
    }

    match (best, last_err) {
        (Some(path), _) => Ok(path),
        (None, Some(err)) => Err(err),
        (None, None) => Err(AnveshakError::NoPath {
            from,
            to: State::new(origin, Heading::East),
        }),
    }
}

fn reconstruct_path(
    graph: &StateGraph,
    came_from: &HashMap<NodeId, NodeId>,
    goal: NodeId,
) -> Vec<State> {
    let mut path = vec![graph.state(goal)];
    let mut current = goal;
    while let Some(&prev) = came_from.get(&current) {
        path.push(graph.state(prev));
        current = prev;
    }
    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GridSpec;

    fn s(row: usize, col: usize, heading: Heading) -> State {
        State::new(Cell::new(row, col), heading)
    }

    /// Walk east along the bottom row, then north up column 2.
    fn explored_graph() -> StateGraph {
        let mut g = StateGraph::new(GridSpec::new(4).unwrap());
        let walk = [
            s(0, 0, Heading::East),
            s(0, 1, Heading::East),
            s(0, 2, Heading::East),
            s(0, 2, Heading::North),
            s(1, 2, Heading::North),
            s(2, 2, Heading::North),
        ];
        for state in walk {
            g.visit(state.cell, state.heading);
        }
        g
    }

    #[test]
    fn test_path_to_self() {
        let g = explored_graph();
        let path = shortest_path(&g, s(1, 2, Heading::North), s(1, 2, Heading::North)).unwrap();
        assert_eq!(path, vec![s(1, 2, Heading::North)]);
    }

    #[test]
    fn test_turn_only_path_is_minimal() {
        let g = explored_graph();
        let path = shortest_path(&g, s(2, 2, Heading::North), s(2, 2, Heading::South)).unwrap();
        assert_eq!(path.len(), 3);
        let path = shortest_path(&g, s(2, 2, Heading::North), s(2, 2, Heading::West)).unwrap();
        assert_eq!(path, vec![s(2, 2, Heading::North), s(2, 2, Heading::West)]);
    }

    #[test]
    fn test_path_home_from_explored_cell() {
        let g = explored_graph();
        let path = path_home(&g, s(2, 2, Heading::North), Cell::new(0, 0)).unwrap();
        assert_eq!(path.first(), Some(&s(2, 2, Heading::North)));
        assert_eq!(path.last().unwrap().cell, Cell::new(0, 0));
        // Turn around (2), down two rows (2), turn west (1), two columns (2)
        assert_eq!(path.len(), 8);
        // Interior states never leave visited cells
        for state in &path {
            assert!(g.is_visited(state.cell));
        }
    }

    #[test]
    fn test_path_reaches_frontier() {
        let g = explored_graph();
        let target = s(3, 2, Heading::North);
        assert!(g.frontier_nodes().contains(&target));
        let path = shortest_path(&g, s(0, 0, Heading::East), target).unwrap();
        assert_eq!(path.last(), Some(&target));
        for state in &path[..path.len() - 1] {
            assert!(g.is_visited(state.cell));
        }
    }

    #[test]
    fn test_unknown_state() {
        let g = explored_graph();
        assert!(matches!(
            shortest_path(&g, s(3, 3, Heading::East), s(0, 0, Heading::East)),
            Err(AnveshakError::UnknownState(_))
        ));
    }

    #[test]
    fn test_frontier_is_a_dead_end() {
        let g = explored_graph();
        assert!(matches!(
            shortest_path(&g, s(3, 2, Heading::North), s(0, 0, Heading::East)),
            Err(AnveshakError::NoPath { .. })
        ));
    }
}
