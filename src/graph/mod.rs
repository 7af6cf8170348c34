//! Explored-state graph.
//!
//! Nodes are `(cell, heading)` states stored in an arena and addressed by a
//! dense [`NodeId`]. Edges are labelled with the action that realises them.
//!
//! Growth rules, applied by [`StateGraph::visit`]:
//! - the four headings of a visited cell are linked by turn edges both ways
//! - each visited cell gets a forward edge towards every in-bounds neighbour;
//!   the target node of an edge into an unvisited cell has no outgoing edges
//!   yet, which is what makes it part of the frontier
//! - forward edges whose endpoints are both visited are marked verified

use std::collections::HashMap;

use crate::core::{Action, Cell, GridSpec, Heading, State};

/// Dense node handle.
pub type NodeId = usize;

/// A labelled directed edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Edge {
    pub to: NodeId,
    pub action: Action,
    /// Both endpoints visited (always true for turns)
    pub verified: bool,
}

/// Incrementally grown graph of explored states.
#[derive(Clone, Debug)]
pub struct StateGraph {
    grid: GridSpec,
    states: Vec<State>,
    index: HashMap<State, NodeId>,
    outgoing: Vec<Vec<Edge>>,
    in_degree: Vec<usize>,
    visited: Vec<bool>,
    last_visit: Option<State>,
}

impl StateGraph {
    pub fn new(grid: GridSpec) -> Self {
        Self {
            grid,
            states: Vec::new(),
            index: HashMap::new(),
            outgoing: Vec::new(),
            in_degree: Vec::new(),
            visited: vec![false; grid.cell_count()],
            last_visit: None,
        }
    }

    /// Record that the agent occupies `cell` facing `heading`.
    ///
    /// Idempotent: revisiting a cell adds nothing new.
    pub fn visit(&mut self, cell: Cell, heading: Heading) {
        debug_assert!(self.grid.contains(cell), "visit outside grid: {cell}");
        let first_visit = !self.visited[self.grid.to_index(cell)];
        self.visited[self.grid.to_index(cell)] = true;

        if first_visit {
            for h in Heading::ALL {
                let from = self.ensure_node(State::new(cell, h));
                let right = self.ensure_node(State::new(cell, h.turn_right()));
                let left = self.ensure_node(State::new(cell, h.turn_left()));
                self.add_edge(from, right, Action::TurnRight, true);
                self.add_edge(from, left, Action::TurnLeft, true);
            }
        }

        for (h, neighbor) in self.grid.neighbors_with_heading(cell) {
            let neighbor_visited = self.is_visited(neighbor);
            let from = self.ensure_node(State::new(cell, h));
            let to = self.ensure_node(State::new(neighbor, h));
            self.add_edge(from, to, Action::Forward, neighbor_visited);

            if neighbor_visited {
                let back = h.opposite();
                let from = self.ensure_node(State::new(neighbor, back));
                let to = self.ensure_node(State::new(cell, back));
                self.add_edge(from, to, Action::Forward, true);
            }
        }

        if let Some(prev) = self.last_visit
            && prev.cell != cell
        {
            // The move that brought us here; both ends are visited now
            match self.node_id(prev) {
                Some(from) => {
                    let to = self.ensure_node(State::new(cell, prev.heading));
                    self.add_edge(from, to, Action::Forward, true);
                }
                None => tracing::warn!("Previous state {} missing from graph", prev),
            }
        }

        if first_visit {
            tracing::debug!(
                "Visited {}: graph has {} nodes, {} edges",
                cell,
                self.node_count(),
                self.edge_count()
            );
        }
        self.last_visit = Some(State::new(cell, heading));
    }

    /// States reached by some edge but not expanded yet.
    pub fn frontier_nodes(&self) -> Vec<State> {
        (0..self.states.len())
            .filter(|&id| self.in_degree[id] > 0 && self.outgoing[id].is_empty())
            .map(|id| self.states[id])
            .collect()
    }

    pub fn node_id(&self, state: State) -> Option<NodeId> {
        self.index.get(&state).copied()
    }

    pub fn state(&self, id: NodeId) -> State {
        self.states[id]
    }

    pub fn contains(&self, state: State) -> bool {
        self.index.contains_key(&state)
    }

    pub fn successors(&self, id: NodeId) -> &[Edge] {
        &self.outgoing[id]
    }

    /// Edge between two states, if present.
    pub fn edge(&self, from: State, to: State) -> Option<Edge> {
        let from = self.node_id(from)?;
        let to = self.node_id(to)?;
        self.outgoing[from].iter().copied().find(|e| e.to == to)
    }

    pub fn is_visited(&self, cell: Cell) -> bool {
        self.grid.contains(cell) && self.visited[self.grid.to_index(cell)]
    }

    pub fn node_count(&self) -> usize {
        self.states.len()
    }

    pub fn edge_count(&self) -> usize {
        self.outgoing.iter().map(Vec::len).sum()
    }

    pub fn grid(&self) -> GridSpec {
        self.grid
    }

    fn ensure_node(&mut self, state: State) -> NodeId {
        if let Some(&id) = self.index.get(&state) {
            return id;
        }
        let id = self.states.len();
        self.states.push(state);
        self.outgoing.push(Vec::new());
        self.in_degree.push(0);
        self.index.insert(state, id);
        id
    }

    /// Insert an edge once; a later insert can only upgrade it to verified.
    fn add_edge(&mut self, from: NodeId, to: NodeId, action: Action, verified: bool) {
        if let Some(edge) = self.outgoing[from].iter_mut().find(|e| e.to == to) {
            debug_assert_eq!(edge.action, action);
            edge.verified |= verified;
            return;
        }
        self.outgoing[from].push(Edge {
            to,
            action,
            verified,
        });
        self.in_degree[to] += 1;
    }
}
