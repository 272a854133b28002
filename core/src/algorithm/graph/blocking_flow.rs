//! Blocking-flow search over a level graph
//!
//! Depth-first search from a node towards the sink using only admissible
//! edges. Each node keeps a cursor into its adjacency list; a cursor only
//! moves forward within a phase, so an edge that led to a dead end or was
//! found inadmissible is never rescanned. Across all searches of one phase
//! this bounds cursor work by O(E).
//!
//! The search keeps its own path stack instead of recursing, so deep level
//! graphs cannot exhaust the call stack.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use crate::algorithm::graph::level::LevelGraph;
use crate::algorithm::traits::{Capacity, EdgeId, NodeId};
use crate::data_structures::graph::FlowNetwork;

/// One phase's worth of cursor state bound to a network and its layering
#[derive(Debug)]
pub struct BlockingFlowSearch<'a> {
    network: &'a mut FlowNetwork,
    levels: &'a LevelGraph,
    sink: NodeId,
    cursors: Vec<usize>,
    edge_scans: usize,
}

impl<'a> BlockingFlowSearch<'a> {
    /// Start a phase with every cursor at the head of its adjacency list
    pub fn new(network: &'a mut FlowNetwork, levels: &'a LevelGraph, sink: NodeId) -> Self {
        let cursors = vec![0; network.node_count()];
        Self {
            network,
            levels,
            sink,
            cursors,
            edge_scans: 0,
        }
    }

    /// Route up to `limit` units from `from` to the sink and return the
    /// amount routed, or 0 when the level graph has no path left.
    ///
    /// Starting at the sink routes `limit` trivially.
    pub fn augment(&mut self, from: NodeId, limit: Capacity) -> Capacity {
        if limit == 0 {
            return 0;
        }

        let mut path: Vec<EdgeId> = Vec::new();
        let mut node = from;

        loop {
            if node == self.sink {
                let pushed = path
                    .iter()
                    .map(|&id| self.network[id].residual_capacity())
                    .fold(limit, Capacity::min);
                for &id in &path {
                    self.network.push_flow(id, pushed);
                }
                return pushed;
            }

            match self.advance(node) {
                Some(id) => {
                    path.push(id);
                    node = self.network[id].to;
                }
                None => match path.pop() {
                    // Dead end: retire the edge that led here for the rest of the phase
                    Some(id) => {
                        node = self.network[id].from;
                        self.cursors[node.0] += 1;
                    }
                    None => return 0,
                },
            }
        }
    }

    /// Move `node`'s cursor to its next admissible edge
    fn advance(&mut self, node: NodeId) -> Option<EdgeId> {
        let adjacency = self.network.adjacency(node);
        while let Some(&id) = adjacency.get(self.cursors[node.0]) {
            self.edge_scans += 1;
            if self.levels.is_admissible(&self.network[id]) {
                return Some(id);
            }
            self.cursors[node.0] += 1;
        }
        None
    }

    pub fn cursor(&self, node: NodeId) -> usize {
        self.cursors[node.0]
    }

    pub fn edge_scans(&self) -> usize {
        self.edge_scans
    }
}
