//! Breadth-first layering of the residual graph
//!
//! A [`LevelGraph`] assigns every node reachable from the source its BFS
//! distance over edges with positive residual capacity. Edges from level `L`
//! to level `L + 1` form the admissible subgraph a phase may push flow along.
//! Neighbours are visited in adjacency order, so ties in distance resolve by
//! insertion order.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::collections::VecDeque;

use crate::algorithm::traits::{EdgeId, NodeId};
use crate::data_structures::graph::{FlowEdge, FlowNetwork};

/// Per-phase BFS layering; `None` means "not reached this phase"
#[derive(Debug, Clone)]
pub struct LevelGraph {
    levels: Vec<Option<usize>>,
    /// Edge through which each node was first discovered
    parents: Vec<Option<EdgeId>>,
    edge_scans: usize,
}

impl LevelGraph {
    /// Layer the residual graph of `network` from `source`.
    ///
    /// `source` must be a valid node of `network`.
    pub fn build(network: &FlowNetwork, source: NodeId) -> Self {
        let mut levels = vec![None; network.node_count()];
        let mut parents = vec![None; network.node_count()];
        let mut edge_scans = 0;
        let mut queue = VecDeque::new();

        levels[source.0] = Some(0);
        queue.push_back((source, 0));

        while let Some((node, level)) = queue.pop_front() {
            for &id in network.adjacency(node) {
                edge_scans += 1;
                let edge = &network[id];
                if edge.residual_capacity() > 0 && levels[edge.to.0].is_none() {
                    levels[edge.to.0] = Some(level + 1);
                    parents[edge.to.0] = Some(id);
                    queue.push_back((edge.to, level + 1));
                }
            }
        }

        Self {
            levels,
            parents,
            edge_scans,
        }
    }

    pub fn level(&self, node: NodeId) -> Option<usize> {
        self.levels.get(node.0).copied().flatten()
    }

    pub fn reaches(&self, node: NodeId) -> bool {
        self.level(node).is_some()
    }

    /// Deepest level assigned this phase
    pub fn depth(&self) -> usize {
        self.levels.iter().flatten().copied().max().unwrap_or(0)
    }

    pub fn reached_count(&self) -> usize {
        self.levels.iter().filter(|level| level.is_some()).count()
    }

    /// Whether `edge` goes one level deeper and still has residual capacity
    #[inline]
    pub fn is_admissible(&self, edge: &FlowEdge) -> bool {
        match (self.level(edge.from), self.level(edge.to)) {
            (Some(from), Some(to)) => to == from + 1 && edge.residual_capacity() > 0,
            _ => false,
        }
    }

    /// Shortest residual path to `target` along discovery edges, source first
    pub fn path_to(&self, network: &FlowNetwork, target: NodeId) -> Option<Vec<EdgeId>> {
        self.level(target)?;

        let mut path = Vec::new();
        let mut node = target;
        while let Some(id) = self.parents[node.0] {
            path.push(id);
            node = network[id].from;
        }
        path.reverse();
        Some(path)
    }

    pub fn edge_scans(&self) -> usize {
        self.edge_scans
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diamond() -> FlowNetwork {
        // 0 -> {1, 2} -> 3, plus a dangling node 4
        let mut network = FlowNetwork::new(5);
        network.add_edge(NodeId(0), NodeId(1), 1).unwrap();
        network.add_edge(NodeId(0), NodeId(2), 1).unwrap();
        network.add_edge(NodeId(1), NodeId(3), 1).unwrap();
        network.add_edge(NodeId(2), NodeId(3), 1).unwrap();
        network
    }

    #[test]
    fn test_levels_follow_bfs_distance() {
        let network = diamond();
        let levels = LevelGraph::build(&network, NodeId(0));

        assert_eq!(levels.level(NodeId(0)), Some(0));
        assert_eq!(levels.level(NodeId(1)), Some(1));
        assert_eq!(levels.level(NodeId(2)), Some(1));
        assert_eq!(levels.level(NodeId(3)), Some(2));
        assert_eq!(levels.level(NodeId(4)), None);
        assert_eq!(levels.depth(), 2);
        assert_eq!(levels.reached_count(), 4);
        assert!(!levels.reaches(NodeId(4)));
    }

    #[test]
    fn test_saturated_edges_are_not_traversed() {
        let mut network = diamond();
        let first = network.adjacency(NodeId(0))[0];
        network.push_flow(first, 1);

        let levels = LevelGraph::build(&network, NodeId(0));
        // Saturating the only edge into node 1 cuts it off
        assert_eq!(levels.level(NodeId(2)), Some(1));
        assert_eq!(levels.level(NodeId(3)), Some(2));
        assert_eq!(levels.level(NodeId(1)), None);
    }

    #[test]
    fn test_path_follows_insertion_order() {
        let network = diamond();
        let levels = LevelGraph::build(&network, NodeId(0));
        let path = levels.path_to(&network, NodeId(3)).unwrap();

        let nodes: Vec<NodeId> = path.iter().map(|&id| network[id].to).collect();
        assert_eq!(nodes, vec![NodeId(1), NodeId(3)]);
        assert!(levels.path_to(&network, NodeId(4)).is_none());
        assert_eq!(levels.path_to(&network, NodeId(0)), Some(Vec::new()));
    }

    #[test]
    fn test_admissible_edges() {
        let mut network = FlowNetwork::new(3);
        let forward = network.add_edge(NodeId(0), NodeId(1), 2).unwrap();
        let skip = network.add_edge(NodeId(0), NodeId(2), 2).unwrap();
        let sideways = network.add_edge(NodeId(1), NodeId(2), 2).unwrap();

        let levels = LevelGraph::build(&network, NodeId(0));
        assert!(levels.is_admissible(&network[forward]));
        assert!(levels.is_admissible(&network[skip]));
        // 1 and 2 share a level, so 1 -> 2 is not part of the level graph
        assert!(!levels.is_admissible(&network[sideways]));
        assert!(levels.edge_scans() >= 3);
    }
}
