//! Residual flow network with an index-addressed edge arena
//!
//! Every caller-added edge `u -> v` is stored next to a paired residual edge
//! `v -> u` of capacity zero. Each edge records the handle of its twin, so
//! pushing flow updates both directions in O(1) without shared references.
//!
//! # Invariants
//! - `edges[e].flow == -edges[edges[e].reverse].flow` at all times
//! - `0 <= flow <= capacity` on forward edges between driver phases
//! - adjacency lists preserve insertion order; nothing is ever removed
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::ops::Index;

use serde::{Deserialize, Serialize};

use crate::algorithm::graph::level::LevelGraph;
use crate::algorithm::graph::max_flow::Dinic;
use crate::algorithm::traits::{Capacity, EdgeId, FlowError, MaxFlowStrategy, NodeId};

/// Flow edge representation with residual capacity tracking
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowEdge {
    /// Source vertex
    pub from: NodeId,
    /// Target vertex
    pub to: NodeId,
    /// Original edge capacity (zero for residual twins)
    pub capacity: Capacity,
    /// Current signed flow through edge
    pub flow: Capacity,
    /// Paired edge in the opposite direction
    pub reverse: EdgeId,
}

impl FlowEdge {
    fn new(from: NodeId, to: NodeId, capacity: Capacity, reverse: EdgeId) -> Self {
        Self {
            from,
            to,
            capacity,
            flow: 0,
            reverse,
        }
    }

    /// Additional flow this edge can still carry
    #[inline]
    pub fn residual_capacity(&self) -> Capacity {
        self.capacity - self.flow
    }

    #[inline]
    pub fn is_saturated(&self) -> bool {
        self.residual_capacity() == 0
    }
}

/// Flow network representation with residual graph
///
/// Deserialization goes through [`RawFlowNetwork`] and rejects documents
/// whose arena breaks the pairing or adjacency invariants.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(try_from = "RawFlowNetwork")]
pub struct FlowNetwork {
    /// Number of vertices in network
    node_count: usize,
    /// Outgoing edge handles per vertex, in insertion order
    adjacency: Vec<Vec<EdgeId>>,
    /// All edges, forward at even slots and residual twins at odd slots
    edges: Vec<FlowEdge>,
}

impl FlowNetwork {
    /// Create new flow network with specified vertex count
    pub fn new(node_count: usize) -> Self {
        Self {
            node_count,
            adjacency: vec![Vec::new(); node_count],
            edges: Vec::new(),
        }
    }

    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Number of caller-added edges (residual twins are not counted)
    pub fn edge_count(&self) -> usize {
        self.edges.len() / 2
    }

    /// Add a directed edge together with its zero-capacity residual twin.
    ///
    /// Self-loops and parallel edges are accepted and kept independent.
    /// Returns the handle of the forward edge.
    pub fn add_edge(
        &mut self,
        from: NodeId,
        to: NodeId,
        capacity: Capacity,
    ) -> Result<EdgeId, FlowError> {
        self.check_node(from)?;
        self.check_node(to)?;
        if capacity < 0 {
            return Err(FlowError::NegativeCapacity { from, to, capacity });
        }
        Ok(self.insert_edge(from, to, capacity))
    }

    /// Arena insertion for endpoints already known to be in range
    pub(crate) fn insert_edge(&mut self, from: NodeId, to: NodeId, capacity: Capacity) -> EdgeId {
        let forward = EdgeId(self.edges.len());
        let reverse = EdgeId(forward.0 + 1);

        self.edges.push(FlowEdge::new(from, to, capacity, reverse));
        self.edges.push(FlowEdge::new(to, from, 0, forward));

        self.adjacency[from.0].push(forward);
        self.adjacency[to.0].push(reverse);

        forward
    }

    pub fn check_node(&self, node: NodeId) -> Result<(), FlowError> {
        if node.0 < self.node_count {
            Ok(())
        } else {
            Err(FlowError::InvalidNode {
                node,
                node_count: self.node_count,
            })
        }
    }

    /// Validate a source/sink pair before a driver touches the network
    pub fn check_terminals(&self, source: NodeId, sink: NodeId) -> Result<(), FlowError> {
        self.check_node(source)?;
        self.check_node(sink)?;
        if source == sink {
            return Err(FlowError::SourceIsSink(source));
        }
        Ok(())
    }

    pub fn edge(&self, id: EdgeId) -> Result<&FlowEdge, FlowError> {
        self.edges.get(id.0).ok_or(FlowError::InvalidEdge {
            edge: id,
            edge_count: self.edges.len(),
        })
    }

    pub fn flow(&self, id: EdgeId) -> Result<Capacity, FlowError> {
        self.edge(id).map(|edge| edge.flow)
    }

    pub fn residual_capacity(&self, id: EdgeId) -> Result<Capacity, FlowError> {
        self.edge(id).map(FlowEdge::residual_capacity)
    }

    /// Outgoing edges of `node`, residual twins included, in insertion order
    pub fn edges_from(
        &self,
        node: NodeId,
    ) -> Result<impl Iterator<Item = (EdgeId, &FlowEdge)> + '_, FlowError> {
        self.check_node(node)?;
        Ok(self.adjacency[node.0].iter().map(move |&id| (id, &self.edges[id.0])))
    }

    /// Caller-added edges in insertion order
    pub fn forward_edges(&self) -> impl Iterator<Item = (EdgeId, &FlowEdge)> + '_ {
        self.edges
            .iter()
            .enumerate()
            .step_by(2)
            .map(|(index, edge)| (EdgeId(index), edge))
    }

    pub(crate) fn adjacency(&self, node: NodeId) -> &[EdgeId] {
        &self.adjacency[node.0]
    }

    /// Move `amount` units along `id`, mirroring the change on its twin
    pub(crate) fn push_flow(&mut self, id: EdgeId, amount: Capacity) {
        let reverse = self.edges[id.0].reverse;
        self.edges[id.0].flow += amount;
        self.edges[reverse.0].flow -= amount;
        debug_assert!(self.edges[id.0].flow <= self.edges[id.0].capacity);
        debug_assert!(self.edges[reverse.0].flow <= self.edges[reverse.0].capacity);
    }

    /// Net flow leaving `node` over caller-added edges
    pub fn net_outflow(&self, node: NodeId) -> Result<Capacity, FlowError> {
        self.forward_edges().try_fold(0, |total: Capacity, (_, edge)| {
            let mut total = Some(total);
            if edge.from == node {
                total = total.and_then(|value| value.checked_add(edge.flow));
            }
            if edge.to == node {
                total = total.and_then(|value| value.checked_sub(edge.flow));
            }
            total.ok_or(FlowError::CapacityOverflow)
        })
    }

    /// Zero every flow, restoring the network as it was built
    pub fn reset_flow(&mut self) {
        for edge in &mut self.edges {
            edge.flow = 0;
        }
    }

    /// Nodes reachable from `source` through edges with residual capacity
    pub fn reachable_from(&self, source: NodeId) -> Result<Vec<bool>, FlowError> {
        self.check_node(source)?;
        let levels = LevelGraph::build(self, source);
        Ok((0..self.node_count)
            .map(|index| levels.reaches(NodeId(index)))
            .collect())
    }

    /// Maximum flow from `source` to `sink` using Dinic's algorithm
    pub fn max_flow(&mut self, source: NodeId, sink: NodeId) -> Result<Capacity, FlowError> {
        Dinic::new().run(self, source, sink)
    }
}

/// Serialized shape of [`FlowNetwork`], checked before it becomes one
#[derive(Deserialize)]
struct RawFlowNetwork {
    node_count: usize,
    adjacency: Vec<Vec<EdgeId>>,
    edges: Vec<FlowEdge>,
}

impl TryFrom<RawFlowNetwork> for FlowNetwork {
    type Error = FlowError;

    fn try_from(raw: RawFlowNetwork) -> Result<Self, Self::Error> {
        let RawFlowNetwork {
            node_count,
            adjacency,
            edges,
        } = raw;
        let malformed = |reason: String| Err(FlowError::MalformedNetwork(reason));

        if adjacency.len() != node_count {
            return malformed(format!(
                "{} adjacency lists for {} nodes",
                adjacency.len(),
                node_count
            ));
        }
        if edges.len() % 2 != 0 {
            return malformed(format!("{} edge slots cannot be paired", edges.len()));
        }

        let network = Self {
            node_count,
            adjacency: Vec::new(),
            edges: Vec::new(),
        };
        for (index, edge) in edges.iter().enumerate() {
            let id = EdgeId(index);
            network.check_node(edge.from)?;
            network.check_node(edge.to)?;

            let twin = edges.get(edge.reverse.0).ok_or(FlowError::InvalidEdge {
                edge: edge.reverse,
                edge_count: edges.len(),
            })?;
            if edge.reverse.0 != index ^ 1 || twin.from != edge.to || twin.to != edge.from {
                return malformed(format!("{} is not paired with its residual twin", id));
            }
            if twin.flow.checked_neg() != Some(edge.flow) {
                return malformed(format!("{} and its twin carry unbalanced flow", id));
            }
            if id.is_forward() {
                if edge.capacity < 0 {
                    return Err(FlowError::NegativeCapacity {
                        from: edge.from,
                        to: edge.to,
                        capacity: edge.capacity,
                    });
                }
                if edge.flow < 0 || edge.flow > edge.capacity {
                    return malformed(format!("{} carries flow outside its capacity", id));
                }
            } else if edge.capacity != 0 {
                return malformed(format!("residual twin {} has non-zero capacity", id));
            }
        }

        let mut listed = vec![false; edges.len()];
        for (node, list) in adjacency.iter().enumerate() {
            for &id in list {
                let edge = edges.get(id.0).ok_or(FlowError::InvalidEdge {
                    edge: id,
                    edge_count: edges.len(),
                })?;
                if edge.from != NodeId(node) || listed[id.0] {
                    return malformed(format!("{} is misplaced in the adjacency of n{}", id, node));
                }
                listed[id.0] = true;
            }
        }
        if let Some(index) = listed.iter().position(|&seen| !seen) {
            return malformed(format!("{} is missing from the adjacency lists", EdgeId(index)));
        }

        Ok(Self {
            node_count,
            adjacency,
            edges,
        })
    }
}

impl Index<EdgeId> for FlowNetwork {
    type Output = FlowEdge;

    fn index(&self, index: EdgeId) -> &Self::Output {
        &self.edges[index.0]
    }
}
