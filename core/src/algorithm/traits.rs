//! Core type definitions for the flow engine
//!
//! This module establishes the handle types, the integer capacity domain,
//! the error taxonomy, and the strategy trait shared by every maximum flow
//! driver in the crate.
//!
//! # Capacity Domain
//! Capacities and flows are `i64`. The sum of capacities leaving the source
//! must fit in `i64`; drivers accumulate with checked arithmetic and report
//! [`FlowError::CapacityOverflow`] instead of wrapping.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::fmt::{self, Debug, Display};

use serde::{Deserialize, Serialize};

use crate::data_structures::graph::FlowNetwork;

/// Integer capacity and flow type
pub type Capacity = i64;

/// Node identifier ensuring type safety and preventing mixing with other numeric types
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub struct NodeId(pub usize);

impl NodeId {
    #[inline]
    pub fn as_usize(self) -> usize {
        self.0
    }
}

impl From<usize> for NodeId {
    fn from(index: usize) -> Self {
        Self(index)
    }
}

impl Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

/// Handle into the edge arena of a [`FlowNetwork`]
///
/// Forward edges occupy even slots and their paired residual edges the odd
/// slot directly after them.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub struct EdgeId(pub usize);

impl EdgeId {
    #[inline]
    pub fn as_usize(self) -> usize {
        self.0
    }

    /// Whether this handle names a caller-added edge rather than a residual twin
    #[inline]
    pub fn is_forward(self) -> bool {
        self.0 % 2 == 0
    }
}

impl Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "e{}", self.0)
    }
}

/// Errors raised by network construction, flow computation and configuration
///
/// Every variant except `CapacityOverflow` and `InvariantViolation` is a
/// caller precondition violation, reported before any mutation happens.
#[derive(Debug, thiserror::Error)]
pub enum FlowError {
    #[error("Invalid node: {node} (network has {node_count} nodes)")]
    InvalidNode { node: NodeId, node_count: usize },

    #[error("Negative capacity {capacity} on edge {from} -> {to}")]
    NegativeCapacity {
        from: NodeId,
        to: NodeId,
        capacity: Capacity,
    },

    #[error("Source and sink must differ, both are {0}")]
    SourceIsSink(NodeId),

    #[error("Invalid edge: {edge} (network has {edge_count} edge slots)")]
    InvalidEdge { edge: EdgeId, edge_count: usize },

    #[error("Accumulated flow exceeds the i64 capacity domain")]
    CapacityOverflow,

    #[error("Malformed network: {0}")]
    MalformedNetwork(String),

    #[error("Invalid parameter: {name} - {reason}")]
    InvalidParameter { name: String, reason: String },

    #[error("Configuration error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("Flow invariant violated: {0}")]
    InvariantViolation(String),
}

/// Per-run counters collected by a flow driver
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowMetrics {
    /// BFS phases that reached the sink
    pub phases: usize,
    /// Augmenting paths saturated across all phases
    pub augmenting_paths: usize,
    /// Adjacency entries examined by BFS and DFS combined
    pub edge_scans: usize,
}

/// Maximum flow driver contract
///
/// Implementations are interchangeable: on the same network every strategy
/// returns the same flow value, though the residual state they leave behind
/// may route that flow along different paths.
pub trait MaxFlowStrategy: Debug {
    /// Returns the strategy's descriptive name
    fn name(&self) -> &'static str;

    /// Returns the worst-case running time in Big-O notation
    fn complexity(&self) -> &'static str;

    /// Pushes as much additional flow from `source` to `sink` as the residual
    /// network admits and returns the amount pushed by this call.
    ///
    /// A network that is already saturated yields `Ok(0)`.
    fn run(
        &mut self,
        network: &mut FlowNetwork,
        source: NodeId,
        sink: NodeId,
    ) -> Result<Capacity, FlowError>;

    /// Counters from the most recent [`run`](Self::run)
    fn metrics(&self) -> FlowMetrics;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_id_type_safety() {
        let node1 = NodeId(42);
        let node2 = NodeId::from(42);
        let node3 = NodeId(43);

        assert_eq!(node1, node2);
        assert_ne!(node1, node3);
        assert_eq!(node1.as_usize(), 42);
        assert_eq!(node1.to_string(), "n42");
    }

    #[test]
    fn test_edge_id_parity() {
        assert!(EdgeId(0).is_forward());
        assert!(!EdgeId(1).is_forward());
        assert!(EdgeId(6).is_forward());
        assert_eq!(EdgeId(7).to_string(), "e7");
    }

    #[test]
    fn test_error_messages() {
        let err = FlowError::InvalidNode {
            node: NodeId(9),
            node_count: 4,
        };
        assert_eq!(err.to_string(), "Invalid node: n9 (network has 4 nodes)");

        let err = FlowError::NegativeCapacity {
            from: NodeId(0),
            to: NodeId(1),
            capacity: -3,
        };
        assert_eq!(err.to_string(), "Negative capacity -3 on edge n0 -> n1");
    }
}
