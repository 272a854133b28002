//! Minimum cut extraction from a saturated residual network
//!
//! After a maximum flow, the nodes still reachable from the source through
//! residual capacity form the source side of a minimum cut. The caller-added
//! edges leaving that side are exactly the saturated edges of the cut, and
//! their capacities sum to the flow value.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use serde::{Deserialize, Serialize};

use crate::algorithm::traits::{Capacity, EdgeId, FlowError, NodeId};
use crate::data_structures::graph::FlowNetwork;

/// Source/sink partition with the edges crossing it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinCut {
    /// Nodes on the source side, ascending
    pub source_side: Vec<NodeId>,
    /// Caller-added edges from the source side to the sink side
    pub cut_edges: Vec<EdgeId>,
    /// Sum of capacities over `cut_edges`
    pub capacity: Capacity,
}

impl MinCut {
    pub fn contains(&self, node: NodeId) -> bool {
        self.source_side.binary_search(&node).is_ok()
    }

    /// Nodes on the sink side of the partition
    pub fn sink_side(&self, network: &FlowNetwork) -> Vec<NodeId> {
        (0..network.node_count())
            .map(NodeId)
            .filter(|&node| !self.contains(node))
            .collect()
    }
}

/// Cut induced by residual reachability from `source`
///
/// Meaningful as a minimum cut once a maximum flow has been pushed; on a
/// network with spare capacity it still returns a valid, possibly empty, cut.
pub fn min_cut(network: &FlowNetwork, source: NodeId) -> Result<MinCut, FlowError> {
    let reachable = network.reachable_from(source)?;

    let source_side: Vec<NodeId> = reachable
        .iter()
        .enumerate()
        .filter(|&(_, &reached)| reached)
        .map(|(index, _)| NodeId(index))
        .collect();

    let mut cut_edges = Vec::new();
    let mut capacity: Capacity = 0;
    for (id, edge) in network.forward_edges() {
        if reachable[edge.from.0] && !reachable[edge.to.0] {
            cut_edges.push(id);
            capacity = capacity
                .checked_add(edge.capacity)
                .ok_or(FlowError::CapacityOverflow)?;
        }
    }

    Ok(MinCut {
        source_side,
        cut_edges,
        capacity,
    })
}
