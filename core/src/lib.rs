//! FLOWNET core: maximum flow over directed networks with integer capacities
//!
//! Callers build a [`FlowNetwork`] with repeated
//! [`add_edge`](FlowNetwork::add_edge) calls, run a driver, and read the
//! residual state back to recover matchings or cuts.
//!
//! ```
//! use flownet_core::{FlowNetwork, NodeId};
//!
//! let mut network = FlowNetwork::new(4);
//! network.add_edge(NodeId(0), NodeId(1), 3)?;
//! network.add_edge(NodeId(0), NodeId(2), 2)?;
//! network.add_edge(NodeId(1), NodeId(3), 2)?;
//! network.add_edge(NodeId(2), NodeId(3), 3)?;
//! network.add_edge(NodeId(1), NodeId(2), 1)?;
//!
//! assert_eq!(network.max_flow(NodeId(0), NodeId(3))?, 5);
//! assert_eq!(network.max_flow(NodeId(0), NodeId(3))?, 0);
//! # Ok::<(), flownet_core::FlowError>(())
//! ```
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod algorithm;
pub mod data_structures;
pub mod validation;

pub use crate::algorithm::{
    min_cut, BipartiteMatching, Capacity, Dinic, EdgeId, EdmondsKarp, FlowError, FlowMetrics,
    Matching, MaxFlowResult, MaxFlowSolver, MaxFlowStrategy, MaxFlowVariant, MinCut, NodeId,
    SolverConfig,
};
pub use crate::data_structures::{FlowEdge, FlowNetwork};
pub use crate::validation::{FlowValidator, ValidationReport};
