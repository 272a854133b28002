//! Flow Correctness Verification
//!
//! Post-hoc checks over the residual state a flow driver leaves behind:
//!
//! - every caller-added edge satisfies `0 <= flow <= capacity`
//! - every edge and its residual twin carry opposite flows
//! - every node other than source and sink conserves flow
//! - net outflow at the source equals net inflow at the sink and the claimed value
//! - the cut induced by residual reachability has exactly that capacity
//!   (max-flow/min-cut duality)
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use log::warn;
use serde::{Deserialize, Serialize};

use crate::algorithm::graph::min_cut::min_cut;
use crate::algorithm::traits::{Capacity, EdgeId, FlowError, NodeId};
use crate::data_structures::graph::FlowNetwork;

/// Outcome of a verification pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Forward edges with negative flow or flow above capacity
    pub capacity_violations: Vec<EdgeId>,
    /// Forward edges whose twin does not carry the opposite flow
    pub pairing_violations: Vec<EdgeId>,
    /// Interior nodes with non-zero net outflow
    pub conservation_violations: Vec<NodeId>,
    pub claimed_flow: Capacity,
    pub source_outflow: Capacity,
    pub sink_inflow: Capacity,
    pub cut_capacity: Capacity,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.first_violation().is_none()
    }

    /// Human-readable description of the first failed check
    pub fn first_violation(&self) -> Option<String> {
        if let Some(edge) = self.capacity_violations.first() {
            return Some(format!("edge {} violates its capacity bounds", edge));
        }
        if let Some(edge) = self.pairing_violations.first() {
            return Some(format!("edge {} and its residual twin disagree", edge));
        }
        if let Some(node) = self.conservation_violations.first() {
            return Some(format!("node {} does not conserve flow", node));
        }
        if self.source_outflow != self.claimed_flow {
            return Some(format!(
                "source emits {} but the claimed flow is {}",
                self.source_outflow, self.claimed_flow
            ));
        }
        if self.sink_inflow != self.claimed_flow {
            return Some(format!(
                "sink absorbs {} but the claimed flow is {}",
                self.sink_inflow, self.claimed_flow
            ));
        }
        if self.cut_capacity != self.claimed_flow {
            return Some(format!(
                "residual cut has capacity {} but the claimed flow is {}",
                self.cut_capacity, self.claimed_flow
            ));
        }
        None
    }
}

/// Verifier for flows left in a [`FlowNetwork`]
pub struct FlowValidator;

impl FlowValidator {
    /// Check the network's current flow against `claimed`, the total flow
    /// expected to leave `source`.
    pub fn check(
        network: &FlowNetwork,
        source: NodeId,
        sink: NodeId,
        claimed: Capacity,
    ) -> Result<ValidationReport, FlowError> {
        network.check_terminals(source, sink)?;

        let mut report = ValidationReport {
            claimed_flow: claimed,
            ..ValidationReport::default()
        };

        let mut net_outflow: Vec<Capacity> = vec![0; network.node_count()];
        for (id, edge) in network.forward_edges() {
            if edge.flow < 0 || edge.flow > edge.capacity {
                report.capacity_violations.push(id);
            }
            if network[edge.reverse].flow != -edge.flow {
                report.pairing_violations.push(id);
            }
            net_outflow[edge.from.0] = net_outflow[edge.from.0]
                .checked_add(edge.flow)
                .ok_or(FlowError::CapacityOverflow)?;
            net_outflow[edge.to.0] = net_outflow[edge.to.0]
                .checked_sub(edge.flow)
                .ok_or(FlowError::CapacityOverflow)?;
        }

        report.conservation_violations = net_outflow
            .iter()
            .enumerate()
            .filter(|&(index, &balance)| {
                let node = NodeId(index);
                node != source && node != sink && balance != 0
            })
            .map(|(index, _)| NodeId(index))
            .collect();

        report.source_outflow = net_outflow[source.0];
        report.sink_inflow = net_outflow[sink.0]
            .checked_neg()
            .ok_or(FlowError::CapacityOverflow)?;
        report.cut_capacity = min_cut(network, source)?.capacity;

        if let Some(violation) = report.first_violation() {
            warn!("flow validation failed: {}", violation);
        }
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::graph::max_flow::MaxFlowVariant;

    fn scenario() -> FlowNetwork {
        let mut network = FlowNetwork::new(4);
        network.add_edge(NodeId(0), NodeId(1), 3).unwrap();
        network.add_edge(NodeId(0), NodeId(2), 2).unwrap();
        network.add_edge(NodeId(1), NodeId(3), 2).unwrap();
        network.add_edge(NodeId(2), NodeId(3), 3).unwrap();
        network.add_edge(NodeId(1), NodeId(2), 1).unwrap();
        network
    }

    #[test]
    fn test_valid_max_flow() {
        for variant in [MaxFlowVariant::Dinic, MaxFlowVariant::EdmondsKarp] {
            let mut network = scenario();
            let flow = variant
                .strategy()
                .run(&mut network, NodeId(0), NodeId(3))
                .unwrap();

            let report = FlowValidator::check(&network, NodeId(0), NodeId(3), flow).unwrap();
            assert!(report.is_valid(), "{:?}", report);
            assert_eq!(report.source_outflow, 5);
            assert_eq!(report.sink_inflow, 5);
            assert_eq!(report.cut_capacity, 5);
        }
    }

    #[test]
    fn test_wrong_claim_is_reported() {
        let mut network = scenario();
        network.max_flow(NodeId(0), NodeId(3)).unwrap();

        let report = FlowValidator::check(&network, NodeId(0), NodeId(3), 4).unwrap();
        assert!(!report.is_valid());
        assert!(report.first_violation().unwrap().contains("source emits 5"));
    }

    #[test]
    fn test_non_maximum_flow_breaks_duality() {
        let mut network = FlowNetwork::new(3);
        let first = network.add_edge(NodeId(0), NodeId(1), 4).unwrap();
        let second = network.add_edge(NodeId(1), NodeId(2), 4).unwrap();
        network.push_flow(first, 1);
        network.push_flow(second, 1);

        let report = FlowValidator::check(&network, NodeId(0), NodeId(2), 1).unwrap();
        assert!(report.conservation_violations.is_empty());
        assert_eq!(report.cut_capacity, 0);
        assert!(report.first_violation().unwrap().contains("residual cut"));
    }

    #[test]
    fn test_conservation_violation() {
        let mut network = scenario();
        let into_a = network.add_edge(NodeId(0), NodeId(1), 1).unwrap();
        network.push_flow(into_a, 1);

        let report = FlowValidator::check(&network, NodeId(0), NodeId(3), 1).unwrap();
        assert_eq!(report.conservation_violations, vec![NodeId(1)]);
        assert!(report.capacity_violations.is_empty());
        assert!(report.pairing_violations.is_empty());
    }

    #[test]
    fn test_empty_network_is_valid() {
        let network = FlowNetwork::new(2);
        let report = FlowValidator::check(&network, NodeId(0), NodeId(1), 0).unwrap();
        assert!(report.is_valid());
    }

    #[test]
    fn test_invalid_terminals() {
        let network = FlowNetwork::new(2);
        assert!(FlowValidator::check(&network, NodeId(0), NodeId(0), 0).is_err());
    }

    #[test]
    fn test_overflowing_totals_are_errors() {
        let mut network = FlowNetwork::new(4);
        network.add_edge(NodeId(0), NodeId(1), Capacity::MAX).unwrap();
        network.add_edge(NodeId(0), NodeId(2), Capacity::MAX).unwrap();
        network.add_edge(NodeId(1), NodeId(3), Capacity::MAX).unwrap();
        network.add_edge(NodeId(2), NodeId(3), Capacity::MAX).unwrap();
        assert!(network.max_flow(NodeId(0), NodeId(3)).is_err());

        assert!(matches!(
            FlowValidator::check(&network, NodeId(0), NodeId(3), Capacity::MAX),
            Err(FlowError::CapacityOverflow)
        ));
    }
}
