//! Maximum Bipartite Matching over the flow engine
//!
//! Builds the unit-capacity network every assignment puzzle reduces to:
//! a source feeding each left vertex, one edge per admissible pair, and each
//! right vertex draining into a sink. The maximum flow equals the size of a
//! maximum matching, and the matched pairs are the pair edges left carrying
//! flow.
//!
//! Node layout: source `0`, left vertices `1..=left`, right vertices
//! `left + 1..=left + right`, sink `left + right + 1`.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use log::debug;
use serde::{Deserialize, Serialize};

use crate::algorithm::graph::max_flow::MaxFlowVariant;
use crate::algorithm::traits::{EdgeId, FlowError, NodeId};
use crate::data_structures::graph::FlowNetwork;

/// Matched `(left, right)` index pairs, ordered by insertion of the pair
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Matching {
    pub pairs: Vec<(usize, usize)>,
}

impl Matching {
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn partner_of_left(&self, left: usize) -> Option<usize> {
        self.pairs.iter().find(|&&(l, _)| l == left).map(|&(_, r)| r)
    }

    pub fn partner_of_right(&self, right: usize) -> Option<usize> {
        self.pairs.iter().find(|&&(_, r)| r == right).map(|&(l, _)| l)
    }
}

/// Candidate edge between a left and a right vertex
#[derive(Debug, Clone, Copy)]
struct PairEdge {
    left: usize,
    right: usize,
    edge: EdgeId,
}

/// Bipartite matching problem backed by a unit-capacity flow network
#[derive(Debug, Clone)]
pub struct BipartiteMatching {
    left: usize,
    right: usize,
    variant: MaxFlowVariant,
    network: FlowNetwork,
    pairs: Vec<PairEdge>,
}

impl BipartiteMatching {
    /// Create a problem with `left` and `right` vertices and no pairs
    pub fn new(left: usize, right: usize) -> Self {
        let mut network = FlowNetwork::new(left + right + 2);
        let source = NodeId(0);
        let sink = NodeId(left + right + 1);

        for l in 0..left {
            network.insert_edge(source, NodeId(1 + l), 1);
        }
        for r in 0..right {
            network.insert_edge(NodeId(1 + left + r), sink, 1);
        }

        Self {
            left,
            right,
            variant: MaxFlowVariant::Dinic,
            network,
            pairs: Vec::new(),
        }
    }

    /// Choose the flow driver used by [`solve`](Self::solve)
    pub fn with_variant(mut self, variant: MaxFlowVariant) -> Self {
        self.variant = variant;
        self
    }

    pub fn source(&self) -> NodeId {
        NodeId(0)
    }

    pub fn sink(&self) -> NodeId {
        NodeId(self.left + self.right + 1)
    }

    /// Underlying flow network, for cut or residual inspection
    pub fn network(&self) -> &FlowNetwork {
        &self.network
    }

    /// Allow `left` to be matched with `right`
    ///
    /// Duplicate pairs are accepted; at most one of them can carry flow.
    pub fn add_pair(&mut self, left: usize, right: usize) -> Result<(), FlowError> {
        if left >= self.left {
            return Err(FlowError::InvalidNode {
                node: NodeId(left),
                node_count: self.left,
            });
        }
        if right >= self.right {
            return Err(FlowError::InvalidNode {
                node: NodeId(right),
                node_count: self.right,
            });
        }

        let edge = self
            .network
            .insert_edge(NodeId(1 + left), NodeId(1 + self.left + right), 1);
        self.pairs.push(PairEdge { left, right, edge });
        Ok(())
    }

    /// Compute a maximum matching
    ///
    /// Calling this again extends nothing: the result reflects the flow
    /// already in the network.
    pub fn solve(&mut self) -> Result<Matching, FlowError> {
        let (source, sink) = (self.source(), self.sink());
        let added = self.variant.strategy().run(&mut self.network, source, sink)?;

        let pairs: Vec<(usize, usize)> = self
            .pairs
            .iter()
            .filter(|pair| self.network[pair.edge].flow > 0)
            .map(|pair| (pair.left, pair.right))
            .collect();

        debug!(
            "{} matching: {} of {} left vertices matched ({} new)",
            self.variant,
            pairs.len(),
            self.left,
            added
        );
        Ok(Matching { pairs })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn assert_is_matching(matching: &Matching) {
        let lefts: HashSet<usize> = matching.pairs.iter().map(|&(l, _)| l).collect();
        let rights: HashSet<usize> = matching.pairs.iter().map(|&(_, r)| r).collect();
        assert_eq!(lefts.len(), matching.len());
        assert_eq!(rights.len(), matching.len());
    }

    #[test]
    fn test_disjoint_pairs_match_perfectly() {
        let mut problem = BipartiteMatching::new(3, 3);
        for i in 0..3 {
            problem.add_pair(i, i).unwrap();
        }

        let matching = problem.solve().unwrap();
        assert_eq!(matching.len(), 3);
        assert_eq!(matching.pairs, vec![(0, 0), (1, 1), (2, 2)]);
    }

    #[test]
    fn test_augmenting_path_reassigns_partner() {
        for variant in [MaxFlowVariant::Dinic, MaxFlowVariant::EdmondsKarp] {
            let mut problem = BipartiteMatching::new(2, 2).with_variant(variant);
            problem.add_pair(0, 0).unwrap();
            problem.add_pair(0, 1).unwrap();
            problem.add_pair(1, 0).unwrap();

            let matching = problem.solve().unwrap();
            assert_eq!(matching.len(), 2);
            assert_eq!(matching.partner_of_left(0), Some(1));
            assert_eq!(matching.partner_of_left(1), Some(0));
            assert_eq!(matching.partner_of_right(1), Some(0));
        }
    }

    #[test]
    fn test_rook_segments() {
        // Board ".X" / "..": horizontal runs H0 = row 0, H1 = row 1;
        // vertical runs V0 = column 0, V1 = row 1 of column 1.
        // A run pair is admissible when both runs share a free square.
        let mut problem = BipartiteMatching::new(2, 2);
        problem.add_pair(0, 0).unwrap();
        problem.add_pair(1, 0).unwrap();
        problem.add_pair(1, 1).unwrap();

        let matching = problem.solve().unwrap();
        assert_eq!(matching.len(), 2);
        assert_is_matching(&matching);
    }

    #[test]
    fn test_star_graph_matches_once() {
        let mut problem = BipartiteMatching::new(1, 4);
        for r in 0..4 {
            problem.add_pair(0, r).unwrap();
        }
        problem.add_pair(0, 2).unwrap();

        let matching = problem.solve().unwrap();
        assert_eq!(matching.len(), 1);
        assert_eq!(problem.solve().unwrap(), matching);
    }

    #[test]
    fn test_empty_problem() {
        let mut problem = BipartiteMatching::new(0, 0);
        let matching = problem.solve().unwrap();
        assert!(matching.is_empty());
        assert_eq!(problem.network().node_count(), 2);
    }

    #[test]
    fn test_out_of_range_pair() {
        let mut problem = BipartiteMatching::new(2, 1);
        assert!(matches!(
            problem.add_pair(2, 0),
            Err(FlowError::InvalidNode { node: NodeId(2), node_count: 2 })
        ));
        assert!(matches!(
            problem.add_pair(0, 1),
            Err(FlowError::InvalidNode { node: NodeId(1), node_count: 1 })
        ));
        assert_eq!(problem.network().edge_count(), 3);
    }

    #[test]
    fn test_larger_grid_matching() {
        // Left i may take right i or i + 1; a perfect matching exists
        let n = 50;
        let mut problem = BipartiteMatching::new(n, n);
        for i in 0..n {
            problem.add_pair(i, i).unwrap();
            if i + 1 < n {
                problem.add_pair(i, i + 1).unwrap();
            }
        }

        let matching = problem.solve().unwrap();
        assert_eq!(matching.len(), n);
        assert_is_matching(&matching);
    }
}
