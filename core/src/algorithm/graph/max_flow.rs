//! Maximum Flow Algorithm Implementation
//!
//! This module implements the flow drivers that orchestrate BFS layering and
//! augmentation until the sink becomes unreachable in the residual graph.
//! Two interchangeable strategies share the [`MaxFlowStrategy`] contract:
//!
//! - [`Dinic`]: one blocking flow per BFS phase, `O(V² · E)` in general and
//!   `O(E · √V)` on unit-capacity bipartite networks.
//! - [`EdmondsKarp`]: one shortest augmenting path per BFS phase, `O(V · E²)`.
//!
//! Both leave the residual state of the network consistent with a valid
//! maximum flow, so callers can read matchings or cuts back afterwards.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::fmt::{self, Display};
use std::str::FromStr;

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::algorithm::config::SolverConfig;
use crate::algorithm::graph::blocking_flow::BlockingFlowSearch;
use crate::algorithm::graph::level::LevelGraph;
use crate::algorithm::graph::min_cut::{min_cut, MinCut};
use crate::algorithm::traits::{Capacity, FlowError, FlowMetrics, MaxFlowStrategy, NodeId};
use crate::data_structures::graph::FlowNetwork;
use crate::validation::correctness::FlowValidator;

/// Maximum flow algorithm variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaxFlowVariant {
    /// Level graph with blocking flow per phase
    #[default]
    Dinic,
    /// BFS shortest augmenting path per phase
    EdmondsKarp,
}

impl MaxFlowVariant {
    pub fn name(self) -> &'static str {
        match self {
            MaxFlowVariant::Dinic => "Dinic",
            MaxFlowVariant::EdmondsKarp => "Edmonds-Karp",
        }
    }

    /// Fresh driver for this variant
    pub fn strategy(self) -> Box<dyn MaxFlowStrategy> {
        match self {
            MaxFlowVariant::Dinic => Box::new(Dinic::new()),
            MaxFlowVariant::EdmondsKarp => Box::new(EdmondsKarp::new()),
        }
    }
}

impl Display for MaxFlowVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MaxFlowVariant {
    type Err = FlowError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "dinic" => Ok(MaxFlowVariant::Dinic),
            "edmonds_karp" | "edmonds-karp" | "edmondskarp" => Ok(MaxFlowVariant::EdmondsKarp),
            other => Err(FlowError::InvalidParameter {
                name: "variant".to_string(),
                reason: format!("unknown max flow variant '{}'", other),
            }),
        }
    }
}

/// Dinic's algorithm: BFS layering followed by a blocking flow per phase
#[derive(Debug, Clone, Default)]
pub struct Dinic {
    metrics: FlowMetrics,
}

impl Dinic {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MaxFlowStrategy for Dinic {
    fn name(&self) -> &'static str {
        MaxFlowVariant::Dinic.name()
    }

    fn complexity(&self) -> &'static str {
        "O(V^2 * E)"
    }

    fn run(
        &mut self,
        network: &mut FlowNetwork,
        source: NodeId,
        sink: NodeId,
    ) -> Result<Capacity, FlowError> {
        network.check_terminals(source, sink)?;
        self.metrics = FlowMetrics::default();

        debug!(
            "Dinic: {} nodes, {} edges, {} -> {}",
            network.node_count(),
            network.edge_count(),
            source,
            sink
        );

        let mut total: Capacity = 0;
        loop {
            let levels = LevelGraph::build(network, source);
            self.metrics.edge_scans += levels.edge_scans();
            if !levels.reaches(sink) {
                break;
            }
            self.metrics.phases += 1;

            let mut search = BlockingFlowSearch::new(network, &levels, sink);
            let mut phase_flow: Capacity = 0;
            loop {
                let pushed = search.augment(source, Capacity::MAX);
                if pushed == 0 {
                    break;
                }
                self.metrics.augmenting_paths += 1;
                phase_flow = phase_flow
                    .checked_add(pushed)
                    .ok_or(FlowError::CapacityOverflow)?;
            }
            self.metrics.edge_scans += search.edge_scans();

            trace!(
                "phase {}: sink at level {:?}, {} nodes layered, pushed {}",
                self.metrics.phases,
                levels.level(sink),
                levels.reached_count(),
                phase_flow
            );
            total = total
                .checked_add(phase_flow)
                .ok_or(FlowError::CapacityOverflow)?;
        }

        debug!(
            "Dinic finished: flow {} in {} phases ({} paths)",
            total, self.metrics.phases, self.metrics.augmenting_paths
        );
        Ok(total)
    }

    fn metrics(&self) -> FlowMetrics {
        self.metrics
    }
}

/// Edmonds-Karp: a single shortest augmenting path per BFS phase
#[derive(Debug, Clone, Default)]
pub struct EdmondsKarp {
    metrics: FlowMetrics,
}

impl EdmondsKarp {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MaxFlowStrategy for EdmondsKarp {
    fn name(&self) -> &'static str {
        MaxFlowVariant::EdmondsKarp.name()
    }

    fn complexity(&self) -> &'static str {
        "O(V * E^2)"
    }

    fn run(
        &mut self,
        network: &mut FlowNetwork,
        source: NodeId,
        sink: NodeId,
    ) -> Result<Capacity, FlowError> {
        network.check_terminals(source, sink)?;
        self.metrics = FlowMetrics::default();

        debug!(
            "Edmonds-Karp: {} nodes, {} edges, {} -> {}",
            network.node_count(),
            network.edge_count(),
            source,
            sink
        );

        let mut total: Capacity = 0;
        loop {
            let levels = LevelGraph::build(network, source);
            self.metrics.edge_scans += levels.edge_scans();

            let Some(path) = levels.path_to(network, sink) else {
                break;
            };
            let Some(bottleneck) = path
                .iter()
                .map(|&id| network[id].residual_capacity())
                .min()
            else {
                break;
            };

            for &id in &path {
                network.push_flow(id, bottleneck);
            }
            self.metrics.phases += 1;
            self.metrics.augmenting_paths += 1;

            trace!(
                "phase {}: path of {} edges, bottleneck {}",
                self.metrics.phases,
                path.len(),
                bottleneck
            );
            total = total
                .checked_add(bottleneck)
                .ok_or(FlowError::CapacityOverflow)?;
        }

        debug!(
            "Edmonds-Karp finished: flow {} in {} phases",
            total, self.metrics.phases
        );
        Ok(total)
    }

    fn metrics(&self) -> FlowMetrics {
        self.metrics
    }
}

/// Maximum flow result with cut and performance information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaxFlowResult {
    /// Flow pushed by this run
    pub max_flow: Capacity,
    /// Driver that produced the flow
    pub variant: MaxFlowVariant,
    /// Cut induced by residual reachability from the source
    pub min_cut: Option<MinCut>,
    /// Driver counters
    pub metrics: FlowMetrics,
}

/// Configurable front end over the flow drivers
#[derive(Debug, Clone, Default)]
pub struct MaxFlowSolver {
    config: SolverConfig,
    metrics: FlowMetrics,
}

impl MaxFlowSolver {
    /// Create new maximum flow solver with specified algorithm
    pub fn new(variant: MaxFlowVariant) -> Self {
        Self::with_config(SolverConfig {
            variant,
            ..SolverConfig::default()
        })
    }

    pub fn with_config(config: SolverConfig) -> Self {
        Self {
            config,
            metrics: FlowMetrics::default(),
        }
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    pub fn variant(&self) -> MaxFlowVariant {
        self.config.variant
    }

    pub fn set_parameter(&mut self, name: &str, value: &str) -> Result<(), FlowError> {
        self.config.set_parameter(name, value)
    }

    pub fn get_parameter(&self, name: &str) -> Option<String> {
        self.config.get_parameter(name)
    }

    /// Counters from the most recent solve
    pub fn metrics(&self) -> FlowMetrics {
        self.metrics
    }

    /// Run the configured driver on `network` and collect the result.
    ///
    /// With `validate` set, the residual state is checked afterwards and any
    /// broken invariant is reported as [`FlowError::InvariantViolation`].
    pub fn solve(
        &mut self,
        network: &mut FlowNetwork,
        source: NodeId,
        sink: NodeId,
    ) -> Result<MaxFlowResult, FlowError> {
        network.check_terminals(source, sink)?;
        let prior = network.net_outflow(source)?;

        let mut strategy = self.config.variant.strategy();
        let max_flow = strategy.run(network, source, sink)?;
        self.metrics = strategy.metrics();

        if self.config.validate {
            let expected = prior
                .checked_add(max_flow)
                .ok_or(FlowError::CapacityOverflow)?;
            let report = FlowValidator::check(network, source, sink, expected)?;
            if let Some(violation) = report.first_violation() {
                return Err(FlowError::InvariantViolation(violation));
            }
        }

        let min_cut = if self.config.collect_min_cut {
            Some(min_cut(network, source)?)
        } else {
            None
        };

        Ok(MaxFlowResult {
            max_flow,
            variant: self.config.variant,
            min_cut,
            metrics: self.metrics,
        })
    }
}
