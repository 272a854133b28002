//! Flow algorithms over residual networks
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod level;
pub mod blocking_flow;
pub mod max_flow;
pub mod min_cut;
pub mod matching;

pub use self::level::LevelGraph;
pub use self::blocking_flow::BlockingFlowSearch;
pub use self::max_flow::{Dinic, EdmondsKarp, MaxFlowResult, MaxFlowSolver, MaxFlowVariant};
pub use self::min_cut::{min_cut, MinCut};
pub use self::matching::{BipartiteMatching, Matching};
