//! Solver configuration
//!
//! A [`SolverConfig`] can be built in code, deserialized from JSON, or
//! adjusted through the string parameter interface used by front ends that
//! only deal in key/value pairs.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::algorithm::graph::max_flow::MaxFlowVariant;
use crate::algorithm::traits::FlowError;

/// Parameter keys understood by [`SolverConfig::set_parameter`]
pub const PARAMETER_NAMES: [&str; 3] = ["variant", "validate", "collect_min_cut"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Flow driver to run
    pub variant: MaxFlowVariant,
    /// Check capacity, conservation and cut duality after every solve
    pub validate: bool,
    /// Attach the residual min cut to each result
    pub collect_min_cut: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            variant: MaxFlowVariant::Dinic,
            validate: false,
            collect_min_cut: true,
        }
    }
}

impl SolverConfig {
    /// Parse a configuration; missing keys take their default values
    pub fn from_json(json: &str) -> Result<Self, FlowError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, FlowError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn set_parameter(&mut self, name: &str, value: &str) -> Result<(), FlowError> {
        match name {
            "variant" => {
                self.variant = value.parse()?;
                Ok(())
            }
            "validate" => {
                self.validate = parse_flag(name, value)?;
                Ok(())
            }
            "collect_min_cut" => {
                self.collect_min_cut = parse_flag(name, value)?;
                Ok(())
            }
            _ => Err(FlowError::InvalidParameter {
                name: name.to_string(),
                reason: format!("unknown parameter, expected one of {:?}", PARAMETER_NAMES),
            }),
        }
    }

    pub fn get_parameter(&self, name: &str) -> Option<String> {
        match name {
            "variant" => Some(variant_key(self.variant).to_string()),
            "validate" => Some(self.validate.to_string()),
            "collect_min_cut" => Some(self.collect_min_cut.to_string()),
            _ => None,
        }
    }

    pub fn parameters(&self) -> HashMap<String, String> {
        PARAMETER_NAMES
            .iter()
            .filter_map(|&name| self.get_parameter(name).map(|value| (name.to_string(), value)))
            .collect()
    }
}

fn variant_key(variant: MaxFlowVariant) -> &'static str {
    match variant {
        MaxFlowVariant::Dinic => "dinic",
        MaxFlowVariant::EdmondsKarp => "edmonds_karp",
    }
}

fn parse_flag(name: &str, value: &str) -> Result<bool, FlowError> {
    value.parse::<bool>().map_err(|_| FlowError::InvalidParameter {
        name: name.to_string(),
        reason: format!("expected true or false, got '{}'", value),
    })
}
