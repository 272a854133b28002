//! Verification of computed flows
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod correctness;

pub use self::correctness::{FlowValidator, ValidationReport};
