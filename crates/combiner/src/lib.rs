//! YAML rule file aggregation for CI pipelines.
//!
//! This crate provides:
//! - A [`Combiner`] that merges every rule file in a directory into one
//!   combined document, in lexicographic filename order
//! - A block-style YAML emitter that keeps sequence items indented under
//!   their parent key
//! - Error taxonomy distinguishing I/O, parse, and schema failures

pub mod combiner;
pub mod emit;
pub mod error;

pub use combiner::{CombineReport, CombinedDocument, Combiner, CombinerConfig, RuleDocument};
pub use error::{CombineError, Result};
