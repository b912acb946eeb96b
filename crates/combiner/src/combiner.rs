//! Core [`Combiner`]: merges the rule files in a directory into one
//! combined document.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_yaml::Value;
use tracing::info;

use crate::emit::to_block_yaml;
use crate::error::{CombineError, Result};

/// Where to read rule files from and what to call the combined output.
///
/// All paths and names are explicit so the combiner can run against any
/// directory (CI checkout, temp dir in tests) without ambient state.
#[derive(Debug, Clone)]
pub struct CombinerConfig {
    /// Directory scanned (non-recursively) for rule files.
    pub rules_dir: PathBuf,
    /// Filename of the combined document, written into `rules_dir`.
    pub output_filename: String,
}

/// A single rule file: a mapping with a required `rules` sequence.
///
/// Rule entries are opaque; their schema is not inspected. Sibling keys
/// next to `rules` are ignored.
#[derive(Debug)]
pub struct RuleDocument {
    pub rules: Vec<Value>,
}

/// The combined document: one top-level `rules` sequence.
#[derive(Debug, Serialize)]
pub struct CombinedDocument {
    pub rules: Vec<Value>,
}

/// Summary of a successful combine run.
#[derive(Debug)]
pub struct CombineReport {
    /// Input files consumed, in processing order.
    pub inputs: Vec<PathBuf>,
    /// Total number of rules in the combined document.
    pub rule_count: usize,
    /// Path the combined document was written to.
    pub output_path: PathBuf,
}

/// Merges every rule file in a directory into one combined rule file.
pub struct Combiner {
    config: CombinerConfig,
}

impl Combiner {
    pub fn new(config: CombinerConfig) -> Self {
        Self { config }
    }

    /// Merge every rule file in the configured directory.
    ///
    /// Inputs are processed in lexicographic filename order so the output
    /// is stable regardless of how the platform orders directory entries.
    /// The output filename is excluded from the inputs, so re-running over
    /// a directory that already contains a combined document does not fold
    /// the previous output back into itself.
    ///
    /// The first malformed input aborts the run before anything is
    /// written; a pre-existing output file is left untouched on failure.
    pub fn combine(&self) -> Result<CombineReport> {
        let inputs = self.input_files()?;

        let mut rules = Vec::new();
        for path in &inputs {
            let doc = self.load_document(path)?;
            info!(path = %path.display(), count = doc.rules.len(), "merged rule file");
            rules.extend(doc.rules);
        }

        let rule_count = rules.len();
        let combined = CombinedDocument { rules };
        let value =
            serde_yaml::to_value(&combined).map_err(|e| CombineError::Serialize(e.to_string()))?;
        let yaml = to_block_yaml(&value)?;

        let output_path = self.config.rules_dir.join(&self.config.output_filename);
        fs::write(&output_path, yaml)?;

        info!(
            path = %output_path.display(),
            rule_count,
            inputs = inputs.len(),
            "wrote combined rule file"
        );

        Ok(CombineReport {
            inputs,
            rule_count,
            output_path,
        })
    }

    /// Enumerate candidate input files.
    ///
    /// Regular files only; subdirectories, dotfiles, and the configured
    /// output filename are skipped. Sorted lexicographically.
    fn input_files(&self) -> Result<Vec<PathBuf>> {
        let mut inputs = Vec::new();
        for entry in fs::read_dir(&self.config.rules_dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let path = entry.path();
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if name.starts_with('.') || name == self.config.output_filename {
                continue;
            }
            inputs.push(path);
        }
        inputs.sort();
        Ok(inputs)
    }

    /// Parse one rule file and extract its `rules` sequence.
    pub fn load_document(&self, path: &Path) -> Result<RuleDocument> {
        let contents = fs::read_to_string(path)?;
        let value: Value = serde_yaml::from_str(&contents).map_err(|source| CombineError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        let Value::Mapping(mut map) = value else {
            return Err(CombineError::Schema {
                path: path.to_path_buf(),
                detail: "document is not a mapping".to_string(),
            });
        };

        match map.remove("rules") {
            Some(Value::Sequence(rules)) => Ok(RuleDocument { rules }),
            Some(_) => Err(CombineError::Schema {
                path: path.to_path_buf(),
                detail: "`rules` is not a sequence".to_string(),
            }),
            None => Err(CombineError::Schema {
                path: path.to_path_buf(),
                detail: "missing `rules` key".to_string(),
            }),
        }
    }
}
