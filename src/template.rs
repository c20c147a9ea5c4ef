// Copyright 2024-2026 nccl-test-runner Contributors
// SPDX-License-Identifier: Apache-2.0

//! Job manifest template and placeholder substitution.
//!
//! Substitution is plain text replacement. Tokens are replaced wherever they
//! appear, YAML comments included; the document is never parsed.

use std::fmt;
use std::path::Path;

use crate::error::ConfigError;

/// Default NCCL benchmark Job, compiled into the binary.
pub const DEFAULT_TEMPLATE: &str = include_str!("../manifests/nccl-test.yaml");

/// The fixed placeholder tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    NodepoolName,
    NumNodes,
    GpusPerNode,
}

impl Placeholder {
    pub const ALL: [Placeholder; 3] = [Self::NodepoolName, Self::NumNodes, Self::GpusPerNode];

    pub fn token(self) -> &'static str {
        match self {
            Self::NodepoolName => "__NODEPOOL_NAME__",
            Self::NumNodes => "__NUM_NODES__",
            Self::GpusPerNode => "__GPUS_PER_NODE__",
        }
    }
}

impl fmt::Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Resolved substitution values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestParams {
    pub nodepool_name: String,
    pub num_nodes: u32,
    pub gpus_per_node: u32,
}

impl TestParams {
    /// Literal replacement text for a placeholder.
    pub fn value_for(&self, placeholder: Placeholder) -> String {
        match placeholder {
            Placeholder::NodepoolName => self.nodepool_name.clone(),
            Placeholder::NumNodes => self.num_nodes.to_string(),
            Placeholder::GpusPerNode => self.gpus_per_node.to_string(),
        }
    }
}

/// Placeholders that do not occur anywhere in `template`.
pub fn missing_placeholders(template: &str) -> Vec<Placeholder> {
    Placeholder::ALL
        .into_iter()
        .filter(|p| !template.contains(p.token()))
        .collect()
}

/// Replace every occurrence of every placeholder in a single pass.
///
/// Inserted values are never rescanned. A value spliced between template
/// text can still complete a token (`__N` + `UM_NODES` + `__`), so the
/// output is checked again and any surviving token is an error.
pub fn render(template: &str, params: &TestParams) -> Result<String, ConfigError> {
    let missing = missing_placeholders(template);
    if !missing.is_empty() {
        let names: Vec<&str> = missing.iter().map(|p| p.token()).collect();
        tracing::warn!(missing = ?names, "Template does not reference every placeholder");
    }

    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find("__") {
        let tail = &rest[start..];
        match Placeholder::ALL.into_iter().find(|p| tail.starts_with(p.token())) {
            Some(p) => {
                out.push_str(&rest[..start]);
                out.push_str(&params.value_for(p));
                rest = &tail[p.token().len()..];
            }
            None => {
                out.push_str(&rest[..start + 1]);
                rest = &rest[start + 1..];
            }
        }
    }
    out.push_str(rest);

    if let Some(p) = Placeholder::ALL.into_iter().find(|p| out.contains(p.token())) {
        return Err(ConfigError::UnresolvedPlaceholder(p.token().to_string()));
    }
    Ok(out)
}

/// Whether `value` contains any placeholder token.
pub fn contains_placeholder(value: &str) -> bool {
    Placeholder::ALL.into_iter().any(|p| value.contains(p.token()))
}

/// Load a template from disk, or the built-in one when `path` is `None`.
pub fn load(path: Option<&Path>) -> Result<String, ConfigError> {
    match path {
        Some(path) => std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        }),
        None => Ok(DEFAULT_TEMPLATE.to_string()),
    }
}

#[cfg(test)]
#[path = "template_tests.rs"]
mod tests;
