// Copyright 2024-2026 nccl-test-runner Contributors
// SPDX-License-Identifier: Apache-2.0

//! Infrastructure outputs read through `terraform output -json`.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use super::subprocess::{display_command, run_command};
use super::InfraState;
use crate::error::UpstreamError;

/// One entry of `terraform output -json`.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputEntry {
    pub value: Value,
    #[serde(default)]
    pub sensitive: bool,
}

/// Recorded infrastructure outputs keyed by name.
#[derive(Debug, Clone, Default)]
pub struct InfraOutputs {
    entries: HashMap<String, Value>,
}

impl InfraOutputs {
    pub fn new(entries: HashMap<String, Value>) -> Self {
        Self { entries }
    }

    /// Decode the document printed by `terraform output -json`.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        let raw: HashMap<String, OutputEntry> = serde_json::from_str(text)?;
        Ok(Self::new(
            raw.into_iter().map(|(k, entry)| (k, entry.value)).collect(),
        ))
    }

    fn value(&self, key: &str) -> Result<&Value, UpstreamError> {
        self.entries
            .get(key)
            .filter(|v| !v.is_null())
            .ok_or_else(|| UpstreamError::MissingOutput(key.to_string()))
    }

    /// Output as text. Numbers and booleans are rendered as JSON.
    pub fn get_string(&self, key: &str) -> Result<String, UpstreamError> {
        match self.value(key)? {
            Value::String(s) => Ok(s.clone()),
            v @ (Value::Number(_) | Value::Bool(_)) => Ok(v.to_string()),
            other => Err(malformed(key, format!("expected a scalar, got {}", other))),
        }
    }

    /// Output as a non-negative integer; numeric strings are accepted.
    pub fn get_u32(&self, key: &str) -> Result<u32, UpstreamError> {
        let parsed = match self.value(key)? {
            Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
            Value::String(s) => s.trim().parse::<u32>().ok(),
            _ => None,
        };
        parsed.ok_or_else(|| malformed(key, "expected a non-negative integer".to_string()))
    }
}

fn malformed(key: &str, reason: String) -> UpstreamError {
    UpstreamError::Malformed {
        command: format!("terraform output {}", key),
        reason,
    }
}

/// `InfraState` backed by the terraform CLI.
#[derive(Debug, Clone)]
pub struct TerraformState {
    binary: String,
    dir: PathBuf,
    timeout: Duration,
}

impl TerraformState {
    pub fn new(binary: impl Into<String>, dir: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            binary: binary.into(),
            dir: dir.into(),
            timeout,
        }
    }

    fn args(&self) -> Vec<String> {
        vec![
            format!("-chdir={}", self.dir.display()),
            "output".to_string(),
            "-json".to_string(),
        ]
    }
}

#[async_trait]
impl InfraState for TerraformState {
    async fn outputs(&self) -> Result<InfraOutputs, UpstreamError> {
        let args = self.args();
        let out = run_command(&self.binary, &args, None, self.timeout).await?;
        InfraOutputs::from_json(&out.stdout).map_err(|e| UpstreamError::Malformed {
            command: display_command(&self.binary, &args),
            reason: e.to_string(),
        })
    }
}

#[cfg(test)]
#[path = "terraform_tests.rs"]
mod tests;
