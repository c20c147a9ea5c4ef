// Copyright 2024-2026 nccl-test-runner Contributors
// SPDX-License-Identifier: Apache-2.0

//! Runner configuration.
//!
//! Resolution order: built-in defaults, then the TOML file named by
//! `NCCL_TEST_CONFIG`, then individual `NCCL_TEST_*` environment variables.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::k8s::validation::{validate_label_value, validate_selector};

/// Environment variable naming the TOML config file.
pub const CONFIG_PATH_ENV: &str = "NCCL_TEST_CONFIG";

/// Node selector used for the default node count.
///
/// Fixed; it does not follow `--nodepool-name`.
pub const DEFAULT_NODE_SELECTOR: &str = "cloud.google.com/gke-nodepool=a3-ultra-gpu-pool";

/// Label the template puts on the Job.
pub const DEFAULT_JOB_LABEL: &str = "job-name=nccl-test";

/// Default per-call timeout for terraform and kubectl.
pub const DEFAULT_COMMAND_TIMEOUT: Duration = Duration::from_secs(120);

/// Runner configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunnerConfig {
    /// Template file; the built-in NCCL Job when unset.
    pub template: Option<PathBuf>,
    /// Directory holding the Terraform state for `terraform output`.
    pub terraform_dir: PathBuf,
    /// Terraform output holding the node pool name.
    pub nodepool_output: String,
    /// Terraform output holding the GPU count per node.
    pub gpus_output: String,
    /// Namespace for the Job; kubectl's current context when unset.
    pub namespace: Option<String>,
    /// Selector for counting nodes when `--num-nodes` is absent.
    pub node_selector: String,
    /// Selector for finding the submitted Job.
    pub job_label: String,
    /// kubectl binary.
    pub kubectl: String,
    /// terraform binary.
    pub terraform: String,
    /// Per-call timeout in seconds.
    pub command_timeout_secs: u64,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            template: None,
            terraform_dir: PathBuf::from("."),
            nodepool_output: "nodepool_name".to_string(),
            gpus_output: "gpus_per_node".to_string(),
            namespace: None,
            node_selector: DEFAULT_NODE_SELECTOR.to_string(),
            job_label: DEFAULT_JOB_LABEL.to_string(),
            kubectl: "kubectl".to_string(),
            terraform: "terraform".to_string(),
            command_timeout_secs: DEFAULT_COMMAND_TIMEOUT.as_secs(),
        }
    }
}

impl RunnerConfig {
    /// Load configuration from the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration using `lookup` in place of the environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match lookup(CONFIG_PATH_ENV) {
            Some(path) if !path.is_empty() => Self::from_file(Path::new(&path))?,
            _ => Self::default(),
        };
        config.apply_env(&lookup)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML config file. Missing keys keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    fn apply_env<F>(&mut self, lookup: &F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());

        if let Some(v) = get("NCCL_TEST_TEMPLATE") {
            self.template = Some(PathBuf::from(v));
        }
        if let Some(v) = get("NCCL_TEST_TERRAFORM_DIR") {
            self.terraform_dir = PathBuf::from(v);
        }
        if let Some(v) = get("NCCL_TEST_NAMESPACE") {
            self.namespace = Some(v);
        }
        if let Some(v) = get("NCCL_TEST_NODE_SELECTOR") {
            self.node_selector = v;
        }
        if let Some(v) = get("NCCL_TEST_JOB_LABEL") {
            self.job_label = v;
        }
        if let Some(v) = get("NCCL_TEST_KUBECTL") {
            self.kubectl = v;
        }
        if let Some(v) = get("NCCL_TEST_TERRAFORM") {
            self.terraform = v;
        }
        if let Some(v) = get("NCCL_TEST_TIMEOUT_SECS") {
            self.command_timeout_secs = v.parse::<u64>().map_err(|e| ConfigError::InvalidValue {
                flag: "NCCL_TEST_TIMEOUT_SECS".to_string(),
                value: v.clone(),
                reason: e.to_string(),
            })?;
        }
        Ok(())
    }

    /// Validate selectors, namespace, and timeout.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_selector(&self.node_selector)?;
        validate_selector(&self.job_label)?;
        if let Some(ref ns) = self.namespace {
            validate_label_value(ns, "namespace")?;
        }
        if self.command_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                flag: "command_timeout_secs".to_string(),
                value: "0".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }

    pub fn command_timeout(&self) -> Duration {
        Duration::from_secs(self.command_timeout_secs)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
