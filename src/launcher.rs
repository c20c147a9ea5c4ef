// Copyright 2024-2026 nccl-test-runner Contributors
// SPDX-License-Identifier: Apache-2.0

//! Parameter resolution, rendering, and submission.
//!
//! One invocation runs `resolve -> render -> apply -> find_job` in order and
//! stops at the first error. Nothing is retried and an applied manifest is
//! never rolled back.

use std::sync::Arc;

use crate::cli::args::{parse_nodepool_name, Overrides};
use crate::config::RunnerConfig;
use crate::error::{ConfigError, Result, UpstreamError};
use crate::exec::{Cluster, InfraOutputs, InfraState, KubectlCluster, TerraformState};
use crate::template::{self, TestParams};

/// Settings the launcher needs beyond its collaborators.
#[derive(Debug, Clone)]
pub struct LaunchSettings {
    pub template: String,
    pub nodepool_output: String,
    pub gpus_output: String,
    pub node_selector: String,
    pub job_label: String,
    pub namespace: Option<String>,
}

impl LaunchSettings {
    /// Build settings from config, reading the template file if one is set.
    pub fn from_config(config: &RunnerConfig) -> Result<Self> {
        Ok(Self {
            template: template::load(config.template.as_deref())?,
            nodepool_output: config.nodepool_output.clone(),
            gpus_output: config.gpus_output.clone(),
            node_selector: config.node_selector.clone(),
            job_label: config.job_label.clone(),
            namespace: config.namespace.clone(),
        })
    }
}

/// A submitted Job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub job_name: String,
    pub params: TestParams,
    pub manifest: String,
    pub namespace: Option<String>,
}

impl Submission {
    /// Commands to describe, follow, and delete the Job.
    pub fn follow_up_commands(&self) -> [String; 3] {
        let ns = self
            .namespace
            .as_ref()
            .map(|ns| format!(" -n {}", ns))
            .unwrap_or_default();
        [
            format!("kubectl describe job/{}{}", self.job_name, ns),
            format!("kubectl logs -f job/{}{}", self.job_name, ns),
            format!("kubectl delete job/{}{}", self.job_name, ns),
        ]
    }
}

pub struct Launcher {
    infra: Arc<dyn InfraState>,
    cluster: Arc<dyn Cluster>,
    settings: LaunchSettings,
}

impl Launcher {
    pub fn new(
        infra: Arc<dyn InfraState>,
        cluster: Arc<dyn Cluster>,
        settings: LaunchSettings,
    ) -> Self {
        Self {
            infra,
            cluster,
            settings,
        }
    }

    /// Launcher wired to terraform and kubectl.
    pub fn from_config(config: &RunnerConfig) -> Result<Self> {
        let timeout = config.command_timeout();
        let infra = TerraformState::new(&config.terraform, &config.terraform_dir, timeout);
        let cluster = KubectlCluster::new(&config.kubectl, config.namespace.clone(), timeout);
        Ok(Self::new(
            Arc::new(infra),
            Arc::new(cluster),
            LaunchSettings::from_config(config)?,
        ))
    }

    pub fn settings(&self) -> &LaunchSettings {
        &self.settings
    }

    /// Fill in every parameter the overrides leave open.
    ///
    /// Infrastructure outputs are read only if the node pool name or the GPU
    /// count is missing; nodes are counted only if `num_nodes` is missing.
    pub async fn resolve(&self, overrides: &Overrides) -> Result<TestParams> {
        let (nodepool_name, gpus_per_node) =
            match (&overrides.nodepool_name, overrides.gpus_per_node) {
                (Some(name), Some(gpus)) => (name.clone(), gpus),
                (name, gpus) => {
                    tracing::info!("Reading infrastructure outputs");
                    let outputs = self.infra.outputs().await?;
                    let name = match name {
                        Some(name) => name.clone(),
                        None => self.nodepool_from(&outputs)?,
                    };
                    let gpus = match gpus {
                        Some(gpus) => gpus,
                        None => outputs.get_u32(&self.settings.gpus_output)?,
                    };
                    (name, gpus)
                }
            };

        let num_nodes = match overrides.num_nodes {
            Some(n) => n,
            None => {
                let selector = &self.settings.node_selector;
                let n = self.cluster.count_nodes(selector).await?;
                tracing::info!(selector = %selector, num_nodes = n, "Counted nodes");
                n
            }
        };

        if num_nodes == 0 {
            tracing::warn!("Resolved num_nodes is 0; submitting anyway");
        }

        Ok(TestParams {
            nodepool_name,
            num_nodes,
            gpus_per_node,
        })
    }

    fn nodepool_from(&self, outputs: &InfraOutputs) -> Result<String, UpstreamError> {
        let key = &self.settings.nodepool_output;
        let raw = outputs.get_string(key)?;
        parse_nodepool_name(&raw).map_err(|e| UpstreamError::Malformed {
            command: format!("terraform output {}", key),
            reason: e.to_string(),
        })
    }

    /// Render the template for `params`.
    pub fn render(&self, params: &TestParams) -> Result<String, ConfigError> {
        template::render(&self.settings.template, params)
    }

    /// Resolve, render, apply, and look up the Job name.
    pub async fn run(&self, overrides: &Overrides) -> Result<Submission> {
        let params = self.resolve(overrides).await?;
        tracing::info!(
            nodepool_name = %params.nodepool_name,
            num_nodes = params.num_nodes,
            gpus_per_node = params.gpus_per_node,
            "Resolved test parameters"
        );

        let manifest = self.render(&params)?;
        self.cluster.apply(&manifest).await?;

        let job_name = self.cluster.find_job(&self.settings.job_label).await?;
        tracing::info!(job = %job_name, "Job submitted");

        Ok(Submission {
            job_name,
            params,
            manifest,
            namespace: self.settings.namespace.clone(),
        })
    }
}

#[cfg(test)]
#[path = "launcher_tests.rs"]
mod tests;
