// Copyright 2024-2026 nccl-test-runner Contributors
// SPDX-License-Identifier: Apache-2.0

//! `Cluster` backed by the kubectl CLI.

use std::time::Duration;

use async_trait::async_trait;

use super::subprocess::{display_command, run_command};
use super::Cluster;
use crate::error::UpstreamError;
use crate::k8s::ObjectList;

#[derive(Debug, Clone)]
pub struct KubectlCluster {
    binary: String,
    namespace: Option<String>,
    timeout: Duration,
}

impl KubectlCluster {
    pub fn new(binary: impl Into<String>, namespace: Option<String>, timeout: Duration) -> Self {
        Self {
            binary: binary.into(),
            namespace,
            timeout,
        }
    }

    fn namespaced(&self, mut args: Vec<String>) -> Vec<String> {
        if let Some(ref ns) = self.namespace {
            args.push("--namespace".to_string());
            args.push(ns.clone());
        }
        args
    }

    pub(crate) fn count_nodes_args(selector: &str) -> Vec<String> {
        ["get", "nodes", "-l", selector, "-o", "json"]
            .map(String::from)
            .to_vec()
    }

    pub(crate) fn apply_args(&self) -> Vec<String> {
        self.namespaced(["apply", "-f", "-"].map(String::from).to_vec())
    }

    pub(crate) fn find_job_args(&self, label: &str) -> Vec<String> {
        self.namespaced(["get", "jobs", "-l", label, "-o", "json"].map(String::from).to_vec())
    }

    async fn get_list(&self, args: Vec<String>) -> Result<ObjectList, UpstreamError> {
        let out = run_command(&self.binary, &args, None, self.timeout).await?;
        serde_json::from_str(&out.stdout).map_err(|e| UpstreamError::Malformed {
            command: display_command(&self.binary, &args),
            reason: e.to_string(),
        })
    }
}

#[async_trait]
impl Cluster for KubectlCluster {
    async fn count_nodes(&self, selector: &str) -> Result<u32, UpstreamError> {
        let list = self.get_list(Self::count_nodes_args(selector)).await?;
        u32::try_from(list.len()).map_err(|_| UpstreamError::Malformed {
            command: format!("{} get nodes", self.binary),
            reason: format!("node count {} out of range", list.len()),
        })
    }

    async fn apply(&self, manifest: &str) -> Result<(), UpstreamError> {
        let out = run_command(&self.binary, &self.apply_args(), Some(manifest), self.timeout).await?;
        for line in out.stdout.lines().filter(|l| !l.trim().is_empty()) {
            tracing::info!(result = line.trim(), "kubectl apply");
        }
        Ok(())
    }

    async fn find_job(&self, label: &str) -> Result<String, UpstreamError> {
        let list = self.get_list(self.find_job_args(label)).await?;
        list.newest_name()
            .map(str::to_string)
            .ok_or_else(|| UpstreamError::JobNotFound(label.to_string()))
    }
}

#[cfg(test)]
#[path = "kubectl_tests.rs"]
mod tests;
