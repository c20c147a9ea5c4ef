// Copyright 2024-2026 nccl-test-runner Contributors
// SPDX-License-Identifier: Apache-2.0

//! External collaborators: the infrastructure-state store and the cluster.
//!
//! The launcher only talks to these traits. Production implementations
//! shell out to `terraform` and `kubectl` with a bounded timeout per call.

pub mod kubectl;
pub mod subprocess;
pub mod terraform;

use async_trait::async_trait;

use crate::error::UpstreamError;

pub use kubectl::KubectlCluster;
pub use terraform::{InfraOutputs, TerraformState};

/// Previously recorded infrastructure outputs.
#[async_trait]
pub trait InfraState: Send + Sync {
    /// Fetch all recorded outputs.
    async fn outputs(&self) -> Result<InfraOutputs, UpstreamError>;
}

/// The orchestration system.
#[async_trait]
pub trait Cluster: Send + Sync {
    /// Count nodes matching an equality label selector.
    async fn count_nodes(&self, selector: &str) -> Result<u32, UpstreamError>;

    /// Create or update every resource in `manifest`.
    async fn apply(&self, manifest: &str) -> Result<(), UpstreamError>;

    /// Name of the newest Job matching `label`.
    async fn find_job(&self, label: &str) -> Result<String, UpstreamError>;
}
