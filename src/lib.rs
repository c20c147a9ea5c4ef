// Copyright 2024-2026 nccl-test-runner Contributors
// SPDX-License-Identifier: Apache-2.0

//! nccl-test-runner: launch NCCL RDMA benchmark Jobs on GKE GPU node pools.
//!
//! Resolves the node pool name, node count, and GPUs per node from CLI
//! overrides, Terraform outputs, and a live node count; substitutes them into
//! a Job manifest template; applies it with kubectl; and reports how to
//! follow the Job.

pub mod cli;
pub mod config;
pub mod error;
pub mod exec;
pub mod k8s;
pub mod launcher;
pub mod logging;
pub mod template;

pub use cli::{parse_args, Invocation, Overrides};
pub use config::RunnerConfig;
pub use error::{ConfigError, RunnerError, UpstreamError};
pub use launcher::{LaunchSettings, Launcher, Submission};
pub use template::{Placeholder, TestParams};
