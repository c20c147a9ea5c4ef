// Copyright 2024-2026 nccl-test-runner Contributors
// SPDX-License-Identifier: Apache-2.0

//! Command-line surface: override parsing and the success report.

pub mod args;
pub mod report;

pub use args::{parse_args, Invocation, Overrides};
pub use report::write_report;
