// Copyright 2024-2026 nccl-test-runner Contributors
// SPDX-License-Identifier: Apache-2.0

//! Kubernetes integration types.
//!
//! Decodes the `kubectl` list responses this tool reads and validates
//! label values before they reach a manifest or a selector.

pub mod types;
pub mod validation;

pub use types::{ObjectList, ObjectMeta, ObjectRef};
pub use validation::{validate_label_value, validate_selector, ValidationError};
