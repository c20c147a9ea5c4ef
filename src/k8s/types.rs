// Copyright 2024-2026 nccl-test-runner Contributors
// SPDX-License-Identifier: Apache-2.0

//! Minimal Kubernetes object types decoded from `kubectl get -o json`.
//!
//! Only the fields this tool reads are modelled; everything else in the
//! API response is ignored.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A `List` response, e.g. from `kubectl get nodes -o json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectList {
    #[serde(default)]
    pub api_version: String,
    #[serde(default)]
    pub kind: String,
    #[serde(default)]
    pub items: Vec<ObjectRef>,
}

/// One item of a list response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectRef {
    #[serde(default)]
    pub kind: Option<String>,
    pub metadata: ObjectMeta,
}

/// Common object metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectMeta {
    pub name: String,
    pub namespace: Option<String>,
    /// RFC 3339 timestamp; lexical order matches chronological order.
    pub creation_timestamp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<HashMap<String, String>>,
}

impl ObjectList {
    /// Number of items in the list.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Name of the most recently created item.
    ///
    /// Items without a creation timestamp sort first, so a timestamped
    /// item always wins. Ties keep the later item in list order.
    pub fn newest_name(&self) -> Option<&str> {
        self.items
            .iter()
            .max_by(|a, b| {
                a.metadata
                    .creation_timestamp
                    .cmp(&b.metadata.creation_timestamp)
            })
            .map(|item| item.metadata.name.as_str())
    }
}

#[cfg(test)]
#[path = "types_tests.rs"]
mod tests;
