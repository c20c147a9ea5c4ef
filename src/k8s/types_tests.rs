// Copyright 2024-2026 nccl-test-runner Contributors
// SPDX-License-Identifier: Apache-2.0

//! Tests for kubectl list decoding.

use super::*;

const NODE_LIST: &str = r#"{
    "apiVersion": "v1",
    "kind": "List",
    "items": [
        {
            "apiVersion": "v1",
            "kind": "Node",
            "metadata": {
                "name": "gke-cluster-a3-ultra-gpu-pool-1a2b",
                "creationTimestamp": "2026-10-01T10:00:00Z",
                "labels": {
                    "cloud.google.com/gke-nodepool": "a3-ultra-gpu-pool",
                    "cloud.google.com/gke-accelerator": "nvidia-h200-141gb"
                }
            },
            "status": {"capacity": {"nvidia.com/gpu": "8"}}
        },
        {
            "apiVersion": "v1",
            "kind": "Node",
            "metadata": {
                "name": "gke-cluster-a3-ultra-gpu-pool-3c4d",
                "creationTimestamp": "2026-10-01T10:00:05Z"
            }
        }
    ],
    "metadata": {"resourceVersion": ""}
}"#;

#[test]
fn test_decode_node_list_ignores_unknown_fields() {
    let list: ObjectList = serde_json::from_str(NODE_LIST).unwrap();
    assert_eq!(list.kind, "List");
    assert_eq!(list.len(), 2);
    assert_eq!(list.items[0].kind.as_deref(), Some("Node"));

    let labels = list.items[0].metadata.labels.as_ref().unwrap();
    assert_eq!(
        labels.get("cloud.google.com/gke-nodepool").map(String::as_str),
        Some("a3-ultra-gpu-pool")
    );
}

#[test]
fn test_decode_empty_list() {
    let list: ObjectList =
        serde_json::from_str(r#"{"apiVersion":"v1","items":[],"kind":"List"}"#).unwrap();
    assert!(list.is_empty());
    assert_eq!(list.newest_name(), None);
}

#[test]
fn test_decode_list_without_items_field() {
    let list: ObjectList = serde_json::from_str(r#"{"kind":"List"}"#).unwrap();
    assert!(list.is_empty());
}

#[test]
fn test_newest_name_prefers_latest_timestamp() {
    let json = r#"{"items": [
        {"metadata": {"name": "nccl-test-old", "creationTimestamp": "2026-10-18T09:00:00Z"}},
        {"metadata": {"name": "nccl-test-new", "creationTimestamp": "2026-10-19T09:00:00Z"}},
        {"metadata": {"name": "nccl-test-mid", "creationTimestamp": "2026-10-18T12:00:00Z"}}
    ]}"#;
    let list: ObjectList = serde_json::from_str(json).unwrap();
    assert_eq!(list.newest_name(), Some("nccl-test-new"));
}

#[test]
fn test_newest_name_without_timestamps_takes_last() {
    let json = r#"{"items": [
        {"metadata": {"name": "first"}},
        {"metadata": {"name": "second"}}
    ]}"#;
    let list: ObjectList = serde_json::from_str(json).unwrap();
    assert_eq!(list.newest_name(), Some("second"));
}

#[test]
fn test_missing_metadata_name_is_an_error() {
    let result: Result<ObjectList, _> =
        serde_json::from_str(r#"{"items": [{"metadata": {}}]}"#);
    assert!(result.is_err());
}
