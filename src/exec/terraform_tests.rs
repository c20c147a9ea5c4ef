// Copyright 2024-2026 nccl-test-runner Contributors
// SPDX-License-Identifier: Apache-2.0

//! Tests for terraform output decoding.

use super::*;

const OUTPUT_JSON: &str = r#"{
  "gpus_per_node": {"sensitive": false, "type": "number", "value": 8},
  "nodepool_name": {"sensitive": false, "type": "string", "value": "a3-ultra-gpu-pool"},
  "num_nodes_str": {"sensitive": false, "type": "string", "value": "4"},
  "subnets": {"sensitive": false, "type": ["list", "string"], "value": ["rdma-0", "rdma-1"]},
  "unset": {"sensitive": false, "type": "string", "value": null}
}"#;

#[test]
fn test_decode_outputs() {
    let outputs = InfraOutputs::from_json(OUTPUT_JSON).unwrap();
    assert_eq!(outputs.get_string("nodepool_name").unwrap(), "a3-ultra-gpu-pool");
    assert_eq!(outputs.get_u32("gpus_per_node").unwrap(), 8);
}

#[test]
fn test_numeric_string_accepted_as_integer() {
    let outputs = InfraOutputs::from_json(OUTPUT_JSON).unwrap();
    assert_eq!(outputs.get_u32("num_nodes_str").unwrap(), 4);
}

#[test]
fn test_number_rendered_as_string() {
    let outputs = InfraOutputs::from_json(OUTPUT_JSON).unwrap();
    assert_eq!(outputs.get_string("gpus_per_node").unwrap(), "8");
}

#[test]
fn test_missing_and_null_outputs() {
    let outputs = InfraOutputs::from_json(OUTPUT_JSON).unwrap();
    assert!(matches!(
        outputs.get_string("cluster_name"),
        Err(UpstreamError::MissingOutput(k)) if k == "cluster_name"
    ));
    assert!(matches!(
        outputs.get_string("unset"),
        Err(UpstreamError::MissingOutput(_))
    ));
}

#[test]
fn test_non_scalar_and_non_integer_rejected() {
    let outputs = InfraOutputs::from_json(OUTPUT_JSON).unwrap();
    assert!(matches!(
        outputs.get_string("subnets"),
        Err(UpstreamError::Malformed { .. })
    ));
    assert!(matches!(
        outputs.get_u32("nodepool_name"),
        Err(UpstreamError::Malformed { .. })
    ));
}

#[test]
fn test_negative_integer_rejected() {
    let outputs =
        InfraOutputs::from_json(r#"{"gpus_per_node": {"type": "number", "value": -1}}"#).unwrap();
    assert!(outputs.get_u32("gpus_per_node").is_err());
}

#[test]
fn test_empty_state_decodes() {
    let outputs = InfraOutputs::from_json("{}").unwrap();
    assert!(outputs.get_string("nodepool_name").is_err());
}

#[test]
fn test_garbage_rejected() {
    assert!(InfraOutputs::from_json("No outputs found").is_err());
}

#[test]
fn test_chdir_argument() {
    let state = TerraformState::new("terraform", "infra/gke", Duration::from_secs(5));
    assert_eq!(state.args(), vec!["-chdir=infra/gke", "output", "-json"]);
}
