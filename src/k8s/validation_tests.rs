// Copyright 2024-2026 nccl-test-runner Contributors
// SPDX-License-Identifier: Apache-2.0

//! Tests for label and selector validation.

use super::*;

#[test]
fn test_valid_label_values() {
    for value in ["a3-ultra-pool", "pool_1", "gpu.pool", "a", "A3ULTRA"] {
        assert!(
            validate_label_value(value, "nodepool_name").is_ok(),
            "{} should be valid",
            value
        );
    }
}

#[test]
fn test_empty_label_value_rejected() {
    assert_eq!(
        validate_label_value("", "nodepool_name"),
        Err(ValidationError::EmptyField("nodepool_name".to_string()))
    );
}

#[test]
fn test_label_value_max_length() {
    let ok = "a".repeat(MAX_LABEL_VALUE_LENGTH);
    assert!(validate_label_value(&ok, "nodepool_name").is_ok());

    let too_long = "a".repeat(MAX_LABEL_VALUE_LENGTH + 1);
    assert!(matches!(
        validate_label_value(&too_long, "nodepool_name"),
        Err(ValidationError::MaxLengthExceeded { max: 63, .. })
    ));
}

#[test]
fn test_yaml_breaking_values_rejected() {
    let attempts = [
        "pool\nkind: Secret",
        "pool: x",
        "pool'",
        "pool\"",
        "pool #comment",
        "pool}",
        "pool;rm",
    ];
    for attempt in &attempts {
        assert!(
            matches!(
                validate_label_value(attempt, "nodepool_name"),
                Err(ValidationError::InvalidLabelValue { .. })
            ),
            "{:?} should be rejected",
            attempt
        );
    }
}

#[test]
fn test_label_value_must_start_and_end_alphanumeric() {
    assert!(validate_label_value("-pool", "n").is_err());
    assert!(validate_label_value("pool-", "n").is_err());
    assert!(validate_label_value(".pool", "n").is_err());
    assert!(validate_label_value("pool_", "n").is_err());
}

#[test]
fn test_valid_selectors() {
    assert!(validate_selector("cloud.google.com/gke-nodepool=a3-ultra-gpu-pool").is_ok());
    assert!(validate_selector("job-name=nccl-test").is_ok());
}

#[test]
fn test_selector_without_equals_rejected() {
    assert!(matches!(
        validate_selector("job-name"),
        Err(ValidationError::InvalidSelector { .. })
    ));
}

#[test]
fn test_multi_term_selector_rejected() {
    assert!(validate_selector("a=b,c=d").is_err());
    assert!(validate_selector("a==b").is_err());
}

#[test]
fn test_selector_bad_prefix_rejected() {
    assert!(validate_selector("Cloud.Google.com/pool=x").is_err());
    assert!(validate_selector("/pool=x").is_err());
}

#[test]
fn test_selector_bad_value_rejected() {
    assert!(validate_selector("job-name=").is_err());
    assert!(validate_selector("job-name=a b").is_err());
}

#[test]
fn test_error_display() {
    let err = ValidationError::EmptyField("nodepool_name".to_string());
    assert_eq!(err.to_string(), "Field 'nodepool_name' cannot be empty");
}
