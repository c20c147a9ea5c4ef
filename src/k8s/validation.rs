// Copyright 2024-2026 nccl-test-runner Contributors
// SPDX-License-Identifier: Apache-2.0

//! Validation functions for Kubernetes label values and selectors.
//!
//! Values validated here are substituted verbatim into YAML or passed to
//! `kubectl -l`, so anything outside the label grammar is rejected.

/// Maximum length of a Kubernetes label value.
pub const MAX_LABEL_VALUE_LENGTH: usize = 63;

/// Maximum length of a label key name segment (after an optional prefix).
const MAX_LABEL_NAME_LENGTH: usize = 63;

/// Maximum length of a label key prefix (a DNS subdomain).
const MAX_LABEL_PREFIX_LENGTH: usize = 253;

/// Validation error types.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// Field is empty but required.
    #[error("Field '{0}' cannot be empty")]
    EmptyField(String),
    /// Field exceeds maximum length.
    #[error("Field '{field}' exceeds maximum length of {max}")]
    MaxLengthExceeded { field: String, max: usize },
    /// Label value does not match the Kubernetes label grammar.
    #[error("Invalid label value for '{field}': {reason}")]
    InvalidLabelValue { field: String, reason: String },
    /// Label selector is not a `key=value` equality selector.
    #[error("Invalid label selector '{selector}': {reason}")]
    InvalidSelector { selector: String, reason: String },
}

fn is_label_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.'
}

/// Validate a label value such as a node pool name.
///
/// Must be at most 63 characters, begin and end with an alphanumeric
/// character, and contain only alphanumerics, dashes, underscores, and dots.
pub fn validate_label_value(value: &str, field_name: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::EmptyField(field_name.to_string()));
    }

    if value.len() > MAX_LABEL_VALUE_LENGTH {
        return Err(ValidationError::MaxLengthExceeded {
            field: field_name.to_string(),
            max: MAX_LABEL_VALUE_LENGTH,
        });
    }

    if !value.chars().all(is_label_char) {
        return Err(ValidationError::InvalidLabelValue {
            field: field_name.to_string(),
            reason: "must contain only alphanumeric characters, dashes, underscores, and dots"
                .to_string(),
        });
    }

    let starts_ok = value.chars().next().is_some_and(|c| c.is_ascii_alphanumeric());
    let ends_ok = value.chars().last().is_some_and(|c| c.is_ascii_alphanumeric());
    if !starts_ok || !ends_ok {
        return Err(ValidationError::InvalidLabelValue {
            field: field_name.to_string(),
            reason: "must begin and end with an alphanumeric character".to_string(),
        });
    }

    Ok(())
}

/// Validate a label key, e.g. `cloud.google.com/gke-nodepool`.
fn validate_label_key(key: &str, selector: &str) -> Result<(), ValidationError> {
    let invalid = |reason: &str| ValidationError::InvalidSelector {
        selector: selector.to_string(),
        reason: reason.to_string(),
    };

    let (prefix, name) = match key.split_once('/') {
        Some((prefix, name)) => (Some(prefix), name),
        None => (None, key),
    };

    if let Some(prefix) = prefix {
        if prefix.is_empty() || prefix.len() > MAX_LABEL_PREFIX_LENGTH {
            return Err(invalid("key prefix must be a DNS subdomain"));
        }
        let valid = |c: char| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '.';
        if !prefix.chars().all(valid) {
            return Err(invalid("key prefix must be a DNS subdomain"));
        }
    }

    if name.is_empty() || name.len() > MAX_LABEL_NAME_LENGTH {
        return Err(invalid("key name must be 1-63 characters"));
    }

    validate_label_value(name, "selector key").map_err(|_| invalid("key name is not a valid label name"))
}

/// Validate an equality label selector of the form `key=value`.
///
/// Set-based selectors and multi-term selectors are not accepted.
pub fn validate_selector(selector: &str) -> Result<(), ValidationError> {
    if selector.is_empty() {
        return Err(ValidationError::EmptyField("selector".to_string()));
    }

    let Some((key, value)) = selector.split_once('=') else {
        return Err(ValidationError::InvalidSelector {
            selector: selector.to_string(),
            reason: "expected key=value".to_string(),
        });
    };

    if selector.contains(',') || value.starts_with('=') {
        return Err(ValidationError::InvalidSelector {
            selector: selector.to_string(),
            reason: "only a single key=value term is supported".to_string(),
        });
    }

    validate_label_key(key, selector)?;
    validate_label_value(value, "selector value").map_err(|e| ValidationError::InvalidSelector {
        selector: selector.to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
#[path = "validation_tests.rs"]
mod tests;
