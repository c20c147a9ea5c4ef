// Copyright 2024-2026 nccl-test-runner Contributors
// SPDX-License-Identifier: Apache-2.0

//! Error taxonomy for the runner.
//!
//! `ConfigError` is raised before any external call; `UpstreamError` wraps
//! failures of terraform or kubectl and is surfaced verbatim.

use std::time::Duration;

use thiserror::Error;

use crate::k8s::ValidationError;

/// Malformed or unknown input, detected before any side effect.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unknown argument: {0}")]
    UnknownFlag(String),

    #[error("Unexpected positional argument: {0}")]
    UnexpectedPositional(String),

    #[error("Missing value for {0}")]
    MissingValue(String),

    #[error("Flag {0} given more than once")]
    DuplicateFlag(String),

    #[error("Invalid value for {flag}: '{value}' ({reason})")]
    InvalidValue {
        flag: String,
        value: String,
        reason: String,
    },

    #[error("Rendered manifest still contains placeholder {0}")]
    UnresolvedPlaceholder(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

/// Failure reported by an external collaborator.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("Failed to spawn `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` exited with code {code}: {stderr}")]
    Failed {
        command: String,
        code: i32,
        stderr: String,
    },

    #[error("I/O error talking to `{command}`: {source}")]
    Io {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` wrote {total} bytes to stdout, more than the {limit} byte limit")]
    OutputTooLarge { command: String, limit: u64, total: u64 },

    #[error("`{command}` timed out after {elapsed:?}")]
    Timeout { command: String, elapsed: Duration },

    #[error("Unexpected output from `{command}`: {reason}")]
    Malformed { command: String, reason: String },

    #[error("Infrastructure output '{0}' not found")]
    MissingOutput(String),

    #[error("No job found matching label {0}")]
    JobNotFound(String),
}

/// Top-level error for a runner invocation.
#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigError),

    #[error("Upstream error: {0}")]
    Upstream(#[from] UpstreamError),

    #[error("Failed to write submission report: {0}")]
    Report(#[source] std::io::Error),
}

impl From<ValidationError> for RunnerError {
    fn from(err: ValidationError) -> Self {
        Self::Configuration(ConfigError::Validation(err))
    }
}

impl RunnerError {
    /// Process exit code for this error.
    ///
    /// `2` for configuration errors, `3` for upstream timeouts, `1` otherwise,
    /// including a report that could not be written after submission.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Configuration(_) => 2,
            Self::Upstream(UpstreamError::Timeout { .. }) => 3,
            Self::Upstream(_) | Self::Report(_) => 1,
        }
    }

    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }

    pub fn is_upstream(&self) -> bool {
        matches!(self, Self::Upstream(_))
    }
}

pub type Result<T, E = RunnerError> = std::result::Result<T, E>;
