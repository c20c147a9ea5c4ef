// Copyright 2024-2026 nccl-test-runner Contributors
// SPDX-License-Identifier: Apache-2.0

//! Command-line override parsing.

use crate::error::ConfigError;
use crate::k8s::validation::validate_label_value;
use crate::template::contains_placeholder;

pub const FLAG_NODEPOOL_NAME: &str = "--nodepool-name";
pub const FLAG_NUM_NODES: &str = "--num-nodes";
pub const FLAG_GPUS_PER_NODE: &str = "--gpus-per-node";

/// Explicit parameter overrides. `None` falls back to the default lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub nodepool_name: Option<String>,
    pub num_nodes: Option<u32>,
    pub gpus_per_node: Option<u32>,
}

/// What the invocation asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    Run(Overrides),
    Help,
    Version,
}

/// Parse arguments, excluding the program name.
pub fn parse_args<S: AsRef<str>>(args: &[S]) -> Result<Invocation, ConfigError> {
    let mut overrides = Overrides::default();

    let mut i = 0;
    while i < args.len() {
        let arg: &str = args[i].as_ref();
        match arg {
            "-h" | "--help" => return Ok(Invocation::Help),
            "-V" | "--version" => return Ok(Invocation::Version),
            _ => {}
        }

        if !arg.starts_with('-') || arg == "-" {
            return Err(ConfigError::UnexpectedPositional(arg.to_string()));
        }
        if !arg.starts_with("--") {
            return Err(ConfigError::UnknownFlag(arg.to_string()));
        }

        let (flag, inline) = match arg.split_once('=') {
            Some((flag, value)) => (flag, Some(value.to_string())),
            None => (arg, None),
        };

        if !matches!(flag, FLAG_NODEPOOL_NAME | FLAG_NUM_NODES | FLAG_GPUS_PER_NODE) {
            return Err(ConfigError::UnknownFlag(flag.to_string()));
        }

        let value = match inline {
            Some(v) => {
                i += 1;
                v
            }
            None => match args.get(i + 1) {
                Some(v) => {
                    i += 2;
                    let v: &str = v.as_ref();
                    v.to_string()
                }
                None => return Err(ConfigError::MissingValue(flag.to_string())),
            },
        };

        match flag {
            FLAG_NODEPOOL_NAME => {
                check_unset(&overrides.nodepool_name, flag)?;
                overrides.nodepool_name = Some(parse_nodepool_name(&value)?);
            }
            FLAG_NUM_NODES => {
                check_unset(&overrides.num_nodes, flag)?;
                overrides.num_nodes = Some(parse_count(flag, &value)?);
            }
            _ => {
                check_unset(&overrides.gpus_per_node, flag)?;
                overrides.gpus_per_node = Some(parse_count(flag, &value)?);
            }
        }
    }

    Ok(Invocation::Run(overrides))
}

fn check_unset<T>(slot: &Option<T>, flag: &str) -> Result<(), ConfigError> {
    if slot.is_some() {
        return Err(ConfigError::DuplicateFlag(flag.to_string()));
    }
    Ok(())
}

/// Validate a node pool name destined for the manifest.
pub fn parse_nodepool_name(value: &str) -> Result<String, ConfigError> {
    validate_label_value(value, "nodepool_name")?;
    if contains_placeholder(value) {
        return Err(ConfigError::InvalidValue {
            flag: FLAG_NODEPOOL_NAME.to_string(),
            value: value.to_string(),
            reason: "must not contain a template placeholder".to_string(),
        });
    }
    Ok(value.to_string())
}

fn parse_count(flag: &str, value: &str) -> Result<u32, ConfigError> {
    value.parse::<u32>().map_err(|e| ConfigError::InvalidValue {
        flag: flag.to_string(),
        value: value.to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
#[path = "args_tests.rs"]
mod tests;
