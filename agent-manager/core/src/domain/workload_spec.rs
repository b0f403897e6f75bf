// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Workload Specification (user-authored)
//!
//! The workload specification is stored on the agent as free-form JSON
//! captured from the console. This module is the single place where that
//! payload is turned into typed values, and it is deliberately lenient:
//!
//! | Input | Result |
//! |-------|--------|
//! | `envVars` / `endpoints` missing or not a list | empty list |
//! | list element that is not an object | skipped |
//! | `key`, `value`, `name`, `type` missing or not a string | `""` |
//! | `port` any JSON number | truncated toward zero, saturated to `i32` |
//! | `port` missing or not a number | `0` |
//! | `schemaContent` non-empty | inline schema |
//! | else `schemaPath` non-empty | schema resolved later from the path |
//!
//! Nothing here returns an error. A partially specified workload still yields
//! a best-effort manifest; skipped elements are reported at `debug` level.

use serde_json::{Map, Value};
use tracing::debug;

use crate::domain::workload::{EndpointType, EnvVar};

pub const ENV_VARS_FIELD: &str = "envVars";
pub const ENDPOINTS_FIELD: &str = "endpoints";

/// Typed view of the stored workload specification
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkloadSpecification {
    /// Environment entries in authoring order
    pub env_vars: Vec<EnvVar>,

    /// Endpoint descriptors in authoring order (duplicates retained)
    pub endpoints: Vec<EndpointDescriptor>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EndpointDescriptor {
    pub name: String,
    pub endpoint_type: EndpointType,
    pub port: i32,
    pub schema: SchemaSource,
}

/// Where an endpoint's API schema comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaSource {
    /// Schema body supplied directly by the user
    Inline(String),
    /// Repository path of the schema file; read by the build pipeline
    Path(String),
    None,
}

impl WorkloadSpecification {
    pub fn from_map(spec: &Map<String, Value>) -> Self {
        Self {
            env_vars: parse_env_vars(spec.get(ENV_VARS_FIELD)),
            endpoints: parse_endpoints(spec.get(ENDPOINTS_FIELD)),
        }
    }

    /// Convert any JSON value; non-objects yield an empty specification
    pub fn from_value(spec: &Value) -> Self {
        spec.as_object().map(Self::from_map).unwrap_or_default()
    }
}

fn parse_env_vars(field: Option<&Value>) -> Vec<EnvVar> {
    let Some(items) = field.and_then(Value::as_array) else {
        return Vec::new();
    };

    items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| {
            let Some(entry) = item.as_object() else {
                debug!(index, "Skipping envVars entry that is not an object");
                return None;
            };
            Some(EnvVar {
                key: string_field(entry, "key"),
                value: string_field(entry, "value"),
            })
        })
        .collect()
}

fn parse_endpoints(field: Option<&Value>) -> Vec<EndpointDescriptor> {
    let Some(items) = field.and_then(Value::as_array) else {
        return Vec::new();
    };

    items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| {
            let Some(endpoint) = item.as_object() else {
                debug!(index, "Skipping endpoints entry that is not an object");
                return None;
            };
            Some(EndpointDescriptor {
                name: string_field(endpoint, "name"),
                endpoint_type: EndpointType(string_field(endpoint, "type")),
                port: coerce_port(endpoint.get("port")),
                schema: schema_source(endpoint),
            })
        })
        .collect()
}

fn string_field(entry: &Map<String, Value>, field: &str) -> String {
    entry
        .get(field)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn non_empty_string_field<'a>(entry: &'a Map<String, Value>, field: &str) -> Option<&'a str> {
    entry
        .get(field)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

// `as` on f64 truncates toward zero, saturates at the i32 bounds and maps NaN to 0.
fn coerce_port(port: Option<&Value>) -> i32 {
    port.and_then(Value::as_f64).map(|p| p as i32).unwrap_or(0)
}

fn schema_source(endpoint: &Map<String, Value>) -> SchemaSource {
    if let Some(content) = non_empty_string_field(endpoint, "schemaContent") {
        SchemaSource::Inline(content.to_string())
    } else if let Some(path) = non_empty_string_field(endpoint, "schemaPath") {
        SchemaSource::Path(path.to_string())
    } else {
        SchemaSource::None
    }
}
