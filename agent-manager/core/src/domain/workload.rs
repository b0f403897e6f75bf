// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Workload Custom Resource (`openchoreo.dev/v1alpha1`)
//!
//! Typed model of the `Workload` resource emitted for the build pipeline.
//! Field names and nesting follow the Kubernetes-style schema consumed by the
//! deployment plane; `spec` inlines the workload template (containers and
//! endpoints) next to the `owner` block.
//!
//! The image reference and externally sourced schema bodies are left as the
//! literal placeholders [`IMAGE_TAG_PLACEHOLDER`] and
//! [`SCHEMA_CONTENT_PLACEHOLDER`]. The build pipeline substitutes them by
//! exact string match, so both values are part of the wire contract.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const WORKLOAD_API_VERSION: &str = "openchoreo.dev/v1alpha1";
pub const WORKLOAD_KIND: &str = "Workload";

/// Key of the single container in every rendered workload.
pub const MAIN_CONTAINER: &str = "main";

/// Substituted with the built image reference by the build pipeline.
pub const IMAGE_TAG_PLACEHOLDER: &str = "IMAGE_TAG";

/// Substituted with the schema file contents read from `schemaPath`.
pub const SCHEMA_CONTENT_PLACEHOLDER: &str = "SCHEMA_CONTENT";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workload {
    #[serde(rename = "apiVersion")]
    pub api_version: String,

    pub kind: String,

    pub metadata: ObjectMeta,

    pub spec: WorkloadSpec,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectMeta {
    pub name: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub namespace: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkloadSpec {
    pub owner: WorkloadOwner,

    #[serde(flatten)]
    pub template: WorkloadTemplateSpec,
}

/// Project and component that own the workload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkloadOwner {
    pub project_name: String,
    pub component_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkloadTemplateSpec {
    /// Containers keyed by name; rendered workloads only carry [`MAIN_CONTAINER`]
    pub containers: BTreeMap<String, Container>,

    /// Network endpoints keyed by endpoint name
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub endpoints: BTreeMap<String, WorkloadEndpoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Container {
    pub image: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub env: Vec<EnvVar>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvVar {
    pub key: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkloadEndpoint {
    #[serde(rename = "type")]
    pub endpoint_type: EndpointType,

    pub port: i32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<Schema>,
}

/// Endpoint protocol as authored by the user.
///
/// Kept as an open string: unknown protocols pass through untouched and the
/// deployment plane decides whether it accepts them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EndpointType(pub String);

impl EndpointType {
    pub const REST: &'static str = "REST";

    pub fn rest() -> Self {
        Self(Self::REST.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for EndpointType {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    #[serde(rename = "type")]
    pub schema_type: String,

    pub content: String,
}

impl Schema {
    /// REST-typed schema with the given body
    pub fn rest(content: impl Into<String>) -> Self {
        Self {
            schema_type: EndpointType::REST.to_string(),
            content: content.into(),
        }
    }
}

impl Workload {
    pub fn main_container(&self) -> Option<&Container> {
        self.spec.template.containers.get(MAIN_CONTAINER)
    }

    pub fn endpoint(&self, name: &str) -> Option<&WorkloadEndpoint> {
        self.spec.template.endpoints.get(name)
    }
}
