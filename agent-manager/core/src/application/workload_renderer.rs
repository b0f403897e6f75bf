// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Workload Renderer
//!
//! Turns an agent's stored workload specification into a `Workload` resource
//! template for the build pipeline.
//!
//! # Architecture
//!
//! - **Layer:** Application
//! - **Purpose:** Specification → `Workload` mapping with placeholder policy
//! - **Pure:** no I/O, no shared state; safe to call from any task
//!
//! # Placeholders
//!
//! - container image → `IMAGE_TAG`
//! - schema read from `schemaPath` → `SCHEMA_CONTENT`
//!
//! Both are replaced textually by the build pipeline once the image is built
//! and the schema file has been read from the source repository.

use std::collections::BTreeMap;

use crate::domain::workload::{
    Container, EnvVar, ObjectMeta, Schema, Workload, WorkloadEndpoint, WorkloadOwner,
    WorkloadSpec, WorkloadTemplateSpec, IMAGE_TAG_PLACEHOLDER, MAIN_CONTAINER,
    SCHEMA_CONTENT_PLACEHOLDER, WORKLOAD_API_VERSION, WORKLOAD_KIND,
};
use crate::domain::workload_spec::{EndpointDescriptor, SchemaSource, WorkloadSpecification};

/// Identity of the component a workload is rendered for
#[derive(Debug, Clone, Copy)]
pub struct WorkloadOwnerRef<'a> {
    /// Deployment-plane organization name, used as namespace
    pub org_name: &'a str,
    pub project_name: &'a str,
    pub component_name: &'a str,
}

pub struct WorkloadRenderer;

impl WorkloadRenderer {
    /// Render a workload template from the typed specification
    pub fn render(spec: &WorkloadSpecification, owner: WorkloadOwnerRef<'_>) -> Workload {
        Workload {
            api_version: WORKLOAD_API_VERSION.to_string(),
            kind: WORKLOAD_KIND.to_string(),
            metadata: ObjectMeta {
                name: Self::workload_name(owner.component_name),
                namespace: owner.org_name.to_string(),
            },
            spec: WorkloadSpec {
                owner: WorkloadOwner {
                    project_name: owner.project_name.to_string(),
                    component_name: owner.component_name.to_string(),
                },
                template: WorkloadTemplateSpec {
                    containers: BTreeMap::from([(
                        MAIN_CONTAINER.to_string(),
                        Container {
                            image: IMAGE_TAG_PLACEHOLDER.to_string(),
                            env: Self::build_env_vars(spec),
                        },
                    )]),
                    endpoints: Self::build_endpoints(spec),
                },
            },
        }
    }

    /// Render straight from the untyped JSON stored on the agent
    pub fn render_from_map(
        spec: &serde_json::Map<String, serde_json::Value>,
        owner: WorkloadOwnerRef<'_>,
    ) -> Workload {
        Self::render(&WorkloadSpecification::from_map(spec), owner)
    }

    pub fn workload_name(component_name: &str) -> String {
        format!("{}-workload", component_name)
    }

    fn build_env_vars(spec: &WorkloadSpecification) -> Vec<EnvVar> {
        spec.env_vars.clone()
    }

    // Later descriptors overwrite earlier ones with the same name.
    fn build_endpoints(spec: &WorkloadSpecification) -> BTreeMap<String, WorkloadEndpoint> {
        spec.endpoints
            .iter()
            .map(|descriptor| (descriptor.name.clone(), Self::build_endpoint(descriptor)))
            .collect()
    }

    fn build_endpoint(descriptor: &EndpointDescriptor) -> WorkloadEndpoint {
        let schema = match &descriptor.schema {
            SchemaSource::Inline(content) => Some(Schema::rest(content.as_str())),
            SchemaSource::Path(_) => Some(Schema::rest(SCHEMA_CONTENT_PLACEHOLDER)),
            SchemaSource::None => None,
        };

        WorkloadEndpoint {
            endpoint_type: descriptor.endpoint_type.clone(),
            port: descriptor.port,
            schema,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn owner() -> WorkloadOwnerRef<'static> {
        WorkloadOwnerRef {
            org_name: "acme",
            project_name: "shop",
            component_name: "checkout",
        }
    }

    fn render(value: Value) -> Workload {
        WorkloadRenderer::render(&WorkloadSpecification::from_value(&value), owner())
    }

    #[test]
    fn test_checkout_scenario() {
        let workload = render(json!({
            "envVars": [{"key": "A", "value": "1"}],
            "endpoints": [{
                "name": "ep1",
                "type": "REST",
                "port": 8080,
                "schemaContent": "openapi: 3.0"
            }]
        }));

        assert_eq!(workload.api_version, "openchoreo.dev/v1alpha1");
        assert_eq!(workload.kind, "Workload");
        assert_eq!(workload.metadata.name, "checkout-workload");
        assert_eq!(workload.metadata.namespace, "acme");
        assert_eq!(workload.spec.owner.project_name, "shop");
        assert_eq!(workload.spec.owner.component_name, "checkout");

        let container = workload.main_container().unwrap();
        assert_eq!(container.image, "IMAGE_TAG");
        assert_eq!(
            container.env,
            vec![EnvVar {
                key: "A".into(),
                value: "1".into(),
            }]
        );

        assert_eq!(workload.spec.template.endpoints.len(), 1);
        let endpoint = workload.endpoint("ep1").unwrap();
        assert_eq!(endpoint.endpoint_type.as_str(), "REST");
        assert_eq!(endpoint.port, 8080);
        assert_eq!(endpoint.schema, Some(Schema::rest("openapi: 3.0")));
    }

    #[test]
    fn test_float_port_is_truncated() {
        let workload = render(json!({
            "endpoints": [{"name": "ep2", "type": "GRPC", "port": 9090.0}]
        }));

        let endpoint = workload.endpoint("ep2").unwrap();
        assert_eq!(endpoint.port, 9090);
        assert_eq!(endpoint.endpoint_type.as_str(), "GRPC");
        assert!(endpoint.schema.is_none());
    }

    #[test]
    fn test_schema_path_renders_placeholder_not_path() {
        let workload = render(json!({
            "endpoints": [{"name": "api", "type": "REST", "port": 80, "schemaPath": "docs/openapi.yaml"}]
        }));

        let schema = workload.endpoint("api").unwrap().schema.clone().unwrap();
        assert_eq!(schema.schema_type, "REST");
        assert_eq!(schema.content, "SCHEMA_CONTENT");
    }

    #[test]
    fn test_schema_content_beats_schema_path() {
        let workload = render(json!({
            "endpoints": [{
                "name": "api",
                "type": "REST",
                "port": 80,
                "schemaContent": "openapi: 3.1",
                "schemaPath": "docs/openapi.yaml"
            }]
        }));

        let schema = workload.endpoint("api").unwrap().schema.clone().unwrap();
        assert_eq!(schema.content, "openapi: 3.1");
    }

    #[test]
    fn test_duplicate_endpoint_names_keep_last() {
        let workload = render(json!({
            "endpoints": [
                {"name": "api", "type": "REST", "port": 80},
                {"name": "api", "type": "GRPC", "port": 9090}
            ]
        }));

        assert_eq!(workload.spec.template.endpoints.len(), 1);
        assert_eq!(
            workload.endpoint("api"),
            Some(&WorkloadEndpoint {
                endpoint_type: "GRPC".into(),
                port: 9090,
                schema: None,
            })
        );
    }

    #[test]
    fn test_empty_specification_still_renders_container() {
        let workload = render(json!({}));

        let container = workload.main_container().unwrap();
        assert_eq!(container.image, IMAGE_TAG_PLACEHOLDER);
        assert!(container.env.is_empty());
        assert!(workload.spec.template.endpoints.is_empty());
    }

    #[test]
    fn test_render_from_map_matches_typed_render() {
        let value = json!({"envVars": [{"key": "K", "value": "V"}]});
        let map = value.as_object().unwrap();

        assert_eq!(
            WorkloadRenderer::render_from_map(map, owner()),
            render(value.clone())
        );
    }
}
