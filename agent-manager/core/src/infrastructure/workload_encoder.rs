// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Workload YAML Encoder
//!
//! Serializes rendered `Workload` resources to the YAML document handed to
//! the build pipeline.
//!
//! # Architecture
//!
//! - **Layer:** Infrastructure
//! - **Purpose:** Domain object → external YAML text
//!
//! Map-typed fields (`containers`, `endpoints`) are `BTreeMap`s, so keys come
//! out sorted and the same input always produces the same document.

use crate::domain::workload::Workload;

#[derive(Debug, thiserror::Error)]
pub enum EncodingError {
    #[error("Failed to serialize workload to YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Encodes a workload into its textual wire form
pub trait WorkloadEncoder: Send + Sync {
    fn encode(&self, workload: &Workload) -> Result<String, EncodingError>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct YamlWorkloadEncoder;

impl YamlWorkloadEncoder {
    pub fn new() -> Self {
        Self
    }
}

impl WorkloadEncoder for YamlWorkloadEncoder {
    fn encode(&self, workload: &Workload) -> Result<String, EncodingError> {
        Ok(serde_yaml::to_string(workload)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::workload_renderer::{WorkloadOwnerRef, WorkloadRenderer};
    use crate::domain::workload_spec::WorkloadSpecification;
    use serde_json::json;

    fn encode(spec: serde_json::Value) -> String {
        let workload = WorkloadRenderer::render(
            &WorkloadSpecification::from_value(&spec),
            WorkloadOwnerRef {
                org_name: "acme",
                project_name: "shop",
                component_name: "checkout",
            },
        );
        YamlWorkloadEncoder::new().encode(&workload).unwrap()
    }

    #[test]
    fn test_encoded_document_layout() {
        let yaml = encode(json!({
            "envVars": [{"key": "A", "value": "1"}],
            "endpoints": [{"name": "ep1", "type": "REST", "port": 8080, "schemaPath": "api.yaml"}]
        }));

        let doc: serde_yaml::Value = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(doc["apiVersion"].as_str(), Some("openchoreo.dev/v1alpha1"));
        assert_eq!(doc["kind"].as_str(), Some("Workload"));
        assert_eq!(doc["metadata"]["name"].as_str(), Some("checkout-workload"));
        assert_eq!(doc["metadata"]["namespace"].as_str(), Some("acme"));
        assert_eq!(doc["spec"]["owner"]["projectName"].as_str(), Some("shop"));
        assert_eq!(doc["spec"]["containers"]["main"]["image"].as_str(), Some("IMAGE_TAG"));
        assert_eq!(doc["spec"]["containers"]["main"]["env"][0]["key"].as_str(), Some("A"));
        assert_eq!(doc["spec"]["endpoints"]["ep1"]["port"].as_i64(), Some(8080));
        assert_eq!(doc["spec"]["endpoints"]["ep1"]["schema"]["type"].as_str(), Some("REST"));
        assert_eq!(
            doc["spec"]["endpoints"]["ep1"]["schema"]["content"].as_str(),
            Some("SCHEMA_CONTENT")
        );
    }

    #[test]
    fn test_placeholders_appear_verbatim() {
        let yaml = encode(json!({
            "endpoints": [{"name": "api", "type": "REST", "port": 80, "schemaPath": "api.yaml"}]
        }));

        assert!(yaml.contains("image: IMAGE_TAG"));
        assert!(yaml.contains("content: SCHEMA_CONTENT"));
        assert!(!yaml.contains("api.yaml"));
    }

    #[test]
    fn test_endpoint_keys_are_sorted() {
        let yaml = encode(json!({
            "endpoints": [
                {"name": "zeta", "type": "REST", "port": 1},
                {"name": "alpha", "type": "REST", "port": 2}
            ]
        }));

        let alpha = yaml.find("alpha:").unwrap();
        let zeta = yaml.find("zeta:").unwrap();
        assert!(alpha < zeta);
    }
}
