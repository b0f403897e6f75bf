// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::domain::organization::{OrganizationId, ProjectId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AgentId(pub Uuid);

impl AgentId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for AgentId {
    fn default() -> Self {
        Self::new()
    }
}

/// An agent registered under a project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    pub id: AgentId,
    pub org_id: OrganizationId,
    pub project_id: ProjectId,
    pub name: String,

    /// Deployment details captured at creation time; absent for agents that
    /// are not built by the platform
    pub details: Option<AgentDetails>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Stored as JSON alongside the agent row
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentDetails {
    /// Free-form workload specification authored in the console
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workload_spec: Option<Map<String, Value>>,
}

impl Agent {
    pub fn new(
        org_id: OrganizationId,
        project_id: ProjectId,
        name: impl Into<String>,
        details: Option<AgentDetails>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: AgentId::new(),
            org_id,
            project_id,
            name: name.into(),
            details,
            created_at: now,
            updated_at: now,
        }
    }

    /// Agent carrying the given workload specification
    pub fn with_workload_spec(
        org_id: OrganizationId,
        project_id: ProjectId,
        name: impl Into<String>,
        workload_spec: Map<String, Value>,
    ) -> Self {
        Self::new(
            org_id,
            project_id,
            name,
            Some(AgentDetails {
                workload_spec: Some(workload_spec),
            }),
        )
    }

    pub fn workload_spec(&self) -> Option<&Map<String, Value>> {
        self.details.as_ref()?.workload_spec.as_ref()
    }
}
