// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrganizationId(pub Uuid);

impl OrganizationId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for OrganizationId {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProjectId(pub Uuid);

impl ProjectId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ProjectId {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Organization {
    pub id: OrganizationId,

    /// Display name used inside the agent manager
    pub org_name: String,

    /// Name of the organization in the deployment plane; doubles as the
    /// namespace of every workload rendered for it
    pub open_choreo_org_name: String,

    pub created_at: DateTime<Utc>,
}

impl Organization {
    pub fn new(org_name: impl Into<String>, open_choreo_org_name: impl Into<String>) -> Self {
        Self {
            id: OrganizationId::new(),
            org_name: org_name.into(),
            open_choreo_org_name: open_choreo_org_name.into(),
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub org_id: OrganizationId,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl Project {
    pub fn new(org_id: OrganizationId, name: impl Into<String>) -> Self {
        Self {
            id: ProjectId::new(),
            org_id,
            name: name.into(),
            created_at: Utc::now(),
        }
    }
}
