// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Domain Repository Interfaces
//!
//! Lookup contracts for the entities a build callback walks through, one
//! repository per aggregate. Interfaces live here; implementations live in
//! `crate::infrastructure::repositories`.
//!
//! | Trait | Aggregate | Implementations |
//! |-------|-----------|----------------|
//! | `OrganizationRepository` | `Organization` | `InMemoryOrganizationRepository`, `PostgresOrganizationRepository` |
//! | `ProjectRepository` | `Project` | `InMemoryProjectRepository`, `PostgresProjectRepository` |
//! | `AgentRepository` | `Agent` | `InMemoryAgentRepository`, `PostgresAgentRepository` |
//!
//! Lookups return `Ok(None)` when the row does not exist. `Err` is reserved
//! for storage failures so callers can tell "missing" from "broken".

use async_trait::async_trait;

use crate::domain::agent::Agent;
use crate::domain::organization::{Organization, OrganizationId, Project, ProjectId};

/// Storage backend selected at startup
#[derive(Debug, Clone)]
pub enum StorageBackend {
    InMemory,
    PostgreSQL(PostgresConfig),
}

#[derive(Debug, Clone)]
pub struct PostgresConfig {
    pub connection_string: String,
    pub max_connections: u32,
}

#[async_trait]
pub trait OrganizationRepository: Send + Sync {
    /// Save organization (create or update)
    async fn save(&self, organization: &Organization) -> Result<(), RepositoryError>;

    /// Find organization by its deployment-plane name
    async fn find_by_name(&self, name: &str) -> Result<Option<Organization>, RepositoryError>;
}

#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// Save project (create or update)
    async fn save(&self, project: &Project) -> Result<(), RepositoryError>;

    /// Find project by name within an organization
    async fn find_by_name(
        &self,
        org_id: OrganizationId,
        name: &str,
    ) -> Result<Option<Project>, RepositoryError>;
}

#[async_trait]
pub trait AgentRepository: Send + Sync {
    /// Save agent (create or update)
    async fn save(&self, agent: &Agent) -> Result<(), RepositoryError>;

    /// Find agent by name within a project
    async fn find_by_name(
        &self,
        org_id: OrganizationId,
        project_id: ProjectId,
        name: &str,
    ) -> Result<Option<Agent>, RepositoryError>;
}

/// Repository errors
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl RepositoryError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, RepositoryError::NotFound(_))
    }
}

impl From<sqlx::Error> for RepositoryError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => RepositoryError::NotFound("Row not found".to_string()),
            _ => RepositoryError::Database(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for RepositoryError {
    fn from(err: serde_json::Error) -> Self {
        RepositoryError::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_not_found_maps_to_not_found() {
        let err: RepositoryError = sqlx::Error::RowNotFound.into();
        assert!(err.is_not_found());

        let err: RepositoryError = sqlx::Error::PoolTimedOut.into();
        assert!(!err.is_not_found());
        assert!(err.to_string().starts_with("Database error"));
    }
}
