// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Repository Implementations
//!
//! Infrastructure implementations of the repository traits defined in the
//! domain layer.
//!
//! # Architecture
//!
//! - **Layer:** Infrastructure
//! - **Purpose:** Persist and retrieve organizations, projects and agents
//! - **Pattern:** Repository (DDD), Adapter (Hexagonal Architecture)
//!
//! # Available Implementations
//!
//! ## PostgreSQL Repositories
//!
//! - **PostgresOrganizationRepository** - `organizations` table
//! - **PostgresProjectRepository** - `projects` table
//! - **PostgresAgentRepository** - `agents` table, details as JSONB
//!
//! ## In-Memory Repositories
//!
//! HashMap-backed storage for tests and local development. Used whenever no
//! database is configured. `save` enforces the same name uniqueness as the
//! `UNIQUE` constraints in the initial migration, so name lookups never have
//! to pick between two matches.

pub mod postgres_agent;
pub mod postgres_organization;
pub mod postgres_project;

pub use postgres_agent::PostgresAgentRepository;
pub use postgres_organization::PostgresOrganizationRepository;
pub use postgres_project::PostgresProjectRepository;

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::agent::{Agent, AgentId};
use crate::domain::organization::{Organization, OrganizationId, Project, ProjectId};
use crate::domain::repository::{
    AgentRepository, OrganizationRepository, ProjectRepository, RepositoryError,
};

#[derive(Clone, Default)]
pub struct InMemoryOrganizationRepository {
    organizations: Arc<RwLock<HashMap<OrganizationId, Organization>>>,
}

impl InMemoryOrganizationRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OrganizationRepository for InMemoryOrganizationRepository {
    async fn save(&self, organization: &Organization) -> Result<(), RepositoryError> {
        let mut organizations = self.organizations.write();
        if organizations.values().any(|o| {
            o.id != organization.id && o.open_choreo_org_name == organization.open_choreo_org_name
        }) {
            return Err(RepositoryError::Database(format!(
                "organization '{}' already exists",
                organization.open_choreo_org_name
            )));
        }
        organizations.insert(organization.id, organization.clone());
        Ok(())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Organization>, RepositoryError> {
        let organizations = self.organizations.read();
        Ok(organizations
            .values()
            .find(|o| o.open_choreo_org_name == name)
            .cloned())
    }
}

#[derive(Clone, Default)]
pub struct InMemoryProjectRepository {
    projects: Arc<RwLock<HashMap<ProjectId, Project>>>,
}

impl InMemoryProjectRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProjectRepository for InMemoryProjectRepository {
    async fn save(&self, project: &Project) -> Result<(), RepositoryError> {
        let mut projects = self.projects.write();
        if projects
            .values()
            .any(|p| p.id != project.id && p.org_id == project.org_id && p.name == project.name)
        {
            return Err(RepositoryError::Database(format!(
                "project '{}' already exists in organization",
                project.name
            )));
        }
        projects.insert(project.id, project.clone());
        Ok(())
    }

    async fn find_by_name(
        &self,
        org_id: OrganizationId,
        name: &str,
    ) -> Result<Option<Project>, RepositoryError> {
        let projects = self.projects.read();
        Ok(projects
            .values()
            .find(|p| p.org_id == org_id && p.name == name)
            .cloned())
    }
}

#[derive(Clone, Default)]
pub struct InMemoryAgentRepository {
    agents: Arc<RwLock<HashMap<AgentId, Agent>>>,
}

impl InMemoryAgentRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AgentRepository for InMemoryAgentRepository {
    async fn save(&self, agent: &Agent) -> Result<(), RepositoryError> {
        let mut agents = self.agents.write();
        if agents.values().any(|a| {
            a.id != agent.id
                && a.org_id == agent.org_id
                && a.project_id == agent.project_id
                && a.name == agent.name
        }) {
            return Err(RepositoryError::Database(format!(
                "agent '{}' already exists in project",
                agent.name
            )));
        }
        agents.insert(agent.id, agent.clone());
        Ok(())
    }

    async fn find_by_name(
        &self,
        org_id: OrganizationId,
        project_id: ProjectId,
        name: &str,
    ) -> Result<Option<Agent>, RepositoryError> {
        let agents = self.agents.read();
        Ok(agents
            .values()
            .find(|a| a.org_id == org_id && a.project_id == project_id && a.name == name)
            .cloned())
    }
}
