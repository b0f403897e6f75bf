// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Build Callback Use Case
//!
//! Application service invoked when the CI build of an agent completes.
//!
//! # DDD Pattern: Application Service
//!
//! - **Layer:** Application
//! - **Responsibility:** Resolve the agent and hand back its workload template
//! - **Collaborators:**
//!   - Domain: OrganizationRepository, ProjectRepository, AgentRepository
//!   - Application: WorkloadRenderer
//!   - Infrastructure: WorkloadEncoder
//!
//! # Flow
//!
//! 1. Resolve organization by its deployment-plane name
//! 2. Resolve project within the organization
//! 3. Resolve agent within the project
//! 4. Extract the stored workload specification
//! 5. Render the `Workload` template with `IMAGE_TAG` / `SCHEMA_CONTENT` placeholders
//! 6. Encode to YAML and return it
//!
//! # Error Handling
//!
//! Missing entities and storage failures end the request with a
//! [`BuildCallbackError`]. An encoding failure does not: it is logged and the
//! callback yields an empty document, which the pipeline treats as
//! "no template".

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{error, info};

use crate::application::workload_renderer::{WorkloadOwnerRef, WorkloadRenderer};
use crate::domain::repository::{
    AgentRepository, OrganizationRepository, ProjectRepository, RepositoryError,
};
use crate::infrastructure::workload_encoder::{WorkloadEncoder, YamlWorkloadEncoder};

/// Lookup stage that failed with a storage error
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupStage {
    Organization(String),
    Project(String),
    Agent(String),
}

impl std::fmt::Display for LookupStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LookupStage::Organization(name) => write!(f, "failed to find organization {}", name),
            LookupStage::Project(name) => write!(f, "failed to find project {}", name),
            LookupStage::Agent(_) => write!(f, "failed to fetch agent"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum BuildCallbackError {
    #[error("organization not found: {0}")]
    OrganizationNotFound(String),

    #[error("project not found: {0}")]
    ProjectNotFound(String),

    #[error("agent not found: {0}")]
    AgentNotFound(String),

    #[error("agent workload specification is missing for agent: {0}")]
    MissingWorkloadSpec(String),

    #[error("{stage}: {source}")]
    Lookup {
        stage: LookupStage,
        #[source]
        source: RepositoryError,
    },
}

impl BuildCallbackError {
    /// True for errors caused by the request naming something that does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            BuildCallbackError::OrganizationNotFound(_)
                | BuildCallbackError::ProjectNotFound(_)
                | BuildCallbackError::AgentNotFound(_)
                | BuildCallbackError::MissingWorkloadSpec(_)
        )
    }
}

#[async_trait]
pub trait BuildCiManagerService: Send + Sync {
    /// Produce the workload template for a freshly built agent
    ///
    /// # Returns
    ///
    /// YAML text of the `Workload` resource, or an empty string when the
    /// resource could not be encoded
    ///
    /// # Errors
    ///
    /// - Organization, project or agent not found
    /// - Agent has no workload specification
    /// - Storage failure during any lookup
    async fn handle_build_callback(
        &self,
        org_name: &str,
        project_name: &str,
        agent_name: &str,
    ) -> Result<String, BuildCallbackError>;
}

pub struct StandardBuildCiManagerService {
    organization_repository: Arc<dyn OrganizationRepository>,
    project_repository: Arc<dyn ProjectRepository>,
    agent_repository: Arc<dyn AgentRepository>,
    encoder: Arc<dyn WorkloadEncoder>,
}

impl StandardBuildCiManagerService {
    pub fn new(
        organization_repository: Arc<dyn OrganizationRepository>,
        project_repository: Arc<dyn ProjectRepository>,
        agent_repository: Arc<dyn AgentRepository>,
    ) -> Self {
        Self::with_encoder(
            organization_repository,
            project_repository,
            agent_repository,
            Arc::new(YamlWorkloadEncoder::new()),
        )
    }

    pub fn with_encoder(
        organization_repository: Arc<dyn OrganizationRepository>,
        project_repository: Arc<dyn ProjectRepository>,
        agent_repository: Arc<dyn AgentRepository>,
        encoder: Arc<dyn WorkloadEncoder>,
    ) -> Self {
        Self {
            organization_repository,
            project_repository,
            agent_repository,
            encoder,
        }
    }
}

#[async_trait]
impl BuildCiManagerService for StandardBuildCiManagerService {
    async fn handle_build_callback(
        &self,
        org_name: &str,
        project_name: &str,
        agent_name: &str,
    ) -> Result<String, BuildCallbackError> {
        let org = self
            .organization_repository
            .find_by_name(org_name)
            .await
            .map_err(|source| BuildCallbackError::Lookup {
                stage: LookupStage::Organization(org_name.to_string()),
                source,
            })?
            .ok_or_else(|| {
                error!(organization = org_name, "Organization not found");
                BuildCallbackError::OrganizationNotFound(org_name.to_string())
            })?;

        let project = self
            .project_repository
            .find_by_name(org.id, project_name)
            .await
            .map_err(|source| BuildCallbackError::Lookup {
                stage: LookupStage::Project(project_name.to_string()),
                source,
            })?
            .ok_or_else(|| {
                error!(project = project_name, organization = org_name, "Project not found");
                BuildCallbackError::ProjectNotFound(project_name.to_string())
            })?;

        let agent = self
            .agent_repository
            .find_by_name(org.id, project.id, agent_name)
            .await
            .map_err(|source| BuildCallbackError::Lookup {
                stage: LookupStage::Agent(agent_name.to_string()),
                source,
            })?
            .ok_or_else(|| {
                error!(
                    agent_name,
                    project = project_name,
                    organization = org_name,
                    "Agent not found"
                );
                BuildCallbackError::AgentNotFound(agent_name.to_string())
            })?;

        let workload_spec = agent
            .workload_spec()
            .ok_or_else(|| BuildCallbackError::MissingWorkloadSpec(agent_name.to_string()))?;

        let workload = WorkloadRenderer::render_from_map(
            workload_spec,
            WorkloadOwnerRef {
                org_name: &org.open_choreo_org_name,
                project_name,
                component_name: agent_name,
            },
        );

        let workload_cr = match self.encoder.encode(&workload) {
            Ok(text) => text,
            Err(e) => {
                error!(agent_name, error = %e, "Failed to encode workload CR template");
                String::new()
            }
        };

        info!(
            agent_name,
            project = project_name,
            organization = %org.org_name,
            "Successfully generated workload CR template"
        );

        Ok(workload_cr)
    }
}
