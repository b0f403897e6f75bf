// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Repository Factory - Application Layer
//!
//! Creates concrete repository implementations based on the storage backend
//! configuration, keeping the domain layer free of infrastructure types.
//!
//! # Architecture
//!
//! - **Layer:** Application Layer
//! - **Purpose:** Wire repositories for the configured backend

use anyhow::Result;
use std::sync::Arc;
use tracing::info;

use crate::domain::repository::{
    AgentRepository, OrganizationRepository, ProjectRepository, StorageBackend,
};
use crate::infrastructure::db::Database;
use crate::infrastructure::repositories::{
    InMemoryAgentRepository, InMemoryOrganizationRepository, InMemoryProjectRepository,
    PostgresAgentRepository, PostgresOrganizationRepository, PostgresProjectRepository,
};

/// Repository handles consumed by the build callback service
#[derive(Clone)]
pub struct Repositories {
    pub organizations: Arc<dyn OrganizationRepository>,
    pub projects: Arc<dyn ProjectRepository>,
    pub agents: Arc<dyn AgentRepository>,
}

impl Repositories {
    pub fn in_memory() -> Self {
        Self {
            organizations: Arc::new(InMemoryOrganizationRepository::new()),
            projects: Arc::new(InMemoryProjectRepository::new()),
            agents: Arc::new(InMemoryAgentRepository::new()),
        }
    }

    pub fn postgres(database: &Database) -> Self {
        let pool = database.get_pool().clone();
        Self {
            organizations: Arc::new(PostgresOrganizationRepository::new(pool.clone())),
            projects: Arc::new(PostgresProjectRepository::new(pool.clone())),
            agents: Arc::new(PostgresAgentRepository::new(pool)),
        }
    }
}

/// Creates repositories for the configured backend, connecting and migrating
/// the database when PostgreSQL is selected
pub async fn create_repositories(backend: &StorageBackend) -> Result<Repositories> {
    match backend {
        StorageBackend::InMemory => {
            info!("Using in-memory repositories");
            Ok(Repositories::in_memory())
        }
        StorageBackend::PostgreSQL(config) => {
            let database = Database::new(config).await?;
            database.migrate().await?;
            info!("Connected to PostgreSQL and applied migrations");
            Ok(Repositories::postgres(&database))
        }
    }
}
