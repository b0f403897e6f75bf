// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # PostgreSQL Agent Repository
//!
//! `AgentRepository` backed by the `agents` table. Agent details, including
//! the user-authored workload specification, live in the `agent_details`
//! JSONB column as `{"workloadSpec": {...}}`.

use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgRow};
use sqlx::Row;

use crate::domain::agent::{Agent, AgentDetails, AgentId};
use crate::domain::organization::{OrganizationId, ProjectId};
use crate::domain::repository::{AgentRepository, RepositoryError};

pub struct PostgresAgentRepository {
    pool: PgPool,
}

impl PostgresAgentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn from_row(row: &PgRow) -> Result<Agent, RepositoryError> {
        let details_val: Option<serde_json::Value> = row.try_get("agent_details")?;
        let details = details_val
            .map(serde_json::from_value::<AgentDetails>)
            .transpose()
            .map_err(|e| {
                RepositoryError::Serialization(format!(
                    "Failed to deserialize agent details: {}",
                    e
                ))
            })?;

        Ok(Agent {
            id: AgentId(row.try_get("id")?),
            org_id: OrganizationId(row.try_get("org_id")?),
            project_id: ProjectId(row.try_get("project_id")?),
            name: row.try_get("name")?,
            details,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

#[async_trait]
impl AgentRepository for PostgresAgentRepository {
    async fn save(&self, agent: &Agent) -> Result<(), RepositoryError> {
        let details_json = agent
            .details
            .as_ref()
            .map(serde_json::to_value)
            .transpose()
            .map_err(|e| RepositoryError::Serialization(e.to_string()))?;

        sqlx::query(
            r#"
            INSERT INTO agents (
                id, org_id, project_id, name, agent_details, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (id) DO UPDATE SET
                name = EXCLUDED.name,
                agent_details = EXCLUDED.agent_details,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(agent.id.0)
        .bind(agent.org_id.0)
        .bind(agent.project_id.0)
        .bind(&agent.name)
        .bind(details_json)
        .bind(agent.created_at)
        .bind(agent.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::Database(format!("Failed to save agent: {}", e)))?;

        Ok(())
    }

    async fn find_by_name(
        &self,
        org_id: OrganizationId,
        project_id: ProjectId,
        name: &str,
    ) -> Result<Option<Agent>, RepositoryError> {
        let row = sqlx::query(
            r#"
            SELECT
                id, org_id, project_id, name, agent_details, created_at, updated_at
            FROM agents
            WHERE org_id = $1 AND project_id = $2 AND name = $3
            "#,
        )
        .bind(org_id.0)
        .bind(project_id.0)
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepositoryError::Database(e.to_string()))?;

        row.as_ref().map(Self::from_row).transpose()
    }
}
