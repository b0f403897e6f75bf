// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # PostgreSQL Project Repository
//!
//! `ProjectRepository` backed by the `projects` table; names are unique per
//! organization.

use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgRow};
use sqlx::Row;

use crate::domain::organization::{OrganizationId, Project, ProjectId};
use crate::domain::repository::{ProjectRepository, RepositoryError};

pub struct PostgresProjectRepository {
    pool: PgPool,
}

impl PostgresProjectRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn from_row(row: &PgRow) -> Result<Project, RepositoryError> {
        Ok(Project {
            id: ProjectId(row.try_get("id")?),
            org_id: OrganizationId(row.try_get("org_id")?),
            name: row.try_get("name")?,
            created_at: row.try_get("created_at")?,
        })
    }
}

#[async_trait]
impl ProjectRepository for PostgresProjectRepository {
    async fn save(&self, project: &Project) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO projects (id, org_id, name, created_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (id) DO UPDATE SET
                name = EXCLUDED.name
            "#,
        )
        .bind(project.id.0)
        .bind(project.org_id.0)
        .bind(&project.name)
        .bind(project.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::Database(format!("Failed to save project: {}", e)))?;

        Ok(())
    }

    async fn find_by_name(
        &self,
        org_id: OrganizationId,
        name: &str,
    ) -> Result<Option<Project>, RepositoryError> {
        let row = sqlx::query(
            r#"
            SELECT id, org_id, name, created_at
            FROM projects
            WHERE org_id = $1 AND name = $2
            "#,
        )
        .bind(org_id.0)
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepositoryError::Database(e.to_string()))?;

        row.as_ref().map(Self::from_row).transpose()
    }
}
