// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # PostgreSQL Organization Repository
//!
//! `OrganizationRepository` backed by the `organizations` table. Lookups key
//! on `open_choreo_org_name`, the name callers use in build callback URLs.

use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgRow};
use sqlx::Row;

use crate::domain::organization::{Organization, OrganizationId};
use crate::domain::repository::{OrganizationRepository, RepositoryError};

pub struct PostgresOrganizationRepository {
    pool: PgPool,
}

impl PostgresOrganizationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn from_row(row: &PgRow) -> Result<Organization, RepositoryError> {
        Ok(Organization {
            id: OrganizationId(row.try_get("id")?),
            org_name: row.try_get("org_name")?,
            open_choreo_org_name: row.try_get("open_choreo_org_name")?,
            created_at: row.try_get("created_at")?,
        })
    }
}

#[async_trait]
impl OrganizationRepository for PostgresOrganizationRepository {
    async fn save(&self, organization: &Organization) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO organizations (id, org_name, open_choreo_org_name, created_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (id) DO UPDATE SET
                org_name = EXCLUDED.org_name,
                open_choreo_org_name = EXCLUDED.open_choreo_org_name
            "#,
        )
        .bind(organization.id.0)
        .bind(&organization.org_name)
        .bind(&organization.open_choreo_org_name)
        .bind(organization.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::Database(format!("Failed to save organization: {}", e)))?;

        Ok(())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Organization>, RepositoryError> {
        let row = sqlx::query(
            r#"
            SELECT id, org_name, open_choreo_org_name, created_at
            FROM organizations
            WHERE open_choreo_org_name = $1
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepositoryError::Database(e.to_string()))?;

        row.as_ref().map(Self::from_row).transpose()
    }
}
