// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! HTTP routes for the build pipeline.
//!
//! | Method | Path | Response |
//! |--------|------|----------|
//! | `POST` | `/api/v1/orgs/{org_name}/projects/{project_name}/agents/{agent_name}/build-callback` | `Workload` YAML |
//! | `GET` | `/health` | `{"status": "healthy"}` |

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;

use crate::application::build_ci_manager::{BuildCallbackError, BuildCiManagerService};

pub struct AppState {
    pub build_ci_manager: Arc<dyn BuildCiManagerService>,
}

pub fn app(build_ci_manager: Arc<dyn BuildCiManagerService>) -> Router {
    let state = Arc::new(AppState { build_ci_manager });

    Router::new()
        .route("/health", get(health))
        .route(
            "/api/v1/orgs/{org_name}/projects/{project_name}/agents/{agent_name}/build-callback",
            post(build_callback),
        )
        .with_state(state)
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "healthy" }))
}

async fn build_callback(
    State(state): State<Arc<AppState>>,
    Path((org_name, project_name, agent_name)): Path<(String, String, String)>,
) -> Response {
    match state
        .build_ci_manager
        .handle_build_callback(&org_name, &project_name, &agent_name)
        .await
    {
        Ok(workload_cr) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/yaml")],
            workload_cr,
        )
            .into_response(),
        Err(e) => error_response(&e),
    }
}

fn error_response(err: &BuildCallbackError) -> Response {
    let status = if err.is_not_found() {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };
    (status, Json(json!({ "error": err.to_string() }))).into_response()
}
