// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Domain Layer
//!
//! Entities the build callback resolves (organization, project, agent), the
//! user-authored workload specification, and the `Workload` resource rendered
//! from it.

pub mod agent;
pub mod organization;
pub mod repository;
pub mod service_config;
pub mod workload;
pub mod workload_spec;
