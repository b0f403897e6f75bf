// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Agent Manager Core
//!
//! Resolves build-completion callbacks for agents into `Workload` resource
//! templates for the build pipeline.
//!
//! # Architecture
//!
//! - **Layer:** Core System
//! - **Modules:** `domain`, `application`, `infrastructure`, `presentation`

pub mod domain;
pub mod application;
pub mod infrastructure;
pub mod presentation;

pub use domain::*;
