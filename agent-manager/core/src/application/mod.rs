// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

pub mod build_ci_manager;
pub mod repository_factory;
pub mod workload_renderer;

// Re-export use cases for convenience
pub use build_ci_manager::{
    BuildCallbackError, BuildCiManagerService, StandardBuildCiManagerService,
};
pub use workload_renderer::{WorkloadOwnerRef, WorkloadRenderer};
