// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Offline workload rendering
//!
//! Renders a workload specification file (JSON or YAML) the same way the
//! build callback does, without touching any store.

use anyhow::{Context, Result};
use clap::Args;
use std::path::{Path, PathBuf};

use agent_manager_core::application::workload_renderer::{WorkloadOwnerRef, WorkloadRenderer};
use agent_manager_core::infrastructure::workload_encoder::{WorkloadEncoder, YamlWorkloadEncoder};

#[derive(Args)]
pub struct RenderArgs {
    /// Path to the workload specification (.json, .yaml or .yml)
    #[arg(long, value_name = "FILE")]
    spec: PathBuf,

    /// Deployment-plane organization name (workload namespace)
    #[arg(long)]
    org: String,

    /// Project name
    #[arg(long)]
    project: String,

    /// Agent (component) name
    #[arg(long)]
    agent: String,

    /// Write the rendered template to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,
}

pub fn run(args: RenderArgs) -> Result<()> {
    let workload_cr = render_file(&args.spec, &args.org, &args.project, &args.agent)?;

    match args.output {
        Some(path) => std::fs::write(&path, workload_cr)
            .with_context(|| format!("Failed to write workload template to {:?}", path))?,
        None => print!("{}", workload_cr),
    }

    Ok(())
}

fn render_file(spec_path: &Path, org: &str, project: &str, agent: &str) -> Result<String> {
    let content = std::fs::read_to_string(spec_path)
        .with_context(|| format!("Failed to read workload specification: {:?}", spec_path))?;

    let is_json = spec_path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let spec: serde_json::Value = if is_json {
        serde_json::from_str(&content).context("Failed to parse JSON workload specification")?
    } else {
        serde_yaml::from_str(&content).context("Failed to parse YAML workload specification")?
    };

    let spec = spec
        .as_object()
        .with_context(|| format!("Workload specification in {:?} must be a mapping", spec_path))?;

    let workload = WorkloadRenderer::render_from_map(
        spec,
        WorkloadOwnerRef {
            org_name: org,
            project_name: project,
            component_name: agent,
        },
    );

    YamlWorkloadEncoder::new()
        .encode(&workload)
        .context("Failed to serialize workload template")
}
