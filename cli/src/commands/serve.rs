// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! HTTP service command

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info};

use agent_manager_core::application::build_ci_manager::StandardBuildCiManagerService;
use agent_manager_core::application::repository_factory::create_repositories;
use agent_manager_core::domain::service_config::ServiceConfigManifest;
use agent_manager_core::presentation::api::app;

#[derive(Args)]
pub struct ServeArgs {
    /// HTTP listen host (overrides config)
    #[arg(long)]
    host: Option<String>,

    /// HTTP listen port (overrides config)
    #[arg(long)]
    port: Option<u16>,
}

pub async fn run(
    args: ServeArgs,
    config_path: Option<PathBuf>,
    log_level: Option<String>,
) -> Result<()> {
    // Subscriber first so config loading warnings are not lost
    let file_level = ServiceConfigManifest::peek_log_level(config_path.as_deref());
    crate::init_logging(&crate::resolve_log_level(log_level, file_level))?;

    let config = load_config(&args, config_path)?;

    info!("Configuration loaded: {}", config.metadata.name);

    let repositories = create_repositories(&config.storage_backend())
        .await
        .context("Failed to initialize repositories")?;

    let build_ci_manager = Arc::new(StandardBuildCiManagerService::new(
        repositories.organizations,
        repositories.projects,
        repositories.agents,
    ));

    let addr = config.bind_address();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    info!("Agent manager listening on {}", addr);

    axum::serve(listener, app(build_ci_manager))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    info!("Agent manager shutting down");

    Ok(())
}

fn load_config(args: &ServeArgs, config_path: Option<PathBuf>) -> Result<ServiceConfigManifest> {
    let mut config = ServiceConfigManifest::load_or_default(config_path)
        .context("Failed to load configuration")?;
    if let Some(host) = &args.host {
        config.spec.server.host = host.clone();
    }
    if let Some(port) = args.port {
        config.spec.server.port = port;
    }

    config
        .validate()
        .context("Configuration validation failed")?;

    Ok(config)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            info!("Received SIGTERM signal");
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::Mutex;

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    fn write_config(dir: &tempfile::TempDir) -> PathBuf {
        let path = dir.path().join("config.yaml");
        let yaml = ServiceConfigManifest::default().to_yaml_string().unwrap();
        std::fs::write(&path, yaml).unwrap();
        path
    }

    #[test]
    fn test_config_loading_logs_reach_subscriber() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir);
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();

        let args = ServeArgs {
            host: None,
            port: Some(9000),
        };
        let config = tracing::subscriber::with_default(subscriber, || {
            load_config(&args, Some(path.clone())).unwrap()
        });

        assert_eq!(config.spec.server.port, 9000);
        let output = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("Loading configuration from explicit path"));
    }

    #[test]
    fn test_invalid_override_fails_validation() {
        let dir = tempfile::tempdir().unwrap();
        let args = ServeArgs {
            host: None,
            port: Some(0),
        };

        assert!(load_config(&args, Some(write_config(&dir))).is_err());
    }
}
