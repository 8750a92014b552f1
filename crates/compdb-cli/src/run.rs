use crate::output::{print_json, print_summary};
use anyhow::{anyhow, Context, Result};
use compdb_core::config::Config;
use compdb_core::runner;

pub fn run(config: &Config, json: bool) -> Result<()> {
    let rt = tokio::runtime::Runtime::new()?;

    let summary = rt.block_on(async {
        // Dropping the run future kills any bazel child still running.
        tokio::select! {
            res = runner::run(config) => res.context("failed to generate compile_commands.json"),
            _ = shutdown_signal() => Err(anyhow!("interrupted")),
        }
    })?;

    tracing::info!(
        actions = summary.actions,
        commands = summary.commands,
        "run complete"
    );

    if json {
        print_json(&summary)?;
    } else {
        print_summary(&summary);
    }
    Ok(())
}

/// Resolves on Ctrl-C, or on SIGTERM where available.
async fn shutdown_signal() {
    let ctrl_c = async {
        if tokio::signal::ctrl_c().await.is_err() {
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::warn!("received shutdown signal");
}
