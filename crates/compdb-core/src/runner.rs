//! One full regeneration of `compile_commands.json`.

use crate::action;
use crate::bazel::Bazel;
use crate::config::Config;
use crate::database;
use crate::error::Result;
use crate::link::{self, LinkOutcome};
use crate::query;
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub workspace: PathBuf,
    pub database: PathBuf,
    pub actions: usize,
    pub commands: usize,
    pub external: LinkOutcome,
}

/// Query bazel, rebuild the database, and link `external`.
///
/// Any bazel failure before decoding stops the run without touching the
/// existing database.
pub async fn run(config: &Config) -> Result<RunSummary> {
    let bazel = Bazel::locate(&config.bazel)?;

    let workspace = bazel.workspace().await?;
    let workspace_path = Path::new(&workspace);
    tracing::debug!(workspace = %workspace, "resolved workspace");

    let args = query::aquery_args(config);
    let stdout = bazel.aquery(workspace_path, &args).await?;
    let actions = action::decode(&stdout)?;

    let commands = database::assemble(&workspace, &actions);
    let database = database::write(workspace_path, &commands)?;
    tracing::info!(
        path = %database.display(),
        commands = commands.len(),
        "wrote compile commands"
    );

    let execution_root = bazel.execution_root(workspace_path).await?;
    let external = link::link_external(workspace_path, Path::new(&execution_root))?;

    Ok(RunSummary {
        workspace: workspace_path.to_path_buf(),
        database,
        actions: actions.len(),
        commands: commands.len(),
        external,
    })
}
