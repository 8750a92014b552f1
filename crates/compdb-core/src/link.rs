use crate::error::{CompdbError, Result};
use crate::paths;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkOutcome {
    Created,
    AlreadyPresent,
}

/// Point `<workspace>/external` at `<execution_root>/external` so include
/// paths into external repositories resolve from the workspace root.
///
/// Anything already at the link path, including a dangling symlink, is left
/// untouched.
pub fn link_external(workspace: &Path, execution_root: &Path) -> Result<LinkOutcome> {
    let link = paths::external_link_path(workspace);
    if std::fs::symlink_metadata(&link).is_ok() {
        return Ok(LinkOutcome::AlreadyPresent);
    }

    let target = paths::external_target_path(execution_root);
    symlink_dir(&target, &link).map_err(|source| CompdbError::Symlink {
        link: link.clone(),
        target: target.clone(),
        source,
    })?;
    tracing::info!(link = %link.display(), target = %target.display(), "linked external");
    Ok(LinkOutcome::Created)
}

#[cfg(unix)]
fn symlink_dir(target: &Path, link: &Path) -> std::io::Result<()> {
    std::os::unix::fs::symlink(target, link)
}

#[cfg(windows)]
fn symlink_dir(target: &Path, link: &Path) -> std::io::Result<()> {
    std::os::windows::fs::symlink_dir(target, link)
}
