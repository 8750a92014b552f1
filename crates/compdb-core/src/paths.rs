use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// File and directory names
// ---------------------------------------------------------------------------

pub const CONFIG_FILE: &str = ".bazel-compdb";
pub const COMPILE_COMMANDS_FILE: &str = "compile_commands.json";
pub const EXTERNAL_DIR: &str = "external";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn compile_commands_path(workspace: &Path) -> PathBuf {
    workspace.join(COMPILE_COMMANDS_FILE)
}

pub fn config_path(dir: &Path) -> PathBuf {
    dir.join(CONFIG_FILE)
}

/// `~/.bazel-compdb`, or `None` when no home directory can be determined.
pub fn user_config_path() -> Option<PathBuf> {
    home::home_dir().map(|home| config_path(&home))
}

pub fn external_link_path(workspace: &Path) -> PathBuf {
    workspace.join(EXTERNAL_DIR)
}

pub fn external_target_path(execution_root: &Path) -> PathBuf {
    execution_root.join(EXTERNAL_DIR)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
