use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CompdbError {
    #[error("bazel binary not found: {0}")]
    BazelNotFound(String),

    #[error("{command} failed: {status}\n{stderr}")]
    CommandFailed {
        command: String,
        status: ExitStatus,
        stderr: String,
    },

    #[error("{0} returned empty path")]
    EmptyInfo(String),

    #[error("decode aquery proto: {0}")]
    Decode(#[from] prost::DecodeError),

    #[error("parse {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("create symlink {} -> {}: {source}", link.display(), target.display())]
    Symlink {
        link: PathBuf,
        target: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unable to determine current directory: {0}")]
    CurrentDir(#[source] std::io::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CompdbError>;
