//! Configuration for a run.
//!
//! Settings come from up to four layers, each overriding the previous one:
//! `~/.bazel-compdb`, `<cwd>/.bazel-compdb`, the `--bazel` flag, and the
//! bazel arguments given after `--` on the command line.
//!
//! ```yaml
//! bazel: bazelisk
//! bazel_flags:
//!   - --config=clang
//! targets:
//!   - //src/...
//! ```

use crate::error::{CompdbError, Result};
use crate::io::read_optional;
use crate::paths;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_BAZEL: &str = "bazel";
pub const DEFAULT_TARGET: &str = "//...";

// ---------------------------------------------------------------------------
// ConfigLayer
// ---------------------------------------------------------------------------

/// One partial source of settings. `None` means "not set by this layer".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigLayer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bazel: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bazel_flags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub targets: Option<Vec<String>>,
}

impl ConfigLayer {
    /// Load a layer from a YAML file. Files that cannot be read yield `None`;
    /// an empty file is an empty layer.
    pub fn load(path: &Path) -> Result<Option<Self>> {
        let Some(data) = read_optional(path) else {
            return Ok(None);
        };
        if data.trim().is_empty() {
            return Ok(Some(Self::default()));
        }
        let layer = serde_yaml::from_str(&data).map_err(|source| CompdbError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "loaded config file");
        Ok(Some(layer))
    }

    /// Merge the config files found in the home directory and in `cwd`.
    pub fn discover(cwd: &Path) -> Result<Self> {
        let mut candidates = Vec::new();
        if let Some(user) = paths::user_config_path() {
            candidates.push(user);
        }
        candidates.push(paths::config_path(cwd));

        let mut merged = Self::default();
        for path in candidates {
            if let Some(layer) = Self::load(&path)? {
                merged = merged.merge(layer);
            }
        }
        Ok(merged)
    }

    /// Layer built from the arguments that follow `--` on the command line.
    pub fn from_bazel_args(args: &[String]) -> Self {
        let (flags, targets) = split_bazel_args(args);
        Self {
            bazel: None,
            bazel_flags: non_empty(flags),
            targets: non_empty(targets),
        }
    }

    /// Apply `over` on top of `self`. A non-empty `bazel` and any present
    /// list replace the current value.
    pub fn merge(self, over: Self) -> Self {
        Self {
            bazel: over.bazel.filter(|b| !b.is_empty()).or(self.bazel),
            bazel_flags: over.bazel_flags.or(self.bazel_flags),
            targets: over.targets.or(self.targets),
        }
    }

    /// Fill in defaults for everything no layer set.
    pub fn resolve(self) -> Config {
        let targets = match self.targets {
            Some(targets) if !targets.is_empty() => targets,
            _ => vec![DEFAULT_TARGET.to_string()],
        };
        Config {
            bazel: self
                .bazel
                .filter(|b| !b.is_empty())
                .unwrap_or_else(|| DEFAULT_BAZEL.to_string()),
            bazel_flags: self.bazel_flags.unwrap_or_default(),
            targets,
        }
    }
}

fn non_empty(items: Vec<String>) -> Option<Vec<String>> {
    if items.is_empty() {
        None
    } else {
        Some(items)
    }
}

// ---------------------------------------------------------------------------
// Config (resolved)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub bazel: String,
    pub bazel_flags: Vec<String>,
    pub targets: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        ConfigLayer::default().resolve()
    }
}

// ---------------------------------------------------------------------------
// Argument splitting
// ---------------------------------------------------------------------------

/// Split at the first `--`, returning the arguments before and after it.
pub fn split_at_separator(args: &[String]) -> (&[String], &[String]) {
    match args.iter().position(|a| a == "--") {
        Some(idx) => (&args[..idx], &args[idx + 1..]),
        None => (args, &args[args.len()..]),
    }
}

/// Sort bazel arguments into flags and targets.
///
/// Before a `--`, arguments starting with `-` are flags and everything else
/// is a target. Everything after a `--` is joined into a single query
/// expression target.
pub fn split_bazel_args(args: &[String]) -> (Vec<String>, Vec<String>) {
    let (before, after) = split_at_separator(args);
    let (flags, mut targets): (Vec<String>, Vec<String>) =
        before.iter().cloned().partition(|a| a.starts_with('-'));

    let expression = after.join(" ");
    let expression = expression.trim();
    if !expression.is_empty() {
        targets.push(expression.to_string());
    }
    (flags, targets)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
