use crate::action::Action;
use crate::classifier::classify;
use crate::error::Result;
use crate::io::atomic_write;
use crate::paths;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// CompileCommand
// ---------------------------------------------------------------------------

/// One entry of `compile_commands.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompileCommand {
    pub directory: String,
    pub arguments: Vec<String>,
    pub file: String,
    pub output: String,
}

// ---------------------------------------------------------------------------
// Assembly
// ---------------------------------------------------------------------------

/// Build database entries for every action that classifies as a compile step.
///
/// Entries keep the order of `actions`. The full argument vector is copied so
/// tools can replay the exact compiler invocation.
pub fn assemble(workspace: &str, actions: &[Action]) -> Vec<CompileCommand> {
    let mut commands = Vec::new();
    for action in actions {
        let Some(classified) = classify(&action.mnemonic, &action.arguments) else {
            tracing::trace!(mnemonic = %action.mnemonic, "skipping action");
            continue;
        };
        commands.push(CompileCommand {
            directory: workspace.to_string(),
            arguments: action.arguments.clone(),
            file: classified.source,
            output: classified.output,
        });
    }
    tracing::debug!(
        actions = actions.len(),
        commands = commands.len(),
        "assembled compile commands"
    );
    commands
}

// ---------------------------------------------------------------------------
// Writing
// ---------------------------------------------------------------------------

/// Pretty-printed JSON array (two-space indent) with a trailing newline.
pub fn render(commands: &[CompileCommand]) -> Result<String> {
    let mut data = serde_json::to_string_pretty(commands)?;
    data.push('\n');
    Ok(data)
}

/// Replace `<workspace>/compile_commands.json` with `commands`.
pub fn write(workspace: &Path, commands: &[CompileCommand]) -> Result<PathBuf> {
    let path = paths::compile_commands_path(workspace);
    let data = render(commands)?;
    atomic_write(&path, data.as_bytes())?;
    Ok(path)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn args(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn sample_actions() -> Vec<Action> {
        vec![
            Action::new("CppCompile", args(&["cc1", "-c", "src/a.cc", "-o", "out/a.o"])),
            Action::new("GoCompile", args(&["go", "build"])),
        ]
    }

    #[test]
    fn assembles_only_compile_actions() {
        let commands = assemble("/ws", &sample_actions());
        assert_eq!(
            commands,
            vec![CompileCommand {
                directory: "/ws".into(),
                arguments: args(&["cc1", "-c", "src/a.cc", "-o", "out/a.o"]),
                file: "src/a.cc".into(),
                output: "out/a.o".into(),
            }]
        );
    }

    #[test]
    fn preserves_action_order() {
        let actions = vec![
            Action::new("CppCompile", args(&["cc", "z.cc", "-o", "z.o"])),
            Action::new("ObjcCompile", args(&["cc", "m.m", "-o", "m.o"])),
            Action::new("CudaCompile", args(&["nvcc", "a.cu", "-o", "a.o"])),
        ];
        let files: Vec<_> = assemble("/ws", &actions)
            .into_iter()
            .map(|c| c.file)
            .collect();
        assert_eq!(files, vec!["z.cc", "m.m", "a.cu"]);
    }

    #[test]
    fn keeps_duplicate_actions() {
        let action = Action::new("CppCompile", args(&["cc", "a.cc", "-o", "a.o"]));
        let commands = assemble("/ws", &[action.clone(), action]);
        assert_eq!(commands.len(), 2);
    }

    #[test]
    fn assemble_is_idempotent() {
        let actions = sample_actions();
        let first = render(&assemble("/ws", &actions)).unwrap();
        let second = render(&assemble("/ws", &actions)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn no_matches_is_empty() {
        let actions = vec![
            Action::new("GoCompile", args(&["go", "build"])),
            Action::new("CppCompile", vec![]),
        ];
        assert!(assemble("/ws", &actions).is_empty());
    }

    #[test]
    fn empty_database_renders_as_empty_array() {
        assert_eq!(render(&[]).unwrap(), "[]\n");
    }

    #[test]
    fn render_layout() {
        let commands = assemble("/ws", &sample_actions());
        let expected = r#"[
  {
    "directory": "/ws",
    "arguments": [
      "cc1",
      "-c",
      "src/a.cc",
      "-o",
      "out/a.o"
    ],
    "file": "src/a.cc",
    "output": "out/a.o"
  }
]
"#;
        assert_eq!(render(&commands).unwrap(), expected);
    }

    #[test]
    fn write_replaces_existing_database() {
        let dir = TempDir::new().unwrap();
        let existing = dir.path().join("compile_commands.json");
        std::fs::write(&existing, "stale").unwrap();

        let path = write(dir.path(), &[]).unwrap();
        assert_eq!(path, existing);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[]\n");
    }

    #[test]
    fn written_database_parses_back() {
        let dir = TempDir::new().unwrap();
        let commands = assemble("/ws", &sample_actions());
        let path = write(dir.path(), &commands).unwrap();
        let data = std::fs::read_to_string(path).unwrap();
        let parsed: Vec<CompileCommand> = serde_json::from_str(&data).unwrap();
        assert_eq!(parsed, commands);
    }
}
