use crate::config::{Config, DEFAULT_TARGET};

/// Mnemonic filter matching every compile kind the classifier understands.
pub const COMPILE_MNEMONIC_PATTERN: &str = "(Cpp|Objc|Cuda)Compile";

/// Wrap each target in a mnemonic filter so aquery only reports compile
/// actions. An empty list queries the whole workspace.
pub fn build_query(targets: &[String]) -> Vec<String> {
    if targets.is_empty() {
        return vec![wrap_target(DEFAULT_TARGET)];
    }
    targets.iter().map(|t| wrap_target(t)).collect()
}

fn wrap_target(target: &str) -> String {
    format!("mnemonic(\"{COMPILE_MNEMONIC_PATTERN}\", {target})")
}

/// Full argument vector for the aquery invocation, without the binary.
pub fn aquery_args(config: &Config) -> Vec<String> {
    let mut args = vec!["aquery".to_string()];
    args.extend(config.bazel_flags.iter().cloned());
    args.push("--output=proto".to_string());
    args.extend(build_query(&config.targets));
    args
}
