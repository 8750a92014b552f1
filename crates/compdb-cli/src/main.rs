mod output;
mod run;

use anyhow::Context;
use clap::Parser;
use compdb_core::config::{Config, ConfigLayer};

#[derive(Parser)]
#[command(
    name = "bazel-compdb",
    about = "Generate compile_commands.json from the C/C++/Objective-C/CUDA actions of a Bazel build",
    version
)]
struct Cli {
    /// Path to the bazel binary (default: `bazel` on PATH)
    #[arg(long, value_name = "PATH")]
    bazel: Option<String>,

    /// Print the run summary as JSON
    #[arg(long, short = 'j')]
    json: bool,

    /// Bazel flags and targets; anything after a second `--` is one query expression
    #[arg(last = true, value_name = "BAZEL_ARGS")]
    bazel_args: Vec<String>,
}

impl Cli {
    /// Config files first, then `--bazel`, then the arguments after `--`.
    fn config(&self) -> anyhow::Result<Config> {
        let cwd = std::env::current_dir().map_err(compdb_core::CompdbError::CurrentDir)?;
        let layer = ConfigLayer::discover(&cwd)
            .context("failed to load config")?
            .merge(ConfigLayer {
                bazel: self.bazel.clone(),
                ..Default::default()
            })
            .merge(ConfigLayer::from_bazel_args(&self.bazel_args));
        Ok(layer.resolve())
    }
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = match cli.config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e:#}");
            std::process::exit(2);
        }
    };
    tracing::debug!(?config, "resolved config");

    if let Err(e) = run::run(&config, cli.json) {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
