use anyhow::Result;
use clap::{Parser, Subcommand};
use std::process::Command;

const WASM_TARGET: &str = "wasm32-unknown-unknown";

#[derive(Parser)]
#[command(name = "xtask", about = "Workspace automation for simview")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run fmt, clippy, tests and docs
    Check,
    /// Run cargo fmt --check on all crates
    Fmt,
    /// Run clippy on all crates
    Clippy,
    /// Run all tests
    Test,
    /// Build rustdoc for the workspace
    Doc,
    /// Build the native workspace
    Build,
    /// Build the browser viewer for wasm32
    Web {
        /// Build with optimizations
        #[arg(long)]
        release: bool,
    },
}

/// A named cargo invocation.
struct Step {
    label: &'static str,
    args: Vec<&'static str>,
}

impl Step {
    fn new(label: &'static str, args: &[&'static str]) -> Self {
        Self {
            label,
            args: args.to_vec(),
        }
    }

    fn run(&self) -> Result<()> {
        println!("==> cargo {}", self.args.join(" "));
        let status = Command::new("cargo").args(&self.args).status()?;
        if !status.success() {
            anyhow::bail!("{} failed", self.label);
        }
        Ok(())
    }
}

fn fmt() -> Step {
    Step::new("cargo fmt check", &["fmt", "--all", "--", "--check"])
}

fn clippy() -> Step {
    Step::new(
        "cargo clippy",
        &["clippy", "--workspace", "--all-targets", "--", "-D", "warnings"],
    )
}

fn test() -> Step {
    Step::new("cargo test", &["test", "--workspace"])
}

fn doc() -> Step {
    Step::new("cargo doc", &["doc", "--workspace", "--no-deps"])
}

fn build() -> Step {
    Step::new("cargo build", &["build", "--workspace"])
}

fn web(release: bool) -> Step {
    let mut step = Step::new(
        "wasm build",
        &["build", "-p", "simview-web", "--target", WASM_TARGET],
    );
    if release {
        step.args.push("--release");
    }
    step
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let steps = match cli.command {
        Commands::Check => vec![fmt(), clippy(), test(), doc()],
        Commands::Fmt => vec![fmt()],
        Commands::Clippy => vec![clippy()],
        Commands::Test => vec![test()],
        Commands::Doc => vec![doc()],
        Commands::Build => vec![build()],
        Commands::Web { release } => vec![web(release)],
    };

    for step in &steps {
        step.run()?;
    }
    Ok(())
}
