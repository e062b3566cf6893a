use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// All relative paths will be interpreted relative to this directory.
    #[arg(long, global = true)]
    pub cwd: Option<String>,

    /// Task file to read options from.
    /// If omitted, the nearest mutopt.toml in this or any parent directory is used.
    #[arg(long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write an example task file into the current directory
    Init,

    /// Print the resolved options for a task target
    Resolve(ResolveArgs),

    /// Validate the options for a task target; exits non-zero on failure
    Check(CheckArgs),
}

/// Arguments for the resolve command
#[derive(Parser, Debug)]
pub struct ResolveArgs {
    /// Task whose options to resolve (a top-level table in the task file)
    #[arg(value_name = "TASK")]
    pub task: String,

    /// Target within the task. Its options override the task's.
    #[arg(value_name = "TARGET")]
    pub target: Option<String>,

    /// Output format: "table" (default) or "json"
    #[arg(long, default_value = "table")]
    pub format: String,
}

/// Arguments for the check command
#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Task whose options to check
    #[arg(value_name = "TASK")]
    pub task: String,

    /// Target within the task. If omitted, every target in the task is checked.
    #[arg(value_name = "TARGET")]
    pub target: Option<String>,
}
