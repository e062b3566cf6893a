use std::env;
use std::path::PathBuf;

use clap::Parser;
use log::debug;

use crate::core::cli::{Args, Commands};
use crate::core::cmds;
use crate::core::logging::configure_logging;
use crate::core::store::{DEFAULT_TASK_FILENAME, TomlTaskStore, find_nearest_task_file};
use crate::types::config::DEFAULT_LOG_LEVEL;
use crate::types::{AppError, AppResult};

pub fn run_main() -> AppResult<()> {
    let args = Args::parse();

    // Until a task is resolved, log at the default level
    configure_logging(DEFAULT_LOG_LEVEL)?;

    // Handle global arguments
    if let Some(cwd_arg) = args.cwd.as_ref() {
        let cwd = PathBuf::from(cwd_arg).canonicalize()?;
        env::set_current_dir(&cwd)?;
    }
    let cwd = env::current_dir()?;
    debug!("Current working directory: {}", cwd.display());

    let exit_code = match args.command {
        Commands::Init => {
            let filename = args.config.as_deref().unwrap_or(DEFAULT_TASK_FILENAME);
            cmds::execute_init(filename)?;
            0
        }
        Commands::Resolve(resolve_args) => {
            let store = load_store(args.config.as_deref(), &cwd)?;
            cmds::execute_resolve(&store, resolve_args)?
        }
        Commands::Check(check_args) => {
            let store = load_store(args.config.as_deref(), &cwd)?;
            cmds::execute_check(&store, check_args)?
        }
    };

    // Exit with appropriate code
    if exit_code != 0 {
        std::process::exit(exit_code);
    }

    Ok(())
}

fn load_store(config: Option<&str>, cwd: &std::path::Path) -> AppResult<TomlTaskStore> {
    let path = match config {
        Some(path) => PathBuf::from(path),
        None => find_nearest_task_file(cwd, DEFAULT_TASK_FILENAME).ok_or_else(|| {
            AppError::Custom(format!(
                "No {DEFAULT_TASK_FILENAME} found in {} or any parent directory; run `mutopt init` to create one",
                cwd.display()
            ))
        })?,
    };
    Ok(TomlTaskStore::load(&path)?)
}
