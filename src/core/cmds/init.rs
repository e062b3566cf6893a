use std::fs;
use std::io::Write;
use std::path::Path;

use log::{info, warn};

use crate::types::AppResult;

const EXAMPLE_TASK_FILE: &str = include_str!("../../../example.toml");

pub fn execute_init(task_filename: &str) -> AppResult<()> {
    info!("Initializing task file...");

    let path = Path::new(task_filename);
    if path.exists() {
        warn!("{} already exists; leaving it unchanged", path.display());
    } else {
        let mut f = fs::File::create(path)?;
        f.write_all(EXAMPLE_TASK_FILE.as_bytes())?;
        info!("Created {}", path.display());
    }

    Ok(())
}
