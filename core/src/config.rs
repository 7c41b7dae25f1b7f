use std::path::PathBuf;

use anyhow::{anyhow, Result};

/// Name of the single storage entry that holds every record.
pub const STORAGE_KEY: &str = "pinkfit_records";

const DATA_DIR_NAME: &str = ".pinkfit";

/// Directory holding the record file (and the TUI log).
///
/// Uses `base_dir` when given, otherwise `~/.pinkfit`.
pub fn data_dir(base_dir: Option<PathBuf>) -> Result<PathBuf> {
    match base_dir {
        Some(dir) => Ok(dir),
        None => {
            let home_dir = dirs::home_dir()
                .ok_or_else(|| anyhow!("Could not determine home directory"))?;
            Ok(home_dir.join(DATA_DIR_NAME))
        }
    }
}
