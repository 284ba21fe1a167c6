mod config;
pub mod store;

pub use config::Config;
pub use store::Store;

use std::path::PathBuf;

use crate::error::StoreError;

/// Returns `~/.config/capplan[-dev]/` based on CAPPLAN_ENV.
///
/// Set CAPPLAN_ENV=dev to use the development data directory, or
/// CAPPLAN_DATA_DIR to point somewhere else entirely.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, StoreError> {
    let dir = match std::env::var_os("CAPPLAN_DATA_DIR") {
        Some(custom) => PathBuf::from(custom),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("CAPPLAN_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("capplan-dev")
            } else {
                base_dir.join("capplan")
            }
        }
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| StoreError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
