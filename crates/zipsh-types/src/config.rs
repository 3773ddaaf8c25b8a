//! Shell configuration loaded once at startup.
//!
//! The config file is JSON with the keys `username` and `vfs_path`, plus an
//! optional `startup_script` naming a host file whose lines are replayed
//! before the interactive loop starts. A missing or malformed file is fatal
//! before the session begins.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{Result, ZipshError};

/// Startup configuration for a shell session.
#[derive(Debug, Clone, Deserialize)]
pub struct ShellConfig {
    /// Name shown in the prompt (`<username>@<cwd>$ `).
    pub username: String,
    /// Host path of the archive to mount.
    pub vfs_path: String,
    /// Optional host path of a script to replay at startup.
    #[serde(default)]
    pub startup_script: Option<String>,
}

impl ShellConfig {
    /// Load and validate a configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .map_err(|e| ZipshError::Config(format!("cannot read {}: {e}", path.display())))?;
        let config: Self = serde_json::from_str(&text)
            .map_err(|e| ZipshError::Config(format!("invalid config {}: {e}", path.display())))?;
        if config.username.is_empty() {
            return Err(ZipshError::Config("username must not be empty".to_string()));
        }
        if config.vfs_path.is_empty() {
            return Err(ZipshError::Config("vfs_path must not be empty".to_string()));
        }
        log::debug!("loaded config for user {}", config.username);
        Ok(config)
    }
}
