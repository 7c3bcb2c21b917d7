//! Path management for Hearth
//!
//! Provides XDG-compliant path resolution for configuration, data, and exports.
//!
//! ## Path Resolution Order
//!
//! 1. `HEARTH_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/hearth` or `~/.config/hearth`
//! 3. Windows: `%APPDATA%\hearth`

use std::path::PathBuf;

use crate::error::HearthError;

/// Manages all paths used by Hearth
#[derive(Debug, Clone)]
pub struct HearthPaths {
    /// Base directory for all Hearth data
    base_dir: PathBuf,
}

impl HearthPaths {
    /// Create a new HearthPaths instance
    ///
    /// Path resolution:
    /// 1. `HEARTH_DATA_DIR` env var (explicit override)
    /// 2. Unix: `$XDG_CONFIG_HOME/hearth` or `~/.config/hearth`
    /// 3. Windows: `%APPDATA%\hearth`
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, HearthError> {
        let base_dir = if let Ok(custom) = std::env::var("HEARTH_DATA_DIR") {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create HearthPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory (~/.config/hearth/ or equivalent)
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the config directory (same as base for simplicity)
    pub fn config_dir(&self) -> PathBuf {
        self.base_dir.clone()
    }

    /// Get the data directory (~/.config/hearth/data/)
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the export directory (~/.config/hearth/exports/)
    pub fn export_dir(&self) -> PathBuf {
        self.base_dir.join("exports")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the audit log
    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    /// Get the path to members.json
    pub fn members_file(&self) -> PathBuf {
        self.data_dir().join("members.json")
    }

    /// Get the path to expenses.json (expenses with their splits)
    pub fn expenses_file(&self) -> PathBuf {
        self.data_dir().join("expenses.json")
    }

    /// Get the path to settlements.json (recorded payments)
    pub fn settlements_file(&self) -> PathBuf {
        self.data_dir().join("settlements.json")
    }

    /// Get the path to chores.json
    pub fn chores_file(&self) -> PathBuf {
        self.data_dir().join("chores.json")
    }

    /// Ensure all required directories exist
    ///
    /// Creates:
    /// - Base directory (~/.config/hearth/)
    /// - Data directory (~/.config/hearth/data/)
    /// - Export directory (~/.config/hearth/exports/)
    pub fn ensure_directories(&self) -> Result<(), HearthError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| HearthError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| HearthError::Io(format!("Failed to create data directory: {}", e)))?;

        std::fs::create_dir_all(self.export_dir())
            .map_err(|e| HearthError::Io(format!("Failed to create export directory: {}", e)))?;

        Ok(())
    }

    /// Check if the household has been initialized (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

/// Resolve the default data directory path based on platform
#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, HearthError> {
    // Unix (Linux/macOS): Use XDG_CONFIG_HOME if set, otherwise ~/.config
    let config_base = match std::env::var("XDG_CONFIG_HOME") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => {
            let home = std::env::var("HOME")
                .map_err(|_| HearthError::Config("HOME environment variable not set".into()))?;
            PathBuf::from(home).join(".config")
        }
    };
    Ok(config_base.join("hearth"))
}

/// Resolve the default data directory path based on platform
#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, HearthError> {
    // Windows: Use APPDATA
    let appdata = std::env::var("APPDATA")
        .map_err(|_| HearthError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("hearth"))
}
