//! Path management for ibank
//!
//! Resolves where the terminal keeps its configuration, ledger data, log file
//! and interchange files.
//!
//! ## Path Resolution Order
//!
//! 1. `IBANK_DATA_DIR` environment variable (if set)
//! 2. The platform configuration directory (`directories::ProjectDirs`)
//! 3. `$HOME/.config/ibank`

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::BankError;

/// Manages all paths used by ibank
#[derive(Debug, Clone)]
pub struct BankPaths {
    /// Base directory for all ibank data
    base_dir: PathBuf,
}

impl BankPaths {
    /// Create a new BankPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if no home or configuration directory can be determined.
    pub fn new() -> Result<Self, BankError> {
        let base_dir = if let Ok(custom) = std::env::var("IBANK_DATA_DIR") {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create BankPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory (<base>/data/)
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the directory used for import/export files (<base>/exchange/)
    pub fn exchange_dir(&self) -> PathBuf {
        self.base_dir.join("exchange")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the application log
    pub fn log_file(&self) -> PathBuf {
        self.base_dir.join("ibank.log")
    }

    pub fn clients_file(&self) -> PathBuf {
        self.data_dir().join("clients.json")
    }

    pub fn accounts_file(&self) -> PathBuf {
        self.data_dir().join("accounts.json")
    }

    pub fn services_file(&self) -> PathBuf {
        self.data_dir().join("services.json")
    }

    pub fn atms_file(&self) -> PathBuf {
        self.data_dir().join("atms.json")
    }

    pub fn managers_file(&self) -> PathBuf {
        self.data_dir().join("managers.json")
    }

    /// Ensure all required directories exist
    pub fn ensure_directories(&self) -> Result<(), BankError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| BankError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| BankError::Io(format!("Failed to create data directory: {}", e)))?;

        std::fs::create_dir_all(self.exchange_dir()).map_err(|e| {
            BankError::Io(format!("Failed to create exchange directory: {}", e))
        })?;

        Ok(())
    }

    /// Check if ibank has been initialized (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

/// Resolve the default base directory
fn resolve_default_path() -> Result<PathBuf, BankError> {
    if let Some(dirs) = ProjectDirs::from("", "", "ibank") {
        return Ok(dirs.config_dir().to_path_buf());
    }

    let home = std::env::var("HOME")
        .map_err(|_| BankError::Config("Could not determine home directory".into()))?;
    Ok(PathBuf::from(home).join(".config").join("ibank"))
}
