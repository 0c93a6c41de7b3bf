//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type, which owns the
//! configuration document together with the path it is saved to.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::error::{EngineError, EngineResult};
use crate::models::TeamAssignment;

use super::types::{AppConfig, BonusRule};

/// Loads, queries and persists the configuration document.
///
/// Files ending in `.yaml` or `.yml` are read and written as YAML; anything
/// else is JSON.
///
/// # Example
///
/// ```no_run
/// use mix_bonus_engine::config::ConfigLoader;
///
/// let mut loader = ConfigLoader::load_or_default("config.json")?;
/// println!("{} bonus rules", loader.bonus_rules().len());
///
/// loader.set_last_directory("/data/reports");
/// loader.save()?;
/// # Ok::<(), mix_bonus_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    path: PathBuf,
    config: AppConfig,
}

impl ConfigLoader {
    /// Wraps an in-memory configuration that will be saved to `path`.
    pub fn new<P: AsRef<Path>>(path: P, config: AppConfig) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            config,
        }
    }

    /// Loads configuration from the specified file.
    ///
    /// Returns `ConfigNotFound` when the file cannot be read and
    /// `ConfigParseError` when its contents are invalid.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        let config = Self::load_document(path)?;
        Ok(Self::new(path, config))
    }

    /// Loads configuration, falling back to the default document.
    ///
    /// A missing or unparseable file is replaced by [`AppConfig::default`],
    /// which is written back to `path`. A failed write is logged and the
    /// in-memory default is still returned.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(loader) => Ok(loader),
            Err(
                err @ (EngineError::ConfigNotFound { .. } | EngineError::ConfigParseError { .. }),
            ) => {
                warn!(error = %err, "Using default configuration");
                let loader = Self::new(path, AppConfig::default());
                if let Err(write_err) = loader.save() {
                    warn!(error = %write_err, "Default configuration was not written");
                }
                Ok(loader)
            }
            Err(err) => Err(err),
        }
    }

    /// Writes the configuration to its path.
    pub fn save(&self) -> EngineResult<()> {
        let path_str = self.path.display().to_string();
        let write_error = |message: String| EngineError::ConfigWriteError {
            path: path_str.clone(),
            message,
        };

        let content = if is_yaml(&self.path) {
            serde_yaml::to_string(&self.config).map_err(|e| write_error(e.to_string()))?
        } else {
            serde_json::to_string_pretty(&self.config).map_err(|e| write_error(e.to_string()))?
        };

        fs::write(&self.path, content).map_err(|e| write_error(e.to_string()))?;
        info!(path = %path_str, "Configuration saved");
        Ok(())
    }

    /// Reads and parses a configuration document.
    fn load_document(path: &Path) -> EngineResult<AppConfig> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        let parsed = if is_yaml(path) {
            serde_yaml::from_str(&content).map_err(|e| e.to_string())
        } else {
            serde_json::from_str(&content).map_err(|e| e.to_string())
        };

        parsed.map_err(|message| EngineError::ConfigParseError {
            path: path_str,
            message,
        })
    }

    /// Returns the file this configuration is saved to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the underlying configuration document.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Returns the simple bonus rules.
    pub fn bonus_rules(&self) -> &[BonusRule] {
        &self.config.bonus_rules
    }

    /// Returns the configured team assignment.
    pub fn assignment(&self) -> TeamAssignment {
        self.config.assignment()
    }

    /// Returns the directory the last report was opened from.
    pub fn last_directory(&self) -> Option<&Path> {
        self.config.last_directory.as_deref().map(Path::new)
    }

    /// Remembers the directory a report was opened from.
    pub fn set_last_directory<P: AsRef<Path>>(&mut self, directory: P) {
        self.config.last_directory = Some(directory.as_ref().display().to_string());
    }
}

fn is_yaml(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext == "yaml" || ext == "yml")
}
