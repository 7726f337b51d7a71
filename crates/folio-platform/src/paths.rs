use std::path::{Path, PathBuf};
use thiserror::Error;

const APP_DIR_NAME: &str = "folio";

/// Environment variable that relocates every application directory under a
/// single root, for portable installs and tests.
pub const HOME_OVERRIDE_ENV: &str = "FOLIO_HOME";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AppPathsError {
    #[error("Could not determine home directory")]
    HomeDirUnavailable,
    #[error("Could not determine config directory")]
    ConfigDirUnavailable,
    #[error("Could not determine cache directory")]
    CacheDirUnavailable,
    #[error("Could not determine data directory")]
    DataDirUnavailable,
}

#[derive(Debug, Clone)]
pub struct AppPaths {
    pub config_dir: PathBuf,
    pub cache_dir: PathBuf,
    pub data_dir: PathBuf,
}

impl AppPaths {
    /// Build application paths for the current platform.
    ///
    /// A non-empty `FOLIO_HOME` wins over the platform directories.
    ///
    /// # Errors
    /// Returns an error when a required base directory (for example the user
    /// home/config/cache/data directory) cannot be determined.
    pub fn new() -> Result<Self, AppPathsError> {
        if let Some(root) = std::env::var_os(HOME_OVERRIDE_ENV).filter(|root| !root.is_empty()) {
            return Ok(Self::from_root(PathBuf::from(root)));
        }

        Self::platform_default()
    }

    /// Lay out all directories below `root`.
    #[must_use]
    pub fn from_root(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        Self {
            config_dir: root.join("config"),
            cache_dir: root.join("cache"),
            data_dir: root.join("data"),
        }
    }

    #[cfg(target_os = "macos")]
    fn platform_default() -> Result<Self, AppPathsError> {
        let home = dirs::home_dir().ok_or(AppPathsError::HomeDirUnavailable)?;
        Ok(Self {
            config_dir: home.join("Library/Application Support").join(APP_DIR_NAME),
            cache_dir: home.join("Library/Caches").join(APP_DIR_NAME),
            data_dir: home.join("Library/Application Support").join(APP_DIR_NAME),
        })
    }

    #[cfg(not(target_os = "macos"))]
    fn platform_default() -> Result<Self, AppPathsError> {
        Ok(Self {
            config_dir: dirs::config_dir()
                .ok_or(AppPathsError::ConfigDirUnavailable)?
                .join(APP_DIR_NAME),
            cache_dir: dirs::cache_dir()
                .ok_or(AppPathsError::CacheDirUnavailable)?
                .join(APP_DIR_NAME),
            data_dir: dirs::data_dir()
                .ok_or(AppPathsError::DataDirUnavailable)?
                .join(APP_DIR_NAME),
        })
    }

    #[must_use]
    pub fn settings_file(&self) -> PathBuf {
        self.config_dir.join("settings.json")
    }

    #[must_use]
    pub fn log_file(&self) -> PathBuf {
        self.data_dir.join("debug.log")
    }

    /// Ensure all application directories exist on disk.
    ///
    /// # Errors
    /// Returns an error if any directory cannot be created.
    pub fn ensure_dirs(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.config_dir)?;
        std::fs::create_dir_all(&self.cache_dir)?;
        std::fs::create_dir_all(&self.data_dir)?;
        Ok(())
    }
}
