use std::path::Path;

use folio_core::{
    AppVariant, DEFAULT_API_BASE_URL, DEFAULT_RELEASE_REPO, DEFAULT_RELEASES_PER_PAGE,
    release_index_url,
};
use folio_platform::AppPaths;
use serde::{Deserialize, Serialize};

const REDACTED: &str = "<redacted>";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_release_repo")]
    pub release_repo: String,

    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    #[serde(default = "default_releases_per_page")]
    pub releases_per_page: u32,

    #[serde(default)]
    pub github_token: Option<String>,

    #[serde(default = "default_update_timeout")]
    pub update_timeout_secs: u64,

    #[serde(default = "default_http_timeout")]
    pub http_timeout_secs: u64,

    /// Overrides the variant baked into the build.
    #[serde(default)]
    pub app_variant: Option<AppVariant>,

    #[serde(default)]
    pub debug_logging: bool,

    #[serde(default = "default_max_log_size_bytes")]
    pub max_log_size_bytes: u64,
}

fn default_release_repo() -> String {
    DEFAULT_RELEASE_REPO.to_string()
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_releases_per_page() -> u32 {
    DEFAULT_RELEASES_PER_PAGE
}

fn default_update_timeout() -> u64 {
    10
}

fn default_http_timeout() -> u64 {
    10
}

fn default_max_log_size_bytes() -> u64 {
    5 * 1024 * 1024
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            release_repo: default_release_repo(),
            api_base_url: default_api_base_url(),
            releases_per_page: default_releases_per_page(),
            github_token: None,
            update_timeout_secs: default_update_timeout(),
            http_timeout_secs: default_http_timeout(),
            app_variant: None,
            debug_logging: false,
            max_log_size_bytes: default_max_log_size_bytes(),
        }
    }
}

/// Settings as loaded, with the reason they fell back to defaults.
///
/// Loading runs before logging is configured, so the caller reports
/// `fallback_reason` once it can.
#[derive(Debug)]
pub struct LoadedSettings {
    pub settings: AppSettings,
    pub fallback_reason: Option<String>,
}

impl LoadedSettings {
    fn fallback(reason: String) -> Self {
        Self {
            settings: AppSettings::default(),
            fallback_reason: Some(reason),
        }
    }
}

impl AppSettings {
    pub fn load() -> LoadedSettings {
        match AppPaths::new() {
            Ok(paths) => Self::load_from(&paths.settings_file()),
            Err(error) => LoadedSettings::fallback(format!("Using default settings: {error}")),
        }
    }

    /// Read settings from `path`. A missing, unreadable or invalid file
    /// yields the defaults; only the last two carry a reason.
    pub fn load_from(path: &Path) -> LoadedSettings {
        if !path.exists() {
            return LoadedSettings {
                settings: Self::default(),
                fallback_reason: None,
            };
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(settings) => LoadedSettings {
                    settings,
                    fallback_reason: None,
                },
                Err(error) => LoadedSettings::fallback(format!(
                    "Ignoring invalid settings in {}: {error}",
                    path.display()
                )),
            },
            Err(error) => {
                LoadedSettings::fallback(format!("Could not read {}: {error}", path.display()))
            }
        }
    }

    pub fn save(&self) -> Result<(), std::io::Error> {
        let paths = AppPaths::new().map_err(std::io::Error::other)?;
        paths.ensure_dirs()?;
        self.save_to(&paths.settings_file())
    }

    pub fn save_to(&self, path: &Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)
    }

    pub fn release_index_url(&self) -> String {
        release_index_url(
            &self.api_base_url,
            &self.release_repo,
            self.releases_per_page.max(1),
        )
    }

    /// Copy safe to print: the token, if any, is masked.
    pub fn redacted(&self) -> Self {
        Self {
            github_token: self.github_token.as_ref().map(|_| REDACTED.to_string()),
            ..self.clone()
        }
    }
}
