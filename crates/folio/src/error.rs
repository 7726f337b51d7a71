use folio_core::UpdateError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    Message(String),
    HttpClient {
        details: String,
    },
    InvalidBuildVersion {
        details: String,
    },
    UpdateCheckFailed {
        target: &'static str,
        details: UpdateError,
    },
    SettingsSaveFailed {
        details: String,
    },
    OpenFailed {
        target: String,
        details: String,
    },
}

impl AppError {
    pub fn http_client(error: impl std::fmt::Display) -> Self {
        Self::HttpClient {
            details: error.to_string(),
        }
    }

    pub fn invalid_build_version(error: impl std::fmt::Display) -> Self {
        Self::InvalidBuildVersion {
            details: error.to_string(),
        }
    }

    pub fn update_check_failed(target: &'static str, details: UpdateError) -> Self {
        Self::UpdateCheckFailed { target, details }
    }

    pub fn settings_save_failed(error: impl std::fmt::Display) -> Self {
        Self::SettingsSaveFailed {
            details: error.to_string(),
        }
    }

    pub fn open_failed(target: impl Into<String>, error: impl std::fmt::Display) -> Self {
        Self::OpenFailed {
            target: target.into(),
            details: error.to_string(),
        }
    }
}

impl From<String> for AppError {
    fn from(value: String) -> Self {
        Self::Message(value)
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Message(message) => write!(f, "{message}"),
            Self::HttpClient { details } => write!(f, "Failed to set up HTTP client: {details}"),
            Self::InvalidBuildVersion { details } => {
                write!(f, "Build version is not usable: {details}")
            }
            Self::UpdateCheckFailed { target, details } => {
                write!(f, "{target} update check failed: {details}")
            }
            Self::SettingsSaveFailed { details } => {
                write!(f, "Failed to save settings: {details}")
            }
            Self::OpenFailed { target, details } => write!(f, "Failed to open {target}: {details}"),
        }
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use folio_core::UpdateError;

    use super::AppError;

    #[test]
    fn plain_messages_convert_from_strings() {
        let error = AppError::from("settings directory unavailable".to_string());
        assert_eq!(
            error,
            AppError::Message("settings directory unavailable".to_string())
        );
        assert_eq!(error.to_string(), "settings directory unavailable");
    }

    #[test]
    fn update_check_failure_wraps_core_error() {
        let timeout = Duration::from_secs(10);
        let error = AppError::update_check_failed("App", UpdateError::Timeout { timeout });

        assert_eq!(
            error,
            AppError::UpdateCheckFailed {
                target: "App",
                details: UpdateError::Timeout { timeout },
            }
        );
        assert_eq!(
            error.to_string(),
            "App update check failed: update check timed out after 10s"
        );
    }

    #[test]
    fn setup_failures_include_context() {
        assert_eq!(
            AppError::http_client("no TLS backend").to_string(),
            "Failed to set up HTTP client: no TLS backend"
        );
        assert_eq!(
            AppError::invalid_build_version("invalid version `x`").to_string(),
            "Build version is not usable: invalid version `x`"
        );
        assert_eq!(
            AppError::settings_save_failed("permission denied").to_string(),
            "Failed to save settings: permission denied"
        );
        assert_eq!(
            AppError::open_failed("https://example.invalid/a.apk", "no handler").to_string(),
            "Failed to open https://example.invalid/a.apk: no handler"
        );
    }
}
