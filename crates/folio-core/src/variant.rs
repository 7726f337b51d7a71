use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::version::{ReleaseVersion, VersionParseError};

/// Build flavor of an app package. Only packages of the running build's
/// flavor are offered as updates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AppVariant {
    #[default]
    Official,
    Beta,
    /// Beta built under a separate package id so it installs next to the
    /// official app.
    BetaCompat,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown app variant `{0}` (expected official, beta or beta-compat)")]
pub struct UnknownVariant(String);

impl AppVariant {
    /// Lenient lookup: unrecognized names map to [`AppVariant::Unknown`].
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        name.parse().unwrap_or(Self::Unknown)
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Official => "official",
            Self::Beta => "beta",
            Self::BetaCompat => "beta-compat",
            Self::Unknown => "unknown",
        }
    }
}

impl FromStr for AppVariant {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "official" => Ok(Self::Official),
            "beta" => Ok(Self::Beta),
            "beta-compat" | "beta_compat" => Ok(Self::BetaCompat),
            _ => Err(UnknownVariant(s.to_string())),
        }
    }
}

impl fmt::Display for AppVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Version and flavor of the running build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppInfo {
    pub version: ReleaseVersion,
    pub variant: AppVariant,
}

impl AppInfo {
    #[must_use]
    pub fn new(version: ReleaseVersion, variant: AppVariant) -> Self {
        Self { version, variant }
    }

    /// Describe this build from compile-time constants: the package version
    /// and the optional `FOLIO_APP_VARIANT` set by the packaging pipeline.
    ///
    /// # Errors
    /// Returns an error if the package version is not a valid version.
    pub fn current() -> Result<Self, VersionParseError> {
        let version = ReleaseVersion::parse(env!("CARGO_PKG_VERSION"))?;
        let variant =
            option_env!("FOLIO_APP_VARIANT").map_or(AppVariant::Official, AppVariant::from_name);
        Ok(Self::new(version, variant))
    }
}
