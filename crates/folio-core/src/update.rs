use std::time::Duration;

use log::{debug, info};
use serde::Serialize;
use tokio_util::sync::CancellationToken;

use crate::deadline::run_with_deadline;
use crate::error::UpdateError;
use crate::feed::ReleaseFeed;
use crate::release::{ReleaseInfo, expand_releases, parse_release_index};
use crate::variant::AppInfo;
use crate::version::ReleaseVersion;

pub const DEFAULT_CHECK_TIMEOUT: Duration = Duration::from_secs(10);

/// A newer release offered to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdateInfo {
    pub version: ReleaseVersion,
    pub notes: String,
    pub download_url: String,
    pub name: String,
}

impl From<&ReleaseInfo> for UpdateInfo {
    fn from(release: &ReleaseInfo) -> Self {
        Self {
            version: release.version.clone(),
            notes: release.notes.clone(),
            download_url: release.download_url.clone(),
            name: release.name.clone(),
        }
    }
}

/// Outcome of a check with "nothing to do" separated from failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateStatus {
    Available(UpdateInfo),
    UpToDate,
}

impl UpdateStatus {
    /// Fold [`UpdateError::UpToDate`] into a success state.
    ///
    /// # Errors
    /// Passes every other error through.
    pub fn from_check(result: Result<UpdateInfo, UpdateError>) -> Result<Self, UpdateError> {
        match result {
            Ok(update) => Ok(Self::Available(update)),
            Err(UpdateError::UpToDate) => Ok(Self::UpToDate),
            Err(error) => Err(error),
        }
    }
}

/// Pick the newest-created package of the running variant whose version is
/// above the running version.
///
/// `releases` must already be ordered newest first.
#[must_use]
pub fn select_update<'a>(releases: &'a [ReleaseInfo], app: &AppInfo) -> Option<&'a ReleaseInfo> {
    releases
        .iter()
        .filter(|release| release.variant == app.variant)
        .find(|release| release.version > app.version)
}

pub struct UpdateChecker<F> {
    feed: F,
    app: AppInfo,
    timeout: Duration,
}

impl<F: ReleaseFeed> UpdateChecker<F> {
    pub fn new(feed: F, app: AppInfo) -> Self {
        Self {
            feed,
            app,
            timeout: DEFAULT_CHECK_TIMEOUT,
        }
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn app(&self) -> &AppInfo {
        &self.app
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Look for a newer release of the running build's variant.
    ///
    /// Issues exactly one fetch and never retries. The whole check is bound by
    /// the configured timeout and by `cancel`.
    ///
    /// # Errors
    /// Returns [`UpdateError::UpToDate`] when no newer package exists, a fetch
    /// failure when the index cannot be fetched or parsed, and
    /// [`UpdateError::Timeout`] or [`UpdateError::Cancelled`] when interrupted.
    pub async fn check(&self, cancel: &CancellationToken) -> Result<UpdateInfo, UpdateError> {
        run_with_deadline("update check", self.timeout, cancel, self.check_once()).await
    }

    async fn check_once(&self) -> Result<UpdateInfo, UpdateError> {
        let body = self.feed.fetch_index().await?;
        let releases = parse_release_index(&body)?;
        let packages = expand_releases(&releases);
        debug!(
            "Release index has {} releases, {} packages; running {} ({})",
            releases.len(),
            packages.len(),
            self.app.version,
            self.app.variant
        );

        match select_update(&packages, &self.app) {
            Some(release) => {
                info!("Update available: {} ({})", release.version, release.name);
                Ok(UpdateInfo::from(release))
            }
            None => {
                debug!("No newer {} package than {}", self.app.variant, self.app.version);
                Err(UpdateError::UpToDate)
            }
        }
    }
}
