use chrono::{DateTime, Utc};
use log::debug;
use serde::Deserialize;

use crate::error::UpdateError;
use crate::variant::AppVariant;
use crate::version::ReleaseVersion;

/// Content type GitHub reports for uploaded Android packages.
pub const PACKAGE_CONTENT_TYPE: &str = "application/vnd.android.package-archive";

const UPLOADED_STATE: &str = "uploaded";
const PACKAGE_EXTENSION: &str = ".apk";
const BETA_COMPAT_MARKER: &str = "releaseA";

#[derive(Debug, Clone, Deserialize)]
pub struct GitHubAsset {
    pub name: String,
    pub browser_download_url: String,
    #[serde(default)]
    pub content_type: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl GitHubAsset {
    fn is_package(&self) -> bool {
        self.state == UPLOADED_STATE && self.content_type == PACKAGE_CONTENT_TYPE
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct GitHubRelease {
    pub tag_name: String,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub prerelease: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub assets: Vec<GitHubAsset>,
}

/// One installable package of a published release.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseInfo {
    pub version: ReleaseVersion,
    pub notes: String,
    pub download_url: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub variant: AppVariant,
}

impl GitHubRelease {
    /// Expand this release into one entry per installable package.
    ///
    /// A release typically ships a package per variant, so this is
    /// one-to-many; releases without package assets yield nothing.
    #[must_use]
    pub fn release_infos(&self) -> Vec<ReleaseInfo> {
        self.assets
            .iter()
            .filter(|asset| asset.is_package())
            .filter_map(|asset| self.release_info_for(asset))
            .collect()
    }

    fn release_info_for(&self, asset: &GitHubAsset) -> Option<ReleaseInfo> {
        let Some(version) = version_from_package_name(&asset.name).or_else(|| self.tag_version())
        else {
            debug!(
                "Skipping asset {} of release {}: no usable version",
                asset.name, self.tag_name
            );
            return None;
        };

        Some(ReleaseInfo {
            version,
            notes: self.body.clone().unwrap_or_default(),
            download_url: asset.browser_download_url.clone(),
            name: asset.name.clone(),
            created_at: asset.created_at.unwrap_or(self.created_at),
            variant: variant_for(self.prerelease, &asset.name),
        })
    }

    fn tag_version(&self) -> Option<ReleaseVersion> {
        ReleaseVersion::parse(&self.tag_name).ok()
    }
}

/// Package names follow `<app>_<flavor>_<version>.apk`.
fn version_from_package_name(name: &str) -> Option<ReleaseVersion> {
    let field = name.split('_').nth(2)?;
    let field = field.strip_suffix(PACKAGE_EXTENSION).unwrap_or(field);
    ReleaseVersion::parse(field).ok()
}

fn variant_for(prerelease: bool, package_name: &str) -> AppVariant {
    if !prerelease {
        AppVariant::Official
    } else if package_name.contains(BETA_COMPAT_MARKER) {
        AppVariant::BetaCompat
    } else {
        AppVariant::Beta
    }
}

/// Parse a release index body into raw release records.
///
/// # Errors
/// Returns [`UpdateError::EmptyResponse`] for a blank body and
/// [`UpdateError::FetchFailed`] with the parser's message when the body is not
/// a JSON array of releases.
pub fn parse_release_index(body: &str) -> Result<Vec<GitHubRelease>, UpdateError> {
    if body.trim().is_empty() {
        return Err(UpdateError::EmptyResponse);
    }

    serde_json::from_str(body).map_err(UpdateError::fetch_failed_from)
}

/// Expand every release and order the packages newest first.
///
/// The sort is stable, so packages created at the same instant keep index
/// order.
#[must_use]
pub fn expand_releases(releases: &[GitHubRelease]) -> Vec<ReleaseInfo> {
    let mut infos: Vec<ReleaseInfo> = releases
        .iter()
        .flat_map(GitHubRelease::release_infos)
        .collect();
    infos.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    infos
}
