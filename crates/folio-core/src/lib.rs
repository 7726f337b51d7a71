//! Update discovery for the Folio reader.
//!
//! The checker fetches the project's release index once, expands each release
//! into its installable packages, and offers the most recently published
//! package of the running build's variant that is newer than the running
//! version.
//!
//! - [`ReleaseVersion`] orders versions semantically (`2.10 > 2.9`).
//! - [`run_with_deadline`] bounds any fallible future by a timeout and a
//!   [`CancellationToken`](tokio_util::sync::CancellationToken).
//! - [`ReleaseFeed`] is the seam to the network; [`GitHubReleaseFeed`] is the
//!   production implementation.

mod deadline;
mod error;
mod feed;
mod release;
mod update;
mod variant;
mod version;

/// Timeout/cancellation wrapper for async work.
pub use deadline::{Interrupted, run_with_deadline};
pub use error::UpdateError;
/// Release index source and endpoint helpers.
pub use feed::{
    DEFAULT_API_BASE_URL, DEFAULT_RELEASE_REPO, DEFAULT_RELEASES_PER_PAGE, GitHubReleaseFeed,
    ReleaseFeed, release_index_url,
};
/// Raw release records and their expansion into packages.
pub use release::{
    GitHubAsset, GitHubRelease, PACKAGE_CONTENT_TYPE, ReleaseInfo, expand_releases,
    parse_release_index,
};
/// The update check itself.
pub use update::{
    DEFAULT_CHECK_TIMEOUT, UpdateChecker, UpdateInfo, UpdateStatus, select_update,
};
pub use variant::{AppInfo, AppVariant, UnknownVariant};
pub use version::{ReleaseVersion, VersionParseError};
