use std::time::Duration;

use clap::Args;
use folio_core::{
    AppInfo, AppVariant, GitHubReleaseFeed, ReleaseVersion, UpdateChecker, UpdateStatus,
};
use folio_platform::AppPaths;
use log::{debug, info};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::error::AppError;
use crate::report;
use crate::settings::AppSettings;

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Check for this variant instead of the running build's
    #[arg(long)]
    pub variant: Option<AppVariant>,
    /// Pretend to be running this version
    #[arg(long = "current-version", value_name = "VERSION")]
    pub current_version: Option<ReleaseVersion>,
    /// Give up after this many seconds
    #[arg(long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,
    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
    /// Open the download URL when an update is found
    #[arg(long)]
    pub open: bool,
}

#[derive(Args, Debug)]
pub struct SettingsArgs {
    /// Print the settings file location only
    #[arg(long, conflicts_with = "write")]
    pub path: bool,
    /// Write the effective settings to the settings file
    #[arg(long)]
    pub write: bool,
}

pub fn resolve_app_info(
    settings: &AppSettings,
    variant: Option<AppVariant>,
    current_version: Option<ReleaseVersion>,
) -> Result<AppInfo, AppError> {
    let mut app = AppInfo::current().map_err(AppError::invalid_build_version)?;
    if let Some(variant) = variant.or(settings.app_variant) {
        app.variant = variant;
    }
    if let Some(version) = current_version {
        app.version = version;
    }
    Ok(app)
}

pub async fn run_check(settings: &AppSettings, args: CheckArgs) -> Result<(), AppError> {
    let app = resolve_app_info(settings, args.variant, args.current_version)?;
    let timeout = Duration::from_secs(args.timeout.unwrap_or(settings.update_timeout_secs));

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(settings.http_timeout_secs))
        .build()
        .map_err(AppError::http_client)?;
    let feed = GitHubReleaseFeed::new(client, settings.release_index_url())
        .with_token(settings.github_token.clone());

    info!(
        "Checking {} for updates to {} ({})",
        feed.url(),
        app.version,
        app.variant
    );
    let checker = UpdateChecker::new(feed, app).with_timeout(timeout);

    let cancel = CancellationToken::new();
    let interrupt = cancel_on_interrupt(cancel.clone());
    let result = checker.check(&cancel).await;
    interrupt.abort();

    let status = UpdateStatus::from_check(result)
        .map_err(|error| AppError::update_check_failed("App", error))?;

    let rendered = if args.json {
        report::render_json(&status).map_err(|error| AppError::from(error.to_string()))?
    } else {
        report::render_text(&status)
    };
    print!("{rendered}");
    if args.json {
        println!();
    }

    if args.open
        && let UpdateStatus::Available(update) = &status
    {
        open::that(&update.download_url)
            .map_err(|error| AppError::open_failed(update.download_url.as_str(), error))?;
    }

    Ok(())
}

fn cancel_on_interrupt(cancel: CancellationToken) -> JoinHandle<()> {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            debug!("Interrupt received, cancelling update check");
            cancel.cancel();
        }
    })
}

pub fn show_settings(settings: &AppSettings, args: &SettingsArgs) -> Result<(), AppError> {
    if args.path {
        let paths = AppPaths::new().map_err(|error| AppError::from(error.to_string()))?;
        println!("{}", paths.settings_file().display());
        return Ok(());
    }

    if args.write {
        settings.save().map_err(AppError::settings_save_failed)?;
        info!("Settings written");
    }

    let rendered = serde_json::to_string_pretty(&settings.redacted())
        .map_err(|error| AppError::from(error.to_string()))?;
    println!("{rendered}");
    Ok(())
}
