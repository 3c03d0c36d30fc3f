use std::env;
use std::process::ExitCode;

use log::{error, info, LevelFilter};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

use sparkcast::checker::{CheckConfig, CheckMode, UpdateChecker};
use sparkcast::models::Appcast;
use sparkcast::settings::JsonFileSettings;
use sparkcast::traits::{Notifier, Transport};
use sparkcast::transport::{FileTransport, HttpTransport};
use sparkcast::utils;

const SETTINGS_FILE: &str = "sparkcast-settings.json";

struct LogNotifier;

impl Notifier for LogNotifier {
    fn update_available(&self, appcast: &Appcast) {
        info!(
            "update available: {} (version {})",
            utils::clean_string(&appcast.title),
            appcast.version
        );
        if !appcast.short_version_string.is_empty() {
            info!("display version: {}", appcast.short_version_string);
        }
        if !appcast.download_url.is_empty() {
            info!("download: {}", appcast.download_url);
        }
        if !appcast.release_notes_url.is_empty() {
            info!("release notes: {}", utils::clean_string(&appcast.release_notes_url));
        }
    }

    fn no_updates(&self) {
        info!("no updates found");
    }

    fn error(&self) {
        error!("update check failed");
    }
}

async fn run_check<T: Transport>(
    transport: T,
    appcast_url: String,
    app_version: String,
    mode: CheckMode,
) -> ExitCode {
    let config = CheckConfig {
        appcast_url,
        app_version,
    };
    let settings = JsonFileSettings::new(SETTINGS_FILE);
    let mut checker = UpdateChecker::new(config, transport, settings, LogNotifier);

    match checker.check(mode).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let _ = TermLogger::init(
        LevelFilter::Info,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    );

    let mut args = env::args().skip(1);
    let (Some(url), Some(version)) = (args.next(), args.next()) else {
        eprintln!("usage: sparkcast <appcast-url-or-path> <current-version> [--manual]");
        return ExitCode::FAILURE;
    };
    let mode = if args.any(|arg| arg == "--manual") {
        CheckMode::Manual
    } else {
        CheckMode::Scheduled
    };

    if url.starts_with("http://") || url.starts_with("https://") {
        run_check(HttpTransport::new(), url, version, mode).await
    } else {
        run_check(FileTransport, url, version, mode).await
    }
}
