mod cli;
mod config;
mod error;
mod format;
mod logging;
mod monitor;
mod practicum;
mod shutdown;
mod status;
mod telegram;
mod ui;
mod validate;

use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};
use tracing_appender::non_blocking::WorkerGuard;

use cli::{Cli, Command};
use config::{MonitorConfig, Settings};
use monitor::{Monitor, effective_interval, now_cursor};
use practicum::PracticumClient;
use telegram::TelegramNotifier;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let (config, _log_guard) = load_config(cli.config.as_deref(), cli.verbose)?;

    let settings = match config.validate() {
        Ok(settings) => settings,
        Err(e) => {
            error!(error = %e, "refusing to start");
            return Err(e).context("Invalid configuration");
        }
    };

    let mut monitor = build_monitor(&settings)?;

    match cli.selected_command() {
        Command::Run => {
            monitor.run(shutdown::shutdown_signal()).await;
            info!("stopped");
            Ok(ExitCode::SUCCESS)
        }
        Command::Once => {
            let outcome = monitor.run_cycle().await;
            ui::CycleReport::default().print(&outcome, monitor.state());
            Ok(if outcome.is_error() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            })
        }
    }
}

/// Loads the config and installs logging.
///
/// The log directory lives in the config, so a config that fails to load
/// gets a stderr-only subscriber just to record the fatal error.
fn load_config(path: Option<&Path>, verbose: bool) -> Result<(MonitorConfig, Option<WorkerGuard>)> {
    match MonitorConfig::load(path) {
        Ok(config) => {
            let guard = logging::init_logging(verbose, config.log_dir.as_deref());
            Ok((config, guard))
        }
        Err(e) => {
            let _ = logging::init_logging(verbose, None);
            error!(error = %e, "failed to load configuration");
            Err(e).context("Failed to load configuration")
        }
    }
}

fn build_monitor(settings: &Settings) -> Result<Monitor<PracticumClient, TelegramNotifier>> {
    let source = PracticumClient::new(
        settings.practicum_token.clone(),
        settings.endpoint.clone(),
        settings.timeouts,
    )
    .context("Failed to build homework API client")?;
    let notifier = TelegramNotifier::new(
        settings.telegram_token.clone(),
        settings.telegram_api_url.clone(),
        settings.timeouts,
    )
    .context("Failed to build Telegram client")?;

    let cursor = now_cursor();
    info!(cursor, chat_id = settings.chat_id, "monitor configured");

    Ok(Monitor::new(source, notifier, settings.chat_id, cursor)
        .with_retry_interval(effective_interval(settings.retry_interval))
        .with_report_empty(settings.report_empty))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;
    use std::io::Write;

    #[test]
    fn broken_config_file_is_fatal() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "report_empty = \"sometimes\"").unwrap();

        let err = load_config(Some(file.path()), false).unwrap_err();
        assert!(err.to_string().contains("Failed to load configuration"));
        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn readable_config_file_loads() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "retry_interval_secs = 30").unwrap();

        let (config, guard) = load_config(Some(file.path()), false).unwrap();
        assert_eq!(config.retry_interval_secs, 30);
        assert!(guard.is_none());
    }
}
