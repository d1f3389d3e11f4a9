//! Usage: Tracing setup (stdout + daily rolling file under `<app-data-dir>/logs`).
//!
//! Level comes from `RUST_LOG` (default: `info`). `log` records from dependencies are bridged
//! into tracing.

use crate::app_paths;
use std::sync::OnceLock;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::EnvFilter;

const LOG_DIR_NAME: &str = "logs";
const LOG_FILE_PREFIX: &str = "kade-kolku";
const DEFAULT_FILTER: &str = "info";

static FILE_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

pub(crate) fn init(app: &tauri::AppHandle) {
    let stdout_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stdout)
        .compact();

    let file_layer = match app_paths::app_data_dir(app) {
        Ok(dir) => {
            let appender = tracing_appender::rolling::daily(dir.join(LOG_DIR_NAME), LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let _ = FILE_GUARD.set(guard);
            Some(
                tracing_subscriber::fmt::layer()
                    .with_writer(writer)
                    .with_ansi(false)
                    .compact(),
            )
        }
        Err(err) => {
            eprintln!("log dir unavailable, logging to stdout only: {err}");
            None
        }
    };

    let subscriber = tracing_subscriber::registry()
        .with(env_filter())
        .with(stdout_layer)
        .with(file_layer);

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        return;
    }
    if let Err(err) = tracing_log::LogTracer::init() {
        tracing::warn!("log bridge not installed: {}", err);
    }
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "logging initialized");
}
