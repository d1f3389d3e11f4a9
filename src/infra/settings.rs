//! Usage: Persisted shell settings (schema + read/write helpers).

use crate::app_paths;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const SCHEMA_VERSION: u32 = 1;
pub const DEFAULT_SERVER_URL: &str = "https://budget-app-kappa-black.vercel.app";
pub const DEFAULT_NAVIGATE_DELAY_MS: u64 = 500;
pub const DEFAULT_TOKEN_EXTRACT_DELAY_MS: u64 = 1000;
const DEFAULT_TOKEN_MIRROR_ENABLED: bool = true;
const MAX_DELAY_MS: u64 = 10_000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellSettings {
    pub schema_version: u32,
    // Empty means "use the origin the webview is currently showing".
    pub server_url: String,
    pub navigate_delay_ms: u64,
    pub token_extract_delay_ms: u64,
    pub token_mirror_enabled: bool,
}

impl Default for ShellSettings {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            server_url: DEFAULT_SERVER_URL.to_string(),
            navigate_delay_ms: DEFAULT_NAVIGATE_DELAY_MS,
            token_extract_delay_ms: DEFAULT_TOKEN_EXTRACT_DELAY_MS,
            token_mirror_enabled: DEFAULT_TOKEN_MIRROR_ENABLED,
        }
    }
}

impl ShellSettings {
    pub fn navigate_delay(&self) -> Duration {
        Duration::from_millis(self.navigate_delay_ms)
    }

    pub fn token_extract_delay(&self) -> Duration {
        Duration::from_millis(self.token_extract_delay_ms)
    }
}

fn sanitize_delays(settings: &mut ShellSettings) -> bool {
    let mut changed = false;

    if settings.navigate_delay_ms > MAX_DELAY_MS {
        settings.navigate_delay_ms = MAX_DELAY_MS;
        changed = true;
    }
    if settings.token_extract_delay_ms > MAX_DELAY_MS {
        settings.token_extract_delay_ms = MAX_DELAY_MS;
        changed = true;
    }

    changed
}

fn sanitize_server_url(settings: &mut ShellSettings) -> bool {
    let trimmed = settings.server_url.trim().trim_end_matches('/');
    if trimmed == settings.server_url {
        return false;
    }
    settings.server_url = trimmed.to_string();
    true
}

fn migrate_schema_version(settings: &mut ShellSettings, schema_version_present: bool) -> bool {
    // If schema_version is missing, force a write to persist it so we don't keep "migrating"
    // on every startup.
    if schema_version_present && settings.schema_version >= SCHEMA_VERSION {
        return false;
    }
    settings.schema_version = SCHEMA_VERSION;
    true
}

fn validate(settings: &ShellSettings) -> Result<(), String> {
    if settings.navigate_delay_ms > MAX_DELAY_MS {
        return Err(format!("navigate_delay_ms must be <= {MAX_DELAY_MS}"));
    }
    if settings.token_extract_delay_ms > MAX_DELAY_MS {
        return Err(format!("token_extract_delay_ms must be <= {MAX_DELAY_MS}"));
    }

    let server_url = settings.server_url.trim();
    if !server_url.is_empty()
        && !(server_url.starts_with("https://") || server_url.starts_with("http://"))
    {
        return Err("server_url must start with http:// or https://".to_string());
    }

    Ok(())
}

fn settings_path(app: &tauri::AppHandle) -> Result<PathBuf, String> {
    Ok(app_paths::app_data_dir(app)?.join("settings.json"))
}

fn parse_settings_json(content: &str) -> Result<(ShellSettings, bool), String> {
    let raw: serde_json::Value =
        serde_json::from_str(content).map_err(|e| format!("failed to parse settings.json: {e}"))?;
    let schema_version_present = raw.get("schema_version").is_some();
    let settings: ShellSettings =
        serde_json::from_value(raw).map_err(|e| format!("failed to parse settings.json: {e}"))?;
    Ok((settings, schema_version_present))
}

pub(crate) fn read_at(path: &Path) -> Result<ShellSettings, String> {
    if !path.exists() {
        let settings = ShellSettings::default();
        // Best-effort: create default settings.json on first read to make the config discoverable/editable.
        let _ = write_at(path, &settings);
        return Ok(settings);
    }

    let content =
        std::fs::read_to_string(path).map_err(|e| format!("failed to read settings: {e}"))?;
    let (mut settings, schema_version_present) = parse_settings_json(&content)?;

    let mut repaired = false;
    repaired |= migrate_schema_version(&mut settings, schema_version_present);
    repaired |= sanitize_delays(&mut settings);
    repaired |= sanitize_server_url(&mut settings);
    validate(&settings).map_err(|e| format!("invalid settings.json: {e}"))?;
    if repaired {
        // Best-effort: persist repaired values while keeping read semantics.
        let _ = write_at(path, &settings);
    }

    Ok(settings)
}

pub(crate) fn write_at(path: &Path, settings: &ShellSettings) -> Result<ShellSettings, String> {
    validate(settings)?;

    let tmp_path = path.with_file_name("settings.json.tmp");
    let backup_path = path.with_file_name("settings.json.bak");

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| format!("failed to create settings dir: {e}"))?;
    }

    let content = serde_json::to_vec_pretty(settings)
        .map_err(|e| format!("failed to serialize settings: {e}"))?;

    std::fs::write(&tmp_path, content)
        .map_err(|e| format!("failed to write temp settings file: {e}"))?;

    if backup_path.exists() {
        let _ = std::fs::remove_file(&backup_path);
    }

    if path.exists() {
        std::fs::rename(path, &backup_path)
            .map_err(|e| format!("failed to create settings backup: {e}"))?;
    }

    if let Err(e) = std::fs::rename(&tmp_path, path) {
        let _ = std::fs::rename(&backup_path, path);
        return Err(format!("failed to finalize settings: {e}"));
    }

    if backup_path.exists() {
        let _ = std::fs::remove_file(&backup_path);
    }

    Ok(settings.clone())
}

pub fn read(app: &tauri::AppHandle) -> Result<ShellSettings, String> {
    read_at(&settings_path(app)?)
}

pub fn read_fail_open(app: &tauri::AppHandle) -> ShellSettings {
    match read(app) {
        Ok(settings) => settings,
        Err(err) => {
            tracing::warn!("settings read failed, using defaults: {}", err);
            ShellSettings::default()
        }
    }
}
