//! Usage: Mirror the web app's auth token (read from local storage) into native preferences.

use crate::prefs::PrefsStore;
use serde::Deserialize;
use std::sync::Arc;

pub const AUTH_TOKEN_KEY: &str = "auth_token";
pub(crate) const PRIMARY_STORAGE_KEY: &str = "token";
pub(crate) const LEGACY_STORAGE_KEY: &str = "next-auth.session-token";
pub(crate) const REPORT_COMMAND: &str = "auth_token_mirror";

/// Raw local-storage values as reported back by the extraction script.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TokenReport {
    pub primary: Option<String>,
    pub legacy: Option<String>,
}

impl TokenReport {
    /// First non-empty value: the primary key, then the legacy session key.
    pub fn resolve(&self) -> Option<&str> {
        [self.primary.as_deref(), self.legacy.as_deref()]
            .into_iter()
            .flatten()
            .find(|value| !value.is_empty())
    }
}

pub(crate) fn normalize_token(raw: &str) -> Option<String> {
    let token = raw.replace('"', "");
    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}

/// Read-only script: reads both storage keys and reports them through `auth_token_mirror`.
/// Storage access errors (page not loaded, storage disabled) report as null.
pub(crate) fn extraction_script() -> String {
    format!(
        r#"(function () {{
  var read = function (key) {{
    try {{ return window.localStorage.getItem(key); }} catch (_) {{ return null; }}
  }};
  var internals = window.__TAURI_INTERNALS__;
  if (!internals || typeof internals.invoke !== "function") return;
  internals
    .invoke("{REPORT_COMMAND}", {{ primary: read("{PRIMARY_STORAGE_KEY}"), legacy: read("{LEGACY_STORAGE_KEY}") }})
    .catch(function () {{}});
}})();"#
    )
}

#[derive(Clone)]
pub struct TokenMirror {
    prefs: Arc<dyn PrefsStore>,
}

impl TokenMirror {
    pub fn new(prefs: Arc<dyn PrefsStore>) -> Self {
        Self { prefs }
    }

    /// Returns `true` when a token was written.
    pub fn mirror_raw(&self, raw: Option<&str>) -> Result<bool, String> {
        let Some(token) = raw.and_then(normalize_token) else {
            tracing::debug!("auth token unavailable; nothing mirrored");
            return Ok(false);
        };

        self.prefs
            .put_string(AUTH_TOKEN_KEY, &token)
            .map_err(|e| format!("AUTH_TOKEN_MIRROR: {e}"))?;
        tracing::info!(token_len = token.len(), "auth token mirrored");
        Ok(true)
    }

    pub fn mirror_report(&self, report: &TokenReport) -> Result<bool, String> {
        self.mirror_raw(report.resolve())
    }

    pub fn current(&self) -> Result<Option<String>, String> {
        self.prefs.get_string(AUTH_TOKEN_KEY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prefs::memory::MemoryPrefs;

    fn mirror() -> (Arc<MemoryPrefs>, TokenMirror) {
        let prefs = Arc::new(MemoryPrefs::default());
        let mirror = TokenMirror::new(prefs.clone());
        (prefs, mirror)
    }

    #[test]
    fn quoted_script_result_is_stored_without_quotes() {
        let (prefs, mirror) = mirror();
        assert!(mirror.mirror_raw(Some("\"abc123\"")).expect("mirror"));
        assert_eq!(
            prefs.get_string(AUTH_TOKEN_KEY).expect("get").as_deref(),
            Some("abc123")
        );
    }

    #[test]
    fn empty_or_missing_result_writes_nothing() {
        let (prefs, mirror) = mirror();
        assert!(!mirror.mirror_raw(Some("")).expect("mirror"));
        assert!(!mirror.mirror_raw(None).expect("mirror"));
        assert!(!mirror.mirror_raw(Some("\"\"")).expect("mirror"));
        assert_eq!(prefs.write_count(), 0);
    }

    #[test]
    fn legacy_key_is_used_when_primary_is_empty() {
        let (prefs, mirror) = mirror();
        let report = TokenReport {
            primary: Some(String::new()),
            legacy: Some("session-xyz".to_string()),
        };
        assert!(mirror.mirror_report(&report).expect("mirror"));
        assert_eq!(mirror.current().expect("get").as_deref(), Some("session-xyz"));
        assert_eq!(prefs.write_count(), 1);
    }

    #[test]
    fn primary_key_wins_over_legacy() {
        let report = TokenReport {
            primary: Some("primary".to_string()),
            legacy: Some("legacy".to_string()),
        };
        assert_eq!(report.resolve(), Some("primary"));
        assert_eq!(TokenReport::default().resolve(), None);
    }

    #[test]
    fn each_successful_extraction_overwrites_the_record() {
        let (prefs, mirror) = mirror();
        mirror.mirror_raw(Some("one")).expect("mirror");
        mirror.mirror_raw(Some("two")).expect("mirror");
        assert_eq!(mirror.current().expect("get").as_deref(), Some("two"));
        assert_eq!(prefs.write_count(), 2);
    }

    #[test]
    fn report_deserializes_from_invoke_payload() {
        let report: TokenReport =
            serde_json::from_str(r#"{"primary":null,"legacy":"abc"}"#).expect("parse");
        assert_eq!(report.resolve(), Some("abc"));
    }

    #[test]
    fn extraction_script_reads_both_keys_and_reports_back() {
        let script = extraction_script();
        assert!(script.contains(r#"read("token")"#));
        assert!(script.contains(r#"read("next-auth.session-token")"#));
        assert!(script.contains(r#"invoke("auth_token_mirror""#));
        assert!(!script.contains("setItem"));
    }

    #[test]
    fn cloned_mirror_writes_through_blocking_helper() {
        let prefs = Arc::new(MemoryPrefs::default());
        let mirror = TokenMirror::new(prefs.clone());

        let worker = mirror.clone();
        let report = TokenReport {
            primary: Some("\"off-thread\"".to_string()),
            legacy: None,
        };
        let written = tauri::async_runtime::block_on(crate::blocking::run(
            "auth_token_mirror",
            move || worker.mirror_report(&report),
        ));

        assert_eq!(written, Ok(true));
        assert_eq!(mirror.current().expect("get").as_deref(), Some("off-thread"));
        assert_eq!(prefs.write_count(), 1);
    }
}
