//! Usage: Embedded web runtime adapter (navigate / inject script) over the main Tauri webview.

use tauri::Manager;

pub const MAIN_WINDOW_LABEL: &str = "main";

pub trait WebRuntime: Send + Sync {
    fn base_url(&self) -> Result<String, String>;
    fn navigate(&self, url: &str) -> Result<(), String>;
    fn eval(&self, script: &str) -> Result<(), String>;
}

pub(crate) fn navigation_script(url: &str) -> Result<String, String> {
    let quoted = serde_json::to_string(url).map_err(|e| format!("WEBVIEW_NAVIGATE: {e}"))?;
    Ok(format!("window.location.href = {quoted};"))
}

pub struct TauriWebRuntime {
    app: tauri::AppHandle,
    server_url: String,
}

impl TauriWebRuntime {
    pub fn new(app: tauri::AppHandle, server_url: impl Into<String>) -> Self {
        Self {
            app,
            server_url: server_url.into(),
        }
    }

    fn window(&self) -> Result<tauri::WebviewWindow, String> {
        self.app
            .get_webview_window(MAIN_WINDOW_LABEL)
            .ok_or_else(|| format!("WEBVIEW_MISSING: no window labeled {MAIN_WINDOW_LABEL}"))
    }
}

impl WebRuntime for TauriWebRuntime {
    fn base_url(&self) -> Result<String, String> {
        let configured = self.server_url.trim();
        if !configured.is_empty() {
            return Ok(configured.to_string());
        }

        let current = self
            .window()?
            .url()
            .map_err(|e| format!("WEBVIEW_URL: {e}"))?;
        Ok(current.origin().ascii_serialization())
    }

    fn navigate(&self, url: &str) -> Result<(), String> {
        self.eval(&navigation_script(url)?)
    }

    fn eval(&self, script: &str) -> Result<(), String> {
        self.window()?
            .eval(script)
            .map_err(|e| format!("WEBVIEW_EVAL: {e}"))
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn navigation_script_quotes_url() {
        assert_eq!(
            navigation_script("https://budget.example.app/transactions/new?type=income")
                .expect("script"),
            r#"window.location.href = "https://budget.example.app/transactions/new?type=income";"#
        );
    }

    #[test]
    fn navigation_script_escapes_quotes() {
        let script = navigation_script("https://x.test/a'\"b").expect("script");
        assert_eq!(script, r#"window.location.href = "https://x.test/a'\"b";"#);
    }
}
