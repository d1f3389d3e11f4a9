//! Usage: Shared Tauri state (launch router + token mirror) used by `commands/*` and host hooks.

use crate::launch_router::{LaunchRouter, RouterDelays};
use crate::prefs::{FilePrefs, PREFS_NAMESPACE};
use crate::settings::ShellSettings;
use crate::shared::scheduler::RuntimeScheduler;
use crate::token_mirror::TokenMirror;
use crate::webview::TauriWebRuntime;
use std::sync::Arc;
use tauri::Manager;

pub(crate) struct LaunchState {
    pub(crate) router: LaunchRouter,
    pub(crate) token_mirror: TokenMirror,
}

impl LaunchState {
    pub(crate) fn build(app: &tauri::AppHandle, settings: &ShellSettings) -> Result<Self, String> {
        let prefs = FilePrefs::open(app, PREFS_NAMESPACE)?;
        tracing::debug!(path = %prefs.path().display(), "native prefs store ready");

        let app_id = app.config().identifier.clone();
        let web = TauriWebRuntime::new(app.clone(), settings.server_url.clone());
        let delays = RouterDelays {
            navigate: settings.navigate_delay(),
            token_extract: settings.token_extract_delay(),
        };

        let router = LaunchRouter::new(app_id, Arc::new(web), Arc::new(RuntimeScheduler), delays)
            .with_token_mirror(settings.token_mirror_enabled);

        Ok(Self {
            router,
            token_mirror: TokenMirror::new(Arc::new(prefs)),
        })
    }
}
