//! Usage: Auth token mirror commands (script callback + read-back for native consumers).

use crate::app_state::LaunchState;
use crate::blocking;
use crate::token_mirror::TokenReport;

#[tauri::command]
pub(crate) async fn auth_token_mirror(
    state: tauri::State<'_, LaunchState>,
    primary: Option<String>,
    legacy: Option<String>,
) -> Result<bool, String> {
    let mirror = state.token_mirror.clone();
    blocking::run("auth_token_mirror", move || {
        let report = TokenReport { primary, legacy };
        mirror.mirror_report(&report)
    })
    .await
    .map_err(|err| {
        tracing::warn!("auth token mirror failed: {}", err);
        err
    })
}

#[tauri::command]
pub(crate) async fn auth_token_get(
    state: tauri::State<'_, LaunchState>,
) -> Result<Option<String>, String> {
    let mirror = state.token_mirror.clone();
    blocking::run("auth_token_get", move || mirror.current()).await
}
