//! Usage: Launch intent delivery from the platform layer (mobile shortcut / widget glue).

use crate::launch_signal::LaunchIntent;

#[tauri::command]
pub(crate) fn launch_intent_deliver(
    app: tauri::AppHandle,
    intent: Option<LaunchIntent>,
    redelivered: Option<bool>,
) {
    crate::app::launch::deliver(&app, intent.as_ref(), redelivered.unwrap_or(true));
}
