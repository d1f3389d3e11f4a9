//! Usage: Host lifecycle hooks (process launch, second-instance re-entry, window teardown).

use crate::app_state::LaunchState;
use crate::launch_args::parse_launch_args;
use crate::launch_signal::LaunchIntent;
use crate::webview::MAIN_WINDOW_LABEL;
use tauri::Manager;

pub(crate) fn on_process_launch(app: &tauri::AppHandle) {
    let Some(state) = app.try_state::<LaunchState>() else {
        return;
    };
    let argv = lossy_args(std::env::args_os());
    let intent = parse_launch_args(&argv, state.router.app_id());
    state.router.on_launch(intent.as_ref());
}

/// Non-UTF-8 arguments are replaced lossily instead of aborting startup.
fn lossy_args(args: impl IntoIterator<Item = std::ffi::OsString>) -> Vec<String> {
    args.into_iter()
        .map(|arg| arg.to_string_lossy().into_owned())
        .collect()
}

pub(crate) fn deliver(app: &tauri::AppHandle, intent: Option<&LaunchIntent>, redelivered: bool) {
    let Some(state) = app.try_state::<LaunchState>() else {
        tracing::warn!("launch intent arrived before router setup; dropped");
        return;
    };
    if redelivered {
        state.router.on_redeliver(intent);
    } else {
        state.router.on_launch(intent);
    }
}

#[cfg(desktop)]
pub(crate) fn on_second_instance(app: &tauri::AppHandle, argv: Vec<String>) {
    show_main_window(app);

    let Some(state) = app.try_state::<LaunchState>() else {
        return;
    };
    let intent = parse_launch_args(&argv, state.router.app_id());
    state.router.on_redeliver(intent.as_ref());
}

#[cfg(desktop)]
fn show_main_window(app: &tauri::AppHandle) {
    let Some(window) = app.get_webview_window(MAIN_WINDOW_LABEL) else {
        return;
    };

    let _ = window.show();
    let _ = window.unminimize();
    let _ = window.set_focus();
}

pub(crate) fn on_window_event(window: &tauri::Window, event: &tauri::WindowEvent) {
    if window.label() != MAIN_WINDOW_LABEL {
        return;
    }

    if !matches!(event, tauri::WindowEvent::Destroyed) {
        return;
    }

    if let Some(state) = window.try_state::<LaunchState>() {
        let cancelled = state.router.cancel_pending();
        if cancelled > 0 {
            tracing::info!(cancelled, "main window destroyed; pending webview actions dropped");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;

    #[test]
    fn lossy_args_keeps_utf8_arguments() {
        let args = lossy_args([
            OsString::from("kade-kolku"),
            OsString::from("kadekolku://widget"),
        ]);
        assert_eq!(args, vec!["kade-kolku", "kadekolku://widget"]);
    }

    #[cfg(unix)]
    #[test]
    fn lossy_args_tolerates_invalid_utf8() {
        use std::os::unix::ffi::OsStringExt;

        let args = lossy_args([
            OsString::from_vec(b"/opt/k\xffde/kade-kolku".to_vec()),
            OsString::from("--shortcut-action=add_transaction"),
        ]);
        assert_eq!(args.len(), 2);
        assert!(args[0].contains('\u{FFFD}'));
        assert!(parse_launch_args(&args, "com.kadekolku.app").is_some());
    }
}
