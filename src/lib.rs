mod app;
mod commands;
mod domain;
mod infra;
mod shared;

pub(crate) use app::app_state;
pub(crate) use domain::{launch_args, launch_router, launch_signal, navigation, token_mirror};
pub(crate) use infra::{app_paths, prefs, settings, webview};
pub(crate) use shared::blocking;

use app_state::LaunchState;
use commands::*;
use tauri::Manager;

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    let builder = tauri::Builder::default();

    #[cfg(desktop)]
    let builder = builder.plugin(tauri_plugin_single_instance::init(|app, argv, _cwd| {
        app::launch::on_second_instance(app, argv);
    }));

    builder
        .on_window_event(app::launch::on_window_event)
        .setup(|app| {
            app::logging::init(app.handle());

            let settings = settings::read_fail_open(app.handle());
            tracing::info!(
                identifier = %app.config().identifier,
                server_url = %settings.server_url,
                "launch shell starting"
            );

            let state = LaunchState::build(app.handle(), &settings)?;
            app.manage(state);

            app::launch::on_process_launch(app.handle());
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            launch_intent_deliver,
            auth_token_mirror,
            auth_token_get
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
