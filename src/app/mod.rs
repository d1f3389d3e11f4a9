//! Usage: Application layer (Tauri-managed state, launch lifecycle hooks, logging setup).

pub(crate) mod app_state;
pub(crate) mod launch;
pub(crate) mod logging;
