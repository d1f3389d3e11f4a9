//! Usage: Infrastructure adapters (filesystem paths, persistence, webview integration).

pub(crate) mod app_paths;
pub(crate) mod prefs;
pub(crate) mod settings;
pub(crate) mod webview;
