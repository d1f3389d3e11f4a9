//! Usage: Tauri command handlers exposed to the webview / platform glue.

mod auth_token;
mod launch;

pub(crate) use auth_token::*;
pub(crate) use launch::*;
