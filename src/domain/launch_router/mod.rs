//! Usage: Launch intent router (shortcut / widget dispatch into the webview + token mirroring).
//!
//! Host lifecycle maps onto two entry points:
//! - `on_launch`: first delivery (app start); also schedules the one-shot token extraction
//! - `on_redeliver`: re-entry with a new intent (second instance / native re-delivery)

use crate::domain::launch_signal::{LaunchIntent, TransactionType};
use crate::domain::{navigation, token_mirror};
use crate::shared::mutex_ext::MutexExt;
use crate::shared::scheduler::{ScheduledTask, Scheduler};
use crate::webview::WebRuntime;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;

const NAVIGATE_TASK_LABEL: &str = "navigate";
const TOKEN_EXTRACT_TASK_LABEL: &str = "token_extract";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouterDelays {
    pub navigate: Duration,
    pub token_extract: Duration,
}

impl Default for RouterDelays {
    fn default() -> Self {
        Self {
            navigate: Duration::from_millis(crate::settings::DEFAULT_NAVIGATE_DELAY_MS),
            token_extract: Duration::from_millis(crate::settings::DEFAULT_TOKEN_EXTRACT_DELAY_MS),
        }
    }
}

pub struct LaunchRouter {
    app_id: String,
    web: Arc<dyn WebRuntime>,
    scheduler: Arc<dyn Scheduler>,
    delays: RouterDelays,
    token_mirror_enabled: bool,
    // Created -> TokenExtractionAttempted; terminal for this router instance.
    token_extraction_attempted: AtomicBool,
    pending: Mutex<Vec<ScheduledTask>>,
}

impl LaunchRouter {
    pub(crate) fn new(
        app_id: impl Into<String>,
        web: Arc<dyn WebRuntime>,
        scheduler: Arc<dyn Scheduler>,
        delays: RouterDelays,
    ) -> Self {
        Self {
            app_id: app_id.into(),
            web,
            scheduler,
            delays,
            token_mirror_enabled: true,
            token_extraction_attempted: AtomicBool::new(false),
            pending: Mutex::new(Vec::new()),
        }
    }

    pub fn with_token_mirror(mut self, enabled: bool) -> Self {
        self.token_mirror_enabled = enabled;
        self
    }

    pub fn app_id(&self) -> &str {
        &self.app_id
    }

    pub fn on_launch(&self, intent: Option<&LaunchIntent>) -> Option<&'static str> {
        if self.token_mirror_enabled {
            self.extract_and_mirror_token();
        }
        self.handle(intent)
    }

    pub fn on_redeliver(&self, intent: Option<&LaunchIntent>) -> Option<&'static str> {
        self.handle(intent)
    }

    /// Returns the path a navigation was scheduled for, if the intent was recognized.
    pub fn handle(&self, intent: Option<&LaunchIntent>) -> Option<&'static str> {
        let Some(kind) = navigation::decide(intent, &self.app_id) else {
            tracing::debug!(
                action = intent.and_then(|i| i.action.as_deref()).unwrap_or(""),
                "launch intent ignored"
            );
            return None;
        };

        Some(self.navigate(kind))
    }

    pub fn navigate(&self, kind: TransactionType) -> &'static str {
        let path = navigation::target_path(kind);
        tracing::info!(kind = kind.as_str(), path = %path, "launch intent routed");

        let web = self.web.clone();
        let task = self.scheduler.schedule(
            NAVIGATE_TASK_LABEL,
            self.delays.navigate,
            Box::new(move || {
                let result = web
                    .base_url()
                    .and_then(|base| web.navigate(&navigation::target_url(&base, path)));
                if let Err(err) = result {
                    tracing::warn!(path = %path, "deferred navigation dropped: {}", err);
                }
            }),
        );
        self.track(task);
        path
    }

    /// Schedules the one-shot token extraction; later calls are no-ops.
    pub fn extract_and_mirror_token(&self) -> bool {
        if self.token_extraction_attempted.swap(true, Ordering::AcqRel) {
            return false;
        }

        let web = self.web.clone();
        let task = self.scheduler.schedule(
            TOKEN_EXTRACT_TASK_LABEL,
            self.delays.token_extract,
            Box::new(move || {
                if let Err(err) = web.eval(&token_mirror::extraction_script()) {
                    tracing::warn!("auth token extraction skipped: {}", err);
                }
            }),
        );
        self.track(task);
        true
    }

    fn track(&self, task: ScheduledTask) {
        let mut pending = self.pending.lock_or_recover();
        pending.retain(ScheduledTask::is_pending);
        if task.is_pending() {
            pending.push(task);
        }
    }

    #[cfg(test)]
    pub fn pending_count(&self) -> usize {
        let mut pending = self.pending.lock_or_recover();
        pending.retain(ScheduledTask::is_pending);
        pending.len()
    }

    /// Drops every deferred action that has not fired yet (host window destroyed).
    pub fn cancel_pending(&self) -> usize {
        let tasks = std::mem::take(&mut *self.pending.lock_or_recover());
        let mut cancelled = 0;
        for task in tasks {
            if task.is_pending() {
                tracing::debug!(label = task.label(), "cancelling deferred task");
                task.cancel();
                cancelled += 1;
            }
        }
        cancelled
    }
}
