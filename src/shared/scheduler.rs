//! Usage: "Run after a delay, cancellable" primitive used for deferred webview actions.

#[cfg(test)]
use crate::shared::mutex_ext::MutexExt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

pub(crate) type Task = Box<dyn FnOnce() + Send + 'static>;

pub(crate) trait Scheduler: Send + Sync {
    fn schedule(&self, label: &'static str, delay: Duration, task: Task) -> ScheduledTask;
}

pub(crate) struct ScheduledTask {
    label: &'static str,
    done: Arc<AtomicBool>,
    cancelled: Arc<AtomicBool>,
    handle: Option<tauri::async_runtime::JoinHandle<()>>,
}

/// Marks a task done when its future is dropped: completion, panic or abort.
struct DoneGuard(Arc<AtomicBool>);

impl Drop for DoneGuard {
    fn drop(&mut self) {
        self.0.store(true, Ordering::Release);
    }
}

impl ScheduledTask {
    #[cfg(test)]
    pub(crate) fn completed(label: &'static str) -> Self {
        Self {
            label,
            done: Arc::new(AtomicBool::new(true)),
            cancelled: Arc::new(AtomicBool::new(false)),
            handle: None,
        }
    }

    pub(crate) fn label(&self) -> &'static str {
        self.label
    }

    pub(crate) fn is_pending(&self) -> bool {
        !self.done.load(Ordering::Acquire)
    }

    pub(crate) fn cancel(self) {
        if !self.is_pending() {
            return;
        }
        self.cancelled.store(true, Ordering::Release);
        if let Some(handle) = self.handle {
            handle.abort();
        }
        tracing::debug!(label = self.label, "deferred task cancelled");
    }
}

/// Sleeps on the Tauri async runtime, then runs the task.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct RuntimeScheduler;

impl Scheduler for RuntimeScheduler {
    fn schedule(&self, label: &'static str, delay: Duration, task: Task) -> ScheduledTask {
        let done = Arc::new(AtomicBool::new(false));
        let cancelled = Arc::new(AtomicBool::new(false));
        let handle = tauri::async_runtime::spawn({
            let guard = DoneGuard(done.clone());
            let cancelled = cancelled.clone();
            async move {
                let _guard = guard;
                tokio::time::sleep(delay).await;
                if !cancelled.load(Ordering::Acquire) {
                    task();
                }
            }
        });

        ScheduledTask {
            label,
            done,
            cancelled,
            handle: Some(handle),
        }
    }
}

/// Runs every task inline, ignoring the delay.
#[cfg(test)]
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct ImmediateScheduler;

#[cfg(test)]
impl Scheduler for ImmediateScheduler {
    fn schedule(&self, label: &'static str, _delay: Duration, task: Task) -> ScheduledTask {
        task();
        ScheduledTask::completed(label)
    }
}

/// Holds tasks until `run_all`, so tests can observe the pending window.
#[cfg(test)]
#[derive(Default)]
pub(crate) struct ManualScheduler {
    queued: std::sync::Mutex<Vec<ManualEntry>>,
}

#[cfg(test)]
struct ManualEntry {
    label: &'static str,
    delay: Duration,
    task: Task,
    done: Arc<AtomicBool>,
    cancelled: Arc<AtomicBool>,
}

#[cfg(test)]
impl ManualScheduler {
    pub(crate) fn queued_delays(&self) -> Vec<(&'static str, Duration)> {
        self.queued
            .lock_or_recover()
            .iter()
            .map(|entry| (entry.label, entry.delay))
            .collect()
    }

    /// Runs queued tasks in scheduling order; cancelled ones are discarded.
    pub(crate) fn run_all(&self) {
        let queued = std::mem::take(&mut *self.queued.lock_or_recover());
        for entry in queued {
            if !entry.cancelled.load(Ordering::Acquire) {
                (entry.task)();
            }
            entry.done.store(true, Ordering::Release);
        }
    }
}

#[cfg(test)]
impl Scheduler for ManualScheduler {
    fn schedule(&self, label: &'static str, delay: Duration, task: Task) -> ScheduledTask {
        let done = Arc::new(AtomicBool::new(false));
        let cancelled = Arc::new(AtomicBool::new(false));
        self.queued.lock_or_recover().push(ManualEntry {
            label,
            delay,
            task,
            done: done.clone(),
            cancelled: cancelled.clone(),
        });
        ScheduledTask {
            label,
            done,
            cancelled,
            handle: None,
        }
    }
}
