//! Debounced background saving.
//!
//! Each call to [`AutoSaver::schedule`] restarts the countdown; only the
//! latest snapshot is sent once the layout has been quiet for the whole
//! delay. Failures are logged, never surfaced to the user.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use mediakit_editor::LayoutState;

use crate::client::ApiService;

pub const DEFAULT_AUTOSAVE_DELAY: Duration = Duration::from_millis(5000);

#[derive(Debug, Default)]
struct Counters {
    saved: AtomicUsize,
    failed: AtomicUsize,
}

/// Handle to the auto-save task; dropping it stops the task
pub struct AutoSaver {
    tx: mpsc::UnboundedSender<LayoutState>,
    handle: JoinHandle<()>,
    counters: Arc<Counters>,
}

impl AutoSaver {
    /// Spawn the task on the current tokio runtime
    pub fn spawn(api: ApiService, delay: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let counters = Arc::new(Counters::default());
        let handle = tokio::spawn(run(api, delay, rx, counters.clone()));

        info!(delay_ms = delay.as_millis() as u64, "Auto-save started");
        Self {
            tx,
            handle,
            counters,
        }
    }

    /// Restart the countdown with a newer snapshot
    pub fn schedule(&self, snapshot: LayoutState) {
        if self.tx.send(snapshot).is_err() {
            debug!("Auto-save task already stopped");
        }
    }

    /// Sender usable from a store listener
    pub fn sender(&self) -> mpsc::UnboundedSender<LayoutState> {
        self.tx.clone()
    }

    pub fn saves_completed(&self) -> usize {
        self.counters.saved.load(Ordering::Relaxed)
    }

    pub fn saves_failed(&self) -> usize {
        self.counters.failed.load(Ordering::Relaxed)
    }

    /// Stop without sending a pending snapshot
    pub fn stop(self) {
        self.handle.abort();
    }
}

impl Drop for AutoSaver {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn run(
    api: ApiService,
    delay: Duration,
    mut rx: mpsc::UnboundedReceiver<LayoutState>,
    counters: Arc<Counters>,
) {
    while let Some(mut pending) = rx.recv().await {
        loop {
            tokio::select! {
                newer = rx.recv() => match newer {
                    Some(snapshot) => pending = snapshot,
                    None => return,
                },
                _ = tokio::time::sleep(delay) => break,
            }
        }

        match api.save(&pending).await {
            Ok(_) => {
                counters.saved.fetch_add(1, Ordering::Relaxed);
                debug!("Auto-saved layout");
            }
            Err(e) => {
                counters.failed.fetch_add(1, Ordering::Relaxed);
                error!(error = %e, "Auto-save failed");
            }
        }
    }
}
