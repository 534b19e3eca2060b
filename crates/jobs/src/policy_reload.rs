use dnsguard_application::use_cases::ReloadPoliciesUseCase;
use notify::event::ModifyKind;
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

const DEFAULT_DEBOUNCE_MS: u64 = 250;
const DEFAULT_WATCH_RETRY_SECS: u64 = 5;

type WatchEvents = mpsc::UnboundedReceiver<notify::Result<Event>>;

enum WatchExit {
    Shutdown,
    ChannelClosed,
    RootReplaced,
}

/// Background job that rebuilds the policy store whenever files under the
/// configuration root are created, modified or removed.
///
///   - The job owns the OS watcher; it is released when the loop exits
///   - Bursts of events within the debounce window trigger one rebuild
///   - Rebuild failures are logged and the previous snapshot stays live
///   - If the root cannot be watched yet, setup is retried periodically
///   - If the root is removed or renamed away, the watch is re-armed on the
///     new directory once it exists
pub struct PolicyReloadJob {
    reload: Arc<ReloadPoliciesUseCase>,
    root: PathBuf,
    debounce: Duration,
    watch_retry: Duration,
    shutdown: CancellationToken,
}

impl PolicyReloadJob {
    pub fn new(reload: Arc<ReloadPoliciesUseCase>, root: impl Into<PathBuf>) -> Self {
        Self {
            reload,
            root: root.into(),
            debounce: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
            watch_retry: Duration::from_secs(DEFAULT_WATCH_RETRY_SECS),
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    pub fn with_watch_retry(mut self, retry: Duration) -> Self {
        self.watch_retry = retry;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    pub fn start(self: Arc<Self>) -> tokio::task::JoinHandle<()> {
        info!(
            root = %self.root.display(),
            debounce_ms = self.debounce.as_millis() as u64,
            "Starting policy reload job"
        );

        tokio::spawn(async move { self.run().await })
    }

    async fn run(&self) {
        let mut rearmed = false;

        while let Some((watcher, mut events)) = self.watch_until_ready().await {
            if rearmed {
                // Anything written before the new watch was armed went unseen.
                let _ = self.reload.execute().await;
            }

            let exit = self.watch_loop(&mut events).await;
            drop(watcher);

            match exit {
                WatchExit::Shutdown => break,
                WatchExit::ChannelClosed => {
                    error!("Policy watcher channel closed; reload job stopping");
                    return;
                }
                WatchExit::RootReplaced => {
                    warn!(
                        root = %self.root.display(),
                        "Policy directory was removed or replaced; re-arming watch"
                    );
                    rearmed = true;
                }
            }
        }

        info!("PolicyReloadJob: shutting down");
    }

    async fn watch_loop(&self, events: &mut WatchEvents) -> WatchExit {
        loop {
            tokio::select! {
                _ = self.shutdown.cancelled() => return WatchExit::Shutdown,
                event = events.recv() => {
                    match event {
                        Some(Ok(event)) if is_change(&event) => {
                            debug!(kind = ?event.kind, paths = ?event.paths, "Policy change detected");
                            let mut replaced = names_root(&self.root, &event);
                            replaced |= self.drain_burst(events).await;
                            if replaced || !self.root.is_dir() {
                                return WatchExit::RootReplaced;
                            }
                            // Errors are logged by the use case; the old snapshot stays.
                            let _ = self.reload.execute().await;
                        }
                        Some(Ok(_)) => {}
                        Some(Err(e)) => {
                            warn!(error = %e, "Policy watcher reported an error");
                        }
                        None => return WatchExit::ChannelClosed,
                    }
                }
            }
        }
    }

    /// Retries watcher setup until it succeeds or the job is cancelled.
    async fn watch_until_ready(&self) -> Option<(RecommendedWatcher, WatchEvents)> {
        loop {
            match watch_root(&self.root) {
                Ok(ready) => {
                    info!(root = %self.root.display(), "Watching policy directory");
                    return Some(ready);
                }
                Err(e) => {
                    error!(
                        error = %e,
                        root = %self.root.display(),
                        retry_secs = self.watch_retry.as_secs(),
                        "Failed to watch policy directory"
                    );
                }
            }

            tokio::select! {
                _ = self.shutdown.cancelled() => return None,
                _ = tokio::time::sleep(self.watch_retry) => {}
            }
        }
    }

    /// Swallows follow-up events until the directory has been quiet for one
    /// debounce window. Returns whether any of them detached the root.
    async fn drain_burst(&self, events: &mut WatchEvents) -> bool {
        let mut replaced = false;
        loop {
            match tokio::time::timeout(self.debounce, events.recv()).await {
                Ok(Some(Ok(event))) => replaced |= names_root(&self.root, &event),
                Ok(Some(Err(_))) => continue,
                Ok(None) | Err(_) => return replaced,
            }
        }
    }
}

fn watch_root(root: &Path) -> notify::Result<(RecommendedWatcher, WatchEvents)> {
    let (tx, rx) = mpsc::unbounded_channel();
    let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
        let _ = tx.send(res);
    })?;
    watcher.watch(root, RecursiveMode::Recursive)?;
    Ok((watcher, rx))
}

/// True when the event removes or renames the watched root itself.
fn names_root(root: &Path, event: &Event) -> bool {
    let detaches = matches!(
        event.kind,
        EventKind::Remove(_) | EventKind::Modify(ModifyKind::Name(_))
    );
    detaches && event.paths.iter().any(|path| path == root)
}

fn is_change(event: &Event) -> bool {
    event.kind.is_create() || event.kind.is_modify() || event.kind.is_remove()
}
