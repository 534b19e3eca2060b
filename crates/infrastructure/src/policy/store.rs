use super::loader::build_snapshot;
use arc_swap::ArcSwap;
use async_trait::async_trait;
use dnsguard_application::ports::{PolicyStorePort, ReloadReport};
use dnsguard_domain::{DomainError, PolicySnapshot};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info};

/// Publishes policy snapshots built from a configuration directory.
///
/// Readers load the current `Arc<PolicySnapshot>` without locking; a reload
/// builds the next snapshot off to the side and swaps it in with one store.
pub struct PolicyStore {
    root: PathBuf,
    current: ArcSwap<PolicySnapshot>,
    rebuild: Mutex<()>,
}

impl PolicyStore {
    /// Starts with an empty snapshot; call `reload` to populate it.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            current: ArcSwap::from_pointee(PolicySnapshot::empty()),
            rebuild: Mutex::new(()),
        }
    }

    pub fn publish(&self, snapshot: PolicySnapshot) {
        self.current.store(Arc::new(snapshot));
    }
}

#[async_trait]
impl PolicyStorePort for PolicyStore {
    #[inline]
    fn snapshot(&self) -> Arc<PolicySnapshot> {
        self.current.load_full()
    }

    async fn reload(&self) -> Result<ReloadReport, DomainError> {
        // Serialises rebuilds so an older scan never overwrites a newer one.
        let _guard = self.rebuild.lock().await;

        info!(root = %self.root.display(), "Policy rebuild started");

        let root = self.root.clone();
        let loaded = tokio::task::spawn_blocking(move || build_snapshot(&root))
            .await
            .map_err(|e| DomainError::IoError(format!("Policy rebuild task failed: {}", e)))?
            .map_err(|e| {
                error!(error = %e, "Policy rebuild failed");
                e
            })?;

        let built_at = loaded.snapshot.built_at();
        let report = ReloadReport {
            files_loaded: loaded.files_loaded,
            files_skipped: loaded.files_skipped,
            policies: loaded.snapshot.len(),
        };

        self.publish(loaded.snapshot);

        info!(
            files = report.files_loaded,
            skipped = report.files_skipped,
            policies = report.policies,
            built_at = %built_at,
            "Policy rebuild completed"
        );
        Ok(report)
    }

    fn policy_count(&self) -> usize {
        self.current.load().len()
    }
}
