use async_trait::async_trait;
use dnsguard_domain::{DomainError, PolicySnapshot};
use std::sync::Arc;

/// Counts from one rebuild of the policy store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReloadReport {
    pub files_loaded: usize,
    pub files_skipped: usize,
    pub policies: usize,
}

#[async_trait]
pub trait PolicyStorePort: Send + Sync {
    /// Current published snapshot. Never blocks on a rebuild.
    fn snapshot(&self) -> Arc<PolicySnapshot>;

    /// Rebuilds from the configuration root and publishes the result.
    /// On error the previous snapshot stays published.
    async fn reload(&self) -> Result<ReloadReport, DomainError>;

    fn policy_count(&self) -> usize {
        self.snapshot().len()
    }
}
