use async_trait::async_trait;
use dnsguard_domain::Verdict;

#[async_trait]
pub trait ClassificationPort: Send + Sync {
    /// Classifies `query_name`. `None` means the daemon was unavailable and
    /// the query must pass through unmodified.
    async fn lookup(&self, query_name: &str) -> Option<Verdict>;
}
