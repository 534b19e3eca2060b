use crate::ports::{PolicyStorePort, ReloadReport};
use dnsguard_domain::DomainError;
use std::sync::Arc;
use tracing::{error, info};

pub struct ReloadPoliciesUseCase {
    store: Arc<dyn PolicyStorePort>,
}

impl ReloadPoliciesUseCase {
    pub fn new(store: Arc<dyn PolicyStorePort>) -> Self {
        Self { store }
    }

    pub async fn execute(&self) -> Result<ReloadReport, DomainError> {
        match self.store.reload().await {
            Ok(report) => {
                info!(
                    files = report.files_loaded,
                    skipped = report.files_skipped,
                    policies = report.policies,
                    "Policy store reloaded"
                );
                Ok(report)
            }
            Err(e) => {
                error!(error = %e, "Policy reload failed; keeping previous snapshot");
                Err(e)
            }
        }
    }
}
