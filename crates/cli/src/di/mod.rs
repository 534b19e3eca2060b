use dnsguard_application::use_cases::{FilterQueryUseCase, ReloadPoliciesUseCase};
use dnsguard_domain::Config;
use dnsguard_infrastructure::{DaemonClient, PolicyStore};
use dnsguard_jobs::PolicyReloadJob;
use std::sync::Arc;
use tracing::info;

pub struct FilterServices {
    pub policy_store: Arc<PolicyStore>,
    pub classifier: Arc<DaemonClient>,
    pub filter_query: Arc<FilterQueryUseCase>,
    pub reload_policies: Arc<ReloadPoliciesUseCase>,
}

impl FilterServices {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let policy_store = Arc::new(PolicyStore::new(config.policy.config_root.clone()));
        let classifier = Arc::new(DaemonClient::new(&config.daemon));

        let fallback_ipv4 = config
            .policy
            .block_ipv4_addr()
            .ok_or_else(|| anyhow::anyhow!("block_ipv4 is not an IPv4 address"))?;
        let fallback_ipv6 = config
            .policy
            .block_ipv6_addr()
            .ok_or_else(|| anyhow::anyhow!("block_ipv6 is not an IPv6 address"))?;

        let filter_query = Arc::new(
            FilterQueryUseCase::new(classifier.clone(), policy_store.clone())
                .with_fallback_addresses(fallback_ipv4, fallback_ipv6),
        );
        let reload_policies = Arc::new(ReloadPoliciesUseCase::new(policy_store.clone()));

        info!(
            daemon = %classifier.server(),
            policy_root = %config.policy.config_root.display(),
            "Filter services initialized"
        );

        Ok(Self {
            policy_store,
            classifier,
            filter_query,
            reload_policies,
        })
    }

    pub fn policy_reload_job(&self, config: &Config) -> PolicyReloadJob {
        PolicyReloadJob::new(self.reload_policies.clone(), config.policy.config_root.clone())
            .with_debounce(config.policy.reload_debounce())
    }
}
