#![allow(dead_code)]

use dnsguard_application::ports::PolicyStorePort;
use dnsguard_application::use_cases::ReloadPoliciesUseCase;
use dnsguard_infrastructure::PolicyStore;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{sleep, Instant};

pub fn customer_json(addr: &str, redirect: &str) -> String {
    format!(
        r#"{{"Version":1,"CustomerId":"test","Policies":[{{"Ipv4Addrs":["{}"],"Ipv6Addrs":[],"BlockCategories":[4],"BlockReputation":20,"RedirectIp":"{}"}}]}}"#,
        addr, redirect
    )
}

pub fn store_with_use_case(root: &Path) -> (Arc<PolicyStore>, Arc<ReloadPoliciesUseCase>) {
    let store = Arc::new(PolicyStore::new(root));
    let reload = Arc::new(ReloadPoliciesUseCase::new(store.clone()));
    (store, reload)
}

/// Polls `check` until it returns true or `timeout` elapses.
pub async fn wait_until<F>(timeout: Duration, mut check: F) -> bool
where
    F: FnMut() -> bool,
{
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        if check() {
            return true;
        }
        sleep(Duration::from_millis(25)).await;
    }
    check()
}

pub fn has_policy(store: &PolicyStore, addr: &str) -> bool {
    store.snapshot().lookup(addr).is_some()
}
