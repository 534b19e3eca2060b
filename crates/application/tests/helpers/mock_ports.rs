#![allow(dead_code)]

use async_trait::async_trait;
use dnsguard_application::ports::{ClassificationPort, PolicyStorePort, ReloadReport};
use dnsguard_domain::{DomainError, Policy, PolicySnapshot, Verdict};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, RwLock};

/// Classifier answering from a fixed table; unknown names are unavailable.
#[derive(Default)]
pub struct MockClassifier {
    verdicts: Mutex<HashMap<String, Verdict>>,
    calls: AtomicUsize,
}

impl MockClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_verdict(self, name: &str, verdict: Verdict) -> Self {
        self.verdicts
            .lock()
            .unwrap()
            .insert(name.to_string(), verdict);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ClassificationPort for MockClassifier {
    async fn lookup(&self, query_name: &str) -> Option<Verdict> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.verdicts.lock().unwrap().get(query_name).cloned()
    }
}

pub struct MockPolicyStore {
    current: RwLock<Arc<PolicySnapshot>>,
    next: Mutex<Option<Result<PolicySnapshot, DomainError>>>,
    reloads: AtomicUsize,
}

impl MockPolicyStore {
    pub fn new(policies: Vec<Policy>) -> Self {
        Self {
            current: RwLock::new(Arc::new(PolicySnapshot::from_policies(policies))),
            next: Mutex::new(None),
            reloads: AtomicUsize::new(0),
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![])
    }

    /// Result handed out by the next `reload` call.
    pub fn set_next_reload(&self, next: Result<PolicySnapshot, DomainError>) {
        *self.next.lock().unwrap() = Some(next);
    }

    pub fn reloads(&self) -> usize {
        self.reloads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PolicyStorePort for MockPolicyStore {
    fn snapshot(&self) -> Arc<PolicySnapshot> {
        self.current.read().unwrap().clone()
    }

    async fn reload(&self) -> Result<ReloadReport, DomainError> {
        self.reloads.fetch_add(1, Ordering::SeqCst);
        let next = self.next.lock().unwrap().take();
        match next {
            Some(Ok(snapshot)) => {
                let policies = snapshot.len();
                *self.current.write().unwrap() = Arc::new(snapshot);
                Ok(ReloadReport {
                    files_loaded: 1,
                    files_skipped: 0,
                    policies,
                })
            }
            Some(Err(e)) => Err(e),
            None => Ok(ReloadReport {
                policies: self.snapshot().len(),
                ..Default::default()
            }),
        }
    }
}

pub fn reference_policy() -> Policy {
    Policy::new("10.0.0.5", 20, &[2, 4, 6], "104.20.3.248".parse().unwrap())
}
