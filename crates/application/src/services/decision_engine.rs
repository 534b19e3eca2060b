use dnsguard_domain::{PolicySnapshot, Verdict};
use std::net::IpAddr;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Block(IpAddr),
}

impl Decision {
    pub fn is_block(&self) -> bool {
        matches!(self, Decision::Block(_))
    }
}

/// Applies the client's policy to a classification verdict.
///
/// Queries without a verdict, and clients without a policy, are always
/// allowed. A reputation below the policy minimum blocks on its own;
/// otherwise any blocked category in the verdict blocks.
pub fn decide(
    query_name: &str,
    client_address: &str,
    verdict: Option<&Verdict>,
    store: &PolicySnapshot,
) -> Decision {
    let Some(verdict) = verdict else {
        return Decision::Allow;
    };

    let Some(policy) = store.lookup(client_address) else {
        return Decision::Allow;
    };

    if policy.reputation_breached(verdict) {
        debug!(
            name = %query_name,
            client = %client_address,
            reputation = verdict.reputation,
            minimum = policy.minimum_reputation,
            "Blocked on reputation"
        );
        return Decision::Block(policy.block_address);
    }

    let hits = policy.category_hits(verdict);
    if hits == 0 {
        return Decision::Allow;
    }

    debug!(
        name = %query_name,
        client = %client_address,
        hits,
        "Blocked on category"
    );
    Decision::Block(policy.block_address)
}
