use crate::errors::DomainError;
use crate::verdict::Verdict;
use chrono::{DateTime, Utc};
use rustc_hash::{FxHashMap, FxHashSet};
use crate::wire::{decode_folded, nullable};
use serde::{Deserialize, Deserializer};
use std::net::IpAddr;
use std::sync::Arc;

/// One customer configuration file as found under the policy root.
///
/// Key names match in any letter case (`CustomerId`, `customerId`), and
/// `null` values read as empty, the way the management side marshals them.
#[derive(Debug, Clone, Default)]
pub struct PolicyDocument {
    pub version: i64,
    pub customer_id: String,
    pub policies: Vec<PolicyRule>,
}

#[derive(Default, Deserialize)]
#[serde(default)]
struct DocumentFields {
    #[serde(deserialize_with = "nullable")]
    version: i64,
    #[serde(deserialize_with = "nullable")]
    customerid: String,
    #[serde(deserialize_with = "nullable")]
    policies: Vec<PolicyRule>,
}

impl<'de> Deserialize<'de> for PolicyDocument {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let fields: DocumentFields = decode_folded(deserializer)?;
        Ok(PolicyDocument {
            version: fields.version,
            customer_id: fields.customerid,
            policies: fields.policies,
        })
    }
}

/// A rule shared by every address listed in `ipv4_addrs` and `ipv6_addrs`.
#[derive(Debug, Clone, Default)]
pub struct PolicyRule {
    pub ipv4_addrs: Vec<String>,
    pub ipv6_addrs: Vec<String>,
    pub block_categories: Vec<i32>,
    pub block_reputation: i32,
    pub redirect_ip: String,
}

#[derive(Default, Deserialize)]
#[serde(default)]
struct RuleFields {
    #[serde(deserialize_with = "nullable")]
    ipv4addrs: Vec<String>,
    #[serde(deserialize_with = "nullable")]
    ipv6addrs: Vec<String>,
    #[serde(deserialize_with = "nullable")]
    blockcategories: Vec<i32>,
    #[serde(deserialize_with = "nullable")]
    blockreputation: i32,
    #[serde(deserialize_with = "nullable")]
    redirectip: String,
}

impl<'de> Deserialize<'de> for PolicyRule {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let fields: RuleFields = decode_folded(deserializer)?;
        Ok(PolicyRule {
            ipv4_addrs: fields.ipv4addrs,
            ipv6_addrs: fields.ipv6addrs,
            block_categories: fields.blockcategories,
            block_reputation: fields.blockreputation,
            redirect_ip: fields.redirectip,
        })
    }
}

impl PolicyRule {
    /// Flattens the rule into one `Policy` per listed address.
    ///
    /// Empty address entries are dropped; the rest are kept verbatim. Fails when `redirect_ip` is not an
    /// IP literal, since such a policy could never produce an answer.
    pub fn expand(
        &self,
        customer_id: &Arc<str>,
        source: &Arc<str>,
        last_updated: DateTime<Utc>,
    ) -> Result<Vec<Policy>, DomainError> {
        let block_address: IpAddr = self
            .redirect_ip
            .trim()
            .parse()
            .map_err(|_| DomainError::InvalidIpAddress(self.redirect_ip.clone()))?;

        let blocked: Arc<FxHashSet<i32>> = Arc::new(self.block_categories.iter().copied().collect());

        let policies = self
            .ipv4_addrs
            .iter()
            .chain(self.ipv6_addrs.iter())
            .filter(|addr| !addr.is_empty())
            .map(|addr| Policy {
                network_address: Arc::from(addr.as_str()),
                customer_id: Arc::clone(customer_id),
                minimum_reputation: self.block_reputation,
                blocked_category_ids: Arc::clone(&blocked),
                block_address,
                last_updated,
                source: Arc::clone(source),
            })
            .collect();

        Ok(policies)
    }
}

/// Blocking rules for one client address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Policy {
    pub network_address: Arc<str>,
    pub customer_id: Arc<str>,
    pub minimum_reputation: i32,
    pub blocked_category_ids: Arc<FxHashSet<i32>>,
    pub block_address: IpAddr,
    pub last_updated: DateTime<Utc>,
    /// Path of the file the policy was loaded from.
    pub source: Arc<str>,
}

impl Policy {
    pub fn new(
        network_address: &str,
        minimum_reputation: i32,
        blocked_category_ids: &[i32],
        block_address: IpAddr,
    ) -> Self {
        Self {
            network_address: Arc::from(network_address),
            customer_id: Arc::from(""),
            minimum_reputation,
            blocked_category_ids: Arc::new(blocked_category_ids.iter().copied().collect()),
            block_address,
            last_updated: Utc::now(),
            source: Arc::from(""),
        }
    }

    #[inline]
    pub fn reputation_breached(&self, verdict: &Verdict) -> bool {
        verdict.reputation < self.minimum_reputation
    }

    /// Counts verdict categories that appear in the blocked set.
    ///
    /// Repeated category ids in the verdict are each counted.
    pub fn category_hits(&self, verdict: &Verdict) -> usize {
        verdict
            .categories
            .iter()
            .filter(|cat| self.blocked_category_ids.contains(&cat.category_id))
            .count()
    }
}

/// Immutable index of policies keyed by exact client address string.
#[derive(Debug, Clone)]
pub struct PolicySnapshot {
    policies: FxHashMap<Arc<str>, Arc<Policy>>,
    built_at: DateTime<Utc>,
}

impl PolicySnapshot {
    pub fn empty() -> Self {
        Self {
            policies: FxHashMap::default(),
            built_at: Utc::now(),
        }
    }

    /// Builds a snapshot where later policies replace earlier ones with the
    /// same network address.
    pub fn from_policies<I>(policies: I) -> Self
    where
        I: IntoIterator<Item = Policy>,
    {
        let mut snapshot = Self::empty();
        for policy in policies {
            snapshot.insert(policy);
        }
        snapshot
    }

    /// Returns the policy that was replaced, if any.
    pub fn insert(&mut self, policy: Policy) -> Option<Arc<Policy>> {
        let key = Arc::clone(&policy.network_address);
        self.policies.insert(key, Arc::new(policy))
    }

    #[inline]
    pub fn lookup(&self, client_address: &str) -> Option<&Arc<Policy>> {
        self.policies.get(client_address)
    }

    pub fn len(&self) -> usize {
        self.policies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.policies.is_empty()
    }

    pub fn built_at(&self) -> DateTime<Utc> {
        self.built_at
    }
}

impl Default for PolicySnapshot {
    fn default() -> Self {
        Self::empty()
    }
}
