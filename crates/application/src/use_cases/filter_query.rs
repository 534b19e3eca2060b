use crate::ports::{ClassificationPort, PolicyStorePort};
use crate::services::{decide, Decision};
use dnsguard_domain::{FilterOutcome, FilterRequest, RecordType};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::sync::Arc;
use tracing::{debug, warn};

const DEFAULT_BLOCK_IPV4: IpAddr = IpAddr::V4(Ipv4Addr::new(0, 1, 2, 3));
const DEFAULT_BLOCK_IPV6: IpAddr = IpAddr::V6(Ipv6Addr::new(1, 2, 3, 4, 0, 0, 0, 0x1234));

/// Classifies a query, applies the client's policy and turns the result into
/// an answer for the dispatcher.
pub struct FilterQueryUseCase {
    classifier: Arc<dyn ClassificationPort>,
    policies: Arc<dyn PolicyStorePort>,
    fallback_ipv4: IpAddr,
    fallback_ipv6: IpAddr,
}

impl FilterQueryUseCase {
    pub fn new(classifier: Arc<dyn ClassificationPort>, policies: Arc<dyn PolicyStorePort>) -> Self {
        Self {
            classifier,
            policies,
            fallback_ipv4: DEFAULT_BLOCK_IPV4,
            fallback_ipv6: DEFAULT_BLOCK_IPV6,
        }
    }

    /// Addresses used when a policy's block address cannot answer the
    /// query's record type. Wrong-family arguments are ignored.
    pub fn with_fallback_addresses(mut self, ipv4: IpAddr, ipv6: IpAddr) -> Self {
        if ipv4.is_ipv4() {
            self.fallback_ipv4 = ipv4;
        }
        if ipv6.is_ipv6() {
            self.fallback_ipv6 = ipv6;
        }
        self
    }

    pub async fn execute(&self, request: &FilterRequest) -> FilterOutcome {
        if !request.is_filterable() {
            return FilterOutcome::PassThrough;
        }

        debug!(
            name = %request.query_name,
            client = %request.client_address,
            qtype = %request.record_type,
            "Filtering query"
        );

        let verdict = self.classifier.lookup(&request.query_name).await;
        let snapshot = self.policies.snapshot();
        let decision = decide(
            &request.query_name,
            &request.client_address,
            verdict.as_ref(),
            &snapshot,
        );

        match decision {
            Decision::Allow => FilterOutcome::PassThrough,
            Decision::Block(address) => {
                let answer = self.answer_for(request.record_type, address);
                debug!(
                    name = %request.query_name,
                    client = %request.client_address,
                    answer = %answer,
                    "Query blocked"
                );
                FilterOutcome::Answer(answer)
            }
        }
    }

    fn answer_for(&self, record_type: RecordType, address: IpAddr) -> IpAddr {
        match (record_type, address) {
            (RecordType::A, IpAddr::V4(_)) | (RecordType::AAAA, IpAddr::V6(_)) => address,
            (RecordType::AAAA, IpAddr::V4(_)) => {
                warn!(block = %address, "IPv4 block address for AAAA query, using fallback");
                self.fallback_ipv6
            }
            _ => {
                warn!(block = %address, "IPv6 block address for A query, using fallback");
                self.fallback_ipv4
            }
        }
    }
}
