use dnsguard_application::ports::PolicyStorePort;
use dnsguard_application::use_cases::FilterQueryUseCase;
use dnsguard_domain::{
    FilterOutcome, FilterRequest, Policy, PolicySnapshot, QueryClass, RecordType, Verdict,
};
use std::net::IpAddr;
use std::sync::Arc;

mod helpers;
use helpers::{reference_policy, MockClassifier, MockPolicyStore};

fn ip(s: &str) -> IpAddr {
    s.parse().unwrap()
}

fn use_case(classifier: Arc<MockClassifier>, store: Arc<MockPolicyStore>) -> FilterQueryUseCase {
    FilterQueryUseCase::new(classifier, store)
        .with_fallback_addresses(ip("0.1.2.3"), ip("1:2:3:4::1234"))
}

#[tokio::test]
async fn test_blocked_a_query_answers_block_address() {
    let classifier =
        Arc::new(MockClassifier::new().with_verdict("bad.test.", Verdict::new("bad.test", 10)));
    let store = Arc::new(MockPolicyStore::new(vec![reference_policy()]));

    let outcome = use_case(classifier, store)
        .execute(&FilterRequest::new("bad.test.", "10.0.0.5", RecordType::A))
        .await;

    assert_eq!(outcome, FilterOutcome::Answer(ip("104.20.3.248")));
    assert!(outcome.is_blocked());
}

#[tokio::test]
async fn test_allowed_query_passes_through() {
    let classifier = Arc::new(
        MockClassifier::new().with_verdict("ok.test.", Verdict::new("ok.test", 90).with_categories(&[99])),
    );
    let store = Arc::new(MockPolicyStore::new(vec![reference_policy()]));

    let outcome = use_case(classifier, store)
        .execute(&FilterRequest::new("ok.test.", "10.0.0.5", RecordType::A))
        .await;

    assert_eq!(outcome, FilterOutcome::PassThrough);
}

#[tokio::test]
async fn test_daemon_unavailable_passes_through() {
    let classifier = Arc::new(MockClassifier::new());
    let store = Arc::new(MockPolicyStore::new(vec![reference_policy()]));

    let outcome = use_case(classifier.clone(), store)
        .execute(&FilterRequest::new("unknown.test.", "10.0.0.5", RecordType::A))
        .await;

    assert_eq!(outcome, FilterOutcome::PassThrough);
    assert_eq!(classifier.calls(), 1);
}

#[tokio::test]
async fn test_non_address_queries_skip_classification() {
    let classifier =
        Arc::new(MockClassifier::new().with_verdict("bad.test.", Verdict::new("bad.test", 0)));
    let store = Arc::new(MockPolicyStore::new(vec![reference_policy()]));
    let uc = use_case(classifier.clone(), store);

    let mx = FilterRequest::new("bad.test.", "10.0.0.5", RecordType::Other(15));
    let chaos = FilterRequest::new("bad.test.", "10.0.0.5", RecordType::A).with_class(QueryClass::Other(3));

    assert_eq!(uc.execute(&mx).await, FilterOutcome::PassThrough);
    assert_eq!(uc.execute(&chaos).await, FilterOutcome::PassThrough);
    assert_eq!(classifier.calls(), 0);
}

#[tokio::test]
async fn test_aaaa_query_with_ipv4_block_address_uses_ipv6_fallback() {
    let classifier =
        Arc::new(MockClassifier::new().with_verdict("bad.test.", Verdict::new("bad.test", 0)));
    let store = Arc::new(MockPolicyStore::new(vec![reference_policy()]));

    let outcome = use_case(classifier, store)
        .execute(&FilterRequest::new("bad.test.", "10.0.0.5", RecordType::AAAA))
        .await;

    assert_eq!(outcome, FilterOutcome::Answer(ip("1:2:3:4::1234")));
}

#[tokio::test]
async fn test_a_query_with_ipv6_block_address_uses_ipv4_fallback() {
    let classifier =
        Arc::new(MockClassifier::new().with_verdict("bad.test.", Verdict::new("bad.test", 0)));
    let store = Arc::new(MockPolicyStore::new(vec![Policy::new(
        "fd00::5",
        20,
        &[],
        ip("fd00::dead"),
    )]));
    let uc = use_case(classifier, store);

    let a = uc
        .execute(&FilterRequest::new("bad.test.", "fd00::5", RecordType::A))
        .await;
    let aaaa = uc
        .execute(&FilterRequest::new("bad.test.", "fd00::5", RecordType::AAAA))
        .await;

    assert_eq!(a, FilterOutcome::Answer(ip("0.1.2.3")));
    assert_eq!(aaaa, FilterOutcome::Answer(ip("fd00::dead")));
}

#[tokio::test]
async fn test_unknown_client_passes_through() {
    let classifier =
        Arc::new(MockClassifier::new().with_verdict("bad.test.", Verdict::new("bad.test", 0)));
    let store = Arc::new(MockPolicyStore::new(vec![reference_policy()]));

    let outcome = use_case(classifier, store)
        .execute(&FilterRequest::new("bad.test.", "10.0.0.9", RecordType::A))
        .await;

    assert_eq!(outcome, FilterOutcome::PassThrough);
}

#[tokio::test]
async fn test_decision_follows_reloaded_snapshot() {
    let classifier =
        Arc::new(MockClassifier::new().with_verdict("bad.test.", Verdict::new("bad.test", 0)));
    let store = Arc::new(MockPolicyStore::empty());
    let uc = use_case(classifier, store.clone());
    let request = FilterRequest::new("bad.test.", "10.0.0.5", RecordType::A);

    assert_eq!(uc.execute(&request).await, FilterOutcome::PassThrough);

    store.set_next_reload(Ok(PolicySnapshot::from_policies(vec![reference_policy()])));
    store.reload().await.unwrap();

    assert_eq!(
        uc.execute(&request).await,
        FilterOutcome::Answer(ip("104.20.3.248"))
    );
}
