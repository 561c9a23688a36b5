use serde_json::{json, Value};
use topic_catalog::catalog::{Catalog, SeedFailure};
use topic_catalog::validation::{ValidationConfig, ValidationErrorKind};

fn seed() -> Vec<(&'static str, Value)> {
    vec![
        ("binary-search", json!({ "title": "Binary Search", "description": "Divide and conquer" })),
        ("load-balancer", json!({ "title": "Load Balancer", "description": "Spread requests" })),
        ("consistent-hashing", json!({ "title": "Consistent Hashing", "description": "Ring of nodes" })),
    ]
}

#[test]
fn invariant_seed_loads_in_order() {
    let catalog = Catalog::from_seed(ValidationConfig::v0(), seed()).unwrap();

    assert_eq!(catalog.count(), 3);
    let ids: Vec<String> = catalog.ids().into_iter().map(|id| id.to_string()).collect();
    assert_eq!(ids, vec!["binary-search", "load-balancer", "consistent-hashing"]);
}

#[test]
fn invariant_bad_seed_reports_every_failure() {
    let mut entries = seed();
    entries.push(("empty-title", json!({ "title": "", "description": "x" })));
    entries.push(("bad-url", json!({ "title": "T", "description": "x", "videoUrl": "nope" })));

    let err = Catalog::from_seed(ValidationConfig::v0(), entries).unwrap_err();

    assert_eq!(err.failures.len(), 2);
    match &err.failures[0] {
        SeedFailure::Invalid { id, errors } => {
            assert_eq!(id, "empty-title");
            assert_eq!(errors[0].kind, ValidationErrorKind::EmptyField);
        }
        other => panic!("unexpected failure {other:?}"),
    }
    match &err.failures[1] {
        SeedFailure::Invalid { id, errors } => {
            assert_eq!(id, "bad-url");
            assert_eq!(errors[0].kind, ValidationErrorKind::InvalidUrl);
        }
        other => panic!("unexpected failure {other:?}"),
    }
    assert!(err.to_string().contains("2 failure(s)"));
}

#[test]
fn invariant_duplicate_seed_id_is_fatal() {
    let mut entries = seed();
    entries.push((" binary-search ", json!({ "title": "Again", "description": "dup" })));

    let err = Catalog::from_seed(ValidationConfig::v0(), entries).unwrap_err();

    assert_eq!(err.failures.len(), 1);
    match &err.failures[0] {
        SeedFailure::DuplicateId(id) => assert_eq!(id.as_str(), "binary-search"),
        other => panic!("unexpected failure {other:?}"),
    }
}

#[test]
fn invariant_invalid_first_occurrence_still_claims_the_id() {
    let mut entries = seed();
    entries.push(("lru-cache", json!({ "title": "LRU Cache" })));
    entries.push(("lru-cache", json!({ "title": "LRU Cache", "description": "Evict the oldest" })));

    let err = Catalog::from_seed(ValidationConfig::v0(), entries).unwrap_err();

    assert_eq!(err.failures.len(), 2);
    match &err.failures[0] {
        SeedFailure::Invalid { id, errors } => {
            assert_eq!(id, "lru-cache");
            assert_eq!(errors[0].kind, ValidationErrorKind::MissingField);
            assert_eq!(errors[0].path, "description");
        }
        other => panic!("unexpected failure {other:?}"),
    }
    match &err.failures[1] {
        SeedFailure::DuplicateId(id) => assert_eq!(id.as_str(), "lru-cache"),
        other => panic!("unexpected failure {other:?}"),
    }
}

#[test]
fn invariant_seed_uses_given_config() {
    let entries = vec![("trie", json!({ "title": "Trie", "description": "Prefix tree", "draft": true }))];

    assert!(Catalog::from_seed(ValidationConfig::v0(), entries.clone()).is_ok());
    assert!(Catalog::from_seed(ValidationConfig::strict(), entries).is_err());
}
