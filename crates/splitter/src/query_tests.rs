use super::*;
use cm_adapters::FakeButler;
use serde_json::json;

fn seeded(ids: impl IntoIterator<Item = i64>) -> QuerySplitter {
    let butler = FakeButler::new();
    butler.seed("raw", "coll-a", ids);
    QuerySplitter::new(Arc::new(butler), "repo")
}

#[tokio::test]
async fn single_group_is_one_open_ended_predicate() {
    let splitter = seeded([1, 2, 3]);
    let cfg = json!({"dataset": "raw", "field": "tract", "min_groups": 1, "max_size": 10, "collections": ["coll-a"]});
    let predicates = splitter.split(&cfg).await.unwrap();
    assert_eq!(predicates, vec!["tract >= 1"]);
}

#[tokio::test]
async fn max_size_forces_multiple_groups() {
    let splitter = seeded(1..=10); // 10 distinct ids
    let cfg = json!({"dataset": "raw", "field": "tract", "min_groups": 1, "max_size": 4, "collections": ["coll-a"]});
    let predicates = splitter.split(&cfg).await.unwrap();
    // ceil(10/4) = 3 groups => 2 half-open ranges + 1 open-ended tail
    assert_eq!(predicates.len(), 3);
    assert!(predicates[0].starts_with("tract >= 1 AND tract <"));
    assert!(predicates.last().unwrap().starts_with("tract >="));
    assert!(!predicates.last().unwrap().contains("AND"));
}

#[tokio::test]
async fn min_groups_forces_more_groups_than_size_alone_would() {
    let splitter = seeded(1..=8);
    let cfg = json!({"dataset": "raw", "field": "tract", "min_groups": 4, "max_size": 100, "collections": ["coll-a"]});
    let predicates = splitter.split(&cfg).await.unwrap();
    assert_eq!(predicates.len(), 4);
}

#[tokio::test]
async fn fewer_values_than_min_groups_is_invalid_grouping() {
    let splitter = seeded([1, 2]);
    let cfg = json!({"dataset": "raw", "field": "tract", "min_groups": 5, "max_size": 100, "collections": ["coll-a"]});
    let err = splitter.split(&cfg).await.unwrap_err();
    assert_eq!(err.kind(), "InvalidGrouping");
}

#[tokio::test]
async fn predicates_combine_with_existing_filter_predicates() {
    let butler = FakeButler::new();
    butler.seed("raw", "coll-a", [1, 2]);
    let splitter = QuerySplitter::new(Arc::new(butler), "repo");
    let cfg = json!({
        "dataset": "raw",
        "field": "tract",
        "min_groups": 1,
        "max_size": 100,
        "collections": ["coll-a"],
        "predicates": ["visit = 1", "band = 'g'"],
    });
    // the combined where-clause is opaque to the result here (FakeButler ignores it),
    // but the call must not error out on a well-formed predicates list.
    assert!(splitter.split(&cfg).await.is_ok());
}
