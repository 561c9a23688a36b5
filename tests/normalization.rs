use serde_json::{json, Value};
use topic_catalog::topic::TopicDocument;
use topic_catalog::validation::validate;

const DIAGRAM: &str = "  <svg viewBox=\"0 0 10 10\">\n  <circle r=\"4\"/>\n</svg>\n";

fn full_candidate() -> Value {
    json!({
        "title": "  Binary Search  ",
        "description": "Halve the search space each step.\n",
        "complexity": { "time": " O(log n) ", "space": "O(1)" },
        "example": " [1, 3, 5, 7], target 5 ",
        "diagram": DIAGRAM,
        "concepts": [{ "name": " Invariant ", "details": " lo <= target <= hi " }],
        "approaches": [
            { "title": "Iterative", "content": "while lo <= hi", "complexity": { "time": "O(log n)", "space": "O(1)" } },
            { "title": "Recursive", "content": "recurse on half" }
        ],
        "tutorialSteps": [{ "title": "Pick mid", "content": " mid = lo + (hi - lo) / 2 " }],
        "keyPoints": [{ "title": "Sorted input", "description": "Required" }],
        "comparisonTable": {
            "headers": [" Variant ", "Time"],
            "rows": [["Iterative", " O(log n) "], ["Linear scan", ""]]
        },
        "pitfalls": [" Overflow in (lo + hi) / 2 ", "Off-by-one on hi"],
        "videoUrl": " https://example.com/binary-search "
    })
}

fn normalized(id: &str, candidate: &Value) -> TopicDocument {
    validate(id, candidate).expect("candidate should be accepted")
}

#[test]
fn invariant_minimal_topic_is_accepted() {
    let doc = normalized("t1", &json!({ "title": "Foo", "description": "Bar" }));

    assert_eq!(doc.id.as_str(), "t1");
    assert_eq!(doc.title, "Foo");
    assert_eq!(doc.description, "Bar");
    assert!(doc.complexity.is_none());
    assert!(doc.comparison_table.is_none());
    assert!(!doc.has_pitfalls());
}

#[test]
fn invariant_strings_are_trimmed() {
    let doc = normalized("binary-search", &full_candidate());

    assert_eq!(doc.title, "Binary Search");
    assert_eq!(doc.description, "Halve the search space each step.");
    assert_eq!(doc.complexity.as_ref().unwrap().time, "O(log n)");
    assert_eq!(doc.example.as_deref(), Some("[1, 3, 5, 7], target 5"));

    let concepts = doc.concepts.as_ref().unwrap();
    assert_eq!(concepts[0].name, "Invariant");
    assert_eq!(concepts[0].details, "lo <= target <= hi");

    let table = doc.comparison_table.as_ref().unwrap();
    assert_eq!(table.headers, vec!["Variant", "Time"]);
    assert_eq!(table.rows[0], vec!["Iterative", "O(log n)"]);
    assert_eq!(table.rows[1], vec!["Linear scan", ""]);
    assert_eq!(table.width(), 2);

    assert_eq!(
        doc.pitfalls.as_deref(),
        Some(&["Overflow in (lo + hi) / 2".to_string(), "Off-by-one on hi".to_string()][..])
    );
    assert_eq!(doc.video_url.as_deref(), Some("https://example.com/binary-search"));
}

#[test]
fn invariant_diagram_passes_through_verbatim() {
    let doc = normalized("binary-search", &full_candidate());
    assert_eq!(doc.diagram.as_ref().map(|d| d.as_str()), Some(DIAGRAM));
}

#[test]
fn invariant_sequence_order_is_preserved() {
    let doc = normalized("binary-search", &full_candidate());

    let approaches = doc.approaches.as_ref().unwrap();
    assert_eq!(approaches.len(), 2);
    assert_eq!(approaches[0].title, "Iterative");
    assert!(approaches[0].complexity.is_some());
    assert_eq!(approaches[1].title, "Recursive");
    assert!(approaches[1].complexity.is_none());
}

#[test]
fn invariant_null_and_empty_sections_become_absent() {
    let doc = normalized(
        "stack",
        &json!({
            "title": "Stack",
            "description": "LIFO",
            "example": null,
            "concepts": [],
            "pitfalls": [],
            "keyPoints": null,
            "comparisonTable": null
        }),
    );

    assert!(doc.example.is_none());
    assert!(doc.concepts.is_none());
    assert!(doc.pitfalls.is_none());
    assert!(doc.key_points.is_none());
    assert!(doc.comparison_table.is_none());

    let json = serde_json::to_value(&doc).unwrap();
    assert_eq!(json, json!({ "title": "Stack", "description": "LIFO" }));
}

#[test]
fn invariant_headers_only_table_is_kept() {
    let doc = normalized(
        "queue",
        &json!({
            "title": "Queue",
            "description": "FIFO",
            "comparisonTable": { "headers": ["Op", "Cost"], "rows": [] }
        }),
    );

    let table = doc.comparison_table.unwrap();
    assert_eq!(table.headers.len(), 2);
    assert!(table.rows.is_empty());
}

#[test]
fn invariant_revalidation_is_a_fixed_point() {
    let first = normalized("binary-search", &full_candidate());

    let serialized = serde_json::to_value(&first).unwrap();
    let second = normalized("binary-search", &serialized);

    assert_eq!(first, second);
    assert_eq!(first.version(), second.version());
}

#[test]
fn golden_serialized_field_names_are_camel_case() {
    let doc = normalized("binary-search", &full_candidate());
    let json = serde_json::to_value(&doc).unwrap();

    let keys: Vec<&str> = json.as_object().unwrap().keys().map(String::as_str).collect();
    for key in [
        "title",
        "description",
        "complexity",
        "example",
        "diagram",
        "concepts",
        "approaches",
        "tutorialSteps",
        "keyPoints",
        "comparisonTable",
        "pitfalls",
        "videoUrl",
    ] {
        assert!(keys.contains(&key), "missing key {key}");
    }
    assert!(!keys.contains(&"id"));
    assert!(json["approaches"][1].get("complexity").is_none());
}

#[test]
fn invariant_version_depends_on_content_only() {
    let a = normalized("a", &json!({ "title": "Trie", "description": "Prefix tree" }));
    let b = normalized("b", &json!({ "title": " Trie ", "description": "Prefix tree" }));
    let c = normalized("a", &json!({ "title": "Trie", "description": "Prefix tree!" }));

    assert_eq!(a.version(), b.version());
    assert_ne!(a.version(), c.version());
}
