use assertables::*;

use super::*;

#[rstest]
fn test_constraint_ids_unique() {
    assert_eq!(CONSTRAINTS.len(), ALL_CONSTRAINTS.len());
}

#[rstest]
fn test_explain() {
    let text = CONSTRAINTS.explain("spec.container.disk_size.required").unwrap();
    assert_starts_with!(text, "spec.container.disk_size.required (RedisKubernetes)\n");
    assert_contains!(text, "When persistence is enabled");
}

#[rstest]
fn test_explain_unknown() {
    let err = CONSTRAINTS.explain("spec.nope").unwrap_err();
    assert_eq!(err.to_string(), "constraint not found: spec.nope");
}

#[rstest]
fn test_render_list_sorted() {
    let list = CONSTRAINTS.render(&PrintFormat::List).unwrap();
    let ids: Vec<_> = list.lines().map(|l| l.split(' ').next().unwrap()).collect();
    let mut sorted = ids.clone();
    sorted.sort();
    assert_eq!(ids, sorted);
    assert_len_eq_x!(ids, ALL_CONSTRAINTS.len());
}

#[rstest]
fn test_render_table() {
    let table = CONSTRAINTS.render(&PrintFormat::Table).unwrap();
    assert_starts_with!(table, "| id | kind | description |\n|---|---|---|\n");
    assert_contains!(table, "| metadata.name.required | * | Every resource needs a name. |");
}

#[rstest]
fn test_render_json() {
    let json = CONSTRAINTS.render(&PrintFormat::Json).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["constraints"]["spec.kafka_topics.name"]["kind"], "KafkaKubernetes");
    assert!(!value["constraints"]["spec.kafka_topics.name"]["help"].as_str().unwrap().contains('\n'));
}
