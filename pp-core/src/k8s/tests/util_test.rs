use assertables::*;

use super::*;

#[rstest]
fn test_to_dynamic_object_namespace() {
    let ns = build_namespace("the-namespace", &BTreeMap::from([("foo".into(), "bar".into())]));
    let obj = to_dynamic_object(&ns).unwrap();

    assert_eq!(GVK::from_dynamic_obj(&obj).unwrap(), GVK::new("", "v1", NAMESPACE_KIND));
    assert_none!(obj.metadata.namespace);
    assert_eq!(obj.metadata.labels, klabel!("foo" => "bar"));
    assert_eq!(obj.namespaced_name(), "the-namespace");
}

#[rstest]
fn test_to_dynamic_object_secret() {
    let secret = build_opaque_secret(
        "the-namespace",
        "the-secret",
        &BTreeMap::new(),
        BTreeMap::from([("password".into(), "hunter2".into())]),
    );
    let obj = to_dynamic_object(&secret).unwrap();

    assert_eq!(obj.namespaced_name(), "the-namespace/the-secret");
    assert_eq!(obj.data["stringData"]["password"], "hunter2");
    assert_eq!(obj.data["type"], "Opaque");
}

#[rstest]
fn test_to_dynamic_object_untyped() {
    let res = to_dynamic_object(&serde_json::json!({"metadata": {"name": "foo"}}));
    assert_err!(res);
}

#[rstest]
#[case::namespaced("ns/name", ("ns", "name"))]
#[case::global("name", ("", "name"))]
fn test_split_namespaced_name(#[case] input: &str, #[case] expected: (&str, &str)) {
    let (ns, name) = split_namespaced_name(input);
    assert_eq!((ns.as_str(), name.as_str()), expected);
}
