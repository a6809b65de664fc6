use httpmock::Method::*;
use pp_testutils::*;
use serde_json::json;

use super::*;
use crate::k8s::{
    GVK,
    build_namespace,
    build_opaque_secret,
    secret_value,
    to_dynamic_object,
};
use crate::prelude::*;
use crate::macros::*;

#[rstest]
#[tokio::test]
async fn test_apply_cluster_scoped() {
    let (mut fake_apiserver, client) = make_fake_apiserver();
    fake_apiserver.handle(|when, then| {
        when.method(PATCH)
            .path("/api/v1/namespaces/the-namespace")
            .query_param("fieldManager", "project-planton")
            .query_param("force", "true");
        then.json_body(json!({
            "apiVersion": "v1",
            "kind": "Namespace",
            "metadata": {"name": "the-namespace", "resourceVersion": "1"},
        }));
    });
    fake_apiserver.build();

    let ns = to_dynamic_object(&build_namespace("the-namespace", &BTreeMap::new())).unwrap();
    KubeApplyProvider::new(client).apply(&ns).await.unwrap();
    fake_apiserver.assert();
}

#[rstest]
#[tokio::test]
async fn test_apply_namespaced() {
    let (mut fake_apiserver, client) = make_fake_apiserver();
    fake_apiserver.handle(|when, then| {
        when.method(PATCH).path("/api/v1/namespaces/the-namespace/secrets/the-secret");
        then.json_body(json!({
            "apiVersion": "v1",
            "kind": "Secret",
            "metadata": {"name": "the-secret", "namespace": "the-namespace"},
        }));
    });
    fake_apiserver.build();

    let secret = build_opaque_secret("the-namespace", "the-secret", &BTreeMap::new(), BTreeMap::new());
    let obj = to_dynamic_object(&secret).unwrap();
    KubeApplyProvider::new(client).apply(&obj).await.unwrap();
    fake_apiserver.assert();
}

#[rstest]
#[tokio::test]
async fn test_apply_custom_resource() {
    let (mut fake_apiserver, client) = make_fake_apiserver();
    fake_apiserver.handle(|when, then| {
        when.method(PATCH)
            .path("/apis/kafka.strimzi.io/v1beta2/namespaces/the-namespace/kafkatopics/orders");
        then.json_body(json!({
            "apiVersion": "kafka.strimzi.io/v1beta2",
            "kind": "KafkaTopic",
            "metadata": {"name": "orders", "namespace": "the-namespace"},
        }));
    });
    fake_apiserver.build();

    let obj = to_dynamic_object(&json!({
        "apiVersion": "kafka.strimzi.io/v1beta2",
        "kind": "KafkaTopic",
        "metadata": {"name": "orders", "namespace": "the-namespace", "labels": {"strimzi.io/cluster": "the-kafka"}},
        "spec": {"partitions": 1, "replicas": 1},
    }))
    .unwrap();
    assert_eq!(obj.metadata.labels, klabel!("strimzi.io/cluster" => "the-kafka"));
    KubeApplyProvider::new(client).apply(&obj).await.unwrap();
    fake_apiserver.assert();
}

#[rstest]
#[tokio::test]
async fn test_apply_error() {
    let (mut fake_apiserver, client) = make_fake_apiserver();
    fake_apiserver.handle(|when, then| {
        when.method(PATCH).path("/api/v1/namespaces/the-namespace");
        then.status(403).json_body(json!({
            "kind": "Status",
            "apiVersion": "v1",
            "metadata": {},
            "status": "Failure",
            "message": "namespaces \"the-namespace\" is forbidden",
            "reason": "Forbidden",
            "code": 403
        }));
    });
    fake_apiserver.build();

    let ns = to_dynamic_object(&build_namespace("the-namespace", &BTreeMap::new())).unwrap();
    let res = KubeApplyProvider::new(client).apply(&ns).await;
    assert!(res.is_err());
    fake_apiserver.assert();
}

#[rstest]
#[tokio::test]
async fn test_get_existing() {
    let (mut fake_apiserver, client) = make_fake_apiserver();
    fake_apiserver.handle(|when, then| {
        when.method(GET).path("/api/v1/namespaces/the-namespace/secrets/the-secret");
        then.json_body(json!({
            "apiVersion": "v1",
            "kind": "Secret",
            "metadata": {"name": "the-secret", "namespace": "the-namespace"},
            "data": {"password": "aHVudGVyMg=="},
        }));
    });
    fake_apiserver.build();

    let gvk = GVK::new("", "v1", "Secret");
    let obj = KubeApplyProvider::new(client)
        .get(&gvk, "the-namespace", "the-secret")
        .await
        .unwrap()
        .unwrap();
    let secret: corev1::Secret = obj.try_parse().unwrap();
    assert_eq!(secret_value(&secret, "password").as_deref(), Some("hunter2"));
    fake_apiserver.assert();
}

#[rstest]
#[tokio::test]
async fn test_get_missing() {
    let (mut fake_apiserver, client) = make_fake_apiserver();
    fake_apiserver.handle_not_found("/api/v1/namespaces/the-namespace/secrets/the-secret".into());
    fake_apiserver.build();

    let gvk = GVK::new("", "v1", "Secret");
    let res = KubeApplyProvider::new(client).get(&gvk, "the-namespace", "the-secret").await.unwrap();
    assert!(res.is_none());
    fake_apiserver.assert();
}
