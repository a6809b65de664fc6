use assertables::*;
use pp_api::v1::RedisKubernetesStackOutputs;

use super::*;

#[rstest]
fn test_to_typed() {
    let mut outputs = StackOutputs::default();
    for (k, v) in [
        ("namespace", "the-redis"),
        ("service", "the-redis-master"),
        ("kube-endpoint", "the-redis-master.the-redis.svc.cluster.local"),
        ("port-forward-command", "kubectl port-forward -n the-redis service/the-redis-master 6379:6379"),
        ("username", "default"),
        ("password-secret-name", "the-redis"),
        ("password-secret-key", "password"),
    ] {
        outputs.export(k, v);
    }

    let typed: RedisKubernetesStackOutputs = outputs.to_typed().unwrap();
    assert_eq!(typed.service, "the-redis-master");
    assert_none!(typed.ingress_external_hostname);
}

#[rstest]
fn test_to_typed_missing_key() {
    let mut outputs = StackOutputs::default();
    outputs.export("namespace", "the-redis");
    assert_err!(outputs.to_typed::<RedisKubernetesStackOutputs>());
}

#[rstest]
fn test_serialize_sorted() {
    let mut outputs = StackOutputs::default();
    outputs.export("service", "b");
    outputs.export("namespace", "a");
    assert_eq!(serde_yaml::to_string(&outputs).unwrap(), "namespace: a\nservice: b\n");
}
