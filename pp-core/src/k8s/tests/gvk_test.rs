use super::*;

#[rstest]
#[case::core(GVK::new("", "v1", "Namespace"), "v1.Namespace")]
#[case::grouped(GVK::new("gateway.networking.k8s.io", "v1", "HTTPRoute"), "gateway.networking.k8s.io/v1.HTTPRoute")]
fn test_display(#[case] gvk: GVK, #[case] expected: &str) {
    assert_eq!(gvk.to_string(), expected);
}

#[rstest]
#[case::namespace(GVK::new("", "v1", "Namespace"), "namespaces")]
#[case::gateway(GVK::new("gateway.networking.k8s.io", "v1", "Gateway"), "gateways")]
#[case::kafka(GVK::new("kafka.strimzi.io", "v1beta2", "Kafka"), "kafkas")]
#[case::certificate(GVK::new("cert-manager.io", "v1", "Certificate"), "certificates")]
fn test_api_resource_plural(#[case] gvk: GVK, #[case] plural: &str) {
    let ar = gvk.api_resource();
    assert_eq!(ar.plural, plural);
    assert_eq!(ar.kind, gvk.kind);
}

#[rstest]
fn test_type_meta_roundtrip() {
    let gvk = GVK::new("acid.zalan.do", "v1", "postgresql");
    let tm = gvk.into_type_meta();
    assert_eq!(tm.api_version, "acid.zalan.do/v1");
    assert_eq!(GVK::from_type_meta(&tm).unwrap(), gvk);
}
