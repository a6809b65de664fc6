use std::collections::BTreeMap;

use anyhow::Context;
use assertables::*;
use mockall::predicate;

use super::*;
use crate::k8s::{
    GVK,
    build_namespace,
    build_opaque_secret,
    to_dynamic_object,
};
use crate::prelude::*;
use crate::providers::{
    MockKubeProvider,
    Providers,
};

fn namespace() -> corev1::Namespace {
    build_namespace("the-namespace", &BTreeMap::new())
}

fn secret(name: &str) -> corev1::Secret {
    build_opaque_secret("the-namespace", name, &BTreeMap::new(), BTreeMap::new())
}

#[rstest]
#[tokio::test]
async fn test_register_in_order() {
    let mut ctx = StackContext::dry_run("test");
    let ns = ctx.kubernetes(&namespace(), ResourceOptions::default()).await.unwrap();
    let s1 = ctx.kubernetes(&secret("s1"), ResourceOptions::parent(&ns)).await.unwrap();
    ctx.kubernetes(&secret("s2"), ResourceOptions::parent(&ns).depends_on(&s1))
        .await
        .unwrap();

    let planned: Vec<_> = ctx.planned().iter().map(|r| r.urn.as_str()).collect();
    assert_eq!(
        planned,
        vec![
            "kubernetes:v1.Namespace::the-namespace",
            "kubernetes:v1.Secret::the-namespace/s1",
            "kubernetes:v1.Secret::the-namespace/s2",
        ]
    );
    assert_eq!(ctx.planned()[2].parent.as_deref(), Some(ns.urn()));
    assert_eq!(ctx.planned()[2].depends_on, vec![s1.urn().to_string()]);
}

#[rstest]
#[tokio::test]
async fn test_register_foreign_handle() {
    let mut other = StackContext::dry_run("other");
    let foreign = other.kubernetes(&namespace(), ResourceOptions::default()).await.unwrap();

    let mut ctx = StackContext::dry_run("test");
    let err = ctx.kubernetes(&secret("s1"), ResourceOptions::parent(&foreign)).await.unwrap_err();
    assert!(matches!(err.downcast_ref::<StackError>(), Some(StackError::UnregisteredDependency(_))));
    assert_is_empty!(ctx.planned());
}

#[rstest]
#[tokio::test]
async fn test_register_duplicate() {
    let mut ctx = StackContext::dry_run("test");
    ctx.kubernetes(&namespace(), ResourceOptions::default()).await.unwrap();
    let err = ctx.kubernetes(&namespace(), ResourceOptions::default()).await.unwrap_err();
    assert!(matches!(err.downcast_ref::<StackError>(), Some(StackError::DuplicateResource(_))));
    assert_len_eq_x!(ctx.planned(), 1);
}

#[rstest]
#[tokio::test]
async fn test_register_provider_not_configured() {
    let mut ctx = StackContext::new("test", Providers::default());
    let err = ctx.kubernetes(&namespace(), ResourceOptions::default()).await.unwrap_err();
    assert_eq!(format!("{err}"), "no kubernetes provider is configured");
}

#[rstest]
#[tokio::test]
async fn test_register_missing_name() {
    let mut ctx = StackContext::dry_run("test");
    let err = ctx.kubernetes(&corev1::Namespace::default(), ResourceOptions::default()).await.unwrap_err();
    assert!(matches!(err.downcast_ref::<StackError>(), Some(StackError::MissingObjectName(_))));
}

#[rstest]
#[tokio::test]
async fn test_register_failure_aborts() {
    let mut kube = MockKubeProvider::new();
    kube.expect_apply()
        .with(predicate::function(|obj: &kube::api::DynamicObject| obj.metadata.name.as_deref() == Some("the-namespace")))
        .returning(|_| Ok(()))
        .once();
    kube.expect_apply().returning(|_| Err(anyhow!("connection refused"))).once();

    let mut ctx = StackContext::new("test", Providers::default().with_kubernetes(kube));
    let ns = ctx.kubernetes(&namespace(), ResourceOptions::default()).await.unwrap();
    let err = ctx
        .kubernetes(&secret("s1"), ResourceOptions::parent(&ns))
        .await
        .context("failed to create secret")
        .unwrap_err();

    assert_eq!(format!("{err:#}"), "failed to create secret: connection refused");
    assert_len_eq_x!(ctx.planned(), 1);
}

#[rstest]
#[tokio::test]
async fn test_read_kubernetes() {
    let mut kube = MockKubeProvider::new();
    kube.expect_get()
        .withf(|gvk, ns, name| *gvk == GVK::new("", "v1", "Secret") && ns == "the-namespace" && name == "s1")
        .returning(|_, _, _| Ok(Some(to_dynamic_object(&secret("s1")).unwrap())))
        .once();
    kube.expect_get().returning(|_, _, _| Ok(None));

    let ctx = StackContext::new("test", Providers::default().with_kubernetes(kube));
    let found = ctx.read_kubernetes::<corev1::Secret>("the-namespace", "s1").await.unwrap();
    assert_eq!(found.unwrap().type_.as_deref(), Some("Opaque"));
    assert_none!(ctx.read_kubernetes::<corev1::Secret>("the-namespace", "s2").await.unwrap());

    // reads don't show up in the plan
    assert_is_empty!(ctx.planned());
}

#[rstest]
#[tokio::test]
async fn test_read_kubernetes_dry_run() {
    let ctx = StackContext::dry_run("test");
    assert_none!(ctx.read_kubernetes::<corev1::Secret>("the-namespace", "s1").await.unwrap());
}

#[rstest]
#[tokio::test]
async fn test_export_outputs() {
    let mut ctx = StackContext::dry_run("test");
    ctx.export("namespace", "the-namespace");
    ctx.export("service", "the-service");
    ctx.export("namespace", "other-namespace");

    let outputs = ctx.into_outputs();
    assert_eq!(outputs.len(), 2);
    assert_eq!(outputs.get("namespace"), Some("other-namespace"));
}
