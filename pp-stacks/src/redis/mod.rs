mod locals;
pub mod outputs;

use std::collections::BTreeMap;

pub use locals::*;
use pp_core::errors::*;
use pp_core::ingress::{
    LoadBalancerIngressArgs,
    provision_load_balancer_ingress,
};
use pp_core::k8s::{
    build_namespace,
    build_opaque_secret,
    secret_value,
};
use pp_core::prelude::*;
use pp_core::providers::HelmRelease;
use rand::Rng;
use rand::distributions::Alphanumeric;
use serde_json::json;
use tracing::*;

pub const REDIS_CHART: &str = "redis";
pub const REDIS_CHART_REPO: &str = "https://charts.bitnami.com/bitnami";
pub const REDIS_CHART_VERSION: &str = "17.10.1";
pub const REDIS_PORT: i32 = 6379;
pub const REDIS_PORT_NAME: &str = "tcp-redis";
pub const REDIS_USERNAME: &str = "default";
pub const PASSWORD_SECRET_KEY: &str = "password";

const PASSWORD_LENGTH: usize = 12;

pub fn random_password(len: usize) -> String {
    rand::thread_rng().sample_iter(&Alphanumeric).take(len).map(char::from).collect()
}

// The chart only reads the secret at startup, so a password that changed under a running
// server would lock every client out
async fn resolve_password(ctx: &StackContext, locals: &Locals) -> anyhow::Result<String> {
    let existing = ctx
        .read_kubernetes::<corev1::Secret>(&locals.namespace, &locals.password_secret_name)
        .await
        .context("failed to read password secret")?;
    match existing.as_ref().and_then(|secret| secret_value(secret, PASSWORD_SECRET_KEY)) {
        Some(password) => {
            debug!("reusing password from {}/{}", locals.namespace, locals.password_secret_name);
            Ok(password)
        },
        None => Ok(random_password(PASSWORD_LENGTH)),
    }
}

pub fn helm_values(locals: &Locals, container: &RedisKubernetesContainer) -> serde_json::Value {
    let persistence = json!({
        "enabled": container.is_persistence_enabled,
        "size": container.disk_size,
    });
    json!({
        "fullnameOverride": locals.release_name,
        "architecture": if container.replicas > 1 { "replication" } else { "standalone" },
        "auth": {
            "existingSecret": locals.password_secret_name,
            "existingSecretPasswordKey": PASSWORD_SECRET_KEY,
        },
        "commonLabels": locals.labels,
        "master": {
            "resources": container.resources,
            "persistence": persistence,
        },
        "replica": {
            "replicaCount": container.replicas,
            "resources": container.resources,
            "persistence": persistence,
        },
    })
}

fn master_selector(locals: &Locals) -> BTreeMap<String, String> {
    BTreeMap::from([
        (APP_KUBERNETES_IO_NAME_KEY.into(), REDIS_CHART.into()),
        ("app.kubernetes.io/instance".into(), locals.release_name.clone()),
        ("app.kubernetes.io/component".into(), "master".into()),
    ])
}

pub async fn resources(ctx: &mut StackContext, input: &RedisKubernetesStackInput) -> EmptyResult {
    let locals = initialize_locals(ctx, input);
    let container = &input.target.spec.container;

    let ns = ctx
        .kubernetes(&build_namespace(&locals.namespace, &locals.labels), ResourceOptions::default())
        .await
        .context("failed to create namespace")?;

    let password = resolve_password(ctx, &locals).await?;
    let secret = build_opaque_secret(
        &locals.namespace,
        &locals.password_secret_name,
        &locals.labels,
        BTreeMap::from([(PASSWORD_SECRET_KEY.into(), password)]),
    );
    let secret = ctx
        .kubernetes(&secret, ResourceOptions::parent(&ns))
        .await
        .context("failed to create password secret")?;

    let release = HelmRelease {
        name: locals.release_name.clone(),
        namespace: locals.namespace.clone(),
        chart: REDIS_CHART.into(),
        repo: REDIS_CHART_REPO.into(),
        version: REDIS_CHART_VERSION.into(),
        values: helm_values(&locals, container),
    };
    ctx.helm_release(release, ResourceOptions::parent(&ns).depends_on(&secret))
        .await
        .context("failed to create helm release")?;

    let (Some(external_hostname), Some(internal_hostname)) =
        (&locals.ingress_external_hostname, &locals.ingress_internal_hostname)
    else {
        return Ok(());
    };

    let args = LoadBalancerIngressArgs {
        namespace: locals.namespace.clone(),
        labels: locals.labels.clone(),
        selector: master_selector(&locals),
        port_name: REDIS_PORT_NAME.into(),
        port: REDIS_PORT,
        external_hostname: external_hostname.clone(),
        internal_hostname: internal_hostname.clone(),
    };
    provision_load_balancer_ingress(ctx, &args, &ns)
        .await
        .context("failed to create ingress")?;
    Ok(())
}

#[cfg(test)]
mod tests;
