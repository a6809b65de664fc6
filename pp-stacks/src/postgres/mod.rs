mod locals;
pub mod outputs;
mod postgresql;

use std::collections::BTreeMap;

pub use locals::*;
pub use postgresql::*;
use pp_core::errors::*;
use pp_core::ingress::{
    LoadBalancerIngressArgs,
    provision_load_balancer_ingress,
};
use pp_core::k8s::build_namespace;
use pp_core::prelude::*;

pub const TEAM_ID: &str = "db";
pub const POSTGRES_VERSION: &str = "14";
pub const POSTGRES_PORT: i32 = 5432;
pub const POSTGRES_PORT_NAME: &str = "postgres";
pub const POSTGRES_USERNAME: &str = "postgres";
pub const PASSWORD_SECRET_KEY: &str = "password";

// Labels the operator puts on the primary pod
fn primary_selector(locals: &Locals) -> BTreeMap<String, String> {
    BTreeMap::from([
        ("application".into(), "spilo".into()),
        ("cluster-name".into(), locals.cluster_name.clone()),
        ("spilo-role".into(), "master".into()),
    ])
}

pub async fn resources(ctx: &mut StackContext, input: &PostgresKubernetesStackInput) -> EmptyResult {
    let locals = initialize_locals(ctx, input);
    let target = &input.target;

    let ns = ctx
        .kubernetes(&build_namespace(&locals.namespace, &locals.labels), ResourceOptions::default())
        .await
        .context("failed to create namespace")?;

    let postgresql = build_postgresql(
        &locals.namespace,
        &locals.cluster_name,
        &locals.labels,
        &target.metadata.name,
        &target.spec.container,
    );
    let database = ctx
        .kubernetes(&postgresql, ResourceOptions::parent(&ns))
        .await
        .context("failed to create postgresql")?;

    let (Some(external_hostname), Some(internal_hostname)) =
        (&locals.ingress_external_hostname, &locals.ingress_internal_hostname)
    else {
        return Ok(());
    };

    let args = LoadBalancerIngressArgs {
        namespace: locals.namespace.clone(),
        labels: locals.labels.clone(),
        selector: primary_selector(&locals),
        port_name: POSTGRES_PORT_NAME.into(),
        port: POSTGRES_PORT,
        external_hostname: external_hostname.clone(),
        internal_hostname: internal_hostname.clone(),
    };
    provision_load_balancer_ingress(ctx, &args, &database)
        .await
        .context("failed to create ingress")?;
    Ok(())
}

#[cfg(test)]
mod tests;
