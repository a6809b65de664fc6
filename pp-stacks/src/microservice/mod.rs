mod deployment;
mod locals;
pub mod outputs;

pub use deployment::*;
pub use locals::*;
use pp_core::errors::*;
use pp_core::ingress::{
    GatewayEndpoint,
    GatewayIngressArgs,
    IngressTls,
    provision_gateway_ingress,
};
use pp_core::k8s::{
    build_namespace,
    build_opaque_secret,
};
use pp_core::prelude::*;

pub const CONTAINER_NAME: &str = "microservice";
pub const IMAGE_PULL_SECRET_NAME: &str = "image-pull-secret";
pub const PORT_FORWARD_PORT: i32 = 8080;
pub const DEFAULT_INGRESS_PORT: i32 = 80;
pub const SHUTDOWN_GRACE_SECONDS: i64 = 60;

// The service port flagged as the ingress port receives the gateway traffic
pub fn ingress_port(spec: &MicroserviceKubernetesSpec) -> i32 {
    spec.container
        .app
        .ports
        .iter()
        .find(|p| p.is_ingress_port)
        .map_or(DEFAULT_INGRESS_PORT, |p| p.service_port)
}

pub async fn resources(ctx: &mut StackContext, input: &MicroserviceKubernetesStackInput) -> EmptyResult {
    let locals = initialize_locals(ctx, input)?;
    let target = &input.target;

    let ns = ctx
        .kubernetes(&build_namespace(&locals.namespace, &locals.labels), ResourceOptions::default())
        .await
        .context("failed to create namespace")?;

    let service_account = ctx
        .kubernetes(&build_service_account(&locals, &target.metadata.name), ResourceOptions::parent(&ns))
        .await
        .context("failed to create service account")?;

    let mut deployment_deps = vec![service_account];
    if let Some(data) = &locals.image_pull_secret_data {
        let secret = ctx
            .kubernetes(&build_image_pull_secret(&locals, data), ResourceOptions::parent(&ns))
            .await
            .context("failed to create image pull secret")?;
        deployment_deps.push(secret);
    }

    if let Some(env) = target.spec.container.app.env.as_ref().filter(|e| !e.secrets.is_empty()) {
        let secret = build_opaque_secret(&locals.namespace, &target.spec.version, &locals.labels, env.secrets.clone());
        let secret = ctx
            .kubernetes(&secret, ResourceOptions::parent(&ns))
            .await
            .context("failed to create environment secrets")?;
        deployment_deps.push(secret);
    }

    let pull_secret_name = locals.image_pull_secret_data.as_ref().map(|_| IMAGE_PULL_SECRET_NAME);
    let deployment = build_deployment(&locals, target, pull_secret_name)?;
    let deployment = ctx
        .kubernetes(&deployment, ResourceOptions::parent(&ns).depends_on_all(&deployment_deps))
        .await
        .context("failed to create deployment")?;

    let service = ctx
        .kubernetes(&build_service(&locals, &target.spec), ResourceOptions::parent(&ns).depends_on(&deployment))
        .await
        .context("failed to create service")?;

    let Some(ingress) = &locals.ingress else {
        return Ok(());
    };

    let args = GatewayIngressArgs {
        name: locals.namespace.clone(),
        namespace: locals.namespace.clone(),
        labels: locals.labels.clone(),
        endpoints: vec![
            GatewayEndpoint::new("external", &ingress.external_hostname, ISTIO_INGRESS_GATEWAY_SERVICE),
            GatewayEndpoint::new("internal", &ingress.internal_hostname, ISTIO_INTERNAL_INGRESS_GATEWAY_SERVICE),
        ],
        tls: Some(IngressTls {
            cluster_issuer: ingress.cert_cluster_issuer.clone(),
            secret_name: ingress.cert_secret_name.clone(),
        }),
        backend_service: locals.kube_service_name.clone(),
        backend_port: ingress_port(&target.spec),
        redirect_http: true,
    };
    provision_gateway_ingress(ctx, &args, &service)
        .await
        .context("failed to create ingress")?;
    Ok(())
}

#[cfg(test)]
mod tests;
