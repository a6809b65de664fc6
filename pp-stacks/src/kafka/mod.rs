mod kowl;
mod locals;
pub mod outputs;
mod schema_registry;
mod strimzi;

pub use kowl::*;
pub use locals::*;
use pp_core::errors::*;
use pp_core::ingress::{
    GatewayEndpoint,
    GatewayIngressArgs,
    IngressTls,
    build_certificate,
    provision_gateway_ingress,
};
use pp_core::k8s::build_namespace;
use pp_core::prelude::*;
pub use schema_registry::*;
pub use strimzi::*;
use tracing::*;

pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_SECRET_NAME: &str = "admin";
pub const ADMIN_PASSWORD_KEY: &str = "password";
pub const ADMIN_SASL_JAAS_CONFIG_KEY: &str = "sasl.jaas.config";

// int is for clients inside the cluster, extpvt for clients inside the VPC, extpub for
// everyone else
pub const INTERNAL_LISTENER_NAME: &str = "int";
pub const INTERNAL_LISTENER_PORT: i32 = 9094;
pub const EXTERNAL_PRIVATE_LISTENER_NAME: &str = "extpvt";
pub const EXTERNAL_PRIVATE_LISTENER_PORT: i32 = 9093;
pub const EXTERNAL_PUBLIC_LISTENER_NAME: &str = "extpub";
pub const EXTERNAL_PUBLIC_LISTENER_PORT: i32 = 9092;

pub const BROKER_INGRESS_CERT_NAME: &str = "kafka-ingress";
pub const BROKER_INGRESS_CERT_SECRET_NAME: &str = "cert-kafka-ingress";

pub const HTTP_SERVICE_PORT: i32 = 80;

async fn schema_registry_resources(
    ctx: &mut StackContext,
    locals: &Locals,
    container: &KafkaKubernetesSchemaRegistryContainer,
    cluster: &ResourceHandle,
    admin: &ResourceHandle,
) -> EmptyResult {
    let deployment = ctx
        .kubernetes(
            &build_schema_registry_deployment(locals, container),
            ResourceOptions::parent(cluster).depends_on(admin),
        )
        .await
        .context("failed to create schema registry deployment")?;
    let service = ctx
        .kubernetes(&build_schema_registry_service(locals), ResourceOptions::parent(cluster).depends_on(&deployment))
        .await
        .context("failed to create schema registry service")?;

    let Some(ingress) = &locals.ingress else {
        return Ok(());
    };
    let args = GatewayIngressArgs {
        name: format!("{}-{SCHEMA_REGISTRY_NAME}", locals.namespace),
        namespace: locals.namespace.clone(),
        labels: app_labels(locals, SCHEMA_REGISTRY_NAME),
        endpoints: vec![
            GatewayEndpoint::new(
                "external",
                &ingress.schema_registry_external_hostname,
                ISTIO_INGRESS_GATEWAY_SERVICE,
            ),
            GatewayEndpoint::new(
                "internal",
                &ingress.schema_registry_internal_hostname,
                ISTIO_INTERNAL_INGRESS_GATEWAY_SERVICE,
            ),
        ],
        tls: Some(IngressTls {
            cluster_issuer: ingress.cert_cluster_issuer.clone(),
            secret_name: ingress.schema_registry_cert_secret_name.clone(),
        }),
        backend_service: SCHEMA_REGISTRY_SERVICE_NAME.into(),
        backend_port: HTTP_SERVICE_PORT,
        redirect_http: true,
    };
    provision_gateway_ingress(ctx, &args, &service)
        .await
        .context("failed to create schema registry ingress")?;
    Ok(())
}

async fn kowl_resources(
    ctx: &mut StackContext,
    locals: &Locals,
    ns: &ResourceHandle,
    cluster: &ResourceHandle,
    admin: &ResourceHandle,
) -> EmptyResult {
    let config = render_kowl_config(locals)?;
    let config_map = ctx
        .kubernetes(&build_kowl_config_map(locals, config), ResourceOptions::parent(ns))
        .await
        .context("failed to create kowl config map")?;
    let deployment = ctx
        .kubernetes(
            &build_kowl_deployment(locals),
            ResourceOptions::parent(cluster).depends_on(&config_map).depends_on(admin),
        )
        .await
        .context("failed to create kowl deployment")?;
    let service = ctx
        .kubernetes(&build_kowl_service(locals), ResourceOptions::parent(cluster).depends_on(&deployment))
        .await
        .context("failed to create kowl service")?;

    let Some(ingress) = &locals.ingress else {
        return Ok(());
    };
    let args = GatewayIngressArgs {
        name: format!("{}-{KOWL_NAME}", locals.namespace),
        namespace: locals.namespace.clone(),
        labels: app_labels(locals, KOWL_NAME),
        endpoints: vec![GatewayEndpoint::new(
            "external",
            &ingress.kowl_external_hostname,
            ISTIO_INGRESS_GATEWAY_SERVICE,
        )],
        tls: Some(IngressTls {
            cluster_issuer: ingress.cert_cluster_issuer.clone(),
            secret_name: ingress.kowl_cert_secret_name.clone(),
        }),
        backend_service: KOWL_NAME.into(),
        backend_port: HTTP_SERVICE_PORT,
        redirect_http: true,
    };
    provision_gateway_ingress(ctx, &args, &service)
        .await
        .context("failed to create kowl ingress")?;
    Ok(())
}

pub async fn resources(ctx: &mut StackContext, input: &KafkaKubernetesStackInput) -> EmptyResult {
    let locals = initialize_locals(ctx, input);
    let spec = &input.target.spec;

    let ns = ctx
        .kubernetes(&build_namespace(&locals.namespace, &locals.labels), ResourceOptions::default())
        .await
        .context("failed to create namespace")?;

    let mut cluster_deps = vec![];
    if let Some(ingress) = &locals.ingress {
        let cert = build_certificate(
            &locals.namespace,
            BROKER_INGRESS_CERT_NAME,
            &locals.labels,
            &ingress.cert_cluster_issuer,
            BROKER_INGRESS_CERT_SECRET_NAME,
            ingress.broker_cert_dns_names(),
        );
        let cert = ctx
            .kubernetes(&cert, ResourceOptions::parent(&ns))
            .await
            .context("failed to create certificate for bootstrap server ingress")?;
        cluster_deps.push(cert);
    }

    let cluster = ctx
        .kubernetes(&build_kafka(&locals, spec), ResourceOptions::parent(&ns).depends_on_all(&cluster_deps))
        .await
        .context("failed to create kafka cluster")?;

    let admin = ctx
        .kubernetes(&build_admin_user(&locals), ResourceOptions::parent(&cluster))
        .await
        .context("failed to create admin user")?;

    for topic in &spec.kafka_topics {
        ctx.kubernetes(&build_topic(&locals, topic), ResourceOptions::parent(&cluster))
            .await
            .with_context(|| format!("failed to create topic {}", topic.name))?;
    }

    match spec.schema_registry_container.as_ref().filter(|c| c.is_enabled) {
        Some(container) => schema_registry_resources(ctx, &locals, container, &cluster, &admin).await?,
        None => debug!("schema registry is not enabled, skipping"),
    }

    if spec.is_deploy_kafka_ui {
        kowl_resources(ctx, &locals, &ns, &cluster, &admin).await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests;
