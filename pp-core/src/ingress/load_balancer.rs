use std::collections::BTreeMap;

use k8s_openapi::apimachinery::pkg::util::intstr::IntOrString;

use crate::errors::*;
use crate::macros::*;
use crate::prelude::*;

pub const EXTERNAL_LB_SERVICE_NAME: &str = "ingress-external-lb";
pub const INTERNAL_LB_SERVICE_NAME: &str = "ingress-internal-lb";

#[derive(Clone, Debug, PartialEq)]
pub struct LoadBalancerIngressArgs {
    pub namespace: String,
    pub labels: BTreeMap<String, String>,
    pub selector: BTreeMap<String, String>,
    pub port_name: String,
    pub port: i32,
    pub external_hostname: String,
    pub internal_hostname: String,
}

fn build_lb_service(
    args: &LoadBalancerIngressArgs,
    name: &str,
    annotations: Option<BTreeMap<String, String>>,
) -> corev1::Service {
    corev1::Service {
        metadata: metav1::ObjectMeta {
            annotations,
            ..crate::k8s::build_object_meta(&args.namespace, name, &args.labels)
        },
        spec: Some(corev1::ServiceSpec {
            type_: Some("LoadBalancer".into()),
            ports: Some(vec![corev1::ServicePort {
                name: Some(args.port_name.clone()),
                protocol: Some("TCP".into()),
                port: args.port,
                target_port: Some(IntOrString::Int(args.port)),
                ..Default::default()
            }]),
            selector: Some(args.selector.clone()),
            ..Default::default()
        }),
        ..Default::default()
    }
}

pub fn build_external_lb_service(args: &LoadBalancerIngressArgs) -> corev1::Service {
    build_lb_service(
        args,
        EXTERNAL_LB_SERVICE_NAME,
        klabel!(EXTERNAL_DNS_HOSTNAME_ANNOTATION_KEY => args.external_hostname),
    )
}

// The internal load balancer is only reachable from inside the VPC
pub fn build_internal_lb_service(args: &LoadBalancerIngressArgs) -> corev1::Service {
    build_lb_service(
        args,
        INTERNAL_LB_SERVICE_NAME,
        klabel!(
            EXTERNAL_DNS_HOSTNAME_ANNOTATION_KEY => args.internal_hostname,
            GCP_LOAD_BALANCER_TYPE_ANNOTATION_KEY => "Internal",
        ),
    )
}

pub async fn provision_load_balancer_ingress(
    ctx: &mut StackContext,
    args: &LoadBalancerIngressArgs,
    parent: &ResourceHandle,
) -> anyhow::Result<Vec<ResourceHandle>> {
    let external = ctx
        .kubernetes(&build_external_lb_service(args), ResourceOptions::parent(parent))
        .await
        .context("failed to create external load balancer service")?;
    let internal = ctx
        .kubernetes(&build_internal_lb_service(args), ResourceOptions::parent(parent))
        .await
        .context("failed to create internal load balancer service")?;
    Ok(vec![external, internal])
}
