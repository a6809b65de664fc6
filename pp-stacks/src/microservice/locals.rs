use std::collections::BTreeMap;

use pp_core::locals::*;
use pp_core::prelude::*;

use super::*;

#[derive(Clone, Debug, PartialEq)]
pub struct IngressLocals {
    pub external_hostname: String,
    pub internal_hostname: String,
    // a ClusterIssuer named after the dns domain is expected to exist on the cluster
    pub cert_cluster_issuer: String,
    pub cert_secret_name: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Locals {
    pub namespace: String,
    pub labels: BTreeMap<String, String>,
    pub kube_service_name: String,
    pub kube_service_fqdn: String,
    pub port_forward_command: String,
    pub image_pull_secret_data: Option<String>,
    pub ingress: Option<IngressLocals>,
}

impl Locals {
    pub fn new(input: &MicroserviceKubernetesStackInput) -> anyhow::Result<Locals> {
        let target = &input.target;
        let namespace = resolve_namespace(&target.metadata, input.kubernetes_namespace.as_deref());

        // the version doubles as the service name so that several versions can live side by
        // side in one namespace
        let kube_service_name = target.spec.version.clone();

        let image_pull_secret_data = load_docker_config_json(&target.metadata, input.docker_config_json.as_deref())
            .context("failed to load docker config json")?;

        let ingress = active_ingress_domain(&target.spec.ingress).map(|domain| {
            let (external_hostname, internal_hostname) = ingress_hostnames(&namespace, domain);
            IngressLocals {
                external_hostname,
                internal_hostname,
                cert_cluster_issuer: domain.into(),
                cert_secret_name: namespace.clone(),
            }
        });

        Ok(Locals {
            labels: resource_labels(&target.metadata, CloudResourceKind::MicroserviceKubernetes),
            kube_service_fqdn: kube_service_fqdn(&kube_service_name, &namespace),
            port_forward_command: port_forward_command(&namespace, &kube_service_name, PORT_FORWARD_PORT),
            namespace,
            kube_service_name,
            image_pull_secret_data,
            ingress,
        })
    }

    pub fn export(&self, ctx: &mut StackContext) {
        ctx.export(outputs::NAMESPACE, &self.namespace);
        ctx.export(outputs::SERVICE, &self.kube_service_name);
        ctx.export(outputs::KUBE_ENDPOINT, &self.kube_service_fqdn);
        ctx.export(outputs::PORT_FORWARD_COMMAND, &self.port_forward_command);
        if let Some(ingress) = &self.ingress {
            ctx.export(outputs::INGRESS_EXTERNAL_HOSTNAME, &ingress.external_hostname);
            ctx.export(outputs::INGRESS_INTERNAL_HOSTNAME, &ingress.internal_hostname);
        }
    }
}

pub fn initialize_locals(ctx: &mut StackContext, input: &MicroserviceKubernetesStackInput) -> anyhow::Result<Locals> {
    let locals = Locals::new(input)?;
    locals.export(ctx);
    Ok(locals)
}
