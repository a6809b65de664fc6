use std::collections::BTreeMap;

use pp_core::locals::*;
use pp_core::prelude::*;

use super::*;

#[derive(Clone, Debug, PartialEq)]
pub struct Locals {
    pub namespace: String,
    pub labels: BTreeMap<String, String>,
    pub cluster_name: String,
    pub kube_service_fqdn: String,
    pub port_forward_command: String,
    pub password_secret_name: String,
    pub ingress_external_hostname: Option<String>,
    pub ingress_internal_hostname: Option<String>,
}

impl Locals {
    pub fn new(input: &PostgresKubernetesStackInput) -> Locals {
        let target = &input.target;
        let namespace = resolve_namespace(&target.metadata, input.kubernetes_namespace.as_deref());

        // the operator insists on the team id prefix, and names the primary's service (and
        // the generated credentials) after the cluster
        let cluster_name = format!("{TEAM_ID}-{}", target.metadata.name);
        let password_secret_name = format!("{POSTGRES_USERNAME}.{cluster_name}.credentials.postgresql.acid.zalan.do");

        let (ingress_external_hostname, ingress_internal_hostname) =
            match active_ingress_domain(&target.spec.ingress) {
                Some(domain) => {
                    let (external, internal) = ingress_hostnames(&namespace, domain);
                    (Some(external), Some(internal))
                },
                None => (None, None),
            };

        Locals {
            labels: resource_labels(&target.metadata, CloudResourceKind::PostgresKubernetes),
            kube_service_fqdn: kube_service_fqdn(&cluster_name, &namespace),
            port_forward_command: port_forward_command(&namespace, &cluster_name, POSTGRES_PORT),
            namespace,
            cluster_name,
            password_secret_name,
            ingress_external_hostname,
            ingress_internal_hostname,
        }
    }

    pub fn export(&self, ctx: &mut StackContext) {
        ctx.export(outputs::NAMESPACE, &self.namespace);
        ctx.export(outputs::SERVICE, &self.cluster_name);
        ctx.export(outputs::KUBE_ENDPOINT, &self.kube_service_fqdn);
        ctx.export(outputs::PORT_FORWARD_COMMAND, &self.port_forward_command);
        ctx.export(outputs::USERNAME, POSTGRES_USERNAME);
        ctx.export(outputs::PASSWORD_SECRET_NAME, &self.password_secret_name);
        ctx.export(outputs::PASSWORD_SECRET_KEY, PASSWORD_SECRET_KEY);
        if let Some(hostname) = &self.ingress_external_hostname {
            ctx.export(outputs::INGRESS_EXTERNAL_HOSTNAME, hostname);
        }
        if let Some(hostname) = &self.ingress_internal_hostname {
            ctx.export(outputs::INGRESS_INTERNAL_HOSTNAME, hostname);
        }
    }
}

pub fn initialize_locals(ctx: &mut StackContext, input: &PostgresKubernetesStackInput) -> Locals {
    let locals = Locals::new(input);
    locals.export(ctx);
    locals
}
