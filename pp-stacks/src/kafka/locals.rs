use std::collections::BTreeMap;

use pp_core::locals::*;
use pp_core::prelude::*;

use super::*;

#[derive(Clone, Debug, PartialEq)]
pub struct KafkaIngressLocals {
    pub cert_cluster_issuer: String,
    pub bootstrap_external_hostname: String,
    pub bootstrap_internal_hostname: String,
    pub broker_external_hostnames: Vec<String>,
    pub broker_internal_hostnames: Vec<String>,
    pub schema_registry_external_hostname: String,
    pub schema_registry_internal_hostname: String,
    pub schema_registry_cert_secret_name: String,
    pub kowl_external_hostname: String,
    pub kowl_cert_secret_name: String,
}

impl KafkaIngressLocals {
    fn new(cluster_name: &str, namespace: &str, replicas: i32, domain: &str) -> KafkaIngressLocals {
        let brokers = |suffix: &str| -> Vec<String> {
            (0..replicas)
                .map(|i| format!("{cluster_name}-broker-b{i}{suffix}.{domain}"))
                .collect()
        };

        KafkaIngressLocals {
            cert_cluster_issuer: domain.into(),
            bootstrap_external_hostname: format!("{cluster_name}-bootstrap.{domain}"),
            bootstrap_internal_hostname: format!("{cluster_name}-bootstrap-internal.{domain}"),
            broker_external_hostnames: brokers(""),
            broker_internal_hostnames: brokers("-internal"),
            schema_registry_external_hostname: format!("{cluster_name}-schema-registry.{domain}"),
            schema_registry_internal_hostname: format!("{cluster_name}-schema-registry-internal.{domain}"),
            schema_registry_cert_secret_name: format!("cert-{namespace}-schema-registry"),
            kowl_external_hostname: format!("{cluster_name}-kowl.{domain}"),
            kowl_cert_secret_name: format!("cert-{namespace}-kowl"),
        }
    }

    // the broker certificate covers both bootstrap servers and every broker
    pub fn broker_cert_dns_names(&self) -> Vec<String> {
        let mut names = vec![self.bootstrap_internal_hostname.clone(), self.bootstrap_external_hostname.clone()];
        names.extend(self.broker_internal_hostnames.iter().cloned());
        names.extend(self.broker_external_hostnames.iter().cloned());
        names
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Locals {
    pub namespace: String,
    pub labels: BTreeMap<String, String>,
    pub cluster_name: String,
    pub bootstrap_kube_service_name: String,
    pub bootstrap_kube_service_fqdn: String,
    pub schema_registry_kube_service_fqdn: String,
    pub is_schema_registry_enabled: bool,
    pub is_kafka_ui_enabled: bool,
    // load balancer type annotations are only understood by GKE
    pub is_gke: bool,
    pub ingress: Option<KafkaIngressLocals>,
}

impl Locals {
    pub fn new(input: &KafkaKubernetesStackInput) -> Locals {
        let target = &input.target;
        let namespace = resolve_namespace(&target.metadata, input.kubernetes_namespace.as_deref());
        let cluster_name = target.metadata.id_or_name().to_string();
        let bootstrap_kube_service_name = format!("{cluster_name}-kafka-bootstrap");

        let ingress = active_ingress_domain(&target.spec.ingress).map(|domain| {
            KafkaIngressLocals::new(&cluster_name, &namespace, target.spec.broker_container.replicas, domain)
        });

        Locals {
            labels: resource_labels(&target.metadata, CloudResourceKind::KafkaKubernetes),
            bootstrap_kube_service_fqdn: kube_service_fqdn(&bootstrap_kube_service_name, &namespace),
            schema_registry_kube_service_fqdn: kube_service_fqdn(SCHEMA_REGISTRY_SERVICE_NAME, &namespace),
            is_schema_registry_enabled: target.spec.is_schema_registry_enabled(),
            is_kafka_ui_enabled: target.spec.is_deploy_kafka_ui,
            is_gke: input.provider_config.provider == KubernetesProvider::GcpGke,
            namespace,
            cluster_name,
            bootstrap_kube_service_name,
            ingress,
        }
    }

    pub fn export(&self, ctx: &mut StackContext) {
        ctx.export(outputs::NAMESPACE, &self.namespace);
        ctx.export(outputs::USERNAME, ADMIN_USERNAME);
        ctx.export(outputs::PASSWORD_SECRET_NAME, ADMIN_SECRET_NAME);
        ctx.export(outputs::PASSWORD_SECRET_KEY, ADMIN_PASSWORD_KEY);

        let Some(ingress) = &self.ingress else {
            return;
        };
        ctx.export(outputs::BOOTSTRAP_SERVER_EXTERNAL_HOSTNAME, &ingress.bootstrap_external_hostname);
        ctx.export(outputs::BOOTSTRAP_SERVER_INTERNAL_HOSTNAME, &ingress.bootstrap_internal_hostname);
        if self.is_schema_registry_enabled {
            ctx.export(
                outputs::SCHEMA_REGISTRY_EXTERNAL_URL,
                format!("https://{}", ingress.schema_registry_external_hostname),
            );
            ctx.export(
                outputs::SCHEMA_REGISTRY_INTERNAL_URL,
                format!("https://{}", ingress.schema_registry_internal_hostname),
            );
        }
        if self.is_kafka_ui_enabled {
            ctx.export(outputs::KAFKA_UI_EXTERNAL_URL, format!("https://{}", ingress.kowl_external_hostname));
        }
    }
}

pub fn initialize_locals(ctx: &mut StackContext, input: &KafkaKubernetesStackInput) -> Locals {
    let locals = Locals::new(input);
    locals.export(ctx);
    locals
}
