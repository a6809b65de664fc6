use std::collections::BTreeMap;

use k8s_openapi::apimachinery::pkg::util::intstr::IntOrString;
use pp_core::k8s::build_object_meta;
use pp_core::prelude::*;

use super::*;

pub const SCHEMA_REGISTRY_NAME: &str = "schema-registry";
pub const SCHEMA_REGISTRY_SERVICE_NAME: &str = "sr";
pub const SCHEMA_REGISTRY_IMAGE: &str = "confluentinc/cp-schema-registry:7.2.6";
pub const SCHEMA_REGISTRY_PORT: i32 = 8081;
pub const SCHEMA_REGISTRY_STORE_TOPIC: &str = "schema-registry";

pub(super) fn app_labels(locals: &Locals, app: &str) -> BTreeMap<String, String> {
    let mut labels = locals.labels.clone();
    labels.insert("app".into(), app.into());
    labels
}

pub(super) fn app_selector(app: &str) -> BTreeMap<String, String> {
    BTreeMap::from([("app".into(), app.into())])
}

pub(super) fn secret_env(name: &str, secret: &str, key: &str) -> corev1::EnvVar {
    corev1::EnvVar {
        name: name.into(),
        value_from: Some(corev1::EnvVarSource {
            secret_key_ref: Some(corev1::SecretKeySelector {
                name: secret.into(),
                key: key.into(),
                ..Default::default()
            }),
            ..Default::default()
        }),
        ..Default::default()
    }
}

fn plain_env(name: &str, value: impl Into<String>) -> corev1::EnvVar {
    corev1::EnvVar {
        name: name.into(),
        value: Some(value.into()),
        ..Default::default()
    }
}

pub fn build_schema_registry_env(locals: &Locals) -> Vec<corev1::EnvVar> {
    vec![
        corev1::EnvVar {
            name: "SCHEMA_REGISTRY_HOST_NAME".into(),
            value_from: Some(corev1::EnvVarSource {
                field_ref: Some(corev1::ObjectFieldSelector {
                    field_path: "status.podIP".into(),
                    ..Default::default()
                }),
                ..Default::default()
            }),
            ..Default::default()
        },
        plain_env("SCHEMA_REGISTRY_LISTENERS", format!("http://0.0.0.0:{SCHEMA_REGISTRY_PORT}")),
        plain_env("SCHEMA_REGISTRY_KAFKASTORE_SASL_MECHANISM", "SCRAM-SHA-512"),
        plain_env("SCHEMA_REGISTRY_KAFKASTORE_SECURITY_PROTOCOL", "SASL_PLAINTEXT"),
        plain_env("SCHEMA_REGISTRY_KAFKASTORE_TOPIC", SCHEMA_REGISTRY_STORE_TOPIC),
        plain_env(
            "SCHEMA_REGISTRY_KAFKASTORE_BOOTSTRAP_SERVERS",
            format!("{}:{INTERNAL_LISTENER_PORT}", locals.bootstrap_kube_service_fqdn),
        ),
        secret_env("SCHEMA_REGISTRY_KAFKASTORE_SASL_JAAS_CONFIG", ADMIN_SECRET_NAME, ADMIN_SASL_JAAS_CONFIG_KEY),
    ]
}

pub fn build_schema_registry_deployment(
    locals: &Locals,
    container: &KafkaKubernetesSchemaRegistryContainer,
) -> appsv1::Deployment {
    appsv1::Deployment {
        metadata: build_object_meta(&locals.namespace, SCHEMA_REGISTRY_NAME, &app_labels(locals, SCHEMA_REGISTRY_NAME)),
        spec: Some(appsv1::DeploymentSpec {
            replicas: Some(container.replicas),
            selector: metav1::LabelSelector {
                match_labels: Some(app_selector(SCHEMA_REGISTRY_NAME)),
                ..Default::default()
            },
            template: corev1::PodTemplateSpec {
                metadata: Some(metav1::ObjectMeta {
                    labels: Some(app_selector(SCHEMA_REGISTRY_NAME)),
                    ..Default::default()
                }),
                spec: Some(corev1::PodSpec {
                    containers: vec![corev1::Container {
                        name: SCHEMA_REGISTRY_NAME.into(),
                        image: Some(SCHEMA_REGISTRY_IMAGE.into()),
                        ports: Some(vec![corev1::ContainerPort {
                            name: Some("http".into()),
                            container_port: SCHEMA_REGISTRY_PORT,
                            ..Default::default()
                        }]),
                        env: Some(build_schema_registry_env(locals)),
                        resources: Some((&container.resources).into()),
                        ..Default::default()
                    }],
                    ..Default::default()
                }),
            },
            ..Default::default()
        }),
        ..Default::default()
    }
}

pub(super) fn build_http_service(locals: &Locals, name: &str, app: &str, target_port: i32) -> corev1::Service {
    corev1::Service {
        metadata: build_object_meta(&locals.namespace, name, &app_labels(locals, app)),
        spec: Some(corev1::ServiceSpec {
            type_: Some("ClusterIP".into()),
            selector: Some(app_selector(app)),
            ports: Some(vec![corev1::ServicePort {
                name: Some("http".into()),
                protocol: Some("TCP".into()),
                port: HTTP_SERVICE_PORT,
                target_port: Some(IntOrString::Int(target_port)),
                ..Default::default()
            }]),
            ..Default::default()
        }),
        ..Default::default()
    }
}

pub fn build_schema_registry_service(locals: &Locals) -> corev1::Service {
    build_http_service(locals, SCHEMA_REGISTRY_SERVICE_NAME, SCHEMA_REGISTRY_NAME, SCHEMA_REGISTRY_PORT)
}
