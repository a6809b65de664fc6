use std::collections::BTreeMap;

use pp_core::errors::*;
use pp_core::k8s::build_object_meta;
use pp_core::prelude::*;
use serde_json::json;

use super::*;

pub const KOWL_NAME: &str = "kowl";
pub const KOWL_IMAGE: &str = "quay.io/cloudhut/kowl:master-59f68da";
pub const KOWL_PORT: i32 = 8080;
pub const KOWL_CONFIG_KEY: &str = "kowl.yaml";
pub const KOWL_CONFIG_MOUNT_PATH: &str = "/var/kowl/config.yaml";
pub const KOWL_CONFIG_VOLUME_NAME: &str = "kowl-config";
pub const KOWL_SASL_PASSWORD_ENV_VAR: &str = "KAFKA_SASL_PASSWORD";
pub const KOWL_REFRESH_INTERVAL: &str = "5m";

pub fn kowl_container_resources() -> ContainerResources {
    ContainerResources::new(CpuMemory::new("150m", "180Mi"), CpuMemory::new("25m", "90Mi"))
}

// The SASL password never lands in the config map; kowl reads it from the environment
pub fn render_kowl_config(locals: &Locals) -> anyhow::Result<String> {
    let schema_registry = locals.is_schema_registry_enabled;
    let config = json!({
        "kafka": {
            "brokers": [format!("{}:{INTERNAL_LISTENER_PORT}", locals.bootstrap_kube_service_fqdn)],
            "clientId": "kowl-on-cluster",
            "sasl": {
                "enabled": true,
                "username": ADMIN_USERNAME,
                "mechanism": "SCRAM-SHA-512",
            },
            "tls": { "enabled": false },
            "schemaRegistry": {
                "enabled": schema_registry,
                "urls": [format!("http://{}", locals.schema_registry_kube_service_fqdn)],
            },
            "protobuf": {
                "enabled": schema_registry,
                "schemaRegistry": {
                    "enabled": schema_registry,
                    "refreshInterval": KOWL_REFRESH_INTERVAL,
                },
            },
        },
    });
    serde_yaml::to_string(&config).context("failed to render kowl config")
}

pub fn build_kowl_config_map(locals: &Locals, config: String) -> corev1::ConfigMap {
    corev1::ConfigMap {
        metadata: build_object_meta(&locals.namespace, KOWL_NAME, &locals.labels),
        data: Some(BTreeMap::from([(KOWL_CONFIG_KEY.into(), config)])),
        ..Default::default()
    }
}

pub fn build_kowl_deployment(locals: &Locals) -> appsv1::Deployment {
    let container = corev1::Container {
        name: KOWL_NAME.into(),
        image: Some(KOWL_IMAGE.into()),
        args: Some(vec![
            format!("--config.filepath={KOWL_CONFIG_MOUNT_PATH}"),
            format!("--kafka.sasl.password=${KOWL_SASL_PASSWORD_ENV_VAR}"),
        ]),
        ports: Some(vec![corev1::ContainerPort {
            name: Some("http".into()),
            container_port: KOWL_PORT,
            ..Default::default()
        }]),
        env: Some(vec![schema_registry::secret_env(
            KOWL_SASL_PASSWORD_ENV_VAR,
            ADMIN_SECRET_NAME,
            ADMIN_PASSWORD_KEY,
        )]),
        volume_mounts: Some(vec![corev1::VolumeMount {
            name: KOWL_CONFIG_VOLUME_NAME.into(),
            mount_path: KOWL_CONFIG_MOUNT_PATH.into(),
            sub_path: Some(KOWL_CONFIG_KEY.into()),
            ..Default::default()
        }]),
        resources: Some((&kowl_container_resources()).into()),
        ..Default::default()
    };

    appsv1::Deployment {
        metadata: build_object_meta(&locals.namespace, KOWL_NAME, &schema_registry::app_labels(locals, KOWL_NAME)),
        spec: Some(appsv1::DeploymentSpec {
            replicas: Some(1),
            selector: metav1::LabelSelector {
                match_labels: Some(schema_registry::app_selector(KOWL_NAME)),
                ..Default::default()
            },
            template: corev1::PodTemplateSpec {
                metadata: Some(metav1::ObjectMeta {
                    labels: Some(schema_registry::app_selector(KOWL_NAME)),
                    ..Default::default()
                }),
                spec: Some(corev1::PodSpec {
                    containers: vec![container],
                    volumes: Some(vec![corev1::Volume {
                        name: KOWL_CONFIG_VOLUME_NAME.into(),
                        config_map: Some(corev1::ConfigMapVolumeSource {
                            name: KOWL_NAME.into(),
                            ..Default::default()
                        }),
                        ..Default::default()
                    }]),
                    ..Default::default()
                }),
            },
            ..Default::default()
        }),
        ..Default::default()
    }
}

pub fn build_kowl_service(locals: &Locals) -> corev1::Service {
    schema_registry::build_http_service(locals, KOWL_NAME, KOWL_NAME, KOWL_PORT)
}
