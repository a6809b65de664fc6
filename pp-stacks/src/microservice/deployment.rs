use std::collections::BTreeMap;

use k8s_openapi::apimachinery::pkg::util::intstr::IntOrString;
use pp_core::errors::*;
use pp_core::k8s::build_object_meta;
use pp_core::prelude::*;

use super::*;

fn field_ref_env(name: &str, api_version: Option<&str>, field_path: &str) -> corev1::EnvVar {
    corev1::EnvVar {
        name: name.into(),
        value_from: Some(corev1::EnvVarSource {
            field_ref: Some(corev1::ObjectFieldSelector {
                api_version: api_version.map(String::from),
                field_path: field_path.into(),
            }),
            ..Default::default()
        }),
        ..Default::default()
    }
}

// HOSTNAME and K8S_POD_ID come first, then plain variables and secret references, each
// sorted by name
pub fn build_env(spec: &MicroserviceKubernetesSpec) -> Vec<corev1::EnvVar> {
    let mut env = vec![
        field_ref_env("HOSTNAME", None, "status.podIP"),
        field_ref_env("K8S_POD_ID", Some("v1"), "metadata.name"),
    ];

    let Some(app_env) = &spec.container.app.env else {
        return env;
    };

    env.extend(app_env.variables.iter().map(|(name, value)| corev1::EnvVar {
        name: name.clone(),
        value: Some(value.clone()),
        ..Default::default()
    }));
    env.extend(app_env.secrets.keys().map(|name| corev1::EnvVar {
        name: name.clone(),
        value_from: Some(corev1::EnvVarSource {
            secret_key_ref: Some(corev1::SecretKeySelector {
                name: spec.version.clone(),
                key: name.clone(),
                ..Default::default()
            }),
            ..Default::default()
        }),
        ..Default::default()
    }));
    env
}

pub fn build_deployment(
    locals: &Locals,
    target: &MicroserviceKubernetes,
    image_pull_secret: Option<&str>,
) -> anyhow::Result<appsv1::Deployment> {
    let app = &target.spec.container.app;
    let Some(image) = &app.image else {
        bail!("spec.container.app.image is required");
    };
    let replicas = target.spec.availability.clone().unwrap_or_default().min_replicas;

    let container = corev1::Container {
        name: CONTAINER_NAME.into(),
        image: Some(image.reference()),
        env: Some(build_env(&target.spec)),
        ports: Some(
            app.ports
                .iter()
                .map(|p| corev1::ContainerPort {
                    name: Some(p.name.clone()),
                    container_port: p.container_port,
                    ..Default::default()
                })
                .collect(),
        ),
        resources: Some((&app.resources).into()),
        lifecycle: Some(corev1::Lifecycle {
            pre_stop: Some(corev1::LifecycleHandler {
                exec: Some(corev1::ExecAction {
                    command: Some(vec!["/bin/sleep".into(), SHUTDOWN_GRACE_SECONDS.to_string()]),
                }),
                ..Default::default()
            }),
            ..Default::default()
        }),
        ..Default::default()
    };

    Ok(appsv1::Deployment {
        metadata: build_object_meta(&locals.namespace, &target.metadata.name, &locals.labels),
        spec: Some(appsv1::DeploymentSpec {
            replicas: Some(replicas),
            selector: metav1::LabelSelector {
                match_labels: Some(locals.labels.clone()),
                ..Default::default()
            },
            template: corev1::PodTemplateSpec {
                metadata: Some(metav1::ObjectMeta {
                    labels: Some(locals.labels.clone()),
                    ..Default::default()
                }),
                spec: Some(corev1::PodSpec {
                    service_account_name: Some(target.metadata.name.clone()),
                    containers: vec![container],
                    image_pull_secrets: image_pull_secret
                        .map(|name| vec![corev1::LocalObjectReference { name: name.into() }]),
                    termination_grace_period_seconds: Some(SHUTDOWN_GRACE_SECONDS),
                    ..Default::default()
                }),
            },
            ..Default::default()
        }),
        ..Default::default()
    })
}

pub fn build_service(locals: &Locals, spec: &MicroserviceKubernetesSpec) -> corev1::Service {
    let ports = spec
        .container
        .app
        .ports
        .iter()
        .map(|p| corev1::ServicePort {
            name: Some(p.name.clone()),
            protocol: Some(p.network_protocol.clone()),
            app_protocol: Some(p.app_protocol.clone()).filter(|a| !a.is_empty()),
            port: p.service_port,
            target_port: Some(IntOrString::Int(p.container_port)),
            ..Default::default()
        })
        .collect();

    corev1::Service {
        metadata: build_object_meta(&locals.namespace, &locals.kube_service_name, &locals.labels),
        spec: Some(corev1::ServiceSpec {
            type_: Some("ClusterIP".into()),
            selector: Some(locals.labels.clone()),
            ports: Some(ports),
            ..Default::default()
        }),
        ..Default::default()
    }
}

pub fn build_service_account(locals: &Locals, name: &str) -> corev1::ServiceAccount {
    corev1::ServiceAccount {
        metadata: build_object_meta(&locals.namespace, name, &locals.labels),
        ..Default::default()
    }
}

pub fn build_image_pull_secret(locals: &Locals, docker_config_json: &str) -> corev1::Secret {
    corev1::Secret {
        metadata: build_object_meta(&locals.namespace, IMAGE_PULL_SECRET_NAME, &locals.labels),
        type_: Some("kubernetes.io/dockerconfigjson".into()),
        string_data: Some(BTreeMap::from([(".dockerconfigjson".into(), docker_config_json.into())])),
        ..Default::default()
    }
}
