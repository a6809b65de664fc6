use assert_fs::prelude::*;
use assertables::*;
use k8s_openapi::apimachinery::pkg::util::intstr::IntOrString;
use pp_testutils::*;

use super::*;

fn urns(ctx: &StackContext) -> Vec<&str> {
    ctx.planned().iter().map(|r| r.urn.as_str()).collect()
}

#[rstest]
fn test_locals(test_microservice: MicroserviceKubernetes) {
    let input = MicroserviceKubernetesStackInput::new(test_microservice);
    let locals = Locals::new(&input).unwrap();

    assert_eq!(locals.kube_service_name, TEST_VERSION);
    assert_eq!(locals.kube_service_fqdn, "main.the-resource.svc.cluster.local");
    assert_eq!(locals.port_forward_command, "kubectl port-forward -n the-resource service/main 8080:8080");
    assert_none!(locals.image_pull_secret_data);
    assert_none!(locals.ingress);
    assert_eq!(locals, Locals::new(&input).unwrap());
}

#[rstest]
fn test_locals_ingress(mut test_microservice: MicroserviceKubernetes) {
    test_microservice.spec.ingress = Some(IngressSpec::new(TEST_DOMAIN));
    let input = MicroserviceKubernetesStackInput::new(test_microservice);
    let ingress = Locals::new(&input).unwrap().ingress.unwrap();

    assert_eq!(ingress.external_hostname, "the-resource.example.com");
    assert_eq!(ingress.internal_hostname, "the-resource-internal.example.com");
    assert_eq!(ingress.cert_cluster_issuer, TEST_DOMAIN);
    assert_eq!(ingress.cert_secret_name, TEST_NAME);
}

#[rstest]
fn test_locals_docker_config_from_file(mut test_microservice: MicroserviceKubernetes) {
    let dir = assert_fs::TempDir::new().unwrap();
    let file = dir.child("config.json");
    file.write_str(r#"{"auths":{}}"#).unwrap();
    test_microservice
        .metadata
        .labels
        .insert(DOCKER_CONFIG_JSON_FILE_LABEL_KEY.into(), file.path().display().to_string());

    let mut input = MicroserviceKubernetesStackInput::new(test_microservice);
    assert_eq!(Locals::new(&input).unwrap().image_pull_secret_data.as_deref(), Some(r#"{"auths":{}}"#));

    // the value on the stack input wins over the file
    input.docker_config_json = Some("{}".into());
    assert_eq!(Locals::new(&input).unwrap().image_pull_secret_data.as_deref(), Some("{}"));
}

#[rstest]
fn test_locals_docker_config_missing_file(mut test_microservice: MicroserviceKubernetes) {
    test_microservice
        .metadata
        .labels
        .insert(DOCKER_CONFIG_JSON_FILE_LABEL_KEY.into(), "/does/not/exist.json".into());
    let input = MicroserviceKubernetesStackInput::new(test_microservice);
    let err = Locals::new(&input).unwrap_err();
    assert_contains!(format!("{err:#}"), "failed to read /does/not/exist.json");
}

#[rstest]
fn test_build_env(test_microservice: MicroserviceKubernetes) {
    let env = build_env(&test_microservice.spec);
    let names: Vec<_> = env.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["HOSTNAME", "K8S_POD_ID", "LOG_LEVEL", "DB_PASSWORD"]);

    let secret_ref = env[3].value_from.as_ref().unwrap().secret_key_ref.as_ref().unwrap();
    assert_eq!(secret_ref.name, TEST_VERSION);
    assert_eq!(secret_ref.key, "DB_PASSWORD");
    assert_eq!(env[2].value.as_deref(), Some("info"));
}

#[rstest]
fn test_build_deployment(test_microservice: MicroserviceKubernetes) {
    let input = MicroserviceKubernetesStackInput::new(test_microservice);
    let locals = Locals::new(&input).unwrap();
    let deployment = build_deployment(&locals, &input.target, Some(IMAGE_PULL_SECRET_NAME)).unwrap();

    let spec = deployment.spec.unwrap();
    assert_eq!(spec.replicas, Some(1));
    let pod = spec.template.spec.unwrap();
    assert_eq!(pod.termination_grace_period_seconds, Some(60));
    assert_eq!(pod.service_account_name.as_deref(), Some(TEST_NAME));
    assert_eq!(pod.image_pull_secrets.unwrap()[0].name, IMAGE_PULL_SECRET_NAME);
    assert_eq!(pod.containers[0].image.as_deref(), Some(format!("{TEST_IMAGE_REPO}:{TEST_IMAGE_TAG}").as_str()));
}

#[rstest]
fn test_build_deployment_no_image(mut test_microservice: MicroserviceKubernetes) {
    test_microservice.spec.container.app.image = None;
    let input = MicroserviceKubernetesStackInput::new(test_microservice);
    let locals = Locals::new(&input).unwrap();
    assert_err!(build_deployment(&locals, &input.target, None));
}

#[rstest]
fn test_build_service(test_microservice: MicroserviceKubernetes) {
    let input = MicroserviceKubernetesStackInput::new(test_microservice);
    let locals = Locals::new(&input).unwrap();
    let port = &build_service(&locals, &input.target.spec).spec.unwrap().ports.unwrap()[0];

    assert_eq!(port.port, 80);
    assert_eq!(port.protocol.as_deref(), Some("TCP"));
    assert_eq!(port.app_protocol.as_deref(), Some("http"));
    assert_eq!(port.target_port, Some(IntOrString::Int(8080)));
}

#[rstest]
#[tokio::test]
async fn test_resources(test_microservice: MicroserviceKubernetes) {
    let input = MicroserviceKubernetesStackInput::new(test_microservice);
    let mut ctx = StackContext::dry_run("test");
    resources(&mut ctx, &input).await.unwrap();

    assert_eq!(
        urns(&ctx),
        vec![
            "kubernetes:v1.Namespace::the-resource",
            "kubernetes:v1.ServiceAccount::the-resource/the-resource",
            "kubernetes:v1.Secret::the-resource/main",
            "kubernetes:apps/v1.Deployment::the-resource/the-resource",
            "kubernetes:v1.Service::the-resource/main",
        ]
    );
    assert_eq!(ctx.planned()[3].depends_on.len(), 2);

    let outputs: MicroserviceKubernetesStackOutputs = ctx.outputs().to_typed().unwrap();
    assert_eq!(outputs.service, TEST_VERSION);
    assert_none!(outputs.ingress_external_hostname);
}

#[rstest]
#[tokio::test]
async fn test_resources_with_ingress_and_pull_secret(mut test_microservice: MicroserviceKubernetes) {
    test_microservice.spec.ingress = Some(IngressSpec::new(TEST_DOMAIN));
    test_microservice.spec.container.app.env = None;
    let mut input = MicroserviceKubernetesStackInput::new(test_microservice);
    input.docker_config_json = Some("{}".into());

    let mut ctx = StackContext::dry_run("test");
    resources(&mut ctx, &input).await.unwrap();

    let urns = urns(&ctx);
    assert_eq!(urns[2], "kubernetes:v1.Secret::the-resource/image-pull-secret");
    assert_eq!(urns[5], "kubernetes:cert-manager.io/v1.Certificate::istio-ingress/the-resource");
    assert_contains!(urns, &"kubernetes:gateway.networking.k8s.io/v1.Gateway::istio-ingress/the-resource-internal");
    assert_contains!(
        urns,
        &"kubernetes:gateway.networking.k8s.io/v1.HTTPRoute::the-resource/the-resource-http-internal-redirect"
    );
    assert_eq!(ctx.outputs().get(outputs::INGRESS_INTERNAL_HOSTNAME), Some("the-resource-internal.example.com"));
}
