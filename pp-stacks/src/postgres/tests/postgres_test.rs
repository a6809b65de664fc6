use assertables::*;
use pp_core::stack::DesiredResource;
use pp_testutils::*;

use super::*;

#[rstest]
fn test_locals(test_postgres: PostgresKubernetes) {
    let input = PostgresKubernetesStackInput::new(test_postgres);
    let locals = Locals::new(&input);

    assert_eq!(locals.cluster_name, "db-the-resource");
    assert_eq!(locals.kube_service_fqdn, "db-the-resource.the-resource.svc.cluster.local");
    assert_eq!(locals.password_secret_name, "postgres.db-the-resource.credentials.postgresql.acid.zalan.do");
    assert_eq!(locals, Locals::new(&input));
}

#[rstest]
fn test_build_postgresql(test_postgres: PostgresKubernetes) {
    let pg = build_postgresql("ns", "db-the-resource", &BTreeMap::new(), TEST_NAME, &test_postgres.spec.container);
    let value = serde_json::to_value(&pg).unwrap();

    assert_eq!(value["apiVersion"], "acid.zalan.do/v1");
    assert_eq!(value["kind"], "postgresql");
    assert_eq!(value["spec"]["teamId"], "db");
    assert_eq!(value["spec"]["numberOfInstances"], 1);
    assert_eq!(value["spec"]["volume"]["size"], "1Gi");
    assert_eq!(value["spec"]["resources"]["requests"]["cpu"], "50m");
    assert_eq!(value["spec"]["podAnnotations"]["postgres-cluster-id"], TEST_NAME);
    assert_none!(value.get("status"));
}

#[rstest]
#[tokio::test]
async fn test_resources(test_postgres: PostgresKubernetes) {
    let input = PostgresKubernetesStackInput::new(test_postgres);
    let mut ctx = StackContext::dry_run("test");
    resources(&mut ctx, &input).await.unwrap();

    let urns: Vec<_> = ctx.planned().iter().map(|r| r.urn.as_str()).collect();
    assert_eq!(
        urns,
        vec![
            "kubernetes:v1.Namespace::the-resource",
            "kubernetes:acid.zalan.do/v1.postgresql::the-resource/db-the-resource",
        ]
    );

    let outputs: PostgresKubernetesStackOutputs = ctx.outputs().to_typed().unwrap();
    assert_eq!(outputs.namespace, TEST_NAME);
    assert_eq!(outputs.service, "db-the-resource");
    assert_eq!(outputs.username, "postgres");
    assert_eq!(
        outputs.port_forward_command,
        "kubectl port-forward -n the-resource service/db-the-resource 5432:5432"
    );
}

#[rstest]
#[tokio::test]
async fn test_resources_with_ingress(mut test_postgres: PostgresKubernetes) {
    test_postgres.spec.ingress = Some(IngressSpec::new(TEST_DOMAIN));
    let input = PostgresKubernetesStackInput::new(test_postgres);
    let mut ctx = StackContext::dry_run("test");
    resources(&mut ctx, &input).await.unwrap();

    let planned = ctx.planned();
    assert_len_eq_x!(planned, 4);

    // the load balancers hang off the database, not the namespace
    assert_eq!(planned[2].parent.as_deref(), Some(planned[1].urn.as_str()));

    let DesiredResource::Kubernetes(svc) = &planned[3].resource else {
        panic!("expected a kubernetes object");
    };
    assert_eq!(svc.data["spec"]["selector"]["spilo-role"], "master");
    assert_eq!(svc.data["spec"]["ports"][0]["port"], 5432);
    assert_eq!(
        svc.metadata.annotations.as_ref().unwrap()[EXTERNAL_DNS_HOSTNAME_ANNOTATION_KEY],
        "the-resource-internal.example.com"
    );
}
