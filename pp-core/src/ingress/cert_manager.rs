use std::collections::BTreeMap;

use kube::api::TypeMeta;
use serde::{
    Deserialize,
    Serialize,
};

use crate::constants::CLUSTER_ISSUER_KIND;
use crate::k8s::build_object_meta;

// Adapted from the cert-manager CRD; only the fields we set are modelled

pub const CERT_MANAGER_API_VERSION: &str = "cert-manager.io/v1";
pub const CERTIFICATE_KIND: &str = "Certificate";

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateIssuerRef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    pub name: String,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateSpec {
    pub secret_name: String,
    pub issuer_ref: CertificateIssuerRef,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dns_names: Vec<String>,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateStatus {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub not_after: Option<String>,
}

pub type Certificate = kube::api::Object<CertificateSpec, CertificateStatus>;

pub fn build_certificate(
    namespace: &str,
    name: &str,
    labels: &BTreeMap<String, String>,
    cluster_issuer: &str,
    secret_name: &str,
    dns_names: Vec<String>,
) -> Certificate {
    Certificate {
        types: Some(TypeMeta {
            api_version: CERT_MANAGER_API_VERSION.into(),
            kind: CERTIFICATE_KIND.into(),
        }),
        metadata: build_object_meta(namespace, name, labels),
        spec: CertificateSpec {
            secret_name: secret_name.into(),
            issuer_ref: CertificateIssuerRef {
                kind: Some(CLUSTER_ISSUER_KIND.into()),
                name: cluster_issuer.into(),
                ..Default::default()
            },
            dns_names,
        },
        status: None,
    }
}
