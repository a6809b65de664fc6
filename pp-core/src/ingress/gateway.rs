use std::collections::BTreeMap;

use kube::api::{
    NotUsed,
    TypeMeta,
};
use serde::{
    Deserialize,
    Serialize,
};

use crate::constants::*;
use crate::k8s::build_object_meta;

// Minimal Gateway API (gateway.networking.k8s.io/v1) models for the objects the ingress chain
// creates; anything the controller fills in is left out

pub const GATEWAY_API_VERSION: &str = "gateway.networking.k8s.io/v1";
pub const GATEWAY_KIND: &str = "Gateway";
pub const HTTP_ROUTE_KIND: &str = "HTTPRoute";

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewaySpec {
    pub gateway_class_name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub addresses: Vec<GatewayAddress>,
    pub listeners: Vec<GatewayListener>,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct GatewayAddress {
    #[serde(rename = "type")]
    pub type_: String,
    pub value: String,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayListener {
    pub name: String,
    pub hostname: String,
    pub port: i32,
    pub protocol: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tls: Option<GatewayListenerTls>,
    pub allowed_routes: AllowedRoutes,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayListenerTls {
    pub mode: String,
    pub certificate_refs: Vec<ObjectRef>,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct ObjectRef {
    pub name: String,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct AllowedRoutes {
    pub namespaces: AllowedRouteNamespaces,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct AllowedRouteNamespaces {
    pub from: String,
}

pub type Gateway = kube::api::Object<GatewaySpec, NotUsed>;

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpRouteSpec {
    pub hostnames: Vec<String>,
    pub parent_refs: Vec<ParentRef>,
    pub rules: Vec<HttpRouteRule>,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParentRef {
    pub name: String,
    pub namespace: String,
    pub section_name: String,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpRouteRule {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub matches: Vec<HttpRouteMatch>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub filters: Vec<HttpRouteFilter>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub backend_refs: Vec<BackendRef>,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct HttpRouteMatch {
    pub path: HttpPathMatch,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct HttpPathMatch {
    #[serde(rename = "type")]
    pub type_: String,
    pub value: String,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpRouteFilter {
    #[serde(rename = "type")]
    pub type_: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_redirect: Option<RequestRedirect>,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestRedirect {
    pub scheme: String,
    pub status_code: i32,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct BackendRef {
    pub name: String,
    pub namespace: String,
    pub port: i32,
}

pub type HttpRoute = kube::api::Object<HttpRouteSpec, NotUsed>;

fn type_meta(kind: &str) -> Option<TypeMeta> {
    Some(TypeMeta {
        api_version: GATEWAY_API_VERSION.into(),
        kind: kind.into(),
    })
}

fn listener(name: &str, hostname: &str, port: i32, protocol: &str, tls_secret: Option<&str>) -> GatewayListener {
    GatewayListener {
        name: name.into(),
        hostname: hostname.into(),
        port,
        protocol: protocol.into(),
        tls: tls_secret.map(|secret| GatewayListenerTls {
            mode: "Terminate".into(),
            certificate_refs: vec![ObjectRef { name: secret.into() }],
        }),
        allowed_routes: AllowedRoutes {
            namespaces: AllowedRouteNamespaces { from: "All".into() },
        },
    }
}

pub fn https_listener_name(suffix: &str) -> String {
    format!("https-{suffix}")
}

pub fn http_listener_name(suffix: &str) -> String {
    format!("http-{suffix}")
}

// Gateways always live next to the istio ingress deployment; the HTTP listener is always
// present and the HTTPS listener only when a certificate secret is available
pub fn build_gateway(
    name: &str,
    suffix: &str,
    hostname: &str,
    address: &str,
    labels: &BTreeMap<String, String>,
    tls_secret: Option<&str>,
) -> Gateway {
    let mut listeners = vec![];
    if let Some(secret) = tls_secret {
        listeners.push(listener(&https_listener_name(suffix), hostname, 443, "HTTPS", Some(secret)));
    }
    listeners.push(listener(&http_listener_name(suffix), hostname, 80, "HTTP", None));

    Gateway {
        types: type_meta(GATEWAY_KIND),
        metadata: build_object_meta(ISTIO_INGRESS_NAMESPACE, name, labels),
        spec: GatewaySpec {
            gateway_class_name: ISTIO_GATEWAY_CLASS.into(),
            addresses: vec![GatewayAddress { type_: "Hostname".into(), value: address.into() }],
            listeners,
        },
        status: None,
    }
}

fn build_route(
    namespace: &str,
    name: &str,
    labels: &BTreeMap<String, String>,
    hostname: &str,
    parent: ParentRef,
    rule: HttpRouteRule,
) -> HttpRoute {
    HttpRoute {
        types: type_meta(HTTP_ROUTE_KIND),
        metadata: build_object_meta(namespace, name, labels),
        spec: HttpRouteSpec {
            hostnames: vec![hostname.into()],
            parent_refs: vec![parent],
            rules: vec![rule],
        },
        status: None,
    }
}

pub fn build_backend_route(
    namespace: &str,
    name: &str,
    labels: &BTreeMap<String, String>,
    hostname: &str,
    parent: ParentRef,
    backend: BackendRef,
) -> HttpRoute {
    let rule = HttpRouteRule {
        matches: vec![HttpRouteMatch {
            path: HttpPathMatch { type_: "PathPrefix".into(), value: "/".into() },
        }],
        backend_refs: vec![backend],
        ..Default::default()
    };
    build_route(namespace, name, labels, hostname, parent, rule)
}

pub fn build_redirect_route(
    namespace: &str,
    name: &str,
    labels: &BTreeMap<String, String>,
    hostname: &str,
    parent: ParentRef,
) -> HttpRoute {
    let rule = HttpRouteRule {
        filters: vec![HttpRouteFilter {
            type_: "RequestRedirect".into(),
            request_redirect: Some(RequestRedirect { scheme: "https".into(), status_code: 301 }),
        }],
        ..Default::default()
    };
    build_route(namespace, name, labels, hostname, parent, rule)
}
