mod cert_manager;
mod gateway;
mod load_balancer;

use std::collections::BTreeMap;

pub use cert_manager::*;
pub use gateway::*;
pub use load_balancer::*;
use tracing::*;

use crate::errors::*;
use crate::prelude::*;

// One externally reachable hostname, served by its own gateway (e.g. "external" and
// "internal").  The suffix names the gateway, its listeners and its routes.
#[derive(Clone, Debug, PartialEq)]
pub struct GatewayEndpoint {
    pub suffix: String,
    pub hostname: String,
    pub gateway_address: String,
}

impl GatewayEndpoint {
    pub fn new(suffix: &str, hostname: &str, gateway_address: &str) -> GatewayEndpoint {
        GatewayEndpoint {
            suffix: suffix.into(),
            hostname: hostname.into(),
            gateway_address: gateway_address.into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct IngressTls {
    pub cluster_issuer: String,
    pub secret_name: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GatewayIngressArgs {
    // names the certificate and prefixes the gateway names
    pub name: String,
    // namespace of the backend service; routes are created here
    pub namespace: String,
    pub labels: BTreeMap<String, String>,
    pub endpoints: Vec<GatewayEndpoint>,
    pub tls: Option<IngressTls>,
    pub backend_service: String,
    pub backend_port: i32,
    pub redirect_http: bool,
}

impl GatewayIngressArgs {
    pub fn gateway_name(&self, endpoint: &GatewayEndpoint) -> String {
        format!("{}-{}", self.name, endpoint.suffix)
    }

    // several ingresses can share a namespace, so routes carry the ingress name too
    pub fn route_name(&self, listener: &str) -> String {
        format!("{}-{listener}", self.name)
    }

    fn dns_names(&self) -> Vec<String> {
        self.endpoints.iter().map(|e| e.hostname.clone()).filter(|h| !h.is_empty()).collect()
    }
}

pub async fn provision_gateway_ingress(
    ctx: &mut StackContext,
    args: &GatewayIngressArgs,
    parent: &ResourceHandle,
) -> anyhow::Result<Vec<ResourceHandle>> {
    let mut handles = vec![];

    let dns_names = args.dns_names();
    let tls = args.tls.as_ref().filter(|_| !dns_names.is_empty());
    let cert = match tls {
        Some(tls) => {
            let cert = build_certificate(
                ISTIO_INGRESS_NAMESPACE,
                &args.name,
                &args.labels,
                &tls.cluster_issuer,
                &tls.secret_name,
                dns_names,
            );
            let handle = ctx
                .kubernetes(&cert, ResourceOptions::parent(parent))
                .await
                .context("failed to create certificate")?;
            handles.push(handle.clone());
            Some(handle)
        },
        None => {
            debug!("no tls requested for {}, skipping certificate", args.name);
            None
        },
    };

    for endpoint in &args.endpoints {
        let gateway_name = args.gateway_name(endpoint);
        let gateway = build_gateway(
            &gateway_name,
            &endpoint.suffix,
            &endpoint.hostname,
            &endpoint.gateway_address,
            &args.labels,
            tls.map(|t| t.secret_name.as_str()),
        );
        let opts = ResourceOptions::parent(parent).depends_on_all(&cert);
        let gateway_handle = ctx
            .kubernetes(&gateway, opts)
            .await
            .with_context(|| format!("failed to create {} gateway", endpoint.suffix))?;
        handles.push(gateway_handle.clone());

        let parent_ref = |section_name: String| ParentRef {
            name: gateway_name.clone(),
            namespace: ISTIO_INGRESS_NAMESPACE.into(),
            section_name,
        };
        let backend = BackendRef {
            name: args.backend_service.clone(),
            namespace: args.namespace.clone(),
            port: args.backend_port,
        };

        let mut routes = vec![];
        if tls.is_some() {
            let listener = https_listener_name(&endpoint.suffix);
            routes.push(build_backend_route(
                &args.namespace,
                &args.route_name(&listener),
                &args.labels,
                &endpoint.hostname,
                parent_ref(listener),
                backend,
            ));
            if args.redirect_http {
                let listener = http_listener_name(&endpoint.suffix);
                routes.push(build_redirect_route(
                    &args.namespace,
                    &args.route_name(&format!("{listener}-redirect")),
                    &args.labels,
                    &endpoint.hostname,
                    parent_ref(listener),
                ));
            }
        } else {
            let listener = http_listener_name(&endpoint.suffix);
            routes.push(build_backend_route(
                &args.namespace,
                &args.route_name(&listener),
                &args.labels,
                &endpoint.hostname,
                parent_ref(listener),
                backend,
            ));
        }

        for route in routes {
            let route_name = route.name_any();
            let handle = ctx
                .kubernetes(&route, ResourceOptions::parent(parent).depends_on(&gateway_handle))
                .await
                .with_context(|| format!("failed to create {route_name} route"))?;
            handles.push(handle);
        }
    }

    Ok(handles)
}

#[cfg(test)]
mod tests;
