use lazy_static::lazy_static;
use regex::Regex;

use super::*;

const MAX_VERSION_LEN: usize = 20;
const NETWORK_PROTOCOLS: [&str; 3] = ["SCTP", "TCP", "UDP"];

lazy_static! {
    static ref VERSION_REGEX: Regex = Regex::new(r"^[a-z0-9-]+$").unwrap();
    static ref PORT_NAME_REGEX: Regex = Regex::new(r"^[a-z0-9]([-a-z0-9]*[a-z0-9])?$").unwrap();
}

fn check_version(version: &str, out: &mut Vec<Violation>) {
    if version.is_empty() {
        out.push(Violation::new(&MICROSERVICE_VERSION_FORMAT, "Version is required"));
        return;
    }
    if !VERSION_REGEX.is_match(version) {
        out.push(Violation::new(
            &MICROSERVICE_VERSION_FORMAT,
            "Only lowercase letters, numbers, and hyphens are allowed",
        ));
    }
    if version.ends_with('-') {
        out.push(Violation::new(&MICROSERVICE_VERSION_FORMAT, "Must not end with a hyphen"));
    }
    if version.len() > MAX_VERSION_LEN {
        out.push(Violation::new(&MICROSERVICE_VERSION_FORMAT, "Must be at most 20 characters"));
    }
}

impl Validate for MicroserviceKubernetesContainerAppPort {
    fn check(&self, out: &mut Vec<Violation>) {
        if !PORT_NAME_REGEX.is_match(&self.name) {
            out.push(Violation::new(
                &MICROSERVICE_PORT_NAME,
                "Name for ports must only contain lowercase alphanumeric characters and hyphens",
            ));
        }
        if !NETWORK_PROTOCOLS.contains(&self.network_protocol.as_str()) {
            out.push(Violation::new(
                &MICROSERVICE_PORT_PROTOCOL,
                r#"The network protocol must be one of "SCTP", "TCP", or "UDP""#,
            ));
        }
    }
}

impl Validate for MicroserviceKubernetesSpec {
    fn check(&self, out: &mut Vec<Violation>) {
        check_version(&self.version, out);

        let app = &self.container.app;
        match &app.image {
            Some(image) if !image.repo.is_empty() && !image.tag.is_empty() => (),
            _ => out.push(Violation::new(&MICROSERVICE_IMAGE_REQUIRED, "Image repo and tag are required")),
        }
        for port in &app.ports {
            port.check(out);
        }
    }
}

impl Validate for MicroserviceKubernetes {
    fn check(&self, out: &mut Vec<Violation>) {
        check_resource_header(CloudResourceKind::MicroserviceKubernetes, &self.api_version, &self.metadata, out);
        self.spec.check(out);
    }
}
