mod artifact_registry;
mod kafka;
mod microservice;
mod postgres;
mod redis;

use lazy_static::lazy_static;
use pp_api::v1::*;
use regex::Regex;

use super::*;

pub use self::kafka::check_topic_name;

lazy_static! {
    static ref DISK_SIZE_REGEX: Regex = Regex::new(r"^\d+(\.\d+)?\s?(Ki|Mi|Gi|Ti|Pi|Ei|K|M|G|T|P|E)$").unwrap();
}

pub fn is_valid_disk_size(size: &str) -> bool {
    DISK_SIZE_REGEX.is_match(size)
}

// Shared by every kind: a name, and an apiVersion matching the kind's provider family
fn check_resource_header(
    kind: CloudResourceKind,
    api_version: &str,
    metadata: &CloudResourceMetadata,
    out: &mut Vec<Violation>,
) {
    if api_version != kind.api_version() {
        out.push(Violation::new(&API_VERSION_CONST, &format!("value must equal `{}`", kind.api_version())));
    }
    if metadata.name.is_empty() {
        out.push(Violation::new(&METADATA_NAME_REQUIRED, "Name is required"));
    }
}
