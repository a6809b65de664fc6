use super::*;

// The repo name is suffixed with "-reader" and "-writer" to form service account ids, which GCP caps
// at 30 characters
const MAX_REPO_NAME_LEN: usize = 30 - "-reader".len();

lazy_static! {
    static ref SERVICE_ACCOUNT_ID_REGEX: Regex = Regex::new(r"^[a-z]([-a-z0-9]*[a-z0-9])?$").unwrap();
}

fn check_repo_name(name: &str, out: &mut Vec<Violation>) {
    if name.is_empty() {
        return;
    }
    if name.len() > MAX_REPO_NAME_LEN {
        out.push(Violation::new(
            &ARTIFACT_REGISTRY_NAME_FORMAT,
            &format!("Should be at most {MAX_REPO_NAME_LEN} characters"),
        ));
    }
    if !SERVICE_ACCOUNT_ID_REGEX.is_match(name) {
        out.push(Violation::new(
            &ARTIFACT_REGISTRY_NAME_FORMAT,
            "Should start with a lowercase letter, end with a lowercase letter or number, \
             and contain only lowercase letters, numbers and hyphens",
        ));
    }
}

impl Validate for GcpArtifactRegistryRepo {
    fn check(&self, out: &mut Vec<Violation>) {
        check_resource_header(CloudResourceKind::GcpArtifactRegistryRepo, &self.api_version, &self.metadata, out);
        check_repo_name(&self.metadata.name, out);
        if self.spec.project_id.is_empty() {
            out.push(Violation::new(&ARTIFACT_REGISTRY_PROJECT_REQUIRED, "Project id is required"));
        }
        if self.spec.region.is_empty() {
            out.push(Violation::new(&ARTIFACT_REGISTRY_REGION_REQUIRED, "Region is required"));
        }
    }
}
