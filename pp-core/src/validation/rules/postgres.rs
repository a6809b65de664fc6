use super::*;

impl Validate for PostgresKubernetes {
    fn check(&self, out: &mut Vec<Violation>) {
        check_resource_header(CloudResourceKind::PostgresKubernetes, &self.api_version, &self.metadata, out);
        if !is_valid_disk_size(&self.spec.container.disk_size) {
            out.push(Violation::new(&POSTGRES_DISK_SIZE_FORMAT, "Disk size must be a valid quantity, e.g. 1Gi"));
        }
    }
}
