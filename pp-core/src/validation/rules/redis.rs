use super::*;

const DISK_SIZE_MESSAGE: &str = "Disk size is required and must match the format if persistence is enabled";

impl Validate for RedisKubernetesContainer {
    fn check(&self, out: &mut Vec<Violation>) {
        let valid = if self.is_persistence_enabled {
            is_valid_disk_size(&self.disk_size)
        } else {
            self.disk_size.is_empty()
        };
        if !valid {
            out.push(Violation::new(&REDIS_DISK_SIZE_REQUIRED, DISK_SIZE_MESSAGE));
        }
    }
}

impl Validate for RedisKubernetes {
    fn check(&self, out: &mut Vec<Violation>) {
        check_resource_header(CloudResourceKind::RedisKubernetes, &self.api_version, &self.metadata, out);
        self.spec.container.check(out);
    }
}
