use super::*;

const MAX_TOPIC_NAME_LEN: usize = 249;

// Each rule is checked on its own so that a bad name reports every problem it has
pub fn check_topic_name(name: &str, out: &mut Vec<Violation>) {
    let mut violation = |msg: &str| out.push(Violation::new(&KAFKA_TOPIC_NAME, msg));

    if name.is_empty() {
        violation("Name is required");
        return;
    }
    if name.len() > MAX_TOPIC_NAME_LEN {
        violation("Should be less than 250 characters");
    }
    if !name.starts_with(|c: char| c.is_ascii_alphanumeric()) {
        violation("Should start with an alphanumeric character");
    }
    if !name.ends_with(|c: char| c.is_ascii_alphanumeric()) {
        violation("Should end with an alphanumeric character");
    }
    if !name.is_ascii() {
        violation("Must not contain non-ASCII characters");
    }
    if name.contains("..") {
        violation("Must not contain '..'");
    }
    if !name
        .chars()
        .filter(char::is_ascii)
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
    {
        violation("Only alphanumeric and ('.', '_' and '-') characters are allowed");
    }
}

impl Validate for KafkaTopic {
    fn check(&self, out: &mut Vec<Violation>) {
        check_topic_name(&self.name, out);
        if self.partitions < 1 {
            out.push(Violation::new(&KAFKA_TOPIC_PARTITIONS, "Partitions must be at least 1"));
        }
        if self.replicas < 1 {
            out.push(Violation::new(&KAFKA_TOPIC_REPLICAS, "Replicas must be at least 1"));
        }
    }
}

impl Validate for KafkaKubernetesSpec {
    fn check(&self, out: &mut Vec<Violation>) {
        if !is_valid_disk_size(&self.broker_container.disk_size) {
            out.push(Violation::new(&KAFKA_BROKER_DISK_SIZE_FORMAT, "Disk size must be a valid quantity, e.g. 1Gi"));
        }
        if !is_valid_disk_size(&self.zookeeper_container.disk_size) {
            out.push(Violation::new(&KAFKA_ZOOKEEPER_DISK_SIZE_FORMAT, "Disk size must be a valid quantity, e.g. 1Gi"));
        }
        for topic in &self.kafka_topics {
            topic.check(out);
        }
    }
}

impl Validate for KafkaKubernetes {
    fn check(&self, out: &mut Vec<Violation>) {
        check_resource_header(CloudResourceKind::KafkaKubernetes, &self.api_version, &self.metadata, out);
        self.spec.check(out);
    }
}
