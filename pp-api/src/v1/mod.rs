mod gcp;
mod gcp_artifact_registry_repo;
mod kafka_kubernetes;
mod kind;
mod kubernetes;
mod metadata;
mod microservice_kubernetes;
mod postgres_kubernetes;
mod redis_kubernetes;
mod stack;

pub use gcp::*;
pub use gcp_artifact_registry_repo::*;
pub use kafka_kubernetes::*;
pub use kind::*;
pub use kubernetes::*;
pub use metadata::*;
pub use microservice_kubernetes::*;
pub use postgres_kubernetes::*;
pub use redis_kubernetes::*;
pub use stack::*;

#[cfg(test)]
mod tests;
