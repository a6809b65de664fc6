pub mod config;
pub mod constants;
pub mod errors;
pub mod ingress;
pub mod k8s;
pub mod locals;
pub mod logging;
pub mod macros;
pub mod manifest;
pub mod providers;
pub mod stack;
pub mod validation;

pub mod prelude {
    pub use k8s_openapi::api::apps::v1 as appsv1;
    pub use k8s_openapi::api::core::v1 as corev1;
    pub use k8s_openapi::apimachinery::pkg::apis::meta::v1 as metav1;
    pub use kube::ResourceExt;
    pub use pp_api::v1::*;

    pub use crate::constants::*;
    pub use crate::errors::EmptyResult;
    pub use crate::k8s::KubeResourceExt;
    pub use crate::stack::{
        ResourceHandle,
        ResourceOptions,
        StackContext,
    };
}
