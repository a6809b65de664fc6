mod context;
mod outputs;
mod resource;

pub use context::*;
pub use outputs::*;
pub use resource::*;

use crate::errors::*;

err_impl! {StackError,
    #[error("dependency {0} has not been registered in this stack")]
    UnregisteredDependency(String),

    #[error("resource {0} is already registered in this stack")]
    DuplicateResource(String),

    #[error("no {0} provider is configured")]
    ProviderNotConfigured(String),

    #[error("kubernetes object of kind {0} has no name")]
    MissingObjectName(String),
}

#[cfg(test)]
mod tests;
