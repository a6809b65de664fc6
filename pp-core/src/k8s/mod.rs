mod gvk;
mod util;

pub use gvk::*;
pub use util::*;

pub trait KubeResourceExt {
    fn namespaced_name(&self) -> String;
}

#[cfg(test)]
mod tests;
