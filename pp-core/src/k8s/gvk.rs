use std::borrow::Cow;
use std::fmt;
use std::ops::Deref;

use kube::api::{
    ApiResource,
    DynamicObject,
    GroupVersionKind,
    TypeMeta,
};
use kube::Resource;

use crate::errors::*;

// GVK is a "newtype" wrapper around GroupVersionKind so that we can hang a few conversion
// helpers off of it; it's displayed as "group/version.kind" (or "version.kind" for the core
// group), which is also the type component of a kubernetes resource URN.
#[derive(Clone, Debug, Hash, Eq, PartialEq)]
pub struct GVK(GroupVersionKind);

impl GVK {
    pub fn new(group: &str, version: &str, kind: &str) -> GVK {
        GVK(GroupVersionKind::gvk(group, version, kind))
    }

    pub fn from_resource<K: Resource<DynamicType = ()>>() -> GVK {
        GVK::new(&K::group(&()), &K::version(&()), &K::kind(&()))
    }

    pub fn from_type_meta(types: &TypeMeta) -> anyhow::Result<GVK> {
        Ok(GVK(types.try_into()?))
    }

    pub fn from_dynamic_obj(obj: &DynamicObject) -> anyhow::Result<GVK> {
        match &obj.types {
            Some(t) => GVK::from_type_meta(t),
            None => bail!("no type data present"),
        }
    }

    pub fn into_type_meta(&self) -> TypeMeta {
        TypeMeta {
            api_version: self.0.api_version(),
            kind: self.0.kind.clone(),
        }
    }

    // Guesses the plural from the kind, which holds for every type we create
    pub fn api_resource(&self) -> ApiResource {
        ApiResource::from_gvk(&self.0)
    }
}

impl Deref for GVK {
    type Target = GroupVersionKind;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl fmt::Display for GVK {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut group = Cow::from(&self.0.group);
        if !group.is_empty() {
            group.to_mut().push('/');
        }

        write!(f, "{group}{}.{}", self.0.version, self.0.kind)
    }
}
